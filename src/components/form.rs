//! Building blocks shared by every form on the site.

use crate::components::ui::{
    Alert, AlertDescription, Button, ButtonSize, Input, Label, Spinner,
};
use crate::forms::FormMessage;
use leptos::prelude::*;

#[component]
pub fn FormField(
    #[prop(into)] label: String,
    #[prop(into)] html_for: String,
    #[prop(into, optional)] hint: Option<Signal<String>>,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="flex flex-col gap-1.5">
            <Label html_for=html_for>{label}</Label>
            {children()}
            {hint.map(|h| view! { <p class="text-muted-foreground text-xs">{move || h.get()}</p> })}
        </div>
    }
}

/// Error or success line under a form.
#[component]
pub fn FormStatus(#[prop(into)] message: Signal<Option<FormMessage>>) -> impl IntoView {
    move || {
        message.get().map(|m| match m {
            FormMessage::Error(e) => view! {
                <Alert class="border-destructive/30">
                    <AlertDescription class="text-destructive">{e}</AlertDescription>
                </Alert>
            }
            .into_any(),
            FormMessage::Success(s) => view! {
                <Alert class="border-emerald-500/30">
                    <AlertDescription class="text-emerald-700">{s}</AlertDescription>
                </Alert>
            }
            .into_any(),
        })
    }
}

#[component]
pub fn SubmitButton(
    #[prop(into)] busy: Signal<bool>,
    #[prop(into)] label: Signal<String>,
    #[prop(into)] busy_label: String,
) -> impl IntoView {
    view! {
        <Button class="w-full" size=ButtonSize::Sm attr:disabled=move || busy.get()>
            <span class="inline-flex items-center gap-2">
                <Show when=move || busy.get() fallback=|| ().into_view()>
                    <Spinner />
                </Show>
                {move || if busy.get() { busy_label.clone() } else { label.get() }}
            </span>
        </Button>
    }
}

/// Password input with a show/hide toggle.
#[component]
pub fn PasswordInput(
    #[prop(into)] id: String,
    #[prop(into, optional)] placeholder: String,
    #[prop(into, optional)] autocomplete: String,
    #[prop(optional)] required: bool,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_value: Callback<String>,
) -> impl IntoView {
    let visible = RwSignal::new(false);

    view! {
        <div class="flex items-center gap-2">
            {move || {
                let kind = if visible.get() { "text" } else { "password" };
                view! {
                    <Input
                        id=id.clone()
                        r#type=kind
                        placeholder=placeholder.clone()
                        autocomplete=autocomplete.clone()
                        required=required
                        value=value
                        on_value=on_value
                    />
                }
            }}
            <button
                type="button"
                class="text-muted-foreground hover:text-foreground px-2 text-xs"
                on:click=move |_| visible.update(|v| *v = !*v)
            >
                {move || if visible.get() { "Hide" } else { "Show" }}
            </button>
        </div>
    }
}
