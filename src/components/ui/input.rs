use crate::models::FileUpload;
use crate::util::{first_selected_file, read_file};
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use tw_merge::tw_merge;

const FIELD_CLASS: &str = "placeholder:text-muted-foreground selection:bg-primary selection:text-primary-foreground border-input w-full min-w-0 rounded-md border bg-transparent px-3 py-1 text-sm shadow-xs outline-none focus-visible:border-ring focus-visible:ring-2 focus-visible:ring-ring/50 disabled:cursor-not-allowed disabled:opacity-50 read-only:bg-muted";

/// Text input driven by a value signal.
///
/// Field values live inside a larger form record, so the input reads through
/// `value` and reports edits through `on_value` instead of owning a signal.
#[component]
pub fn Input(
    #[prop(into, optional)] class: String,
    #[prop(into, default = "text")] r#type: &'static str,
    #[prop(into, optional)] placeholder: String,
    #[prop(into, optional)] id: String,
    #[prop(into, optional)] autocomplete: String,
    #[prop(optional)] required: bool,
    #[prop(optional)] readonly: bool,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_value: Callback<String>,
) -> impl IntoView {
    let merged_class = tw_merge!("flex h-8", FIELD_CLASS, class);

    view! {
        <input
            data-name="Input"
            type=r#type
            class=merged_class
            placeholder=placeholder
            id=id
            autocomplete=autocomplete
            required=required
            readonly=readonly
            prop:value=move || value.get()
            on:input=move |ev| on_value.run(event_target_value(&ev))
        />
    }
}

#[component]
pub fn Textarea(
    #[prop(into, optional)] class: String,
    #[prop(into, optional)] placeholder: String,
    #[prop(into, optional)] id: String,
    #[prop(default = 4)] rows: u32,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_value: Callback<String>,
) -> impl IntoView {
    let merged_class = tw_merge!("min-h-16 py-2", FIELD_CLASS, class);

    view! {
        <textarea
            data-name="Textarea"
            class=merged_class
            placeholder=placeholder
            id=id
            rows=rows
            prop:value=move || value.get()
            on:input=move |ev| on_value.run(event_target_value(&ev))
        />
    }
}

/// File picker that hands the read bytes to `on_file`.
///
/// Clearing the selection (or a form reset that sets `has_file` back to
/// `false`) empties the native input too.
#[component]
pub fn FileInput(
    #[prop(into, optional)] class: String,
    #[prop(into, optional)] id: String,
    #[prop(into, optional)] accept: String,
    #[prop(into)] has_file: Signal<bool>,
    #[prop(into)] on_file: Callback<Option<FileUpload>>,
) -> impl IntoView {
    let node_ref: NodeRef<html::Input> = NodeRef::new();
    let merged_class = tw_merge!(
        "flex h-9 file:mr-3 file:h-7 file:border-0 file:bg-transparent file:text-sm file:font-medium",
        FIELD_CLASS,
        class
    );

    Effect::new(move |_| {
        if !has_file.get() {
            if let Some(el) = node_ref.get_untracked() {
                el.set_value("");
            }
        }
    });

    let on_change = move |ev: web_sys::Event| match first_selected_file(&ev) {
        Some(file) => spawn_local(async move {
            on_file.run(read_file(file).await);
        }),
        None => on_file.run(None),
    };

    view! {
        <input
            data-name="FileInput"
            type="file"
            class=merged_class
            id=id
            accept=accept
            node_ref=node_ref
            on:change=on_change
        />
    }
}
