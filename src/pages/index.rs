use crate::components::form::{FormField, FormStatus, PasswordInput, SubmitButton};
use crate::components::ui::{
    Alert, AlertDescription, Card, CardContent, CardDescription, CardHeader, CardTitle, FileInput,
    Input, Textarea,
};
use crate::forms::{FormState, LoginFields, RegisterFields};
use crate::models::ProfileFileSlot;
use crate::session::notice_message;
use crate::state::AppContext;
use crate::util::format_size;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_navigate, use_query_map};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EntryTab {
    Login,
    Register,
}

#[component]
pub fn IndexPage() -> impl IntoView {
    let tab = RwSignal::new(EntryTab::Login);
    let query = use_query_map();
    let notice = move || {
        query
            .with(|q| q.get("notice"))
            .and_then(|n| notice_message(&n))
    };

    let tab_class = move |t: EntryTab| {
        if tab.get() == t {
            "border-b-2 border-primary px-2 py-1 text-sm font-medium text-foreground"
        } else {
            "px-2 py-1 text-sm text-muted-foreground hover:text-foreground"
        }
    };

    view! {
        <div class="min-h-screen bg-background">
            <nav class="sticky top-0 flex items-center justify-between border-b bg-card px-6 py-3">
                <a href="/" class="text-base font-semibold tracking-wide text-foreground">"Portfolio Manager"</a>
                <div class="flex items-center gap-4">
                    <button type="button" class=move || tab_class(EntryTab::Register) on:click=move |_| tab.set(EntryTab::Register)>
                        "Register"
                    </button>
                    <button type="button" class=move || tab_class(EntryTab::Login) on:click=move |_| tab.set(EntryTab::Login)>
                        "Login"
                    </button>
                </div>
            </nav>

            <main class="mx-auto flex w-full max-w-md flex-col gap-4 px-4 py-10">
                {move || notice().map(|text| view! {
                    <Alert class="border-amber-500/40">
                        <AlertDescription class="text-amber-700">{text}</AlertDescription>
                    </Alert>
                })}

                <Show when=move || tab.get() == EntryTab::Login fallback=|| view! { <RegisterForm /> }>
                    <LoginForm />
                </Show>
            </main>
        </div>
    }
}

#[component]
fn LoginForm() -> impl IntoView {
    let form = RwSignal::new(FormState::<LoginFields>::new());
    let app_state = expect_context::<AppContext>();
    let navigate = StoredValue::new(use_navigate());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let mut request = None;
        form.update(|f| {
            if !f.begin_submit() {
                return;
            }
            match f.fields.validate() {
                Ok(()) => request = Some(f.fields.to_request()),
                Err(e) => f.fail_validation(e),
            }
        });
        let Some(request) = request else {
            return;
        };

        let client = app_state.0.api_client.get_untracked();
        spawn_local(async move {
            match client.login(&request).await {
                Ok(()) => {
                    form.update(|f| f.succeed("Login successful"));
                    app_state.0.begin_session(&request.user_id);
                    navigate.with_value(|nav| nav("/dashboard", Default::default()));
                }
                Err(e) => form.update(|f| f.fail(e.message)),
            }
        });
    };

    let field = move |get: fn(&LoginFields) -> &String| {
        Signal::derive(move || form.with(|f| get(&f.fields).clone()))
    };

    view! {
        <Card>
            <CardHeader>
                <CardTitle class="text-lg">"Login"</CardTitle>
                <CardDescription class="text-xs">"Sign in with your user ID, email and password."</CardDescription>
            </CardHeader>
            <CardContent>
                <form class="flex flex-col gap-3" on:submit=on_submit>
                    <FormField label="User ID" html_for="login_user_id">
                        <Input
                            id="login_user_id"
                            placeholder="12345678"
                            autocomplete="username"
                            required=true
                            value=field(|f| &f.user_id)
                            on_value=move |v: String| form.update(|f| f.fields.user_id = v)
                        />
                    </FormField>
                    <FormField label="Email" html_for="login_email">
                        <Input
                            id="login_email"
                            r#type="email"
                            placeholder="you@example.com"
                            autocomplete="email"
                            required=true
                            value=field(|f| &f.email)
                            on_value=move |v: String| form.update(|f| f.fields.email = v)
                        />
                    </FormField>
                    <FormField label="Password" html_for="login_password">
                        <PasswordInput
                            id="login_password"
                            autocomplete="current-password"
                            required=true
                            value=field(|f| &f.password)
                            on_value=move |v: String| form.update(|f| f.fields.password = v)
                        />
                    </FormField>

                    <FormStatus message=Signal::derive(move || form.with(|f| f.message.clone())) />

                    <SubmitButton
                        busy=Signal::derive(move || form.with(|f| f.is_busy()))
                        label="Login"
                        busy_label="Signing in..."
                    />
                </form>
            </CardContent>
        </Card>
    }
}

#[component]
fn RegisterForm() -> impl IntoView {
    let form = RwSignal::new(FormState::<RegisterFields>::new());
    let app_state = expect_context::<AppContext>();

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let mut payload = None;
        form.update(|f| {
            if !f.begin_submit() {
                return;
            }
            match f.fields.validate() {
                Ok(()) => payload = Some((f.fields.to_request(), f.fields.files.clone())),
                Err(e) => f.fail_validation(e),
            }
        });
        let Some((request, files)) = payload else {
            return;
        };

        let client = app_state.0.api_client.get_untracked();
        spawn_local(async move {
            match client.register(&request, &files).await {
                Ok(res) => {
                    let message = if res.message.trim().is_empty() {
                        "Registration successful.".to_string()
                    } else {
                        res.message
                    };
                    form.update(|f| f.succeed(message));
                }
                Err(e) => form.update(|f| f.fail(e.message)),
            }
        });
    };

    let field = move |get: fn(&RegisterFields) -> &String| {
        Signal::derive(move || form.with(|f| get(&f.fields).clone()))
    };

    let file_row = move |slot: ProfileFileSlot| {
        let id = format!("register_{}", slot.register_key());
        let has_file = Signal::derive(move || form.with(|f| f.fields.files.get(slot).is_some()));
        let hint = Signal::derive(move || {
            form.with(|f| {
                f.fields
                    .files
                    .get(slot)
                    .map(|file| format!("{} ({})", file.name, format_size(file.bytes.len())))
                    .unwrap_or_default()
            })
        });
        let accept = if slot == ProfileFileSlot::Resume {
            ".pdf,.doc,.docx"
        } else {
            "image/*"
        };
        view! {
            <FormField label=slot.label() html_for=id.clone() hint=hint>
                <FileInput
                    id=id
                    accept=accept
                    has_file=has_file
                    on_file=move |file| form.update(|f| f.fields.files.set(slot, file))
                />
            </FormField>
        }
    };

    view! {
        <Card>
            <CardHeader>
                <CardTitle class="text-lg">"Register"</CardTitle>
                <CardDescription class="text-xs">"Create your portfolio account."</CardDescription>
            </CardHeader>
            <CardContent>
                <form class="flex flex-col gap-3" on:submit=on_submit>
                    <FormField label="User ID (8 digits)" html_for="register_user_id">
                        <Input
                            id="register_user_id"
                            placeholder="12345678"
                            required=true
                            value=field(|f| &f.user_id)
                            on_value=move |v: String| form.update(|f| f.fields.user_id = v)
                        />
                    </FormField>
                    <FormField label="Name" html_for="register_name">
                        <Input
                            id="register_name"
                            required=true
                            value=field(|f| &f.name)
                            on_value=move |v: String| form.update(|f| f.fields.name = v)
                        />
                    </FormField>
                    <FormField label="Email" html_for="register_email">
                        <Input
                            id="register_email"
                            r#type="email"
                            placeholder="you@example.com"
                            required=true
                            value=field(|f| &f.email)
                            on_value=move |v: String| form.update(|f| f.fields.email = v)
                        />
                    </FormField>
                    <FormField label="Password" html_for="register_password">
                        <PasswordInput
                            id="register_password"
                            autocomplete="new-password"
                            required=true
                            value=field(|f| &f.password)
                            on_value=move |v: String| form.update(|f| f.fields.password = v)
                        />
                    </FormField>
                    <FormField label="Role" html_for="register_role">
                        <Input
                            id="register_role"
                            placeholder="Backend engineer"
                            value=field(|f| &f.role)
                            on_value=move |v: String| form.update(|f| f.fields.role = v)
                        />
                    </FormField>
                    <FormField label="About" html_for="register_about">
                        <Textarea
                            id="register_about"
                            value=field(|f| &f.about)
                            on_value=move |v: String| form.update(|f| f.fields.about = v)
                        />
                    </FormField>

                    {ProfileFileSlot::ALL.into_iter().map(file_row).collect_view()}

                    <FormStatus message=Signal::derive(move || form.with(|f| f.message.clone())) />

                    <SubmitButton
                        busy=Signal::derive(move || form.with(|f| f.is_busy()))
                        label="Register"
                        busy_label="Registering..."
                    />
                </form>
            </CardContent>
        </Card>
    }
}
