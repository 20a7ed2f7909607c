use crate::components::form::{FormField, FormStatus, PasswordInput, SubmitButton};
use crate::components::ui::{
    Button, ButtonSize, ButtonVariant, Card, CardContent, CardDescription, CardHeader, CardTitle,
    FileInput, Input, Spinner, Textarea,
};
use crate::forms::{prepare_profile_update, FormMessage, FormState, ProfileFields, ProfileFiles, ProfileLoad};
use crate::models::{FileUpload, ProfileFileSlot};
use crate::state::AppContext;
use crate::util::format_size;
use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::warn;

#[component]
pub fn ProfilePanel(user_id: String) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let form = RwSignal::new(FormState::with_fields(ProfileFields {
        user_id: user_id.clone(),
        ..Default::default()
    }));
    let uploads = RwSignal::new(FormState::<ProfileFiles>::new());
    let load = RwSignal::new(ProfileLoad::Loading);
    let owner = StoredValue::new(user_id);

    let load_profile = move || {
        load.set(ProfileLoad::Loading);
        let client = app_state.0.api_client.get_untracked();
        let owner = owner.get_value();
        spawn_local(async move {
            match client.get_user(&owner).await {
                Ok(profile) => {
                    form.update(|f| f.fields = ProfileFields::from_profile(&profile));
                    load.set(ProfileLoad::Loaded);
                }
                Err(e) => {
                    warn!(user_id = %owner, error = %e, "profile load failed");
                    load.set(ProfileLoad::Failed(e.message));
                }
            }
        });
    };
    load_profile();

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let mut profile = None;
        load.with_untracked(|l| form.update(|f| profile = prepare_profile_update(f, l)));
        let Some(profile) = profile else {
            return;
        };

        let client = app_state.0.api_client.get_untracked();
        spawn_local(async move {
            match client.update_user_info(&profile).await {
                Ok(res) => form.update(|f| {
                    f.fields.password.clear();
                    f.succeed_keep(res.message);
                }),
                Err(e) => form.update(|f| f.fail(e.message)),
            }
        });
    };

    let upload = move |slot: ProfileFileSlot| {
        let Some(file) = uploads.try_update(|u| u.begin_upload(slot)).flatten() else {
            return;
        };

        let client = app_state.0.api_client.get_untracked();
        let owner = owner.get_value();
        spawn_local(async move {
            match client.update_user_file(&owner, slot, &file).await {
                Ok(res) => uploads.update(|u| {
                    u.fields.set(slot, None);
                    u.succeed_keep(res.message);
                }),
                Err(e) => uploads.update(|u| u.fail(e.message)),
            }
        });
    };

    let field = move |get: fn(&ProfileFields) -> &String| {
        Signal::derive(move || form.with(|f| get(&f.fields).clone()))
    };

    let upload_row = move |slot: ProfileFileSlot| {
        let id = format!("profile_{}", slot.update_key());
        let has_file = Signal::derive(move || uploads.with(|u| u.fields.get(slot).is_some()));
        let hint = Signal::derive(move || {
            uploads.with(|u| {
                u.fields
                    .get(slot)
                    .map(|f: &FileUpload| format!("{} ({})", f.name, format_size(f.bytes.len())))
                    .unwrap_or_default()
            })
        });
        let accept = if slot == ProfileFileSlot::Resume {
            ".pdf,.doc,.docx"
        } else {
            "image/*"
        };
        view! {
            <div class="flex items-end gap-2">
                <div class="flex-1">
                    <FormField label=slot.label() html_for=id.clone() hint=hint>
                        <FileInput
                            id=id
                            accept=accept
                            has_file=has_file
                            on_file=move |file| uploads.update(|u| u.fields.set(slot, file))
                        />
                    </FormField>
                </div>
                <Button
                    variant=ButtonVariant::Outline
                    size=ButtonSize::Sm
                    attr:disabled=move || uploads.with(|u| u.is_busy())
                    on:click=move |_| upload(slot)
                >
                    "Upload"
                </Button>
            </div>
        }
    };

    view! {
        <div class="flex flex-col gap-6">
            <Card>
                <CardHeader>
                    <CardTitle class="text-lg">"Update User Information"</CardTitle>
                    <CardDescription class="text-xs">
                        "Leave the password blank to keep your current one."
                    </CardDescription>
                </CardHeader>
                <CardContent>
                    <Show
                        when=move || load.with(|l| *l == ProfileLoad::Loaded)
                        fallback=move || match load.get() {
                            ProfileLoad::Failed(message) => view! {
                                <div class="flex flex-col items-start gap-3">
                                    <FormStatus message=Signal::derive(move || Some(FormMessage::Error(message.clone()))) />
                                    <Button
                                        variant=ButtonVariant::Outline
                                        size=ButtonSize::Sm
                                        on:click=move |_| load_profile()
                                    >
                                        "Retry"
                                    </Button>
                                </div>
                            }
                            .into_any(),
                            _ => view! { <Spinner /> }.into_any(),
                        }
                    >
                        <form class="flex flex-col gap-3" on:submit=on_submit>
                            <FormField label="User ID" html_for="profile_user_id">
                                <Input
                                    id="profile_user_id"
                                    readonly=true
                                    value=field(|f| &f.user_id)
                                    on_value=|_: String| {}
                                />
                            </FormField>
                            <FormField label="Name" html_for="profile_name">
                                <Input
                                    id="profile_name"
                                    required=true
                                    value=field(|f| &f.name)
                                    on_value=move |v: String| form.update(|f| f.fields.name = v)
                                />
                            </FormField>
                            <FormField label="Email" html_for="profile_email">
                                <Input
                                    id="profile_email"
                                    r#type="email"
                                    required=true
                                    value=field(|f| &f.email)
                                    on_value=move |v: String| form.update(|f| f.fields.email = v)
                                />
                            </FormField>
                            <FormField label="New password" html_for="profile_password">
                                <PasswordInput
                                    id="profile_password"
                                    autocomplete="new-password"
                                    value=field(|f| &f.password)
                                    on_value=move |v: String| form.update(|f| f.fields.password = v)
                                />
                            </FormField>
                            <FormField label="Role" html_for="profile_role">
                                <Input
                                    id="profile_role"
                                    value=field(|f| &f.role)
                                    on_value=move |v: String| form.update(|f| f.fields.role = v)
                                />
                            </FormField>
                            <FormField label="About" html_for="profile_about">
                                <Textarea
                                    id="profile_about"
                                    rows=5
                                    value=field(|f| &f.about)
                                    on_value=move |v: String| form.update(|f| f.fields.about = v)
                                />
                            </FormField>

                            <FormStatus message=Signal::derive(move || form.with(|f| f.message.clone())) />

                            <SubmitButton
                                busy=Signal::derive(move || form.with(|f| f.is_busy()))
                                label="Update Information"
                                busy_label="Saving..."
                            />
                        </form>
                    </Show>
                </CardContent>
            </Card>

            <Card>
                <CardHeader>
                    <CardTitle class="text-lg">"Images & Resume"</CardTitle>
                    <CardDescription class="text-xs">"Each file is uploaded on its own."</CardDescription>
                </CardHeader>
                <CardContent>
                    <div class="flex flex-col gap-4">
                        {ProfileFileSlot::ALL.into_iter().map(upload_row).collect_view()}
                        <FormStatus message=Signal::derive(move || uploads.with(|u| u.message.clone())) />
                    </div>
                </CardContent>
            </Card>
        </div>
    }
}
