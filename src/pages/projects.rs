use crate::components::form::{FormField, FormStatus, SubmitButton};
use crate::components::ui::{
    Button, ButtonSize, ButtonVariant, Card, CardContent, CardHeader, CardList, CardTitle,
    FileInput, Input, Spinner, Textarea,
};
use crate::forms::ProjectFields;
use crate::models::Project;
use crate::state::{AppContext, Collection};
use crate::util::format_size;
use leptos::prelude::*;

#[component]
pub fn ProjectsPanel(user_id: String) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let projects: Collection<ProjectFields, Project> = Collection::new(&user_id);
    let client = move || app_state.0.api_client.get_untracked();

    projects.load(client());

    let form = projects.form;
    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        projects.submit(client());
    };

    let text = move |get: fn(&ProjectFields) -> &String| {
        Signal::derive(move || form.with(|f| get(&f.fields).clone()))
    };
    let is_editing = move || form.with(|f| f.is_editing());
    let busy = Signal::derive(move || form.with(|f| f.is_busy()));
    let image_hint = Signal::derive(move || {
        form.with(|f| {
            f.fields
                .image
                .as_ref()
                .map(|i| format!("{} ({})", i.name, format_size(i.bytes.len())))
                .unwrap_or_default()
        })
    });

    view! {
        <div class="flex flex-col gap-6">
            <Card>
                <CardHeader>
                    <CardTitle class="text-lg">
                        {move || if is_editing() { "Edit Project" } else { "Add Project" }}
                    </CardTitle>
                </CardHeader>
                <CardContent>
                    <form class="flex flex-col gap-3" on:submit=on_submit>
                        <FormField label="Project name" html_for="project_name">
                            <Input
                                id="project_name"
                                required=true
                                value=text(|f| &f.project_name)
                                on_value=move |v: String| projects.set(|f| f.project_name = v)
                            />
                        </FormField>
                        <FormField label="Description" html_for="project_description">
                            <Textarea
                                id="project_description"
                                value=text(|f| &f.project_description)
                                on_value=move |v: String| projects.set(|f| f.project_description = v)
                            />
                        </FormField>
                        <FormField label="Technology" html_for="project_technology">
                            <Input
                                id="project_technology"
                                placeholder="Rust, Leptos, PostgreSQL"
                                value=text(|f| &f.technology)
                                on_value=move |v: String| projects.set(|f| f.technology = v)
                            />
                        </FormField>
                        <FormField label="Live link" html_for="project_live_link">
                            <Input
                                id="project_live_link"
                                r#type="url"
                                placeholder="https://"
                                value=text(|f| &f.live_link)
                                on_value=move |v: String| projects.set(|f| f.live_link = v)
                            />
                        </FormField>
                        <FormField label="Code link" html_for="project_code_link">
                            <Input
                                id="project_code_link"
                                r#type="url"
                                placeholder="https://"
                                value=text(|f| &f.code_link)
                                on_value=move |v: String| projects.set(|f| f.code_link = v)
                            />
                        </FormField>
                        <FormField label="Image" html_for="project_image" hint=image_hint>
                            <FileInput
                                id="project_image"
                                accept="image/*"
                                has_file=Signal::derive(move || form.with(|f| f.fields.image.is_some()))
                                on_file=move |file| projects.set(|f| f.image = file)
                            />
                        </FormField>

                        <FormStatus message=Signal::derive(move || form.with(|f| f.message.clone())) />

                        <div class="flex items-center gap-2">
                            <SubmitButton
                                busy=busy
                                label=Signal::derive(move || {
                                    if is_editing() { "Update Project".to_string() } else { "Add Project".to_string() }
                                })
                                busy_label="Saving..."
                            />
                            <Show when=is_editing fallback=|| ().into_view()>
                                <button
                                    type="button"
                                    class="px-3 text-sm text-muted-foreground hover:text-foreground"
                                    disabled=move || busy.get()
                                    on:click=move |_| projects.cancel_edit()
                                >
                                    "Cancel"
                                </button>
                            </Show>
                        </div>
                    </form>
                </CardContent>
            </Card>

            <Card>
                <CardHeader>
                    <CardTitle class="text-lg">"Your Projects"</CardTitle>
                </CardHeader>
                <CardContent>
                    {move || {
                        projects.list.with(|l| {
                            if l.loading && l.is_empty() {
                                view! { <Spinner /> }.into_any()
                            } else if l.is_empty() {
                                view! { <p class="text-sm text-muted-foreground">"No projects yet."</p> }.into_any()
                            } else {
                                let items = l.items.clone();
                                view! {
                                    <CardList>
                                        {items.into_iter().map(|p| view! {
                                            <ProjectItem
                                                project=p
                                                busy=busy
                                                on_edit=move |p: Project| projects.edit(&p)
                                                on_delete=move |id: i64| projects.remove(client(), id)
                                            />
                                        }).collect_view()}
                                    </CardList>
                                }
                                .into_any()
                            }
                        })
                    }}
                    {move || projects.list.with(|l| l.last_error.clone()).map(|e| view! {
                        <p class="pt-2 text-xs text-destructive">{e}</p>
                    })}
                </CardContent>
            </Card>
        </div>
    }
}

fn link(href: &str, label: &'static str) -> Option<impl IntoView> {
    let href = href.trim();
    (!href.is_empty()).then(|| {
        view! {
            <a class="text-xs text-primary underline underline-offset-4" href=href.to_string() target="_blank" rel="noopener">
                {label}
            </a>
        }
    })
}

#[component]
fn ProjectItem(
    project: Project,
    #[prop(into)] busy: Signal<bool>,
    #[prop(into)] on_edit: Callback<Project>,
    #[prop(into)] on_delete: Callback<i64>,
) -> impl IntoView {
    let image = project.image();
    let alt = image.name.clone().unwrap_or_default();
    let src = image.data_uri();
    let id = project.project_id;
    let technology = project.technology.trim().to_string();
    let stored = StoredValue::new(project.clone());

    view! {
        <li class="flex flex-col gap-3 rounded-lg border p-4 sm:flex-row sm:items-start">
            {src.map(|src| view! { <img src=src alt=alt class="h-24 w-40 rounded object-cover" /> })}
            <div class="flex flex-1 flex-col gap-1">
                <span class="font-medium">{project.project_name.clone()}</span>
                <p class="whitespace-pre-line text-sm text-muted-foreground">{project.project_description.clone()}</p>
                {(!technology.is_empty()).then(|| view! {
                    <span class="text-xs">"Tech: " {technology.clone()}</span>
                })}
                <div class="flex gap-3">
                    {link(&project.live_link, "Live")}
                    {link(&project.code_link, "Code")}
                </div>
            </div>
            <div class="flex gap-2">
                <Button
                    variant=ButtonVariant::Outline
                    size=ButtonSize::Sm
                    attr:disabled=move || busy.get()
                    on:click=move |_| on_edit.run(stored.get_value())
                >
                    "Edit"
                </Button>
                {id.map(|id| view! {
                    <Button
                        variant=ButtonVariant::Destructive
                        size=ButtonSize::Sm
                        attr:disabled=move || busy.get()
                        on:click=move |_| on_delete.run(id)
                    >
                        "Delete"
                    </Button>
                })}
            </div>
        </li>
    }
}
