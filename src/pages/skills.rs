use crate::components::form::{FormField, FormStatus, SubmitButton};
use crate::components::ui::{
    Button, ButtonSize, ButtonVariant, Card, CardContent, CardHeader, CardList, CardTitle,
    FileInput, Input, Spinner,
};
use crate::forms::SkillFields;
use crate::models::{non_empty_points, Skill};
use crate::state::{AppContext, Collection};
use leptos::prelude::*;

#[component]
pub fn SkillsPanel(user_id: String) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let skills: Collection<SkillFields, Skill> = Collection::new(&user_id);
    let client = move || app_state.0.api_client.get_untracked();

    skills.load(client());

    let form = skills.form;
    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        skills.submit(client());
    };

    let text = move |get: fn(&SkillFields) -> &String| {
        Signal::derive(move || form.with(|f| get(&f.fields).clone()))
    };
    let point = move |i: usize| Signal::derive(move || form.with(|f| f.fields.points[i].clone()));
    let is_editing = move || form.with(|f| f.is_editing());
    let busy = Signal::derive(move || form.with(|f| f.is_busy()));

    view! {
        <div class="flex flex-col gap-6">
            <Card>
                <CardHeader>
                    <CardTitle class="text-lg">
                        {move || if is_editing() { "Edit Skill" } else { "Add Skill" }}
                    </CardTitle>
                </CardHeader>
                <CardContent>
                    <form class="flex flex-col gap-3" on:submit=on_submit>
                        <FormField label="Skill name" html_for="skill_name">
                            <Input
                                id="skill_name"
                                required=true
                                value=text(|f| &f.skill_name)
                                on_value=move |v: String| skills.set(|f| f.skill_name = v)
                            />
                        </FormField>
                        <FormField label="Learned from" html_for="skill_learned_from">
                            <Input
                                id="skill_learned_from"
                                value=text(|f| &f.learned_from)
                                on_value=move |v: String| skills.set(|f| f.learned_from = v)
                            />
                        </FormField>
                        {(0..5)
                            .map(|i| {
                                let id = format!("skill_point{}", i + 1);
                                view! {
                                    <FormField label=format!("Point {}", i + 1) html_for=id.clone()>
                                        <Input
                                            id=id
                                            value=point(i)
                                            on_value=move |v: String| skills.set(|f| f.points[i] = v)
                                        />
                                    </FormField>
                                }
                            })
                            .collect_view()}
                        <FormField label="Source link" html_for="skill_source_link">
                            <Input
                                id="skill_source_link"
                                r#type="url"
                                placeholder="https://"
                                value=text(|f| &f.source_link)
                                on_value=move |v: String| skills.set(|f| f.source_link = v)
                            />
                        </FormField>
                        <FormField label="Icon" html_for="skill_icon">
                            <FileInput
                                id="skill_icon"
                                accept="image/*"
                                has_file=Signal::derive(move || form.with(|f| f.fields.icon.is_some()))
                                on_file=move |file| skills.set(|f| f.icon = file)
                            />
                        </FormField>

                        <FormStatus message=Signal::derive(move || form.with(|f| f.message.clone())) />

                        <div class="flex items-center gap-2">
                            <SubmitButton
                                busy=busy
                                label=Signal::derive(move || {
                                    if is_editing() { "Update Skill".to_string() } else { "Add Skill".to_string() }
                                })
                                busy_label="Saving..."
                            />
                            <Show when=is_editing fallback=|| ().into_view()>
                                <button
                                    type="button"
                                    class="px-3 text-sm text-muted-foreground hover:text-foreground"
                                    disabled=move || busy.get()
                                    on:click=move |_| skills.cancel_edit()
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
                    <CardTitle class="text-lg">"Your Skills"</CardTitle>
                </CardHeader>
                <CardContent>
                    {move || {
                        skills.list.with(|l| {
                            if l.loading && l.is_empty() {
                                view! { <Spinner /> }.into_any()
                            } else if l.is_empty() {
                                view! { <p class="text-sm text-muted-foreground">"No skills yet."</p> }.into_any()
                            } else {
                                let items = l.items.clone();
                                view! {
                                    <CardList>
                                        {items.into_iter().map(|s| view! {
                                            <SkillItem
                                                skill=s
                                                busy=busy
                                                on_edit=move |s: Skill| skills.edit(&s)
                                                on_delete=move |id: i64| skills.remove(client(), id)
                                            />
                                        }).collect_view()}
                                    </CardList>
                                }
                                .into_any()
                            }
                        })
                    }}
                    {move || skills.list.with(|l| l.last_error.clone()).map(|e| view! {
                        <p class="pt-2 text-xs text-destructive">{e}</p>
                    })}
                </CardContent>
            </Card>
        </div>
    }
}

#[component]
fn SkillItem(
    skill: Skill,
    #[prop(into)] busy: Signal<bool>,
    #[prop(into)] on_edit: Callback<Skill>,
    #[prop(into)] on_delete: Callback<i64>,
) -> impl IntoView {
    let points = non_empty_points(&skill);
    let icon = skill.icon().data_uri();
    let id = skill.skill_id;
    let source = skill.source_link.trim().to_string();
    let learned_from = skill.learned_from.trim().to_string();
    let stored = StoredValue::new(skill.clone());

    view! {
        <li class="flex items-start gap-4 rounded-lg border p-4">
            {icon.map(|src| view! { <img src=src alt="" class="size-10 rounded object-contain" /> })}
            <div class="flex flex-1 flex-col gap-1">
                <span class="font-medium">{skill.skill_name.clone()}</span>
                {(!learned_from.is_empty()).then(|| view! {
                    <span class="text-xs text-muted-foreground">"Learned from " {learned_from.clone()}</span>
                })}
                {(!points.is_empty()).then(|| view! {
                    <ul class="list-disc pl-5 text-sm">
                        {points.into_iter().map(|p| view! { <li>{p}</li> }).collect_view()}
                    </ul>
                })}
                {(!source.is_empty()).then(|| view! {
                    <a class="text-xs text-primary underline underline-offset-4" href=source.clone() target="_blank" rel="noopener">
                        "Source"
                    </a>
                })}
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
