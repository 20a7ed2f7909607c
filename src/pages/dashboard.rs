use crate::pages::profile::ProfilePanel;
use crate::pages::projects::ProjectsPanel;
use crate::pages::skills::SkillsPanel;
use crate::session::{gate, GateDecision};
use crate::state::AppContext;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DashboardTab {
    Profile,
    Skills,
    Projects,
}

impl DashboardTab {
    const ALL: [DashboardTab; 3] = [
        DashboardTab::Profile,
        DashboardTab::Skills,
        DashboardTab::Projects,
    ];

    fn label(self) -> &'static str {
        match self {
            DashboardTab::Profile => "User",
            DashboardTab::Skills => "Skills",
            DashboardTab::Projects => "Projects",
        }
    }
}

/// Signed-in area. Nothing renders until the session check allows it; a
/// missing session sends the visitor back to the entry page with a notice.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let navigate = StoredValue::new(use_navigate());
    let decision = Memo::new(move |_| app_state.0.session.with(|s| gate(s.as_ref())));

    Effect::new(move |_| {
        if let GateDecision::Redirect { to } = decision.get() {
            navigate.with_value(|nav| {
                nav(
                    &to,
                    NavigateOptions {
                        replace: true,
                        ..Default::default()
                    },
                )
            });
        }
    });

    let user_id = move || match decision.get() {
        GateDecision::Allow { user_id } => Some(user_id),
        GateDecision::Redirect { .. } => None,
    };

    view! {
        {move || user_id().map(|id| view! { <DashboardShell user_id=id /> })}
    }
}

#[component]
fn DashboardShell(user_id: String) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let tab = RwSignal::new(DashboardTab::Profile);
    let user_id = StoredValue::new(user_id);

    // The gate effect handles the redirect once the session is gone.
    let on_logout = move |_: web_sys::MouseEvent| app_state.0.end_session();

    let tab_class = move |t: DashboardTab| {
        if tab.get() == t {
            "rounded-md bg-primary/10 px-3 py-1.5 text-sm font-medium text-foreground"
        } else {
            "rounded-md px-3 py-1.5 text-sm text-muted-foreground hover:bg-accent hover:text-foreground"
        }
    };

    view! {
        <div class="min-h-screen bg-muted/30">
            <nav class="flex flex-wrap items-center justify-between gap-3 border-b bg-card px-6 py-3">
                <div class="flex items-baseline gap-3">
                    <span class="text-base font-semibold text-foreground">"Dashboard"</span>
                    <span class="text-xs text-muted-foreground">{user_id.get_value()}</span>
                </div>
                <ul class="flex items-center gap-2">
                    {DashboardTab::ALL
                        .into_iter()
                        .map(|t| view! {
                            <li>
                                <button type="button" class=move || tab_class(t) on:click=move |_| tab.set(t)>
                                    {t.label()}
                                </button>
                            </li>
                        })
                        .collect_view()}
                    <li>
                        <button
                            type="button"
                            class="rounded-md px-3 py-1.5 text-sm text-destructive hover:bg-destructive/10"
                            on:click=on_logout
                        >
                            "Logout"
                        </button>
                    </li>
                </ul>
            </nav>

            <main class="mx-auto w-full max-w-4xl px-4 py-8">
                {move || {
                    let owner = user_id.get_value();
                    match tab.get() {
                        DashboardTab::Profile => view! { <ProfilePanel user_id=owner /> }.into_any(),
                        DashboardTab::Skills => view! { <SkillsPanel user_id=owner /> }.into_any(),
                        DashboardTab::Projects => view! { <ProjectsPanel user_id=owner /> }.into_any(),
                    }
                }}
            </main>
        </div>
    }
}
