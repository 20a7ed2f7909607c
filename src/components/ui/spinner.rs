use leptos::prelude::*;
use tw_merge::tw_merge;

#[component]
pub fn Spinner(#[prop(into, optional)] class: String) -> impl IntoView {
    let merged_class = tw_merge!(
        "inline-block size-4 animate-spin rounded-full border-2 border-current border-r-transparent",
        class
    );

    view! { <span class=merged_class role="status" aria-label="Loading" /> }
}
