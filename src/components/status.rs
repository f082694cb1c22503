//! Single visible status line, toned by severity.

use leptos::*;

use crate::state::Session;

#[component]
pub fn StatusBanner(session: RwSignal<Session>) -> impl IntoView {
    view! {
        <Show
            when=move || session.with(|s| s.status().is_some())
            fallback=|| view! { }
        >
            <div class=move || {
                session.with(|s| {
                    let tone = s.status().map(|line| line.tone.css_class()).unwrap_or_default();
                    format!("status-banner {}", tone)
                })
            }>
                {move || {
                    session.with(|s| s.status().map(|line| line.message.clone()).unwrap_or_default())
                }}
            </div>
        </Show>
    }
}
