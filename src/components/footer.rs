//! Footer component

use leptos::*;

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer>
            <div>"Hotel Voucher Generator • Powered by " <span class="rust-badge">"Rust + Leptos"</span></div>
        </footer>
    }
}
