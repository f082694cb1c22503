//! Hero section component

use leptos::*;

#[component]
pub fn Hero() -> impl IntoView {
    view! {
        <div class="hero">
            <h1>"Hotel Voucher Generator"</h1>
            <p class="subtitle">
                "Upload an Excel file of booking records to generate hotel "
                "confirmation vouchers, packaged as a single ZIP download."
            </p>
        </div>
    }
}
