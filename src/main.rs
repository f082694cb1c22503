//! Entry point for the WASM application

use leptos::*;
use vouchergen::App;

pub fn main() {
    console_error_panic_hook::set_once();
    _ = console_log::init_with_level(log::Level::Debug);

    log::info!("Starting {}", vouchergen::APP_NAME);

    mount_to_body(|| view! { <App/> })
}
