//! Hotel Voucher Generator - Frontend Rust/Leptos Application
//!
//! A WebAssembly frontend for converting a spreadsheet of hotel-booking
//! records into formatted PDF vouchers, delivered as a single ZIP archive.
//! Parsing and PDF/ZIP rendering happen in a remote service; this crate owns
//! the upload-review-generate-deliver workflow around it.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App                                  │
//! ├─────────────────────────────────────────────────────────────┤
//! │  MainContent                                                │
//! │  ├── Hero (title, description)                              │
//! │  ├── UploadSection (file selection + parse trigger)         │
//! │  ├── PreviewSection (review table + generate trigger)       │
//! │  └── StatusBanner (single visible status line)              │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Footer                                                     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`state`] - The session state machine driving the workflow
//! - [`fields`] - Display-field resolution over loose column names
//! - [`components`] - UI components
//! - [`services`] - Voucher service calls and archive delivery

use leptos::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::*;
use wasm_bindgen::prelude::*;
use web_sys::File;

// =============================================================================
// Module declarations
// =============================================================================

pub mod components;
pub mod config;
pub mod fields;
pub mod services;
pub mod state;
pub mod types;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Types
pub use types::{SelectedFile, StatusLine, StatusTone, VoucherRecord};

// Workflow state
pub use state::{Phase, Session};

// Components
pub use components::*;

// Services
pub use services::*;

// =============================================================================
// Application Entry Point
// =============================================================================

/// WASM entry point - called automatically by trunk.
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    _ = console_log::init_with_level(log::Level::Debug);

    log::info!("Starting {}", APP_NAME);

    mount_to_body(|| view! { <App/> });
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text=APP_NAME/>
        <Router>
            <main>
                <Routes>
                    <Route path="/" view=MainContent/>
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn MainContent() -> impl IntoView {
    // The single source of truth for the workflow. Components mutate it only
    // through its transition API. The live file handle rides alongside; the
    // session itself stores only validated metadata.
    let session = create_rw_signal(Session::new());
    let file_handle = create_rw_signal(None::<File>);

    view! {
        <Hero/>

        <div class="container">
            <UploadSection session=session file_handle=file_handle/>

            // Present whenever a parsed set exists to review, including an
            // empty one: the table renders empty rather than hidden.
            <Show
                when=move || session.with(|s| s.in_review())
                fallback=|| view! { }
            >
                <PreviewSection session=session/>
            </Show>

            <StatusBanner session=session/>
        </div>

        <Footer/>
    }
}
