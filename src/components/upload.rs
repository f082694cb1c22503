//! Spreadsheet upload component with drag & drop support.
//!
//! Handles file selection and the explicit parse trigger. All state changes
//! go through the [`Session`] transition API; this component only holds the
//! live `web_sys::File` handle the session metadata stands for.

use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, Event, File, HtmlInputElement};

use crate::config::BACKEND_URL;
use crate::services::upload_excel;
use crate::state::{Phase, Session};
use crate::types::SelectedFile;

#[component]
pub fn UploadSection(
    session: RwSignal<Session>,
    file_handle: RwSignal<Option<File>>,
) -> impl IntoView {
    let (drag_active, set_drag_active) = create_signal(false);

    // Shared by the input change handler and the drop handler.
    let accept_file = move |file: File| {
        let meta = SelectedFile::new(file.name(), file.size() as u64, file.type_());
        let accepted = session.try_update(|s| s.select_file(meta)).unwrap_or(false);
        if accepted {
            log::info!("Selected file: {}", file.name());
            file_handle.set(Some(file));
        }
    };

    let on_file_change = move |ev: Event| {
        let input: HtmlInputElement = event_target(&ev);
        if let Some(files) = input.files() {
            if let Some(file) = files.get(0) {
                accept_file(file);
            }
        }
    };

    let on_drag_over = move |ev: DragEvent| {
        ev.prevent_default();
        set_drag_active.set(true);
    };

    let on_drag_leave = move |ev: DragEvent| {
        ev.prevent_default();
        set_drag_active.set(false);
    };

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        set_drag_active.set(false);
        if let Some(transfer) = ev.data_transfer() {
            if let Some(files) = transfer.files() {
                if let Some(file) = files.get(0) {
                    accept_file(file);
                }
            }
        }
    };

    let trigger_file_input = move |_| {
        if session.with_untracked(|s| s.is_busy()) {
            return;
        }
        if let Some(input) = gloo_utils::document().get_element_by_id("file-input") {
            if let Some(input) = input.dyn_ref::<HtmlInputElement>() {
                input.click();
            }
        }
    };

    let on_parse = move |_| {
        let started = session.try_update(|s| s.begin_parse()).unwrap_or(false);
        if !started {
            return;
        }
        let Some(file) = file_handle.get_untracked() else {
            // The handle and the session metadata must not diverge; recover
            // to the stable phase instead of hanging in Parsing.
            session.update(|s| s.fail_parse("Failed to process file"));
            return;
        };
        spawn_local(async move {
            match upload_excel(file, BACKEND_URL).await {
                Ok(records) => session.update(|s| s.finish_parse(records)),
                Err(err) => {
                    log::error!("Excel upload failed: {}", err);
                    session.update(|s| s.fail_parse(err.parse_message()));
                }
            }
        });
    };

    let parse_disabled = move || session.with(|s| s.is_busy() || s.file().is_none());
    let parsing = move || session.with(|s| s.phase() == Phase::Parsing);

    view! {
        <div class="upload-section">
            <h2>"Upload Excel File"</h2>

            <div
                class="drop-zone"
                class=("drag-active", move || drag_active.get())
                on:dragenter=on_drag_over
                on:dragover=on_drag_over
                on:dragleave=on_drag_leave
                on:drop=on_drop
                on:click=trigger_file_input
            >
                <div class="drop-zone-text">
                    "Drag and drop your Excel file here, or click to choose one"
                </div>
                <div class="drop-zone-hint">"Accepted formats: .xlsx, .xls"</div>

                <Show
                    when=move || session.with(|s| s.file().is_some())
                    fallback=|| view! { }
                >
                    <div class="selected-file">
                        {move || {
                            session.with(|s| {
                                s.file()
                                    .map(|f| format!("Selected: {} ({:.2} MB)", f.name, f.size_mb()))
                                    .unwrap_or_default()
                            })
                        }}
                    </div>
                </Show>

                <input
                    type="file"
                    id="file-input"
                    accept=".xlsx,.xls"
                    style="display:none"
                    on:change=on_file_change
                />
            </div>

            <button class="btn btn-parse" disabled=parse_disabled on:click=on_parse>
                {move || if parsing() { "Parsing..." } else { "Parse Excel File" }}
            </button>
        </div>
    }
}
