//! Review table for parsed voucher records, plus the generate trigger.

use leptos::*;

use crate::config::BACKEND_URL;
use crate::fields::{
    resolve, CHECK_IN_ALIASES, CONFIRMATION_ALIASES, GUEST_NAME_ALIASES, HOTEL_ALIASES,
};
use crate::services::{archive_filename, deliver, generate_vouchers, DeliveryOutcome};
use crate::state::{Phase, Session};

#[component]
pub fn PreviewSection(session: RwSignal<Session>) -> impl IntoView {
    let record_count = move || session.with(|s| s.records().len());
    let generating = move || session.with(|s| s.phase() == Phase::Generating);

    let on_generate = move |_| {
        let started = session.try_update(|s| s.begin_generate()).unwrap_or(false);
        if !started {
            return;
        }
        let records = session.with_untracked(|s| s.records().to_vec());
        spawn_local(async move {
            match generate_vouchers(&records, BACKEND_URL).await {
                Ok(archive) => {
                    let filename = archive_filename();
                    match deliver(&archive, &filename) {
                        DeliveryOutcome::Delivered => {
                            session.update(|s| s.finish_delivery(&filename));
                        }
                        DeliveryOutcome::DeliveredViaFallback => {
                            session.update(|s| s.finish_delivery_fallback());
                        }
                        DeliveryOutcome::Failed(reason) => {
                            log::error!("Archive delivery failed: {}", reason);
                            session.update(|s| s.fail_delivery());
                        }
                    }
                }
                Err(err) => {
                    log::error!("Voucher generation failed: {}", err);
                    session.update(|s| s.fail_generate(err.generate_message()));
                }
            }
        });
    };

    view! {
        <div class="preview-section">
            <h2>"Review Parsed Data"</h2>

            <div class="preview-summary">
                <strong>{record_count}</strong> " voucher records found"
            </div>

            <div class="preview-table-wrap">
                <table class="preview-table">
                    <thead>
                        <tr>
                            <th>"#"</th>
                            <th>"Confirmation Number"</th>
                            <th>"Guest Name"</th>
                            <th>"Hotel"</th>
                            <th>"Check-in"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || session.with(|s| s.records().to_vec())
                            key=|record| record.row_number
                            children=move |record| {
                                view! {
                                    <tr>
                                        <td>{record.row_number}</td>
                                        <td>{resolve(&record, CONFIRMATION_ALIASES)}</td>
                                        <td>{resolve(&record, GUEST_NAME_ALIASES)}</td>
                                        <td>{resolve(&record, HOTEL_ALIASES)}</td>
                                        <td>{resolve(&record, CHECK_IN_ALIASES)}</td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
            </div>

            <button
                class="btn btn-generate"
                disabled=move || session.with(|s| s.is_busy())
                on:click=on_generate
            >
                {move || {
                    if generating() {
                        "Generating PDFs...".to_string()
                    } else {
                        format!("Generate {} PDF Vouchers", record_count())
                    }
                }}
            </button>
        </div>
    }
}
