//! Archive delivery: hand a generated ZIP to the user as a saved file.
//!
//! Browsers disagree on how a page may trigger a save, so delivery walks an
//! ordered table of mechanisms until one succeeds. Adding a mechanism means
//! adding a table entry, not another branch.

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

use crate::config::OBJECT_URL_REVOKE_DELAY_MS;

/// Result of attempting to hand a binary artifact to the user.
#[derive(Clone, Debug, PartialEq)]
pub enum DeliveryOutcome {
    /// The primary anchor-download path accepted the archive.
    Delivered,
    /// A fallback mechanism accepted it; where the file lands depends on
    /// the browser.
    DeliveredViaFallback,
    /// Every mechanism failed. The archive itself was generated fine.
    Failed(String),
}

struct DeliveryMechanism {
    name: &'static str,
    available: fn() -> bool,
    attempt: fn(&Blob, &str) -> Result<(), JsValue>,
}

const MECHANISMS: &[DeliveryMechanism] = &[
    DeliveryMechanism {
        name: "anchor download",
        available: always_available,
        attempt: anchor_download,
    },
    DeliveryMechanism {
        name: "legacy save dialog",
        available: has_legacy_save,
        attempt: legacy_save,
    },
    DeliveryMechanism {
        name: "new browsing context",
        available: always_available,
        attempt: open_in_new_context,
    },
];

/// Try each available mechanism in order until one accepts the payload.
pub fn deliver(payload: &[u8], filename: &str) -> DeliveryOutcome {
    let blob = match zip_blob(payload) {
        Ok(blob) => blob,
        Err(err) => return DeliveryOutcome::Failed(format!("could not build blob: {err:?}")),
    };

    for (index, mechanism) in MECHANISMS.iter().enumerate() {
        if !(mechanism.available)() {
            continue;
        }
        match (mechanism.attempt)(&blob, filename) {
            Ok(()) if index == 0 => {
                log::info!("Archive delivered as {}", filename);
                return DeliveryOutcome::Delivered;
            }
            Ok(()) => {
                log::info!("Archive delivered via {}", mechanism.name);
                return DeliveryOutcome::DeliveredViaFallback;
            }
            Err(err) => log::warn!("{} failed: {:?}", mechanism.name, err),
        }
    }

    DeliveryOutcome::Failed("every save mechanism failed".to_string())
}

/// Timestamped archive name, fresh per delivery attempt.
pub fn archive_filename() -> String {
    format!(
        "hotel_vouchers_{}.zip",
        chrono::Local::now().format("%Y-%m-%dT%H-%M-%S")
    )
}

fn always_available() -> bool {
    true
}

fn zip_blob(payload: &[u8]) -> Result<Blob, JsValue> {
    let chunk = js_sys::Uint8Array::from(payload);
    let parts = js_sys::Array::new();
    parts.push(&chunk);

    let options = BlobPropertyBag::new();
    options.set_type("application/zip");
    Blob::new_with_buffer_source_sequence_and_options(&parts, &options)
}

/// Primary path: a hidden anchor with the `download` attribute, activated
/// programmatically.
fn anchor_download(blob: &Blob, filename: &str) -> Result<(), JsValue> {
    let url = Url::create_object_url_with_blob(blob)?;
    let document = gloo_utils::document();

    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_attribute("style", "display: none")?;
    anchor.set_href(&url);
    anchor.set_download(filename);

    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?;
    body.append_child(&anchor)?;
    anchor.click();
    body.remove_child(&anchor)?;

    revoke_object_url_later(url);
    Ok(())
}

/// IE/legacy Edge expose a save dialog directly on the navigator object.
fn has_legacy_save() -> bool {
    let navigator = gloo_utils::window().navigator();
    js_sys::Reflect::has(&navigator, &JsValue::from_str("msSaveOrOpenBlob")).unwrap_or(false)
}

fn legacy_save(blob: &Blob, filename: &str) -> Result<(), JsValue> {
    let navigator = gloo_utils::window().navigator();
    let save = js_sys::Reflect::get(&navigator, &JsValue::from_str("msSaveOrOpenBlob"))?
        .dyn_into::<js_sys::Function>()?;
    save.call2(&navigator, blob, &JsValue::from_str(filename))?;
    Ok(())
}

/// Last resort: open the object URL in a new browsing context and let the
/// browser decide how to handle the archive.
fn open_in_new_context(blob: &Blob, _filename: &str) -> Result<(), JsValue> {
    let url = Url::create_object_url_with_blob(blob)?;
    let opened = gloo_utils::window().open_with_url_and_target(&url, "_blank")?;
    if opened.is_none() {
        Url::revoke_object_url(&url)?;
        return Err(JsValue::from_str("window.open returned null"));
    }
    revoke_object_url_later(url);
    Ok(())
}

/// Release the object URL after a grace delay. Revoking immediately can
/// abort an in-flight save.
fn revoke_object_url_later(url: String) {
    spawn_local(async move {
        gloo_timers::future::TimeoutFuture::new(OBJECT_URL_REVOKE_DELAY_MS).await;
        if Url::revoke_object_url(&url).is_err() {
            log::warn!("failed to revoke object URL");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_archive_filename_shape() {
        let filename = archive_filename();
        assert!(filename.starts_with("hotel_vouchers_"));
        assert!(filename.ends_with(".zip"));
        // hotel_vouchers_YYYY-MM-DDTHH-MM-SS.zip
        assert_eq!(filename.len(), "hotel_vouchers_".len() + 19 + ".zip".len());
    }

    #[test]
    fn test_filenames_carry_no_colons() {
        // Colons are invalid in filenames on several platforms.
        assert!(!archive_filename().contains(':'));
    }
}
