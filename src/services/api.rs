//! HTTP transfer channel to the voucher service.
//!
//! Two calls: submit a spreadsheet for parsing, and submit reviewed records
//! for bulk PDF generation. Failures are classified into [`ApiError`] so the
//! workflow can surface the right message for each shape instead of relying
//! on truthiness checks against an ambient response object.

use std::fmt;

use gloo_net::http::{Request, Response};
use serde::Deserialize;
use web_sys::{File, FormData};

use crate::types::VoucherRecord;

/// Success body of the upload-parse endpoint.
#[derive(Clone, Debug, Deserialize)]
pub struct ParseResponse {
    pub status: String,
    pub message: String,
    #[serde(default)]
    pub vouchers: Vec<VoucherRecord>,
    #[serde(default)]
    pub columns: Vec<String>,
}

/// Structured error body the service sends on failure.
#[derive(Clone, Debug, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// Classified outcome of a failed transfer.
#[derive(Clone, Debug, PartialEq)]
pub enum ApiError {
    /// The server answered with an error status and a decodable message.
    Server { status: u16, detail: String },
    /// The server answered with an error status and nothing decodable.
    Status { status: u16, status_text: String },
    /// The request never reached the server (connectivity, timeout).
    Network(String),
    /// The request could not be constructed locally.
    Request(String),
    /// The server reported success but the body did not decode.
    Decode(String),
    /// The server reported success with a zero-byte archive.
    EmptyPayload,
}

impl ApiError {
    /// Message surfaced for a failed parse call: the structured detail when
    /// the server provided one, otherwise a generic fallback.
    pub fn parse_message(&self) -> String {
        match self {
            ApiError::Server { detail, .. } => detail.clone(),
            _ => "Failed to process file".to_string(),
        }
    }

    /// Message surfaced for a failed generate call, keeping the three
    /// failure shapes distinct: decodable server text, bare error status,
    /// and no response at all.
    pub fn generate_message(&self) -> String {
        match self {
            ApiError::Server { detail, .. } => detail.clone(),
            ApiError::Status { status_text, .. } if !status_text.is_empty() => status_text.clone(),
            ApiError::Network(_) => {
                "No response from server. Please check your connection.".to_string()
            }
            ApiError::EmptyPayload => "Received empty response from server".to_string(),
            _ => "Failed to generate vouchers".to_string(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Server { status, detail } => write!(f, "server error ({}): {}", status, detail),
            ApiError::Status {
                status,
                status_text,
            } => write!(f, "server error ({}): {}", status, status_text),
            ApiError::Network(msg) => write!(f, "request failed: {}", msg),
            ApiError::Request(msg) => write!(f, "failed to build request: {}", msg),
            ApiError::Decode(msg) => write!(f, "invalid response: {}", msg),
            ApiError::EmptyPayload => write!(f, "empty response body"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Submit the spreadsheet for parsing.
///
/// Encodes the file as a multipart body under the `file` field. An empty
/// record sequence in the response is a valid result, not an error.
pub async fn upload_excel(file: File, backend_url: &str) -> Result<Vec<VoucherRecord>, ApiError> {
    let form_data = FormData::new().map_err(|e| ApiError::Request(format!("{e:?}")))?;
    form_data
        .append_with_blob("file", &file)
        .map_err(|e| ApiError::Request(format!("{e:?}")))?;

    let url = format!("{}/api/upload-excel", backend_url);
    let response = Request::post(&url)
        .body(form_data)
        .map_err(|e| ApiError::Request(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !response.ok() {
        return Err(classify_response(response).await);
    }

    let parsed: ParseResponse = response
        .json()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))?;

    log::info!("Parsed {} voucher records", parsed.vouchers.len());
    Ok(parsed.vouchers)
}

/// Submit the reviewed records for bulk generation.
///
/// Requests a binary archive response explicitly and returns the exact
/// bytes the server produced. A success status with zero bytes does not
/// confirm a usable payload and is treated as a failure.
pub async fn generate_vouchers(
    records: &[VoucherRecord],
    backend_url: &str,
) -> Result<Vec<u8>, ApiError> {
    let url = format!("{}/api/generate-vouchers", backend_url);
    let response = Request::post(&url)
        .header("Accept", "application/zip")
        .json(records)
        .map_err(|e| ApiError::Request(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !response.ok() {
        return Err(classify_response(response).await);
    }

    let archive = response
        .binary()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))?;

    if archive.is_empty() {
        return Err(ApiError::EmptyPayload);
    }

    log::info!("Received archive of {} bytes", archive.len());
    Ok(archive)
}

/// Classify an error response. The body is read as bytes because the
/// generate call declares a binary accept type, so even a textual error
/// arrives as a binary body that must be decoded before it is usable.
async fn classify_response(response: Response) -> ApiError {
    let status = response.status();
    let status_text = response.status_text();
    let body = response.binary().await.ok();
    classify_failure(status, status_text, body)
}

fn classify_failure(status: u16, status_text: String, body: Option<Vec<u8>>) -> ApiError {
    let text = body
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty());

    match text {
        Some(text) => {
            // Prefer the structured detail; fall back to the raw text body.
            let detail = serde_json::from_str::<ErrorBody>(&text)
                .map(|body| body.detail)
                .unwrap_or(text);
            ApiError::Server { status, detail }
        }
        None => ApiError::Status {
            status,
            status_text,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_response_deserialization() {
        let json = r#"{
            "status": "success",
            "message": "Successfully parsed 1 voucher records",
            "vouchers": [
                {
                    "row_number": 1,
                    "data": {
                        "confirmation_number": "ABC1",
                        "guest_name": "Jane Doe",
                        "hotel_name": "Lagoon Inn",
                        "check_in_date": "2024-05-01"
                    }
                }
            ],
            "columns": ["Confirmation Number", "Guest Name"]
        }"#;

        let response: ParseResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.status, "success");
        assert_eq!(response.vouchers.len(), 1);
        assert_eq!(response.vouchers[0].row_number, 1);
        assert_eq!(response.columns.len(), 2);
    }

    #[test]
    fn test_empty_voucher_list_is_valid() {
        let json = r#"{"status": "success", "message": "ok", "vouchers": []}"#;
        let response: ParseResponse = serde_json::from_str(json).unwrap();
        assert!(response.vouchers.is_empty());
    }

    #[test]
    fn test_classify_structured_detail() {
        let body = br#"{"detail": "invalid row 3"}"#.to_vec();
        let error = classify_failure(500, "Internal Server Error".into(), Some(body));
        assert_eq!(
            error,
            ApiError::Server {
                status: 500,
                detail: "invalid row 3".into()
            }
        );
        assert_eq!(error.generate_message(), "invalid row 3");
    }

    #[test]
    fn test_classify_plain_text_body() {
        let error = classify_failure(502, "Bad Gateway".into(), Some(b"upstream exploded".to_vec()));
        assert_eq!(error.generate_message(), "upstream exploded");
    }

    #[test]
    fn test_classify_undecodable_body() {
        let error = classify_failure(500, "Internal Server Error".into(), Some(vec![0xff, 0xfe]));
        assert_eq!(
            error,
            ApiError::Status {
                status: 500,
                status_text: "Internal Server Error".into()
            }
        );
        assert_eq!(error.generate_message(), "Internal Server Error");
    }

    #[test]
    fn test_classify_empty_body_falls_back_to_status_text() {
        let error = classify_failure(503, "Service Unavailable".into(), Some(Vec::new()));
        assert!(matches!(error, ApiError::Status { .. }));

        let blank = classify_failure(503, String::new(), None);
        assert_eq!(blank.generate_message(), "Failed to generate vouchers");
    }

    #[test]
    fn test_parse_message_uses_detail_or_generic() {
        let decodable = ApiError::Server {
            status: 400,
            detail: "File must be an Excel file (.xlsx or .xls)".into(),
        };
        assert_eq!(
            decodable.parse_message(),
            "File must be an Excel file (.xlsx or .xls)"
        );

        let network = ApiError::Network("connection refused".into());
        assert_eq!(network.parse_message(), "Failed to process file");
    }

    #[test]
    fn test_generate_message_distinguishes_failure_shapes() {
        let network = ApiError::Network("timed out".into());
        assert_eq!(
            network.generate_message(),
            "No response from server. Please check your connection."
        );
        assert_eq!(
            ApiError::EmptyPayload.generate_message(),
            "Received empty response from server"
        );
    }
}
