//! Application configuration.
//!
//! Centralized configuration for the voucher generator frontend.
//! In development these are hardcoded. In production they could be
//! loaded from environment or a config file.

/// Backend API base URL.
///
/// The voucher service handling Excel parsing and PDF generation.
pub const BACKEND_URL: &str = "http://localhost:8000";

/// Application name, used for the document title.
pub const APP_NAME: &str = "Hotel Voucher Generator";

/// Maximum file size for upload (in bytes).
///
/// 50 MB limit.
pub const MAX_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;

/// Spreadsheet extensions the workflow accepts, compared case-insensitively.
pub const EXCEL_EXTENSIONS: &[&str] = &[".xlsx", ".xls"];

/// Grace delay before revoking a delivered archive's object URL.
///
/// Revoking too early can abort an in-flight save on some browsers.
pub const OBJECT_URL_REVOKE_DELAY_MS: u32 = 1_000;
