//! Common types used across the frontend application.
//!
//! This module centralizes type definitions to avoid duplication
//! and ensure consistency across components.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::{EXCEL_EXTENSIONS, MAX_UPLOAD_BYTES};

// =============================================================================
// Voucher Records
// =============================================================================

/// One parsed booking row from the uploaded spreadsheet.
///
/// `row_number` is 1-based and follows source-sheet order. `data` maps column
/// names to scalar values; the upstream parser tolerates varied spreadsheet
/// headers, so keys are not uniform across records (see [`crate::fields`]).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VoucherRecord {
    /// 1-based source row index, unique within a session.
    pub row_number: u32,
    /// Column name to value mapping; any key may be absent.
    #[serde(default)]
    pub data: serde_json::Map<String, Value>,
}

// =============================================================================
// File Selection
// =============================================================================

/// Metadata for the user-chosen spreadsheet file.
///
/// Replaced wholesale on any new selection. The live `web_sys::File` handle
/// is held separately by the upload component; the session state only needs
/// what it can validate and display.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectedFile {
    pub name: String,
    pub size: u64,
    pub mime: String,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, size: u64, mime: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            mime: mime.into(),
        }
    }

    /// Whether the filename carries an accepted spreadsheet extension.
    pub fn has_excel_extension(&self) -> bool {
        let lower = self.name.to_ascii_lowercase();
        EXCEL_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
    }

    /// Whether the file fits within the upload size limit.
    pub fn within_size_limit(&self) -> bool {
        self.size <= MAX_UPLOAD_BYTES
    }

    /// File size in megabytes, for display.
    pub fn size_mb(&self) -> f64 {
        self.size as f64 / (1024.0 * 1024.0)
    }
}

// =============================================================================
// Status Messages
// =============================================================================

/// Severity of the visible status line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusTone {
    Info,
    Success,
    Warning,
    Error,
}

impl StatusTone {
    /// Get CSS class for styling.
    pub fn css_class(&self) -> &'static str {
        match self {
            StatusTone::Info => "status-info",
            StatusTone::Success => "status-success",
            StatusTone::Warning => "status-warning",
            StatusTone::Error => "status-error",
        }
    }
}

/// The single human-readable status message shown to the user.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusLine {
    pub tone: StatusTone,
    pub message: String,
}

impl StatusLine {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            tone: StatusTone::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            tone: StatusTone::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            tone: StatusTone::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            tone: StatusTone::Error,
            message: message.into(),
        }
    }
}
