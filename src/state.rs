//! Session state machine for the upload-review-generate-deliver workflow.
//!
//! A single [`Session`] instance is the source of truth for the active
//! workflow. Fields are private; every change goes through a transition
//! method, so components can never leave the state machine in a shape the
//! workflow does not define.
//!
//! ```text
//! Idle -> FileSelected -> Parsing -> Reviewing -> Generating -> Delivered
//! ```
//!
//! Failures return to the last stable phase (`FileSelected` for parse
//! failures, `Reviewing` for generation and delivery failures) so the user
//! never loses a valid selection or parsed set to a downstream error.

use crate::types::{SelectedFile, StatusLine, VoucherRecord};

/// Current position in the workflow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    FileSelected,
    Parsing,
    Reviewing,
    Generating,
    Delivered,
}

/// The per-session workflow state.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    file: Option<SelectedFile>,
    records: Vec<VoucherRecord>,
    phase: Phase,
    status: Option<StatusLine>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            file: None,
            records: Vec::new(),
            phase: Phase::Idle,
            status: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    pub fn records(&self) -> &[VoucherRecord] {
        &self.records
    }

    pub fn status(&self) -> Option<&StatusLine> {
        self.status.as_ref()
    }

    /// True while a network operation is in flight. Both triggering controls
    /// are disabled while busy; only one operation is permitted at a time.
    pub fn is_busy(&self) -> bool {
        matches!(self.phase, Phase::Parsing | Phase::Generating)
    }

    /// True once a parsed record set exists to review, including an empty
    /// one. The review table renders empty rather than hidden.
    pub fn in_review(&self) -> bool {
        matches!(
            self.phase,
            Phase::Reviewing | Phase::Generating | Phase::Delivered
        )
    }

    /// Take a new file selection. Returns `true` when the selection was
    /// accepted; the caller should then retain the live file handle.
    ///
    /// Rejections (wrong extension, oversized file, operation in flight)
    /// leave the existing selection and records untouched.
    pub fn select_file(&mut self, file: SelectedFile) -> bool {
        if self.is_busy() {
            return false;
        }
        if !file.has_excel_extension() {
            self.status = Some(StatusLine::error(
                "Please select an Excel file (.xlsx or .xls)",
            ));
            return false;
        }
        if !file.within_size_limit() {
            self.status = Some(StatusLine::error(format!(
                "File is too large ({:.2} MB). Maximum size is {} MB.",
                file.size_mb(),
                crate::config::MAX_UPLOAD_BYTES / (1024 * 1024)
            )));
            return false;
        }
        self.file = Some(file);
        self.records.clear();
        self.phase = Phase::FileSelected;
        self.status = None;
        true
    }

    /// Enter `Parsing`. Returns `false` without touching state when busy,
    /// and with only a status change when no file is selected. A `false`
    /// return means the caller must not issue a network call.
    pub fn begin_parse(&mut self) -> bool {
        if self.is_busy() {
            return false;
        }
        if self.file.is_none() {
            self.status = Some(StatusLine::error("Please select a file first"));
            return false;
        }
        self.phase = Phase::Parsing;
        self.status = Some(StatusLine::info("Parsing Excel file..."));
        true
    }

    /// Resolve a parse call successfully. Zero records is still `Reviewing`.
    pub fn finish_parse(&mut self, records: Vec<VoucherRecord>) {
        if self.phase != Phase::Parsing {
            return;
        }
        self.status = Some(StatusLine::success(format!(
            "Successfully parsed {} voucher records",
            records.len()
        )));
        self.records = records;
        self.phase = Phase::Reviewing;
    }

    /// Resolve a parse call with a failure; the selection survives.
    pub fn fail_parse(&mut self, message: impl AsRef<str>) {
        if self.phase != Phase::Parsing {
            return;
        }
        self.phase = Phase::FileSelected;
        self.status = Some(StatusLine::error(format!("Error: {}", message.as_ref())));
    }

    /// Enter `Generating`. Rejects an empty record set with a status message
    /// and no state change; a `false` return means no network call is made.
    pub fn begin_generate(&mut self) -> bool {
        if self.is_busy() {
            return false;
        }
        if self.records.is_empty() {
            self.status = Some(StatusLine::error(
                "No voucher data available. Please upload an Excel file first.",
            ));
            return false;
        }
        self.phase = Phase::Generating;
        self.status = Some(StatusLine::info("Generating PDF vouchers..."));
        true
    }

    /// Resolve a generate call with a failure; the parsed set survives.
    pub fn fail_generate(&mut self, message: impl AsRef<str>) {
        if self.phase != Phase::Generating {
            return;
        }
        self.phase = Phase::Reviewing;
        self.status = Some(StatusLine::error(format!("Error: {}", message.as_ref())));
    }

    /// The archive was handed to the browser's save machinery.
    pub fn finish_delivery(&mut self, filename: &str) {
        if self.phase != Phase::Generating {
            return;
        }
        self.phase = Phase::Delivered;
        self.status = Some(StatusLine::success(format!(
            "Successfully generated and downloaded {} vouchers as {}",
            self.records.len(),
            filename
        )));
    }

    /// The archive was delivered through a fallback mechanism; where it
    /// landed depends on the browser.
    pub fn finish_delivery_fallback(&mut self) {
        if self.phase != Phase::Generating {
            return;
        }
        self.phase = Phase::Delivered;
        self.status = Some(StatusLine::success(format!(
            "Successfully generated {} vouchers. Check your downloads folder.",
            self.records.len()
        )));
    }

    /// Generation succeeded but no save mechanism worked. The parsed set
    /// survives; the user retries delivery, not generation.
    pub fn fail_delivery(&mut self) {
        if self.phase != Phase::Generating {
            return;
        }
        self.phase = Phase::Reviewing;
        self.status = Some(StatusLine::warning(
            "Vouchers generated successfully, but automatic download failed. \
             Please try again or contact support.",
        ));
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StatusTone;

    fn xlsx(name: &str) -> SelectedFile {
        SelectedFile::new(name, 1024, "application/vnd.ms-excel")
    }

    fn record(row: u32) -> VoucherRecord {
        VoucherRecord {
            row_number: row,
            data: serde_json::Map::new(),
        }
    }

    #[test]
    fn test_select_valid_file() {
        let mut session = Session::new();
        assert!(session.select_file(xlsx("bookings.xlsx")));
        assert_eq!(session.phase(), Phase::FileSelected);
        assert!(session.status().is_none());
    }

    #[test]
    fn test_select_rejects_wrong_extension() {
        let mut session = Session::new();
        assert!(!session.select_file(xlsx("bookings.pdf")));
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.file().is_none());
        let status = session.status().unwrap();
        assert_eq!(status.tone, StatusTone::Error);
        assert!(status.message.contains(".xlsx or .xls"));
    }

    #[test]
    fn test_select_rejects_oversized_file() {
        let mut session = Session::new();
        let file = SelectedFile::new("big.xlsx", crate::config::MAX_UPLOAD_BYTES + 1, "");
        assert!(!session.select_file(file));
        assert!(session.file().is_none());
        assert!(session.status().unwrap().message.contains("too large"));
    }

    #[test]
    fn test_reselect_replaces_records() {
        let mut session = Session::new();
        session.select_file(xlsx("first.xlsx"));
        session.begin_parse();
        session.finish_parse(vec![record(1), record(2)]);

        assert!(session.select_file(xlsx("second.xls")));
        assert!(session.records().is_empty());
        assert_eq!(session.file().unwrap().name, "second.xls");
        assert_eq!(session.phase(), Phase::FileSelected);
    }

    #[test]
    fn test_parse_requires_file() {
        let mut session = Session::new();
        assert!(!session.begin_parse());
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session
            .status()
            .unwrap()
            .message
            .contains("select a file first"));
    }

    #[test]
    fn test_parse_roundtrip() {
        let mut session = Session::new();
        session.select_file(xlsx("bookings.xlsx"));
        assert!(session.begin_parse());
        assert!(session.is_busy());

        session.finish_parse(vec![record(1)]);
        assert_eq!(session.phase(), Phase::Reviewing);
        assert_eq!(session.records().len(), 1);
        assert_eq!(
            session.status().unwrap().message,
            "Successfully parsed 1 voucher records"
        );
    }

    #[test]
    fn test_zero_record_parse_is_reviewing() {
        let mut session = Session::new();
        session.select_file(xlsx("empty.xlsx"));
        session.begin_parse();
        session.finish_parse(Vec::new());

        assert_eq!(session.phase(), Phase::Reviewing);
        assert!(session.in_review());
        assert_eq!(session.status().unwrap().tone, StatusTone::Success);
    }

    #[test]
    fn test_parse_failure_keeps_selection() {
        let mut session = Session::new();
        session.select_file(xlsx("bookings.xlsx"));
        session.begin_parse();
        session.fail_parse("Failed to process file");

        assert_eq!(session.phase(), Phase::FileSelected);
        assert!(session.file().is_some());
        assert_eq!(
            session.status().unwrap().message,
            "Error: Failed to process file"
        );
    }

    #[test]
    fn test_retrigger_while_busy_is_noop() {
        let mut session = Session::new();
        session.select_file(xlsx("bookings.xlsx"));
        assert!(session.begin_parse());

        let snapshot = session.clone();
        assert!(!session.begin_parse());
        assert!(!session.begin_generate());
        assert!(!session.select_file(xlsx("other.xlsx")));
        assert_eq!(session, snapshot);
    }

    #[test]
    fn test_generate_rejects_empty_records() {
        let mut session = Session::new();
        session.select_file(xlsx("empty.xlsx"));
        session.begin_parse();
        session.finish_parse(Vec::new());

        assert!(!session.begin_generate());
        assert_eq!(session.phase(), Phase::Reviewing);
        assert!(session
            .status()
            .unwrap()
            .message
            .contains("No voucher data available"));
    }

    #[test]
    fn test_generate_failure_returns_to_reviewing() {
        let mut session = Session::new();
        session.select_file(xlsx("bookings.xlsx"));
        session.begin_parse();
        session.finish_parse(vec![record(1), record(2)]);

        assert!(session.begin_generate());
        session.fail_generate("invalid row 3");

        assert_eq!(session.phase(), Phase::Reviewing);
        assert_eq!(session.records().len(), 2);
        assert_eq!(session.status().unwrap().message, "Error: invalid row 3");
    }

    #[test]
    fn test_delivery_outcomes() {
        let mut session = Session::new();
        session.select_file(xlsx("bookings.xlsx"));
        session.begin_parse();
        session.finish_parse(vec![record(1)]);

        session.begin_generate();
        session.finish_delivery("hotel_vouchers_2024-05-01T10-00-00.zip");
        assert_eq!(session.phase(), Phase::Delivered);
        assert!(session
            .status()
            .unwrap()
            .message
            .contains("hotel_vouchers_2024-05-01T10-00-00.zip"));

        session.begin_generate();
        session.finish_delivery_fallback();
        assert_eq!(session.phase(), Phase::Delivered);
        assert!(session
            .status()
            .unwrap()
            .message
            .contains("Check your downloads folder"));
    }

    #[test]
    fn test_delivery_failure_keeps_reviewing() {
        let mut session = Session::new();
        session.select_file(xlsx("bookings.xlsx"));
        session.begin_parse();
        session.finish_parse(vec![record(1)]);
        session.begin_generate();
        session.fail_delivery();

        assert_eq!(session.phase(), Phase::Reviewing);
        assert_eq!(session.records().len(), 1);
        let status = session.status().unwrap();
        assert_eq!(status.tone, StatusTone::Warning);
        assert!(status.message.contains("automatic download failed"));
    }
}
