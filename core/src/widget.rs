//! State machine behind the scan button and printer dropdown.
//!
//! The widget never touches a UI toolkit. The caller owns the form fields
//! and hands them in explicitly, starts a scan to get a token, and feeds
//! the eventual result back with that token. Results from a superseded
//! scan are discarded.

use tracing::{debug, info};

use crate::model::PrinterRecord;
use crate::targets;

pub const SCAN_BUTTON_LABEL: &str = "Scan Network for Printers";
pub const SCAN_BUTTON_BUSY_LABEL: &str = "Scanning...";
pub const SCAN_PLACEHOLDER_LABEL: &str = "-- Select a printer --";

/// Identifies one scan run. Stale tokens are rejected by `finish_scan`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanToken(u64);

/// The two registration fields the widget is allowed to write.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrinterForm {
    pub ip_address: String,
    pub name: String,
}

/// What `finish_scan` did with a delivered result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome<E> {
    /// Current-token success; the dropdown now holds this many records.
    Updated(usize),
    /// Current-token failure; the caller decides how to surface it.
    Failed(E),
    /// The token was superseded; nothing changed.
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Idle,
    Scanning,
}

#[derive(Debug)]
pub struct ScanWidget {
    state: ScanState,
    run_id: u64,
    /// `None` until the first successful scan; the dropdown stays hidden.
    records: Option<Vec<PrinterRecord>>,
}

impl Default for ScanWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanWidget {
    pub fn new() -> Self {
        Self {
            state: ScanState::Idle,
            run_id: 0,
            records: None,
        }
    }

    pub fn is_scanning(&self) -> bool {
        self.state == ScanState::Scanning
    }

    pub fn button_label(&self) -> &'static str {
        match self.state {
            ScanState::Idle => SCAN_BUTTON_LABEL,
            ScanState::Scanning => SCAN_BUTTON_BUSY_LABEL,
        }
    }

    /// Dropdown contents, `None` while the dropdown is hidden.
    pub fn records(&self) -> Option<&[PrinterRecord]> {
        self.records.as_deref()
    }

    /// Start a scan. Returns `None` while one is already in flight; a new
    /// token otherwise. Issuing a new token invalidates any outstanding one.
    pub fn begin_scan(&mut self) -> Option<ScanToken> {
        if self.is_scanning() {
            return None;
        }

        self.run_id = self.run_id.wrapping_add(1);
        self.state = ScanState::Scanning;
        debug!(target: targets::SCAN, run = self.run_id, "Scan started");
        Some(ScanToken(self.run_id))
    }

    /// Feed a scan outcome back. A current-token result returns the widget
    /// to idle; only a successful one replaces the dropdown contents. A
    /// stale token changes nothing.
    pub fn finish_scan<E>(
        &mut self,
        token: ScanToken,
        result: Result<Vec<PrinterRecord>, E>,
    ) -> ScanOutcome<E> {
        if token.0 != self.run_id {
            debug!(
                target: targets::SCAN,
                run = token.0,
                current = self.run_id,
                "Stale scan result dropped"
            );
            return ScanOutcome::Stale;
        }

        self.state = ScanState::Idle;
        match result {
            Ok(records) => {
                info!(
                    target: targets::SCAN,
                    count = records.len(),
                    "Scan finished"
                );
                let count = records.len();
                self.records = Some(records);
                ScanOutcome::Updated(count)
            }
            Err(error) => ScanOutcome::Failed(error),
        }
    }

    /// Fill policy for a dropdown selection: the IP field is always
    /// overwritten; the name field only when the record carries a name and
    /// the operator has not typed one (empty or whitespace-only).
    pub fn apply_selection(&self, record: &PrinterRecord, form: &mut PrinterForm) {
        form.ip_address = record.ip.clone();
        if !record.name.is_empty() && form.name.trim().is_empty() {
            form.name = record.name.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::Error;

    fn scan_error() -> Error {
        Error::ScanFailure {
            url: "test".to_string(),
            details: "boom".to_string(),
        }
    }

    #[test]
    fn repeated_scans_always_return_to_idle() {
        let mut widget = ScanWidget::new();

        for round in 0..4 {
            let token = widget.begin_scan().expect("token");
            assert!(widget.is_scanning());
            assert_eq!(widget.button_label(), SCAN_BUTTON_BUSY_LABEL);

            let result = if round % 2 == 0 {
                Ok(vec![PrinterRecord::new("10.0.0.5", "Lobby Printer")])
            } else {
                Err(scan_error())
            };
            widget.finish_scan(token, result);

            assert!(!widget.is_scanning());
            assert_eq!(widget.button_label(), SCAN_BUTTON_LABEL);
        }
    }

    #[test]
    fn scan_guard_blocks_second_trigger() {
        let mut widget = ScanWidget::new();
        let token = widget.begin_scan().expect("token");
        assert!(widget.begin_scan().is_none());

        widget.finish_scan::<Error>(token, Ok(Vec::new()));
        assert!(widget.begin_scan().is_some());
    }

    #[test]
    fn dropdown_hidden_until_first_success() {
        let mut widget = ScanWidget::new();
        assert!(widget.records().is_none());

        let token = widget.begin_scan().expect("token");
        widget.finish_scan(token, Err(scan_error()));
        assert!(widget.records().is_none());

        let token = widget.begin_scan().expect("token");
        let outcome = widget.finish_scan::<Error>(token, Ok(Vec::new()));
        assert!(matches!(outcome, ScanOutcome::Updated(0)));
        assert_eq!(widget.records(), Some(&[][..]));
    }

    #[test]
    fn failure_reports_error_and_keeps_prior_records() {
        let mut widget = ScanWidget::new();
        let token = widget.begin_scan().expect("token");
        widget.finish_scan::<Error>(
            token,
            Ok(vec![PrinterRecord::new("10.0.0.5", "Lobby Printer")]),
        );

        let token = widget.begin_scan().expect("token");
        let outcome = widget.finish_scan(token, Err(scan_error()));
        assert!(matches!(outcome, ScanOutcome::Failed(_)));
        assert_eq!(widget.records().map(|records| records.len()), Some(1));
        assert!(!widget.is_scanning());
    }

    #[test]
    fn stale_token_result_is_dropped() {
        let mut widget = ScanWidget::new();
        let stale = widget.begin_scan().expect("token");

        // A programmatic re-trigger supersedes the first run.
        widget.state = ScanState::Idle;
        let current = widget.begin_scan().expect("token");

        let outcome = widget.finish_scan::<Error>(
            stale,
            Ok(vec![PrinterRecord::new("10.0.0.9", "Old Result")]),
        );
        assert!(matches!(outcome, ScanOutcome::Stale));
        assert!(widget.records().is_none());
        assert!(widget.is_scanning());

        widget.finish_scan::<Error>(
            current,
            Ok(vec![PrinterRecord::new("10.0.0.5", "Lobby Printer")]),
        );
        assert_eq!(widget.records().map(|records| records.len()), Some(1));
        assert_eq!(widget.records().unwrap()[0].name, "Lobby Printer");
    }

    #[test]
    fn selection_always_overwrites_ip() {
        let widget = ScanWidget::new();
        let record = PrinterRecord::new("10.0.0.5", "Lobby Printer");
        let mut form = PrinterForm {
            ip_address: "192.168.1.1".to_string(),
            name: "Custom".to_string(),
        };

        widget.apply_selection(&record, &mut form);
        assert_eq!(form.ip_address, "10.0.0.5");
        assert_eq!(form.name, "Custom");
    }

    #[test]
    fn selection_fills_empty_or_whitespace_name() {
        let widget = ScanWidget::new();
        let record = PrinterRecord::new("10.0.0.5", "Lobby Printer");

        let mut form = PrinterForm::default();
        widget.apply_selection(&record, &mut form);
        assert_eq!(form.name, "Lobby Printer");

        let mut form = PrinterForm {
            ip_address: String::new(),
            name: "   ".to_string(),
        };
        widget.apply_selection(&record, &mut form);
        assert_eq!(form.name, "Lobby Printer");
    }

    #[test]
    fn selection_with_unnamed_record_leaves_name_alone() {
        let widget = ScanWidget::new();
        let record = PrinterRecord::new("10.0.0.5", "");
        let mut form = PrinterForm::default();

        widget.apply_selection(&record, &mut form);
        assert_eq!(form.ip_address, "10.0.0.5");
        assert_eq!(form.name, "");
    }

    #[test]
    fn end_to_end_example() {
        let mut widget = ScanWidget::new();
        let token = widget.begin_scan().expect("token");
        let payload = r#"[{"ip":"10.0.0.5","name":"Lobby Printer"}]"#;
        let records = crate::scan::decode_records("test", payload).expect("decode");
        widget.finish_scan::<Error>(token, Ok(records));

        let records = widget.records().expect("dropdown visible");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].option_label(), "Lobby Printer (10.0.0.5)");
        let selected = records[0].clone();

        let mut form = PrinterForm::default();
        widget.apply_selection(&selected, &mut form);
        assert_eq!(form.ip_address, "10.0.0.5");
        assert_eq!(form.name, "Lobby Printer");
    }
}
