//! Report filtering
//!
//! Projections a consumer applies over a finished report. All criteria are
//! optional and combine with AND.

use crate::report::{MismatchLabel, ReconciledRecord, ReconciliationReport, ReconciliationStatus};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFilter {
    /// Keep only records with this status
    pub status: Option<ReconciliationStatus>,
    /// Keep only records whose discrepancy list contains this label
    pub mismatch_type: Option<MismatchLabel>,
    /// Keep only records whose claim id contains this text, ignoring case
    pub claim_id_contains: Option<String>,
}

impl ReportFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: ReconciliationStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn mismatch_type(mut self, label: MismatchLabel) -> Self {
        self.mismatch_type = Some(label);
        self
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.claim_id_contains = Some(text.into());
        self
    }

    pub fn matches(&self, record: &ReconciledRecord) -> bool {
        if let Some(status) = self.status {
            if record.status != status {
                return false;
            }
        }
        if let Some(label) = self.mismatch_type {
            if !record.has_label(label) {
                return false;
            }
        }
        match self.claim_id_contains.as_deref() {
            None | Some("") => true,
            Some(needle) => record
                .claim_id
                .as_str()
                .to_lowercase()
                .contains(&needle.to_lowercase()),
        }
    }

    /// Records of the report that pass the filter, in report order
    pub fn apply<'r>(&self, report: &'r ReconciliationReport) -> Vec<&'r ReconciledRecord> {
        report.iter().filter(|record| self.matches(record)).collect()
    }
}
