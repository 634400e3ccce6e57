//! Derived aggregates over a reconciliation report
//!
//! These are read-only projections recomputed from the report on demand; they
//! hold no state of their own.

use serde::Serialize;
use std::collections::BTreeMap;

use core_kernel::ReportId;
use crate::report::{
    DuplicateSummary, MismatchLabel, ReconciledRecord, ReconciliationReport, ReconciliationStatus,
};

/// Count of Matched vs Mismatched records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusTally {
    pub matched: usize,
    pub mismatched: usize,
}

impl StatusTally {
    pub fn from_records(records: &[ReconciledRecord]) -> Self {
        records.iter().fold(Self::default(), |mut tally, record| {
            match record.status {
                ReconciliationStatus::Matched => tally.matched += 1,
                ReconciliationStatus::Mismatched => tally.mismatched += 1,
            }
            tally
        })
    }

    pub fn total(&self) -> usize {
        self.matched + self.mismatched
    }

    pub fn count(&self, status: ReconciliationStatus) -> usize {
        match status {
            ReconciliationStatus::Matched => self.matched,
            ReconciliationStatus::Mismatched => self.mismatched,
        }
    }
}

/// Occurrences of each mismatch label across a report
///
/// A record with several labels contributes once to each of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MismatchHistogram(BTreeMap<MismatchLabel, usize>);

impl MismatchHistogram {
    pub fn from_records(records: &[ReconciledRecord]) -> Self {
        let mut counts = BTreeMap::new();
        for label in records.iter().flat_map(|r| r.mismatch_type.iter()) {
            *counts.entry(*label).or_insert(0) += 1;
        }
        Self(counts)
    }

    /// Occurrences of one label; zero if it never appeared
    pub fn count(&self, label: MismatchLabel) -> usize {
        self.0.get(&label).copied().unwrap_or(0)
    }

    /// Sum over all labels
    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Labels with their counts, in evaluation order
    pub fn iter(&self) -> impl Iterator<Item = (MismatchLabel, usize)> + '_ {
        self.0.iter().map(|(label, count)| (*label, *count))
    }
}

/// Distinct labels present in a report, sorted by display string
///
/// This is the list a consumer offers for filtering by mismatch type.
pub fn mismatch_types_present(records: &[ReconciledRecord]) -> Vec<MismatchLabel> {
    let mut labels: Vec<MismatchLabel> = MismatchHistogram::from_records(records)
        .iter()
        .map(|(label, _)| label)
        .collect();
    labels.sort_by_key(|label| label.label());
    labels
}

/// Everything a presentation layer needs besides the rows themselves
#[derive(Debug, Clone, Serialize)]
pub struct ReconciliationSummary {
    pub report_id: ReportId,
    pub total: usize,
    pub status_tally: StatusTally,
    pub mismatch_histogram: MismatchHistogram,
    pub mismatch_types: Vec<MismatchLabel>,
    pub duplicates: DuplicateSummary,
}

impl ReconciliationSummary {
    pub fn from_report(report: &ReconciliationReport) -> Self {
        Self {
            report_id: report.id,
            total: report.len(),
            status_tally: StatusTally::from_records(&report.records),
            mismatch_histogram: MismatchHistogram::from_records(&report.records),
            mismatch_types: mismatch_types_present(&report.records),
            duplicates: report.duplicates.clone(),
        }
    }
}

impl ReconciliationReport {
    pub fn status_tally(&self) -> StatusTally {
        StatusTally::from_records(&self.records)
    }

    pub fn mismatch_histogram(&self) -> MismatchHistogram {
        MismatchHistogram::from_records(&self.records)
    }

    pub fn summary(&self) -> ReconciliationSummary {
        ReconciliationSummary::from_report(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::SideFields;

    fn row(id: &str, labels: Vec<MismatchLabel>) -> ReconciledRecord {
        ReconciledRecord {
            claim_id: id.into(),
            report_a: SideFields::absent(),
            report_b: SideFields::absent(),
            status: if labels.is_empty() {
                ReconciliationStatus::Matched
            } else {
                ReconciliationStatus::Mismatched
            },
            mismatch_type: labels,
        }
    }

    #[test]
    fn test_tally_counts() {
        let rows = vec![
            row("C1", vec![]),
            row("C2", vec![MismatchLabel::MissingInReportA]),
            row("C3", vec![]),
        ];
        let tally = StatusTally::from_records(&rows);
        assert_eq!(tally, StatusTally { matched: 2, mismatched: 1 });
        assert_eq!(tally.total(), 3);
    }

    #[test]
    fn test_histogram_counts_each_label() {
        let rows = vec![
            row("C1", vec![MismatchLabel::PolicyNumberMismatch, MismatchLabel::ClaimStatusMismatch]),
            row("C2", vec![MismatchLabel::ClaimStatusMismatch]),
            row("C3", vec![]),
        ];
        let histogram = MismatchHistogram::from_records(&rows);

        assert_eq!(histogram.count(MismatchLabel::ClaimStatusMismatch), 2);
        assert_eq!(histogram.count(MismatchLabel::PolicyNumberMismatch), 1);
        assert_eq!(histogram.count(MismatchLabel::ClaimAmountMismatch), 0);
        assert_eq!(histogram.total(), 3);
    }

    #[test]
    fn test_histogram_serializes_as_label_map() {
        let rows = vec![row("C1", vec![MismatchLabel::MissingInReportB])];
        let json = serde_json::to_value(MismatchHistogram::from_records(&rows)).unwrap();
        assert_eq!(json, serde_json::json!({ "Missing in Report B": 1 }));
    }

    #[test]
    fn test_types_present_sorted_by_label() {
        let rows = vec![
            row("C1", vec![MismatchLabel::MissingInReportA]),
            row("C2", vec![MismatchLabel::ClaimStatusMismatch, MismatchLabel::DateOfServiceMismatch]),
        ];
        assert_eq!(
            mismatch_types_present(&rows),
            vec![
                MismatchLabel::ClaimStatusMismatch,
                MismatchLabel::DateOfServiceMismatch,
                MismatchLabel::MissingInReportA,
            ]
        );
    }
}
