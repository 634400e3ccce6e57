//! The reconciler
//!
//! One pass over both reports:
//!
//! 1. Index each report by claim identifier. A later record with the same
//!    identifier replaces an earlier one; the replacement is counted.
//! 2. Walk the sorted union of identifiers.
//! 3. Label each identifier: missing on one side, or the list of compared
//!    fields that differ, always in the order policy number, date of service,
//!    claim amount, claim status.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::{debug, warn};

use crate::error::ReconciliationError;
use crate::record::{ClaimRecord, ReportSide};
use crate::report::{
    DuplicateClaim, DuplicateSummary, MismatchLabel, ReconciledRecord, ReconciliationReport,
    ReconciliationStatus, SideFields,
};

/// What to do when a report repeats a claim identifier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Keep the last occurrence and report the overwritten count
    #[default]
    LastWins,
    /// Fail the pass
    Reject,
}

/// Options for a reconciliation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileOptions {
    #[serde(default)]
    pub duplicate_policy: DuplicatePolicy,
}

/// Builds reconciliation reports from two claim reports
#[derive(Debug, Clone, Copy, Default)]
pub struct Reconciler {
    options: ReconcileOptions,
}

impl Reconciler {
    pub fn new(options: ReconcileOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> ReconcileOptions {
        self.options
    }

    /// Reconciles Report A against Report B
    ///
    /// With the default duplicate policy this never fails. Values are compared
    /// as given; a malformed value simply compares unequal.
    pub fn compute(
        &self,
        report_a: &[ClaimRecord],
        report_b: &[ClaimRecord],
    ) -> Result<ReconciliationReport, ReconciliationError> {
        let index_a = SourceIndex::build(report_a);
        let index_b = SourceIndex::build(report_b);

        let duplicates = DuplicateSummary {
            report_a: index_a.duplicates(),
            report_b: index_b.duplicates(),
        };

        for side in [ReportSide::A, ReportSide::B] {
            let dups = duplicates.for_side(side);
            if dups.is_empty() {
                continue;
            }
            match self.options.duplicate_policy {
                DuplicatePolicy::Reject => {
                    return Err(ReconciliationError::DuplicateClaimIds {
                        side,
                        claim_ids: dups.iter().map(|d| d.claim_id.clone()).collect(),
                    });
                }
                DuplicatePolicy::LastWins => {
                    warn!(
                        report = %side,
                        duplicate_ids = dups.len(),
                        "Duplicate claim ids found; keeping last occurrence"
                    );
                }
            }
        }

        let records = reconcile_indexed(&index_a, &index_b);

        debug!(
            report_a_records = report_a.len(),
            report_b_records = report_b.len(),
            claim_ids = records.len(),
            mismatched = records.iter().filter(|r| !r.is_matched()).count(),
            "Reconciliation pass complete"
        );

        Ok(ReconciliationReport::new(records, duplicates))
    }
}

/// Reconciles two reports with last-seen-wins duplicate handling
///
/// Total over any two inputs; the result is sorted by claim identifier.
pub fn reconcile(report_a: &[ClaimRecord], report_b: &[ClaimRecord]) -> Vec<ReconciledRecord> {
    reconcile_indexed(&SourceIndex::build(report_a), &SourceIndex::build(report_b))
}

/// Lists the compared fields that differ between two records, in fixed order
pub fn compare_records(a: &ClaimRecord, b: &ClaimRecord) -> Vec<MismatchLabel> {
    let checks = [
        (a.policy_number != b.policy_number, MismatchLabel::PolicyNumberMismatch),
        (a.date_of_service != b.date_of_service, MismatchLabel::DateOfServiceMismatch),
        (a.claim_amount != b.claim_amount, MismatchLabel::ClaimAmountMismatch),
        (a.claim_status != b.claim_status, MismatchLabel::ClaimStatusMismatch),
    ];

    checks
        .into_iter()
        .filter_map(|(differs, label)| differs.then_some(label))
        .collect()
}

/// Claim-id lookup over one report
struct SourceIndex<'a> {
    records: HashMap<&'a str, &'a ClaimRecord>,
    occurrences: BTreeMap<&'a str, usize>,
}

impl<'a> SourceIndex<'a> {
    fn build(records: &'a [ClaimRecord]) -> Self {
        let mut index = HashMap::with_capacity(records.len());
        let mut occurrences = BTreeMap::new();

        for record in records {
            let key = record.claim_id.as_str();
            index.insert(key, record);
            *occurrences.entry(key).or_insert(0) += 1;
        }

        Self {
            records: index,
            occurrences,
        }
    }

    fn get(&self, claim_id: &str) -> Option<&'a ClaimRecord> {
        self.records.get(claim_id).copied()
    }

    fn keys(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.records.keys().copied()
    }

    fn duplicates(&self) -> Vec<DuplicateClaim> {
        self.occurrences
            .iter()
            .filter(|(_, count)| **count > 1)
            .map(|(key, count)| DuplicateClaim {
                claim_id: (*key).into(),
                occurrences: *count,
            })
            .collect()
    }
}

fn reconcile_indexed(a: &SourceIndex<'_>, b: &SourceIndex<'_>) -> Vec<ReconciledRecord> {
    let claim_ids: BTreeSet<&str> = a.keys().chain(b.keys()).collect();

    claim_ids
        .into_iter()
        .map(|claim_id| reconcile_claim(claim_id, a.get(claim_id), b.get(claim_id)))
        .collect()
}

fn reconcile_claim(
    claim_id: &str,
    a: Option<&ClaimRecord>,
    b: Option<&ClaimRecord>,
) -> ReconciledRecord {
    let mismatch_type = match (a, b) {
        (Some(a), Some(b)) => compare_records(a, b),
        (None, _) => vec![MismatchLabel::missing_in(ReportSide::A)],
        (_, None) => vec![MismatchLabel::missing_in(ReportSide::B)],
    };

    let status = if mismatch_type.is_empty() {
        ReconciliationStatus::Matched
    } else {
        ReconciliationStatus::Mismatched
    };

    ReconciledRecord {
        claim_id: claim_id.into(),
        report_a: SideFields::from_record(a),
        report_b: SideFields::from_record(b),
        status,
        mismatch_type,
    }
}
