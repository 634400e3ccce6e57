//! Custom Test Assertions
//!
//! Report-level assertions that give more meaningful failure messages than
//! comparing whole reports.

use std::collections::BTreeSet;

use domain_reconciliation::{
    ClaimRecord, MismatchHistogram, MismatchLabel, ReconciledRecord, ReconciliationStatus,
    StatusTally,
};

/// Asserts the internal invariants of a reconciled record list
///
/// # Panics
///
/// Panics if claim ids are not strictly increasing, a status disagrees with
/// its discrepancy list, or the aggregates do not add up.
pub fn assert_report_consistent(records: &[ReconciledRecord]) {
    for pair in records.windows(2) {
        assert!(
            pair[0].claim_id < pair[1].claim_id,
            "Claim ids not strictly ordered: {} then {}",
            pair[0].claim_id,
            pair[1].claim_id
        );
    }

    for record in records {
        let expected = if record.mismatch_type.is_empty() {
            ReconciliationStatus::Matched
        } else {
            ReconciliationStatus::Mismatched
        };
        assert_eq!(
            record.status, expected,
            "Claim {} has status {} but discrepancies {:?}",
            record.claim_id, record.status, record.mismatch_type
        );
    }

    let tally = StatusTally::from_records(records);
    assert_eq!(tally.total(), records.len(), "Status tally does not cover every record");

    let label_count: usize = records.iter().map(|r| r.mismatch_type.len()).sum();
    assert_eq!(
        MismatchHistogram::from_records(records).total(),
        label_count,
        "Histogram total differs from the number of discrepancy labels"
    );
}

/// Asserts that the report covers exactly the union of input claim ids
pub fn assert_covers_union(records: &[ReconciledRecord], report_a: &[ClaimRecord], report_b: &[ClaimRecord]) {
    let expected: BTreeSet<&str> = report_a
        .iter()
        .chain(report_b.iter())
        .map(|r| r.claim_id.as_str())
        .collect();
    let actual: BTreeSet<&str> = records.iter().map(|r| r.claim_id.as_str()).collect();

    assert_eq!(actual, expected, "Reported claim ids differ from the input union");
    assert_eq!(actual.len(), records.len(), "Report contains duplicate claim ids");
}

/// Asserts the discrepancy list for one claim
///
/// # Panics
///
/// Panics if the claim is missing from the report or its labels differ.
pub fn assert_mismatch(records: &[ReconciledRecord], claim_id: &str, expected: &[MismatchLabel]) {
    let record = records
        .iter()
        .find(|r| r.claim_id.as_str() == claim_id)
        .unwrap_or_else(|| panic!("Claim {claim_id} not in report"));

    assert_eq!(
        record.mismatch_type.as_slice(),
        expected,
        "Unexpected discrepancies for claim {claim_id}"
    );
}
