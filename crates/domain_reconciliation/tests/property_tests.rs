//! Property-based tests for the reconciler

use proptest::prelude::*;

use domain_reconciliation::{
    compare_records, mismatch_types_present, reconcile, MismatchLabel, Reconciler,
};
use test_utils::{
    assert_covers_union, assert_report_consistent, record_pair_strategy, report_pair_strategy,
};

proptest! {
    #[test]
    fn reconcile_is_total_and_consistent((a, b) in report_pair_strategy()) {
        let records = reconcile(&a, &b);
        assert_report_consistent(&records);
        assert_covers_union(&records, &a, &b);
    }

    #[test]
    fn reconcile_is_deterministic((a, b) in report_pair_strategy()) {
        prop_assert_eq!(reconcile(&a, &b), reconcile(&a, &b));
    }

    #[test]
    fn swapping_reports_swaps_missing_labels((a, b) in report_pair_strategy()) {
        let forward = reconcile(&a, &b);
        let backward = reconcile(&b, &a);
        prop_assert_eq!(forward.len(), backward.len());

        for (f, r) in forward.iter().zip(backward.iter()) {
            prop_assert_eq!(&f.claim_id, &r.claim_id);
            prop_assert_eq!(f.status, r.status);
            prop_assert_eq!(
                f.has_label(MismatchLabel::MissingInReportA),
                r.has_label(MismatchLabel::MissingInReportB)
            );
        }
    }

    #[test]
    fn labels_follow_differing_fields((a, b, flips) in record_pair_strategy()) {
        let expected: Vec<MismatchLabel> = [
            MismatchLabel::PolicyNumberMismatch,
            MismatchLabel::DateOfServiceMismatch,
            MismatchLabel::ClaimAmountMismatch,
            MismatchLabel::ClaimStatusMismatch,
        ]
        .into_iter()
        .zip(flips)
        .filter_map(|(label, flipped)| flipped.then_some(label))
        .collect();

        prop_assert_eq!(compare_records(&a, &b), expected.clone());

        let records = reconcile(&[a], &[b]);
        prop_assert_eq!(records.len(), 1);
        prop_assert_eq!(records[0].is_matched(), expected.is_empty());
        prop_assert_eq!(&records[0].mismatch_type, &expected);
    }

    #[test]
    fn aggregates_agree_with_records((a, b) in report_pair_strategy()) {
        let report = Reconciler::default().compute(&a, &b).unwrap();
        let tally = report.status_tally();
        let histogram = report.mismatch_histogram();

        prop_assert_eq!(tally.total(), report.len());
        prop_assert_eq!(
            tally.mismatched,
            report.iter().filter(|r| !r.mismatch_type.is_empty()).count()
        );

        let present = mismatch_types_present(&report.records);
        for label in MismatchLabel::ALL {
            prop_assert_eq!(histogram.count(label) > 0, present.contains(&label));
        }
    }
}
