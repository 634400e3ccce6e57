//! Property-Based Test Generators
//!
//! Proptest strategies for claim reports. Value spaces are kept small on
//! purpose so that generated reports share claim ids and field values often
//! enough to exercise both the matched and mismatched paths.

use core_kernel::Amount;
use domain_reconciliation::{ClaimRecord, ClaimStatus};
use proptest::collection::vec;
use proptest::prelude::*;

/// Claim ids drawn from CLM000..CLM039
pub fn claim_id_strategy() -> impl Strategy<Value = String> {
    (0u32..40).prop_map(|n| format!("CLM{n:03}"))
}

pub fn policy_number_strategy() -> impl Strategy<Value = String> {
    prop_oneof![Just("POL100"), Just("POL200"), Just("POL300")].prop_map(String::from)
}

pub fn date_of_service_strategy() -> impl Strategy<Value = String> {
    prop_oneof![Just("2024-01-01"), Just("2024-01-02"), Just("2024-06-30")].prop_map(String::from)
}

/// Amounts in whole multiples of 25.00, at two decimal places
pub fn amount_strategy() -> impl Strategy<Value = Amount> {
    (0i64..4).prop_map(|n| Amount::from_minor(n * 2_500, 2))
}

pub fn claim_status_strategy() -> impl Strategy<Value = ClaimStatus> {
    prop_oneof![
        Just(ClaimStatus::Approved),
        Just(ClaimStatus::Pending),
        Just(ClaimStatus::Denied),
        Just(ClaimStatus::Other("Under Review".to_string())),
    ]
}

pub fn claim_record_strategy() -> impl Strategy<Value = ClaimRecord> {
    (
        claim_id_strategy(),
        policy_number_strategy(),
        date_of_service_strategy(),
        amount_strategy(),
        claim_status_strategy(),
    )
        .prop_map(|(id, policy, date, amount, status)| {
            ClaimRecord::new(id, policy, date, amount, status)
        })
}

/// A report of up to `max_len` records; claim ids may repeat
pub fn report_strategy(max_len: usize) -> impl Strategy<Value = Vec<ClaimRecord>> {
    vec(claim_record_strategy(), 0..=max_len)
}

/// Two independent reports drawn from the same id space
pub fn report_pair_strategy() -> impl Strategy<Value = (Vec<ClaimRecord>, Vec<ClaimRecord>)> {
    (report_strategy(30), report_strategy(30))
}

/// Which of the four compared fields differ, in evaluation order
pub type FieldFlips = [bool; 4];

/// A record, a counterpart with the flagged fields changed, and the flags
pub fn record_pair_strategy() -> impl Strategy<Value = (ClaimRecord, ClaimRecord, FieldFlips)> {
    (claim_record_strategy(), any::<[bool; 4]>()).prop_map(|(a, flips)| {
        let mut b = a.clone();
        if flips[0] {
            b.policy_number = format!("{}-X", a.policy_number).into();
        }
        if flips[1] {
            b.date_of_service = "1999-12-31".to_string();
        }
        if flips[2] {
            b.claim_amount = Amount::new(a.claim_amount.value() + rust_decimal::Decimal::ONE);
        }
        if flips[3] {
            b.claim_status = ClaimStatus::Other(format!("{} (revised)", a.claim_status));
        }
        (a, b, flips)
    })
}
