//! Pre-built Test Fixtures
//!
//! Ready-to-use report pairs covering the reconciliation scenarios, plus a
//! larger deterministic sample shaped like a real pair of claim reports.

use core_kernel::Amount;
use domain_reconciliation::{ClaimRecord, ClaimStatus};
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::builders::ClaimRecordBuilder;

/// A pair of claim reports
#[derive(Debug, Clone, Default)]
pub struct ReportPair {
    pub report_a: Vec<ClaimRecord>,
    pub report_b: Vec<ClaimRecord>,
}

impl ReportPair {
    pub fn new(report_a: Vec<ClaimRecord>, report_b: Vec<ClaimRecord>) -> Self {
        Self { report_a, report_b }
    }
}

/// Fixture for single claim records
pub struct ClaimFixtures;

impl ClaimFixtures {
    /// The reference record: C1 / P1 / 2024-01-01 / 100.0 / Approved
    pub fn reference() -> ClaimRecord {
        ClaimRecord::new("C1", "P1", "2024-01-01", Amount::new(dec!(100.0)), ClaimStatus::Approved)
    }

    /// The reference record with a different amount
    pub fn with_amount(amount: Decimal) -> ClaimRecord {
        ClaimRecordBuilder::from_record(&Self::reference()).amount(amount).build()
    }
}

/// Fixture for the canonical reconciliation scenarios
pub struct ScenarioFixtures;

impl ScenarioFixtures {
    /// A record only present in Report A
    pub fn missing_in_b() -> ReportPair {
        ReportPair::new(vec![ClaimFixtures::reference()], vec![])
    }

    /// A record only present in Report B
    pub fn missing_in_a() -> ReportPair {
        ReportPair::new(vec![], vec![ClaimFixtures::reference()])
    }

    /// The same record in both reports
    pub fn identical() -> ReportPair {
        ReportPair::new(vec![ClaimFixtures::reference()], vec![ClaimFixtures::reference()])
    }

    /// Same claim, amount 100.0 vs 110.0
    pub fn amount_differs() -> ReportPair {
        ReportPair::new(
            vec![ClaimFixtures::reference()],
            vec![ClaimFixtures::with_amount(dec!(110.0))],
        )
    }

    /// Same claim, policy number and status both differ
    pub fn policy_and_status_differ() -> ReportPair {
        let b = ClaimRecordBuilder::from_record(&ClaimFixtures::reference())
            .policy_number("P2")
            .status(ClaimStatus::Denied)
            .build();
        ReportPair::new(vec![ClaimFixtures::reference()], vec![b])
    }

    /// Two empty reports
    pub fn empty() -> ReportPair {
        ReportPair::default()
    }
}

/// Deterministic sample of 22 claims
///
/// Claims CLM001..CLM020 appear in both reports. In Report B every fifth
/// claim has its amount raised by 10%, every seventh has its status flipped,
/// and CLM013 has its date of service moved by a day. CLM021 appears only in
/// Report A and CLM022 only in Report B.
pub static SAMPLE_REPORTS: Lazy<ReportPair> = Lazy::new(|| {
    let mut report_a = Vec::new();
    let mut report_b = Vec::new();

    for i in 1..=20u32 {
        let a = ClaimRecordBuilder::new(format!("CLM{i:03}"))
            .policy_number(format!("POL{}", 100 + i * 37 % 900))
            .date_of_service(format!("2024-0{}-0{}", i % 9 + 1, i % 7 + 1))
            .amount(Decimal::new(10_000 + i as i64 * 4_525, 2))
            .status(if i % 2 == 0 { ClaimStatus::Approved } else { ClaimStatus::Pending })
            .insured_name(format!("Insured {i}"))
            .provider_name(format!("Provider {}", i % 5 + 1))
            .build();

        let mut b = ClaimRecordBuilder::from_record(&a);
        if i % 5 == 0 {
            b = b.amount((a.claim_amount.value() * dec!(1.10)).round_dp(2));
        }
        if i % 7 == 0 {
            b = b.status(if a.claim_status == ClaimStatus::Approved {
                ClaimStatus::Denied
            } else {
                ClaimStatus::Approved
            });
        }
        if i == 13 {
            b = b.date_of_service(format!("2024-0{}-0{}", i % 9 + 1, i % 7 + 2));
        }

        report_a.push(a);
        report_b.push(b.build());
    }

    report_a.push(
        ClaimRecordBuilder::new("CLM021")
            .policy_number("POL999")
            .date_of_service("2024-07-15")
            .amount(dec!(500.00))
            .status(ClaimStatus::Approved)
            .insured_name("Missing B")
            .provider_name("Prov X")
            .build(),
    );
    report_b.push(
        ClaimRecordBuilder::new("CLM022")
            .policy_number("POL888")
            .date_of_service("2024-08-01")
            .amount(dec!(750.00))
            .status(ClaimStatus::Pending)
            .insured_name("Missing A")
            .provider_name("Prov Y")
            .build(),
    );

    ReportPair::new(report_a, report_b)
});

/// Serializes a report as the JSON array a claim source would provide
pub fn report_json(records: &[ClaimRecord]) -> serde_json::Value {
    serde_json::to_value(records).unwrap_or(serde_json::Value::Null)
}
