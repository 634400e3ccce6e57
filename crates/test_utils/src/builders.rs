//! Test Data Builders
//!
//! Builders let a test spell out only the fields it cares about. Display-only
//! fields (insured and provider names) are filled with fake data, since they
//! never take part in the comparison.

use core_kernel::{Amount, ClaimKey, PolicyNumber};
use domain_reconciliation::{ClaimRecord, ClaimStatus};
use fake::faker::company::en::CompanyName;
use fake::faker::name::en::Name;
use fake::Fake;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Builder for constructing claim records
#[derive(Debug, Clone)]
pub struct ClaimRecordBuilder {
    claim_id: ClaimKey,
    policy_number: PolicyNumber,
    date_of_service: String,
    claim_amount: Amount,
    claim_status: ClaimStatus,
    insured_name: String,
    provider_name: String,
}

impl ClaimRecordBuilder {
    /// Creates a builder for the given claim id with default compared fields
    pub fn new(claim_id: impl Into<ClaimKey>) -> Self {
        Self {
            claim_id: claim_id.into(),
            policy_number: PolicyNumber::from("POL100"),
            date_of_service: "2024-01-01".to_string(),
            claim_amount: Amount::new(dec!(100.00)),
            claim_status: ClaimStatus::Approved,
            insured_name: Name().fake(),
            provider_name: CompanyName().fake(),
        }
    }

    /// Starts from an existing record, e.g. to derive its Report B counterpart
    pub fn from_record(record: &ClaimRecord) -> Self {
        Self {
            claim_id: record.claim_id.clone(),
            policy_number: record.policy_number.clone(),
            date_of_service: record.date_of_service.clone(),
            claim_amount: record.claim_amount,
            claim_status: record.claim_status.clone(),
            insured_name: record.insured_name.clone(),
            provider_name: record.provider_name.clone(),
        }
    }

    pub fn policy_number(mut self, policy_number: impl Into<PolicyNumber>) -> Self {
        self.policy_number = policy_number.into();
        self
    }

    pub fn date_of_service(mut self, date: impl Into<String>) -> Self {
        self.date_of_service = date.into();
        self
    }

    pub fn amount(mut self, amount: Decimal) -> Self {
        self.claim_amount = Amount::new(amount);
        self
    }

    pub fn status(mut self, status: impl Into<ClaimStatus>) -> Self {
        self.claim_status = status.into();
        self
    }

    pub fn insured_name(mut self, name: impl Into<String>) -> Self {
        self.insured_name = name.into();
        self
    }

    pub fn provider_name(mut self, name: impl Into<String>) -> Self {
        self.provider_name = name.into();
        self
    }

    pub fn build(self) -> ClaimRecord {
        ClaimRecord {
            claim_id: self.claim_id,
            policy_number: self.policy_number,
            date_of_service: self.date_of_service,
            claim_amount: self.claim_amount,
            claim_status: self.claim_status,
            insured_name: self.insured_name,
            provider_name: self.provider_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let record = ClaimRecordBuilder::new("CLM001").build();
        assert_eq!(record.claim_id.as_str(), "CLM001");
        assert_eq!(record.claim_status, ClaimStatus::Approved);
        assert!(!record.insured_name.is_empty());
    }

    #[test]
    fn test_from_record_copies_compared_fields() {
        let original = ClaimRecordBuilder::new("CLM002").amount(dec!(42.10)).build();
        let copy = ClaimRecordBuilder::from_record(&original).build();
        assert_eq!(original, copy);
    }
}
