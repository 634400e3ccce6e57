//! Claim records as they arrive from either report

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use core_kernel::{Amount, ClaimKey, PolicyNumber};

/// Which of the two reports a record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportSide {
    #[serde(rename = "A", alias = "a")]
    A,
    #[serde(rename = "B", alias = "b")]
    B,
}

impl ReportSide {
    /// Human-readable report name, as used in mismatch labels
    pub fn label(&self) -> &'static str {
        match self {
            ReportSide::A => "Report A",
            ReportSide::B => "Report B",
        }
    }
}

impl fmt::Display for ReportSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ReportSide {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" | "report_a" | "report a" => Ok(ReportSide::A),
            "b" | "report_b" | "report b" => Ok(ReportSide::B),
            other => Err(format!("unknown report side '{other}'")),
        }
    }
}

/// Claim status as reported by a source
///
/// The set of statuses is open: anything other than the three well-known
/// values is carried verbatim in `Other`. Equality and hashing go through the
/// string form, so `Other("Approved".into())` equals `Approved`.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ClaimStatus {
    Approved,
    Pending,
    Denied,
    Other(String),
}

impl ClaimStatus {
    /// Returns the status exactly as a report would spell it
    pub fn as_str(&self) -> &str {
        match self {
            ClaimStatus::Approved => "Approved",
            ClaimStatus::Pending => "Pending",
            ClaimStatus::Denied => "Denied",
            ClaimStatus::Other(value) => value,
        }
    }
}

impl PartialEq for ClaimStatus {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Hash for ClaimStatus {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl From<String> for ClaimStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Approved" => ClaimStatus::Approved,
            "Pending" => ClaimStatus::Pending,
            "Denied" => ClaimStatus::Denied,
            _ => ClaimStatus::Other(value),
        }
    }
}

impl From<&str> for ClaimStatus {
    fn from(value: &str) -> Self {
        ClaimStatus::from(value.to_string())
    }
}

impl From<ClaimStatus> for String {
    fn from(status: ClaimStatus) -> String {
        match status {
            ClaimStatus::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One claim entry from either report
///
/// Serialized with the camelCase field names the reports use
/// (`claimId`, `policyNumber`, `dateOfService`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimRecord {
    /// Join key between the two reports
    pub claim_id: ClaimKey,
    pub policy_number: PolicyNumber,
    /// ISO date (`YYYY-MM-DD`), compared as an exact string
    pub date_of_service: String,
    pub claim_amount: Amount,
    pub claim_status: ClaimStatus,
    /// Carried for display only, never compared
    #[serde(default)]
    pub insured_name: String,
    /// Carried for display only, never compared
    #[serde(default)]
    pub provider_name: String,
}

impl ClaimRecord {
    /// Creates a record with the compared fields set and empty display names
    pub fn new(
        claim_id: impl Into<ClaimKey>,
        policy_number: impl Into<PolicyNumber>,
        date_of_service: impl Into<String>,
        claim_amount: Amount,
        claim_status: impl Into<ClaimStatus>,
    ) -> Self {
        Self {
            claim_id: claim_id.into(),
            policy_number: policy_number.into(),
            date_of_service: date_of_service.into(),
            claim_amount,
            claim_status: claim_status.into(),
            insured_name: String::new(),
            provider_name: String::new(),
        }
    }

    /// Sets the insured's name
    pub fn with_insured_name(mut self, name: impl Into<String>) -> Self {
        self.insured_name = name.into();
        self
    }

    /// Sets the provider's name
    pub fn with_provider_name(mut self, name: impl Into<String>) -> Self {
        self.provider_name = name.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_known_statuses_parse() {
        assert_eq!(ClaimStatus::from("Approved"), ClaimStatus::Approved);
        assert_eq!(ClaimStatus::from("Denied"), ClaimStatus::Denied);
        assert!(matches!(ClaimStatus::from("approved"), ClaimStatus::Other(_)));
    }

    #[test]
    fn test_other_status_equals_known_spelling() {
        assert_eq!(ClaimStatus::Other("Pending".to_string()), ClaimStatus::Pending);
        assert_ne!(ClaimStatus::Other("On Hold".to_string()), ClaimStatus::Pending);
    }

    #[test]
    fn test_record_deserializes_camel_case() {
        let json = r#"{
            "claimId": "CLM001",
            "policyNumber": "POL123",
            "dateOfService": "2024-01-05",
            "claimAmount": 100.5,
            "claimStatus": "Under Review",
            "insuredName": "Insured 1"
        }"#;
        let record: ClaimRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.claim_id.as_str(), "CLM001");
        assert_eq!(record.claim_amount, Amount::new(dec!(100.5)));
        assert_eq!(record.claim_status, ClaimStatus::Other("Under Review".to_string()));
        assert_eq!(record.provider_name, "");
    }

    #[test]
    fn test_report_side_parse() {
        assert_eq!("a".parse::<ReportSide>().unwrap(), ReportSide::A);
        assert_eq!("B".parse::<ReportSide>().unwrap(), ReportSide::B);
        assert!("c".parse::<ReportSide>().is_err());
    }
}
