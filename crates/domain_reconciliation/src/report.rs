//! Reconciliation report model
//!
//! A report holds one [`ReconciledRecord`] per claim identifier seen in either
//! source, sorted by claim identifier. Values missing on one side are carried
//! as [`Field::Absent`], which serializes to the `"-"` sentinel so consumers
//! can render a placeholder without special-casing nulls.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use core_kernel::{Amount, ClaimKey, PolicyNumber, ReportId};
use crate::record::{ClaimRecord, ClaimStatus, ReportSide};

/// Serialized form of an absent value
pub const ABSENT_SENTINEL: &str = "-";

/// A value from one side of the comparison, or the absent sentinel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field<T> {
    Present(T),
    Absent,
}

impl<T> Field<T> {
    /// Returns true if the source had no record for this claim
    pub fn is_absent(&self) -> bool {
        matches!(self, Field::Absent)
    }

    /// Returns the value if present
    pub fn as_present(&self) -> Option<&T> {
        match self {
            Field::Present(value) => Some(value),
            Field::Absent => None,
        }
    }
}

impl<T> From<Option<T>> for Field<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Field::Absent, Field::Present)
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Field::Present(value) => value.serialize(serializer),
            Field::Absent => serializer.serialize_str(ABSENT_SENTINEL),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Present(value) => value.fmt(f),
            Field::Absent => f.write_str(ABSENT_SENTINEL),
        }
    }
}

/// The four compared fields as seen in one report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SideFields {
    pub policy_number: Field<PolicyNumber>,
    pub date_of_service: Field<String>,
    pub claim_amount: Field<Amount>,
    pub claim_status: Field<ClaimStatus>,
}

impl SideFields {
    /// All fields absent
    pub fn absent() -> Self {
        Self {
            policy_number: Field::Absent,
            date_of_service: Field::Absent,
            claim_amount: Field::Absent,
            claim_status: Field::Absent,
        }
    }

    /// Projects the compared fields out of a record, if there is one
    pub fn from_record(record: Option<&ClaimRecord>) -> Self {
        match record {
            Some(r) => Self {
                policy_number: Field::Present(r.policy_number.clone()),
                date_of_service: Field::Present(r.date_of_service.clone()),
                claim_amount: Field::Present(r.claim_amount),
                claim_status: Field::Present(r.claim_status.clone()),
            },
            None => Self::absent(),
        }
    }

    /// Returns true if the report had no record for this claim
    pub fn is_absent(&self) -> bool {
        self.policy_number.is_absent()
    }
}

/// Matched or Mismatched classification of a claim identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReconciliationStatus {
    Matched,
    Mismatched,
}

impl ReconciliationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReconciliationStatus::Matched => "Matched",
            ReconciliationStatus::Mismatched => "Mismatched",
        }
    }
}

impl fmt::Display for ReconciliationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReconciliationStatus {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "matched" => Ok(ReconciliationStatus::Matched),
            "mismatched" => Ok(ReconciliationStatus::Mismatched),
            _ => Err(ParseLabelError(s.to_string())),
        }
    }
}

/// Error returned when a status or mismatch label string is not recognised
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown label: {0}")]
pub struct ParseLabelError(pub String);

/// A single discrepancy reason
///
/// Variants are declared in evaluation order: side absence first, then the
/// compared fields in their fixed order. The display strings are part of the
/// output contract and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "&'static str", try_from = "String")]
pub enum MismatchLabel {
    MissingInReportA,
    MissingInReportB,
    PolicyNumberMismatch,
    DateOfServiceMismatch,
    ClaimAmountMismatch,
    ClaimStatusMismatch,
}

impl MismatchLabel {
    /// Every label, in evaluation order
    pub const ALL: [MismatchLabel; 6] = [
        MismatchLabel::MissingInReportA,
        MismatchLabel::MissingInReportB,
        MismatchLabel::PolicyNumberMismatch,
        MismatchLabel::DateOfServiceMismatch,
        MismatchLabel::ClaimAmountMismatch,
        MismatchLabel::ClaimStatusMismatch,
    ];

    /// The fixed display string consumers match on
    pub fn label(&self) -> &'static str {
        match self {
            MismatchLabel::MissingInReportA => "Missing in Report A",
            MismatchLabel::MissingInReportB => "Missing in Report B",
            MismatchLabel::PolicyNumberMismatch => "Policy Number Mismatch",
            MismatchLabel::DateOfServiceMismatch => "Date of Service Mismatch",
            MismatchLabel::ClaimAmountMismatch => "Claim Amount Mismatch",
            MismatchLabel::ClaimStatusMismatch => "Claim Status Mismatch",
        }
    }

    /// The label for a claim that one report is missing
    pub fn missing_in(side: ReportSide) -> Self {
        match side {
            ReportSide::A => MismatchLabel::MissingInReportA,
            ReportSide::B => MismatchLabel::MissingInReportB,
        }
    }
}

impl fmt::Display for MismatchLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MismatchLabel {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MismatchLabel::ALL
            .into_iter()
            .find(|label| label.label() == s.trim())
            .ok_or_else(|| ParseLabelError(s.to_string()))
    }
}

impl TryFrom<String> for MismatchLabel {
    type Error = ParseLabelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MismatchLabel> for &'static str {
    fn from(label: MismatchLabel) -> &'static str {
        label.label()
    }
}

/// One row of the reconciliation report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconciledRecord {
    pub claim_id: ClaimKey,
    pub report_a: SideFields,
    pub report_b: SideFields,
    pub status: ReconciliationStatus,
    /// Discrepancy labels in evaluation order, empty when matched
    pub mismatch_type: Vec<MismatchLabel>,
}

impl ReconciledRecord {
    pub fn is_matched(&self) -> bool {
        self.status == ReconciliationStatus::Matched
    }

    /// Returns true if the given label is among this record's discrepancies
    pub fn has_label(&self, label: MismatchLabel) -> bool {
        self.mismatch_type.contains(&label)
    }

    /// The compared fields for one side
    pub fn side(&self, side: ReportSide) -> &SideFields {
        match side {
            ReportSide::A => &self.report_a,
            ReportSide::B => &self.report_b,
        }
    }
}

/// A claim identifier that appeared more than once within one report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateClaim {
    pub claim_id: ClaimKey,
    /// Total times the identifier appeared; only the last occurrence is kept
    pub occurrences: usize,
}

/// Duplicate claim identifiers found while indexing each report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DuplicateSummary {
    pub report_a: Vec<DuplicateClaim>,
    pub report_b: Vec<DuplicateClaim>,
}

impl DuplicateSummary {
    pub fn is_empty(&self) -> bool {
        self.report_a.is_empty() && self.report_b.is_empty()
    }

    pub fn for_side(&self, side: ReportSide) -> &[DuplicateClaim] {
        match side {
            ReportSide::A => &self.report_a,
            ReportSide::B => &self.report_b,
        }
    }

    /// Number of records overwritten by a later record with the same identifier
    pub fn discarded_records(&self) -> usize {
        self.report_a
            .iter()
            .chain(self.report_b.iter())
            .map(|d| d.occurrences.saturating_sub(1))
            .sum()
    }
}

/// The result of one reconciliation pass
///
/// Built once and never mutated; a new pass produces a new report.
#[derive(Debug, Clone, Serialize)]
pub struct ReconciliationReport {
    pub id: ReportId,
    pub generated_at: DateTime<Utc>,
    /// One record per claim identifier, sorted by claim identifier
    pub records: Vec<ReconciledRecord>,
    pub duplicates: DuplicateSummary,
}

impl ReconciliationReport {
    /// Creates a report over already-reconciled records
    pub fn new(records: Vec<ReconciledRecord>, duplicates: DuplicateSummary) -> Self {
        Self {
            id: ReportId::new_v7(),
            generated_at: Utc::now(),
            records,
            duplicates,
        }
    }

    /// A report over two empty sources
    pub fn empty() -> Self {
        Self::new(Vec::new(), DuplicateSummary::default())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ReconciledRecord> {
        self.records.iter()
    }

    /// Looks up the row for a claim identifier
    pub fn get(&self, claim_id: &str) -> Option<&ReconciledRecord> {
        self.records
            .binary_search_by(|r| r.claim_id.as_str().cmp(claim_id))
            .ok()
            .map(|idx| &self.records[idx])
    }
}
