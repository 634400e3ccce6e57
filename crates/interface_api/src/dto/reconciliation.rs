//! Reconciliation DTOs
//!
//! Rows are flattened into the column names consumers already render:
//! `claimId`, `reportA_policyNumber` .. `reportB_claimStatus`,
//! `reconciliationStatus` and `mismatchType`. Absent values are `"-"`; claim
//! amounts are JSON numbers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use validator::Validate;

use core_kernel::{Amount, ClaimKey, PolicyNumber, ReportId};
use domain_reconciliation::{
    ClaimRecord, ClaimStatus, DuplicateSummary, Field, MismatchHistogram, MismatchLabel,
    ReconciledRecord, ReconciliationReport, ReconciliationStatus, ReconciliationSummary,
    ReportFilter,
};

use crate::error::ApiError;

/// Query value meaning "no restriction"
pub const FILTER_ALL: &str = "All";

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileRequest {
    #[validate(length(max = 100_000))]
    pub report_a: Vec<ClaimRecord>,
    #[validate(length(max = 100_000))]
    pub report_b: Vec<ClaimRecord>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ReplaceSourceRequest {
    #[validate(length(max = 100_000))]
    pub claims: Vec<ClaimRecord>,
}

/// Query parameters for listing report rows
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportQuery {
    pub status: Option<String>,
    pub mismatch_type: Option<String>,
    pub search: Option<String>,
}

impl ReportQuery {
    /// Parses the query into a filter; `All` and empty values do not restrict
    pub fn into_filter(self) -> Result<ReportFilter, ApiError> {
        let mut filter = ReportFilter::new();

        if let Some(status) = restricting(self.status) {
            let status = status
                .parse::<ReconciliationStatus>()
                .map_err(|e| ApiError::BadRequest(e.to_string()))?;
            filter = filter.status(status);
        }
        if let Some(label) = restricting(self.mismatch_type) {
            let label = label
                .parse::<MismatchLabel>()
                .map_err(|e| ApiError::BadRequest(e.to_string()))?;
            filter = filter.mismatch_type(label);
        }
        if let Some(search) = self.search {
            filter = filter.search(search);
        }

        Ok(filter)
    }
}

fn restricting(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty() && !v.trim().eq_ignore_ascii_case(FILTER_ALL))
}

/// One flattened report row
#[derive(Debug, Serialize)]
pub struct ReconciledRowResponse {
    #[serde(rename = "claimId")]
    pub claim_id: ClaimKey,
    #[serde(rename = "reportA_policyNumber")]
    pub report_a_policy_number: Field<PolicyNumber>,
    #[serde(rename = "reportA_dateOfService")]
    pub report_a_date_of_service: Field<String>,
    #[serde(rename = "reportA_claimAmount", serialize_with = "amount_as_number")]
    pub report_a_claim_amount: Field<Amount>,
    #[serde(rename = "reportA_claimStatus")]
    pub report_a_claim_status: Field<ClaimStatus>,
    #[serde(rename = "reportB_policyNumber")]
    pub report_b_policy_number: Field<PolicyNumber>,
    #[serde(rename = "reportB_dateOfService")]
    pub report_b_date_of_service: Field<String>,
    #[serde(rename = "reportB_claimAmount", serialize_with = "amount_as_number")]
    pub report_b_claim_amount: Field<Amount>,
    #[serde(rename = "reportB_claimStatus")]
    pub report_b_claim_status: Field<ClaimStatus>,
    #[serde(rename = "reconciliationStatus")]
    pub reconciliation_status: ReconciliationStatus,
    #[serde(rename = "mismatchType")]
    pub mismatch_type: Vec<MismatchLabel>,
}

fn amount_as_number<S: Serializer>(amount: &Field<Amount>, serializer: S) -> Result<S::Ok, S::Error> {
    match amount.as_present().and_then(Amount::to_f64) {
        Some(value) => serializer.serialize_f64(value),
        None => amount.serialize(serializer),
    }
}

impl From<&ReconciledRecord> for ReconciledRowResponse {
    fn from(record: &ReconciledRecord) -> Self {
        let (a, b) = (&record.report_a, &record.report_b);
        Self {
            claim_id: record.claim_id.clone(),
            report_a_policy_number: a.policy_number.clone(),
            report_a_date_of_service: a.date_of_service.clone(),
            report_a_claim_amount: a.claim_amount.clone(),
            report_a_claim_status: a.claim_status.clone(),
            report_b_policy_number: b.policy_number.clone(),
            report_b_date_of_service: b.date_of_service.clone(),
            report_b_claim_amount: b.claim_amount.clone(),
            report_b_claim_status: b.claim_status.clone(),
            reconciliation_status: record.status,
            mismatch_type: record.mismatch_type.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub report_id: ReportId,
    pub generated_at: DateTime<Utc>,
    pub total: usize,
    pub matched: usize,
    pub mismatched: usize,
    pub mismatch_histogram: MismatchHistogram,
    pub mismatch_types: Vec<MismatchLabel>,
    pub duplicates: DuplicateSummary,
}

impl SummaryResponse {
    pub fn from_report(report: &ReconciliationReport) -> Self {
        let ReconciliationSummary {
            report_id,
            total,
            status_tally,
            mismatch_histogram,
            mismatch_types,
            duplicates,
        } = report.summary();

        Self {
            report_id,
            generated_at: report.generated_at,
            total,
            matched: status_tally.matched,
            mismatched: status_tally.mismatched,
            mismatch_histogram,
            mismatch_types,
            duplicates,
        }
    }
}

/// Report rows with the summary of the whole report
///
/// `records` may be filtered; `summary` always covers every row.
#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub records: Vec<ReconciledRowResponse>,
    pub summary: SummaryResponse,
}

impl ReportResponse {
    pub fn new<'r>(
        report: &ReconciliationReport,
        records: impl IntoIterator<Item = &'r ReconciledRecord>,
    ) -> Self {
        Self {
            records: records.into_iter().map(ReconciledRowResponse::from).collect(),
            summary: SummaryResponse::from_report(report),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::ClaimRecordBuilder;

    #[test]
    fn test_all_does_not_restrict() {
        let query = ReportQuery {
            status: Some("All".to_string()),
            mismatch_type: Some("All".to_string()),
            search: None,
        };
        assert_eq!(query.into_filter().unwrap(), ReportFilter::new());
    }

    #[test]
    fn test_query_parses_labels() {
        let query = ReportQuery {
            status: Some("mismatched".to_string()),
            mismatch_type: Some("Claim Amount Mismatch".to_string()),
            search: Some("CLM0".to_string()),
        };
        let filter = query.into_filter().unwrap();
        assert_eq!(filter.status, Some(ReconciliationStatus::Mismatched));
        assert_eq!(filter.mismatch_type, Some(MismatchLabel::ClaimAmountMismatch));
        assert_eq!(filter.claim_id_contains.as_deref(), Some("CLM0"));
    }

    #[test]
    fn test_row_amounts_are_numbers() {
        let record = ClaimRecordBuilder::new("CLM001")
            .amount(Amount::from_minor(10050, 2).value())
            .build();
        let records = domain_reconciliation::reconcile(&[record], &[]);

        let row = serde_json::to_value(ReconciledRowResponse::from(&records[0])).unwrap();
        assert_eq!(row["reportA_claimAmount"], serde_json::json!(100.5));
        assert_eq!(row["reportB_claimAmount"], "-");
    }

    #[test]
    fn test_unknown_label_is_bad_request() {
        let query = ReportQuery {
            mismatch_type: Some("Amount".to_string()),
            ..Default::default()
        };
        assert!(matches!(query.into_filter(), Err(ApiError::BadRequest(_))));
    }
}
