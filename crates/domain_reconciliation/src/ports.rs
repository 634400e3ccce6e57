//! Claim Source Ports
//!
//! The reconciler never performs IO. Record collections are acquired through
//! [`ClaimSourcePort`], with one adapter per kind of source:
//!
//! - **In-memory**: records handed over directly (tests, API uploads)
//! - **JSON file**: one JSON array of claim records per report
//!
//! ```rust,ignore
//! let source: Arc<dyn ClaimSourcePort> = Arc::new(JsonFileClaimSource::new(a_path, b_path));
//! let report = load_and_reconcile(source.as_ref(), &Reconciler::default()).await?;
//! ```

use async_trait::async_trait;
use std::path::PathBuf;
use tracing::info;

use core_kernel::{DomainPort, PortError};
use crate::error::ReconciliationError;
use crate::reconciler::Reconciler;
use crate::record::{ClaimRecord, ReportSide};
use crate::report::ReconciliationReport;

/// Supplies the record collection for one side of a reconciliation
#[async_trait]
pub trait ClaimSourcePort: DomainPort {
    /// Fetches every claim record of the given report
    async fn fetch_claims(&self, side: ReportSide) -> Result<Vec<ClaimRecord>, PortError>;
}

/// Fetches both reports from a source and reconciles them
pub async fn load_and_reconcile(
    source: &dyn ClaimSourcePort,
    reconciler: &Reconciler,
) -> Result<ReconciliationReport, ReconciliationError> {
    let report_a = source.fetch_claims(ReportSide::A).await?;
    let report_b = source.fetch_claims(ReportSide::B).await?;
    reconciler.compute(&report_a, &report_b)
}

/// Source backed by records already in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryClaimSource {
    report_a: Vec<ClaimRecord>,
    report_b: Vec<ClaimRecord>,
}

impl InMemoryClaimSource {
    pub fn new(report_a: Vec<ClaimRecord>, report_b: Vec<ClaimRecord>) -> Self {
        Self { report_a, report_b }
    }
}

impl DomainPort for InMemoryClaimSource {}

#[async_trait]
impl ClaimSourcePort for InMemoryClaimSource {
    async fn fetch_claims(&self, side: ReportSide) -> Result<Vec<ClaimRecord>, PortError> {
        Ok(match side {
            ReportSide::A => self.report_a.clone(),
            ReportSide::B => self.report_b.clone(),
        })
    }
}

/// Source reading each report from a JSON array file
#[derive(Debug, Clone)]
pub struct JsonFileClaimSource {
    report_a_path: PathBuf,
    report_b_path: PathBuf,
}

impl JsonFileClaimSource {
    pub fn new(report_a_path: impl Into<PathBuf>, report_b_path: impl Into<PathBuf>) -> Self {
        Self {
            report_a_path: report_a_path.into(),
            report_b_path: report_b_path.into(),
        }
    }

    fn path_for(&self, side: ReportSide) -> &PathBuf {
        match side {
            ReportSide::A => &self.report_a_path,
            ReportSide::B => &self.report_b_path,
        }
    }
}

impl DomainPort for JsonFileClaimSource {}

#[async_trait]
impl ClaimSourcePort for JsonFileClaimSource {
    async fn fetch_claims(&self, side: ReportSide) -> Result<Vec<ClaimRecord>, PortError> {
        let path = self.path_for(side);

        let bytes = tokio::fs::read(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PortError::not_found("ClaimSource", path.display())
            } else {
                PortError::connection(format!("cannot read {}", path.display()), e)
            }
        })?;

        let records: Vec<ClaimRecord> = serde_json::from_slice(&bytes).map_err(|e| {
            PortError::transformation(format!("cannot decode claims in {}", path.display()), e)
        })?;

        info!(report = %side, path = %path.display(), records = records.len(), "Loaded claim report");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Amount;
    use rust_decimal_macros::dec;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("{}-{}.json", name, uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn test_in_memory_source_returns_each_side() {
        let a = ClaimRecord::new("C1", "P1", "2024-01-01", Amount::new(dec!(1)), "Approved");
        let source = InMemoryClaimSource::new(vec![a], vec![]);

        assert_eq!(source.fetch_claims(ReportSide::A).await.unwrap().len(), 1);
        assert!(source.fetch_claims(ReportSide::B).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_json_file_source_reads_records() {
        let a_path = temp_path("report-a");
        let b_path = temp_path("report-b");
        std::fs::write(
            &a_path,
            r#"[{"claimId":"CLM001","policyNumber":"POL1","dateOfService":"2024-07-15",
                "claimAmount":500.0,"claimStatus":"Approved"}]"#,
        )
        .unwrap();
        std::fs::write(&b_path, "[]").unwrap();

        let source = JsonFileClaimSource::new(&a_path, &b_path);
        let report = load_and_reconcile(&source, &Reconciler::default()).await.unwrap();

        assert_eq!(report.len(), 1);
        assert!(!report.records[0].is_matched());

        std::fs::remove_file(a_path).ok();
        std::fs::remove_file(b_path).ok();
    }

    #[tokio::test]
    async fn test_json_file_source_missing_file() {
        let source = JsonFileClaimSource::new(temp_path("absent-a"), temp_path("absent-b"));
        let err = source.fetch_claims(ReportSide::A).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_json_file_source_unreadable_path_is_transient() {
        let dir = std::env::temp_dir();
        let source = JsonFileClaimSource::new(&dir, &dir);

        let err = source.fetch_claims(ReportSide::B).await.unwrap_err();
        assert!(matches!(err, PortError::Connection { .. }));
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn test_json_file_source_bad_json() {
        let a_path = temp_path("bad-a");
        std::fs::write(&a_path, "{not json").unwrap();

        let source = JsonFileClaimSource::new(&a_path, temp_path("unused-b"));
        let err = source.fetch_claims(ReportSide::A).await.unwrap_err();
        assert!(matches!(err, PortError::Transformation { .. }));

        std::fs::remove_file(a_path).ok();
    }
}
