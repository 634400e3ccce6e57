//! Shared reconciliation state
//!
//! Holds the two current claim reports and the report derived from them.
//! Writers replace one side and recompute on the blocking pool while holding
//! the write lock; readers take a cheap `Arc` clone of the current report,
//! which stays valid after a newer report replaces it.

use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task;
use tracing::info;

use domain_reconciliation::{
    ClaimRecord, ClaimSourcePort, ReconciliationError, ReconciliationReport,
    Reconciler, ReportSide,
};

use crate::error::ApiError;

#[derive(Debug)]
struct Snapshot {
    report_a: Vec<ClaimRecord>,
    report_b: Vec<ClaimRecord>,
    report: Arc<ReconciliationReport>,
}

/// The current sources and their reconciliation report
#[derive(Debug)]
pub struct ReconciliationState {
    reconciler: Reconciler,
    inner: Arc<RwLock<Snapshot>>,
}

impl ReconciliationState {
    /// Starts with two empty reports
    pub fn new(reconciler: Reconciler) -> Self {
        Self {
            reconciler,
            inner: Arc::new(RwLock::new(Snapshot {
                report_a: Vec::new(),
                report_b: Vec::new(),
                report: Arc::new(ReconciliationReport::empty()),
            })),
        }
    }

    /// Starts from records already in hand
    pub fn with_sources(
        reconciler: Reconciler,
        report_a: Vec<ClaimRecord>,
        report_b: Vec<ClaimRecord>,
    ) -> Result<Self, ReconciliationError> {
        let report = reconciler.compute(&report_a, &report_b)?;
        Ok(Self {
            reconciler,
            inner: Arc::new(RwLock::new(Snapshot {
                report_a,
                report_b,
                report: Arc::new(report),
            })),
        })
    }

    /// Loads both sides from a claim source and reconciles them
    pub async fn load(
        reconciler: Reconciler,
        source: &dyn ClaimSourcePort,
    ) -> Result<Self, ReconciliationError> {
        let report_a = source.fetch_claims(ReportSide::A).await?;
        let report_b = source.fetch_claims(ReportSide::B).await?;
        Self::with_sources(reconciler, report_a, report_b)
    }

    /// The report for the current sources
    pub async fn current(&self) -> Arc<ReconciliationReport> {
        Arc::clone(&self.inner.read().await.report)
    }

    /// Reconciles two reports off the async workers, leaving state untouched
    pub async fn compute_detached(
        &self,
        report_a: Vec<ClaimRecord>,
        report_b: Vec<ClaimRecord>,
    ) -> Result<ReconciliationReport, ApiError> {
        let reconciler = self.reconciler;
        let report = task::spawn_blocking(move || reconciler.compute(&report_a, &report_b))
            .await
            .map_err(|e| ApiError::Internal(format!("Reconciliation task failed: {e}")))??;
        Ok(report)
    }

    /// Replaces one side and recomputes
    ///
    /// Readers wait for the new report. On error the previous sources and
    /// report are left in place.
    pub async fn replace_source(
        &self,
        side: ReportSide,
        records: Vec<ClaimRecord>,
    ) -> Result<Arc<ReconciliationReport>, ApiError> {
        let mut snapshot = Arc::clone(&self.inner).write_owned().await;
        let reconciler = self.reconciler;

        let report = task::spawn_blocking(move || {
            let report = match side {
                ReportSide::A => reconciler.compute(&records, &snapshot.report_b)?,
                ReportSide::B => reconciler.compute(&snapshot.report_a, &records)?,
            };

            info!(
                report = %side,
                records = records.len(),
                report_id = %report.id,
                "Claim source replaced"
            );

            match side {
                ReportSide::A => snapshot.report_a = records,
                ReportSide::B => snapshot.report_b = records,
            }
            snapshot.report = Arc::new(report);
            Ok::<_, ReconciliationError>(Arc::clone(&snapshot.report))
        })
        .await
        .map_err(|e| ApiError::Internal(format!("Reconciliation task failed: {e}")))??;

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_reconciliation::{
        DuplicatePolicy, InMemoryClaimSource, ReconcileOptions, ReconciliationStatus,
    };
    use test_utils::ClaimRecordBuilder;

    #[tokio::test]
    async fn test_starts_empty() {
        let state = ReconciliationState::new(Reconciler::default());
        assert!(state.current().await.is_empty());
    }

    #[tokio::test]
    async fn test_replace_source_recomputes() {
        let state = ReconciliationState::new(Reconciler::default());
        let record = ClaimRecordBuilder::new("CLM001").build();

        let report = state.replace_source(ReportSide::A, vec![record.clone()]).await.unwrap();
        assert_eq!(report.records[0].status, ReconciliationStatus::Mismatched);

        let report = state.replace_source(ReportSide::B, vec![record]).await.unwrap();
        assert!(report.records[0].is_matched());
    }

    #[tokio::test]
    async fn test_old_report_survives_replacement() {
        let state = ReconciliationState::new(Reconciler::default());
        let before = state.current().await;

        state
            .replace_source(ReportSide::A, vec![ClaimRecordBuilder::new("CLM001").build()])
            .await
            .unwrap();

        assert!(before.is_empty());
        assert_eq!(state.current().await.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_replacement_keeps_previous_report() {
        let reconciler = Reconciler::new(ReconcileOptions {
            duplicate_policy: DuplicatePolicy::Reject,
        });
        let state = ReconciliationState::new(reconciler);
        let record = ClaimRecordBuilder::new("CLM001").build();
        let first = state.replace_source(ReportSide::A, vec![record.clone()]).await.unwrap();

        let result = state
            .replace_source(ReportSide::A, vec![record.clone(), record])
            .await;

        assert!(matches!(result, Err(ApiError::Rejected { .. })));
        assert_eq!(state.current().await.id, first.id);
    }

    #[tokio::test]
    async fn test_readers_see_previous_report_until_replacement_commits() {
        let state = Arc::new(ReconciliationState::new(Reconciler::default()));
        let records: Vec<_> = (0..5_000)
            .map(|i| ClaimRecordBuilder::new(format!("CLM{i:05}")).build())
            .collect();

        let writer = {
            let state = Arc::clone(&state);
            tokio::spawn(async move { state.replace_source(ReportSide::A, records).await })
        };
        let seen = state.current().await.len();
        writer.await.unwrap().unwrap();

        assert!(seen == 0 || seen == 5_000);
        assert_eq!(state.current().await.len(), 5_000);
    }

    #[tokio::test]
    async fn test_compute_detached_leaves_state_alone() {
        let state = ReconciliationState::new(Reconciler::default());
        let report = state
            .compute_detached(vec![ClaimRecordBuilder::new("CLM001").build()], vec![])
            .await
            .unwrap();

        assert_eq!(report.len(), 1);
        assert!(state.current().await.is_empty());
    }

    #[tokio::test]
    async fn test_load_from_source() {
        let source = InMemoryClaimSource::new(
            vec![ClaimRecordBuilder::new("CLM001").build()],
            vec![ClaimRecordBuilder::new("CLM002").build()],
        );
        let state = ReconciliationState::load(Reconciler::default(), &source).await.unwrap();
        assert_eq!(state.current().await.len(), 2);
    }
}
