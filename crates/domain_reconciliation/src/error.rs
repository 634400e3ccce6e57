//! Reconciliation domain errors

use thiserror::Error;

use core_kernel::{ClaimKey, PortError};
use crate::record::ReportSide;

/// Errors that can occur while producing a reconciliation report
#[derive(Debug, Error)]
pub enum ReconciliationError {
    #[error("Duplicate claim ids in {side}: {}", join_ids(.claim_ids))]
    DuplicateClaimIds {
        side: ReportSide,
        claim_ids: Vec<ClaimKey>,
    },

    #[error("Claim source error: {0}")]
    Source(#[from] PortError),
}

fn join_ids(ids: &[ClaimKey]) -> String {
    ids.iter().map(ClaimKey::as_str).collect::<Vec<_>>().join(", ")
}
