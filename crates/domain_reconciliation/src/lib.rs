//! Claims Report Reconciliation Domain
//!
//! This crate compares two independently produced claim reports (Report A and
//! Report B) keyed by claim identifier and classifies every identifier as
//! matched or mismatched, with the discrepant fields listed in a fixed order.
//!
//! # Flow
//!
//! ```text
//! Report A ─┐                                   ┌─> StatusTally
//!           ├─> Reconciler ─> ReconciliationReport ─┼─> MismatchHistogram
//! Report B ─┘                                   └─> ReportFilter
//! ```
//!
//! The reconciler is a pure function of its two inputs. Callers recompute the
//! whole report whenever either input changes.

pub mod record;
pub mod report;
pub mod reconciler;
pub mod aggregates;
pub mod filter;
pub mod ports;
pub mod error;

pub use record::{ClaimRecord, ClaimStatus, ReportSide};
pub use report::{
    Field, SideFields, ReconciledRecord, ReconciliationReport, ReconciliationStatus,
    MismatchLabel, DuplicateClaim, DuplicateSummary, ABSENT_SENTINEL,
};
pub use reconciler::{reconcile, compare_records, Reconciler, ReconcileOptions, DuplicatePolicy};
pub use aggregates::{mismatch_types_present, StatusTally, MismatchHistogram, ReconciliationSummary};
pub use filter::ReportFilter;
pub use ports::{load_and_reconcile, ClaimSourcePort, InMemoryClaimSource, JsonFileClaimSource};
pub use error::ReconciliationError;
