//! Core Kernel - Foundational types for claims reconciliation
//!
//! This crate provides the building blocks shared by the reconciliation domain
//! and the API layer:
//! - Exact decimal claim amounts
//! - String-keyed claim and policy identifiers, UUID report identifiers
//! - Port plumbing for record-source adapters

pub mod amount;
pub mod identifiers;
pub mod ports;
pub mod error;

pub use amount::{Amount, AmountError};
pub use identifiers::{ClaimKey, PolicyNumber, ReportId};
pub use ports::{DomainPort, PortError};
pub use error::CoreError;
