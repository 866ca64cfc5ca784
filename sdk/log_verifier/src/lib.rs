//! # Log Verifier
//!
//! Off-chain companion to the `log_registry` contract. It hashes raw log
//! bytes, submits anchoring requests and later recomputes digests to confirm
//! that a stored blob still matches what was anchored.
//!
//! ## Guarantees
//! - Writes are serialised per organisation: one lock per `org_id`, held
//!   across retries, so submission order equals admission order. Distinct
//!   organisations proceed in parallel.
//! - Transient failures are retried with exponential backoff; registry
//!   rejections are permanent and surface immediately.
//! - [`VerificationService::verify`] takes no lock and has no side effects.
//!
//! The registry is reached through the [`RegistryBackend`] trait.
//! [`SorobanBackend`] drives a deployed contract through its generated client.

pub mod backend;
pub mod config;
pub mod digest;
pub mod error;
pub mod policy;
pub mod retry;
pub mod service;

pub use backend::{RegistryBackend, SorobanBackend};
pub use config::VerifierConfig;
pub use error::VerifierError;
pub use log_registry::{LogType, RegistryError};
pub use policy::{AnchorDecision, AnchorImmediately, AnchorPolicy, BatchBySeverity, PendingLog, Severity};
pub use retry::{RetryConfig, RetryableError};
pub use service::VerificationService;

/// 32-byte organisation identifier.
pub type OrgId = [u8; 32];
/// 32-byte user identifier, scoped to one organisation.
pub type UserId = [u8; 32];
/// SHA-256 digest of a raw log blob.
pub type LogDigest = [u8; 32];

/// A digest ready to be anchored.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AnchorRequest {
    pub org_id: OrgId,
    pub user_id: UserId,
    pub log_type: LogType,
    pub log_hash: LogDigest,
    pub ref_uri: String,
}

/// Returned once the registry has accepted an entry.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AnchorReceipt {
    pub log_id: u64,
    pub timestamp: u64,
}
