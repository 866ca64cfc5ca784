//! Shared utilities and error types for the log-anchoring contract suite.
//!
//! This crate provides:
//! - [`CommonError`] — standardised error codes reused by every contract.
//! - [`pausable`] — global and per-scope emergency halt flags.
//! - [`ttl`] — storage time-to-live helpers for persistent and instance data.
//!
//! Contract-specific errors can extend the range starting at code **100** and
//! above, ensuring no collisions with the common set.

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

use soroban_sdk::contracterror;

// ── Modules ──────────────────────────────────────────────────────────────────

pub mod pausable;
pub mod ttl;

pub use pausable::PauseScope;

// ── Shared error enum ────────────────────────────────────────────────────────

/// Standardised error codes shared by every contract in the suite.
///
/// # Code ranges
/// | Range   | Purpose                       |
/// |---------|-------------------------------|
/// | 1 – 9   | Lifecycle / initialisation    |
/// | 10 – 19 | Authentication & authorisation|
/// | 20 – 29 | Resource not found            |
/// | 30 – 39 | Validation / input            |
/// | 40 – 49 | Contract state                |
/// | 100+    | Reserved for contract-specific |
#[contracterror]
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
#[repr(u32)]
pub enum CommonError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    AccessDenied = 10,
    RecordNotFound = 20,
    InvalidInput = 30,
    // ── Contract state (40–49) ───────────────────────────────
    /// A global or scoped halt is in effect and the request was refused.
    Paused = 40,
}
