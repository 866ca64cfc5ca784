//! # Log Registry storage
//!
//! Entries are keyed by `Log(org_id, log_id)` for O(1) point lookups. Ids are
//! handed out from `Organization::next_log_id`; the counter and the entry are
//! written in the same invocation, and the host commits both or neither.
//!
//! ## Digests
//!
//! | Value      | Definition                          |
//! |------------|-------------------------------------|
//! | `log_hash` | `SHA-256(raw log bytes)`            |
//! | `user_key` | `SHA-256(org_id ‖ user_id)` (64 B)  |
//!
//! Off-chain tooling recomputes both with any SHA-256 implementation.

use common::ttl;
use soroban_sdk::{Address, Bytes, BytesN, Env, String};

use crate::errors::RegistryError;
use crate::orgs;
use crate::types::{DataKey, LogEntry, LogType, Organization};

fn log_key(org_id: &BytesN<32>, log_id: u64) -> DataKey {
    DataKey::Log(org_id.clone(), log_id)
}

/// One-way pseudonym for `(org_id, user_id)`.
pub fn derive_user_key(env: &Env, org_id: &BytesN<32>, user_id: &BytesN<32>) -> BytesN<32> {
    let mut preimage = [0u8; 64];
    preimage[..32].copy_from_slice(&org_id.to_array());
    preimage[32..].copy_from_slice(&user_id.to_array());
    env.crypto()
        .sha256(&Bytes::from_array(env, &preimage))
        .to_bytes()
}

pub fn content_digest(env: &Env, raw: &Bytes) -> BytesN<32> {
    env.crypto().sha256(raw).to_bytes()
}

pub fn load_log(env: &Env, org_id: &BytesN<32>, log_id: u64) -> Option<LogEntry> {
    env.storage().persistent().get(&log_key(org_id, log_id))
}

/// Appends an entry to `org`'s sequence and persists both.
pub fn append(
    env: &Env,
    org: &mut Organization,
    user_key: BytesN<32>,
    log_type: LogType,
    log_hash: BytesN<32>,
    ref_uri: String,
    submitted_by: Address,
) -> Result<LogEntry, RegistryError> {
    let log_id = orgs::allocate_log_id(org)?;
    let entry = LogEntry {
        log_id,
        org_id: org.id.clone(),
        user_key,
        log_type,
        log_hash,
        ref_uri,
        timestamp: env.ledger().timestamp(),
        submitted_by,
    };

    let key = log_key(&org.id, log_id);
    env.storage().persistent().set(&key, &entry);
    ttl::extend_persistent(env, &key);
    orgs::store_org(env, org);

    Ok(entry)
}

/// Recomputes the digest of `raw` and compares it with the anchored one.
pub fn verify(
    env: &Env,
    org_id: &BytesN<32>,
    log_id: u64,
    raw: &Bytes,
) -> Result<bool, RegistryError> {
    let entry = load_log(env, org_id, log_id).ok_or(RegistryError::LogNotFound)?;
    Ok(content_digest(env, raw) == entry.log_hash)
}
