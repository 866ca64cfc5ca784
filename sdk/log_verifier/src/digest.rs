//! Digests shared with the registry contract.
//!
//! Both functions reproduce exactly what the contract computes on-chain, so
//! an auditor can check an entry without trusting this crate's transport.

use sha2::{Digest, Sha256};

use crate::{LogDigest, OrgId, UserId};

/// `SHA-256(raw)`, the value anchored as `log_hash`.
pub fn hash_log(raw: &[u8]) -> LogDigest {
    Sha256::digest(raw).into()
}

/// `SHA-256(org_id ‖ user_id)`, the pseudonymous `user_key` of an entry.
pub fn user_key(org_id: &OrgId, user_id: &UserId) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(org_id);
    hasher.update(user_id);
    hasher.finalize().into()
}

/// Local check of `raw` against an anchored digest.
pub fn matches(raw: &[u8], anchored: &LogDigest) -> bool {
    hash_log(raw) == *anchored
}

pub fn to_hex(bytes: &[u8; 32]) -> String {
    hex::encode(bytes)
}
