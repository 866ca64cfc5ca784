//! Storage TTL helpers.
//!
//! Persistent entries that are never deleted (organisations, users, anchored
//! logs) must outlive the default archival window, so every write bumps the
//! entry's TTL.

use soroban_sdk::{Env, IntoVal, Val};

pub const TTL_THRESHOLD: u32 = 5_184_000;
pub const TTL_EXTEND_TO: u32 = 10_368_000;

/// Extends the time-to-live (TTL) for a persistent storage entry.
pub fn extend_persistent<K>(env: &Env, key: &K)
where
    K: IntoVal<Env, Val>,
{
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Extends the time-to-live (TTL) for instance storage.
pub fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}
