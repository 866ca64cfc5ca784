//! # Role Manager
//!
//! Capabilities are stored as a flat membership map:
//!
//! ```text
//! Grant(PlatformAdmin, addr)      → true
//! Grant(OrgAdmin(org_id), addr)   → true
//! ```
//!
//! There is no inheritance between scopes: a platform admin manages
//! organisations and grants, but cannot write users or logs for an
//! organisation unless it also holds that organisation's `OrgAdmin`.
//! Revocation deletes the entry, so absence always means "not held".

use common::ttl;
use soroban_sdk::{Address, BytesN, Env};

use crate::errors::RegistryError;
use crate::types::{Capability, DataKey};

fn grant_key(capability: &Capability, identity: &Address) -> DataKey {
    DataKey::Grant(capability.clone(), identity.clone())
}

pub fn has_capability(env: &Env, capability: &Capability, identity: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&grant_key(capability, identity))
        .unwrap_or(false)
}

/// Grants `capability` to `identity`. Returns `false` if it was already held.
pub fn grant(env: &Env, capability: &Capability, identity: &Address) -> bool {
    if has_capability(env, capability, identity) {
        return false;
    }
    let key = grant_key(capability, identity);
    env.storage().persistent().set(&key, &true);
    ttl::extend_persistent(env, &key);
    true
}

/// Revokes `capability` from `identity`. Returns `false` if it was not held.
pub fn revoke(env: &Env, capability: &Capability, identity: &Address) -> bool {
    if !has_capability(env, capability, identity) {
        return false;
    }
    env.storage()
        .persistent()
        .remove(&grant_key(capability, identity));
    true
}

pub fn require_capability(
    env: &Env,
    capability: &Capability,
    identity: &Address,
) -> Result<(), RegistryError> {
    if !has_capability(env, capability, identity) {
        return Err(RegistryError::Unauthorized);
    }
    ttl::extend_persistent(env, &grant_key(capability, identity));
    Ok(())
}

pub fn require_platform_admin(env: &Env, caller: &Address) -> Result<(), RegistryError> {
    require_capability(env, &Capability::PlatformAdmin, caller)
}

pub fn require_org_admin(
    env: &Env,
    org_id: &BytesN<32>,
    caller: &Address,
) -> Result<(), RegistryError> {
    require_capability(env, &Capability::OrgAdmin(org_id.clone()), caller)
}
