//! Pause controller glue over [`common::pausable`].
//!
//! Two independent fail-safes guard every org-scoped write: the global flag
//! and the organisation's own flag. Either one halts the write.

use common::pausable::{self, PauseScope};
use soroban_sdk::{BytesN, Env};

use crate::errors::RegistryError;
use crate::orgs;
use crate::types::OrgState;

pub fn require_writable(env: &Env, org_id: &BytesN<32>) -> Result<(), RegistryError> {
    pausable::require_not_paused(env, &PauseScope::Scoped(org_id.clone()))?;
    Ok(())
}

pub fn require_global_writable(env: &Env) -> Result<(), RegistryError> {
    pausable::require_not_paused(env, &PauseScope::Global)?;
    Ok(())
}

pub fn set_global(env: &Env, paused: bool) -> bool {
    pausable::set_paused(env, &PauseScope::Global, paused)
}

pub fn set_org(env: &Env, org_id: &BytesN<32>, paused: bool) -> bool {
    pausable::set_paused(env, &PauseScope::Scoped(org_id.clone()), paused)
}

pub fn is_global_paused(env: &Env) -> bool {
    pausable::is_paused(env, &PauseScope::Global)
}

pub fn is_org_paused(env: &Env, org_id: &BytesN<32>) -> bool {
    pausable::is_paused(env, &PauseScope::Scoped(org_id.clone()))
}

pub fn is_effectively_paused(env: &Env, org_id: &BytesN<32>) -> bool {
    pausable::is_effectively_paused(env, org_id)
}

pub fn org_state(env: &Env, org_id: &BytesN<32>) -> OrgState {
    if !orgs::org_exists(env, org_id) {
        OrgState::Unregistered
    } else if is_effectively_paused(env, org_id) {
        OrgState::Paused
    } else {
        OrgState::Active
    }
}
