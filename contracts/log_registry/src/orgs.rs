use common::ttl;
use soroban_sdk::{BytesN, Env, String};

use crate::errors::RegistryError;
use crate::types::{DataKey, Organization};

fn org_key(org_id: &BytesN<32>) -> DataKey {
    DataKey::Org(org_id.clone())
}

pub fn org_exists(env: &Env, org_id: &BytesN<32>) -> bool {
    env.storage().persistent().has(&org_key(org_id))
}

pub fn load_org(env: &Env, org_id: &BytesN<32>) -> Option<Organization> {
    env.storage().persistent().get(&org_key(org_id))
}

pub fn require_org(env: &Env, org_id: &BytesN<32>) -> Result<Organization, RegistryError> {
    load_org(env, org_id).ok_or(RegistryError::OrgNotFound)
}

pub fn store_org(env: &Env, org: &Organization) {
    let key = org_key(&org.id);
    env.storage().persistent().set(&key, org);
    ttl::extend_persistent(env, &key);
}

/// Creates the organisation record with its log counter at 1.
pub fn create_org(
    env: &Env,
    org_id: &BytesN<32>,
    name: &String,
) -> Result<Organization, RegistryError> {
    if org_exists(env, org_id) {
        return Err(RegistryError::OrgAlreadyExists);
    }
    let org = Organization {
        id: org_id.clone(),
        name: name.clone(),
        next_log_id: 1,
        registered_at: env.ledger().timestamp(),
    };
    store_org(env, &org);
    Ok(org)
}

/// Hands out the organisation's next log id and advances the counter.
///
/// The caller must persist `org` in the same invocation as the entry that
/// uses the returned id.
pub fn allocate_log_id(org: &mut Organization) -> Result<u64, RegistryError> {
    let id = org.next_log_id;
    org.next_log_id = id.checked_add(1).ok_or(RegistryError::InvalidInput)?;
    Ok(id)
}
