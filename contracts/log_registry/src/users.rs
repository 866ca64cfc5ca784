use common::ttl;
use soroban_sdk::{BytesN, Env, String};

use crate::errors::RegistryError;
use crate::types::{DataKey, User};

fn user_key(org_id: &BytesN<32>, user_id: &BytesN<32>) -> DataKey {
    DataKey::User(org_id.clone(), user_id.clone())
}

pub fn user_exists(env: &Env, org_id: &BytesN<32>, user_id: &BytesN<32>) -> bool {
    env.storage().persistent().has(&user_key(org_id, user_id))
}

pub fn load_user(env: &Env, org_id: &BytesN<32>, user_id: &BytesN<32>) -> Option<User> {
    env.storage().persistent().get(&user_key(org_id, user_id))
}

fn store_user(env: &Env, user: &User) {
    let key = user_key(&user.org_id, &user.user_id);
    env.storage().persistent().set(&key, user);
    ttl::extend_persistent(env, &key);
}

pub fn create_user(
    env: &Env,
    org_id: &BytesN<32>,
    user_id: &BytesN<32>,
    did: &String,
    display_name: &String,
) -> Result<User, RegistryError> {
    if user_exists(env, org_id, user_id) {
        return Err(RegistryError::UserAlreadyExists);
    }
    let now = env.ledger().timestamp();
    let user = User {
        org_id: org_id.clone(),
        user_id: user_id.clone(),
        did: did.clone(),
        display_name: display_name.clone(),
        registered_at: now,
        updated_at: now,
    };
    store_user(env, &user);
    Ok(user)
}

/// Overwrites the mutable fields; `registered_at` is preserved.
pub fn update_user(
    env: &Env,
    org_id: &BytesN<32>,
    user_id: &BytesN<32>,
    did: &String,
    display_name: &String,
) -> Result<User, RegistryError> {
    let mut user = load_user(env, org_id, user_id).ok_or(RegistryError::UserNotFound)?;
    user.did = did.clone();
    user.display_name = display_name.clone();
    user.updated_at = env.ledger().timestamp();
    store_user(env, &user);
    Ok(user)
}
