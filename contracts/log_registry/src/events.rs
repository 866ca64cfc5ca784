//! Structured events consumed by off-chain indexers.
//!
//! Every publisher uses a short topic symbol followed by the organisation id
//! (when the event is org-scoped) so subscribers can filter per tenant.
//! The host serialises invocations, so per-organisation event order always
//! matches admission order.

#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{contracttype, symbol_short, Address, BytesN, Env, String};

use crate::types::{LogType, RegistryConfig};

// ── Event payloads ───────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfigUpdatedEvent {
    pub config: RegistryConfig,
    pub by: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PlatformAdminChangedEvent {
    pub admin: Address,
    pub by: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OrgRegisteredEvent {
    pub org_id: BytesN<32>,
    pub name: String,
    pub admin: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OrgAdminChangedEvent {
    pub org_id: BytesN<32>,
    pub admin: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OrgPauseChangedEvent {
    pub org_id: BytesN<32>,
    pub by: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GlobalPauseChangedEvent {
    pub by: Address,
    pub timestamp: u64,
}

/// Shared by `USR_REG` and `USR_UPD`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserEvent {
    pub org_id: BytesN<32>,
    pub user_id: BytesN<32>,
    pub did: String,
    pub display_name: String,
}

/// Carries the pseudonymous `user_key`, never the raw user id.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LogSavedEvent {
    pub org_id: BytesN<32>,
    pub log_id: u64,
    pub user_key: BytesN<32>,
    pub log_type: LogType,
    pub log_hash: BytesN<32>,
    pub ref_uri: String,
}

// ── Publishers ───────────────────────────────────────────────────────────────

pub fn publish_initialized(env: &Env, admin: Address) {
    let data = InitializedEvent {
        admin,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish((symbol_short!("INIT"),), data);
}

pub fn publish_config_updated(env: &Env, config: RegistryConfig, by: Address) {
    env.events()
        .publish((symbol_short!("CFG_UPD"),), ConfigUpdatedEvent { config, by });
}

pub fn publish_platform_admin_granted(env: &Env, admin: Address, by: Address) {
    env.events().publish(
        (symbol_short!("PLT_GRT"),),
        PlatformAdminChangedEvent { admin, by },
    );
}

pub fn publish_platform_admin_revoked(env: &Env, admin: Address, by: Address) {
    env.events().publish(
        (symbol_short!("PLT_REV"),),
        PlatformAdminChangedEvent { admin, by },
    );
}

pub fn publish_org_registered(env: &Env, org_id: BytesN<32>, name: String, admin: Address) {
    let topics = (symbol_short!("ORG_REG"), org_id.clone());
    env.events()
        .publish(topics, OrgRegisteredEvent { org_id, name, admin });
}

pub fn publish_org_admin_granted(env: &Env, org_id: BytesN<32>, admin: Address) {
    let topics = (symbol_short!("ADM_GRT"), org_id.clone());
    env.events()
        .publish(topics, OrgAdminChangedEvent { org_id, admin });
}

pub fn publish_org_admin_revoked(env: &Env, org_id: BytesN<32>, admin: Address) {
    let topics = (symbol_short!("ADM_REV"), org_id.clone());
    env.events()
        .publish(topics, OrgAdminChangedEvent { org_id, admin });
}

pub fn publish_org_paused(env: &Env, org_id: BytesN<32>, by: Address) {
    let topics = (symbol_short!("ORG_PAU"), org_id.clone());
    env.events()
        .publish(topics, OrgPauseChangedEvent { org_id, by });
}

pub fn publish_org_unpaused(env: &Env, org_id: BytesN<32>, by: Address) {
    let topics = (symbol_short!("ORG_UNP"), org_id.clone());
    env.events()
        .publish(topics, OrgPauseChangedEvent { org_id, by });
}

pub fn publish_global_paused(env: &Env, by: Address) {
    let data = GlobalPauseChangedEvent {
        by,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish((symbol_short!("PAUSED"),), data);
}

pub fn publish_global_unpaused(env: &Env, by: Address) {
    let data = GlobalPauseChangedEvent {
        by,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish((symbol_short!("UNPAUSED"),), data);
}

pub fn publish_user_registered(
    env: &Env,
    org_id: BytesN<32>,
    user_id: BytesN<32>,
    did: String,
    display_name: String,
) {
    let topics = (symbol_short!("USR_REG"), org_id.clone());
    let data = UserEvent {
        org_id,
        user_id,
        did,
        display_name,
    };
    env.events().publish(topics, data);
}

pub fn publish_user_updated(
    env: &Env,
    org_id: BytesN<32>,
    user_id: BytesN<32>,
    did: String,
    display_name: String,
) {
    let topics = (symbol_short!("USR_UPD"), org_id.clone());
    let data = UserEvent {
        org_id,
        user_id,
        did,
        display_name,
    };
    env.events().publish(topics, data);
}

pub fn publish_log_saved(env: &Env, event: LogSavedEvent) {
    let topics = (symbol_short!("LOG_SAV"), event.org_id.clone());
    env.events().publish(topics, event);
}
