//! # Log Anchoring Registry Contract
//!
//! Multi-tenant, append-only registry of security-log digests. Each
//! organisation owns a gap-free sequence of anchored entries; anyone can later
//! check a raw log blob against its anchored digest.
//!
//! ## Components
//! | Module         | Responsibility                                         |
//! |----------------|--------------------------------------------------------|
//! | [`roles`]      | Platform-admin and per-org admin capabilities          |
//! | [`orgs`]       | Organisation records and log-id allocation             |
//! | [`users`]      | Pseudonymous per-org user directory                    |
//! | [`pause`]      | Global and per-org halt switches                       |
//! | [`logs`]       | Anchored entries, user-key derivation, verification    |
//! | [`events`]     | Event payloads for off-chain indexers                  |
//! | [`validation`] | Input limits from [`RegistryConfig`]                   |
//!
//! ## Organisation lifecycle
//! ```text
//! Unregistered ──register_org──▶ Active ◀──pause_org / unpause_org──▶ Paused
//! ```
//! There is no deletion; organisations and their history are permanent.
//!
//! Every write returns `Err` without touching storage when a guard fails, and
//! the host discards any partial state of a failed invocation.
#![no_std]

pub mod errors;
pub mod events;
pub mod logs;
pub mod orgs;
pub mod pause;
pub mod roles;
pub mod types;
pub mod users;
pub mod validation;

use common::ttl;
use soroban_sdk::{contract, contractimpl, Address, Bytes, BytesN, Env, String};

pub use errors::{ErrorKind, RegistryError};
pub use types::{
    Capability, DataKey, LogEntry, LogType, OrgState, Organization, RegistryConfig, User,
};

#[contract]
pub struct LogRegistryContract;

#[contractimpl]
impl LogRegistryContract {
    // ── Initialisation & configuration ───────────────────────────────────────

    /// Genesis: grants `admin` the platform-admin capability. Callable once.
    pub fn initialize(env: Env, admin: Address) -> Result<(), RegistryError> {
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(RegistryError::AlreadyInitialized);
        }

        admin.require_auth();

        env.storage().instance().set(&DataKey::Initialized, &true);
        env.storage()
            .instance()
            .set(&DataKey::Config, &RegistryConfig::default_limits());
        ttl::extend_instance(&env);
        roles::grant(&env, &Capability::PlatformAdmin, &admin);

        events::publish_initialized(&env, admin.clone());
        events::publish_platform_admin_granted(&env, admin.clone(), admin);

        Ok(())
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&DataKey::Initialized)
    }

    pub fn get_config(env: Env) -> RegistryConfig {
        validation::config(&env)
    }

    /// Replace the input limits. Platform admin only.
    pub fn set_config(
        env: Env,
        caller: Address,
        config: RegistryConfig,
    ) -> Result<(), RegistryError> {
        caller.require_auth();
        Self::require_initialized(&env)?;
        roles::require_platform_admin(&env, &caller)?;
        validation::validate_config(&config)?;

        env.storage().instance().set(&DataKey::Config, &config);
        ttl::extend_instance(&env);
        events::publish_config_updated(&env, config, caller);
        Ok(())
    }

    fn require_initialized(env: &Env) -> Result<(), RegistryError> {
        if !env.storage().instance().has(&DataKey::Initialized) {
            return Err(RegistryError::NotInitialized);
        }
        Ok(())
    }

    // ── Role manager ─────────────────────────────────────────────────────────

    pub fn grant_platform_admin(
        env: Env,
        caller: Address,
        identity: Address,
    ) -> Result<(), RegistryError> {
        caller.require_auth();
        Self::require_initialized(&env)?;
        roles::require_platform_admin(&env, &caller)?;

        if roles::grant(&env, &Capability::PlatformAdmin, &identity) {
            events::publish_platform_admin_granted(&env, identity, caller);
        }
        Ok(())
    }

    pub fn revoke_platform_admin(
        env: Env,
        caller: Address,
        identity: Address,
    ) -> Result<(), RegistryError> {
        caller.require_auth();
        Self::require_initialized(&env)?;
        roles::require_platform_admin(&env, &caller)?;

        if roles::revoke(&env, &Capability::PlatformAdmin, &identity) {
            events::publish_platform_admin_revoked(&env, identity, caller);
        }
        Ok(())
    }

    pub fn grant_org_admin(
        env: Env,
        caller: Address,
        org_id: BytesN<32>,
        identity: Address,
    ) -> Result<(), RegistryError> {
        caller.require_auth();
        Self::require_initialized(&env)?;
        roles::require_platform_admin(&env, &caller)?;
        orgs::require_org(&env, &org_id)?;

        if roles::grant(&env, &Capability::OrgAdmin(org_id.clone()), &identity) {
            events::publish_org_admin_granted(&env, org_id, identity);
        }
        Ok(())
    }

    pub fn revoke_org_admin(
        env: Env,
        caller: Address,
        org_id: BytesN<32>,
        identity: Address,
    ) -> Result<(), RegistryError> {
        caller.require_auth();
        Self::require_initialized(&env)?;
        roles::require_platform_admin(&env, &caller)?;
        orgs::require_org(&env, &org_id)?;

        if roles::revoke(&env, &Capability::OrgAdmin(org_id.clone()), &identity) {
            events::publish_org_admin_revoked(&env, org_id, identity);
        }
        Ok(())
    }

    pub fn has_capability(env: Env, capability: Capability, identity: Address) -> bool {
        roles::has_capability(&env, &capability, &identity)
    }

    pub fn is_platform_admin(env: Env, identity: Address) -> bool {
        roles::has_capability(&env, &Capability::PlatformAdmin, &identity)
    }

    pub fn is_org_admin(env: Env, org_id: BytesN<32>, identity: Address) -> bool {
        roles::has_capability(&env, &Capability::OrgAdmin(org_id), &identity)
    }

    // ── Organisation registry ────────────────────────────────────────────────

    /// Register an organisation and grant its first org admin.
    ///
    /// Emits `ORG_REG` followed by `ADM_GRT`.
    pub fn register_org(
        env: Env,
        caller: Address,
        org_id: BytesN<32>,
        name: String,
        initial_admin: Address,
    ) -> Result<(), RegistryError> {
        caller.require_auth();
        Self::require_initialized(&env)?;
        roles::require_platform_admin(&env, &caller)?;
        pause::require_global_writable(&env)?;
        if orgs::org_exists(&env, &org_id) {
            return Err(RegistryError::OrgAlreadyExists);
        }

        let config = validation::config(&env);
        validation::validate_org_name(&config, &name)?;
        // The registry's own address can never sign, so it stands in for the
        // null identity.
        if initial_admin == env.current_contract_address() {
            return Err(RegistryError::InvalidAdmin);
        }

        orgs::create_org(&env, &org_id, &name)?;
        roles::grant(&env, &Capability::OrgAdmin(org_id.clone()), &initial_admin);

        events::publish_org_registered(&env, org_id.clone(), name, initial_admin.clone());
        events::publish_org_admin_granted(&env, org_id, initial_admin);

        Ok(())
    }

    pub fn org_exists(env: Env, org_id: BytesN<32>) -> bool {
        orgs::org_exists(&env, &org_id)
    }

    pub fn get_org(env: Env, org_id: BytesN<32>) -> Option<Organization> {
        orgs::load_org(&env, &org_id)
    }

    pub fn org_state(env: Env, org_id: BytesN<32>) -> OrgState {
        pause::org_state(&env, &org_id)
    }

    /// Number of entries anchored for `org_id` (0 for unknown organisations).
    pub fn log_count(env: Env, org_id: BytesN<32>) -> u64 {
        orgs::load_org(&env, &org_id)
            .map(|org| org.next_log_id.saturating_sub(1))
            .unwrap_or(0)
    }

    // ── User directory ───────────────────────────────────────────────────────

    pub fn register_user(
        env: Env,
        caller: Address,
        org_id: BytesN<32>,
        user_id: BytesN<32>,
        did: String,
        display_name: String,
    ) -> Result<(), RegistryError> {
        caller.require_auth();
        Self::require_initialized(&env)?;
        roles::require_org_admin(&env, &org_id, &caller)?;
        pause::require_writable(&env, &org_id)?;
        orgs::require_org(&env, &org_id)?;
        validation::validate_user_fields(&validation::config(&env), &did, &display_name)?;

        users::create_user(&env, &org_id, &user_id, &did, &display_name)?;

        events::publish_user_registered(&env, org_id, user_id, did, display_name);
        Ok(())
    }

    pub fn update_user(
        env: Env,
        caller: Address,
        org_id: BytesN<32>,
        user_id: BytesN<32>,
        did: String,
        display_name: String,
    ) -> Result<(), RegistryError> {
        caller.require_auth();
        Self::require_initialized(&env)?;
        roles::require_org_admin(&env, &org_id, &caller)?;
        pause::require_writable(&env, &org_id)?;
        orgs::require_org(&env, &org_id)?;
        validation::validate_user_fields(&validation::config(&env), &did, &display_name)?;

        users::update_user(&env, &org_id, &user_id, &did, &display_name)?;

        events::publish_user_updated(&env, org_id, user_id, did, display_name);
        Ok(())
    }

    pub fn get_user(env: Env, org_id: BytesN<32>, user_id: BytesN<32>) -> Option<User> {
        users::load_user(&env, &org_id, &user_id)
    }

    pub fn user_exists(env: Env, org_id: BytesN<32>, user_id: BytesN<32>) -> bool {
        users::user_exists(&env, &org_id, &user_id)
    }

    // ── Pause controller ─────────────────────────────────────────────────────

    pub fn pause_global(env: Env, caller: Address) -> Result<(), RegistryError> {
        caller.require_auth();
        Self::require_initialized(&env)?;
        roles::require_platform_admin(&env, &caller)?;

        if pause::set_global(&env, true) {
            events::publish_global_paused(&env, caller);
        }
        Ok(())
    }

    pub fn unpause_global(env: Env, caller: Address) -> Result<(), RegistryError> {
        caller.require_auth();
        Self::require_initialized(&env)?;
        roles::require_platform_admin(&env, &caller)?;

        if pause::set_global(&env, false) {
            events::publish_global_unpaused(&env, caller);
        }
        Ok(())
    }

    pub fn pause_org(env: Env, caller: Address, org_id: BytesN<32>) -> Result<(), RegistryError> {
        caller.require_auth();
        Self::require_initialized(&env)?;
        roles::require_platform_admin(&env, &caller)?;
        orgs::require_org(&env, &org_id)?;

        if pause::set_org(&env, &org_id, true) {
            events::publish_org_paused(&env, org_id, caller);
        }
        Ok(())
    }

    pub fn unpause_org(
        env: Env,
        caller: Address,
        org_id: BytesN<32>,
    ) -> Result<(), RegistryError> {
        caller.require_auth();
        Self::require_initialized(&env)?;
        roles::require_platform_admin(&env, &caller)?;
        orgs::require_org(&env, &org_id)?;

        if pause::set_org(&env, &org_id, false) {
            events::publish_org_unpaused(&env, org_id, caller);
        }
        Ok(())
    }

    pub fn is_globally_paused(env: Env) -> bool {
        pause::is_global_paused(&env)
    }

    pub fn is_org_paused(env: Env, org_id: BytesN<32>) -> bool {
        pause::is_org_paused(&env, &org_id)
    }

    pub fn is_effectively_paused(env: Env, org_id: BytesN<32>) -> bool {
        pause::is_effectively_paused(&env, &org_id)
    }

    // ── Log registry ─────────────────────────────────────────────────────────

    /// Anchor a log digest and return its id within the organisation.
    pub fn save_log(
        env: Env,
        caller: Address,
        org_id: BytesN<32>,
        user_id: BytesN<32>,
        log_type: LogType,
        log_hash: BytesN<32>,
        ref_uri: String,
    ) -> Result<u64, RegistryError> {
        caller.require_auth();
        Self::require_initialized(&env)?;
        roles::require_org_admin(&env, &org_id, &caller)?;
        pause::require_writable(&env, &org_id)?;

        let mut org = orgs::require_org(&env, &org_id)?;
        if !users::user_exists(&env, &org_id, &user_id) {
            return Err(RegistryError::UserNotFound);
        }
        validation::validate_log_hash(&env, &log_hash)?;
        validation::validate_ref_uri(&validation::config(&env), &ref_uri)?;

        let user_key = logs::derive_user_key(&env, &org_id, &user_id);
        let entry = logs::append(
            &env,
            &mut org,
            user_key,
            log_type,
            log_hash,
            ref_uri,
            caller,
        )?;

        events::publish_log_saved(
            &env,
            events::LogSavedEvent {
                org_id: entry.org_id,
                log_id: entry.log_id,
                user_key: entry.user_key,
                log_type: entry.log_type,
                log_hash: entry.log_hash,
                ref_uri: entry.ref_uri,
            },
        );

        Ok(entry.log_id)
    }

    /// `None` when no entry exists; id 0 is never assigned.
    pub fn get_log(env: Env, org_id: BytesN<32>, log_id: u64) -> Option<LogEntry> {
        logs::load_log(&env, &org_id, log_id)
    }

    /// `true` iff `SHA-256(raw)` equals the anchored digest.
    pub fn verify_log(
        env: Env,
        org_id: BytesN<32>,
        log_id: u64,
        raw: Bytes,
    ) -> Result<bool, RegistryError> {
        logs::verify(&env, &org_id, log_id, &raw)
    }

    pub fn derive_user_key(env: Env, org_id: BytesN<32>, user_id: BytesN<32>) -> BytesN<32> {
        logs::derive_user_key(&env, &org_id, &user_id)
    }
}
