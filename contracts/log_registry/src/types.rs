use soroban_sdk::{contracttype, Address, BytesN, String};

/// Category of the security event whose digest is anchored.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum LogType {
    Auth = 0,
    FileAccess = 1,
    Network = 2,
    Firewall = 3,
    App = 4,
    Email = 5,
    Txn = 6,
}

/// Capability classes held by identities.
///
/// Scopes are flat: holding `PlatformAdmin` does not imply any `OrgAdmin`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Capability {
    PlatformAdmin,
    OrgAdmin(BytesN<32>),
}

/// A registered tenant.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Organization {
    pub id: BytesN<32>,
    pub name: String,
    /// Id the next anchored log will receive. Starts at 1, only ever grows.
    pub next_log_id: u64,
    pub registered_at: u64,
}

/// Pseudonymous user record within one organisation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct User {
    pub org_id: BytesN<32>,
    pub user_id: BytesN<32>,
    pub did: String,
    pub display_name: String,
    pub registered_at: u64,
    pub updated_at: u64,
}

/// An anchored log digest. Never modified after it is written.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LogEntry {
    pub log_id: u64,
    pub org_id: BytesN<32>,
    pub user_key: BytesN<32>,
    pub log_type: LogType,
    pub log_hash: BytesN<32>,
    pub ref_uri: String,
    pub timestamp: u64,
    pub submitted_by: Address,
}

/// Observable lifecycle state of an organisation.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum OrgState {
    Unregistered = 0,
    Active = 1,
    Paused = 2,
}

/// String length limits applied to every write.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RegistryConfig {
    pub max_name_len: u32,
    pub max_did_len: u32,
    pub max_display_name_len: u32,
    pub max_ref_uri_len: u32,
}

impl RegistryConfig {
    pub fn default_limits() -> Self {
        RegistryConfig {
            max_name_len: 64,
            max_did_len: 256,
            max_display_name_len: 128,
            max_ref_uri_len: 512,
        }
    }
}

/// Storage keys for the contract.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Initialized,
    Config,
    Grant(Capability, Address),
    Org(BytesN<32>),
    User(BytesN<32>, BytesN<32>),
    Log(BytesN<32>, u64),
}
