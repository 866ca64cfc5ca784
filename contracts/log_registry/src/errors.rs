use common::CommonError;
use soroban_sdk::contracterror;

/// Registry error codes.
///
/// Codes follow the ranges documented on [`CommonError`] so that off-chain
/// tooling can classify a failure from its number alone.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum RegistryError {
    // Lifecycle (1–9)
    NotInitialized = 1,
    AlreadyInitialized = 2,

    // Authorisation (10–19)
    Unauthorized = 10,

    // Not found / duplicates (20–29)
    OrgNotFound = 20,
    UserNotFound = 21,
    LogNotFound = 22,
    OrgAlreadyExists = 23,
    UserAlreadyExists = 24,

    // Validation (30–39)
    InvalidAdmin = 30,
    ZeroHash = 31,
    EmptyName = 32,
    InvalidInput = 33,

    // Contract state (40–49)
    Paused = 40,
}

/// Coarse classification used by callers to map failures onto user-facing
/// categories (HTTP status, retry policy).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Lifecycle,
    Unauthorized,
    NotFound,
    AlreadyExists,
    InvalidArgument,
    Paused,
}

impl RegistryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RegistryError::NotInitialized | RegistryError::AlreadyInitialized => {
                ErrorKind::Lifecycle
            }
            RegistryError::Unauthorized => ErrorKind::Unauthorized,
            RegistryError::OrgNotFound
            | RegistryError::UserNotFound
            | RegistryError::LogNotFound => ErrorKind::NotFound,
            RegistryError::OrgAlreadyExists | RegistryError::UserAlreadyExists => {
                ErrorKind::AlreadyExists
            }
            RegistryError::InvalidAdmin
            | RegistryError::ZeroHash
            | RegistryError::EmptyName
            | RegistryError::InvalidInput => ErrorKind::InvalidArgument,
            RegistryError::Paused => ErrorKind::Paused,
        }
    }
}

impl From<CommonError> for RegistryError {
    fn from(e: CommonError) -> Self {
        match e {
            CommonError::NotInitialized => RegistryError::NotInitialized,
            CommonError::AlreadyInitialized => RegistryError::AlreadyInitialized,
            CommonError::AccessDenied => RegistryError::Unauthorized,
            CommonError::RecordNotFound => RegistryError::LogNotFound,
            CommonError::InvalidInput => RegistryError::InvalidInput,
            CommonError::Paused => RegistryError::Paused,
        }
    }
}
