use soroban_sdk::{BytesN, Env, String};

use crate::errors::RegistryError;
use crate::types::{DataKey, RegistryConfig};

/// Current limits, falling back to the defaults written at initialisation.
pub fn config(env: &Env) -> RegistryConfig {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .unwrap_or_else(RegistryConfig::default_limits)
}

/// A limit of zero would make every write fail.
pub fn validate_config(config: &RegistryConfig) -> Result<(), RegistryError> {
    if config.max_name_len == 0
        || config.max_did_len == 0
        || config.max_display_name_len == 0
        || config.max_ref_uri_len == 0
    {
        return Err(RegistryError::InvalidInput);
    }
    Ok(())
}

/// Organisation names must be non-empty and within `max_name_len` bytes.
pub fn validate_org_name(config: &RegistryConfig, name: &String) -> Result<(), RegistryError> {
    if name.len() == 0 {
        return Err(RegistryError::EmptyName);
    }
    if name.len() > config.max_name_len {
        return Err(RegistryError::InvalidInput);
    }
    Ok(())
}

/// The DID is mandatory; the display name may be empty.
pub fn validate_user_fields(
    config: &RegistryConfig,
    did: &String,
    display_name: &String,
) -> Result<(), RegistryError> {
    if did.len() == 0 || did.len() > config.max_did_len {
        return Err(RegistryError::InvalidInput);
    }
    if display_name.len() > config.max_display_name_len {
        return Err(RegistryError::InvalidInput);
    }
    Ok(())
}

pub fn validate_ref_uri(config: &RegistryConfig, ref_uri: &String) -> Result<(), RegistryError> {
    if ref_uri.len() == 0 || ref_uri.len() > config.max_ref_uri_len {
        return Err(RegistryError::InvalidInput);
    }
    Ok(())
}

/// The all-zero digest is reserved as "no hash".
pub fn validate_log_hash(env: &Env, log_hash: &BytesN<32>) -> Result<(), RegistryError> {
    if *log_hash == BytesN::from_array(env, &[0u8; 32]) {
        return Err(RegistryError::ZeroHash);
    }
    Ok(())
}
