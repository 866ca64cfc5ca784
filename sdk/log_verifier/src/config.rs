//! Verifier configuration.
//!
//! ```toml
//! batch_size = 16
//!
//! [retry]
//! max_attempts = 5
//! base_delay_ms = 100
//! max_delay_ms = 2000
//! backoff_factor = 2.0
//! jitter = true
//! ```
//!
//! Every key is optional; missing keys take their defaults.

use serde::Deserialize;

use crate::error::VerifierError;
use crate::retry::RetryConfig;

const DEFAULT_BATCH_SIZE: usize = 16;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct VerifierConfig {
    pub retry: RetryConfig,
    /// Upper bound on the queue depth at which deferred logs of one
    /// organisation are flushed; the anchoring policy may flush earlier.
    pub batch_size: usize,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            retry: RetryConfig::default(),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl VerifierConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, VerifierError> {
        let config: VerifierConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), VerifierError> {
        let retry = &self.retry;
        if retry.max_attempts == 0 {
            return Err(VerifierError::Config(
                "retry.max_attempts must be at least 1".to_string(),
            ));
        }
        if retry.backoff_factor.is_nan() || retry.backoff_factor < 1.0 {
            return Err(VerifierError::Config(format!(
                "retry.backoff_factor must be >= 1.0, got {}",
                retry.backoff_factor
            )));
        }
        if retry.base_delay_ms > retry.max_delay_ms {
            return Err(VerifierError::Config(format!(
                "retry.base_delay_ms ({}) exceeds retry.max_delay_ms ({})",
                retry.base_delay_ms, retry.max_delay_ms
            )));
        }
        if self.batch_size == 0 {
            return Err(VerifierError::Config(
                "batch_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
