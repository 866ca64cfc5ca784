//! Retry with exponential backoff for registry submissions.

use std::fmt::Debug;
use std::time::Duration;

use serde::Deserialize;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
    pub backoff_factor: f64,
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 200,
            max_delay_ms: 5_000,
            backoff_factor: 2.0,
            jitter: true,
        }
    }
}

impl RetryConfig {
    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }

    pub fn max_delay(&self) -> Duration {
        Duration::from_millis(self.max_delay_ms)
    }
}

pub trait RetryableError {
    fn is_retryable(&self) -> bool;
}

pub(crate) fn calculate_delay(cfg: &RetryConfig, attempt: u32) -> Duration {
    let exponential = cfg.base_delay().as_secs_f64() * cfg.backoff_factor.powi(attempt as i32);
    let capped = exponential.min(cfg.max_delay().as_secs_f64());

    let delay = if cfg.jitter {
        capped * (0.5 + fastrand::f64())
    } else {
        capped
    };

    Duration::from_secs_f64(delay)
}

/// Runs `op` until it succeeds, fails permanently, or `max_attempts` is
/// reached. The closure receives the 1-based attempt number.
///
/// On exhaustion the last error is returned unchanged; callers decide how to
/// report it.
pub fn retry<T, E, F>(cfg: &RetryConfig, mut op: F) -> Result<T, E>
where
    F: FnMut(u32) -> Result<T, E>,
    E: RetryableError + Debug,
{
    let mut attempt = 0;

    loop {
        attempt += 1;
        match op(attempt) {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !err.is_retryable() {
                    return Err(err);
                }

                if attempt >= cfg.max_attempts {
                    warn!(
                        error = ?err,
                        attempt,
                        max_attempts = cfg.max_attempts,
                        "max retry attempts exhausted"
                    );
                    return Err(err);
                }

                let delay = calculate_delay(cfg, attempt - 1);
                warn!(
                    error = ?err,
                    attempt,
                    max_attempts = cfg.max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    "retrying after error"
                );
                std::thread::sleep(delay);
            }
        }
    }
}
