//! Anchoring cadence.
//!
//! The registry accepts one digest per call. Whether a log is anchored as
//! soon as it is admitted or held back until a batch of its organisation
//! fills up is decided here, outside the contract.

use crate::AnchorRequest;

/// Severity attached to a log by the producer.
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

/// A log admitted by the service but not yet anchored.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PendingLog {
    pub request: AnchorRequest,
    pub severity: Severity,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AnchorDecision {
    /// Anchor now, after anything already queued for the organisation.
    Now,
    /// Queue until the organisation's batch is full or flushed explicitly.
    Defer,
}

pub trait AnchorPolicy: Send + Sync {
    fn decide(&self, pending: &PendingLog) -> AnchorDecision;

    /// Queue depth at which deferred logs are flushed.
    fn batch_size(&self) -> usize {
        1
    }
}

/// Anchors every log as soon as it is admitted.
#[derive(Clone, Copy, Debug, Default)]
pub struct AnchorImmediately;

impl AnchorPolicy for AnchorImmediately {
    fn decide(&self, _pending: &PendingLog) -> AnchorDecision {
        AnchorDecision::Now
    }
}

/// Anchors logs at or above `threshold` immediately and batches the rest.
#[derive(Clone, Copy, Debug)]
pub struct BatchBySeverity {
    pub threshold: Severity,
    pub batch_size: usize,
}

impl BatchBySeverity {
    pub fn new(threshold: Severity, batch_size: usize) -> Self {
        Self {
            threshold,
            batch_size: batch_size.max(1),
        }
    }
}

impl AnchorPolicy for BatchBySeverity {
    fn decide(&self, pending: &PendingLog) -> AnchorDecision {
        if pending.severity >= self.threshold {
            AnchorDecision::Now
        } else {
            AnchorDecision::Defer
        }
    }

    fn batch_size(&self) -> usize {
        self.batch_size
    }
}
