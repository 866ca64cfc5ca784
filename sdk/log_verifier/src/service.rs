//! The verification service.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use crate::backend::RegistryBackend;
use crate::config::VerifierConfig;
use crate::digest::{hash_log, to_hex};
use crate::error::VerifierError;
use crate::policy::{AnchorDecision, AnchorImmediately, AnchorPolicy, PendingLog};
use crate::retry::{retry, RetryConfig, RetryableError};
use crate::{AnchorReceipt, AnchorRequest, LogType, OrgId, UserId};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Hashes, anchors and verifies logs against a [`RegistryBackend`].
///
/// Shareable across threads when the backend is `Sync`.
pub struct VerificationService<B, P = AnchorImmediately> {
    backend: B,
    policy: P,
    retry: RetryConfig,
    batch_size: usize,
    org_locks: Mutex<HashMap<OrgId, Arc<Mutex<()>>>>,
    queues: Mutex<HashMap<OrgId, VecDeque<PendingLog>>>,
}

impl<B: RegistryBackend> VerificationService<B> {
    pub fn new(backend: B, config: VerifierConfig) -> Result<Self, VerifierError> {
        Self::with_policy(backend, config, AnchorImmediately)
    }
}

impl<B: RegistryBackend, P: AnchorPolicy> VerificationService<B, P> {
    pub fn with_policy(backend: B, config: VerifierConfig, policy: P) -> Result<Self, VerifierError> {
        config.validate()?;
        Ok(Self {
            backend,
            policy,
            batch_size: config.batch_size,
            retry: config.retry,
            org_locks: Mutex::new(HashMap::new()),
            queues: Mutex::new(HashMap::new()),
        })
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Queue depth at which deferred logs of one organisation are flushed:
    /// the policy's batch size, capped by the configured one.
    pub fn batch_size(&self) -> usize {
        self.policy.batch_size().min(self.batch_size)
    }

    fn org_lock(&self, org_id: &OrgId) -> Arc<Mutex<()>> {
        Arc::clone(lock(&self.org_locks).entry(*org_id).or_default())
    }

    /// Anchors `request` right away, bypassing the cadence queue.
    pub fn anchor(&self, request: AnchorRequest) -> Result<AnchorReceipt, VerifierError> {
        let org_lock = self.org_lock(&request.org_id);
        let _guard = lock(&org_lock);
        self.submit_locked(&request)
    }

    /// Hashes `raw` and anchors the digest.
    pub fn anchor_raw(
        &self,
        org_id: OrgId,
        user_id: UserId,
        log_type: LogType,
        raw: &[u8],
        ref_uri: impl Into<String>,
    ) -> Result<AnchorReceipt, VerifierError> {
        self.anchor(AnchorRequest {
            org_id,
            user_id,
            log_type,
            log_hash: hash_log(raw),
            ref_uri: ref_uri.into(),
        })
    }

    /// Admits a log through the anchoring policy.
    ///
    /// Returns the receipts of every entry anchored by this call, in
    /// admission order; empty when the log was deferred.
    pub fn submit(&self, pending: PendingLog) -> Result<Vec<AnchorReceipt>, VerifierError> {
        let org_id = pending.request.org_id;
        let org_lock = self.org_lock(&org_id);
        let _guard = lock(&org_lock);

        let decision = self.policy.decide(&pending);
        let batch = {
            let mut queues = lock(&self.queues);
            let queue = queues.entry(org_id).or_default();
            queue.push_back(pending);
            if decision == AnchorDecision::Now || queue.len() >= self.batch_size() {
                queue.drain(..).collect()
            } else {
                debug!(org = %to_hex(&org_id), queued = queue.len(), "log deferred");
                Vec::new()
            }
        };

        self.drain_locked(&org_id, batch)
    }

    /// Anchors everything queued for `org_id`.
    pub fn flush(&self, org_id: &OrgId) -> Result<Vec<AnchorReceipt>, VerifierError> {
        let org_lock = self.org_lock(org_id);
        let _guard = lock(&org_lock);

        let batch = lock(&self.queues)
            .get_mut(org_id)
            .map(|queue| queue.drain(..).collect())
            .unwrap_or_default();
        self.drain_locked(org_id, batch)
    }

    pub fn pending_count(&self, org_id: &OrgId) -> usize {
        lock(&self.queues).get(org_id).map_or(0, VecDeque::len)
    }

    /// Recomputes `SHA-256(raw)` on the registry side and compares it with
    /// the anchored digest. Lock-free and side-effect free.
    pub fn verify(&self, org_id: &OrgId, log_id: u64, raw: &[u8]) -> Result<bool, VerifierError> {
        let matches = retry(&self.retry, |attempt| {
            debug!(org = %to_hex(org_id), log_id, attempt, "verifying log");
            self.backend.verify_log(org_id, log_id, raw)
        })
        .map_err(|err| self.give_up(err))?;

        if matches {
            info!(org = %to_hex(org_id), log_id, "log verified");
        } else {
            warn!(org = %to_hex(org_id), log_id, "log does not match its anchored digest");
        }
        Ok(matches)
    }

    /// Anchors `batch` in order. The caller holds the org lock.
    ///
    /// On failure the entries not yet anchored go back to the front of the
    /// queue, except one the registry rejected outright.
    fn drain_locked(
        &self,
        org_id: &OrgId,
        batch: Vec<PendingLog>,
    ) -> Result<Vec<AnchorReceipt>, VerifierError> {
        let mut receipts = Vec::with_capacity(batch.len());
        let mut remaining = batch.into_iter();

        while let Some(pending) = remaining.next() {
            match self.submit_locked(&pending.request) {
                Ok(receipt) => receipts.push(receipt),
                Err(err) => {
                    let mut queues = lock(&self.queues);
                    let queue = queues.entry(*org_id).or_default();
                    for unsent in remaining.by_ref().rev() {
                        queue.push_front(unsent);
                    }
                    if !matches!(err, VerifierError::Rejected(_)) {
                        queue.push_front(pending);
                    }
                    return Err(err);
                }
            }
        }

        Ok(receipts)
    }

    fn submit_locked(&self, request: &AnchorRequest) -> Result<AnchorReceipt, VerifierError> {
        let org = to_hex(&request.org_id);
        let result = retry(&self.retry, |attempt| {
            debug!(org = %org, attempt, "submitting log digest");
            self.backend.save_log(request)
        });

        match result {
            Ok(receipt) => {
                info!(org = %org, log_id = receipt.log_id, "log anchored");
                Ok(receipt)
            }
            Err(err) => {
                if let VerifierError::Rejected(rejected) = &err {
                    warn!(org = %org, error = ?rejected, "registry rejected log");
                }
                Err(self.give_up(err))
            }
        }
    }

    fn give_up(&self, err: VerifierError) -> VerifierError {
        if err.is_retryable() {
            VerifierError::RetriesExhausted {
                attempts: self.retry.max_attempts,
                last: err.to_string(),
            }
        } else {
            err
        }
    }
}
