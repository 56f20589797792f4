//! Pending-operation registry
//!
//! One slot per [`OperationKind`], each holding at most one completion
//! channel. Registering checks and fills the slot under the slot's own lock,
//! so two same-kind calls can never both be pending while calls of different
//! kinds never contend.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use log::debug;
use tokio::sync::oneshot;

use crate::error::WechatError;
use crate::types::{AuthResponse, InvoiceCard, OperationKind};

type Completion<T> = (u64, oneshot::Sender<Result<T, WechatError>>);

/// Completion handle returned to the caller that registered an operation.
///
/// Dropping the handle before a result arrives frees the slot, so a caller
/// that stops waiting never leaves its kind blocked.
#[derive(Debug)]
#[must_use = "a pending operation resolves only when awaited"]
pub struct PendingOperation<'a, T> {
    slot: &'a Slot<T>,
    id: u64,
    receiver: oneshot::Receiver<Result<T, WechatError>>,
}

impl<T> PendingOperation<'_, T> {
    pub fn kind(&self) -> OperationKind {
        self.slot.kind
    }

    /// Registration number, unique per slot.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Wait for the outcome delivered through the registry.
    pub async fn wait(mut self) -> Result<T, WechatError> {
        match (&mut self.receiver).await {
            Ok(result) => result,
            Err(_) => Err(WechatError::RequestFailed),
        }
    }
}

impl<T> Drop for PendingOperation<'_, T> {
    fn drop(&mut self) {
        if self.slot.release(self.id) {
            debug!(
                "[WechatBridge] {} operation #{} abandoned before it resolved",
                self.slot.kind, self.id
            );
        }
    }
}

/// A single-occupancy completion slot.
#[derive(Debug)]
pub struct Slot<T> {
    kind: OperationKind,
    next_id: AtomicU64,
    completion: Mutex<Option<Completion<T>>>,
}

impl<T> Slot<T> {
    fn new(kind: OperationKind) -> Self {
        Self {
            kind,
            next_id: AtomicU64::new(1),
            completion: Mutex::new(None),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<Completion<T>>> {
        self.completion
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_pending(&self) -> bool {
        self.lock().is_some()
    }

    /// Fill the slot, failing with `OperationInProgress` if it is taken.
    pub fn register(&self) -> Result<PendingOperation<'_, T>, WechatError> {
        let mut completion = self.lock();
        if completion.is_some() {
            return Err(WechatError::OperationInProgress(self.kind));
        }
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (sender, receiver) = oneshot::channel();
        *completion = Some((id, sender));
        debug!("[WechatBridge] registered pending {} operation #{}", self.kind, id);
        Ok(PendingOperation {
            slot: self,
            id,
            receiver,
        })
    }

    /// Clear the slot and deliver `result`.
    ///
    /// Returns `false` when nothing was pending.
    pub fn complete(&self, result: Result<T, WechatError>) -> bool {
        let Some(completion) = self.lock().take() else {
            return false;
        };
        self.deliver(completion, result);
        true
    }

    /// Like [`complete`](Self::complete), but only if the slot still holds
    /// registration `id`.
    pub fn complete_if(&self, id: u64, result: Result<T, WechatError>) -> bool {
        let Some(completion) = self.take_if(id) else {
            return false;
        };
        self.deliver(completion, result);
        true
    }

    /// Clear registration `id` without delivering anything.
    fn release(&self, id: u64) -> bool {
        self.take_if(id).is_some()
    }

    fn take_if(&self, id: u64) -> Option<Completion<T>> {
        let mut slot = self.lock();
        match slot.as_ref() {
            Some((current, _)) if *current == id => slot.take(),
            _ => None,
        }
    }

    fn deliver(&self, (id, sender): Completion<T>, result: Result<T, WechatError>) {
        debug!(
            "[WechatBridge] completing {} operation #{} (ok={})",
            self.kind,
            id,
            result.is_ok()
        );
        // A dropped receiver means the caller stopped waiting; the slot is
        // free either way.
        let _ = sender.send(result);
    }
}

/// All pending-operation slots.
#[derive(Debug)]
pub struct PendingRegistry {
    pub auth: Slot<AuthResponse>,
    pub share: Slot<()>,
    pub payment: Slot<()>,
    pub mini_program: Slot<Option<String>>,
    pub invoice: Slot<Vec<InvoiceCard>>,
}

impl Default for PendingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PendingRegistry {
    pub fn new() -> Self {
        Self {
            auth: Slot::new(OperationKind::Auth),
            share: Slot::new(OperationKind::Share),
            payment: Slot::new(OperationKind::Payment),
            mini_program: Slot::new(OperationKind::MiniProgram),
            invoice: Slot::new(OperationKind::Invoice),
        }
    }

    pub fn is_pending(&self, kind: OperationKind) -> bool {
        match kind {
            OperationKind::Auth => self.auth.is_pending(),
            OperationKind::Share => self.share.is_pending(),
            OperationKind::Payment => self.payment.is_pending(),
            OperationKind::MiniProgram => self.mini_program.is_pending(),
            OperationKind::Invoice => self.invoice.is_pending(),
        }
    }

    /// Fail-fast single-flight check.
    pub fn ensure_idle(&self, kind: OperationKind) -> Result<(), WechatError> {
        if self.is_pending(kind) {
            return Err(WechatError::OperationInProgress(kind));
        }
        Ok(())
    }

    /// Reject whatever is pending for `kind`.
    pub fn fail(&self, kind: OperationKind, error: WechatError) -> bool {
        match kind {
            OperationKind::Auth => self.auth.complete(Err(error)),
            OperationKind::Share => self.share.complete(Err(error)),
            OperationKind::Payment => self.payment.complete(Err(error)),
            OperationKind::MiniProgram => self.mini_program.complete(Err(error)),
            OperationKind::Invoice => self.invoice.complete(Err(error)),
        }
    }
}
