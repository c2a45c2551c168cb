use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use tokio::sync::{Mutex, MutexGuard};

use crate::models::ConnectionStatus;

/// Mutable routing state shared by the dispatcher and the connection manager.
///
/// Flags and counters are atomics so status can be read without awaiting.
/// Anything that health-checks or rotates endpoints must hold the routing lock for
/// the whole operation, so concurrent calls cannot skip or repeat a rotation.
#[derive(Debug)]
pub struct ClientSession {
    connected: AtomicBool,
    verified: AtomicBool,
    active_endpoint: AtomicUsize,
    next_request_id: AtomicU64,
    routing: Mutex<()>,
}

impl Default for ClientSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientSession {
    pub fn new() -> Self {
        Self {
            connected: AtomicBool::new(false),
            verified: AtomicBool::new(false),
            active_endpoint: AtomicUsize::new(0),
            next_request_id: AtomicU64::new(1),
            routing: Mutex::new(()),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    /// True only when the last connect found an endpoint that answered
    pub fn is_verified(&self) -> bool {
        self.verified.load(Ordering::SeqCst)
    }

    pub fn active_endpoint(&self) -> usize {
        self.active_endpoint.load(Ordering::SeqCst)
    }

    pub fn status(&self) -> ConnectionStatus {
        match (self.is_connected(), self.is_verified()) {
            (false, _) => ConnectionStatus::Disconnected,
            (true, true) => ConnectionStatus::Live,
            (true, false) => ConnectionStatus::Demo,
        }
    }

    /// Peek at the id the next transmission will carry
    pub fn peek_request_id(&self) -> u64 {
        self.next_request_id.load(Ordering::SeqCst)
    }

    pub(crate) fn set_active_endpoint(&self, index: usize) {
        self.active_endpoint.store(index, Ordering::SeqCst);
    }

    pub(crate) fn next_request_id(&self) -> u64 {
        self.next_request_id.fetch_add(1, Ordering::SeqCst)
    }

    pub(crate) fn mark_connected(&self, verified: bool) {
        self.verified.store(verified, Ordering::SeqCst);
        self.connected.store(true, Ordering::SeqCst);
    }

    pub(crate) fn mark_disconnected(&self) {
        self.connected.store(false, Ordering::SeqCst);
        self.verified.store(false, Ordering::SeqCst);
    }

    pub(crate) async fn lock_routing(&self) -> MutexGuard<'_, ()> {
        self.routing.lock().await
    }
}
