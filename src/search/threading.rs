//! Cancellation shared between the deepening loop and its worker thread.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Debug, Default)]
struct SearchControl {
    stop: AtomicBool,
    nodes_visited: AtomicU64,
}

/// Cloneable handle; every clone observes the same stop request.
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    inner: Arc<SearchControl>,
}

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn request_stop(&self) {
        self.inner.stop.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn should_stop(&self) -> bool {
        self.inner.stop.load(Ordering::Relaxed)
    }

    /// Publishes a worker's node count so the owner can read it after a
    /// cancelled attempt, when no result comes back.
    #[inline]
    pub fn add_nodes(&self, n: u64) {
        self.inner.nodes_visited.fetch_add(n, Ordering::Relaxed);
    }

    #[inline]
    pub fn nodes_visited(&self) -> u64 {
        self.inner.nodes_visited.load(Ordering::Relaxed)
    }
}
