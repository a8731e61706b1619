//! Cooperative cancellation token (§9 design note): a shared flag the
//! scraper polls and the per-chunk progress callback checks. Deliberately
//! independent of any async runtime — just an atomic flag behind an
//! `Arc`, cloned cheaply to every holder.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A cooperative cancellation flag. Cloning shares the same underlying
/// flag; cancelling through any clone is observed by all.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a fresh, un-cancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}
