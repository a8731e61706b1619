//! Job completion signal (§9 design note).
//!
//! The source uses a resolvable promise with a `.catch(noop)` attached to
//! silence Node's unhandled-rejection diagnostics. Rust has no equivalent
//! diagnostic — an unawaited `Result` is simply dropped — so the "noop
//! observer" half of that pattern has no counterpart here. What remains is
//! the real requirement: a single-producer, multi-consumer, one-shot
//! notification carrying a terminal [`JobOutcome`], with cancellation
//! modeled as a distinct outcome that waiting converts to a normal return
//! rather than an error.
//!
//! Built on [`tokio::sync::watch`] rather than a `oneshot` because
//! `waitForJobCompletion` may be called more than once (it is documented
//! as idempotent) and a `oneshot::Receiver` can only be consumed once.

use std::sync::Arc;

use tokio::sync::watch;

/// Terminal outcome of a Job, as observed by [`CompletionWaiter::wait`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobOutcome {
    /// The job ran to completion successfully.
    Completed,
    /// The job terminated with an error. The error itself is not carried
    /// here — it is already mirrored onto [`crate::pipeline::manager`]'s
    /// tracked [`mcb_domain::entities::Job::error`] string field, which
    /// `wait_for_job_completion` reads back out.
    Failed,
    /// The job was cancelled, before or during execution.
    Cancelled,
}

/// The producer half: resolves the signal exactly once. Held by the
/// Pipeline Manager's job-scheduling loop.
#[derive(Clone)]
pub struct CompletionSignal {
    tx: Arc<watch::Sender<Option<JobOutcome>>>,
}

/// The consumer half: awaits the terminal outcome. Cloning a waiter (via
/// [`CompletionSignal::waiter`]) and awaiting each clone independently is
/// how multiple callers observe the same job's completion.
#[derive(Clone)]
pub struct CompletionWaiter {
    rx: watch::Receiver<Option<JobOutcome>>,
}

impl CompletionSignal {
    /// Create a fresh, unresolved signal and its first waiter.
    pub fn new() -> (Self, CompletionWaiter) {
        let (tx, rx) = watch::channel(None);
        (
            Self { tx: Arc::new(tx) },
            CompletionWaiter { rx },
        )
    }

    /// Resolve the signal with a terminal outcome. Calling this more than
    /// once simply overwrites the previously observed value; the state
    /// machine only allows one terminal transition per job, so this is
    /// never exercised in practice.
    pub fn resolve(&self, outcome: JobOutcome) {
        self.tx.send_replace(Some(outcome));
    }

    /// Obtain another waiter for this signal, for a second concurrent
    /// caller of `waitForJobCompletion`.
    pub fn waiter(&self) -> CompletionWaiter {
        CompletionWaiter {
            rx: self.tx.subscribe(),
        }
    }
}

impl CompletionWaiter {
    /// Await the terminal outcome. Safe to call after the signal has
    /// already resolved — the watch channel retains its last value.
    pub async fn wait(mut self) -> JobOutcome {
        loop {
            if let Some(outcome) = *self.rx.borrow_and_update() {
                return outcome;
            }
            if self.rx.changed().await.is_err() {
                // The sender was dropped without resolving (manager torn
                // down mid-job). Treat as cancelled rather than hanging.
                return JobOutcome::Cancelled;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn resolves_once_and_is_observed_by_all_waiters() {
        let (signal, waiter_a) = CompletionSignal::new();
        let waiter_b = signal.waiter();

        signal.resolve(JobOutcome::Completed);

        assert_eq!(waiter_a.wait().await, JobOutcome::Completed);
        assert_eq!(waiter_b.wait().await, JobOutcome::Completed);
    }

    #[tokio::test]
    async fn waiter_blocks_until_resolved() {
        let (signal, waiter) = CompletionSignal::new();
        let handle = tokio::spawn(waiter.wait());
        tokio::task::yield_now().await;
        signal.resolve(JobOutcome::Cancelled);
        assert_eq!(handle.await.unwrap(), JobOutcome::Cancelled);
    }
}
