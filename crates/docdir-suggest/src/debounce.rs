//! A cancellable, sequence-numbered debouncer.
//!
//! Each `schedule` call:
//!
//! 1. cancels the timer of the previously scheduled task, if it has not fired;
//! 2. takes the next sequence number;
//! 3. spawns a task that waits out the quiet period, runs the work, and sends
//!    the result only if no newer task was scheduled in the meantime.
//!
//! A task whose timer already fired is *not* interrupted: its request is in
//! flight and is left to finish. Its result is dropped on completion because
//! its sequence number is no longer the latest. Receivers should still
//! re-check with [`Debouncer::is_current`], since a newer schedule can happen
//! between the send and the receive.

use std::{
    future::Future,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};

use tokio::{runtime::Handle, sync::mpsc::UnboundedSender};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// A result tagged with the sequence number of the request that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequenced<T> {
    pub sequence: u64,
    pub value: T,
}

pub struct Debouncer {
    delay: Duration,
    handle: Handle,
    latest: Arc<AtomicU64>,
    pending: Option<CancellationToken>,
}

impl Debouncer {
    /// Create a debouncer that spawns onto `handle`.
    pub fn new(delay: Duration, handle: Handle) -> Self {
        Self {
            delay,
            handle,
            latest: Arc::new(AtomicU64::new(0)),
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Sequence number of the most recent schedule (0 before the first).
    pub fn latest(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }

    pub fn is_current(&self, sequence: u64) -> bool {
        sequence == self.latest()
    }

    /// Schedule `work` after the quiet period, replacing any pending timer.
    /// Returns the sequence number assigned to this request.
    pub fn schedule<F, Fut, T>(&mut self, work: F, results: UnboundedSender<Sequenced<T>>) -> u64
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        self.cancel_timer();

        let sequence = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let token = CancellationToken::new();
        self.pending = Some(token.clone());

        let delay = self.delay;
        let latest = Arc::clone(&self.latest);

        self.handle.spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    debug!(sequence, "debounce timer cancelled");
                    return;
                }
                _ = tokio::time::sleep(delay) => {}
            }

            let value = work().await;

            if latest.load(Ordering::SeqCst) != sequence {
                debug!(sequence, "discarding stale debounced result");
                return;
            }
            // The receiver is gone when the widget was dropped; nothing to do.
            let _ = results.send(Sequenced { sequence, value });
        });

        sequence
    }

    /// Cancel the pending timer without invalidating in-flight work.
    pub fn cancel_timer(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
    }

    /// Cancel the pending timer and make every earlier request stale.
    pub fn invalidate(&mut self) {
        self.cancel_timer();
        self.latest.fetch_add(1, Ordering::SeqCst);
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}
