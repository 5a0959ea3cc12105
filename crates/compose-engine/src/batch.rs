//! Countdown barrier between the render and capture phases.
//!
//! Capture must not start until every card in the batch has rendered.
//! Arrivals are counted explicitly; readiness is arrivals reaching the
//! expected count, never a timer.

use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::Notify;

/// Tracks render completions for one batch of cards.
#[derive(Debug)]
pub struct RenderBatch {
    expected: usize,
    arrived: AtomicUsize,
    notify: Notify,
}

impl RenderBatch {
    /// Create a barrier expecting `expected` render completions.
    pub fn new(expected: usize) -> Self {
        Self {
            expected,
            arrived: AtomicUsize::new(0),
            notify: Notify::new(),
        }
    }

    /// Record one render completion. Returns the arrival count so far.
    pub fn mark_rendered(&self) -> usize {
        let arrived = self.arrived.fetch_add(1, Ordering::SeqCst) + 1;
        if arrived >= self.expected {
            self.notify.notify_waiters();
        }
        arrived
    }

    /// Number of cards expected in this batch.
    pub fn expected(&self) -> usize {
        self.expected
    }

    /// Number of render completions recorded so far.
    pub fn arrived(&self) -> usize {
        self.arrived.load(Ordering::SeqCst)
    }

    /// Whether every expected card has rendered.
    pub fn is_ready(&self) -> bool {
        self.arrived() >= self.expected
    }

    /// Wait until every expected card has rendered. An empty batch is
    /// ready immediately.
    pub async fn wait_ready(&self) {
        loop {
            let notified = self.notify.notified();
            if self.is_ready() {
                return;
            }
            notified.await;
        }
    }
}
