//! # Run Control
//!
//! Limits and cancellation for a live run. All of them are checked between
//! batches, so a batch that has started is always fully processed or
//! stopped by convergence.

use std::time::Duration;

use tokio::sync::watch;

/// Samples between two progress log lines.
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 10;

/// Sender side of a cancellation signal.
///
/// Cloned receivers can be handed to any number of runs; cancelling once
/// stops all of them at their next batch boundary.
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}

impl Default for CancelHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Stop conditions for a run besides convergence.
#[derive(Clone, Debug)]
pub struct RunControl {
    /// Upper bound on samples drawn from the source, malformed ones
    /// included. `None` runs until convergence.
    pub sample_budget: Option<u64>,
    /// Wall-clock limit measured from the first batch request.
    pub deadline: Option<Duration>,
    /// Accepted samples between progress log lines. `0` disables them.
    pub progress_interval: u64,
    cancel: Option<watch::Receiver<bool>>,
}

impl Default for RunControl {
    fn default() -> Self {
        Self {
            sample_budget: None,
            deadline: None,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            cancel: None,
        }
    }
}

impl RunControl {
    pub fn with_sample_budget(mut self, budget: u64) -> Self {
        self.sample_budget = Some(budget);
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_progress_interval(mut self, interval: u64) -> Self {
        self.progress_interval = interval;
        self
    }

    pub fn with_cancel(mut self, cancel: watch::Receiver<bool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|rx| *rx.borrow())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_reaches_every_subscriber() {
        let handle = CancelHandle::new();
        let a = RunControl::default().with_cancel(handle.subscribe());
        let b = a.clone();
        assert!(!a.is_cancelled());

        handle.cancel();
        assert!(a.is_cancelled());
        assert!(b.is_cancelled());
        assert!(handle.is_cancelled());
    }

    #[test]
    fn test_cancel_without_receivers_is_recorded() {
        let handle = CancelHandle::new();
        handle.cancel();
        let control = RunControl::default().with_cancel(handle.subscribe());
        assert!(control.is_cancelled());
    }

    #[test]
    fn test_defaults() {
        let control = RunControl::default();
        assert_eq!(control.sample_budget, None);
        assert_eq!(control.deadline, None);
        assert_eq!(control.progress_interval, DEFAULT_PROGRESS_INTERVAL);
        assert!(!control.is_cancelled());
    }
}
