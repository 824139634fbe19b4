//! Cooperative cancellation and wall-clock limits for long solves.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::solution::Termination;

/// Shared cancellation flag. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Stop conditions checked before each iteration (or generation).
#[derive(Debug, Clone, Default)]
pub struct SolveControl {
    cancel: Option<CancelFlag>,
    deadline: Option<Instant>,
}

impl SolveControl {
    /// Run until done.
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn with_cancel(mut self, flag: CancelFlag) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// `Some(reason)` when work must stop now.
    pub fn check(&self) -> Option<Termination> {
        if self.cancel.as_ref().is_some_and(CancelFlag::is_cancelled) {
            return Some(Termination::Cancelled);
        }
        if self.deadline.is_some_and(|d| Instant::now() >= d) {
            return Some(Termination::TimedOut);
        }
        None
    }
}
