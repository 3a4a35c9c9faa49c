//! # Cancellation module
//!
//! This module contains the cancellation token used to abort a long-running
//! bounding-box query. Cancellation is modeled as a small trait injected into
//! query methods rather than as global state, so a `Supercluster` stays free
//! of any synchronization primitives of its own.

use std::sync::{atomic::AtomicBool, atomic::Ordering, Arc};

use crate::SuperclusterError;

/// A token queries consult to decide whether to keep producing results.
///
/// Implementations are checked once before a query starts doing work and
/// once per produced result.
pub trait CancellationToken {
    /// Whether cancellation has been requested.
    fn is_cancelled(&self) -> bool;

    /// The error to return when cancellation has been requested.
    ///
    /// # Returns
    ///
    /// The error a cancelled query should return.
    fn cancellation_error(&self) -> SuperclusterError {
        SuperclusterError::Cancelled
    }
}

/// A token that is never cancelled.
///
/// This is the default for callers who have no need to abort a query midway.
#[derive(Clone, Copy, Debug, Default)]
pub struct NeverCancelled;

impl CancellationToken for NeverCancelled {
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// An atomic, shareable cancellation token.
///
/// Clone it freely: every clone flips the same underlying flag, so one
/// `AtomicCancellation` can be handed to several threads querying the same
/// `Supercluster` concurrently, and cancelling through any clone cancels
/// them all.
#[derive(Clone, Debug, Default)]
pub struct AtomicCancellation {
    /// Shared cancellation flag.
    flag: Arc<AtomicBool>,
}

impl AtomicCancellation {
    /// Create a new, not-yet-cancelled token.
    ///
    /// # Returns
    ///
    /// A new `AtomicCancellation` token.
    pub fn new() -> Self {
        AtomicCancellation {
            flag: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Request cancellation. Idempotent; safe to call from any thread.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }
}

impl CancellationToken for AtomicCancellation {
    fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_never_cancelled() {
        let token = NeverCancelled;

        assert!(!token.is_cancelled());
    }

    #[test]
    fn test_atomic_cancellation() {
        let token = AtomicCancellation::new();

        assert!(!token.is_cancelled());

        token.cancel();

        assert!(token.is_cancelled());
    }

    #[test]
    fn test_atomic_cancellation_shared_across_clones() {
        let token = AtomicCancellation::new();
        let clone = token.clone();

        clone.cancel();

        assert!(token.is_cancelled());
    }

    #[test]
    fn test_cancellation_error() {
        let token = AtomicCancellation::new();

        assert_eq!(token.cancellation_error(), SuperclusterError::Cancelled);
    }
}
