//! Cooperative cancellation token checked between per-post iterations.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Something a long-running pipeline can poll for a cancellation request.
pub trait Cancellable: Send + Sync {
    fn is_cancelled(&self) -> bool;

    fn cancel(&self);
}

/// Shared flag; clones observe the same state.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Cancellable for CancellationToken {
    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_cancellation() {
        let token = CancellationToken::new();
        let observer = token.clone();
        assert!(!observer.is_cancelled());
        token.cancel();
        assert!(observer.is_cancelled());
    }
}
