//! Request-id counter.
//!
//! Every `CheckConfig` request carries an id that the host echoes back, so
//! the shell can tell the reply to its current request apart from anything
//! stale on the connection (for example after a user-initiated retry).

use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe, monotonically increasing source of request ids.
///
/// Ids start at 1 and wrap from `u64::MAX` back to 1; 0 is never handed out.
///
/// ```rust
/// use tn_core::protocol::RequestCounter;
///
/// let ids = RequestCounter::new();
/// assert_eq!(ids.next(), 1);
/// assert_eq!(ids.next(), 2);
/// ```
#[derive(Debug)]
pub struct RequestCounter {
    inner: AtomicU64,
}

impl RequestCounter {
    pub fn new() -> Self {
        Self {
            inner: AtomicU64::new(0),
        }
    }

    /// Returns the next id.
    pub fn next(&self) -> u64 {
        // Relaxed: ids only need to be unique, not to order other memory.
        let previous = self.inner.fetch_add(1, Ordering::Relaxed);
        match previous.wrapping_add(1) {
            0 => self.next(),
            id => id,
        }
    }
}

impl Default for RequestCounter {
    fn default() -> Self {
        Self::new()
    }
}
