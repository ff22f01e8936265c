/*!
 * Last-request-wins sequencing.
 *
 * Every user action takes a token from a shared [`RequestSequencer`]. When
 * the work for that action finishes, its result is only kept if no newer
 * token has been issued in the meantime.
 */

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use log::debug;

/// Identifies one request; higher sequence numbers are newer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken {
    seq: u64,
}

impl RequestToken {
    /// Sequence number of this request
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// Issues request tokens and tells stale ones apart from the latest
#[derive(Debug, Clone, Default)]
pub struct RequestSequencer {
    latest: Arc<AtomicU64>,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, superseding every earlier one
    pub fn begin(&self) -> RequestToken {
        let seq = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        RequestToken { seq }
    }

    /// Whether `token` is still the most recent request
    pub fn is_current(&self, token: &RequestToken) -> bool {
        self.latest.load(Ordering::SeqCst) == token.seq
    }

    /// Keep `value` only if `token` has not been superseded
    pub fn accept<T>(&self, token: RequestToken, value: T) -> Option<T> {
        if self.is_current(&token) {
            Some(value)
        } else {
            debug!(
                "Discarding result of request #{} (latest is #{})",
                token.seq, self.latest.load(Ordering::SeqCst)
            );
            None
        }
    }
}
