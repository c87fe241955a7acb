//! Time-derived ID generation.
//!
//! IDs are decimal Unix-millisecond timestamps. Two IDs requested within the
//! same millisecond would collide, so the generator never hands out a value
//! less than or equal to the last one it issued.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};

/// Strictly increasing, timestamp-shaped ID source.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicI64,
}

impl IdGenerator {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last: AtomicI64::new(0),
        }
    }

    /// Next ID for something created at `now`.
    pub fn next_id<I: From<String>>(&self, now: DateTime<Utc>) -> I {
        let candidate = now.timestamp_millis();
        let previous = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(candidate.max(last + 1))
            })
            .unwrap_or_else(|last| last);
        I::from(candidate.max(previous + 1).to_string())
    }
}
