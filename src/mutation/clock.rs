//! Version timestamp sources.

use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

/// Source of cell version timestamps, in nanoseconds.
pub trait Clock: Send + Sync + fmt::Debug {
    /// Read the clock. Successive readings must be strictly increasing.
    fn now_nanos(&self) -> i64;
}

/// Wall-clock nanoseconds, forced strictly monotonic.
///
/// Two readings taken within the same nanosecond, or across a backwards
/// wall-clock step, still come out ordered: each reading is at least one
/// greater than the previous one.
#[derive(Debug, Default)]
pub struct SystemClock {
    last: AtomicI64,
}

impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for SystemClock {
    fn now_nanos(&self) -> i64 {
        let wall = Utc::now().timestamp_nanos_opt().unwrap_or_default();
        let mut prev = self.last.load(Ordering::Acquire);
        loop {
            let next = wall.max(prev.saturating_add(1));
            match self
                .last
                .compare_exchange_weak(prev, next, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => return next,
                Err(actual) => prev = actual,
            }
        }
    }
}

/// Deterministic clock: returns its current value, then ticks by one.
#[derive(Debug, Default)]
pub struct ManualClock {
    next: AtomicI64,
}

impl ManualClock {
    /// a clock whose first reading is `start`
    pub fn starting_at(start: i64) -> Self {
        Self {
            next: AtomicI64::new(start),
        }
    }

    /// move the clock so the next reading is `value`
    pub fn set(&self, value: i64) {
        self.next.store(value, Ordering::Release);
    }

    /// skip `delta` nanoseconds ahead
    pub fn advance(&self, delta: i64) {
        self.next.fetch_add(delta, Ordering::AcqRel);
    }

    /// the value the next reading will return
    pub fn peek(&self) -> i64 {
        self.next.load(Ordering::Acquire)
    }
}

impl Clock for ManualClock {
    fn now_nanos(&self) -> i64 {
        self.next.fetch_add(1, Ordering::AcqRel)
    }
}
