//! Deterministic clocks for tests

use std::sync::atomic::{AtomicI64, Ordering};

use crate::clock::Clock;
use crate::error::{Result, SdkError};

/// Clock stuck at one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_nanos(&self) -> Result<i64> {
        Ok(self.0)
    }
}

/// Clock advancing by a fixed step on every read
#[derive(Debug)]
pub struct SequenceClock {
    next: AtomicI64,
    step: i64,
}

impl SequenceClock {
    pub fn new(start: i64, step: i64) -> Self {
        Self {
            next: AtomicI64::new(start),
            step,
        }
    }
}

impl Clock for SequenceClock {
    fn now_nanos(&self) -> Result<i64> {
        Ok(self.next.fetch_add(self.step, Ordering::SeqCst))
    }
}

/// Clock that cannot tell the time
#[derive(Debug, Clone, Copy, Default)]
pub struct BrokenClock;

impl Clock for BrokenClock {
    fn now_nanos(&self) -> Result<i64> {
        Err(SdkError::Clock("current time does not fit a nanosecond timestamp".to_string()))
    }
}
