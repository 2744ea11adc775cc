//! Time source for resource IDs

use std::fmt::Debug;

use chrono::Utc;

use crate::error::{Result, SdkError};

/// Source of the current time as nanoseconds since the Unix epoch
pub trait Clock: Send + Sync + Debug {
    fn now_nanos(&self) -> Result<i64>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_nanos(&self) -> Result<i64> {
        Utc::now()
            .timestamp_nanos_opt()
            .ok_or_else(|| SdkError::Clock("current time does not fit a nanosecond timestamp".to_string()))
    }
}
