//! Core types for bounded retries

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What the caller does once a retry loop runs out of attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Exhaustion {
    /// Give up on the current record and move on to the next one
    SkipRecord,

    /// Log a warning and carry on with the current record
    Warn,

    /// Fail the current record as an error
    AbortRecord,
}

/// Bounded retry policy with a fixed pause between attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first one
    pub max_attempts: u32,

    /// Pause between two attempts in milliseconds
    pub backoff_ms: u64,

    /// Terminal policy applied by the caller when attempts run out
    pub on_exhaustion: Exhaustion,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff_ms: u64, on_exhaustion: Exhaustion) -> Self {
        Self {
            max_attempts,
            backoff_ms,
            on_exhaustion,
        }
    }

    /// Waiting for exactly one table row after a search
    pub fn row_match() -> Self {
        Self::new(3, 1000, Exhaustion::SkipRecord)
    }

    /// Forcing an open dropdown closed with Escape
    pub fn escape_close() -> Self {
        Self::new(5, 1000, Exhaustion::Warn)
    }

    pub fn backoff(&self) -> Duration {
        Duration::from_millis(self.backoff_ms)
    }
}

/// Result of one attempt, as judged by the probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe<T> {
    /// Condition met, stop retrying
    Ready(T),

    /// Condition not met yet; the value is kept in case this was the last attempt
    Pending(T),
}

/// Result of a whole retry loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryOutcome<T> {
    Satisfied {
        value: T,
        attempts: u32,
    },
    Exhausted {
        last: T,
        attempts: u32,
        policy: Exhaustion,
    },
}
