//! # Fibonacci Backoff
//!
//! Progressive retry intervals for hard reconcile errors.
//!
//! The sequence follows Fibonacci from the minimum and is capped at the
//! maximum: with 5s/300s that is 5, 5, 10, 15, 25, 40, 65, 105, 170, 275, 300, ...

use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FibonacciBackoff {
    min_secs: u64,
    max_secs: u64,
    current: u64,
    next: u64,
    attempts: u32,
}

impl FibonacciBackoff {
    pub fn new(min_secs: u64, max_secs: u64) -> Self {
        let min_secs = min_secs.max(1);
        let max_secs = max_secs.max(min_secs);
        Self {
            min_secs,
            max_secs,
            current: min_secs,
            next: min_secs,
            attempts: 0,
        }
    }

    /// Return the next interval and advance the sequence
    pub fn next_backoff(&mut self) -> Duration {
        let value = self.current.min(self.max_secs);
        if self.current < self.max_secs {
            let following = self.current.saturating_add(self.next);
            self.current = self.next;
            self.next = following;
        }
        self.attempts = self.attempts.saturating_add(1);
        Duration::from_secs(value)
    }

    /// Number of intervals handed out since the last reset
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn reset(&mut self) {
        self.current = self.min_secs;
        self.next = self.min_secs;
        self.attempts = 0;
    }
}
