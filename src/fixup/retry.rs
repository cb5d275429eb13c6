// src/fixup/retry.rs

//! IO error classification and the bounded retry policy for file access.

use std::io;
use std::time::Duration;

/// How an IO error on a target file should be treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoClass {
    /// The file is gone; the job is skipped silently.
    NotFound,
    /// Another process holds the file (permission / sharing conflict).
    TransientLock,
    /// Anything else; surfaced to the operator.
    Fatal,
}

/// Classify an IO error for the fixup retry loop.
pub fn classify_io_error(err: &io::Error) -> IoClass {
    #[cfg(windows)]
    {
        // ERROR_SHARING_VIOLATION / ERROR_LOCK_VIOLATION
        if matches!(err.raw_os_error(), Some(32) | Some(33)) {
            return IoClass::TransientLock;
        }
    }

    match err.kind() {
        io::ErrorKind::NotFound => IoClass::NotFound,
        io::ErrorKind::PermissionDenied
        | io::ErrorKind::WouldBlock
        | io::ErrorKind::ResourceBusy
        | io::ErrorKind::Interrupted => IoClass::TransientLock,
        _ => IoClass::Fatal,
    }
}

/// Bounded retry with exponential backoff.
///
/// Attempt `n` (0-based) that fails with a transient lock waits
/// `base_delay * 2^n`, capped at `max_delay`, before the next attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one. Always >= 1.
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 20,
            base_delay: Duration::from_millis(10),
            max_delay: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
            max_delay,
        }
    }

    /// Delay to wait after the failed attempt number `attempt` (0-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}
