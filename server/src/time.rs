//! Time source abstraction for token issuance and expiry checks.
//!
//! Token timestamps (`iat`, `exp`) are whole seconds since the Unix epoch, so
//! the trait speaks in seconds. Production code uses the system clock; tests
//! swap in a manually advanced source so expiry can be exercised without
//! sleeping.

use std::time::{SystemTime, UNIX_EPOCH};

/// Abstraction over the current wall-clock time.
///
/// Implementations must be shareable across request tasks.
pub trait TimeSource: Send + Sync {
    /// Get the current time in seconds since Unix epoch.
    fn now_secs(&self) -> u64;
}

/// Real time source using the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now_secs(&self) -> u64 {
        // duration_since(UNIX_EPOCH) only fails if system time is before 1970.
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |duration| duration.as_secs())
    }
}
