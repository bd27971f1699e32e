use std::sync::atomic::{AtomicU64, Ordering};

use crate::auth::UserRecord;
use crate::time::TimeSource;
use crate::user_store::InMemoryUserStore;

/// A time source that only moves when told to.
///
/// Uses an atomic so it can be shared with request handlers running on a
/// multi-threaded runtime.
#[derive(Debug)]
pub struct ManualTimeSource {
    current_secs: AtomicU64,
}

impl ManualTimeSource {
    #[must_use]
    pub const fn new(initial_secs: u64) -> Self {
        Self {
            current_secs: AtomicU64::new(initial_secs),
        }
    }

    pub fn set(&self, secs: u64) {
        self.current_secs.store(secs, Ordering::SeqCst);
    }

    pub fn advance(&self, secs: u64) {
        self.current_secs.fetch_add(secs, Ordering::SeqCst);
    }
}

impl TimeSource for ManualTimeSource {
    fn now_secs(&self) -> u64 {
        self.current_secs.load(Ordering::SeqCst)
    }
}

/// Store seeded with alice (`hunter2`) and bob (`correct horse`).
#[allow(clippy::expect_used)]
pub fn alice_store() -> InMemoryUserStore {
    InMemoryUserStore::from_records([
        UserRecord::new("alice@example.com", "hunter2", "user-alice").with_display_name("alice"),
        UserRecord::new("bob@example.com", "correct horse", "user-bob"),
    ])
    .expect("seed identifiers are unique")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_time_source() {
        let time = ManualTimeSource::new(1000);
        assert_eq!(time.now_secs(), 1000);

        time.advance(5);
        assert_eq!(time.now_secs(), 1005);

        time.set(42);
        assert_eq!(time.now_secs(), 42);
    }
}
