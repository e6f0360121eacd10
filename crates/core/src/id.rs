use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::clock::Clock;

/// Assigns identifiers to reports as they are persisted.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> u64;
}

/// Identifiers shaped like epoch milliseconds.
///
/// Two reports stamped within the same millisecond (or after the clock steps
/// backwards) get `previous + 1`, so identifiers never repeat within a process.
pub struct MillisIdGenerator {
    clock: Arc<dyn Clock>,
    last: AtomicU64,
}

impl MillisIdGenerator {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            last: AtomicU64::new(0),
        }
    }

    /// Continue after an identifier that is already in use, e.g. the largest
    /// id found in storage.
    #[must_use]
    pub fn resume_after(self, id: u64) -> Self {
        self.last.fetch_max(id, Ordering::SeqCst);
        self
    }
}

impl IdGenerator for MillisIdGenerator {
    fn next_id(&self) -> u64 {
        let now = u64::try_from(self.clock.now_utc().timestamp_millis()).unwrap_or(0);
        let bump = |last: u64| now.max(last.saturating_add(1));
        match self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| Some(bump(last)))
        {
            Ok(prev) | Err(prev) => bump(prev),
        }
    }
}

/// Plain counter, handy for deterministic tests.
#[derive(Debug)]
pub struct SequenceIdGenerator {
    next: AtomicU64,
}

impl SequenceIdGenerator {
    /// Start counting at `first`.
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }
}

impl Default for SequenceIdGenerator {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

impl IdGenerator for SequenceIdGenerator {
    fn next_id(&self) -> u64 {
        self.next.fetch_add(1, Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};

    use super::*;
    use crate::clock::FixedClock;

    fn clock_at_millis(ms: i64) -> Arc<FixedClock> {
        Arc::new(FixedClock::new(
            DateTime::<Utc>::from_timestamp_millis(ms).unwrap(),
        ))
    }

    #[test]
    fn millis_ids_follow_the_clock() {
        let clock = clock_at_millis(1_760_000_000_000);
        let ids = MillisIdGenerator::new(clock.clone());
        assert_eq!(ids.next_id(), 1_760_000_000_000);

        clock.advance(chrono::Duration::milliseconds(250));
        assert_eq!(ids.next_id(), 1_760_000_000_250);
    }

    #[test]
    fn millis_ids_never_repeat_within_a_tick() {
        let clock = clock_at_millis(1_000);
        let ids = MillisIdGenerator::new(clock.clone());
        let a = ids.next_id();
        let b = ids.next_id();
        let c = ids.next_id();
        assert_eq!((a, b, c), (1_000, 1_001, 1_002));

        // Clock going backwards must not produce a duplicate either.
        clock.advance(chrono::Duration::milliseconds(-500));
        assert_eq!(ids.next_id(), 1_003);
    }

    #[test]
    fn millis_ids_resume_after_stored_id() {
        let ids = MillisIdGenerator::new(clock_at_millis(1_000)).resume_after(5_000);
        assert_eq!(ids.next_id(), 5_001);
    }

    #[test]
    fn sequence_counts_up() {
        let ids = SequenceIdGenerator::default();
        assert_eq!(ids.next_id(), 1);
        assert_eq!(ids.next_id(), 2);
        let ids = SequenceIdGenerator::starting_at(100);
        assert_eq!(ids.next_id(), 100);
    }
}
