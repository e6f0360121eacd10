use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, Offset, SecondsFormat, Utc};
use parking_lot::Mutex;

/// Source of the current time.
///
/// Injected wherever the pipeline needs "now" so tests can pin it.
pub trait Clock: Send + Sync {
    /// Current instant.
    fn now_utc(&self) -> DateTime<Utc>;

    /// Current wall-clock time in the reporter's local zone.
    fn now_local(&self) -> NaiveDateTime;
}

/// The real system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn now_local(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A manually driven clock for tests and replays.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
    offset: FixedOffset,
}

impl FixedClock {
    /// A clock stopped at `now`, reporting local time in UTC.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
            offset: Utc.fix(),
        }
    }

    /// Report local time at the given offset from UTC.
    #[must_use]
    pub fn with_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = offset;
        self
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock() = now;
    }

    pub fn advance(&self, by: chrono::Duration) {
        let mut now = self.now.lock();
        *now += by;
    }
}

impl Clock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        *self.now.lock()
    }

    fn now_local(&self) -> NaiveDateTime {
        self.now.lock().with_timezone(&self.offset).naive_local()
    }
}

/// Initial value of the date field: local time truncated to the minute,
/// formatted `YYYY-MM-DDTHH:MM`.
pub fn default_date_time(clock: &dyn Clock) -> String {
    clock.now_local().format("%Y-%m-%dT%H:%M").to_string()
}

/// Render a submission instant as RFC 3339 with milliseconds and a `Z` suffix.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(rfc3339: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(rfc3339).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn default_date_time_truncates_to_minute() {
        let clock = FixedClock::new(at("2026-10-18T14:03:59.987Z"));
        assert_eq!(default_date_time(&clock), "2026-10-18T14:03");
    }

    #[test]
    fn default_date_time_uses_local_offset() {
        let bogota = FixedOffset::west_opt(5 * 3600).unwrap();
        let clock = FixedClock::new(at("2026-10-18T02:10:00Z")).with_offset(bogota);
        assert_eq!(default_date_time(&clock), "2026-10-17T21:10");
    }

    #[test]
    fn timestamp_has_millis_and_z() {
        assert_eq!(
            format_timestamp(at("2026-10-18T14:03:07.123456Z")),
            "2026-10-18T14:03:07.123Z"
        );
    }

    #[test]
    fn fixed_clock_advances() {
        let clock = FixedClock::new(at("2026-10-18T00:00:00Z"));
        clock.advance(chrono::Duration::minutes(90));
        assert_eq!(clock.now_utc(), at("2026-10-18T01:30:00Z"));
        clock.set(at("2027-01-01T00:00:00Z"));
        assert_eq!(default_date_time(&clock), "2027-01-01T00:00");
    }
}
