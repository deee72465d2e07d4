//! Event timing classification.
//!
//! Every view that needs "live now" badges, upcoming/past filters, or
//! sorting by recency goes through this one pure function, so the
//! boundary behavior is identical everywhere and testable on its own.

use chrono::{DateTime, Utc};

/// Where an event sits relative to a reference instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventTiming {
    /// Has not started yet.
    Upcoming,
    /// Happening right now (start and end are inclusive).
    Ongoing,
    /// Already over.
    Past,
}

/// Classify an event window against `now`.
///
/// Boundaries are inclusive on both ends: an event is `Ongoing` from
/// exactly `start` through exactly `end`.
#[must_use]
pub fn classify_event_timing(
    now: DateTime<Utc>,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> EventTiming {
    if now < start {
        EventTiming::Upcoming
    } else if now <= end {
        EventTiming::Ongoing
    } else {
        EventTiming::Past
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn before_start_is_upcoming() {
        assert_eq!(
            classify_event_timing(at(99), at(100), at(200)),
            EventTiming::Upcoming
        );
    }

    #[test]
    fn boundaries_are_inclusive() {
        assert_eq!(
            classify_event_timing(at(100), at(100), at(200)),
            EventTiming::Ongoing
        );
        assert_eq!(
            classify_event_timing(at(200), at(100), at(200)),
            EventTiming::Ongoing
        );
    }

    #[test]
    fn after_end_is_past() {
        assert_eq!(
            classify_event_timing(at(201), at(100), at(200)),
            EventTiming::Past
        );
    }
}
