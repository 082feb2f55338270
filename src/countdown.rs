use std::fmt;

use chrono::{DateTime, TimeZone};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Countdown {
    Remaining {
        days: i64,
        hours: i64,
        minutes: i64,
        seconds: i64,
        millis: i64,
    },
    Arrived,
}

/// Time left from `now` until `target`; `Arrived` once the target has passed.
pub fn remaining<A: TimeZone, B: TimeZone>(now: &DateTime<A>, target: &DateTime<B>) -> Countdown {
    let delta = target.clone().signed_duration_since(now.clone());
    let total_ms = delta.num_milliseconds();
    if total_ms < 0 {
        return Countdown::Arrived;
    }
    let total_secs = total_ms / 1000;
    Countdown::Remaining {
        days: total_secs / 86_400,
        hours: (total_secs % 86_400) / 3600,
        minutes: (total_secs % 3600) / 60,
        seconds: total_secs % 60,
        millis: total_ms % 1000,
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Countdown::Remaining {
                days,
                hours,
                minutes,
                seconds,
                millis,
            } => write!(
                f,
                "{days:02} days : {hours:02} h : {minutes:02} min : {seconds:02} s : {millis:03} ms"
            ),
            Countdown::Arrived => write!(f, "the day has arrived!"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, FixedOffset, Utc};

    #[test]
    fn splits_the_delta_into_units() {
        let tz = FixedOffset::west_opt(6 * 3600).unwrap();
        let target = tz.with_ymd_and_hms(2025, 10, 14, 0, 0, 0).unwrap();
        let left_ms = (2 * 86_400 + 3 * 3600 + 4 * 60 + 5) * 1000 + 67;
        let now = target - Duration::milliseconds(left_ms);
        let left = remaining(&now, &target);
        assert_eq!(
            left,
            Countdown::Remaining {
                days: 2,
                hours: 3,
                minutes: 4,
                seconds: 5,
                millis: 67
            }
        );
        assert_eq!(left.to_string(), "02 days : 03 h : 04 min : 05 s : 067 ms");
    }

    #[test]
    fn past_target_has_arrived_across_offsets() {
        let tz = FixedOffset::west_opt(6 * 3600).unwrap();
        let target = tz.with_ymd_and_hms(2025, 10, 14, 0, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2025, 10, 14, 6, 0, 1).unwrap();
        assert_eq!(remaining(&now, &target), Countdown::Arrived);
        let just_before = Utc.with_ymd_and_hms(2025, 10, 14, 5, 59, 59).unwrap();
        assert!(matches!(
            remaining(&just_before, &target),
            Countdown::Remaining { seconds: 1, .. }
        ));
    }
}
