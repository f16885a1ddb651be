/// Time-derived display values: the application deadline countdown, the
/// statistics count-up and the staggered card reveal.
use std::time::Duration;

use chrono::NaiveDateTime;

/// Length of the statistics count-up animation.
pub const COUNT_UP_DURATION: Duration = Duration::from_millis(1300);
/// Delay added per card when the catalog grid is revealed.
pub const REVEAL_STEP_MS: u64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub expired: bool,
}

/// Time left until `deadline`, saturating at zero once it has passed.
pub fn countdown(now: NaiveDateTime, deadline: NaiveDateTime) -> Countdown {
    let remaining = (deadline - now).num_seconds();
    if remaining <= 0 {
        return Countdown {
            days: 0,
            hours: 0,
            minutes: 0,
            seconds: 0,
            expired: true,
        };
    }
    Countdown {
        days: remaining / 86_400,
        hours: remaining % 86_400 / 3_600,
        minutes: remaining % 3_600 / 60,
        seconds: remaining % 60,
        expired: false,
    }
}

/// Applications are open until the deadline unless the site is forced closed.
pub fn applications_open(now: NaiveDateTime, deadline: NaiveDateTime, forced_closed: bool) -> bool {
    !forced_closed && now < deadline
}

/// Counter value `elapsed` into a cubic ease-out animation towards `target`.
pub fn count_up(target: u32, elapsed: Duration, duration: Duration) -> u32 {
    if duration.is_zero() || elapsed >= duration {
        return target;
    }
    let t = elapsed.as_secs_f64() / duration.as_secs_f64();
    let eased = 1.0 - (1.0 - t).powi(3);
    (f64::from(target) * eased).round() as u32
}

pub fn reveal_delay(index: usize) -> Duration {
    Duration::from_millis(index as u64 * REVEAL_STEP_MS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_deadline;

    fn at(raw: &str) -> NaiveDateTime {
        parse_deadline(raw).unwrap()
    }

    #[test]
    fn countdown_breaks_down_remaining_time() {
        let left = countdown(at("2025-11-29T21:57:58"), at("2025-12-01T23:59:00"));
        assert_eq!(
            left,
            Countdown {
                days: 2,
                hours: 2,
                minutes: 1,
                seconds: 2,
                expired: false,
            }
        );
    }

    #[test]
    fn countdown_saturates_after_deadline() {
        let deadline = at("2025-12-01T23:59:00");
        for now in [deadline, at("2026-01-15T08:00:00")] {
            let left = countdown(now, deadline);
            assert!(left.expired);
            assert_eq!((left.days, left.hours, left.minutes, left.seconds), (0, 0, 0, 0));
        }
    }

    #[test]
    fn open_flag_respects_deadline_and_override() {
        let deadline = at("2025-12-01T23:59:00");
        let before = at("2025-11-01T10:00:00");
        assert!(applications_open(before, deadline, false));
        assert!(!applications_open(before, deadline, true));
        assert!(!applications_open(at("2025-12-02T00:00:00"), deadline, false));
    }

    #[test]
    fn count_up_eases_out_and_lands_on_target() {
        assert_eq!(count_up(30, Duration::ZERO, COUNT_UP_DURATION), 0);
        // Halfway through, ease-out is already at 87.5%.
        assert_eq!(count_up(40, Duration::from_millis(650), COUNT_UP_DURATION), 35);
        assert_eq!(count_up(15, COUNT_UP_DURATION, COUNT_UP_DURATION), 15);
        assert_eq!(count_up(15, Duration::from_secs(5), COUNT_UP_DURATION), 15);
        assert_eq!(count_up(4, Duration::from_millis(10), Duration::ZERO), 4);
    }

    #[test]
    fn count_up_is_monotonic() {
        let mut last = 0;
        for ms in (0..=1300).step_by(50) {
            let value = count_up(30, Duration::from_millis(ms), COUNT_UP_DURATION);
            assert!(value >= last);
            last = value;
        }
        assert_eq!(last, 30);
    }

    #[test]
    fn reveal_is_staggered() {
        assert_eq!(reveal_delay(0), Duration::ZERO);
        assert_eq!(reveal_delay(3), Duration::from_millis(180));
    }
}
