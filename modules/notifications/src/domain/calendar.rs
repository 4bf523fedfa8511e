//! Clock abstraction and month arithmetic for the scanner.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};

/// Source of "now", injectable so schedule logic is testable.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Whether a sweep should run at this moment.
pub fn is_first_of_month(now: DateTime<Utc>) -> bool {
    now.day() == 1
}

/// Inclusive `[first, last]` day range of the month containing `date`.
pub fn month_window(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = date
        .with_day(1)
        .unwrap_or(date);
    let next_month_first = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    }
    .unwrap_or(first);
    (first, next_month_first - Duration::days(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn first_of_month_predicate() {
        let first = Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap();
        let mid = Utc.with_ymd_and_hms(2025, 3, 15, 9, 30, 0).unwrap();
        assert!(is_first_of_month(first));
        assert!(!is_first_of_month(mid));
    }

    #[test]
    fn window_covers_the_whole_month() {
        assert_eq!(month_window(d(2025, 4, 17)), (d(2025, 4, 1), d(2025, 4, 30)));
        assert_eq!(month_window(d(2025, 2, 1)), (d(2025, 2, 1), d(2025, 2, 28)));
        assert_eq!(month_window(d(2024, 2, 29)), (d(2024, 2, 1), d(2024, 2, 29)));
    }

    #[test]
    fn december_window_rolls_into_next_year() {
        assert_eq!(
            month_window(d(2025, 12, 31)),
            (d(2025, 12, 1), d(2025, 12, 31))
        );
    }
}
