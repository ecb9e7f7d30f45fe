//! Calendar-month windows and growth arithmetic for dashboard metrics.
//!
//! Month boundaries are computed in UTC.

use chrono::{DateTime, Datelike, TimeZone, Utc};

use crate::db::TimeWindow;

/// Number of calendar months in the subscription trend series.
pub const TREND_MONTHS: u32 = 6;

/// First instant of the calendar month `months_back` months before the month
/// containing `now`.
pub fn month_start(now: DateTime<Utc>, months_back: u32) -> DateTime<Utc> {
    let total = now.year() * 12 + now.month0() as i32 - months_back as i32;
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) as u32 + 1;
    Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0)
        .single()
        .unwrap_or(now)
}

/// `[startOfCurrentMonth, now)`.
pub fn current_period(now: DateTime<Utc>) -> TimeWindow {
    TimeWindow::new(month_start(now, 0), now)
}

/// `[startOfPriorMonth, startOfCurrentMonth)`.
pub fn prior_period(now: DateTime<Utc>) -> TimeWindow {
    TimeWindow::new(month_start(now, 1), month_start(now, 0))
}

/// Whole calendar month `months_back` months before the current one.
pub fn calendar_month(now: DateTime<Utc>, months_back: u32) -> TimeWindow {
    let start = month_start(now, months_back);
    let end = if months_back == 0 {
        next_month_start(start)
    } else {
        month_start(now, months_back - 1)
    };
    TimeWindow::new(start, end)
}

fn next_month_start(start: DateTime<Utc>) -> DateTime<Utc> {
    let (year, month) = if start.month() == 12 {
        (start.year() + 1, 1)
    } else {
        (start.year(), start.month() + 1)
    };
    Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0)
        .single()
        .unwrap_or(start)
}

/// Short month/year label such as `"May 2026"`.
pub fn month_label(start: DateTime<Utc>) -> String {
    start.format("%b %Y").to_string()
}

/// Trend buckets for the trailing months, oldest first.
pub fn trend_windows(now: DateTime<Utc>) -> Vec<(String, TimeWindow)> {
    (0..TREND_MONTHS)
        .rev()
        .map(|back| {
            let window = calendar_month(now, back);
            (month_label(window.start), window)
        })
        .collect()
}

/// Month-over-month growth in whole percent.
///
/// Rounds half up. With no prior activity, any current activity counts as
/// 100% growth.
pub fn growth_percent(current: i64, prior: i64) -> i64 {
    if prior > 0 {
        // floor(delta * 100 / prior + 1/2), kept in integers
        (200 * (current - prior) + prior).div_euclid(2 * prior)
    } else if current > 0 {
        100
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn growth_zero_over_zero_is_zero() {
        assert_eq!(growth_percent(0, 0), 0);
    }

    #[test]
    fn growth_from_nothing_is_hundred() {
        assert_eq!(growth_percent(3, 0), 100);
        assert_eq!(growth_percent(1, 0), 100);
    }

    #[test]
    fn growth_with_prior_rounds() {
        assert_eq!(growth_percent(120_000, 100_000), 20);
        assert_eq!(growth_percent(0, 4), -100);
        assert_eq!(growth_percent(2, 3), -33);
        assert_eq!(growth_percent(5, 3), 67);
        for prior in 1..40 {
            for current in 0..80 {
                let expected = (((current - prior) * 100) as f64 / prior as f64 + 0.5).floor();
                assert_eq!(growth_percent(current, prior), expected as i64);
            }
        }
    }

    #[test]
    fn growth_ties_round_up() {
        // -0.5% rounds to 0, +0.5% rounds to 1
        assert_eq!(growth_percent(199, 200), 0);
        assert_eq!(growth_percent(201, 200), 1);
    }

    #[test]
    fn month_start_crosses_year_boundary() {
        let now = at(2026, 2, 15, 13);
        assert_eq!(month_start(now, 0), at(2026, 2, 1, 0));
        assert_eq!(month_start(now, 1), at(2026, 1, 1, 0));
        assert_eq!(month_start(now, 2), at(2025, 12, 1, 0));
        assert_eq!(month_start(now, 14), at(2024, 12, 1, 0));
    }

    #[test]
    fn periods_are_adjacent() {
        let now = at(2026, 10, 19, 9);
        let current = current_period(now);
        let prior = prior_period(now);
        assert_eq!(prior.end, current.start);
        assert_eq!(current.end, now);
        assert_eq!(prior.start, at(2026, 9, 1, 0));
    }

    #[test]
    fn trend_has_six_chronological_buckets() {
        let now = at(2026, 3, 10, 12);
        let windows = trend_windows(now);
        assert_eq!(windows.len(), 6);
        let labels: Vec<&str> = windows.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(
            labels,
            ["Oct 2025", "Nov 2025", "Dec 2025", "Jan 2026", "Feb 2026", "Mar 2026"]
        );
        for pair in windows.windows(2) {
            assert_eq!(pair[0].1.end, pair[1].1.start);
            assert!(pair[0].1.start < pair[1].1.start);
        }
        assert_eq!(windows[5].1.end, at(2026, 4, 1, 0));
    }

    #[test]
    fn december_bucket_ends_in_january() {
        let window = calendar_month(at(2026, 12, 31, 23), 0);
        assert_eq!(window.start, at(2026, 12, 1, 0));
        assert_eq!(window.end, at(2027, 1, 1, 0));
    }
}
