//! Due-date computation for monthly recurring payments.
//!
//! A recurring payment fires once per month on a fixed day. Days 29-31
//! clamp to the last day of shorter months, so a payment scheduled for
//! the 31st fires on Feb 28 (29 in leap years), Apr 30, and so on.

use chrono::{Datelike, NaiveDate};

/// Last day of the given month.
fn last_day_of_month(year: i32, month: u32) -> u32 {
    for day in (28..=31).rev() {
        if NaiveDate::from_ymd_opt(year, month, day).is_some() {
            return day;
        }
    }
    28
}

/// The scheduled date in a given month, with day-of-month clamping.
fn date_in_month(year: i32, month: u32, day_of_month: u32) -> NaiveDate {
    let day = day_of_month.min(last_day_of_month(year, month));
    // Valid by construction: day is clamped into the month
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// First occurrence strictly after `after` for a payment scheduled on
/// `day_of_month` (1-31).
#[must_use]
pub fn next_occurrence(after: NaiveDate, day_of_month: u32) -> NaiveDate {
    let candidate = date_in_month(after.year(), after.month(), day_of_month);
    if candidate > after {
        return candidate;
    }

    let (year, month) = if after.month() == 12 {
        (after.year() + 1, 1)
    } else {
        (after.year(), after.month() + 1)
    };
    date_in_month(year, month, day_of_month)
}

/// All occurrences within `[start, end]` (inclusive) for a payment
/// scheduled on `day_of_month`.
#[must_use]
pub fn occurrences_between(start: NaiveDate, end: NaiveDate, day_of_month: u32) -> Vec<NaiveDate> {
    let mut occurrences = Vec::new();
    let mut cursor = start.pred_opt().unwrap_or(start);

    loop {
        let next = next_occurrence(cursor, day_of_month);
        if next > end {
            break;
        }
        occurrences.push(next);
        cursor = next;
    }

    occurrences
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_next_occurrence_same_month() {
        assert_eq!(next_occurrence(date(2026, 8, 5), 10), date(2026, 8, 10));
    }

    #[test]
    fn test_next_occurrence_rolls_to_next_month() {
        assert_eq!(next_occurrence(date(2026, 8, 10), 10), date(2026, 9, 10));
        assert_eq!(next_occurrence(date(2026, 8, 15), 10), date(2026, 9, 10));
    }

    #[test]
    fn test_next_occurrence_december_wraps_year() {
        assert_eq!(next_occurrence(date(2026, 12, 20), 5), date(2027, 1, 5));
    }

    #[rstest]
    #[case(date(2026, 1, 31), 31, date(2026, 2, 28))] // non-leap February
    #[case(date(2028, 1, 31), 31, date(2028, 2, 29))] // leap February
    #[case(date(2026, 3, 31), 31, date(2026, 4, 30))] // 30-day month
    #[case(date(2026, 2, 1), 30, date(2026, 2, 28))]
    fn test_next_occurrence_clamps_short_months(
        #[case] after: NaiveDate,
        #[case] day: u32,
        #[case] expected: NaiveDate,
    ) {
        assert_eq!(next_occurrence(after, day), expected);
    }

    #[test]
    fn test_occurrences_between_inclusive() {
        let occurrences = occurrences_between(date(2026, 1, 15), date(2026, 4, 15), 15);
        assert_eq!(
            occurrences,
            vec![date(2026, 1, 15), date(2026, 2, 15), date(2026, 3, 15), date(2026, 4, 15)]
        );
    }

    #[test]
    fn test_occurrences_between_empty_window() {
        let occurrences = occurrences_between(date(2026, 1, 16), date(2026, 2, 14), 15);
        assert!(occurrences.is_empty());
    }

    #[test]
    fn test_occurrences_clamp_each_month() {
        let occurrences = occurrences_between(date(2026, 1, 1), date(2026, 4, 30), 31);
        assert_eq!(
            occurrences,
            vec![date(2026, 1, 31), date(2026, 2, 28), date(2026, 3, 31), date(2026, 4, 30)]
        );
    }
}
