//! Calendar dates from year/month/day survey answers

use chrono::NaiveDate;

/// Build a date from separate year, month and day answers.
///
/// A blank year means no date. A blank month or day defaults to 1. Anything
/// that does not form a real calendar date collapses to `None`.
pub fn build_date(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    let year = year.trim();
    if year.is_empty() {
        return None;
    }
    let year: i32 = year.parse().ok()?;
    let month = component_or_one(month)?;
    let day = component_or_one(day)?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn component_or_one(value: &str) -> Option<u32> {
    let value = value.trim();
    if value.is_empty() {
        Some(1)
    } else {
        value.parse().ok()
    }
}

/// Optional start and end dates of a composite entity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateInterval {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateInterval {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn ending(end: Option<NaiveDate>) -> Self {
        Self { start: None, end }
    }

    /// No bound is known
    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn year_only_defaults_to_january_first() {
        assert_eq!(build_date("2014", "", ""), Some(ymd(2014, 1, 1)));
        assert_eq!(build_date("2014", "6", ""), Some(ymd(2014, 6, 1)));
        assert_eq!(build_date(" 2014 ", " 6 ", " 15 "), Some(ymd(2014, 6, 15)));
    }

    #[test]
    fn blank_year_is_absent() {
        assert_eq!(build_date("", "", ""), None);
        assert_eq!(build_date("", "5", "3"), None);
    }

    #[test]
    fn impossible_dates_collapse() {
        assert_eq!(build_date("2013", "2", "29"), None);
        assert_eq!(build_date("2014", "13", ""), None);
        assert_eq!(build_date("2014", "0", "1"), None);
        assert_eq!(build_date("twenty", "", ""), None);
        assert_eq!(build_date("2014", "June", ""), None);
    }

    #[test]
    fn leap_day_is_valid() {
        assert_eq!(build_date("2012", "2", "29"), Some(ymd(2012, 2, 29)));
    }

    #[test]
    fn interval_emptiness() {
        assert!(DateInterval::default().is_empty());
        assert!(!DateInterval::ending(Some(ymd(2010, 1, 1))).is_empty());
    }
}
