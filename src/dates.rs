//! ACH date and time formatting.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Weekday};

/// `YYMMDD`, as used by creation and effective entry dates.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%y%m%d").to_string()
}

/// `HHMM`, 24-hour clock.
pub fn format_time(time: NaiveTime) -> String {
    time.format("%H%M").to_string()
}

/// Monday through Friday. Bank holidays are not considered.
pub fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// The `business_days`-th business day strictly after `from`.
///
/// Zero returns `from` unchanged.
pub fn compute_business_day(business_days: u32, from: NaiveDate) -> NaiveDate {
    let mut day = from;
    let mut counted = 0;
    while counted < business_days {
        day += Duration::days(1);
        if is_business_day(day) {
            counted += 1;
        }
    }
    day
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_format_date_and_time() {
        assert_eq!(format_date(date(2026, 3, 7)), "260307");
        let t = NaiveTime::from_hms_opt(9, 5, 59).unwrap();
        assert_eq!(format_time(t), "0905");
    }

    #[test]
    fn test_business_days() {
        // 2026-10-16 is a Friday
        assert!(is_business_day(date(2026, 10, 16)));
        assert!(!is_business_day(date(2026, 10, 17)));
        assert!(!is_business_day(date(2026, 10, 18)));
    }

    #[test]
    fn test_compute_business_day_skips_weekend() {
        let friday = date(2026, 10, 16);
        assert_eq!(compute_business_day(1, friday), date(2026, 10, 19));
        assert_eq!(compute_business_day(2, friday), date(2026, 10, 20));
        assert_eq!(compute_business_day(0, friday), friday);
    }
}
