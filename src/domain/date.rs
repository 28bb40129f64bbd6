//! Calendar dates in the fixed todo.txt layout
//!
//! todo.txt dates carry no time of day. They are stored as [`NaiveDate`] and
//! interpreted in the local timezone whenever they are compared with "now".

use chrono::{DateTime, Days, Local, NaiveDate, NaiveTime, TimeZone};

/// Layout of every date in a todo.txt line (`YYYY-MM-DD`)
pub const DATE_LAYOUT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` token into a calendar date
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_LAYOUT).ok()
}

/// Formats a date as `YYYY-MM-DD`
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_LAYOUT).to_string()
}

/// Returns the current local calendar date
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Returns the local instant at which the given day ends
/// (midnight at the start of the following day).
pub fn end_of_day(date: NaiveDate) -> DateTime<Local> {
    let next = date.checked_add_days(Days::new(1)).unwrap_or(NaiveDate::MAX);
    let midnight = next.and_time(NaiveTime::MIN);

    // Midnight can fall in a DST gap; fall back to reading it as UTC.
    Local
        .from_local_datetime(&midnight)
        .earliest()
        .unwrap_or_else(|| Local.from_utc_datetime(&midnight))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_date() {
        assert_eq!(
            parse_date("2014-01-12"),
            NaiveDate::from_ymd_opt(2014, 1, 12)
        );
    }

    #[test]
    fn parse_rejects_calendar_errors() {
        assert!(parse_date("2014-13-01").is_none());
        assert!(parse_date("2014-02-30").is_none());
        assert!(parse_date("2014-01-32").is_none());
        assert!(parse_date("tomorrow").is_none());
    }

    #[test]
    fn format_is_zero_padded() {
        let date = NaiveDate::from_ymd_opt(987, 3, 4).unwrap();
        assert_eq!(format_date(date), "0987-03-04");
    }

    #[test]
    fn end_of_day_is_next_midnight() {
        let date = NaiveDate::from_ymd_opt(2020, 6, 15).unwrap();
        let end = end_of_day(date);
        assert_eq!(end.date_naive(), NaiveDate::from_ymd_opt(2020, 6, 16).unwrap());
    }
}
