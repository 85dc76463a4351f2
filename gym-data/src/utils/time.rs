//! Calendar helpers
//!
//! Membership dates are stored as `YYYY-MM-DD` strings; everything
//! here works on [`NaiveDate`] and leaves timezone scoping to the
//! caller (see `GymState::today` / `GymState::local_day`).

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Parse a stored `YYYY-MM-DD` date; empty or malformed yields `None`.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Format a date back into the stored `YYYY-MM-DD` shape.
pub fn format_date(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

pub fn add_days(d: NaiveDate, days: i64) -> NaiveDate {
    d + Duration::days(days)
}

/// Whole calendar days from `from` to `to` (negative when past).
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Human date for outgoing messages, e.g. `5 Mar 2024`.
pub fn display_date(stored: &str) -> String {
    match parse_date(stored) {
        Some(d) => format!("{} {} {}", d.day(), month_abbrev(d.month()), d.year()),
        None => stored.to_string(),
    }
}

fn month_abbrev(m: u32) -> &'static str {
    match m {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        _ => "Dec",
    }
}

/// Parse a legacy 12-hour wall-clock pair (`"2024-01-10"`, `"09:30 AM"`)
/// into UTC, interpreting the wall clock in the gym's timezone.
pub fn parse_12h(date: &str, time: &str, tz: Tz) -> Option<DateTime<Utc>> {
    let day = parse_date(date)?;
    let clock = NaiveTime::parse_from_str(time.trim(), "%I:%M %p")
        .or_else(|_| NaiveTime::parse_from_str(time.trim(), "%I:%M:%S %p"))
        .or_else(|_| NaiveTime::parse_from_str(time.trim(), "%H:%M"))
        .ok()?;
    let local = NaiveDateTime::new(day, clock);
    tz.from_local_datetime(&local)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

/// True when a member's `dob` falls on `today`'s month and day.
/// The stored year is ignored; Feb-29 birthdays match Feb-28 in
/// non-leap years so they are never skipped.
pub fn is_birthday(dob: &str, today: NaiveDate) -> bool {
    let Some(dob) = parse_date(dob) else {
        return false;
    };
    if dob.month() == today.month() && dob.day() == today.day() {
        return true;
    }
    dob.month() == 2
        && dob.day() == 29
        && today.month() == 2
        && today.day() == 28
        && !is_leap_year(today.year())
}

fn is_leap_year(y: i32) -> bool {
    (y % 4 == 0 && y % 100 != 0) || y % 400 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_parse_and_arithmetic() {
        let d = parse_date("2024-01-01").unwrap();
        assert_eq!(format_date(add_days(d, 29)), "2024-01-30");
        assert_eq!(days_between(d, parse_date("2024-01-10").unwrap()), 9);
        assert!(parse_date("").is_none());
        assert!(parse_date("10/01/2024").is_none());
    }

    #[test]
    fn display_date_is_human() {
        assert_eq!(display_date("2024-03-05"), "5 Mar 2024");
        assert_eq!(display_date("garbage"), "garbage");
    }

    #[test]
    fn twelve_hour_parse_respects_timezone() {
        let ts = parse_12h("2024-01-10", "09:30 AM", chrono_tz::Asia::Kolkata).unwrap();
        // 09:30 IST == 04:00 UTC
        assert_eq!(ts.to_rfc3339(), "2024-01-10T04:00:00+00:00");
        assert!(parse_12h("2024-01-10", "25:00", chrono_tz::Asia::Kolkata).is_none());
    }

    #[test]
    fn birthday_match_ignores_year() {
        let today = parse_date("2024-06-15").unwrap();
        assert!(is_birthday("1990-06-15", today));
        assert!(!is_birthday("1990-06-16", today));
        assert!(!is_birthday("", today));
        // leap birthday celebrated on Feb 28 off-years
        assert!(is_birthday("1996-02-29", parse_date("2023-02-28").unwrap()));
        assert!(!is_birthday("1996-02-29", parse_date("2024-02-28").unwrap()));
    }
}
