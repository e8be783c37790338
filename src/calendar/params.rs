//! Parsing of externally supplied year/month/day/week-start values.

use chrono::Weekday;

use super::CalendarError;

pub fn parse_year(raw: &str) -> Result<i32, CalendarError> {
    let raw = raw.trim();
    if raw.len() != 4 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid_year());
    }
    raw.parse().map_err(|_| invalid_year())
}

/// Accepts `1`..`12`, with or without a leading zero.
pub fn parse_month(raw: &str) -> Result<u32, CalendarError> {
    match raw.trim().parse::<u32>() {
        Ok(m) if (1..=12).contains(&m) && raw.trim().len() <= 2 => Ok(m),
        _ => Err(CalendarError::param(
            "month",
            "Invalid month. Example format: 01 02 ... 11 12",
        )),
    }
}

pub fn parse_day(raw: &str) -> Result<u32, CalendarError> {
    match raw.trim().parse::<u32>() {
        Ok(d) if (1..=31).contains(&d) && raw.trim().len() <= 2 => Ok(d),
        _ => Err(CalendarError::param(
            "day",
            "Invalid day. Example format: 01 02 ... 30 31",
        )),
    }
}

/// `0` is Sunday, `6` is Saturday.
pub fn weekday_from_index(index: u32) -> Result<Weekday, CalendarError> {
    match index {
        0 => Ok(Weekday::Sun),
        1 => Ok(Weekday::Mon),
        2 => Ok(Weekday::Tue),
        3 => Ok(Weekday::Wed),
        4 => Ok(Weekday::Thu),
        5 => Ok(Weekday::Fri),
        6 => Ok(Weekday::Sat),
        _ => Err(CalendarError::param(
            "weekStart",
            "Invalid weekStart. Expected 0 (Sun) through 6 (Sat)",
        )),
    }
}

fn invalid_year() -> CalendarError {
    CalendarError::param("year", "Invalid year. Example format: 1970 1971 ... 2029 2030")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn years_must_be_four_digits() {
        assert_eq!(parse_year("2024"), Ok(2024));
        assert_eq!(parse_year("0999"), Ok(999));
        assert!(parse_year("999").is_err());
        assert!(parse_year("20245").is_err());
        assert!(parse_year("-202").is_err());
        assert!(parse_year("abcd").is_err());
    }

    #[test]
    fn months_accept_leading_zero() {
        assert_eq!(parse_month("02"), Ok(2));
        assert_eq!(parse_month("12"), Ok(12));
        assert!(parse_month("0").is_err());
        assert!(parse_month("13").is_err());
        assert!(parse_month("002").is_err());
        assert!(parse_month("feb").is_err());
    }

    #[test]
    fn invalid_month_message_is_client_facing() {
        let err = parse_month("13").unwrap_err();
        assert_eq!(err.to_string(), "Invalid month. Example format: 01 02 ... 11 12");
    }

    #[test]
    fn days_are_range_checked_before_the_calendar() {
        assert_eq!(parse_day("31"), Ok(31));
        assert!(parse_day("32").is_err());
        assert!(parse_day("0").is_err());
    }

    #[test]
    fn week_start_index_maps_sunday_first() {
        assert_eq!(weekday_from_index(0), Ok(Weekday::Sun));
        assert_eq!(weekday_from_index(6), Ok(Weekday::Sat));
        assert!(weekday_from_index(7).is_err());
    }
}
