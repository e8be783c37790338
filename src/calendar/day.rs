use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::{iso_date, CalendarError, WEEKDAY_LABELS};

/// A single day with links to its neighbours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayView {
    pub year:    i32,
    pub month:   u32,
    pub day:     u32,
    pub iso:     String,
    pub weekday: &'static str,
    pub prev:    String,
    pub next:    String,
}

pub fn day_view(year: i32, month: u32, day: u32) -> Result<DayView, CalendarError> {
    let invalid = || CalendarError::invalid_day(year, month, day);
    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)?;
    let prev = date.pred_opt().ok_or_else(invalid)?;
    let next = date.succ_opt().ok_or_else(invalid)?;

    Ok(DayView {
        year, month, day,
        iso:     iso_date(date),
        weekday: WEEKDAY_LABELS[date.weekday().num_days_from_sunday() as usize],
        prev:    iso_date(prev),
        next:    iso_date(next),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbours_cross_year_boundary() {
        let v = day_view(2024, 1, 1).unwrap();
        assert_eq!(v.iso, "2024-01-01");
        assert_eq!(v.weekday, "Mon");
        assert_eq!(v.prev, "2023-12-31");
        assert_eq!(v.next, "2024-01-02");
    }

    #[test]
    fn leap_day_exists_only_in_leap_years() {
        assert_eq!(day_view(2024, 2, 29).unwrap().next, "2024-03-01");
        assert_eq!(day_view(2023, 2, 29), Err(CalendarError::invalid_day(2023, 2, 29)));
    }
}
