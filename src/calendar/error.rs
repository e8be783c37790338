use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    /// The year/month(/day) triple does not name a real calendar date.
    #[error("invalid date: {year:04}-{month:02}{}", day_suffix(.day))]
    InvalidDate { year: i32, month: u32, day: Option<u32> },

    /// An externally supplied value failed to parse or is out of range.
    #[error("{message}")]
    InvalidParameter { name: &'static str, message: String },
}

impl CalendarError {
    pub fn invalid_month(year: i32, month: u32) -> Self {
        CalendarError::InvalidDate { year, month, day: None }
    }

    pub fn invalid_day(year: i32, month: u32, day: u32) -> Self {
        CalendarError::InvalidDate { year, month, day: Some(day) }
    }

    pub fn param(name: &'static str, message: impl Into<String>) -> Self {
        CalendarError::InvalidParameter { name, message: message.into() }
    }
}

fn day_suffix(day: &Option<u32>) -> String {
    day.map(|d| format!("-{d:02}")).unwrap_or_default()
}
