use chrono::{Datelike, Duration, NaiveDate};
use std::collections::BTreeMap;

use super::CalendarError;

/// Lay `entries` on consecutive days so that the last entry falls on `target`.
pub fn countdown_plan(
    target: NaiveDate,
    entries: &[String],
) -> Result<BTreeMap<NaiveDate, String>, CalendarError> {
    let invalid = || CalendarError::invalid_day(target.year(), target.month(), target.day());
    let Some(lead) = entries.len().checked_sub(1) else {
        return Ok(BTreeMap::new());
    };
    let first = target
        .checked_sub_signed(Duration::days(lead as i64))
        .ok_or_else(invalid)?;

    Ok(first.iter_days().zip(entries.iter().cloned()).collect())
}
