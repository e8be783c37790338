//! Month grid construction.
//!
//! A month is laid out as rows of 7 cells: padding before day 1 (the prefix),
//! the days of the month, then padding after the last day (the suffix).
//! Padding is either blank or borrowed from the neighbouring months.

mod day;
mod error;
mod params;
mod plan;

pub use day::{day_view, DayView};
pub use error::CalendarError;
pub use params::{parse_day, parse_month, parse_year, weekday_from_index};
pub use plan::countdown_plan;

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, Offset, Utc, Weekday};
use serde::{Deserialize, Serialize, Serializer};
use std::str::FromStr;

pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

// ─── Cells ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellKind {
    PrefixBlank,
    Prefix,
    Day,
    DayToday,
    Suffix,
    SuffixBlank,
}

impl CellKind {
    pub fn is_day(self) -> bool {
        matches!(self, CellKind::Day | CellKind::DayToday)
    }

    pub fn is_blank(self) -> bool {
        matches!(self, CellKind::PrefixBlank | CellKind::SuffixBlank)
    }
}

/// One slot of the grid. Blank kinds carry no date fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cell {
    pub kind:  CellKind,
    pub year:  Option<i32>,
    pub month: Option<u32>,
    pub day:   Option<u32>,
    pub iso:   Option<String>,
    /// Free-form annotation, filled by a cell hook.
    pub note:  Option<String>,
}

impl Cell {
    pub fn blank(kind: CellKind) -> Self {
        Self { kind, year: None, month: None, day: None, iso: None, note: None }
    }

    pub fn dated(kind: CellKind, date: NaiveDate) -> Self {
        Self {
            kind,
            year:  Some(date.year()),
            month: Some(date.month()),
            day:   Some(date.day()),
            iso:   Some(iso_date(date)),
            note:  None,
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year?, self.month?, self.day?)
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

pub fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

// ─── Options ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PadMode {
    #[default]
    Blank,
    Adjacent,
}

impl FromStr for PadMode {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "blank" | "0"    => Ok(PadMode::Blank),
            "adjacent" | "1" => Ok(PadMode::Adjacent),
            _ => Err(CalendarError::param(
                "padMode",
                "Invalid padMode. Expected one of: blank, adjacent (or 0, 1)",
            )),
        }
    }
}

/// A per-cell transform. Receives the built cell and returns its replacement.
pub type CellHook<'a> = &'a (dyn Fn(Cell) -> Cell + Sync);

#[derive(Clone, Copy, Default)]
pub struct CellHooks<'a> {
    pub on_day:    Option<CellHook<'a>>,
    pub on_prefix: Option<CellHook<'a>>,
    pub on_suffix: Option<CellHook<'a>>,
}

fn apply(hook: Option<CellHook<'_>>, cell: Cell) -> Cell {
    match hook {
        Some(f) => f(cell),
        None    => cell,
    }
}

#[derive(Clone, Copy)]
pub struct MonthOptions<'a> {
    pub week_start: Weekday,
    pub pad_mode:   PadMode,
    /// Offset applied to `now` before deciding which day is today.
    pub utc_offset: FixedOffset,
    pub now:        DateTime<Utc>,
    pub hooks:      CellHooks<'a>,
}

impl Default for MonthOptions<'_> {
    fn default() -> Self {
        Self {
            week_start: Weekday::Sun,
            pad_mode:   PadMode::Blank,
            utc_offset: Utc.fix(),
            now:        Utc::now(),
            hooks:      CellHooks::default(),
        }
    }
}

impl MonthOptions<'_> {
    pub fn today(&self) -> NaiveDate {
        self.now.with_timezone(&self.utc_offset).date_naive()
    }
}

// ─── Month descriptor ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearMonth {
    pub year:  i32,
    pub month: u32,
}

impl YearMonth {
    pub fn of(date: NaiveDate) -> Self {
        Self { year: date.year(), month: date.month() }
    }

    pub fn pred(self) -> Self {
        if self.month <= 1 {
            Self { year: self.year - 1, month: 12 }
        } else {
            Self { year: self.year, month: self.month - 1 }
        }
    }

    pub fn succ(self) -> Self {
        if self.month >= 12 {
            Self { year: self.year + 1, month: 1 }
        } else {
            Self { year: self.year, month: self.month + 1 }
        }
    }

    pub fn first_day(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthDescriptor {
    pub year:           i32,
    pub month:          u32,
    #[serde(serialize_with = "weekday_index")]
    pub week_start:     Weekday,
    pub pad_mode:       PadMode,
    pub name:           String,
    pub day_count:      u32,
    pub week_day_first: u32,
    pub week_day_last:  u32,
    pub prev_month:     YearMonth,
    pub next_month:     YearMonth,
    pub weekdays:       [&'static str; 7],
    pub matrix:         Vec<Vec<Cell>>,
}

impl MonthDescriptor {
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.matrix.iter().flatten()
    }

    pub fn prefix_len(&self) -> usize {
        self.cells()
            .filter(|c| matches!(c.kind, CellKind::Prefix | CellKind::PrefixBlank))
            .count()
    }

    pub fn suffix_len(&self) -> usize {
        self.cells()
            .filter(|c| matches!(c.kind, CellKind::Suffix | CellKind::SuffixBlank))
            .count()
    }
}

fn weekday_index<S: Serializer>(day: &Weekday, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u32(day.num_days_from_sunday())
}

// ─── Builder ──────────────────────────────────────────────────────────────────

/// Build the grid for `month` (1-based) of `year`.
pub fn build(
    year: i32,
    month: u32,
    opts: &MonthOptions<'_>,
) -> Result<MonthDescriptor, CalendarError> {
    let invalid = || CalendarError::invalid_month(year, month);

    let current   = YearMonth { year, month };
    let first     = current.first_day().ok_or_else(invalid)?;
    let day_count = days_in_month(year, month).ok_or_else(invalid)?;
    let last      = first.with_day(day_count).ok_or_else(invalid)?;
    // Both neighbours must exist for the descriptor to be complete.
    let prev_last  = first.pred_opt().ok_or_else(invalid)?;
    let next_first = last.succ_opt().ok_or_else(invalid)?;

    let week_day_first = first.weekday().num_days_from_sunday();
    let week_day_last  = last.weekday().num_days_from_sunday();
    let start          = opts.week_start.num_days_from_sunday();
    let today          = opts.today();

    let prefix_len = ((week_day_first + 7 - start) % 7) as usize;
    let suffix_len = (6 - (week_day_last + 7 - start) % 7) as usize;

    let days = first.iter_days().take(day_count as usize).map(|date| {
        let kind = if date == today { CellKind::DayToday } else { CellKind::Day };
        apply(opts.hooks.on_day, Cell::dated(kind, date))
    });

    let prefix: Vec<Cell> = match opts.pad_mode {
        PadMode::Blank => vec![Cell::blank(CellKind::PrefixBlank); prefix_len],
        PadMode::Adjacent => (0..prefix_len as i64)
            .rev()
            .map(|back| {
                prev_last
                    .checked_sub_signed(Duration::days(back))
                    .map(|date| Cell::dated(CellKind::Prefix, date))
                    .ok_or_else(invalid)
            })
            .collect::<Result<_, _>>()?,
    };

    let suffix: Vec<Cell> = match opts.pad_mode {
        PadMode::Blank => vec![Cell::blank(CellKind::SuffixBlank); suffix_len],
        PadMode::Adjacent => next_first
            .iter_days()
            .take(suffix_len)
            .map(|date| Cell::dated(CellKind::Suffix, date))
            .collect(),
    };

    let mut cells = Vec::with_capacity(prefix_len + day_count as usize + suffix_len);
    cells.extend(prefix.into_iter().map(|c| apply(opts.hooks.on_prefix, c)));
    cells.extend(days);
    cells.extend(suffix.into_iter().map(|c| apply(opts.hooks.on_suffix, c)));
    debug_assert_eq!(cells.len() % 7, 0);

    tracing::debug!(year, month, prefix_len, suffix_len, "built month grid");

    Ok(MonthDescriptor {
        year,
        month,
        week_start: opts.week_start,
        pad_mode: opts.pad_mode,
        name: first.format("%b").to_string(),
        day_count,
        week_day_first,
        week_day_last,
        prev_month: current.pred(),
        next_month: current.succ(),
        weekdays: weekday_labels(opts.week_start),
        matrix: chunk_weeks(cells),
    })
}

/// Split a linear run of cells into rows of 7.
pub fn chunk_weeks(cells: Vec<Cell>) -> Vec<Vec<Cell>> {
    let mut weeks = Vec::with_capacity(cells.len().div_ceil(7));
    let mut week  = Vec::with_capacity(7);

    for cell in cells {
        week.push(cell);
        if week.len() == 7 {
            weeks.push(std::mem::replace(&mut week, Vec::with_capacity(7)));
        }
    }
    if !week.is_empty() { weeks.push(week); }
    weeks
}

/// Weekday abbreviations rotated so index 0 is `week_start`.
pub fn weekday_labels(week_start: Weekday) -> [&'static str; 7] {
    let start = week_start.num_days_from_sunday() as usize;
    std::array::from_fn(|i| WEEKDAY_LABELS[(start + i) % 7])
}

pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }?;
    Some((next - first).num_days() as u32)
}
