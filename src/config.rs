use anyhow::Result;
use chrono::{DateTime, FixedOffset, NaiveDate, Utc, Weekday};
use serde::Deserialize;
use std::path::PathBuf;

use crate::calendar::{weekday_from_index, CalendarError, CellHooks, MonthOptions, PadMode};

fn default_bind() -> String { "127.0.0.1".to_owned() }
fn default_port() -> u16    { 3000 }

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    pub server:   Option<ServerConfig>,
    pub calendar: Option<CalendarConfig>,
    pub plan:     Option<PlanConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind: default_bind(), port: default_port() }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct CalendarConfig {
    /// 0 = Sunday .. 6 = Saturday
    pub week_start:       Option<u32>,
    pub pad_mode:         Option<PadMode>,
    pub utc_offset_hours: Option<i32>,
    pub theme:            Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlanConfig {
    /// Quoted `YYYY-MM-DD`.
    pub target:  NaiveDate,
    pub entries: Vec<String>,
}

/// Validated calendar defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarSettings {
    pub week_start: Weekday,
    pub pad_mode:   PadMode,
    pub utc_offset: FixedOffset,
    pub theme:      String,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let path = config_dir().join("config.toml");
        if path.exists() {
            let cfg = Self::parse(&std::fs::read_to_string(&path)?)?;
            tracing::info!("Loaded config from {}", path.display());
            Ok(cfg)
        } else {
            Ok(AppConfig::default())
        }
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    pub fn server(&self) -> ServerConfig {
        self.server.clone().unwrap_or_default()
    }

    pub fn calendar(&self) -> Result<CalendarSettings, CalendarError> {
        self.calendar.clone().unwrap_or_default().settings()
    }
}

impl CalendarConfig {
    pub fn settings(&self) -> Result<CalendarSettings, CalendarError> {
        let week_start = weekday_from_index(self.week_start.unwrap_or(0))?;
        let hours      = self.utc_offset_hours.unwrap_or(0);
        let utc_offset = (-12..=14)
            .contains(&hours)
            .then(|| FixedOffset::east_opt(hours * 3600))
            .flatten()
            .ok_or_else(|| CalendarError::param(
                "utc_offset_hours",
                format!("utc_offset_hours must be between -12 and 14, got {hours}"),
            ))?;

        Ok(CalendarSettings {
            week_start,
            pad_mode: self.pad_mode.unwrap_or_default(),
            utc_offset,
            theme: self.theme.clone().unwrap_or_else(|| "catppuccin-mocha".to_owned()),
        })
    }
}

impl CalendarSettings {
    pub fn month_options<'a>(&self, now: DateTime<Utc>) -> MonthOptions<'a> {
        MonthOptions {
            week_start: self.week_start,
            pad_mode:   self.pad_mode,
            utc_offset: self.utc_offset,
            now,
            hooks:      CellHooks::default(),
        }
    }

    pub fn today(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.utc_offset).date_naive()
    }
}

pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("kalendaryo")
}

pub fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("kalendaryo")
}
