//! Process configuration loaded from environment variables.
//!
//! - `ROOMBOOK_PORT` - HTTP port (default `3000`)
//! - `ROOMBOOK_DB` - SQLite file path (default: platform data directory)
//! - `ROOMBOOK_OPENS_AT` / `ROOMBOOK_CLOSES_AT` - booking window as `HH:MM` UTC
//!   (default `09:00` / `18:00`)

use std::path::PathBuf;

use chrono::NaiveTime;
use thiserror::Error;

use crate::booking::{BookingWindow, InvalidWindow};

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a port number, got {value:?}")]
    Port { name: &'static str, value: String },

    #[error("{name} must be a time of day as HH:MM, got {value:?}")]
    Time { name: &'static str, value: String },

    #[error(transparent)]
    Window(#[from] InvalidWindow),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    /// `None` means the platform default location.
    pub database: Option<PathBuf>,
    pub window: BookingWindow,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from any variable source. Unset variables fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("ROOMBOOK_PORT") {
            Some(value) => value.trim().parse::<u16>().map_err(|_| ConfigError::Port {
                name: "ROOMBOOK_PORT",
                value,
            })?,
            None => DEFAULT_PORT,
        };

        let database = lookup("ROOMBOOK_DB")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        let defaults = BookingWindow::default();
        let opens_at = match lookup("ROOMBOOK_OPENS_AT") {
            Some(value) => parse_time_of_day("ROOMBOOK_OPENS_AT", &value)?,
            None => defaults.opens_at(),
        };
        let closes_at = match lookup("ROOMBOOK_CLOSES_AT") {
            Some(value) => parse_time_of_day("ROOMBOOK_CLOSES_AT", &value)?,
            None => defaults.closes_at(),
        };

        Ok(Self {
            port,
            database,
            window: BookingWindow::new(opens_at, closes_at)?,
        })
    }

    /// Replace the window bounds that were given, keeping the others.
    pub fn with_window(
        mut self,
        opens_at: Option<NaiveTime>,
        closes_at: Option<NaiveTime>,
    ) -> Result<Self, ConfigError> {
        self.window = BookingWindow::new(
            opens_at.unwrap_or(self.window.opens_at()),
            closes_at.unwrap_or(self.window.closes_at()),
        )?;
        Ok(self)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            database: None,
            window: BookingWindow::default(),
        }
    }
}

pub fn parse_time_of_day(name: &'static str, value: &str) -> Result<NaiveTime, ConfigError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").map_err(|_| ConfigError::Time {
        name,
        value: value.to_string(),
    })
}
