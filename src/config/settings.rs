//! User settings from `config.json`.
//!
//! Every key is optional; environment variables override the file.

use std::fs;
use std::path::Path;
use std::time::Duration;

use chrono::FixedOffset;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::backup::Zone;
use crate::error::{Error, Result};
use crate::holidays::DEFAULT_HOLIDAY_ENDPOINT;

/// Optional user settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Holiday list URL (env: `CJ_HOLIDAY_ENDPOINT`).
    pub holiday_endpoint: Option<String>,
    /// Fixed offset for backup date-times (env: `CJ_UTC_OFFSET_MINUTES`).
    pub utc_offset_minutes: Option<i32>,
    /// IANA zone for backup date-times, e.g. `Europe/Berlin`
    /// (env: `CJ_TIMEZONE`). Without either setting the host zone is used.
    pub timezone: Option<String>,
    /// HTTP timeout for the holiday fetch.
    pub http_timeout_secs: Option<u64>,
}

/// Load settings from `<home>/config.json`, or defaults if it is absent.
///
/// # Errors
///
/// Returns `Config` if the file exists but cannot be read or parsed.
pub fn load_settings() -> Result<Settings> {
    match super::global_caljournal_dir() {
        Some(dir) => load_settings_from(&dir.join("config.json")),
        None => Ok(Settings::default()),
    }
}

/// Load settings from a specific file, or defaults if it is absent.
///
/// # Errors
///
/// Returns `Config` if the file exists but cannot be read or parsed.
pub fn load_settings_from(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }

    let content = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Failed to read config file: {e}")))?;

    serde_json::from_str(&content)
        .map_err(|e| Error::Config(format!("Failed to parse config file: {e}")))
}

impl Settings {
    /// Holiday endpoint: env, then file, then the built-in default.
    #[must_use]
    pub fn holiday_endpoint(&self) -> String {
        std::env::var("CJ_HOLIDAY_ENDPOINT")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .or_else(|| self.holiday_endpoint.clone())
            .unwrap_or_else(|| DEFAULT_HOLIDAY_ENDPOINT.to_string())
    }

    /// Zone for encoding and decoding backup date-times.
    ///
    /// Environment beats file, and a fixed offset beats a named zone.
    ///
    /// # Errors
    ///
    /// Returns `Config` for an unreadable offset or an unknown zone name.
    pub fn zone(&self) -> Result<Zone> {
        self.zone_with(
            env_value("CJ_UTC_OFFSET_MINUTES"),
            env_value("CJ_TIMEZONE"),
        )
    }

    fn zone_with(&self, env_offset: Option<String>, env_timezone: Option<String>) -> Result<Zone> {
        if let Some(text) = env_offset {
            let minutes = text.parse::<i32>().map_err(|e| {
                Error::Config(format!("CJ_UTC_OFFSET_MINUTES is not a number: {e}"))
            })?;
            return fixed_zone(minutes);
        }
        if let Some(name) = env_timezone {
            return named_zone(&name);
        }
        if let Some(minutes) = self.utc_offset_minutes {
            return fixed_zone(minutes);
        }
        match &self.timezone {
            Some(name) => named_zone(name),
            None => Ok(Zone::Local),
        }
    }

    #[must_use]
    pub fn http_timeout(&self) -> Option<Duration> {
        self.http_timeout_secs.map(Duration::from_secs)
    }
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn fixed_zone(minutes: i32) -> Result<Zone> {
    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .map(Zone::Fixed)
        .ok_or_else(|| Error::Config(format!("invalid UTC offset: {minutes} minutes")))
}

fn named_zone(name: &str) -> Result<Zone> {
    name.parse::<Tz>()
        .map(Zone::Named)
        .map_err(|e| Error::Config(format!("unknown time zone '{name}': {e}")))
}
