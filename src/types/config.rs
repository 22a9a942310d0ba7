//! Configuration structures.
//!
//! Configuration is loaded from a JSON file with environment overrides.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::errors::{Error, Result};

/// Marker left in the endpoint URL until a real Apps Script deployment is set.
pub const SCRIPT_URL_PLACEHOLDER: &str = "SEU_SCRIPT_ID";

/// Environment variable overriding `submission.script_url`.
pub const SCRIPT_URL_ENV: &str = "CEJUSC_SCRIPT_URL";

/// Global intake configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Weekly business-hours table.
    #[serde(default)]
    pub schedule: ScheduleConfig,

    /// Spreadsheet endpoint configuration.
    #[serde(default)]
    pub submission: SubmissionConfig,

    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Read a JSON config file. Missing sections fall back to defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        serde_json::from_str(&raw)
            .map_err(|e| Error::config(format!("{}: {}", path.display(), e)))
    }

    /// Load from an optional file, then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        config.apply_env_overrides();
        config.schedule.check()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        self.override_script_url(std::env::var(SCRIPT_URL_ENV).ok());
    }

    /// Blank values leave the configured URL in place.
    fn override_script_url(&mut self, url: Option<String>) {
        if let Some(url) = url.as_deref().map(str::trim).filter(|u| !u.is_empty()) {
            self.submission.script_url = url.to_string();
        }
    }
}

/// Opening hours for one day, compared on the hour only: open while
/// `open_hour <= hour < close_hour`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourWindow {
    pub open_hour: u32,
    pub close_hour: u32,
}

impl HourWindow {
    pub const fn new(open_hour: u32, close_hour: u32) -> Self {
        Self {
            open_hour,
            close_hour,
        }
    }

    pub fn contains_hour(&self, hour: u32) -> bool {
        hour >= self.open_hour && hour < self.close_hour
    }
}

/// Weekly business-hours table. `None` (an explicit `null` in the config
/// file) marks a closed day; an omitted day keeps its default window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Monday through Friday.
    pub weekdays: Option<HourWindow>,

    /// Saturday. Defaults to the advertised 09:00-18:00; set 8..23 for the
    /// extended evening window.
    pub saturday: Option<HourWindow>,

    pub sunday: Option<HourWindow>,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            weekdays: Some(HourWindow::new(9, 18)),
            saturday: Some(HourWindow::new(9, 18)),
            sunday: None,
        }
    }
}

impl ScheduleConfig {
    fn check(&self) -> Result<()> {
        for (label, window) in [
            ("weekdays", self.weekdays),
            ("saturday", self.saturday),
            ("sunday", self.sunday),
        ] {
            if let Some(w) = window {
                if w.open_hour >= w.close_hour || w.close_hour > 24 {
                    return Err(Error::config(format!(
                        "schedule.{label}: invalid window {}..{}",
                        w.open_hour, w.close_hour
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Spreadsheet endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionConfig {
    /// Google Apps Script web-app URL receiving the JSON payload.
    pub script_url: String,

    /// Upper bound on the POST round trip.
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,

    /// Fixed wait after the request before reporting success. The endpoint's
    /// response is opaque so success is assumed once this elapses.
    #[serde(with = "humantime_serde")]
    pub settle_delay: Duration,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            script_url: format!("https://script.google.com/macros/s/{SCRIPT_URL_PLACEHOLDER}/exec"),
            request_timeout: Duration::from_secs(30),
            settle_delay: Duration::from_secs(2),
        }
    }
}

impl SubmissionConfig {
    /// True while the URL still carries the setup placeholder.
    pub fn is_placeholder(&self) -> bool {
        self.script_url.contains(SCRIPT_URL_PLACEHOLDER)
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Tracing log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable JSON log formatting.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}
