// SPDX-License-Identifier: GPL-3.0-only

//! User settings shared by the dashboard and the backend
//!
//! Enumerated string settings decode tolerantly: unknown values fall back to
//! the default variant instead of failing the whole settings document.

use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::{ParseError, SortStrategy, StatusThreshold, TitleScheme};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeMode {
    Light,
    System,
    #[default]
    #[serde(other)]
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureUnit {
    Fahrenheit,
    #[default]
    #[serde(other)]
    Celsius,
}

impl TemperatureUnit {
    /// Unit for a key given by name; unknown keys mean Celsius.
    pub fn from_key(key: &str) -> Self {
        match key {
            "fahrenheit" => Self::Fahrenheit,
            _ => Self::Celsius,
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            Self::Celsius => "°C",
            Self::Fahrenheit => "°F",
        }
    }
}

impl FromStr for TemperatureUnit {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "celsius" => Ok(Self::Celsius),
            "fahrenheit" => Ok(Self::Fahrenheit),
            _ => Err(ParseError::unknown("temperature unit", s)),
        }
    }
}

/// How power-on hours are presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PoweredOnHoursUnit {
    /// Human readable duration ("1 year, 8 months")
    #[default]
    Humanize,
    /// Plain hour count ("15273 hours")
    DeviceHours,
}

impl PoweredOnHoursUnit {
    /// Unit for a key given by name; anything but `device_hours` humanizes.
    pub fn from_key(key: &str) -> Self {
        match key {
            "device_hours" => Self::DeviceHours,
            _ => Self::Humanize,
        }
    }
}

impl<'de> Deserialize<'de> for PoweredOnHoursUnit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Older settings documents store this as a single-element list.
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum OneOrMany {
            One(String),
            Many(Vec<String>),
        }

        let key = match OneOrMany::deserialize(deserializer)? {
            OneOrMany::One(key) => key,
            OneOrMany::Many(keys) => keys.into_iter().next().unwrap_or_default(),
        };
        Ok(Self::from_key(&key))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStroke {
    Straight,
    Stepline,
    #[default]
    #[serde(other)]
    Smooth,
}

/// Which attributes feed the device status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum StatusFilterAttributes {
    #[default]
    All,
    Critical,
}

impl TryFrom<u8> for StatusFilterAttributes {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::All),
            1 => Ok(Self::Critical),
            other => Err(ParseError::unknown(
                "status filter",
                &other.to_string(),
            )),
        }
    }
}

impl From<StatusFilterAttributes> for u8 {
    fn from(value: StatusFilterAttributes) -> Self {
        match value {
            StatusFilterAttributes::All => 0,
            StatusFilterAttributes::Critical => 1,
        }
    }
}

/// Lowest severity that triggers a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum NotifyLevel {
    Warn,
    #[default]
    Fail,
}

impl TryFrom<u8> for NotifyLevel {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Warn),
            2 => Ok(Self::Fail),
            other => Err(ParseError::unknown("notify level", &other.to_string())),
        }
    }
}

impl From<NotifyLevel> for u8 {
    fn from(value: NotifyLevel) -> Self {
        match value {
            NotifyLevel::Warn => 1,
            NotifyLevel::Fail => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsSettings {
    pub status_threshold: StatusThreshold,
    pub status_filter_attributes: StatusFilterAttributes,
    pub notify_level: NotifyLevel,
    pub repeat_notifications: bool,
}

impl Default for MetricsSettings {
    fn default() -> Self {
        Self {
            status_threshold: StatusThreshold::Both,
            status_filter_attributes: StatusFilterAttributes::All,
            notify_level: NotifyLevel::Fail,
            repeat_notifications: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectorSettings {
    pub retrieve_sct_temperature_history: bool,
}

/// Application settings
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Backend version, filled in from the settings response
    pub version: String,
    pub commit: String,
    pub date: String,

    pub dashboard_display: TitleScheme,
    pub dashboard_sort: SortStrategy,
    pub temperature_unit: TemperatureUnit,
    pub file_size_si_units: bool,
    pub powered_on_hours_unit: PoweredOnHoursUnit,
    pub line_stroke: LineStroke,
    pub theme: ThemeMode,
    pub metrics: MetricsSettings,
    pub collector: CollectorSettings,
}

/// Partial settings update; unset fields keep their current value
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfigUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dashboard_display: Option<TitleScheme>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dashboard_sort: Option<SortStrategy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_unit: Option<TemperatureUnit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size_si_units: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub powered_on_hours_unit: Option<PoweredOnHoursUnit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_stroke: Option<LineStroke>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<ThemeMode>,
    /// Replaces the metrics section as a whole
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<MetricsSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collector: Option<CollectorSettings>,
}

impl AppConfigUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl AppConfig {
    /// Merge a partial update over these settings.
    pub fn apply(&mut self, update: &AppConfigUpdate) {
        if let Some(value) = update.dashboard_display {
            self.dashboard_display = value;
        }
        if let Some(value) = update.dashboard_sort {
            self.dashboard_sort = value;
        }
        if let Some(value) = update.temperature_unit {
            self.temperature_unit = value;
        }
        if let Some(value) = update.file_size_si_units {
            self.file_size_si_units = value;
        }
        if let Some(value) = update.powered_on_hours_unit {
            self.powered_on_hours_unit = value;
        }
        if let Some(value) = update.line_stroke {
            self.line_stroke = value;
        }
        if let Some(value) = update.theme {
            self.theme = value;
        }
        if let Some(value) = update.metrics {
            self.metrics = value;
        }
        if let Some(value) = update.collector {
            self.collector = value;
        }
    }

    pub fn with_update(mut self, update: &AppConfigUpdate) -> Self {
        self.apply(update);
        self
    }

    pub fn status_threshold(&self) -> StatusThreshold {
        self.metrics.status_threshold
    }
}
