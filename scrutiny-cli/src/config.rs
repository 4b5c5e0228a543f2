// SPDX-License-Identifier: GPL-3.0-only

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use scrutiny_contracts::{DashboardErrorKind, SettingsRepository};
use scrutiny_types::{AppConfig, AppConfigUpdate};

const CONFIG_DIR: &str = "scrutiny";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LoggingLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LoggingLevel {
    pub fn as_directive(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

/// Where dashboard data comes from
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    #[default]
    Demo,
    Snapshot,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct Config {
    pub log_level: LoggingLevel,
    pub log_to_disk: bool,
    pub source: Source,

    /// Directory of saved backend responses, required for the snapshot source
    pub snapshot_dir: Option<PathBuf>,

    /// Overrides merged over the repository's settings
    pub settings: AppConfigUpdate,
}

impl Config {
    pub fn from_toml(raw: &str) -> Result<Self> {
        let config: Config = toml::from_str(raw).context("invalid configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`, or from the default location when none is given.
    ///
    /// A missing file at the default location yields the defaults; a missing
    /// explicit path is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => match default_config_path() {
                Some(path) => (path, false),
                None => return Ok(Self::default()),
            },
        };

        if !explicit && !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(&path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml(&raw).with_context(|| format!("in config {}", path.display()))
    }

    fn validate(&self) -> Result<()> {
        if self.source == Source::Snapshot && self.snapshot_dir.is_none() {
            bail!("source = \"snapshot\" requires snapshot_dir");
        }
        Ok(())
    }
}

/// Repository settings with the config overrides applied.
///
/// A source without saved settings falls back to the defaults.
pub async fn effective_settings(
    repo: &dyn SettingsRepository,
    overrides: &AppConfigUpdate,
) -> Result<AppConfig> {
    let settings = match repo.settings().await {
        Ok(settings) => settings,
        Err(e) if e.kind == DashboardErrorKind::NotFound => {
            tracing::debug!("No saved settings, using defaults: {e}");
            AppConfig::default()
        }
        Err(e) => return Err(e).context("failed to load settings"),
    };
    Ok(settings.with_update(overrides))
}

pub fn default_config_path() -> Option<PathBuf> {
    if let Some(xdg_config) = std::env::var_os("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg_config).join(CONFIG_DIR).join(CONFIG_FILE));
    }

    std::env::var_os("HOME").map(|home| {
        PathBuf::from(home)
            .join(".config")
            .join(CONFIG_DIR)
            .join(CONFIG_FILE)
    })
}
