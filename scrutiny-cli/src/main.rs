// SPDX-License-Identifier: GPL-3.0-only

mod config;
mod logging;
mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use scrutiny_contracts::Repositories;
use scrutiny_types::{
    AppConfig, SortStrategy, TitleScheme, Wwn, attribute_rows, sort_devices, visible_devices,
    visible_pools,
};

use crate::config::{Config, Source};

/// Disk health dashboard for Scrutiny
#[derive(Parser)]
#[command(name = "scrutiny")]
#[command(about = "Scrutiny disk health dashboard", long_about = None)]
struct Cli {
    /// Configuration file (defaults to $XDG_CONFIG_HOME/scrutiny/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Use the built-in demo data
    #[arg(long, global = true, conflicts_with = "snapshot")]
    demo: bool,

    /// Read saved backend responses from this directory
    #[arg(long, global = true, value_name = "DIR")]
    snapshot: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the device summary, grouped by host
    Summary {
        /// Sort order: status, title or age (defaults to the dashboard setting)
        #[arg(long)]
        sort: Option<String>,
        /// Title scheme: name, serial_number, uuid or label (defaults to the dashboard setting)
        #[arg(long)]
        display: Option<String>,
        /// Include the failure reason in the status
        #[arg(long)]
        reason: bool,
        /// Include archived devices
        #[arg(long)]
        show_archived: bool,
    },
    /// Show ZFS pools
    Pools {
        /// Include archived pools
        #[arg(long)]
        show_archived: bool,
    },
    /// Show the SMART attributes of a device
    Attributes {
        /// Device WWN
        wwn: String,
        /// Show every attribute, not only critical ones
        #[arg(long)]
        all: bool,
    },
    /// Show the effective settings
    Settings,
    /// Change a device
    Device {
        #[command(subcommand)]
        action: DeviceAction,
    },
}

#[derive(Subcommand)]
enum DeviceAction {
    /// Stop notifications for a device
    Mute { wwn: String },
    /// Resume notifications for a device
    Unmute { wwn: String },
    /// Hide a device from the dashboard
    Archive { wwn: String },
    /// Show an archived device again
    Unarchive { wwn: String },
    /// Remove a device and its history
    Delete { wwn: String },
    /// Set a custom label
    Label { wwn: String, label: String },
}

impl DeviceAction {
    fn wwn(&self) -> &str {
        match self {
            Self::Mute { wwn }
            | Self::Unmute { wwn }
            | Self::Archive { wwn }
            | Self::Unarchive { wwn }
            | Self::Delete { wwn }
            | Self::Label { wwn, .. } => wwn,
        }
    }
}

fn open_repositories(cli: &Cli, config: &Config) -> Result<Repositories> {
    if cli.demo {
        return Ok(Repositories::demo());
    }
    if let Some(dir) = &cli.snapshot {
        return Ok(Repositories::snapshot(dir));
    }

    match (config.source, &config.snapshot_dir) {
        (Source::Snapshot, Some(dir)) => Ok(Repositories::snapshot(dir)),
        (Source::Snapshot, None) => anyhow::bail!("snapshot source has no snapshot_dir"),
        (Source::Demo, _) => Ok(Repositories::demo()),
    }
}

fn print_lines(lines: impl IntoIterator<Item = String>) {
    for line in lines {
        println!("{line}");
    }
}

/// Settings with the `summary` flags applied. Unknown sort keys sort by
/// status and unknown display schemes title by name, for ordering and
/// rendering alike.
fn summary_settings(settings: &AppConfig, sort: Option<&str>, display: Option<&str>) -> AppConfig {
    let mut shown = settings.clone();
    if let Some(sort) = sort {
        shown.dashboard_sort = SortStrategy::from_key(sort);
    }
    if let Some(scheme) = display {
        shown.dashboard_display = scheme.parse().unwrap_or_else(|_| {
            tracing::warn!("Unknown display scheme {scheme:?}, using name");
            TitleScheme::Name
        });
    }
    shown
}

async fn show_summary(
    repos: &Repositories,
    settings: &AppConfig,
    sort: Option<&str>,
    display: Option<&str>,
    include_reason: bool,
    show_archived: bool,
) -> Result<()> {
    let summaries = repos
        .devices
        .summary()
        .await
        .context("failed to load device summary")?;

    let shown = summary_settings(settings, sort, display);
    let visible = visible_devices(&summaries, show_archived);
    let sorted = sort_devices(visible, shown.dashboard_sort, shown.dashboard_display);

    tracing::debug!("Showing {} of {} devices", sorted.len(), summaries.len());
    print_lines(render::summary_lines(&sorted, &shown, include_reason));
    Ok(())
}

async fn run_device_action(repos: &Repositories, action: &DeviceAction) -> Result<()> {
    let wwn: Wwn = action
        .wwn()
        .parse()
        .with_context(|| format!("invalid device: {}", action.wwn()))?;
    let devices = &repos.devices;

    let result = match action {
        DeviceAction::Mute { .. } => devices.mute(&wwn).await,
        DeviceAction::Unmute { .. } => devices.unmute(&wwn).await,
        DeviceAction::Archive { .. } => devices.archive(&wwn).await,
        DeviceAction::Unarchive { .. } => devices.unarchive(&wwn).await,
        DeviceAction::Delete { .. } => devices.delete(&wwn).await,
        DeviceAction::Label { label, .. } => devices.set_label(&wwn, label).await,
    };
    result.with_context(|| format!("device command failed for {wwn}"))?;

    tracing::info!("Device command applied to {wwn}");
    println!("ok: {wwn}");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;
    logging::init(&config);

    let repos = open_repositories(&cli, &config)?;
    let settings = config::effective_settings(repos.settings.as_ref(), &config.settings).await?;

    match &cli.command {
        Commands::Summary {
            sort,
            display,
            reason,
            show_archived,
        } => {
            show_summary(
                &repos,
                &settings,
                sort.as_deref(),
                display.as_deref(),
                *reason,
                *show_archived,
            )
            .await?;
        }
        Commands::Pools { show_archived } => {
            let pools = repos.pools.pools().await.context("failed to load pools")?;
            let visible = visible_pools(&pools, *show_archived);
            print_lines(render::pool_lines(&visible, &settings));
        }
        Commands::Attributes { wwn, all } => {
            let wwn: Wwn = wwn.parse().with_context(|| format!("invalid device: {wwn}"))?;
            let details = repos
                .devices
                .device_details(&wwn)
                .await
                .with_context(|| format!("failed to load details for {wwn}"))?;

            let table = attribute_rows(&details, !*all);
            println!("{}", details.device.display_title(settings.dashboard_display));
            print_lines(render::attribute_lines(&table));
        }
        Commands::Settings => {
            let rendered =
                toml::to_string_pretty(&settings).context("failed to render settings")?;
            print!("{rendered}");
        }
        Commands::Device { action } => run_device_action(&repos, action).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_flags_override_settings() {
        let settings = AppConfig::default();

        let shown = summary_settings(&settings, Some("age"), Some("uuid"));
        assert_eq!(shown.dashboard_sort, SortStrategy::Age);
        assert_eq!(shown.dashboard_display, TitleScheme::Uuid);

        let unchanged = summary_settings(&settings, None, None);
        assert_eq!(unchanged, settings);
    }

    #[test]
    fn unknown_display_titles_by_name() {
        let settings = AppConfig {
            dashboard_display: TitleScheme::Label,
            ..Default::default()
        };

        let shown = summary_settings(&settings, Some("name"), Some("wwn"));
        assert_eq!(shown.dashboard_display, TitleScheme::Name);
        assert_eq!(shown.dashboard_sort, SortStrategy::Status);
    }
}
