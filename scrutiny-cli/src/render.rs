// SPDX-License-Identifier: GPL-3.0-only

//! Plain-text rendering of dashboard views

use scrutiny_types::{
    AppConfig, AttributeTable, DeviceSummary, HumanizeOptions, ZfsPool, format_device_hours,
    format_file_size, format_temperature, group_by_host,
};

const NO_VALUE: &str = "--";

fn device_line(summary: &DeviceSummary, settings: &AppConfig, include_reason: bool) -> String {
    let verdict = summary.verdict(settings.status_threshold(), include_reason);
    let temperature = summary
        .temperature()
        .map(|temp| format_temperature(temp, settings.temperature_unit, true))
        .unwrap_or_else(|| NO_VALUE.to_string());
    let powered_on = format_device_hours(
        summary.power_on_hours(),
        settings.powered_on_hours_unit,
        &HumanizeOptions::card(),
    );

    let mut flags = Vec::new();
    if summary.device.muted {
        flags.push("muted");
    }
    if summary.device.archived {
        flags.push("archived");
    }

    let mut line = format!(
        "  [{verdict}] {}  {temperature}  {powered_on}  {}",
        summary.device.display_title(settings.dashboard_display),
        format_file_size(summary.device.capacity, settings.file_size_si_units),
    );
    if !flags.is_empty() {
        line.push_str(&format!("  ({})", flags.join(", ")));
    }
    line
}

/// Device summary grouped by host, in the given order
pub fn summary_lines(
    summaries: &[&DeviceSummary],
    settings: &AppConfig,
    include_reason: bool,
) -> Vec<String> {
    let mut lines = Vec::new();

    for group in group_by_host(summaries.iter().copied()) {
        let host = if group.host_id.is_empty() {
            "(no host)"
        } else {
            group.host_id
        };
        lines.push(format!("{host}:"));
        lines.extend(
            group
                .devices
                .iter()
                .map(|summary| device_line(summary, settings, include_reason)),
        );
    }

    lines
}

pub fn pool_lines(pools: &[&ZfsPool], settings: &AppConfig) -> Vec<String> {
    pools
        .iter()
        .map(|pool| {
            let mut line = format!(
                "[{}] {} ({})  {} / {} used  {:.0}%",
                pool.verdict().as_str(),
                pool.title(),
                pool.status.as_str(),
                format_file_size(pool.allocated, settings.file_size_si_units),
                format_file_size(pool.size, settings.file_size_si_units),
                pool.capacity_percent,
            );
            if pool.total_errors() > 0 {
                line.push_str(&format!("  {} errors", pool.total_errors()));
            }
            if pool.is_scrubbing() {
                line.push_str(&format!("  scrub {:.1}%", pool.scrub_percent));
            }
            line
        })
        .collect()
}

pub fn attribute_lines(table: &AttributeTable<'_>) -> Vec<String> {
    let mut lines: Vec<String> = table
        .rows
        .iter()
        .map(|row| {
            format!(
                "{:>20}  {:<36}  {:>12}  thresh {:<4}  {}",
                row.id.as_str(),
                row.display_name(),
                row.display_value,
                row.attribute.thresh,
                row.verdict,
            )
        })
        .collect();

    if table.hidden_count > 0 {
        lines.push(format!(
            "{} non-critical attributes hidden (use --all)",
            table.hidden_count
        ));
    }
    lines
}
