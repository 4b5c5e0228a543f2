// SPDX-License-Identifier: GPL-3.0-only

//! Dashboard ordering of device summaries

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{DeviceSummary, ParseError, TitleScheme};

/// How the dashboard orders devices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortStrategy {
    /// Alphabetical by display title
    Title,
    /// Youngest (fewest power-on hours) first
    Age,
    /// Failures first, then devices without data, then healthy ones.
    /// Unrecognized keys, including the settings value "name", sort this way.
    #[default]
    #[serde(other)]
    Status,
}

impl SortStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::Title => "title",
            Self::Age => "age",
        }
    }

    /// Strategy for a sort key given by name; unknown keys sort by status.
    pub fn from_key(key: &str) -> Self {
        match key {
            "title" => Self::Title,
            "age" => Self::Age,
            _ => Self::Status,
        }
    }
}

impl FromStr for SortStrategy {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "status" => Ok(Self::Status),
            "title" => Ok(Self::Title),
            "age" => Ok(Self::Age),
            _ => Err(ParseError::unknown("sort strategy", s)),
        }
    }
}

impl fmt::Display for SortStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status rank: failed devices are negative (worst first), devices without
/// SMART data rank 0 and passing devices rank 1.
fn status_rank(summary: &DeviceSummary) -> i64 {
    if !summary.has_smart_data() {
        0
    } else if summary.device.device_status == 0 {
        1
    } else {
        -i64::from(summary.device.device_status)
    }
}

/// Order device summaries for display.
///
/// Returns a new ordering; the input is left untouched. The sort is stable,
/// so devices that compare equal keep their input order.
pub fn sort_devices<'a, I>(
    summaries: I,
    strategy: SortStrategy,
    display: TitleScheme,
) -> Vec<&'a DeviceSummary>
where
    I: IntoIterator<Item = &'a DeviceSummary>,
{
    let mut sorted: Vec<&DeviceSummary> = summaries.into_iter().collect();

    match strategy {
        SortStrategy::Status => sorted.sort_by_key(|summary| status_rank(summary)),
        SortStrategy::Age => {
            sorted.sort_by_key(|summary| summary.power_on_hours().unwrap_or(0))
        }
        SortStrategy::Title => {
            let mut keyed: Vec<(String, &DeviceSummary)> = sorted
                .into_iter()
                .map(|summary| (summary.device.title_or_name(display), summary))
                .collect();
            keyed.sort_by(|left, right| left.0.cmp(&right.0));
            sorted = keyed.into_iter().map(|(_, summary)| summary).collect();
        }
    }

    sorted
}

/// [`sort_devices`] with the sort key and display scheme given by name.
pub fn sort_devices_by<'a, I>(summaries: I, sort_by: &str, display: &str) -> Vec<&'a DeviceSummary>
where
    I: IntoIterator<Item = &'a DeviceSummary>,
{
    let strategy = SortStrategy::from_key(sort_by);

    match display.parse::<TitleScheme>() {
        Ok(scheme) => sort_devices(summaries, strategy, scheme),
        // An unknown display scheme titles every device as empty, so each
        // one falls back to its name title.
        Err(_) => sort_devices(summaries, strategy, TitleScheme::Name),
    }
}
