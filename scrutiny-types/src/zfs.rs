// SPDX-License-Identifier: GPL-3.0-only

//! ZFS pool models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::device::null_as_empty;

/// Pool or vdev state as reported by `zpool status`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ZfsPoolStatus {
    Online,
    Degraded,
    Faulted,
    Offline,
    Unavail,
    Removed,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Pool health verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolVerdict {
    Passed,
    Failed,
    Unknown,
}

impl PoolVerdict {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Unknown => "unknown",
        }
    }
}

impl ZfsPoolStatus {
    pub fn verdict(self) -> PoolVerdict {
        match self {
            Self::Online => PoolVerdict::Passed,
            Self::Degraded | Self::Faulted => PoolVerdict::Failed,
            _ => PoolVerdict::Unknown,
        }
    }

    /// Pool is not serving I/O at all
    pub fn is_unavailable(self) -> bool {
        matches!(
            self,
            Self::Faulted | Self::Unavail | Self::Offline | Self::Removed
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Online => "ONLINE",
            Self::Degraded => "DEGRADED",
            Self::Faulted => "FAULTED",
            Self::Offline => "OFFLINE",
            Self::Unavail => "UNAVAIL",
            Self::Removed => "REMOVED",
            Self::Unknown => "UNKNOWN",
        }
    }
}

/// Node of a pool's vdev tree
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZfsVdev {
    pub id: u64,
    pub pool_guid: String,
    pub parent_id: Option<u64>,
    pub name: String,

    /// "mirror", "raidz1", "disk", ...
    #[serde(rename = "type")]
    pub vdev_type: String,

    pub status: ZfsPoolStatus,
    pub path: String,
    pub read_errors: u64,
    pub write_errors: u64,
    pub checksum_errors: u64,

    #[serde(deserialize_with = "null_as_empty")]
    pub children: Vec<ZfsVdev>,
}

impl ZfsVdev {
    pub fn error_count(&self) -> u64 {
        self.read_errors
            .saturating_add(self.write_errors)
            .saturating_add(self.checksum_errors)
    }

    /// Leaf devices below this vdev (itself when it has no children)
    pub fn leaves(&self) -> Vec<&ZfsVdev> {
        if self.children.is_empty() {
            return vec![self];
        }
        self.children.iter().flat_map(ZfsVdev::leaves).collect()
    }
}

/// Pool summary as listed on the pools page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZfsPool {
    pub guid: String,
    pub name: String,

    #[serde(deserialize_with = "null_as_empty")]
    pub host_id: String,

    /// Custom label set by the user
    #[serde(deserialize_with = "null_as_empty")]
    pub label: String,

    pub archived: bool,
    pub muted: bool,
    pub status: ZfsPoolStatus,

    // === Capacity ===
    pub size: u64,
    pub allocated: u64,
    pub free: u64,
    pub fragmentation: u32,
    pub capacity_percent: f64,

    // === Scrub ===
    pub scrub_state: String,
    pub scrub_start: Option<DateTime<Utc>>,
    pub scrub_end: Option<DateTime<Utc>>,
    pub scrub_percent: f64,
    pub scrub_errors: u64,

    // === Errors ===
    pub total_read_errors: u64,
    pub total_write_errors: u64,
    pub total_checksum_errors: u64,

    #[serde(deserialize_with = "null_as_empty")]
    pub vdevs: Vec<ZfsVdev>,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl ZfsPool {
    pub fn verdict(&self) -> PoolVerdict {
        self.status.verdict()
    }

    /// Custom label when set, otherwise the pool name
    pub fn title(&self) -> &str {
        if self.label.is_empty() {
            &self.name
        } else {
            &self.label
        }
    }

    pub fn total_errors(&self) -> u64 {
        self.total_read_errors
            .saturating_add(self.total_write_errors)
            .saturating_add(self.total_checksum_errors)
    }

    pub fn is_scrubbing(&self) -> bool {
        self.scrub_state == "scanning"
    }
}

/// One capacity sample of a pool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZfsCapacitySample {
    pub date: DateTime<Utc>,
    pub size: u64,
    pub allocated: u64,
    pub free: u64,
    pub capacity_percent: f64,
    pub fragmentation: u32,
    pub status: ZfsPoolStatus,
}

/// Pool with its capacity history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZfsPoolDetails {
    pub pool: ZfsPool,

    #[serde(default)]
    pub metrics_history: Vec<ZfsCapacitySample>,
}

/// Pools shown on the pools page: archived ones are hidden unless requested.
pub fn visible_pools<'a, I>(pools: I, show_archived: bool) -> Vec<&'a ZfsPool>
where
    I: IntoIterator<Item = &'a ZfsPool>,
{
    pools
        .into_iter()
        .filter(|pool| show_archived || !pool.archived)
        .collect()
}
