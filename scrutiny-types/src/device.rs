// SPDX-License-Identifier: GPL-3.0-only

//! Device summary models
//!
//! These mirror the backend's device summary payloads. Optional string fields
//! decode as empty strings; every consumer treats an empty string as absent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::status::{StatusThreshold, Verdict, resolve_status};

/// Device record as stored by the backend
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceModel {
    // === Identity ===
    /// World Wide Name, the device's primary key
    pub wwn: String,

    /// Kernel device name without the `/dev/` prefix (e.g. "sda")
    pub device_name: String,

    /// Filesystem UUID (`/dev/disk/by-uuid`)
    #[serde(deserialize_with = "null_as_empty")]
    pub device_uuid: String,

    /// Serial id (`/dev/disk/by-id`)
    #[serde(deserialize_with = "null_as_empty")]
    pub device_serial_id: String,

    /// Volume label (`/dev/disk/by-label`)
    #[serde(deserialize_with = "null_as_empty")]
    pub device_label: String,

    /// Custom label set by the user
    #[serde(deserialize_with = "null_as_empty")]
    pub label: String,

    /// Collector host the device is attached to
    #[serde(deserialize_with = "null_as_empty")]
    pub host_id: String,

    // === Hardware ===
    pub manufacturer: String,
    pub model_name: String,
    pub interface_type: String,
    pub interface_speed: String,
    pub serial_number: String,
    pub firmware: String,

    /// Rotation rate in RPM (0 for solid state)
    pub rotational_speed: u32,

    /// Capacity in bytes
    pub capacity: u64,

    pub form_factor: String,
    pub smart_support: bool,

    /// Protocol used to read SMART data ("ATA", "NVMe", "SCSI")
    pub device_protocol: String,

    /// smartctl device type (e.g. "ata", "scsi", "nvme", "sat")
    #[serde(deserialize_with = "null_as_empty")]
    pub device_type: String,

    // === State ===
    /// Raw device status bitmask
    pub device_status: u32,

    pub muted: bool,
    pub archived: bool,
}

impl DeviceModel {
    pub fn is_ata(&self) -> bool {
        self.device_protocol == "ATA"
    }
}

/// Latest SMART readings for a device
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmartSummary {
    /// When the collector last reported
    pub collector_date: Option<DateTime<Utc>>,

    /// Temperature in Celsius
    pub temp: Option<f64>,

    pub power_on_hours: Option<u64>,
}

/// One point of a temperature history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureSample {
    pub date: DateTime<Utc>,
    pub temp: f64,
}

/// Device plus its latest SMART summary, as listed on the dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceSummary {
    pub device: DeviceModel,

    /// Present only once SMART data has been collected
    #[serde(default)]
    pub smart: Option<SmartSummary>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub temp_history: Vec<TemperatureSample>,
}

impl DeviceSummary {
    pub fn has_smart_data(&self) -> bool {
        self.smart.is_some()
    }

    /// Health verdict under the given threshold
    pub fn verdict(&self, threshold: StatusThreshold, include_reason: bool) -> Verdict {
        resolve_status(
            self.device.device_status,
            self.has_smart_data(),
            threshold,
            include_reason,
        )
    }

    pub fn power_on_hours(&self) -> Option<u64> {
        self.smart.as_ref().and_then(|smart| smart.power_on_hours)
    }

    pub fn temperature(&self) -> Option<f64> {
        self.smart.as_ref().and_then(|smart| smart.temp)
    }
}

/// Devices shown on the dashboard: archived ones are hidden unless requested.
pub fn visible_devices<'a, I>(summaries: I, show_archived: bool) -> Vec<&'a DeviceSummary>
where
    I: IntoIterator<Item = &'a DeviceSummary>,
{
    summaries
        .into_iter()
        .filter(|summary| show_archived || !summary.device.archived)
        .collect()
}

/// Devices of one collector host
#[derive(Debug, Clone, PartialEq)]
pub struct HostGroup<'a> {
    /// Empty when the devices report no host
    pub host_id: &'a str,
    pub devices: Vec<&'a DeviceSummary>,
}

/// Group devices by host id, keeping hosts in first-appearance order.
pub fn group_by_host<'a, I>(summaries: I) -> Vec<HostGroup<'a>>
where
    I: IntoIterator<Item = &'a DeviceSummary>,
{
    let mut groups: Vec<HostGroup<'a>> = Vec::new();

    for summary in summaries {
        let host_id = summary.device.host_id.as_str();
        match groups.iter_mut().find(|group| group.host_id == host_id) {
            Some(group) => group.devices.push(summary),
            None => groups.push(HostGroup {
                host_id,
                devices: vec![summary],
            }),
        }
    }

    groups
}

pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
