// SPDX-License-Identifier: GPL-3.0-only

//! Backend response envelopes and request parameters
//!
//! The backend wraps every payload in a `{success, errors?, data}` envelope.
//! These types decode the envelopes and hand out the plain models.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::attribute::{AttributeId, AttributeMetadata, DeviceDetails, SmartResult};
use crate::device::{DeviceModel, DeviceSummary, TemperatureSample, null_as_empty};
use crate::settings::AppConfig;
use crate::zfs::{ZfsCapacitySample, ZfsPool, ZfsPoolDetails};
use crate::ParseError;

/// Time window for temperature history queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationKey {
    #[default]
    Forever,
    Year,
    Month,
    Week,
    Day,
}

impl DurationKey {
    pub const ALL: [DurationKey; 5] = [
        Self::Forever,
        Self::Year,
        Self::Month,
        Self::Week,
        Self::Day,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Forever => "forever",
            Self::Year => "year",
            Self::Month => "month",
            Self::Week => "week",
            Self::Day => "day",
        }
    }
}

impl FromStr for DurationKey {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| ParseError::unknown("duration key", s))
    }
}

impl fmt::Display for DurationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated device World Wide Name.
///
/// Accepts `0x`-prefixed hex (`0x5000c500a8f7c8c8`) or a canonical
/// 8-4-4-4-12 hex UUID, which some NVMe and virtual devices report instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Wwn(String);

impl Wwn {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_valid(value: &str) -> bool {
        is_hex_wwn(value) || is_uuid(value)
    }
}

fn is_hex_wwn(value: &str) -> bool {
    value
        .strip_prefix("0x")
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_hexdigit()))
}

fn is_uuid(value: &str) -> bool {
    const GROUPS: [usize; 5] = [8, 4, 4, 4, 12];

    let mut groups = value.split('-');
    let valid = GROUPS.iter().all(|len| {
        groups
            .next()
            .is_some_and(|group| group.len() == *len && group.bytes().all(|b| b.is_ascii_hexdigit()))
    });
    valid && groups.next().is_none()
}

impl FromStr for Wwn {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if Self::is_valid(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(ParseError::InvalidWwn(s.to_string()))
        }
    }
}

impl TryFrom<String> for Wwn {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if Self::is_valid(&value) {
            Ok(Self(value))
        } else {
            Err(ParseError::InvalidWwn(value))
        }
    }
}

impl<'de> Deserialize<'de> for Wwn {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Wwn::try_from(value).map_err(serde::de::Error::custom)
    }
}

impl AsRef<str> for Wwn {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Wwn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `{success, errors?, data}` envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseWrapper<T> {
    #[serde(default)]
    pub success: bool,

    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<serde_json::Value>,

    pub data: T,
}

impl<T> ResponseWrapper<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            data,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryData {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub summary: BTreeMap<String, DeviceSummary>,
}

pub type DeviceSummaryResponse = ResponseWrapper<SummaryData>;

impl DeviceSummaryResponse {
    /// Device summaries in wwn order
    pub fn into_summaries(self) -> Vec<DeviceSummary> {
        self.data.summary.into_values().collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TempHistoryData {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub temp_history: BTreeMap<String, Vec<TemperatureSample>>,
}

pub type TempHistoryResponse = ResponseWrapper<TempHistoryData>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceDetailsData {
    pub device: DeviceModel,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub smart_results: Vec<SmartResult>,
}

/// Device details envelope; attribute metadata sits beside `data`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceDetailsResponse {
    #[serde(default)]
    pub success: bool,

    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<serde_json::Value>,

    pub data: DeviceDetailsData,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub metadata: BTreeMap<AttributeId, AttributeMetadata>,
}

impl From<DeviceDetailsResponse> for DeviceDetails {
    fn from(response: DeviceDetailsResponse) -> Self {
        DeviceDetails {
            device: response.data.device,
            smart_results: response.data.smart_results,
            metadata: response.metadata,
        }
    }
}

impl From<DeviceDetails> for DeviceDetailsResponse {
    fn from(details: DeviceDetails) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            data: DeviceDetailsData {
                device: details.device,
                smart_results: details.smart_results,
            },
            metadata: details.metadata,
        }
    }
}

/// `{success, settings, version?}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsResponse {
    #[serde(default)]
    pub success: bool,

    #[serde(default)]
    pub settings: AppConfig,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl SettingsResponse {
    /// Settings with the backend version filled in when reported
    pub fn into_settings(self) -> AppConfig {
        let mut settings = self.settings;
        if let Some(version) = self.version {
            settings.version = version;
        }
        settings
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZfsSummaryData {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub pools: BTreeMap<String, ZfsPool>,
}

/// ZFS summary envelope; `success` may be missing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZfsSummaryResponse {
    #[serde(default)]
    pub success: bool,

    #[serde(default)]
    pub data: ZfsSummaryData,
}

impl ZfsSummaryResponse {
    /// Pools in guid order
    pub fn into_pools(self) -> Vec<ZfsPool> {
        self.data.pools.into_values().collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZfsPoolDetailsData {
    pub pool: ZfsPool,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub metrics_history: Vec<ZfsCapacitySample>,
}

pub type ZfsPoolDetailsResponse = ResponseWrapper<ZfsPoolDetailsData>;

impl From<ZfsPoolDetailsResponse> for ZfsPoolDetails {
    fn from(response: ZfsPoolDetailsResponse) -> Self {
        ZfsPoolDetails {
            pool: response.data.pool,
            metrics_history: response.data.metrics_history,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TitleScheme;
    use serde_json::json;

    #[test]
    fn wwn_accepts_hex_and_uuid() {
        assert!("0x5000c500a8f7c8c8".parse::<Wwn>().is_ok());
        assert!("0X5000".parse::<Wwn>().is_err());
        assert!("0x".parse::<Wwn>().is_err());
        assert!("0x50zz".parse::<Wwn>().is_err());
        assert!("123e4567-e89b-12d3-a456-426614174000".parse::<Wwn>().is_ok());
        assert!("123e4567-e89b-12d3-a456".parse::<Wwn>().is_err());
        assert!("123e4567-e89b-12d3-a456-426614174000-00".parse::<Wwn>().is_err());
        assert_eq!(
            "sda".parse::<Wwn>(),
            Err(ParseError::InvalidWwn("sda".to_string()))
        );
    }

    #[test]
    fn duration_keys_round_trip_names() {
        for key in DurationKey::ALL {
            assert_eq!(key.as_str().parse::<DurationKey>(), Ok(key));
        }
        assert!("decade".parse::<DurationKey>().is_err());
    }

    #[test]
    fn summary_envelope_yields_summaries() {
        let response: DeviceSummaryResponse = serde_json::from_value(json!({
            "success": true,
            "data": { "summary": {
                "0x5000cca264eb01d7": { "device": { "wwn": "0x5000cca264eb01d7", "device_name": "sdb" } },
                "0x5000c500a8f7c8c8": { "device": { "wwn": "0x5000c500a8f7c8c8", "device_name": "sda" },
                                        "smart": { "temp": 32, "power_on_hours": 100 } }
            }}
        }))
        .unwrap();

        let summaries = response.into_summaries();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].device.device_name, "sda");
        assert!(summaries[0].has_smart_data());
        assert!(!summaries[1].has_smart_data());
    }

    #[test]
    fn details_envelope_keeps_metadata_beside_data() {
        let response: DeviceDetailsResponse = serde_json::from_value(json!({
            "success": true,
            "data": {
                "device": { "wwn": "0x5000c500a8f7c8c8", "device_name": "sda", "model_name": "Disk" },
                "smart_results": [{
                    "date": "2024-03-01T10:00:00Z",
                    "temp": 30,
                    "power_on_hours": 100,
                    "power_cycle_count": 4,
                    "attrs": { "5": { "attribute_id": 5, "value": 100, "thresh": 10 } }
                }]
            },
            "metadata": { "5": { "display_name": "Reallocated Sectors Count", "critical": true } }
        }))
        .unwrap();

        let details = DeviceDetails::from(response);
        let id = AttributeId::from(5);
        assert!(details.metadata_for(&id).is_some_and(|meta| meta.critical));
        assert_eq!(details.latest_result().map(|r| r.attrs.len()), Some(1));
        assert_eq!(details.device.title(TitleScheme::Name), "/dev/sda - Disk");
    }

    #[test]
    fn settings_envelope_fills_version() {
        let response: SettingsResponse = serde_json::from_value(json!({
            "success": true,
            "settings": { "dashboard_sort": "age" },
            "version": "1.4.0"
        }))
        .unwrap();

        let settings = response.into_settings();
        assert_eq!(settings.version, "1.4.0");
        assert_eq!(settings.dashboard_sort, crate::SortStrategy::Age);
    }

    #[test]
    fn zfs_summary_tolerates_missing_fields() {
        let response: ZfsSummaryResponse =
            serde_json::from_value(json!({ "data": { "pools": null } })).unwrap();
        assert!(response.into_pools().is_empty());

        let response: ZfsSummaryResponse = serde_json::from_value(json!({})).unwrap();
        assert!(!response.success);
    }
}
