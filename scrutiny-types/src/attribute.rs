// SPDX-License-Identifier: GPL-3.0-only

//! SMART attribute models and the attribute table
//!
//! ATA attributes are keyed by numeric ids, NVMe and SCSI attributes by
//! names. Both are decoded into one canonical [`AttributeId`] at ingestion so
//! metadata lookups never have to guess the key type.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::status::{AttributeStatus, AttributeVerdict};
use crate::DeviceModel;

/// Canonical attribute key
///
/// Numeric ids are normalized (no leading zeros) and order numerically ahead
/// of named ids, which order lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttributeId(String);

impl AttributeId {
    pub fn new(id: impl AsRef<str>) -> Self {
        let id = id.as_ref().trim();
        match id.parse::<u64>() {
            Ok(numeric) => Self(numeric.to_string()),
            Err(_) => Self(id.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value for ATA ids
    pub fn numeric(&self) -> Option<u64> {
        self.0.parse().ok()
    }
}

impl From<u64> for AttributeId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for AttributeId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for AttributeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Ord for AttributeId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.numeric(), other.numeric()) {
            (Some(left), Some(right)) => left.cmp(&right),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for AttributeId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Serialize for AttributeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for AttributeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AttributeIdVisitor;

        impl Visitor<'_> for AttributeIdVisitor {
            type Value = AttributeId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an attribute id as integer or string")
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
                Ok(AttributeId::from(value))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
                u64::try_from(value)
                    .map(AttributeId::from)
                    .map_err(|_| E::custom(format!("negative attribute id {value}")))
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
                Ok(AttributeId::new(value))
            }
        }

        deserializer.deserialize_any(AttributeIdVisitor)
    }
}

/// One SMART attribute reading
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmartAttribute {
    pub attribute_id: Option<AttributeId>,

    /// Normalized value (ATA) or reported value (NVMe/SCSI)
    pub value: i64,

    pub thresh: i64,

    pub worst: Option<i64>,

    pub raw_value: Option<i64>,

    pub raw_string: Option<String>,

    /// Value after scrutiny's unit transformation (ATA only)
    pub transformed_value: Option<i64>,

    pub when_failed: Option<String>,

    pub status: AttributeStatus,

    pub status_reason: Option<String>,

    /// Observed failure rate for this value, from the backblaze dataset
    pub failure_rate: Option<f64>,
}

impl SmartAttribute {
    pub fn verdict(&self) -> AttributeVerdict {
        self.status.verdict()
    }
}

/// One SMART collection run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmartResult {
    pub date: DateTime<Utc>,

    #[serde(default)]
    pub device_wwn: String,

    #[serde(default)]
    pub device_protocol: String,

    #[serde(default)]
    pub temp: Option<f64>,

    #[serde(default)]
    pub power_on_hours: Option<u64>,

    #[serde(default)]
    pub power_cycle_count: Option<u64>,

    #[serde(default)]
    pub attrs: BTreeMap<AttributeId, SmartAttribute>,
}

/// Which value of an ATA attribute is meaningful to display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayType {
    Raw,
    Transformed,
    #[default]
    #[serde(other)]
    Normalized,
}

/// Static description of an attribute
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeMetadata {
    pub display_name: String,

    /// "low" or "high" when a direction is preferred
    pub ideal: String,

    pub critical: bool,

    pub description: String,

    pub transform_value_unit: Option<String>,

    pub display_type: DisplayType,
}

/// Device with its SMART history and attribute metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceDetails {
    pub device: DeviceModel,

    /// Newest first
    #[serde(default)]
    pub smart_results: Vec<SmartResult>,

    #[serde(default)]
    pub metadata: BTreeMap<AttributeId, AttributeMetadata>,
}

impl DeviceDetails {
    pub fn latest_result(&self) -> Option<&SmartResult> {
        self.smart_results.first()
    }

    pub fn metadata_for(&self, id: &AttributeId) -> Option<&AttributeMetadata> {
        self.metadata.get(id)
    }
}

/// Row of the attribute table
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeRow<'a> {
    pub id: &'a AttributeId,
    pub attribute: &'a SmartAttribute,
    pub metadata: Option<&'a AttributeMetadata>,
    pub verdict: AttributeVerdict,
    pub display_value: i64,
}

impl AttributeRow<'_> {
    pub fn display_name(&self) -> &str {
        self.metadata
            .map(|metadata| metadata.display_name.as_str())
            .filter(|name| !name.is_empty())
            .unwrap_or(self.id.as_str())
    }

    /// Marked critical, or below its failure threshold
    pub fn is_critical(&self) -> bool {
        self.metadata.is_some_and(|metadata| metadata.critical)
            || self.attribute.value < self.attribute.thresh
    }
}

/// Attribute table for the newest SMART result
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AttributeTable<'a> {
    pub rows: Vec<AttributeRow<'a>>,

    /// Attributes filtered out by the critical-only view
    pub hidden_count: usize,
}

/// Value shown for an attribute, honoring the metadata display type for ATA devices.
pub fn attribute_display_value(
    device: &DeviceModel,
    attribute: &SmartAttribute,
    metadata: Option<&AttributeMetadata>,
) -> i64 {
    if !device.is_ata() {
        return attribute.value;
    }

    match metadata.map(|metadata| metadata.display_type) {
        Some(DisplayType::Raw) => attribute.raw_value.unwrap_or(attribute.value),
        Some(DisplayType::Transformed) => attribute.transformed_value.unwrap_or(attribute.value),
        _ => attribute.value,
    }
}

/// Build the attribute table from the newest SMART result.
///
/// With `only_critical`, attributes are kept only when their metadata marks
/// them critical or their value is below the failure threshold.
pub fn attribute_rows(details: &DeviceDetails, only_critical: bool) -> AttributeTable<'_> {
    let Some(latest) = details.latest_result() else {
        return AttributeTable::default();
    };

    let mut rows = Vec::with_capacity(latest.attrs.len());
    for (key, attribute) in &latest.attrs {
        let id = attribute.attribute_id.as_ref().unwrap_or(key);
        let metadata = details.metadata_for(id);

        let row = AttributeRow {
            id,
            attribute,
            metadata,
            verdict: attribute.verdict(),
            display_value: attribute_display_value(&details.device, attribute, metadata),
        };

        if !only_critical || row.is_critical() {
            rows.push(row);
        }
    }

    AttributeTable {
        hidden_count: latest.attrs.len() - rows.len(),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn details() -> DeviceDetails {
        serde_json::from_value(json!({
            "device": {
                "wwn": "0x5000c500a8f7c8c8",
                "device_name": "sda",
                "device_protocol": "ATA"
            },
            "smart_results": [{
                "date": "2024-03-02T00:00:00Z",
                "attrs": {
                    "5": {
                        "attribute_id": 5, "value": 100, "thresh": 10,
                        "raw_value": 8, "status": 2
                    },
                    "9": {
                        "attribute_id": 9, "value": 90, "thresh": 0,
                        "raw_value": 8760, "transformed_value": 365, "status": 0
                    },
                    "194": {
                        "attribute_id": 194, "value": 35, "thresh": 0,
                        "raw_value": 35, "status": 0
                    },
                    "199": {
                        "attribute_id": 199, "value": 5, "thresh": 10,
                        "raw_value": 120, "status": 4
                    }
                }
            }, {
                "date": "2024-03-01T00:00:00Z",
                "attrs": {}
            }],
            "metadata": {
                "5": {
                    "display_name": "Reallocated Sectors Count",
                    "ideal": "low", "critical": true, "display_type": "raw"
                },
                "9": {
                    "display_name": "Power-On Hours",
                    "critical": false, "display_type": "transformed",
                    "transform_value_unit": "days"
                },
                "194": {
                    "display_name": "Temperature", "display_type": "something-new"
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn numeric_and_string_ids_share_one_key_type() {
        let numeric: AttributeId = serde_json::from_value(json!(5)).unwrap();
        let text: AttributeId = serde_json::from_value(json!("5")).unwrap();
        let padded: AttributeId = serde_json::from_value(json!("005")).unwrap();
        let named: AttributeId = serde_json::from_value(json!("critical_warning")).unwrap();

        assert_eq!(numeric, text);
        assert_eq!(numeric, padded);
        assert_eq!(named.as_str(), "critical_warning");
        assert_eq!(named.numeric(), None);
    }

    #[test]
    fn ids_order_numerically_then_by_name() {
        let mut ids = vec![
            AttributeId::new("media_errors"),
            AttributeId::new("194"),
            AttributeId::new("5"),
            AttributeId::new("critical_warning"),
            AttributeId::new("12"),
        ];
        ids.sort();

        let ordered: Vec<_> = ids.iter().map(AttributeId::as_str).collect();
        assert_eq!(ordered, ["5", "12", "194", "critical_warning", "media_errors"]);
    }

    #[test]
    fn all_rows_in_key_order() {
        let details = details();
        let table = attribute_rows(&details, false);

        let ids: Vec<_> = table.rows.iter().map(|row| row.id.as_str()).collect();
        assert_eq!(ids, ["5", "9", "194", "199"]);
        assert_eq!(table.hidden_count, 0);
    }

    #[test]
    fn critical_view_keeps_critical_and_failing_attributes() {
        let details = details();
        let table = attribute_rows(&details, true);

        let ids: Vec<_> = table.rows.iter().map(|row| row.id.as_str()).collect();
        // 5 is marked critical, 199 is below its threshold
        assert_eq!(ids, ["5", "199"]);
        assert_eq!(table.hidden_count, 2);
    }

    #[test]
    fn unknown_display_type_is_normalized() {
        let details = details();
        let metadata = details.metadata_for(&AttributeId::from(194)).unwrap();
        assert_eq!(metadata.display_type, DisplayType::Normalized);

        let raw: DisplayType = serde_json::from_value(json!("raw")).unwrap();
        assert_eq!(raw, DisplayType::Raw);
    }

    #[test]
    fn display_value_follows_metadata_for_ata() {
        let details = details();
        let table = attribute_rows(&details, false);
        let values: Vec<_> = table.rows.iter().map(|row| row.display_value).collect();

        // raw, transformed, unknown display type (normalized), no metadata
        assert_eq!(values, [8, 365, 35, 5]);
    }

    #[test]
    fn display_value_ignores_metadata_for_nvme() {
        let mut details = details();
        details.device.device_protocol = "NVMe".to_string();

        let table = attribute_rows(&details, false);
        assert_eq!(table.rows[0].display_value, 100);
    }

    #[test]
    fn rows_carry_verdicts_and_names() {
        let details = details();
        let table = attribute_rows(&details, false);

        assert_eq!(table.rows[0].verdict, AttributeVerdict::Warn);
        assert_eq!(table.rows[0].display_name(), "Reallocated Sectors Count");
        assert_eq!(table.rows[3].verdict, AttributeVerdict::Failed);
        assert_eq!(table.rows[3].display_name(), "199");
    }

    #[test]
    fn no_results_means_empty_table() {
        let mut details = details();
        details.smart_results.clear();

        let table = attribute_rows(&details, true);
        assert!(table.rows.is_empty());
        assert_eq!(table.hidden_count, 0);
    }
}
