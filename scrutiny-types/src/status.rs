// SPDX-License-Identifier: GPL-3.0-only

//! Device and attribute health status
//!
//! The backend reports health as small bitmasks. Each mask is decoded in
//! exactly one place here ([`DeviceStatus::masked`] and
//! [`AttributeStatus::verdict`]); everything else works with the decoded
//! variants.

use std::fmt;
use std::str::FromStr;

use enumflags2::{BitFlags, bitflags};
use serde::{Deserialize, Serialize};

use crate::ParseError;

/// Source that flagged a device as failing
#[bitflags]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusSource {
    /// The drive's own SMART self-assessment
    Smart = 0b01,
    /// Scrutiny's failure-rate analysis
    Scrutiny = 0b10,
}

/// Device status after decoding the raw bitmask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceStatus {
    Passed,
    FailedSmart,
    FailedScrutiny,
    FailedBoth,
}

impl DeviceStatus {
    /// Decode a raw status, masking it with the user threshold first.
    ///
    /// Bits outside the threshold are discarded, so any raw value (including
    /// values with undefined high bits) decodes to one of the four variants.
    pub fn masked(raw: u32, threshold: StatusThreshold) -> Self {
        let effective = raw & u32::from(threshold.bits());
        Self::from_sources(BitFlags::from_bits_truncate(effective as u8))
    }

    /// Decode a raw status without a threshold. Returns `None` for values
    /// outside 0..=3.
    pub fn from_raw(raw: u32) -> Option<Self> {
        let bits = u8::try_from(raw).ok()?;
        BitFlags::<StatusSource>::from_bits(bits)
            .ok()
            .map(Self::from_sources)
    }

    fn from_sources(sources: BitFlags<StatusSource>) -> Self {
        match (
            sources.contains(StatusSource::Smart),
            sources.contains(StatusSource::Scrutiny),
        ) {
            (false, false) => Self::Passed,
            (true, false) => Self::FailedSmart,
            (false, true) => Self::FailedScrutiny,
            (true, true) => Self::FailedBoth,
        }
    }

    pub fn bits(self) -> u8 {
        match self {
            Self::Passed => 0,
            Self::FailedSmart => 1,
            Self::FailedScrutiny => 2,
            Self::FailedBoth => 3,
        }
    }

    pub fn failure_reason(self) -> Option<FailureReason> {
        match self {
            Self::Passed => None,
            Self::FailedSmart => Some(FailureReason::Smart),
            Self::FailedScrutiny => Some(FailureReason::Scrutiny),
            Self::FailedBoth => Some(FailureReason::Both),
        }
    }
}

/// Which status sources count towards a failed verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum StatusThreshold {
    Smart,
    Scrutiny,
    #[default]
    Both,
}

impl StatusThreshold {
    pub fn bits(self) -> u8 {
        match self {
            Self::Smart => 1,
            Self::Scrutiny => 2,
            Self::Both => 3,
        }
    }

    pub fn sources(self) -> BitFlags<StatusSource> {
        BitFlags::from_bits_truncate(self.bits())
    }
}

impl TryFrom<u8> for StatusThreshold {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Smart),
            2 => Ok(Self::Scrutiny),
            3 => Ok(Self::Both),
            other => Err(ParseError::ThresholdOutOfRange(other)),
        }
    }
}

impl From<StatusThreshold> for u8 {
    fn from(value: StatusThreshold) -> Self {
        value.bits()
    }
}

impl FromStr for StatusThreshold {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "smart" | "1" => Ok(Self::Smart),
            "scrutiny" | "2" => Ok(Self::Scrutiny),
            "both" | "3" => Ok(Self::Both),
            _ => Err(ParseError::unknown("status threshold", s)),
        }
    }
}

/// Why a device failed, shown when the reason is requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureReason {
    Smart,
    Scrutiny,
    Both,
}

impl FailureReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Smart => "smart",
            Self::Scrutiny => "scrutiny",
            Self::Both => "both",
        }
    }
}

/// Tri-state device health verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Passed,
    /// Failed, optionally carrying the reason suffix
    Failed(Option<FailureReason>),
    /// No SMART data to back a verdict
    Unknown,
}

impl Verdict {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed(None) => "failed",
            Self::Failed(Some(FailureReason::Smart)) => "failed: smart",
            Self::Failed(Some(FailureReason::Scrutiny)) => "failed: scrutiny",
            Self::Failed(Some(FailureReason::Both)) => "failed: both",
            Self::Unknown => "unknown",
        }
    }

    pub fn is_failed(self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Verdict {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Resolve the health verdict for a raw device status.
///
/// Without SMART data the verdict is always [`Verdict::Unknown`], whatever
/// the stored bitmask says.
pub fn resolve_status(
    raw_status: u32,
    has_smart_data: bool,
    threshold: StatusThreshold,
    include_reason: bool,
) -> Verdict {
    if !has_smart_data {
        return Verdict::Unknown;
    }

    match DeviceStatus::masked(raw_status, threshold).failure_reason() {
        None => Verdict::Passed,
        Some(reason) if include_reason => Verdict::Failed(Some(reason)),
        Some(_) => Verdict::Failed(None),
    }
}

/// Per-attribute status flags
#[bitflags]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeStatusFlag {
    FailedSmart = 0b001,
    WarningScrutiny = 0b010,
    FailedScrutiny = 0b100,
}

/// Raw attribute status as reported on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeStatus(pub u32);

impl AttributeStatus {
    pub fn flags(self) -> BitFlags<AttributeStatusFlag> {
        BitFlags::from_bits_truncate((self.0 & 0b111) as u8)
    }

    pub fn verdict(self) -> AttributeVerdict {
        if self.0 == 0 {
            return AttributeVerdict::Passed;
        }

        let flags = self.flags();
        if flags.intersects(AttributeStatusFlag::FailedScrutiny | AttributeStatusFlag::FailedSmart) {
            AttributeVerdict::Failed
        } else if flags.contains(AttributeStatusFlag::WarningScrutiny) {
            AttributeVerdict::Warn
        } else {
            AttributeVerdict::Unknown
        }
    }

    /// SMART's own verdict for the attribute, ignoring scrutiny's analysis
    pub fn smart_failed(self) -> bool {
        self.flags().contains(AttributeStatusFlag::FailedSmart)
    }
}

/// Attribute health verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeVerdict {
    Passed,
    Warn,
    Failed,
    Unknown,
}

impl AttributeVerdict {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Warn => "warn",
            Self::Failed => "failed",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for AttributeVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn healthy_device_passes() {
        assert_eq!(
            resolve_status(0, true, StatusThreshold::Both, false).as_str(),
            "passed"
        );
    }

    #[test]
    fn missing_smart_data_is_unknown() {
        for raw in [0, 1, 2, 3, 10000] {
            for threshold in [
                StatusThreshold::Smart,
                StatusThreshold::Scrutiny,
                StatusThreshold::Both,
            ] {
                assert_eq!(
                    resolve_status(raw, false, threshold, true),
                    Verdict::Unknown
                );
                assert_eq!(
                    resolve_status(raw, false, threshold, false),
                    Verdict::Unknown
                );
            }
        }
    }

    #[test]
    fn threshold_masks_status_sources() {
        use StatusThreshold::*;

        let cases = [
            (1, Smart, "failed"),
            (1, Scrutiny, "passed"),
            (1, Both, "failed"),
            (2, Smart, "passed"),
            (2, Scrutiny, "failed"),
            (2, Both, "failed"),
            (3, Smart, "failed"),
            (3, Scrutiny, "failed"),
            (3, Both, "failed"),
        ];

        for (raw, threshold, expected) in cases {
            assert_eq!(
                resolve_status(raw, true, threshold, false).as_str(),
                expected,
                "status {raw} with threshold {threshold:?}"
            );
        }
    }

    #[test]
    fn reason_reflects_masked_sources() {
        assert_eq!(
            resolve_status(3, true, StatusThreshold::Smart, true).to_string(),
            "failed: smart"
        );
        assert_eq!(
            resolve_status(3, true, StatusThreshold::Scrutiny, true).to_string(),
            "failed: scrutiny"
        );
        assert_eq!(
            resolve_status(3, true, StatusThreshold::Both, true).to_string(),
            "failed: both"
        );
        assert_eq!(
            resolve_status(0, true, StatusThreshold::Both, true).to_string(),
            "passed"
        );
    }

    #[test]
    fn undefined_high_bits_are_masked_away() {
        // 10000 = 0b10011100010000, low two bits clear
        assert_eq!(
            resolve_status(10000, true, StatusThreshold::Smart, false),
            Verdict::Passed
        );
        // 10001 keeps the smart bit
        assert_eq!(
            resolve_status(10001, true, StatusThreshold::Both, true),
            Verdict::Failed(Some(FailureReason::Smart))
        );
    }

    #[test]
    fn device_status_from_raw_rejects_undefined_values() {
        assert_eq!(DeviceStatus::from_raw(3), Some(DeviceStatus::FailedBoth));
        assert_eq!(DeviceStatus::from_raw(4), None);
        assert_eq!(DeviceStatus::from_raw(10000), None);
    }

    #[test]
    fn threshold_roundtrips_as_integer() {
        let json = serde_json::to_string(&StatusThreshold::Scrutiny).unwrap();
        assert_eq!(json, "2");
        let parsed: StatusThreshold = serde_json::from_str("1").unwrap();
        assert_eq!(parsed, StatusThreshold::Smart);
        assert!(serde_json::from_str::<StatusThreshold>("4").is_err());
    }

    #[test]
    fn threshold_sources_match_bits() {
        assert_eq!(
            StatusThreshold::Both.sources(),
            StatusSource::Smart | StatusSource::Scrutiny
        );
        assert_eq!(StatusThreshold::Smart.sources(), StatusSource::Smart);
    }

    #[test]
    fn attribute_verdicts() {
        let cases = [
            (0, AttributeVerdict::Passed),
            (1, AttributeVerdict::Failed),
            (2, AttributeVerdict::Warn),
            (4, AttributeVerdict::Failed),
            (5, AttributeVerdict::Failed),
            (6, AttributeVerdict::Failed),
            (8, AttributeVerdict::Unknown),
        ];

        for (raw, expected) in cases {
            assert_eq!(AttributeStatus(raw).verdict(), expected, "status {raw}");
        }
    }

    #[test]
    fn smart_failure_ignores_scrutiny_bits() {
        assert!(AttributeStatus(1).smart_failed());
        assert!(AttributeStatus(5).smart_failed());
        assert!(!AttributeStatus(4).smart_failed());
        assert!(!AttributeStatus(2).smart_failed());
    }
}
