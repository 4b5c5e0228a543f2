// SPDX-License-Identifier: GPL-3.0-only

//! Display titles for devices

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{DeviceModel, ParseError};

const TITLE_SEPARATOR: &str = " - ";

/// Identifier scheme used to title a device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleScheme {
    /// `/by-id/{serial id}`
    #[serde(alias = "serial_id")]
    SerialNumber,
    /// `/by-uuid/{uuid}`
    Uuid,
    /// Custom label, else `/by-label/{volume label}`
    Label,
    /// `/dev/{name}` plus device type and model
    #[default]
    #[serde(other)]
    Name,
}

impl TitleScheme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::SerialNumber => "serial_number",
            Self::Uuid => "uuid",
            Self::Label => "label",
        }
    }
}

impl FromStr for TitleScheme {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            // serial_id is the older spelling
            "serial_number" | "serial_id" => Ok(Self::SerialNumber),
            "uuid" => Ok(Self::Uuid),
            "label" => Ok(Self::Label),
            _ => Err(ParseError::unknown("title scheme", s)),
        }
    }
}

impl fmt::Display for TitleScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl DeviceModel {
    /// Title under a single scheme; empty when the device lacks that identifier.
    pub fn title(&self, scheme: TitleScheme) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(3);

        match scheme {
            TitleScheme::Name => {
                parts.push(format!("/dev/{}", self.device_name));
                if !self.device_type.is_empty()
                    && self.device_type != "scsi"
                    && self.device_type != "ata"
                {
                    parts.push(self.device_type.clone());
                }
                parts.push(self.model_name.clone());
            }
            TitleScheme::SerialNumber => {
                if self.device_serial_id.is_empty() {
                    return String::new();
                }
                parts.push(format!("/by-id/{}", self.device_serial_id));
            }
            TitleScheme::Uuid => {
                if self.device_uuid.is_empty() {
                    return String::new();
                }
                parts.push(format!("/by-uuid/{}", self.device_uuid));
            }
            TitleScheme::Label => {
                if !self.label.is_empty() {
                    parts.push(self.label.clone());
                } else if !self.device_label.is_empty() {
                    parts.push(format!("/by-label/{}", self.device_label));
                }
            }
        }

        parts.join(TITLE_SEPARATOR)
    }

    /// Title under `scheme`, falling back to the name scheme when empty.
    pub fn title_or_name(&self, scheme: TitleScheme) -> String {
        let title = self.title(scheme);
        if title.is_empty() {
            self.title(TitleScheme::Name)
        } else {
            title
        }
    }

    /// Full display title: host id (when known) followed by the scheme title.
    pub fn display_title(&self, scheme: TitleScheme) -> String {
        let title = self.title_or_name(scheme);
        if self.host_id.is_empty() {
            title
        } else {
            [self.host_id.as_str(), title.as_str()].join(TITLE_SEPARATOR)
        }
    }
}

/// Title for a scheme given by name. Unrecognized schemes yield an empty title.
pub fn title_for_scheme(device: &DeviceModel, scheme: &str) -> String {
    scheme
        .parse::<TitleScheme>()
        .map(|scheme| device.title(scheme))
        .unwrap_or_default()
}

/// Title for a scheme given by name, falling back to the name scheme and
/// prefixed with the host id when present.
pub fn title_with_fallback(device: &DeviceModel, scheme: &str) -> String {
    // An unrecognized scheme titles as empty, which falls back to the name scheme.
    device.display_title(scheme.parse().unwrap_or(TitleScheme::Name))
}
