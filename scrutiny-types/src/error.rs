// SPDX-License-Identifier: GPL-3.0-only

use thiserror::Error;

/// Error returned when a setting or identifier string is outside its vocabulary
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown {kind}: {value}")]
    UnknownValue { kind: &'static str, value: String },

    #[error("invalid WWN format: {0:?}")]
    InvalidWwn(String),

    #[error("status threshold out of range: {0}")]
    ThresholdOutOfRange(u8),
}

impl ParseError {
    pub(crate) fn unknown(kind: &'static str, value: &str) -> Self {
        Self::UnknownValue {
            kind,
            value: value.to_string(),
        }
    }
}
