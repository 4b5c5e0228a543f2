// SPDX-License-Identifier: GPL-3.0-only

use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use scrutiny_types::ParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardErrorKind {
    InvalidInput,
    NotFound,
    Unsupported,
    Unavailable,
    Internal,
}

impl DashboardErrorKind {
    pub fn code(self) -> u16 {
        match self {
            Self::InvalidInput => 400,
            Self::NotFound => 404,
            Self::Unsupported => 501,
            Self::Unavailable => 503,
            Self::Internal => 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{kind:?}: {message}")]
pub struct DashboardError {
    pub kind: DashboardErrorKind,
    pub message: String,
}

impl DashboardError {
    pub fn new(kind: DashboardErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(DashboardErrorKind::NotFound, message)
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::new(DashboardErrorKind::Unsupported, message)
    }
}

impl From<ParseError> for DashboardError {
    fn from(error: ParseError) -> Self {
        Self::new(DashboardErrorKind::InvalidInput, error.to_string())
    }
}

impl From<io::Error> for DashboardError {
    fn from(error: io::Error) -> Self {
        let kind = match error.kind() {
            io::ErrorKind::NotFound => DashboardErrorKind::NotFound,
            _ => DashboardErrorKind::Unavailable,
        };
        Self::new(kind, error.to_string())
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(DashboardErrorKind::Internal, format!("malformed response: {error}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrutiny_types::Wwn;

    #[test]
    fn dashboard_error_roundtrips() {
        let error = DashboardError::unsupported("snapshots are read-only");
        let json = serde_json::to_string(&error).expect("serialize error");
        assert!(json.contains("\"unsupported\""));
        let parsed: DashboardError = serde_json::from_str(&json).expect("deserialize error");
        assert_eq!(parsed, error);
        assert_eq!(parsed.kind.code(), 501);
    }

    #[test]
    fn invalid_wwn_is_invalid_input() {
        let error = DashboardError::from("sda".parse::<Wwn>().unwrap_err());
        assert_eq!(error.kind, DashboardErrorKind::InvalidInput);
        assert_eq!(error.kind.code(), 400);
    }

    #[test]
    fn missing_file_is_not_found() {
        let error = DashboardError::from(io::Error::from(io::ErrorKind::NotFound));
        assert_eq!(error.kind, DashboardErrorKind::NotFound);
        let error = DashboardError::from(io::Error::from(io::ErrorKind::PermissionDenied));
        assert_eq!(error.kind, DashboardErrorKind::Unavailable);
    }
}
