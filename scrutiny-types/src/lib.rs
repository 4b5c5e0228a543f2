// SPDX-License-Identifier: GPL-3.0-only

//! Domain models and dashboard logic for Scrutiny disk health monitoring
//!
//! This crate holds the pure core shared by every front end:
//!
//! - **status**: resolves a device's raw status bitmask into a health verdict
//!   under the configured threshold
//! - **sort**: orders device summaries for the dashboard
//! - **title**: builds display titles from device identifiers
//! - **common**: temperature, power-on hours and file size formatters
//!
//! The models mirror the backend's JSON payloads and decode with serde at the
//! ingestion boundary. Nothing here performs I/O; see `scrutiny-contracts`
//! for the repositories that load them.

pub mod api;
pub mod attribute;
pub mod common;
pub mod device;
pub mod error;
pub mod settings;
pub mod sort;
pub mod status;
pub mod title;
pub mod zfs;

pub use api::{
    DeviceDetailsResponse, DeviceSummaryResponse, DurationKey, ResponseWrapper, SettingsResponse,
    TempHistoryResponse, Wwn, ZfsPoolDetailsResponse, ZfsSummaryResponse,
};
pub use attribute::{
    AttributeId, AttributeMetadata, AttributeRow, AttributeTable, DeviceDetails, DisplayType,
    SmartAttribute, SmartResult, attribute_display_value, attribute_rows,
};
pub use common::{
    DurationUnit, HumanizeOptions, celsius_to_fahrenheit, convert_temperature,
    format_device_hours, format_file_size, format_temperature, humanize_duration,
};
pub use device::{
    DeviceModel, DeviceSummary, HostGroup, SmartSummary, TemperatureSample, group_by_host,
    visible_devices,
};
pub use error::ParseError;
pub use settings::{
    AppConfig, AppConfigUpdate, CollectorSettings, LineStroke, MetricsSettings, NotifyLevel,
    PoweredOnHoursUnit, StatusFilterAttributes, TemperatureUnit, ThemeMode,
};
pub use sort::{SortStrategy, sort_devices, sort_devices_by};
pub use status::{
    AttributeStatus, AttributeStatusFlag, AttributeVerdict, DeviceStatus, FailureReason,
    StatusSource, StatusThreshold, Verdict, resolve_status,
};
pub use title::{TitleScheme, title_for_scheme, title_with_fallback};
pub use zfs::{
    PoolVerdict, ZfsCapacitySample, ZfsPool, ZfsPoolDetails, ZfsPoolStatus, ZfsVdev,
    visible_pools,
};
