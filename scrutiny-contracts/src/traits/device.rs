// SPDX-License-Identifier: GPL-3.0-only

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;

use scrutiny_types::{DeviceDetails, DeviceSummary, DurationKey, TemperatureSample, Wwn};

use crate::DashboardError;

/// Temperature history keyed by device wwn
pub type TemperatureHistory = BTreeMap<String, Vec<TemperatureSample>>;

#[async_trait]
pub trait DeviceRepository: Send + Sync {
    /// Every known device with its latest SMART summary
    async fn summary(&self) -> Result<Vec<DeviceSummary>, DashboardError>;

    async fn temperature_history(
        &self,
        duration: DurationKey,
    ) -> Result<TemperatureHistory, DashboardError>;

    async fn device_details(&self, wwn: &Wwn) -> Result<DeviceDetails, DashboardError>;

    async fn mute(&self, wwn: &Wwn) -> Result<(), DashboardError>;

    async fn unmute(&self, wwn: &Wwn) -> Result<(), DashboardError>;

    async fn archive(&self, wwn: &Wwn) -> Result<(), DashboardError>;

    async fn unarchive(&self, wwn: &Wwn) -> Result<(), DashboardError>;

    async fn delete(&self, wwn: &Wwn) -> Result<(), DashboardError>;

    async fn set_label(&self, wwn: &Wwn, label: &str) -> Result<(), DashboardError>;
}

#[async_trait]
impl<T: DeviceRepository + ?Sized> DeviceRepository for Arc<T> {
    async fn summary(&self) -> Result<Vec<DeviceSummary>, DashboardError> {
        (**self).summary().await
    }

    async fn temperature_history(
        &self,
        duration: DurationKey,
    ) -> Result<TemperatureHistory, DashboardError> {
        (**self).temperature_history(duration).await
    }

    async fn device_details(&self, wwn: &Wwn) -> Result<DeviceDetails, DashboardError> {
        (**self).device_details(wwn).await
    }

    async fn mute(&self, wwn: &Wwn) -> Result<(), DashboardError> {
        (**self).mute(wwn).await
    }

    async fn unmute(&self, wwn: &Wwn) -> Result<(), DashboardError> {
        (**self).unmute(wwn).await
    }

    async fn archive(&self, wwn: &Wwn) -> Result<(), DashboardError> {
        (**self).archive(wwn).await
    }

    async fn unarchive(&self, wwn: &Wwn) -> Result<(), DashboardError> {
        (**self).unarchive(wwn).await
    }

    async fn delete(&self, wwn: &Wwn) -> Result<(), DashboardError> {
        (**self).delete(wwn).await
    }

    async fn set_label(&self, wwn: &Wwn, label: &str) -> Result<(), DashboardError> {
        (**self).set_label(wwn, label).await
    }
}
