// SPDX-License-Identifier: GPL-3.0-only

//! Summary cache in front of a device repository

use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::Mutex;

use scrutiny_types::{DeviceDetails, DeviceSummary, DurationKey, Wwn};

use crate::traits::device::TemperatureHistory;
use crate::{DashboardError, DeviceRepository};

/// How long a fetched summary is served before refetching
pub const DEFAULT_STALE_TIME: Duration = Duration::from_secs(5 * 60);

struct CachedSummary {
    fetched_at: Instant,
    summaries: Vec<DeviceSummary>,
}

/// Caches the device summary for a stale time and drops it after any command.
pub struct CachedDeviceRepository<R> {
    inner: R,
    stale_time: Duration,
    summary: Mutex<Option<CachedSummary>>,
}

impl<R: DeviceRepository> CachedDeviceRepository<R> {
    pub fn new(inner: R) -> Self {
        Self::with_stale_time(inner, DEFAULT_STALE_TIME)
    }

    pub fn with_stale_time(inner: R, stale_time: Duration) -> Self {
        Self {
            inner,
            stale_time,
            summary: Mutex::new(None),
        }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    pub async fn invalidate(&self) {
        self.summary.lock().await.take();
    }

    async fn after_command(&self, result: Result<(), DashboardError>) -> Result<(), DashboardError> {
        self.invalidate().await;
        result
    }
}

#[async_trait]
impl<R: DeviceRepository> DeviceRepository for CachedDeviceRepository<R> {
    async fn summary(&self) -> Result<Vec<DeviceSummary>, DashboardError> {
        let mut cached = self.summary.lock().await;

        if let Some(entry) = cached.as_ref()
            && entry.fetched_at.elapsed() < self.stale_time
        {
            return Ok(entry.summaries.clone());
        }

        tracing::debug!("Device summary cache miss, fetching");
        let summaries = self.inner.summary().await?;
        *cached = Some(CachedSummary {
            fetched_at: Instant::now(),
            summaries: summaries.clone(),
        });
        Ok(summaries)
    }

    async fn temperature_history(
        &self,
        duration: DurationKey,
    ) -> Result<TemperatureHistory, DashboardError> {
        self.inner.temperature_history(duration).await
    }

    async fn device_details(&self, wwn: &Wwn) -> Result<DeviceDetails, DashboardError> {
        self.inner.device_details(wwn).await
    }

    async fn mute(&self, wwn: &Wwn) -> Result<(), DashboardError> {
        let result = self.inner.mute(wwn).await;
        self.after_command(result).await
    }

    async fn unmute(&self, wwn: &Wwn) -> Result<(), DashboardError> {
        let result = self.inner.unmute(wwn).await;
        self.after_command(result).await
    }

    async fn archive(&self, wwn: &Wwn) -> Result<(), DashboardError> {
        let result = self.inner.archive(wwn).await;
        self.after_command(result).await
    }

    async fn unarchive(&self, wwn: &Wwn) -> Result<(), DashboardError> {
        let result = self.inner.unarchive(wwn).await;
        self.after_command(result).await
    }

    async fn delete(&self, wwn: &Wwn) -> Result<(), DashboardError> {
        let result = self.inner.delete(wwn).await;
        self.after_command(result).await
    }

    async fn set_label(&self, wwn: &Wwn, label: &str) -> Result<(), DashboardError> {
        let result = self.inner.set_label(wwn, label).await;
        self.after_command(result).await
    }
}
