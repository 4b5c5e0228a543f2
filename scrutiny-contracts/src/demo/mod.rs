// SPDX-License-Identifier: GPL-3.0-only

//! In-memory repository serving seeded demo data
//!
//! Commands mutate the in-memory state and are visible to later queries.
//! Commands naming an unknown device or pool succeed without effect.

mod seed;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::RwLock;

use scrutiny_types::{
    AppConfig, AppConfigUpdate, DeviceDetails, DeviceSummary, DurationKey, Wwn, ZfsPool,
    ZfsPoolDetails,
};

use crate::traits::device::TemperatureHistory;
use crate::{DashboardError, DeviceRepository, PoolRepository, SettingsRepository};

#[derive(Debug)]
struct DemoState {
    devices: Vec<DeviceSummary>,
    pools: Vec<ZfsPool>,
    settings: AppConfig,
}

#[derive(Debug)]
pub struct DemoRepository {
    state: RwLock<DemoState>,

    /// Timestamp the generated histories end at
    anchor: DateTime<Utc>,
}

impl Default for DemoRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl DemoRepository {
    pub fn new() -> Self {
        Self::with_anchor(Utc::now())
    }

    pub fn with_anchor(anchor: DateTime<Utc>) -> Self {
        Self {
            state: RwLock::new(DemoState {
                devices: seed::devices(anchor),
                pools: seed::pools(anchor),
                settings: seed::settings(),
            }),
            anchor,
        }
    }

    async fn update_device<F>(&self, wwn: &Wwn, action: &str, apply: F)
    where
        F: FnOnce(&mut DeviceSummary),
    {
        let mut state = self.state.write().await;
        match state
            .devices
            .iter_mut()
            .find(|summary| summary.device.wwn == wwn.as_str())
        {
            Some(summary) => {
                apply(summary);
                tracing::debug!("Demo device {wwn}: {action}");
            }
            None => tracing::debug!("Demo device not found, ignoring {action}: {wwn}"),
        }
    }

    async fn update_pool<F>(&self, guid: &str, action: &str, apply: F)
    where
        F: FnOnce(&mut ZfsPool),
    {
        let mut state = self.state.write().await;
        match state.pools.iter_mut().find(|pool| pool.guid == guid) {
            Some(pool) => {
                apply(pool);
                tracing::debug!("Demo pool {guid}: {action}");
            }
            None => tracing::debug!("Demo pool not found, ignoring {action}: {guid}"),
        }
    }
}

/// How far back a duration key reaches; `None` keeps everything
fn lookback(duration: DurationKey) -> Option<TimeDelta> {
    match duration {
        DurationKey::Forever => None,
        DurationKey::Year => Some(TimeDelta::days(365)),
        DurationKey::Month => Some(TimeDelta::days(30)),
        DurationKey::Week => Some(TimeDelta::weeks(1)),
        DurationKey::Day => Some(TimeDelta::days(1)),
    }
}

#[async_trait]
impl DeviceRepository for DemoRepository {
    async fn summary(&self) -> Result<Vec<DeviceSummary>, DashboardError> {
        let state = self.state.read().await;
        Ok(state.devices.clone())
    }

    async fn temperature_history(
        &self,
        duration: DurationKey,
    ) -> Result<TemperatureHistory, DashboardError> {
        let since = lookback(duration).map(|window| self.anchor - window);
        let state = self.state.read().await;

        Ok(state
            .devices
            .iter()
            .map(|summary| {
                let samples = summary
                    .temp_history
                    .iter()
                    .filter(|sample| since.is_none_or(|since| sample.date >= since))
                    .cloned()
                    .collect();
                (summary.device.wwn.clone(), samples)
            })
            .collect())
    }

    async fn device_details(&self, wwn: &Wwn) -> Result<DeviceDetails, DashboardError> {
        let state = self.state.read().await;

        // Unknown devices show the first device's details
        let summary = state
            .devices
            .iter()
            .find(|summary| summary.device.wwn == wwn.as_str())
            .or_else(|| state.devices.first())
            .ok_or_else(|| DashboardError::not_found(format!("no devices to show for {wwn}")))?;

        Ok(seed::device_details(summary, self.anchor))
    }

    async fn mute(&self, wwn: &Wwn) -> Result<(), DashboardError> {
        self.update_device(wwn, "mute", |summary| summary.device.muted = true)
            .await;
        Ok(())
    }

    async fn unmute(&self, wwn: &Wwn) -> Result<(), DashboardError> {
        self.update_device(wwn, "unmute", |summary| summary.device.muted = false)
            .await;
        Ok(())
    }

    async fn archive(&self, wwn: &Wwn) -> Result<(), DashboardError> {
        self.update_device(wwn, "archive", |summary| summary.device.archived = true)
            .await;
        Ok(())
    }

    async fn unarchive(&self, wwn: &Wwn) -> Result<(), DashboardError> {
        self.update_device(wwn, "unarchive", |summary| {
            summary.device.archived = false
        })
        .await;
        Ok(())
    }

    async fn delete(&self, wwn: &Wwn) -> Result<(), DashboardError> {
        let mut state = self.state.write().await;
        let before = state.devices.len();
        state
            .devices
            .retain(|summary| summary.device.wwn != wwn.as_str());
        tracing::info!(
            "Deleted demo device {wwn} ({} removed)",
            before - state.devices.len()
        );
        Ok(())
    }

    async fn set_label(&self, wwn: &Wwn, label: &str) -> Result<(), DashboardError> {
        self.update_device(wwn, "label", |summary| {
            summary.device.label = label.to_string()
        })
        .await;
        Ok(())
    }
}

#[async_trait]
impl PoolRepository for DemoRepository {
    async fn pools(&self) -> Result<Vec<ZfsPool>, DashboardError> {
        let state = self.state.read().await;
        Ok(state.pools.clone())
    }

    async fn pool_details(&self, guid: &str) -> Result<ZfsPoolDetails, DashboardError> {
        let state = self.state.read().await;

        let pool = state
            .pools
            .iter()
            .find(|pool| pool.guid == guid)
            .or_else(|| state.pools.first())
            .ok_or_else(|| DashboardError::not_found(format!("no pools to show for {guid}")))?;

        Ok(ZfsPoolDetails {
            pool: pool.clone(),
            metrics_history: seed::capacity_history(pool, self.anchor),
        })
    }

    async fn mute(&self, guid: &str) -> Result<(), DashboardError> {
        self.update_pool(guid, "mute", |pool| pool.muted = true).await;
        Ok(())
    }

    async fn unmute(&self, guid: &str) -> Result<(), DashboardError> {
        self.update_pool(guid, "unmute", |pool| pool.muted = false)
            .await;
        Ok(())
    }

    async fn archive(&self, guid: &str) -> Result<(), DashboardError> {
        self.update_pool(guid, "archive", |pool| pool.archived = true)
            .await;
        Ok(())
    }

    async fn unarchive(&self, guid: &str) -> Result<(), DashboardError> {
        self.update_pool(guid, "unarchive", |pool| pool.archived = false)
            .await;
        Ok(())
    }

    async fn delete(&self, guid: &str) -> Result<(), DashboardError> {
        let mut state = self.state.write().await;
        state.pools.retain(|pool| pool.guid != guid);
        tracing::info!("Deleted demo pool {guid}");
        Ok(())
    }

    async fn set_label(&self, guid: &str, label: &str) -> Result<(), DashboardError> {
        self.update_pool(guid, "label", |pool| pool.label = label.to_string())
            .await;
        Ok(())
    }
}

#[async_trait]
impl SettingsRepository for DemoRepository {
    async fn settings(&self) -> Result<AppConfig, DashboardError> {
        let state = self.state.read().await;
        Ok(state.settings.clone())
    }

    async fn save_settings(&self, update: &AppConfigUpdate) -> Result<AppConfig, DashboardError> {
        let mut state = self.state.write().await;
        state.settings.apply(update);
        tracing::debug!("Saved demo settings");
        Ok(state.settings.clone())
    }
}
