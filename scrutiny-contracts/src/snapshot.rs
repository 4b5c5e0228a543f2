// SPDX-License-Identifier: GPL-3.0-only

//! Read-only repository over saved backend responses
//!
//! Layout of a snapshot directory:
//!
//! ```text
//! summary.json            GET /api/summary
//! temp_{duration}.json    GET /api/summary/temp?duration_key={duration}
//! details/{wwn}.json      GET /api/device/{wwn}/details
//! zfs_summary.json        GET /api/zfs/summary
//! zfs/{guid}.json         GET /api/zfs/pool/{guid}/details
//! settings.json           GET /api/settings
//! ```

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use scrutiny_types::{
    AppConfig, AppConfigUpdate, DeviceDetails, DeviceDetailsResponse, DeviceSummary,
    DeviceSummaryResponse, DurationKey, SettingsResponse, TempHistoryResponse, Wwn, ZfsPool,
    ZfsPoolDetails, ZfsPoolDetailsResponse, ZfsSummaryResponse,
};

use crate::traits::device::TemperatureHistory;
use crate::{
    DashboardError, DashboardErrorKind, DeviceRepository, PoolRepository, SettingsRepository,
};

#[derive(Debug, Clone)]
pub struct SnapshotRepository {
    root: PathBuf,
}

impl SnapshotRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    async fn read<T: DeserializeOwned>(&self, relative: &str) -> Result<T, DashboardError> {
        let path = self.root.join(relative);
        tracing::debug!("Reading snapshot file: {}", path.display());

        let bytes = tokio::fs::read(&path).await.map_err(|e| {
            let error = DashboardError::from(e);
            DashboardError::new(error.kind, format!("{}: {}", path.display(), error.message))
        })?;

        serde_json::from_slice(&bytes).map_err(|e| {
            tracing::warn!("Malformed snapshot file {}: {e}", path.display());
            DashboardError::from(e)
        })
    }

    /// Pool guids name a file under `zfs/`, so they may not leave it.
    fn pool_file(guid: &str) -> Result<String, DashboardError> {
        if guid.is_empty() || guid.contains(['/', '\\']) || guid.contains("..") {
            return Err(DashboardError::new(
                DashboardErrorKind::InvalidInput,
                format!("invalid pool guid: {guid}"),
            ));
        }
        Ok(format!("zfs/{guid}.json"))
    }

    fn read_only(operation: &str) -> DashboardError {
        DashboardError::unsupported(format!("{operation} is not available on a snapshot"))
    }
}

#[async_trait]
impl DeviceRepository for SnapshotRepository {
    async fn summary(&self) -> Result<Vec<DeviceSummary>, DashboardError> {
        let response: DeviceSummaryResponse = self.read("summary.json").await?;
        Ok(response.into_summaries())
    }

    async fn temperature_history(
        &self,
        duration: DurationKey,
    ) -> Result<TemperatureHistory, DashboardError> {
        let response: TempHistoryResponse = self.read(&format!("temp_{duration}.json")).await?;
        Ok(response.data.temp_history)
    }

    async fn device_details(&self, wwn: &Wwn) -> Result<DeviceDetails, DashboardError> {
        let response: DeviceDetailsResponse = self.read(&format!("details/{wwn}.json")).await?;
        Ok(response.into())
    }

    async fn mute(&self, _wwn: &Wwn) -> Result<(), DashboardError> {
        Err(Self::read_only("mute"))
    }

    async fn unmute(&self, _wwn: &Wwn) -> Result<(), DashboardError> {
        Err(Self::read_only("unmute"))
    }

    async fn archive(&self, _wwn: &Wwn) -> Result<(), DashboardError> {
        Err(Self::read_only("archive"))
    }

    async fn unarchive(&self, _wwn: &Wwn) -> Result<(), DashboardError> {
        Err(Self::read_only("unarchive"))
    }

    async fn delete(&self, _wwn: &Wwn) -> Result<(), DashboardError> {
        Err(Self::read_only("delete"))
    }

    async fn set_label(&self, _wwn: &Wwn, _label: &str) -> Result<(), DashboardError> {
        Err(Self::read_only("label"))
    }
}

#[async_trait]
impl PoolRepository for SnapshotRepository {
    async fn pools(&self) -> Result<Vec<ZfsPool>, DashboardError> {
        let response: ZfsSummaryResponse = self.read("zfs_summary.json").await?;
        Ok(response.into_pools())
    }

    async fn pool_details(&self, guid: &str) -> Result<ZfsPoolDetails, DashboardError> {
        let response: ZfsPoolDetailsResponse = self.read(&Self::pool_file(guid)?).await?;
        Ok(response.into())
    }

    async fn mute(&self, _guid: &str) -> Result<(), DashboardError> {
        Err(Self::read_only("mute"))
    }

    async fn unmute(&self, _guid: &str) -> Result<(), DashboardError> {
        Err(Self::read_only("unmute"))
    }

    async fn archive(&self, _guid: &str) -> Result<(), DashboardError> {
        Err(Self::read_only("archive"))
    }

    async fn unarchive(&self, _guid: &str) -> Result<(), DashboardError> {
        Err(Self::read_only("unarchive"))
    }

    async fn delete(&self, _guid: &str) -> Result<(), DashboardError> {
        Err(Self::read_only("delete"))
    }

    async fn set_label(&self, _guid: &str, _label: &str) -> Result<(), DashboardError> {
        Err(Self::read_only("label"))
    }
}

#[async_trait]
impl SettingsRepository for SnapshotRepository {
    async fn settings(&self) -> Result<AppConfig, DashboardError> {
        let response: SettingsResponse = self.read("settings.json").await?;
        Ok(response.into_settings())
    }

    async fn save_settings(&self, _update: &AppConfigUpdate) -> Result<AppConfig, DashboardError> {
        Err(Self::read_only("saving settings"))
    }
}
