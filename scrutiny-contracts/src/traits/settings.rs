// SPDX-License-Identifier: GPL-3.0-only

use async_trait::async_trait;

use scrutiny_types::{AppConfig, AppConfigUpdate};

use crate::DashboardError;

#[async_trait]
pub trait SettingsRepository: Send + Sync {
    async fn settings(&self) -> Result<AppConfig, DashboardError>;

    /// Merge `update` over the current settings and return the result
    async fn save_settings(&self, update: &AppConfigUpdate) -> Result<AppConfig, DashboardError>;
}
