// SPDX-License-Identifier: GPL-3.0-only

use async_trait::async_trait;

use scrutiny_types::{ZfsPool, ZfsPoolDetails};

use crate::DashboardError;

#[async_trait]
pub trait PoolRepository: Send + Sync {
    async fn pools(&self) -> Result<Vec<ZfsPool>, DashboardError>;

    async fn pool_details(&self, guid: &str) -> Result<ZfsPoolDetails, DashboardError>;

    async fn mute(&self, guid: &str) -> Result<(), DashboardError>;

    async fn unmute(&self, guid: &str) -> Result<(), DashboardError>;

    async fn archive(&self, guid: &str) -> Result<(), DashboardError>;

    async fn unarchive(&self, guid: &str) -> Result<(), DashboardError>;

    async fn delete(&self, guid: &str) -> Result<(), DashboardError>;

    async fn set_label(&self, guid: &str, label: &str) -> Result<(), DashboardError>;
}
