// SPDX-License-Identifier: GPL-3.0-only

pub mod cache;
pub mod demo;
pub mod protocol;
pub mod snapshot;
pub mod traits;

use std::path::PathBuf;
use std::sync::Arc;

pub use cache::{CachedDeviceRepository, DEFAULT_STALE_TIME};
pub use demo::DemoRepository;
pub use protocol::{DashboardError, DashboardErrorKind};
pub use snapshot::SnapshotRepository;
pub use traits::device::TemperatureHistory;
pub use traits::{DeviceRepository, PoolRepository, SettingsRepository};

/// The three repositories a dashboard front end reads from
#[derive(Clone)]
pub struct Repositories {
    pub devices: Arc<dyn DeviceRepository>,
    pub pools: Arc<dyn PoolRepository>,
    pub settings: Arc<dyn SettingsRepository>,
}

impl Repositories {
    /// Seeded in-memory data; device summaries go through the summary cache
    pub fn demo() -> Self {
        let demo = Arc::new(DemoRepository::new());
        let devices = CachedDeviceRepository::new(Arc::clone(&demo));
        Self {
            devices: Arc::new(devices),
            pools: demo.clone(),
            settings: demo,
        }
    }

    /// Saved backend responses under `root`
    pub fn snapshot(root: impl Into<PathBuf>) -> Self {
        let snapshot = Arc::new(SnapshotRepository::new(root));
        Self {
            devices: snapshot.clone(),
            pools: snapshot.clone(),
            settings: snapshot,
        }
    }
}
