// SPDX-License-Identifier: GPL-3.0-only

pub mod device;
pub mod pool;
pub mod settings;

pub use device::DeviceRepository;
pub use pool::PoolRepository;
pub use settings::SettingsRepository;
