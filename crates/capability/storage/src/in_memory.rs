//! 设备列表内存存储实现
//!
//! 用于测试与未配置文件路径的运行。

use crate::error::StorageError;
use crate::models::SavedDevices;
use crate::traits::DeviceStore;
use domain::SavedDevice;
use std::sync::RwLock;

/// 使用 RwLock 提供线程安全的内存存储。
#[derive(Default)]
pub struct InMemoryDeviceStore {
    state: RwLock<SavedDevices>,
}

impl InMemoryDeviceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl DeviceStore for InMemoryDeviceStore {
    async fn load(&self) -> Result<SavedDevices, StorageError> {
        let state = self
            .state
            .read()
            .map(|state| state.clone())
            .map_err(|_| StorageError::new("device store lock poisoned"))?;
        Ok(state.into_disconnected())
    }

    async fn save(
        &self,
        devices: &[SavedDevice],
        current_id: Option<&str>,
    ) -> Result<(), StorageError> {
        let mut state = self
            .state
            .write()
            .map_err(|_| StorageError::new("device store lock poisoned"))?;
        *state = SavedDevices {
            devices: devices.to_vec(),
            current_id: current_id.map(str::to_string),
        };
        Ok(())
    }
}
