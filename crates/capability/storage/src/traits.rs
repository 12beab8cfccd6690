//! 存储接口 Trait 定义

use crate::error::StorageError;
use crate::models::SavedDevices;
use async_trait::async_trait;
use domain::SavedDevice;

/// 已保存设备存储接口
#[async_trait]
pub trait DeviceStore: Send + Sync {
    /// 读取设备列表与当前设备 ID
    async fn load(&self) -> Result<SavedDevices, StorageError>;

    /// 整体覆盖保存
    async fn save(
        &self,
        devices: &[SavedDevice],
        current_id: Option<&str>,
    ) -> Result<(), StorageError>;
}
