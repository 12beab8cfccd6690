//! 设备列表 JSON 文件存储实现

use crate::error::StorageError;
use crate::models::SavedDevices;
use crate::traits::DeviceStore;
use domain::SavedDevice;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// 以单个 JSON 文件保存设备列表。
///
/// 文件不存在视为空列表；内容损坏时记录警告并返回空列表，下一次保存会覆盖它。
pub struct JsonFileDeviceStore {
    path: PathBuf,
}

impl JsonFileDeviceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait::async_trait]
impl DeviceStore for JsonFileDeviceStore {
    async fn load(&self) -> Result<SavedDevices, StorageError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "device file not found");
                return Ok(SavedDevices::default());
            }
            Err(err) => return Err(err.into()),
        };

        match serde_json::from_slice::<SavedDevices>(&bytes) {
            Ok(saved) => Ok(saved.into_disconnected()),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "device file unreadable, starting empty");
                Ok(SavedDevices::default())
            }
        }
    }

    async fn save(
        &self,
        devices: &[SavedDevice],
        current_id: Option<&str>,
    ) -> Result<(), StorageError> {
        let saved = SavedDevices {
            devices: devices.to_vec(),
            current_id: current_id.map(str::to_string),
        };
        let bytes = serde_json::to_vec_pretty(&saved)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, bytes).await?;
        debug!(path = %self.path.display(), devices = devices.len(), "device file saved");
        Ok(())
    }
}
