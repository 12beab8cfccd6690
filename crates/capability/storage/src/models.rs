//! 存储数据模型

use domain::SavedDevice;
use serde::{Deserialize, Serialize};

/// 已保存设备列表。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedDevices {
    #[serde(default)]
    pub devices: Vec<SavedDevice>,
    #[serde(default)]
    pub current_id: Option<String>,
}

impl SavedDevices {
    pub fn current(&self) -> Option<&SavedDevice> {
        let id = self.current_id.as_deref()?;
        self.devices.iter().find(|device| device.id == id)
    }

    /// 加载后复位连接标志。
    pub(crate) fn into_disconnected(mut self) -> Self {
        for device in &mut self.devices {
            device.is_connected = false;
        }
        self
    }
}

/// 将 `id` 对应的设备标记为已连接并记录时间，其余设备标记为未连接。
///
/// 找不到 `id` 时返回 `false`，列表不变。
pub fn mark_connected(devices: &mut [SavedDevice], id: &str, now_ms: i64) -> bool {
    if !devices.iter().any(|device| device.id == id) {
        return false;
    }
    for device in devices.iter_mut() {
        device.is_connected = device.id == id;
        if device.is_connected {
            device.last_connected = now_ms;
        }
    }
    true
}

/// 按地址查找设备，不存在时新建，并更新登录信息。返回设备 ID。
pub fn remember_device(
    devices: &mut Vec<SavedDevice>,
    ip_address: &str,
    username: &str,
    password: &str,
) -> String {
    if let Some(device) = devices
        .iter_mut()
        .find(|device| device.ip_address.eq_ignore_ascii_case(ip_address))
    {
        device.username = username.to_string();
        device.password = password.to_string();
        return device.id.clone();
    }
    let device = SavedDevice::new(ip_address, username, password);
    let id = device.id.clone();
    devices.push(device);
    id
}
