//! 设备身份、全量快照与已保存设备。

use crate::descriptor::DeviceFamily;
use crate::record::{LogicRule, PingerConfig, SetterConfig, ThermostatConfig};
use crate::status::LogicStatusData;
use serde::{Deserialize, Serialize};

/// 设备信息（devname_menu.cgi + setup_get.cgi 合并结果）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub model: String,
    pub firmware: String,
    /// 显示为 "1.<hwver>"。
    pub hardware_version: String,
    pub serial_number: String,
    pub uptime: String,
    pub hostname: String,
    pub location: String,
    pub contact: String,
}

/// 网络参数（setup_get.cgi）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkInfo {
    pub ip_address: String,
    pub mac_address: String,
    pub subnet_mask: String,
    pub gateway: String,
    pub hostname: String,
}

/// 一次全量读取的结果。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceSnapshot {
    pub family: DeviceFamily,
    pub info: DeviceInfo,
    pub network: NetworkInfo,
    pub logic_rules: Vec<LogicRule>,
    pub thermostats: Vec<ThermostatConfig>,
    pub termo_channels: u32,
    pub rh_channels: u32,
    pub pingers: Vec<PingerConfig>,
    pub setters: Vec<SetterConfig>,
    pub logic_status: LogicStatusData,
}

/// 逻辑引擎控制动作。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicAction {
    Stop,
    Start,
    Reset,
}

impl LogicAction {
    /// logic_run.cgi 查询参数值。
    pub fn code(self) -> u8 {
        match self {
            Self::Stop => 0,
            Self::Start => 1,
            Self::Reset => 2,
        }
    }

    /// 设备未明确回报时，按动作推定的运行状态。
    pub fn implied_running(self) -> bool {
        matches!(self, Self::Start)
    }
}

/// 已保存设备（由外部存储持久化）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedDevice {
    pub id: String,
    pub name: String,
    pub ip_address: String,
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub last_connected: i64,
    #[serde(default)]
    pub is_connected: bool,
}

impl SavedDevice {
    /// 新设备记录：随机 ID，显示名为 "NetPing (<ip>)"。
    pub fn new(ip_address: &str, username: &str, password: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: format!("NetPing ({})", ip_address),
            ip_address: ip_address.to_string(),
            username: username.to_string(),
            password: password.to_string(),
            last_connected: 0,
            is_connected: false,
        }
    }

    /// 读取到型号后改用 "<model> (<ip>)" 作为显示名。
    pub fn rename(&mut self, model: &str) {
        let model = model.trim();
        if !model.is_empty() {
            self.name = format!("{} ({})", model, self.ip_address);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logic_action_codes() {
        assert_eq!(LogicAction::Stop.code(), 0);
        assert_eq!(LogicAction::Start.code(), 1);
        assert_eq!(LogicAction::Reset.code(), 2);
        assert!(LogicAction::Start.implied_running());
        assert!(!LogicAction::Reset.implied_running());
    }

    #[test]
    fn saved_device_naming() {
        let mut device = SavedDevice::new("10.0.0.5", "visor", "ping");
        assert_eq!(device.name, "NetPing (10.0.0.5)");
        assert!(!device.id.is_empty());
        assert_ne!(device.id, SavedDevice::new("10.0.0.5", "visor", "ping").id);

        device.rename("UniPing server solution v3");
        assert_eq!(device.name, "UniPing server solution v3 (10.0.0.5)");
        device.rename("  ");
        assert_eq!(device.name, "UniPing server solution v3 (10.0.0.5)");
    }
}
