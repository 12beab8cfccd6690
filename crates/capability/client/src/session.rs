//! 单台设备的会话状态。

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use domain::{DeviceFamily, ThermostatConfig};

/// 一台已连接设备的会话。
///
/// 逻辑运行标志单独缓存：设备在写入后一段时间内 `logic_status.cgi` 的运行指示
/// 可能滞后，缓存值取自最近一次 `logic_get.cgi` 的 `data_logic_flags`
/// 或最近一次启停/复位命令的结果。
#[derive(Debug, Clone)]
pub struct DeviceSession {
    address: String,
    base_url: String,
    authorization: String,
    pub(crate) logic_running: bool,
    /// 最近一次读取的温控配置，用于状态文本中的阈值。
    pub(crate) thermostats: Vec<ThermostatConfig>,
    pub(crate) family: DeviceFamily,
}

impl DeviceSession {
    /// `address` 不带协议时按 `http://` 处理。
    pub fn new(address: &str, username: &str, password: &str) -> Self {
        let trimmed = address.trim().trim_end_matches('/');
        let base_url = if trimmed.contains("://") {
            trimmed.to_string()
        } else {
            format!("http://{}", trimmed)
        };
        let credential = STANDARD.encode(format!("{}:{}", username, password));

        Self {
            address: trimmed.to_string(),
            base_url,
            authorization: format!("Basic {}", credential),
            logic_running: false,
            thermostats: Vec::new(),
            family: DeviceFamily::default(),
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn authorization(&self) -> &str {
        &self.authorization
    }

    pub fn logic_running(&self) -> bool {
        self.logic_running
    }

    pub fn family(&self) -> DeviceFamily {
        self.family
    }

    pub fn thermostats(&self) -> &[ThermostatConfig] {
        &self.thermostats
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_defaults_to_http() {
        let session = DeviceSession::new("192.168.0.100", "visor", "ping");
        assert_eq!(session.base_url(), "http://192.168.0.100");
        assert_eq!(session.authorization(), "Basic dmlzb3I6cGluZw==");
        assert_eq!(session.url("/setup_get.cgi"), "http://192.168.0.100/setup_get.cgi");

        let session = DeviceSession::new("https://np.example.org/", "a", "b");
        assert_eq!(session.base_url(), "https://np.example.org");
    }
}
