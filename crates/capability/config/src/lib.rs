//! 应用运行配置加载。

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// 配置加载错误。
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env: {0}")]
    Missing(String),
    #[error("invalid value for {0}: {1}")]
    Invalid(String, String),
}

/// 应用运行配置。
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// 设备地址（IP 或主机名，可带 scheme）
    pub address: String,
    pub username: String,
    pub password: String,
    pub connect_timeout_seconds: u64,
    pub read_timeout_seconds: u64,
    /// 写入后等待设备落盘的时间
    pub settle_delay_ms: u64,
    pub poll_interval_seconds: u64,
    /// 已保存设备列表文件，未配置时不记录
    pub devices_file: Option<PathBuf>,
    pub user_agent: String,
}

impl AppConfig {
    /// 从环境变量读取配置。
    pub fn from_env() -> Result<Self, ConfigError> {
        let address = read_optional("NETPING_ADDRESS")
            .ok_or_else(|| ConfigError::Missing("NETPING_ADDRESS".to_string()))?;
        let username = env::var("NETPING_USERNAME").unwrap_or_else(|_| "visor".to_string());
        let password = env::var("NETPING_PASSWORD").unwrap_or_else(|_| "ping".to_string());
        let connect_timeout_seconds =
            read_u64_with_default("NETPING_CONNECT_TIMEOUT_SECONDS", 30)?;
        let read_timeout_seconds = read_u64_with_default("NETPING_READ_TIMEOUT_SECONDS", 30)?;
        let settle_delay_ms = read_u64_with_default("NETPING_SETTLE_DELAY_MS", 1500)?;
        let poll_interval_seconds = read_u64_with_default("NETPING_POLL_INTERVAL_SECONDS", 60)?;
        if poll_interval_seconds == 0 {
            return Err(ConfigError::Invalid(
                "NETPING_POLL_INTERVAL_SECONDS".to_string(),
                "0".to_string(),
            ));
        }
        let devices_file = read_optional("NETPING_DEVICES_FILE").map(PathBuf::from);
        let user_agent =
            env::var("NETPING_USER_AGENT").unwrap_or_else(|_| "NetPingMonitor/1.0".to_string());

        Ok(Self {
            address,
            username,
            password,
            connect_timeout_seconds,
            read_timeout_seconds,
            settle_delay_ms,
            poll_interval_seconds,
            devices_file,
            user_agent,
        })
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_seconds)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_seconds)
    }
}

fn read_u64_with_default(key: &str, default: u64) -> Result<u64, ConfigError> {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return Ok(default),
    };
    value
        .parse::<u64>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}

fn read_optional(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.is_empty() => Some(value),
        _ => None,
    }
}
