//! 客户端参数。

use std::time::Duration;

/// 客户端参数。默认值与设备固件的行为相匹配。
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// 建立连接超时
    pub connect_timeout: Duration,
    /// 单次请求（含读取正文）超时
    pub read_timeout: Duration,
    /// 写入后回读前的等待时间，留给设备完成内部提交
    pub settle_delay: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            read_timeout: Duration::from_secs(30),
            settle_delay: Duration::from_millis(1500),
            user_agent: "NetPingMonitor/1.0".to_string(),
        }
    }
}
