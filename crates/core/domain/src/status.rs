//! 逻辑运行状态快照与状态码文本映射。

use crate::record::codes;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 逻辑状态快照（只读、每次轮询整体重建）。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LogicStatusData {
    pub is_logic_running: bool,
    /// 传感器槽位 → 显示值。
    pub sensor_values: BTreeMap<u32, String>,
    /// 传感器槽位 → 状态文本。
    pub sensor_statuses: BTreeMap<u32, String>,
    /// 协议码（48 起）→ Pinger 状态文本。
    pub pinger_statuses: BTreeMap<u32, String>,
    /// 协议码（192 起）→ Setter 状态文本。
    pub setter_statuses: BTreeMap<u32, String>,
    /// 生成时间（毫秒时间戳）。
    pub last_update_ms: i64,
}

impl LogicStatusData {
    /// 仅携带运行标志的空快照。
    pub fn with_running(is_logic_running: bool) -> Self {
        Self {
            is_logic_running,
            ..Self::default()
        }
    }

    /// 第 `index` 个 Pinger（从 0 开始）的状态文本。
    pub fn pinger_status(&self, index: usize) -> &str {
        lookup(&self.pinger_statuses, codes::PINGER_STATUS_BASE + index as u32)
    }

    /// 第 `index` 个 Setter（从 0 开始）的状态文本。
    pub fn setter_status(&self, index: usize) -> &str {
        lookup(&self.setter_statuses, codes::SETTER_STATUS_BASE + index as u32)
    }

    pub fn sensor_value(&self, sensor_no: u32) -> &str {
        lookup(&self.sensor_values, sensor_no)
    }

    pub fn sensor_status(&self, sensor_no: u32) -> &str {
        lookup(&self.sensor_statuses, sensor_no)
    }
}

fn lookup(map: &BTreeMap<u32, String>, key: u32) -> &str {
    map.get(&key).map(String::as_str).unwrap_or("-")
}

/// Pinger 状态码 → 文本。
pub fn pinger_status_text(status: u32) -> String {
    match status {
        0 => "silent".to_string(),
        1 => "responds".to_string(),
        2 => "responds with faults".to_string(),
        254 | 255 => "-".to_string(),
        other => format!("unknown({})", other),
    }
}

/// Setter 状态码 → 文本。
pub fn setter_status_text(status: u32) -> String {
    let text = match status {
        0 => "OK",
        1 => "too large",
        2 => "no such OID",
        3 => "bad value",
        4 => "write forbidden",
        5 => "error",
        6 => "awaiting response",
        7 => "timeout",
        8 => "DNS error",
        9 => "no address",
        255 => "-",
        other => return format!("unknown({})", other),
    };
    text.to_string()
}
