//! 设备配置记录。
//!
//! 记录只在调用方内存中存在，保存时整体打包下发；每次全量读取都重新从设备获取。

use serde::{Deserialize, Serialize};

/// 协议码常量。
pub mod codes {
    /// 规则启用位。
    pub const FLAG_ENABLED: u8 = 0x01;
    /// 触发型（"If"）规则位，未置位为电平型（"While"）。
    pub const FLAG_TRIGGER: u8 = 0x02;

    /// RESET 输入。
    pub const INPUT_RESET: u8 = 1;

    pub const ACTION_OFF: u8 = 0;
    pub const ACTION_ON: u8 = 1;
    pub const ACTION_TOGGLE: u8 = 2;

    /// 输出码高 4 位掩码。
    pub const OUTPUT_FAMILY_MASK: u8 = 0xF0;
    /// SNMP Setter / CS 电源类输出。
    pub const OUTPUT_FAMILY_CS: u8 = 0xC0;
    /// 红外输出。
    pub const OUTPUT_FAMILY_IR: u8 = 0xD0;
    /// 烟雾传感器复位输出。
    pub const OUTPUT_SMOKE_RESET: u8 = 240;

    /// pinger_status 数组下标 0 对应的协议码。
    pub const PINGER_STATUS_BASE: u32 = 48;
    /// setter_status 数组下标 0 对应的协议码。
    pub const SETTER_STATUS_BASE: u32 = 192;

    /// 温控状态：传感器故障。
    pub const TSTAT_SENSOR_FAULT: u32 = 0xfe;

    /// 设备最多保存的逻辑规则数。
    pub const MAX_LOGIC_RULES: usize = 8;
    /// 每台设备最多的温控/Pinger/Setter 条目数。
    pub const MAX_THERMOSTATS: usize = 2;
    pub const MAX_PINGERS: usize = 2;
    pub const MAX_SETTERS: usize = 2;

    pub const DEFAULT_SNMP_PORT: u16 = 161;
    pub const DEFAULT_COMMUNITY: &str = "public";
    pub const DEFAULT_SETTER_OID: &str = "1.3.6.1.4.1.25728.8200.1.1.2.1.1";
}

/// 逻辑规则（设备端 5 字节记录）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LogicRule {
    pub flags: u8,
    pub input: u8,
    pub condition: u8,
    pub action: u8,
    pub output: u8,
}

impl LogicRule {
    pub fn new(flags: u8, input: u8, condition: u8, action: u8, output: u8) -> Self {
        Self {
            flags,
            input,
            condition,
            action,
            output,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.flags & codes::FLAG_ENABLED != 0
    }

    /// 触发型规则（"If"），否则为电平型（"While"）。
    pub fn is_trigger(&self) -> bool {
        self.flags & codes::FLAG_TRIGGER != 0
    }
}

/// 温控配置。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThermostatConfig {
    pub sensor_no: u32,
    /// 设定值（有符号，设备原生单位）。
    pub setpoint: i32,
    /// 回差，有效范围 1–8。
    pub hyst: u32,
}

impl Default for ThermostatConfig {
    fn default() -> Self {
        Self {
            sensor_no: 0,
            setpoint: 0,
            hyst: 1,
        }
    }
}

/// tstat_get.cgi 读取结果：温控列表与通道数量。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThermostatSet {
    pub thermostats: Vec<ThermostatConfig>,
    /// 温度通道数（termo_n_ch）。
    pub termo_channels: u32,
    /// 湿度传感器数（rh_n_ch）。
    pub rh_channels: u32,
}

impl Default for ThermostatSet {
    fn default() -> Self {
        Self {
            thermostats: Vec::new(),
            termo_channels: 8,
            rh_channels: 0,
        }
    }
}

/// Pinger 配置。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PingerConfig {
    /// 主机名或 IP。
    pub address: String,
    /// 探测周期（秒），有效范围 5–900。
    pub period: u32,
    /// 超时（毫秒），有效范围 100–10000。
    pub timeout: u32,
}

impl PingerConfig {
    pub fn new(address: impl Into<String>, period: u32, timeout: u32) -> Self {
        Self {
            address: address.into(),
            period,
            timeout,
        }
    }
}

/// SNMP Setter 配置。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetterConfig {
    pub name: String,
    pub address: String,
    pub port: u16,
    /// 点分形式 OID。
    pub oid: String,
    pub community: String,
    pub value_on: i32,
    pub value_off: i32,
}

impl Default for SetterConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            address: String::new(),
            port: codes::DEFAULT_SNMP_PORT,
            oid: String::new(),
            community: codes::DEFAULT_COMMUNITY.to_string(),
            value_on: 1,
            value_off: 0,
        }
    }
}
