//! # CGI 响应解析
//!
//! 设备返回的不是 JSON，而是 JS 变量赋值风格的文本：
//!
//! ```text
//! var devname='NetPing 2/PWR-220 v3/ETH'; var hwver=9;
//! data={serial:'A1B2',ip:'192.168.0.100',mac:'00:A2:...'}; uptime_100ms=864000;
//! tstat_data=[{sensor_no:0,setpoint:25,hyst:2},{...}];
//! ```
//!
//! 每组字段一个提取函数，全部基于容忍空白的正则。缺失或无法解析的字段
//! 一律给出约定的默认值；只有设备身份与网络设置两个主接口在完全无法识别时返回错误。

mod error;
mod identity;
mod js_object;
mod logic;
mod pattern;
mod records;
mod setup;
mod status;

pub use error::ParseError;
pub use identity::parse_identity;
pub use js_object::{parse_js_object, split_objects};
pub use logic::{parse_logic_rules, parse_logic_running};
pub use records::{parse_pingers, parse_setters, parse_thermostats};
pub use setup::{SetupData, format_uptime, parse_setup, parse_uptime_seconds};
pub use status::{parse_logic_status, thermostat_status_text};
