//! NetPing 领域模型：配置记录、派生状态与协议码描述表。
//!
//! 所有模块共享的类型都在这里定义，codec/parser/client 只依赖本 crate，
//! 彼此之间不直接引用对方的内部类型。

pub mod descriptor;
pub mod device;
pub mod record;
pub mod status;

pub use descriptor::{DeviceCapabilities, DeviceFamily, OptionEntry};
pub use device::{DeviceInfo, DeviceSnapshot, LogicAction, NetworkInfo, SavedDevice};
pub use record::{
    LogicRule, PingerConfig, SetterConfig, ThermostatConfig, ThermostatSet, codes,
};
pub use status::{LogicStatusData, pinger_status_text, setter_status_text};
