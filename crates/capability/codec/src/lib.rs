//! # 配置块打包
//!
//! 设备的写入接口只接受定长、定偏移的二进制块，以小写十六进制字符串形式提交
//! （每字节两个字符，无分隔符、无前缀）。每种记录的总长度固定，
//! 不足的槽位补零：
//!
//! | 记录 | 块大小 | 块数 | 总字节 |
//! |---|---|---|---|
//! | 逻辑规则 | 16 | 8 | 128 |
//! | 温控 | 8 | 2 | 16 |
//! | Pinger | 124 | 2 | 248 |
//! | SNMP Setter | 220 | 2 | 440 |
//!
//! 读路径不经过本模块：设备返回的是 JS 赋值风格文本，由 parser 解析。

mod error;
mod layout;
mod logic;
mod pinger;
mod setter;
mod thermostat;

pub use error::CodecError;
pub use layout::{decode_hex, encode_hex};
pub use logic::{
    LOGIC_BLOCK_SIZE, LOGIC_PAYLOAD_SIZE, RuleRejection, build_logic_payload, pack_logic_rules,
    validate_logic_rule,
};
pub use pinger::{
    DEFAULT_PINGER_PERIOD, DEFAULT_PINGER_TIMEOUT, PINGER_ADDRESS_MAX, PINGER_BLOCK_SIZE,
    PINGER_PAYLOAD_SIZE, build_pinger_payload, is_valid_pinger, pack_pingers, prepare_pingers,
};
pub use setter::{
    SETTER_BLOCK_SIZE, SETTER_PAYLOAD_SIZE, build_setter_payload, normalize_setter, pack_setters,
};
pub use thermostat::{
    THERMOSTAT_BLOCK_SIZE, THERMOSTAT_PAYLOAD_SIZE, build_thermostat_payload, pack_thermostats,
};
