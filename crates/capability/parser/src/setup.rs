//! setup_get.cgi：序列号、联系人、网络参数与运行时间。

use crate::error::ParseError;
use crate::js_object::parse_js_object;
use crate::pattern::Pattern;
use domain::NetworkInfo;
use std::collections::BTreeMap;

static SETUP_OBJECT: Pattern = Pattern::new(r"\bdata\s*=\s*\{([^}]*)\}");
static UPTIME: Pattern = Pattern::new(r"\buptime_100ms\s*=\s*(\d+)");

const UNKNOWN: &str = "Unknown";

/// setup_get.cgi 解析结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupData {
    pub serial_number: String,
    pub contact: String,
    pub hostname: String,
    pub location: String,
    pub network: NetworkInfo,
    pub uptime_seconds: u64,
    /// 已格式化的运行时间，见 [`format_uptime`]。
    pub uptime: String,
    /// 原始键值，便于调用方读取未建模的字段。
    pub raw: BTreeMap<String, String>,
}

pub fn parse_setup(body: &str) -> Result<SetupData, ParseError> {
    let fragment = SETUP_OBJECT
        .capture(body)
        .ok_or(ParseError::MissingSetupObject)?;
    let raw = parse_js_object(fragment);
    let text = |key: &str| raw.get(key).cloned().unwrap_or_else(|| UNKNOWN.to_string());

    let hostname = text("hostname");
    let network = NetworkInfo {
        ip_address: text("ip"),
        mac_address: text("mac"),
        subnet_mask: text("mask"),
        gateway: text("gate"),
        hostname: hostname.clone(),
    };
    let uptime_seconds = parse_uptime_seconds(body);

    Ok(SetupData {
        serial_number: text("serial"),
        contact: text("contact"),
        location: text("location"),
        hostname,
        network,
        uptime_seconds,
        uptime: format_uptime(uptime_seconds),
        raw,
    })
}

/// `uptime_100ms` 换算为秒（整除 10），缺失为 0。
pub fn parse_uptime_seconds(body: &str) -> u64 {
    UPTIME.capture_parsed::<u64>(body).unwrap_or(0) / 10
}

/// 格式化为 "<d>д <h>ч <m>м <s>с"。
///
/// 开头为零的单位省略；一旦输出了某个单位，其后的单位全部输出；秒总是输出。
pub fn format_uptime(seconds: u64) -> String {
    let units = [
        (seconds / 86_400, "д"),
        ((seconds % 86_400) / 3_600, "ч"),
        ((seconds % 3_600) / 60, "м"),
    ];

    let mut parts: Vec<String> = units
        .iter()
        .skip_while(|(value, _)| *value == 0)
        .map(|(value, unit)| format!("{}{}", value, unit))
        .collect();
    parts.push(format!("{}с", seconds % 60));
    parts.join(" ")
}
