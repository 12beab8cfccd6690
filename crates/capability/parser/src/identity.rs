//! devname_menu.cgi：型号、固件、硬件版本、系统名称与位置。

use crate::error::ParseError;
use crate::pattern::Pattern;
use domain::DeviceInfo;

static DEVNAME: Pattern = Pattern::new(r#"\bdevname\s*=\s*['"]([^'"]*)['"]"#);
static FWVER: Pattern = Pattern::new(r#"\bfwver\s*=\s*['"]([^'"]*)['"]"#);
static HWVER: Pattern = Pattern::new(r"\bhwver\s*=\s*(\d+)");
static SYS_NAME: Pattern = Pattern::new(r#"\bsys_name\s*=\s*"([^"]*)""#);
static SYS_LOCATION: Pattern = Pattern::new(r#"\bsys_location\s*=\s*"([^"]*)""#);

const UNKNOWN: &str = "Unknown";

/// 解析设备身份。
///
/// 序列号、运行时间与联系人不在该接口中，填 "Unknown"，由 setup 数据补全。
/// `devname`、`fwver`、`hwver` 三者都不存在时视为无法识别。
pub fn parse_identity(body: &str) -> Result<DeviceInfo, ParseError> {
    let model = DEVNAME.capture(body);
    let firmware = FWVER.capture(body);
    let hwver = HWVER.capture(body);

    if model.is_none() && firmware.is_none() && hwver.is_none() {
        return Err(ParseError::MissingIdentity);
    }

    let hwver: u32 = hwver.and_then(|v| v.parse().ok()).unwrap_or(0);

    Ok(DeviceInfo {
        model: model.unwrap_or(UNKNOWN).to_string(),
        firmware: firmware.unwrap_or(UNKNOWN).to_string(),
        hardware_version: format!("1.{}", hwver),
        serial_number: UNKNOWN.to_string(),
        uptime: UNKNOWN.to_string(),
        hostname: SYS_NAME.capture(body).unwrap_or_default().to_string(),
        location: SYS_LOCATION.capture(body).unwrap_or_default().to_string(),
        contact: UNKNOWN.to_string(),
    })
}
