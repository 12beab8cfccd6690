//! logic_status.cgi：传感器读数、温控状态、Pinger/Setter 状态码。

use crate::logic::parse_logic_running;
use crate::pattern::Pattern;
use domain::{LogicStatusData, ThermostatConfig, codes, pinger_status_text, setter_status_text};
use std::collections::BTreeMap;

static TSTAT_STATUS: Pattern = Pattern::new(r"\btstat_status\s*=\s*\[([^\]]*)\]");
static TSTAT_ENTRY: Pattern =
    Pattern::new(r"\{\s*t_status\s*:\s*(\d+)\s*,\s*t_val\s*:\s*([+-]?\d+(?:\.\d+)?)\s*\}");
static PINGER_STATUS: Pattern = Pattern::new(r"\bpinger_status\s*=\s*\[([^\]]*)\]");
static SETTER_STATUS: Pattern = Pattern::new(r"\bsetter_status\s*=\s*\[([^\]]*)\]");

/// 无法解析的状态码按"无数据"处理。
const NO_DATA: u32 = 255;

/// 解析实时状态。
///
/// `thermostats` 为最近一次读取的温控配置，用于给出带阈值的状态文本。
/// 返回的运行标志来自本接口自身的 `data_logic_flags`，调用方可用缓存值覆盖。
pub fn parse_logic_status(
    body: &str,
    thermostats: &[ThermostatConfig],
    now_ms: i64,
) -> LogicStatusData {
    let mut status = LogicStatusData::with_running(parse_logic_running(body).unwrap_or(false));
    status.last_update_ms = now_ms;

    if let (Some(array), Some(entry)) = (TSTAT_STATUS.capture(body), TSTAT_ENTRY.regex()) {
        for (slot, caps) in entry.captures_iter(array).enumerate() {
            let slot = slot as u32;
            let code: u32 = caps
                .get(1)
                .and_then(|m| m.as_str().parse().ok())
                .unwrap_or(0);
            let value = caps.get(2).map(|m| m.as_str()).unwrap_or_default();

            let display = if code == codes::TSTAT_SENSOR_FAULT {
                "-".to_string()
            } else {
                format!("{} °C", value)
            };
            status.sensor_values.insert(slot, display);
            status
                .sensor_statuses
                .insert(slot, thermostat_status_text(code, slot, thermostats));
        }
    }

    status.pinger_statuses = status_codes(
        &PINGER_STATUS,
        body,
        codes::PINGER_STATUS_BASE,
        pinger_status_text,
    );
    status.setter_statuses = status_codes(
        &SETTER_STATUS,
        body,
        codes::SETTER_STATUS_BASE,
        setter_status_text,
    );
    status
}

/// 温控槽位状态文本。
///
/// 找到对应传感器的温控配置时给出阈值：低于状态阈值为 `setpoint + hyst`，
/// 高于状态阈值为 `setpoint - hyst`。
pub fn thermostat_status_text(code: u32, sensor_no: u32, thermostats: &[ThermostatConfig]) -> String {
    let configured = thermostats.iter().find(|t| t.sensor_no == sensor_no);
    match (code, configured) {
        (codes::TSTAT_SENSOR_FAULT, _) => "sensor fault".to_string(),
        (0, Some(t)) => format!("below (threshold {})", i64::from(t.setpoint) + i64::from(t.hyst)),
        (0, None) => "below threshold".to_string(),
        (1, Some(t)) => format!("above (threshold {})", i64::from(t.setpoint) - i64::from(t.hyst)),
        (1, None) => "above threshold".to_string(),
        _ => "-".to_string(),
    }
}

fn status_codes(
    pattern: &Pattern,
    body: &str,
    base: u32,
    text: fn(u32) -> String,
) -> BTreeMap<u32, String> {
    let Some(array) = pattern.capture(body).filter(|a| !a.trim().is_empty()) else {
        return BTreeMap::new();
    };
    array
        .split(',')
        .enumerate()
        .map(|(index, entry)| {
            let code = entry.trim().parse().unwrap_or(NO_DATA);
            (base + index as u32, text(code))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thermostat_text_uses_configured_threshold() {
        let tstats = [ThermostatConfig { sensor_no: 2, setpoint: 25, hyst: 2 }];
        assert_eq!(thermostat_status_text(0, 2, &tstats), "below (threshold 27)");
        assert_eq!(thermostat_status_text(1, 2, &tstats), "above (threshold 23)");
        assert_eq!(thermostat_status_text(0, 1, &tstats), "below threshold");
        assert_eq!(thermostat_status_text(1, 1, &tstats), "above threshold");
        assert_eq!(thermostat_status_text(0xfe, 2, &tstats), "sensor fault");
        assert_eq!(thermostat_status_text(3, 2, &tstats), "-");
    }
}
