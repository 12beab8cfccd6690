//! tstat_get.cgi / pinger_get.cgi / setter_get.cgi 配置数组。

use crate::js_object::{field, parse_js_object, split_objects};
use crate::pattern::Pattern;
use domain::{PingerConfig, SetterConfig, ThermostatConfig, ThermostatSet, codes};
use std::collections::BTreeMap;

static TERMO_CHANNELS: Pattern = Pattern::new(r"\btermo_n_ch\s*=\s*(\d+)");
static RH_CHANNELS: Pattern = Pattern::new(r"\brh_n_ch\s*=\s*(\d+)");
static TSTAT_DATA: Pattern = Pattern::new(r"\btstat_data\s*=\s*\[([^\]]*)\]");
static PINGER_DATA: Pattern = Pattern::new(r"\bpinger_data\s*=\s*\[([^\]]*)\]");
static SETTER_DATA: Pattern = Pattern::new(r"\bsetter_data\s*=\s*\[([^\]]*)\]");

const DEFAULT_TERMO_CHANNELS: u32 = 8;
const DEFAULT_PINGER_PERIOD: u32 = 30;
const DEFAULT_PINGER_TIMEOUT: u32 = 1000;

pub fn parse_thermostats(body: &str) -> ThermostatSet {
    let thermostats = objects(&TSTAT_DATA, body)
        .into_iter()
        .map(|object| ThermostatConfig {
            sensor_no: field(&object, "sensor_no").unwrap_or(0),
            setpoint: field(&object, "setpoint").unwrap_or(0),
            hyst: field(&object, "hyst").unwrap_or(1),
        })
        .collect();

    ThermostatSet {
        thermostats,
        termo_channels: TERMO_CHANNELS
            .capture_parsed(body)
            .unwrap_or(DEFAULT_TERMO_CHANNELS),
        rh_channels: RH_CHANNELS.capture_parsed(body).unwrap_or(0),
    }
}

pub fn parse_pingers(body: &str) -> Vec<PingerConfig> {
    objects(&PINGER_DATA, body)
        .into_iter()
        .map(|object| PingerConfig {
            address: address(&object),
            period: field(&object, "period").unwrap_or(DEFAULT_PINGER_PERIOD),
            timeout: field(&object, "timeout").unwrap_or(DEFAULT_PINGER_TIMEOUT),
        })
        .collect()
}

pub fn parse_setters(body: &str) -> Vec<SetterConfig> {
    objects(&SETTER_DATA, body)
        .into_iter()
        .map(|object| SetterConfig {
            name: object.get("name").cloned().unwrap_or_default(),
            address: address(&object),
            port: field(&object, "port").unwrap_or(codes::DEFAULT_SNMP_PORT),
            oid: object.get("oid").cloned().unwrap_or_default(),
            community: object
                .get("community")
                .cloned()
                .unwrap_or_else(|| codes::DEFAULT_COMMUNITY.to_string()),
            value_on: field(&object, "value_on").unwrap_or(1),
            value_off: field(&object, "value_off").unwrap_or(0),
        })
        .collect()
}

fn objects(pattern: &Pattern, body: &str) -> Vec<BTreeMap<String, String>> {
    match pattern.capture(body) {
        Some(array) => split_objects(array).into_iter().map(parse_js_object).collect(),
        None => Vec::new(),
    }
}

/// 优先 `hostname`，其次 `ip`。
fn address(object: &BTreeMap<String, String>) -> String {
    object
        .get("hostname")
        .or_else(|| object.get("ip"))
        .cloned()
        .unwrap_or_default()
}
