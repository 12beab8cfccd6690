//! 温控块：setpoint@0、hyst@1、sensor_no@2、保留@3，均为单字节。

use crate::layout::encode_hex;
use domain::{ThermostatConfig, codes};

pub const THERMOSTAT_BLOCK_SIZE: usize = 8;
pub const THERMOSTAT_PAYLOAD_SIZE: usize = THERMOSTAT_BLOCK_SIZE * codes::MAX_THERMOSTATS;

const SETPOINT_OFFSET: usize = 0;
const HYST_OFFSET: usize = 1;
const SENSOR_OFFSET: usize = 2;

pub fn build_thermostat_payload(thermostats: &[ThermostatConfig]) -> Vec<u8> {
    let mut buffer = vec![0u8; THERMOSTAT_PAYLOAD_SIZE];

    for (index, tstat) in thermostats.iter().take(codes::MAX_THERMOSTATS).enumerate() {
        let base = index * THERMOSTAT_BLOCK_SIZE;
        // 负设定值按补码取低 8 位
        buffer[base + SETPOINT_OFFSET] = tstat.setpoint as u8;
        buffer[base + HYST_OFFSET] = tstat.hyst as u8;
        buffer[base + SENSOR_OFFSET] = tstat.sensor_no as u8;
    }

    buffer
}

pub fn pack_thermostats(thermostats: &[ThermostatConfig]) -> String {
    encode_hex(&build_thermostat_payload(thermostats))
}
