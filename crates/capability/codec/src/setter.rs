//! SNMP Setter 块。
//!
//! 每块 220 字节，字符串字段均为长度前缀格式：
//! name@0（32）、oid@32（60）、address@100（64）、community@164（16），
//! 随后 port@194（u16 LE）、value_on@196（i32 LE）、value_off@200（i32 LE）。

use crate::layout::{encode_hex, put_i32_le, put_prefixed_str, put_u16_le};
use domain::{SetterConfig, codes};

pub const SETTER_BLOCK_SIZE: usize = 220;
pub const SETTER_PAYLOAD_SIZE: usize = SETTER_BLOCK_SIZE * codes::MAX_SETTERS;

const NAME_OFFSET: usize = 0;
const NAME_SLOT: usize = 32;
const OID_OFFSET: usize = 32;
const OID_SLOT: usize = 60;
const ADDRESS_OFFSET: usize = 100;
const ADDRESS_SLOT: usize = 64;
const COMMUNITY_OFFSET: usize = 164;
const COMMUNITY_SLOT: usize = 16;
const PORT_OFFSET: usize = 194;
const VALUE_ON_OFFSET: usize = 196;
const VALUE_OFF_OFFSET: usize = 200;

/// 补齐未填写的字段：空 OID、空 community、端口 0、value_on 0 分别替换为默认值。
pub fn normalize_setter(setter: &SetterConfig) -> SetterConfig {
    let mut normalized = setter.clone();
    if normalized.oid.trim().is_empty() {
        normalized.oid = codes::DEFAULT_SETTER_OID.to_string();
    }
    if normalized.community.trim().is_empty() {
        normalized.community = codes::DEFAULT_COMMUNITY.to_string();
    }
    if normalized.port == 0 {
        normalized.port = codes::DEFAULT_SNMP_PORT;
    }
    if normalized.value_on == 0 {
        normalized.value_on = 1;
    }
    normalized
}

/// 构造 440 字节 Setter 块。字段按原样写入，不做补齐。
pub fn build_setter_payload(setters: &[SetterConfig]) -> Vec<u8> {
    let mut buffer = vec![0u8; SETTER_PAYLOAD_SIZE];

    for (index, setter) in setters.iter().take(codes::MAX_SETTERS).enumerate() {
        let base = index * SETTER_BLOCK_SIZE;
        put_prefixed_str(&mut buffer, base + NAME_OFFSET, NAME_SLOT, &setter.name);
        put_prefixed_str(&mut buffer, base + OID_OFFSET, OID_SLOT, &setter.oid);
        put_prefixed_str(&mut buffer, base + ADDRESS_OFFSET, ADDRESS_SLOT, &setter.address);
        put_prefixed_str(
            &mut buffer,
            base + COMMUNITY_OFFSET,
            COMMUNITY_SLOT,
            &setter.community,
        );
        put_u16_le(&mut buffer, base + PORT_OFFSET, setter.port);
        put_i32_le(&mut buffer, base + VALUE_ON_OFFSET, setter.value_on);
        put_i32_le(&mut buffer, base + VALUE_OFF_OFFSET, setter.value_off);
    }

    buffer
}

pub fn pack_setters(setters: &[SetterConfig]) -> String {
    encode_hex(&build_setter_payload(setters))
}
