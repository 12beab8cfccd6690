//! Pinger 块。
//!
//! 每块 124 字节：period@8（u16 LE）、timeout@10（u16 LE）、
//! 地址长度@60 + 地址内容@61..，地址最多 63 字节。

use crate::layout::{encode_hex, put_prefixed_str, put_u16_le};
use domain::{PingerConfig, codes};
use std::ops::RangeInclusive;

pub const PINGER_BLOCK_SIZE: usize = 124;
pub const PINGER_PAYLOAD_SIZE: usize = PINGER_BLOCK_SIZE * codes::MAX_PINGERS;

const PERIOD_OFFSET: usize = 8;
const TIMEOUT_OFFSET: usize = 10;
const ADDRESS_OFFSET: usize = 60;

/// 地址可写入的最大字节数。
pub const PINGER_ADDRESS_MAX: usize = PINGER_BLOCK_SIZE - ADDRESS_OFFSET - 1;

const PERIOD_RANGE: RangeInclusive<u32> = 5..=900;
const TIMEOUT_RANGE: RangeInclusive<u32> = 100..=10_000;

/// 全部条目被过滤后用于占位的参数。
pub const DEFAULT_PINGER_PERIOD: u32 = 15;
pub const DEFAULT_PINGER_TIMEOUT: u32 = 1000;

pub fn is_valid_pinger(pinger: &PingerConfig) -> bool {
    PERIOD_RANGE.contains(&pinger.period)
        && TIMEOUT_RANGE.contains(&pinger.timeout)
        && !pinger.address.trim().is_empty()
}

/// 下发前过滤：只保留参数合法的条目（最多 2 条）；
/// 一条都不剩时用两条空地址占位，保证设备总能收到完整块。
pub fn prepare_pingers(pingers: &[PingerConfig]) -> Vec<PingerConfig> {
    let valid: Vec<PingerConfig> = pingers
        .iter()
        .filter(|pinger| is_valid_pinger(pinger))
        .take(codes::MAX_PINGERS)
        .cloned()
        .collect();

    if valid.is_empty() {
        return vec![
            PingerConfig::new("", DEFAULT_PINGER_PERIOD, DEFAULT_PINGER_TIMEOUT);
            codes::MAX_PINGERS
        ];
    }
    valid
}

/// 构造 248 字节 Pinger 块。不做过滤，调用方先经 [`prepare_pingers`]。
pub fn build_pinger_payload(pingers: &[PingerConfig]) -> Vec<u8> {
    let mut buffer = vec![0u8; PINGER_PAYLOAD_SIZE];

    for (index, pinger) in pingers.iter().take(codes::MAX_PINGERS).enumerate() {
        let base = index * PINGER_BLOCK_SIZE;
        put_u16_le(&mut buffer, base + PERIOD_OFFSET, pinger.period as u16);
        put_u16_le(&mut buffer, base + TIMEOUT_OFFSET, pinger.timeout as u16);
        put_prefixed_str(
            &mut buffer,
            base + ADDRESS_OFFSET,
            PINGER_ADDRESS_MAX + 1,
            &pinger.address,
        );
    }

    buffer
}

pub fn pack_pingers(pingers: &[PingerConfig]) -> String {
    encode_hex(&build_pinger_payload(pingers))
}
