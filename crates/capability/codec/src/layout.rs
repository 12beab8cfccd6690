//! 块内字段写入工具。
//!
//! 所有多字节整数均为小端序。调用方保证偏移落在缓冲区内。

use crate::error::CodecError;

pub(crate) fn put_u16_le(buffer: &mut [u8], offset: usize, value: u16) {
    buffer[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
}

pub(crate) fn put_i32_le(buffer: &mut [u8], offset: usize, value: i32) {
    buffer[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

/// 写入长度前缀字符串。
///
/// 槽位首字节为 UTF-8 字节长度（上限 `slot_size - 1`），随后为截断后的内容，
/// 其余字节保持为零。返回实际写入的内容字节数。
pub(crate) fn put_prefixed_str(
    buffer: &mut [u8],
    offset: usize,
    slot_size: usize,
    value: &str,
) -> usize {
    let bytes = value.as_bytes();
    let len = bytes.len().min(slot_size - 1).min(u8::MAX as usize);
    buffer[offset] = len as u8;
    buffer[offset + 1..offset + 1 + len].copy_from_slice(&bytes[..len]);
    len
}

/// 字节 → 小写十六进制。
pub fn encode_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// 十六进制 → 字节（大小写均可）。
pub fn decode_hex(payload: &str) -> Result<Vec<u8>, CodecError> {
    Ok(hex::decode(payload.trim())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixed_str_clamps_to_slot() {
        let mut buffer = [0u8; 8];
        let written = put_prefixed_str(&mut buffer, 0, 4, "abcdef");
        assert_eq!(written, 3);
        assert_eq!(buffer, [3, b'a', b'b', b'c', 0, 0, 0, 0]);
    }

    #[test]
    fn integers_are_little_endian() {
        let mut buffer = [0u8; 6];
        put_u16_le(&mut buffer, 0, 0x1234);
        put_i32_le(&mut buffer, 2, -2);
        assert_eq!(buffer, [0x34, 0x12, 0xfe, 0xff, 0xff, 0xff]);
    }

    #[test]
    fn hex_is_lowercase_and_reversible() {
        assert_eq!(encode_hex(&[0xAB, 0x01]), "ab01");
        assert_eq!(decode_hex("AB01").expect("hex"), vec![0xab, 0x01]);
        assert!(decode_hex("abc").is_err());
    }
}
