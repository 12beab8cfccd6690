//! 编解码错误类型定义

/// 配置块编解码错误
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// 十六进制字符串非法（奇数长度或非十六进制字符）
    #[error("invalid hex payload: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}
