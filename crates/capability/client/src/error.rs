//! 客户端错误类型定义

use crate::transport::TransportError;
use netping_codec::CodecError;
use netping_parser::ParseError;

/// 错误正文最多保留的字符数
const BODY_EXCERPT_CHARS: usize = 200;

/// 设备操作错误
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// 没有活动会话
    #[error("not connected to a device")]
    NotConnected,

    /// 连接测试未通过
    #[error("device {0} is not responding")]
    Unreachable(String),

    /// 传输层错误（DNS、连接、读取）
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// 设备返回非 2xx
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// 设备以 2xx 应答但正文报告错误
    #[error("device rejected the request: {0}")]
    Rejected(String),

    /// 写入后回读与提交内容不一致
    #[error("{0} data did not save")]
    NotSaved(&'static str),

    /// 主接口响应无法识别
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("codec error: {0}")]
    Codec(#[from] CodecError),
}

impl ClientError {
    pub(crate) fn http_status(status: u16, body: &str) -> Self {
        Self::HttpStatus {
            status,
            body: excerpt(body),
        }
    }

    pub(crate) fn rejected(body: &str) -> Self {
        Self::Rejected(excerpt(body))
    }
}

fn excerpt(body: &str) -> String {
    body.trim().chars().take(BODY_EXCERPT_CHARS).collect()
}
