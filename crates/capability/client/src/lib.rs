//! # NetPing 设备客户端
//!
//! 负责与单台设备的全部交互：
//! - **读**：全量快照（身份、网络、逻辑规则、温控、Pinger、Setter、实时状态）与仅状态轮询
//! - **写**：四类配置块的保存，逻辑引擎启停/复位，Setter 测试触发
//! - **写入校验**：设备内置 Web 服务器常在接受写入后立即断开连接，
//!   写入按"表单提交 → 二进制提交 → 回读比对"的顺序判定结果
//!
//! ## 写入状态机
//!
//! ```text
//! 表单提交 data=<hex>
//!   ├─ 2xx 且正文不含 "error" → 等待稳定 → 回读匹配 → Verified
//!   └─ 其他情况 ↓
//! 二进制提交 application/octet-stream
//!   ├─ 连接中途断开 / 2xx 但正文为 HTML → 等待稳定 → 回读
//!   │     ├─ 匹配 → Verified
//!   │     ├─ 不匹配 → NotSaved
//!   │     └─ 回读失败 → Assumed
//!   ├─ 2xx 普通正文 → Accepted
//!   └─ 非 2xx → HttpStatus
//! ```
//!
//! ## 并发约定
//!
//! [`DeviceClient`] 的会话状态只由客户端自身修改，调用方串行发起操作；
//! 与 [`AutoPoller`] 共享时通过 `Arc<tokio::sync::Mutex<DeviceClient>>`。

mod client;
mod clock;
mod config;
mod endpoint;
mod error;
mod poller;
mod session;
mod transport;
mod write;

pub use client::DeviceClient;
pub use clock::now_epoch_ms;
pub use config::ClientConfig;
pub use error::ClientError;
pub use poller::{AutoPoller, DEFAULT_POLL_INTERVAL};
pub use session::DeviceSession;
pub use transport::{
    HttpMethod, HttpRequest, HttpResponse, HttpTransport, RequestBody, ReqwestTransport,
    TransportError, TransportErrorKind,
};
pub use write::SaveOutcome;

/// 客户端日志 target。
pub(crate) const LOG_TARGET: &str = "netping.client";
