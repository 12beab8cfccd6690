//! 日志初始化、操作 ID 与进程内计数器。

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::{EnvFilter, fmt};

/// 计数器快照。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub requests_sent: u64,
    pub request_failures: u64,
    pub writes_verified: u64,
    pub writes_accepted: u64,
    pub writes_assumed: u64,
    pub writes_failed: u64,
    pub form_fallbacks: u64,
    pub write_latency_ms_total: u64,
    pub write_latency_ms_count: u64,
    pub status_polls: u64,
    pub poll_failures: u64,
}

/// 设备访问计数器。
pub struct TelemetryMetrics {
    requests_sent: AtomicU64,
    request_failures: AtomicU64,
    writes_verified: AtomicU64,
    writes_accepted: AtomicU64,
    writes_assumed: AtomicU64,
    writes_failed: AtomicU64,
    form_fallbacks: AtomicU64,
    write_latency_ms_total: AtomicU64,
    write_latency_ms_count: AtomicU64,
    status_polls: AtomicU64,
    poll_failures: AtomicU64,
}

impl TelemetryMetrics {
    pub fn new() -> Self {
        Self {
            requests_sent: AtomicU64::new(0),
            request_failures: AtomicU64::new(0),
            writes_verified: AtomicU64::new(0),
            writes_accepted: AtomicU64::new(0),
            writes_assumed: AtomicU64::new(0),
            writes_failed: AtomicU64::new(0),
            form_fallbacks: AtomicU64::new(0),
            write_latency_ms_total: AtomicU64::new(0),
            write_latency_ms_count: AtomicU64::new(0),
            status_polls: AtomicU64::new(0),
            poll_failures: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            requests_sent: self.requests_sent.load(Ordering::Relaxed),
            request_failures: self.request_failures.load(Ordering::Relaxed),
            writes_verified: self.writes_verified.load(Ordering::Relaxed),
            writes_accepted: self.writes_accepted.load(Ordering::Relaxed),
            writes_assumed: self.writes_assumed.load(Ordering::Relaxed),
            writes_failed: self.writes_failed.load(Ordering::Relaxed),
            form_fallbacks: self.form_fallbacks.load(Ordering::Relaxed),
            write_latency_ms_total: self.write_latency_ms_total.load(Ordering::Relaxed),
            write_latency_ms_count: self.write_latency_ms_count.load(Ordering::Relaxed),
            status_polls: self.status_polls.load(Ordering::Relaxed),
            poll_failures: self.poll_failures.load(Ordering::Relaxed),
        }
    }
}

impl Default for TelemetryMetrics {
    fn default() -> Self {
        Self::new()
    }
}

static METRICS: OnceLock<TelemetryMetrics> = OnceLock::new();

/// 获取全局计数器实例。
pub fn metrics() -> &'static TelemetryMetrics {
    METRICS.get_or_init(TelemetryMetrics::new)
}

/// 初始化 tracing（默认 info，`RUST_LOG` 可覆盖）。重复调用无副作用。
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}

/// 生成一次写操作的追踪 ID。
pub fn new_operation_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// 记录发往设备的请求次数。
pub fn record_request_sent() {
    metrics().requests_sent.fetch_add(1, Ordering::Relaxed);
}

/// 记录传输层失败次数。
pub fn record_request_failure() {
    metrics().request_failures.fetch_add(1, Ordering::Relaxed);
}

/// 记录经回读确认的写入。
pub fn record_write_verified() {
    metrics().writes_verified.fetch_add(1, Ordering::Relaxed);
}

/// 记录设备正常应答、未回读的写入。
pub fn record_write_accepted() {
    metrics().writes_accepted.fetch_add(1, Ordering::Relaxed);
}

/// 记录回读失败后按成功处理的写入。
pub fn record_write_assumed() {
    metrics().writes_assumed.fetch_add(1, Ordering::Relaxed);
}

pub fn record_write_failed() {
    metrics().writes_failed.fetch_add(1, Ordering::Relaxed);
}

/// 记录表单提交未确认、改用二进制提交的次数。
pub fn record_form_fallback() {
    metrics().form_fallbacks.fetch_add(1, Ordering::Relaxed);
}

/// 记录写操作耗时（毫秒，含稳定等待与回读）。
pub fn record_write_latency_ms(latency_ms: u64) {
    let metrics = metrics();
    metrics
        .write_latency_ms_total
        .fetch_add(latency_ms, Ordering::Relaxed);
    metrics
        .write_latency_ms_count
        .fetch_add(1, Ordering::Relaxed);
}

pub fn record_status_poll() {
    metrics().status_polls.fetch_add(1, Ordering::Relaxed);
}

/// 记录状态轮询降级次数。
pub fn record_poll_failure() {
    metrics().poll_failures.fetch_add(1, Ordering::Relaxed);
}
