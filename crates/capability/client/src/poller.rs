//! 状态自动轮询。
//!
//! 同一时刻最多一个轮询任务：启动新任务前先停止旧任务。停止是协作式的，
//! 任务在等待边界检查停止信号后退出。客户端断开或更换会话时任务同样退出，
//! 不会继续轮询之后建立的新会话。

use crate::LOG_TARGET;
use crate::client::DeviceClient;
use domain::LogicStatusData;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// 默认轮询间隔。
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);

/// 状态轮询任务句柄。丢弃时自动停止。
#[derive(Default)]
pub struct AutoPoller {
    shutdown: Option<watch::Sender<bool>>,
    handle: Option<JoinHandle<()>>,
}

impl AutoPoller {
    pub fn new() -> Self {
        Self::default()
    }

    /// 启动轮询：每隔 `interval` 读取一次状态并发送到 `sink`。
    ///
    /// 会话结束或接收端关闭时任务自行结束。
    pub async fn start(
        &mut self,
        client: Arc<Mutex<DeviceClient>>,
        interval: Duration,
        sink: mpsc::Sender<LogicStatusData>,
    ) {
        self.stop();

        let mut session_rx = client.lock().await.session_generation();
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(async move {
            info!(target: LOG_TARGET, interval_ms = interval.as_millis() as u64, "auto poll started");
            loop {
                tokio::select! {
                    _ = tokio::time::sleep(interval) => {}
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                        continue;
                    }
                    _ = session_rx.changed() => {
                        debug!(target: LOG_TARGET, "session ended");
                        break;
                    }
                }

                let status = {
                    let client = client.lock().await;
                    client.fetch_logic_status().await
                };
                match status {
                    Ok(status) => {
                        if sink.send(status).await.is_err() {
                            debug!(target: LOG_TARGET, "status receiver closed");
                            break;
                        }
                    }
                    Err(err) => {
                        warn!(target: LOG_TARGET, error = %err, "auto poll stopped");
                        break;
                    }
                }
            }
            info!(target: LOG_TARGET, "auto poll finished");
        });

        self.shutdown = Some(shutdown_tx);
        self.handle = Some(handle);
    }

    /// 发出停止信号。
    pub fn stop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(true);
        }
        self.handle = None;
    }

    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// 停止并等待任务退出。
    pub async fn shutdown(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(true);
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for AutoPoller {
    fn drop(&mut self) {
        self.stop();
    }
}
