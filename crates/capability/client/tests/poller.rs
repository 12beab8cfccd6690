mod support;

use netping_client::{AutoPoller, DEFAULT_POLL_INTERVAL, HttpMethod};
use std::sync::Arc;
use std::time::Duration;
use support::*;
use tokio::sync::{Mutex, mpsc};
use tokio::time::timeout;

const INTERVAL: Duration = Duration::from_millis(10);
const WAIT: Duration = Duration::from_secs(2);

#[test]
fn default_interval_is_one_minute() {
    assert_eq!(DEFAULT_POLL_INTERVAL, Duration::from_secs(60));
}

#[tokio::test]
async fn poller_delivers_status_until_stopped() {
    let transport = ScriptedTransport::new();
    transport.script_device();
    let client = Arc::new(Mutex::new(connected_client(transport).await));
    let (tx, mut rx) = mpsc::channel(8);

    let mut poller = AutoPoller::new();
    poller.start(client, INTERVAL, tx).await;
    assert!(poller.is_running());

    let status = timeout(WAIT, rx.recv())
        .await
        .expect("status within timeout")
        .expect("channel open");
    assert_eq!(status.pinger_status(0), "responds");
    assert!(status.last_update_ms > 0);

    poller.shutdown().await;
    assert!(!poller.is_running());

    // 任务退出后发送端被释放，缓冲区读空后通道关闭。
    while let Ok(Some(_)) = timeout(WAIT, rx.recv()).await {}
    assert!(rx.recv().await.is_none());
}

#[tokio::test]
async fn restarting_replaces_previous_task() {
    let transport = ScriptedTransport::new();
    transport.script_device();
    let client = Arc::new(Mutex::new(connected_client(transport).await));
    let (first_tx, mut first_rx) = mpsc::channel(8);
    let (second_tx, mut second_rx) = mpsc::channel(8);

    let mut poller = AutoPoller::new();
    poller.start(client.clone(), INTERVAL, first_tx).await;
    poller.start(client, INTERVAL, second_tx).await;

    let status = timeout(WAIT, second_rx.recv()).await.expect("second poller");
    assert!(status.is_some());

    while let Ok(Some(_)) = timeout(WAIT, first_rx.recv()).await {}
    assert!(first_rx.recv().await.is_none());
    poller.shutdown().await;
}

#[tokio::test]
async fn poller_exits_after_disconnect() {
    let transport = ScriptedTransport::new();
    transport.script_device();
    let client = Arc::new(Mutex::new(connected_client(transport).await));
    client.lock().await.disconnect();
    let (tx, mut rx) = mpsc::channel(8);

    let mut poller = AutoPoller::new();
    poller.start(client, INTERVAL, tx).await;

    let next = timeout(WAIT, rx.recv()).await.expect("channel closes");
    assert!(next.is_none());
    poller.shutdown().await;
    assert!(!poller.is_running());
}

#[tokio::test]
async fn dropped_receiver_ends_task() {
    let transport = ScriptedTransport::new();
    transport.script_device();
    let client = Arc::new(Mutex::new(connected_client(transport).await));
    let (tx, rx) = mpsc::channel(1);
    drop(rx);

    let mut poller = AutoPoller::new();
    poller.start(client, INTERVAL, tx).await;
    timeout(WAIT, poller.shutdown()).await.expect("task finishes");
}

#[tokio::test]
async fn reconnect_ends_previous_poll_loop() {
    let transport = ScriptedTransport::new();
    transport.script_device();
    let client = Arc::new(Mutex::new(connected_client(transport.clone()).await));
    let (tx, mut rx) = mpsc::channel(8);

    let mut poller = AutoPoller::new();
    poller
        .start(client.clone(), Duration::from_millis(500), tx)
        .await;

    {
        let mut client = client.lock().await;
        client.disconnect();
        client
            .connect(ADDRESS, "visor", "ping")
            .await
            .expect("reconnect");
    }

    // 旧任务随会话结束退出：通道关闭且没有任何状态送达。
    let next = timeout(WAIT, rx.recv()).await.expect("channel closes");
    assert!(next.is_none());
    assert_eq!(transport.count(HttpMethod::Get, "/logic_status.cgi"), 0);
    timeout(WAIT, poller.shutdown()).await.expect("task finished");
}
