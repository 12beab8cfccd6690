//! NetPing 设备命令行工具：读取配置与状态、控制逻辑引擎、持续监视。

mod devices;

use clap::{Parser, Subcommand, ValueEnum};
use domain::{LogicAction, LogicStatusData};
use netping_client::{AutoPoller, ClientConfig, DeviceClient, ReqwestTransport, now_epoch_ms};
use netping_config::AppConfig;
use netping_telemetry::{init_tracing, metrics};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};
use tracing::info;

#[derive(Parser)]
#[command(name = "netping-monitor")]
#[command(version, about = "NetPing / UniPing device client", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Clone, Copy)]
enum Command {
    /// 全量读取并以 JSON 输出（默认）
    Snapshot,
    /// 仅读取实时状态
    Status,
    /// 启动逻辑引擎
    Start,
    /// 停止逻辑引擎
    Stop,
    /// 复位逻辑引擎
    Reset,
    /// 触发 SNMP Setter（通道从 1 开始）
    SetterTest {
        channel: usize,
        #[arg(value_enum)]
        state: Switch,
    },
    /// 按配置间隔持续读取状态，Ctrl-C 退出
    Watch,
}

#[derive(ValueEnum, Clone, Copy, PartialEq, Eq)]
enum Switch {
    On,
    Off,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 加载本地 .env（如存在）
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = AppConfig::from_env()?;
    init_tracing();

    let client_config = ClientConfig {
        connect_timeout: config.connect_timeout(),
        read_timeout: config.read_timeout(),
        settle_delay: config.settle_delay(),
        user_agent: config.user_agent.clone(),
    };
    let transport = Arc::new(ReqwestTransport::new(&client_config)?);
    let mut client = DeviceClient::new(transport, client_config);
    client
        .connect(&config.address, &config.username, &config.password)
        .await?;

    let store = devices::open_store(&config);
    let device_id = devices::remember(store.as_ref(), &config, now_epoch_ms()).await;

    match cli.command.unwrap_or(Command::Snapshot) {
        Command::Snapshot => {
            let snapshot = client.fetch_snapshot().await?;
            if let Some(id) = device_id.as_deref() {
                devices::rename(store.as_ref(), id, &snapshot.info.model).await;
            }
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        Command::Status => {
            let status = client.fetch_logic_status().await?;
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
        Command::Start => control(&mut client, LogicAction::Start).await?,
        Command::Stop => control(&mut client, LogicAction::Stop).await?,
        Command::Reset => control(&mut client, LogicAction::Reset).await?,
        Command::SetterTest { channel, state } => {
            let index = channel.checked_sub(1).ok_or("setter channel starts at 1")?;
            let turn_on = state == Switch::On;
            client.test_setter(index, turn_on).await?;
            println!("setter {} switched {}", channel, if turn_on { "on" } else { "off" });
        }
        Command::Watch => {
            // 状态文本计算阈值需要温控配置，先做一次全量读取。
            client.fetch_snapshot().await?;
            watch(client, &config).await?;
        }
    }

    info!(metrics = ?metrics().snapshot(), "done");
    Ok(())
}

async fn control(
    client: &mut DeviceClient,
    action: LogicAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let running = client.control_logic(action).await?;
    println!("logic {}", if running { "running" } else { "stopped" });
    Ok(())
}

async fn watch(client: DeviceClient, config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let client = Arc::new(Mutex::new(client));
    let (tx, mut rx) = mpsc::channel::<LogicStatusData>(8);
    let mut poller = AutoPoller::new();
    poller.start(client.clone(), config.poll_interval(), tx).await;
    info!(interval_s = config.poll_interval_seconds, "watching device, Ctrl-C to stop");

    loop {
        tokio::select! {
            status = rx.recv() => match status {
                Some(status) => println!("{}", serde_json::to_string(&status)?),
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted");
                break;
            }
        }
    }

    poller.shutdown().await;
    client.lock().await.disconnect();
    Ok(())
}
