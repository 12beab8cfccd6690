//! 已保存设备记录。
//!
//! 存储失败只记日志，不影响设备操作本身。

use netping_config::AppConfig;
use netping_storage::{
    DeviceStore, InMemoryDeviceStore, JsonFileDeviceStore, mark_connected, remember_device,
};
use tracing::warn;

pub fn open_store(config: &AppConfig) -> Box<dyn DeviceStore> {
    match &config.devices_file {
        Some(path) => Box::new(JsonFileDeviceStore::new(path.clone())),
        None => Box::new(InMemoryDeviceStore::new()),
    }
}

/// 记录本次连接的设备并设为当前设备，返回其 ID。
pub async fn remember(store: &dyn DeviceStore, config: &AppConfig, now_ms: i64) -> Option<String> {
    let mut saved = match store.load().await {
        Ok(saved) => saved,
        Err(err) => {
            warn!(error = %err, "saved devices unavailable");
            return None;
        }
    };
    let id = remember_device(
        &mut saved.devices,
        &config.address,
        &config.username,
        &config.password,
    );
    mark_connected(&mut saved.devices, &id, now_ms);

    if let Err(err) = store.save(&saved.devices, Some(&id)).await {
        warn!(error = %err, "failed to save device list");
    }
    Some(id)
}

pub async fn rename(store: &dyn DeviceStore, id: &str, model: &str) {
    let mut saved = match store.load().await {
        Ok(saved) => saved,
        Err(err) => {
            warn!(error = %err, "saved devices unavailable");
            return;
        }
    };
    let Some(device) = saved.devices.iter_mut().find(|device| device.id == id) else {
        return;
    };
    device.rename(model);
    // 加载会复位连接标志，这里重新标记当前设备。
    device.is_connected = true;

    if let Err(err) = store.save(&saved.devices, Some(id)).await {
        warn!(error = %err, "failed to save device list");
    }
}
