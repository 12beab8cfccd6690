use domain::SavedDevice;
use netping_storage::{DeviceStore, InMemoryDeviceStore, mark_connected, remember_device};

#[tokio::test]
async fn empty_store_loads_nothing() {
    let store = InMemoryDeviceStore::new();
    let saved = store.load().await.expect("load");
    assert!(saved.devices.is_empty());
    assert!(saved.current_id.is_none());
    assert!(saved.current().is_none());
}

#[tokio::test]
async fn load_resets_connection_flags() {
    let store = InMemoryDeviceStore::new();
    let mut devices = vec![
        SavedDevice::new("10.0.0.5", "visor", "ping"),
        SavedDevice::new("10.0.0.6", "visor", "ping"),
    ];
    let id = devices[1].id.clone();
    assert!(mark_connected(&mut devices, &id, 1_700_000_000_000));
    store.save(&devices, Some(&id)).await.expect("save");

    let saved = store.load().await.expect("load");
    assert_eq!(saved.devices.len(), 2);
    assert!(saved.devices.iter().all(|device| !device.is_connected));
    let current = saved.current().expect("current");
    assert_eq!(current.ip_address, "10.0.0.6");
    assert_eq!(current.last_connected, 1_700_000_000_000);
}

#[test]
fn mark_connected_flags_exactly_one_device() {
    let mut devices = vec![
        SavedDevice::new("10.0.0.5", "visor", "ping"),
        SavedDevice::new("10.0.0.6", "visor", "ping"),
    ];
    let first = devices[0].id.clone();
    let second = devices[1].id.clone();

    assert!(mark_connected(&mut devices, &first, 10));
    assert!(mark_connected(&mut devices, &second, 20));
    assert!(!devices[0].is_connected);
    assert!(devices[1].is_connected);
    assert_eq!(devices[0].last_connected, 10);
    assert_eq!(devices[1].last_connected, 20);

    assert!(!mark_connected(&mut devices, "missing", 30));
    assert!(devices[1].is_connected);
}

#[test]
fn remember_device_reuses_entry_by_address() {
    let mut devices = Vec::new();
    let id = remember_device(&mut devices, "10.0.0.5", "visor", "ping");
    let again = remember_device(&mut devices, "10.0.0.5", "admin", "secret");

    assert_eq!(id, again);
    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].username, "admin");
    assert_eq!(devices[0].name, "NetPing (10.0.0.5)");

    remember_device(&mut devices, "10.0.0.6", "visor", "ping");
    assert_eq!(devices.len(), 2);
}
