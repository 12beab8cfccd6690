//! # NetPing Storage 模块
//!
//! 已保存设备列表的存储抽象。
//!
//! - [`traits`]：[`DeviceStore`] 异步接口
//! - [`models`]：[`SavedDevices`] 与列表辅助函数
//! - [`in_memory`]：内存实现（测试、一次性运行）
//! - [`json_file`]：JSON 文件实现
//!
//! 加载时所有设备的 `is_connected` 一律复位为 `false`，连接状态只在一次运行内有效。

pub mod error;
pub mod in_memory;
pub mod json_file;
pub mod models;
pub mod traits;

pub use error::StorageError;
pub use in_memory::InMemoryDeviceStore;
pub use json_file::JsonFileDeviceStore;
pub use models::{SavedDevices, mark_connected, remember_device};
pub use traits::DeviceStore;
