//! ADB (Android Debug Bridge) module for Android device control
//!
//! This module provides:
//! - `connection`: Device listing and serial selection
//! - `device`: The adb-backed [`DeviceChannel`](crate::channel::DeviceChannel) and screen size lookup

mod connection;
mod device;

pub use connection::{parse_device_list, select_serial, AdbConnection, ConnectionType, DeviceInfo};
pub use device::{parse_wm_size, AdbChannel, ScreenSize, SizeSource, FALLBACK_SCREEN_SIZE};
