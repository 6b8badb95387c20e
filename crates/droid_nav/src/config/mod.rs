//! Configuration module for droid_nav
//!
//! This module contains:
//! - `timing`: Timeouts and delays for device operations
//! - `adb_path`: Discovery of the adb executable
//! - `keycodes`: Named Android key events

mod adb_path;
mod keycodes;
mod timing;

pub use adb_path::{AdbLocation, AdbSource};
pub use keycodes::{KeyCode, KEYCODES};
pub use timing::TimingConfig;

/// Default on-device location for the hierarchy dump
pub const DEFAULT_REMOTE_DUMP_PATH: &str = "/sdcard/window_dump.xml";

/// Everything the adb channel needs, resolved once at startup
#[derive(Debug, Clone)]
pub struct NavConfig {
    pub adb: AdbLocation,
    pub serial: Option<String>,
    pub remote_dump_path: String,
    pub timing: TimingConfig,
}

impl NavConfig {
    pub fn new(adb: AdbLocation) -> Self {
        Self {
            adb,
            serial: None,
            remote_dump_path: DEFAULT_REMOTE_DUMP_PATH.to_string(),
            timing: TimingConfig::default(),
        }
    }

    pub fn with_serial(mut self, serial: impl Into<String>) -> Self {
        self.serial = Some(serial.into());
        self
    }

    pub fn with_remote_dump_path(mut self, path: impl Into<String>) -> Self {
        self.remote_dump_path = path.into();
        self
    }

    pub fn with_timing(mut self, timing: TimingConfig) -> Self {
        self.timing = timing;
        self
    }
}
