//! droid_nav: accessibility-tree screen mapping and element navigation
//!
//! This library turns a uiautomator hierarchy dump into a queryable
//! [`ScreenModel`] and resolves declarative [`Selector`]s against it:
//! - Hierarchy parsing, bounds resolution and element classification
//! - Selector matching with index-based disambiguation
//! - Tap, text entry and key events through a [`DeviceChannel`]
//! - An adb-backed channel for real devices and emulators
//!
//! # Example
//!
//! ```no_run
//! use droid_nav::{AdbChannel, AdbLocation, NavConfig, Navigator, Selector};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> droid_nav::Result<()> {
//!     let config = NavConfig::new(AdbLocation::discover()).with_serial("emulator-5554");
//!     let navigator = Navigator::from_config(AdbChannel::new(&config), &config);
//!
//!     let (element, (x, y)) = navigator
//!         .find_and_tap(&Selector::new().with_text("sign in"))
//!         .await?;
//!     println!("Tapped {} at {},{}", element, x, y);
//!     Ok(())
//! }
//! ```

// Core modules
pub mod error;

// Configuration module
pub mod config;

// Device channel
pub mod adb;
pub mod channel;

// Core functionality
pub mod hierarchy;
pub mod navigator;

#[cfg(test)]
mod testing;

// Re-export commonly used types and functions
pub use error::{NavError, Result};

// Config re-exports
pub use config::{
    AdbLocation, AdbSource, KeyCode, NavConfig, TimingConfig, DEFAULT_REMOTE_DUMP_PATH, KEYCODES,
};

// Channel re-exports
pub use adb::{AdbChannel, AdbConnection, DeviceInfo, ScreenSize, SizeSource};
pub use channel::DeviceChannel;

// Hierarchy re-exports
pub use hierarchy::{Bounds, Element, ScreenModel, SnapshotProvider};

// Navigator re-exports
pub use navigator::{Navigator, Selector};
