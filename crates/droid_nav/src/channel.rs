//! The device command channel the core drives

use crate::config::KeyCode;
use crate::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// Primitive device operations. Each call blocks until the device answers;
/// timeouts and cancellation belong to the implementation.
#[async_trait]
pub trait DeviceChannel: Send + Sync {
    /// Write an accessibility hierarchy dump to `remote_path` on the device
    async fn dump_hierarchy(&self, remote_path: &str) -> Result<()>;

    /// Copy `remote_path` from the device to `local_path`
    async fn pull(&self, remote_path: &str, local_path: &Path) -> Result<()>;

    /// Tap at screen coordinates
    async fn tap(&self, x: i32, y: i32) -> Result<()>;

    /// Type already-escaped text into the focused field
    async fn inject_text(&self, escaped_text: &str) -> Result<()>;

    /// Send a single key event
    async fn send_key_event(&self, key: KeyCode) -> Result<()>;
}
