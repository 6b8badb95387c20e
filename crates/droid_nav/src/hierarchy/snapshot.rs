//! Acquisition of raw hierarchy dumps from the device

use crate::channel::DeviceChannel;
use crate::error::{NavError, Result};
use tempfile::tempdir;
use tracing::debug;

/// Fetches one hierarchy dump per call: dump on the device, then pull it.
/// Never retries; any failed step is `SnapshotUnavailable`.
pub struct SnapshotProvider<'a, C: DeviceChannel + ?Sized> {
    channel: &'a C,
    remote_path: &'a str,
}

impl<'a, C: DeviceChannel + ?Sized> SnapshotProvider<'a, C> {
    pub fn new(channel: &'a C, remote_path: &'a str) -> Self {
        Self {
            channel,
            remote_path,
        }
    }

    /// Return the complete dump as text
    pub async fn acquire(&self) -> Result<String> {
        // Use a temp directory so the file doesn't exist until the pull creates it
        let temp_dir = tempdir()
            .map_err(|e| NavError::SnapshotUnavailable(format!("no local temp dir: {}", e)))?;
        let local_path = temp_dir.path().join("window_dump.xml");

        debug!("Dumping hierarchy to {}", self.remote_path);
        self.channel
            .dump_hierarchy(self.remote_path)
            .await
            .map_err(|e| NavError::SnapshotUnavailable(format!("dump failed: {}", e)))?;

        self.channel
            .pull(self.remote_path, &local_path)
            .await
            .map_err(|e| NavError::SnapshotUnavailable(format!("pull failed: {}", e)))?;

        if !local_path.exists() {
            return Err(NavError::SnapshotUnavailable(
                "dump file does not exist after pull".to_string(),
            ));
        }

        let bytes = tokio::fs::read(&local_path)
            .await
            .map_err(|e| NavError::SnapshotUnavailable(format!("cannot read dump: {}", e)))?;
        if bytes.is_empty() {
            return Err(NavError::SnapshotUnavailable(
                "dump file is empty (0 bytes)".to_string(),
            ));
        }

        debug!("Hierarchy dump size: {} bytes", bytes.len());

        // Cleanup is automatic when temp_dir goes out of scope
        String::from_utf8(bytes).map_err(|e| NavError::Parse(format!("dump is not UTF-8: {}", e)))
    }
}
