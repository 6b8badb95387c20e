//! adb-backed device channel

use crate::channel::DeviceChannel;
use crate::config::{KeyCode, NavConfig};
use crate::error::{NavError, Result};
use async_trait::async_trait;
use serde::Serialize;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

/// Screen size assumed when `wm size` gives nothing usable
pub const FALLBACK_SCREEN_SIZE: (u32, u32) = (1080, 1920);

/// Where a [`ScreenSize`] came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeSource {
    Reported,
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScreenSize {
    pub width: u32,
    pub height: u32,
    pub source: SizeSource,
}

impl ScreenSize {
    pub fn fallback() -> Self {
        Self {
            width: FALLBACK_SCREEN_SIZE.0,
            height: FALLBACK_SCREEN_SIZE.1,
            source: SizeSource::Fallback,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == SizeSource::Fallback
    }
}

/// Parse `wm size` output. An override size wins over the physical size.
pub fn parse_wm_size(output: &str) -> Option<(u32, u32)> {
    let size_after = |prefix: &str| {
        output.lines().find_map(|line| {
            let (w, h) = line.trim().strip_prefix(prefix)?.trim().split_once('x')?;
            Some((w.trim().parse().ok()?, h.trim().parse().ok()?))
        })
    };
    size_after("Override size:").or_else(|| size_after("Physical size:"))
}

/// Runs device operations through the adb executable
#[derive(Debug, Clone)]
pub struct AdbChannel {
    adb_path: PathBuf,
    serial: Option<String>,
    timeout: Duration,
}

impl AdbChannel {
    pub fn new(config: &NavConfig) -> Self {
        Self {
            adb_path: config.adb.path.clone(),
            serial: config.serial.clone(),
            timeout: config.timing.command_timeout(),
        }
    }

    pub fn serial(&self) -> Option<&str> {
        self.serial.as_deref()
    }

    /// Build the adb command with the optional device specifier
    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.adb_path);
        if let Some(serial) = &self.serial {
            cmd.arg("-s").arg(serial);
        }
        cmd.kill_on_drop(true);
        cmd
    }

    /// Run adb with `args`, failing on timeout or a non-zero exit
    async fn run<I, S>(&self, args: I) -> Result<Output>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args: Vec<OsString> = args.into_iter().map(|a| a.as_ref().to_owned()).collect();
        let described = args
            .iter()
            .map(|a| a.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ");
        debug!("adb {} (serial: {:?})", described, self.serial);

        let mut cmd = self.command();
        cmd.args(&args);

        let output = tokio::time::timeout(self.timeout, cmd.output())
            .await
            .map_err(|_| {
                NavError::Timeout(format!("adb {} timeout after {:?}", described, self.timeout))
            })?
            .map_err(NavError::Io)?;

        if !output.status.success() {
            let stdout = String::from_utf8_lossy(&output.stdout);
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(NavError::CommandFailed(format!(
                "adb {}: {}{}",
                described,
                stdout.trim(),
                stderr.trim()
            )));
        }

        Ok(output)
    }

    async fn shell(&self, args: &[&str]) -> Result<Output> {
        self.run(std::iter::once("shell").chain(args.iter().copied()))
            .await
    }

    /// Current screen size, or an explicitly marked fallback
    pub async fn screen_size(&self) -> ScreenSize {
        match self.shell(&["wm", "size"]).await {
            Ok(output) => match parse_wm_size(&String::from_utf8_lossy(&output.stdout)) {
                Some((width, height)) => ScreenSize {
                    width,
                    height,
                    source: SizeSource::Reported,
                },
                None => {
                    warn!("Unrecognized `wm size` output, using fallback screen size");
                    ScreenSize::fallback()
                }
            },
            Err(e) => {
                warn!("Screen size lookup failed ({}), using fallback screen size", e);
                ScreenSize::fallback()
            }
        }
    }
}

#[async_trait]
impl DeviceChannel for AdbChannel {
    async fn dump_hierarchy(&self, remote_path: &str) -> Result<()> {
        let output = self.shell(&["uiautomator", "dump", remote_path]).await?;

        // uiautomator reports failures on stdout with a zero exit status
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        let combined = format!("{}{}", stdout, stderr);
        debug!("uiautomator output: {}", combined.trim());

        if combined.contains("ERROR") {
            return Err(NavError::CommandFailed(combined.trim().to_string()));
        }
        Ok(())
    }

    async fn pull(&self, remote_path: &str, local_path: &Path) -> Result<()> {
        let output = self
            .run([OsStr::new("pull"), OsStr::new(remote_path), local_path.as_os_str()])
            .await?;
        debug!(
            "adb pull output: {}",
            String::from_utf8_lossy(&output.stdout).trim()
        );
        Ok(())
    }

    async fn tap(&self, x: i32, y: i32) -> Result<()> {
        let (x, y) = (x.to_string(), y.to_string());
        self.shell(&["input", "tap", x.as_str(), y.as_str()]).await?;
        Ok(())
    }

    async fn inject_text(&self, escaped_text: &str) -> Result<()> {
        self.shell(&["input", "text", escaped_text]).await?;
        Ok(())
    }

    async fn send_key_event(&self, key: KeyCode) -> Result<()> {
        let code = key.code().to_string();
        self.shell(&["input", "keyevent", code.as_str()]).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AdbLocation, TimingConfig};

    #[test]
    fn test_parse_physical_size() {
        assert_eq!(parse_wm_size("Physical size: 1080x2400\n"), Some((1080, 2400)));
    }

    #[test]
    fn test_override_size_wins() {
        let output = "Physical size: 1440x3120\nOverride size: 1080x2340\n";
        assert_eq!(parse_wm_size(output), Some((1080, 2340)));
    }

    #[test]
    fn test_parse_unusable_size() {
        assert_eq!(parse_wm_size(""), None);
        assert_eq!(parse_wm_size("Physical size: unknown"), None);
        assert_eq!(parse_wm_size("error: no devices/emulators found"), None);
    }

    #[test]
    fn test_fallback_is_marked() {
        let size = ScreenSize::fallback();
        assert!(size.is_fallback());
        assert_eq!((size.width, size.height), FALLBACK_SCREEN_SIZE);
    }

    #[tokio::test]
    async fn test_missing_adb_is_io_error() {
        let config = NavConfig::new(AdbLocation::explicit("/nonexistent/droid-nav/adb"))
            .with_serial("emulator-5554")
            .with_timing(TimingConfig {
                command_timeout: 5.0,
                tap_delay: 0.0,
                focus_delay: 0.0,
            });
        let channel = AdbChannel::new(&config);
        assert_eq!(channel.serial(), Some("emulator-5554"));

        assert!(matches!(channel.tap(1, 1).await, Err(NavError::Io(_))));
        assert!(channel.screen_size().await.is_fallback());
    }
}
