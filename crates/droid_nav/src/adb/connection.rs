//! Device discovery and serial selection

use crate::config::AdbLocation;
use crate::error::{NavError, Result};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// How a device is attached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConnectionType {
    Usb,
    Emulator,
    Remote,
}

/// One line of `adb devices -l`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceInfo {
    pub serial: String,
    pub state: String,
    pub connection_type: ConnectionType,
    pub model: Option<String>,
}

impl DeviceInfo {
    /// Online and authorized
    pub fn is_ready(&self) -> bool {
        self.state == "device"
    }
}

/// Parse `adb devices [-l]` output
pub fn parse_device_list(output: &str) -> Vec<DeviceInfo> {
    let mut devices = Vec::new();

    // Daemon startup chatter may precede the header
    let mut lines = output
        .lines()
        .skip_while(|line| !line.starts_with("List of devices"));
    lines.next();

    for line in lines {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 2 || line.starts_with('*') {
            continue;
        }

        let serial = parts[0].to_string();
        let connection_type = if serial.starts_with("emulator-") {
            ConnectionType::Emulator
        } else if serial.contains(':') {
            ConnectionType::Remote
        } else {
            ConnectionType::Usb
        };

        let model = parts[2..]
            .iter()
            .find_map(|part| part.strip_prefix("model:"))
            .map(str::to_string);

        devices.push(DeviceInfo {
            serial,
            state: parts[1].to_string(),
            connection_type,
            model,
        });
    }

    devices
}

/// Pick the device to talk to from the ready ones.
///
/// An explicit serial must be ready. Without one, exactly one device must be.
pub fn select_serial(devices: &[DeviceInfo], requested: Option<&str>) -> Result<String> {
    let ready: Vec<&str> = devices
        .iter()
        .filter(|d| d.is_ready())
        .map(|d| d.serial.as_str())
        .collect();

    if let Some(serial) = requested {
        return if ready.contains(&serial) {
            Ok(serial.to_string())
        } else {
            Err(NavError::DeviceNotFound(format!(
                "device '{}' not found or not connected",
                serial
            )))
        };
    }

    match ready.as_slice() {
        [] => Err(NavError::DeviceNotFound(
            "no Android devices connected or emulators running".to_string(),
        )),
        [only] => Ok(only.to_string()),
        many => Err(NavError::DeviceNotFound(format!(
            "multiple devices connected: {}; specify one with --serial",
            many.join(", ")
        ))),
    }
}

/// Lists attached devices through the adb server
pub struct AdbConnection {
    adb_path: PathBuf,
    timeout: Duration,
}

impl AdbConnection {
    pub fn new(adb: &AdbLocation, timeout: Duration) -> Self {
        Self {
            adb_path: adb.path.clone(),
            timeout,
        }
    }

    /// List all attached devices, ready or not
    pub async fn list_devices(&self) -> Result<Vec<DeviceInfo>> {
        let output = tokio::time::timeout(
            self.timeout,
            Command::new(&self.adb_path)
                .arg("devices")
                .arg("-l")
                .kill_on_drop(true)
                .output(),
        )
        .await
        .map_err(|_| NavError::Timeout(format!("adb devices timeout after {:?}", self.timeout)))?
        .map_err(NavError::Io)?;

        if !output.status.success() {
            return Err(NavError::CommandFailed(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        let devices = parse_device_list(&String::from_utf8_lossy(&output.stdout));
        debug!("Found {} attached devices", devices.len());
        Ok(devices)
    }

    /// Resolve the serial to use, see [`select_serial`]
    pub async fn resolve_serial(&self, requested: Option<&str>) -> Result<String> {
        let devices = self.list_devices().await?;
        select_serial(&devices, requested)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEVICES: &str = "List of devices attached\n\
        emulator-5554          device product:sdk_gphone64_x86_64 model:sdk_gphone64_x86_64 device:emu64xa transport_id:1\n\
        R58M123ABC             unauthorized usb:1-1 transport_id:2\n\
        192.168.1.20:5555      device product:walleye model:Pixel_2 device:walleye transport_id:3\n\
        \n";

    #[test]
    fn test_parse_device_list() {
        let devices = parse_device_list(DEVICES);
        assert_eq!(devices.len(), 3);

        assert_eq!(devices[0].serial, "emulator-5554");
        assert_eq!(devices[0].connection_type, ConnectionType::Emulator);
        assert_eq!(devices[0].model.as_deref(), Some("sdk_gphone64_x86_64"));

        assert_eq!(devices[1].state, "unauthorized");
        assert_eq!(devices[1].connection_type, ConnectionType::Usb);
        assert!(!devices[1].is_ready());

        assert_eq!(devices[2].connection_type, ConnectionType::Remote);
        assert_eq!(devices[2].model.as_deref(), Some("Pixel_2"));
    }

    #[test]
    fn test_parse_skips_daemon_chatter() {
        let output = "* daemon not running; starting now at tcp:5037\n\
                      * daemon started successfully\n\
                      List of devices attached\n\
                      emulator-5554\tdevice\n";
        let devices = parse_device_list(output);
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].serial, "emulator-5554");
    }

    #[test]
    fn test_select_single_device() {
        let devices = parse_device_list("List of devices attached\nemulator-5554\tdevice\nabc\toffline\n");
        assert_eq!(select_serial(&devices, None).unwrap(), "emulator-5554");
    }

    #[test]
    fn test_select_requested_device() {
        let devices = parse_device_list(DEVICES);
        assert_eq!(
            select_serial(&devices, Some("192.168.1.20:5555")).unwrap(),
            "192.168.1.20:5555"
        );
        assert!(matches!(
            select_serial(&devices, Some("R58M123ABC")),
            Err(NavError::DeviceNotFound(_))
        ));
    }

    #[test]
    fn test_select_ambiguous() {
        let devices = parse_device_list(DEVICES);
        match select_serial(&devices, None) {
            Err(NavError::DeviceNotFound(msg)) => {
                assert!(msg.contains("emulator-5554, 192.168.1.20:5555"))
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_select_none() {
        assert!(matches!(
            select_serial(&[], None),
            Err(NavError::DeviceNotFound(_))
        ));
    }
}
