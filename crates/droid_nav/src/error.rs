//! Error types for screen mapping and navigation

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NavError {
    #[error("Snapshot unavailable: {0}")]
    SnapshotUnavailable(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Element has no bounds: {0}")]
    BoundsMissing(String),

    #[error("Element not found: {0}")]
    NotFound(String),

    #[error("Actuator failure: {0}")]
    ActuatorFailure(String),

    #[error("Command execution failed: {0}")]
    CommandFailed(String),

    #[error("Command timeout: {0}")]
    Timeout(String),

    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    #[error("Unknown key: {0}")]
    UnknownKey(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, NavError>;
