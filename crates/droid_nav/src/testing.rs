//! Recording in-memory device channel for tests

use crate::channel::DeviceChannel;
use crate::config::KeyCode;
use crate::error::{NavError, Result};
use async_trait::async_trait;
use std::path::Path;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Dump(String),
    Pull(String),
    Tap(i32, i32),
    Text(String),
    Key(u32),
}

/// Serves a fixed hierarchy payload and records every call
#[derive(Debug, Default)]
pub struct FakeChannel {
    /// Written by `pull`; `None` leaves no file behind
    pub payload: Option<String>,
    pub fail_dump: bool,
    pub fail_pull: bool,
    pub fail_input: bool,
    pub calls: Mutex<Vec<Call>>,
}

impl FakeChannel {
    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            payload: Some(payload.into()),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn input_result(&self) -> Result<()> {
        if self.fail_input {
            Err(NavError::CommandFailed("input rejected".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl DeviceChannel for FakeChannel {
    async fn dump_hierarchy(&self, remote_path: &str) -> Result<()> {
        self.record(Call::Dump(remote_path.to_string()));
        if self.fail_dump {
            return Err(NavError::CommandFailed("ERROR: could not get idle state.".to_string()));
        }
        Ok(())
    }

    async fn pull(&self, remote_path: &str, local_path: &Path) -> Result<()> {
        self.record(Call::Pull(remote_path.to_string()));
        if self.fail_pull {
            return Err(NavError::Timeout("pull timed out".to_string()));
        }
        if let Some(payload) = &self.payload {
            std::fs::write(local_path, payload)?;
        }
        Ok(())
    }

    async fn tap(&self, x: i32, y: i32) -> Result<()> {
        self.record(Call::Tap(x, y));
        self.input_result()
    }

    async fn inject_text(&self, escaped_text: &str) -> Result<()> {
        self.record(Call::Text(escaped_text.to_string()));
        self.input_result()
    }

    async fn send_key_event(&self, key: KeyCode) -> Result<()> {
        self.record(Call::Key(key.code()));
        self.input_result()
    }
}
