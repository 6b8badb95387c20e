//! Element navigation
//!
//! Resolves [`Selector`]s against a freshly acquired [`ScreenModel`] and
//! drives taps, text entry and key events through a [`DeviceChannel`].

mod escape;
mod matcher;
mod selector;

pub use escape::{escape_input_text, shell_quote};
pub use matcher::{candidates, find};
pub use selector::Selector;

use crate::channel::DeviceChannel;
use crate::config::{KeyCode, NavConfig, TimingConfig, DEFAULT_REMOTE_DUMP_PATH};
use crate::error::{NavError, Result};
use crate::hierarchy::{Element, ScreenModel, SnapshotProvider};
use tracing::info;

/// Query pipeline: acquire, parse, classify, match, act. Nothing is cached
/// between calls; every query takes a fresh snapshot.
pub struct Navigator<C: DeviceChannel> {
    channel: C,
    remote_dump_path: String,
    timing: TimingConfig,
}

impl<C: DeviceChannel> Navigator<C> {
    pub fn new(channel: C) -> Self {
        Self {
            channel,
            remote_dump_path: DEFAULT_REMOTE_DUMP_PATH.to_string(),
            timing: TimingConfig::default(),
        }
    }

    pub fn from_config(channel: C, config: &NavConfig) -> Self {
        Self::new(channel)
            .with_remote_dump_path(config.remote_dump_path.clone())
            .with_timing(config.timing.clone())
    }

    pub fn with_remote_dump_path(mut self, path: impl Into<String>) -> Self {
        self.remote_dump_path = path.into();
        self
    }

    pub fn with_timing(mut self, timing: TimingConfig) -> Self {
        self.timing = timing;
        self
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    /// Raw hierarchy dump from the device
    pub async fn snapshot(&self) -> Result<String> {
        SnapshotProvider::new(&self.channel, &self.remote_dump_path)
            .acquire()
            .await
    }

    /// Acquire and parse the current screen
    pub async fn screen(&self) -> Result<ScreenModel> {
        let payload = self.snapshot().await?;
        ScreenModel::parse(&payload)
    }

    /// Resolve `selector` against the current screen
    pub async fn find(&self, selector: &Selector) -> Result<Element> {
        let screen = self.screen().await?;
        find(&screen, selector).cloned()
    }

    /// Tap the center of `element`, returning the coordinates used
    pub async fn tap_element(&self, element: &Element) -> Result<(i32, i32)> {
        let bounds = element
            .bounds
            .ok_or_else(|| NavError::BoundsMissing(element.to_string()))?;
        let (x, y) = bounds.center();
        self.tap_at(x, y).await?;
        Ok((x, y))
    }

    /// Resolve `selector` and tap the result
    pub async fn find_and_tap(&self, selector: &Selector) -> Result<(Element, (i32, i32))> {
        let element = self.find(selector).await?;
        let point = self.tap_element(&element).await?;
        Ok((element, point))
    }

    /// Tap at raw coordinates; no matching involved
    pub async fn tap_at(&self, x: i32, y: i32) -> Result<()> {
        self.channel
            .tap(x, y)
            .await
            .map_err(|e| NavError::ActuatorFailure(format!("tap at {},{}: {}", x, y, e)))?;
        info!("Tapped at {},{}", x, y);

        let delay = self.timing.tap_delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        Ok(())
    }

    /// Type into whatever currently has focus. Returns the escaped form sent.
    pub async fn enter_text(&self, text: &str) -> Result<String> {
        let escaped = escape_input_text(text);
        self.channel
            .inject_text(&escaped)
            .await
            .map_err(|e| NavError::ActuatorFailure(format!("text entry: {}", e)))?;
        info!("Entered {} characters", text.chars().count());
        Ok(escaped)
    }

    pub async fn press_key(&self, key: KeyCode) -> Result<()> {
        self.channel
            .send_key_event(key)
            .await
            .map_err(|e| NavError::ActuatorFailure(format!("key event {}: {}", key, e)))?;
        info!("Pressed key {}", key);
        Ok(())
    }

    /// Pause long enough for a tapped field to take focus
    pub async fn wait_for_focus(&self) {
        let delay = self.timing.focus_delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}
