//! Timing configuration for device operations

use std::env;
use std::time::Duration;

fn env_secs(name: &str, default: f64) -> f64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .filter(|v: &f64| v.is_finite() && *v >= 0.0)
        .unwrap_or(default)
}

/// Timeouts and delays applied by the adb channel and the navigator
#[derive(Debug, Clone, PartialEq)]
pub struct TimingConfig {
    /// Upper bound for any single adb invocation, in seconds
    pub command_timeout: f64,
    /// Pause after a tap before returning, in seconds
    pub tap_delay: f64,
    /// Pause between tapping a field and typing into it, in seconds
    pub focus_delay: f64,
}

impl TimingConfig {
    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs_f64(self.command_timeout)
    }

    pub fn tap_delay(&self) -> Duration {
        Duration::from_secs_f64(self.tap_delay)
    }

    pub fn focus_delay(&self) -> Duration {
        Duration::from_secs_f64(self.focus_delay)
    }

    /// All delays zeroed; the timeout is kept
    pub fn without_delays(mut self) -> Self {
        self.tap_delay = 0.0;
        self.focus_delay = 0.0;
        self
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            command_timeout: env_secs("DROID_NAV_COMMAND_TIMEOUT", 10.0),
            tap_delay: env_secs("DROID_NAV_TAP_DELAY", 0.0),
            focus_delay: env_secs("DROID_NAV_FOCUS_DELAY", 0.5),
        }
    }
}
