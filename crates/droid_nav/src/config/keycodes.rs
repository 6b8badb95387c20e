//! Named Android key events

use crate::error::{NavError, Result};
use phf::phf_map;
use std::fmt;

/// Key names accepted in place of raw key codes
pub static KEYCODES: phf::Map<&'static str, u32> = phf_map! {
    "home" => 3,
    "back" => 4,
    "call" => 5,
    "endcall" => 6,
    "volume_up" => 24,
    "volume_down" => 25,
    "power" => 26,
    "camera" => 27,
    "tab" => 61,
    "enter" => 66,
    "delete" => 67,
    "menu" => 82,
    "search" => 84,
};

/// An Android `KEYCODE_*` value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyCode(pub u32);

impl KeyCode {
    pub const HOME: KeyCode = KeyCode(3);
    pub const BACK: KeyCode = KeyCode(4);
    pub const ENTER: KeyCode = KeyCode(66);

    /// Accepts a key name (case-insensitive) or a numeric code
    pub fn parse(key: &str) -> Result<Self> {
        let key = key.trim();
        if let Some(code) = KEYCODES.get(key.to_lowercase().as_str()) {
            return Ok(KeyCode(*code));
        }
        key.parse::<u32>()
            .map(KeyCode)
            .map_err(|_| NavError::UnknownKey(key.to_string()))
    }

    pub fn code(self) -> u32 {
        self.0
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
