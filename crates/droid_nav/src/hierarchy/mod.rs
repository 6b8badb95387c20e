//! Screen hierarchy mapping
//!
//! This module provides:
//! - `bounds`: Geometry string resolution
//! - `element`: The per-node record
//! - `parser`: Pre-order parsing of hierarchy dumps
//! - `classify`: Button / text field / interactive heuristics
//! - `screen`: The assembled, queryable screen model
//! - `snapshot`: Dump acquisition through a device channel

mod bounds;
mod classify;
mod element;
mod parser;
mod screen;
mod snapshot;

pub use bounds::Bounds;
pub use classify::{button_label, classify, is_button, is_interactive, is_text_field, Classification};
pub use element::Element;
pub use parser::parse;
pub use screen::{ScreenDump, ScreenModel};
pub use snapshot::SnapshotProvider;
