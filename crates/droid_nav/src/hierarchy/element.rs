//! One node of the accessibility tree

use super::bounds::Bounds;
use serde::Serialize;
use std::fmt;

/// A widget captured in a hierarchy snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Element {
    #[serde(rename = "class")]
    pub class_name: String,
    pub text: String,
    #[serde(rename = "resource-id")]
    pub resource_id: String,
    #[serde(rename = "content-desc")]
    pub content_description: String,
    #[serde(rename = "package")]
    pub package_name: String,
    pub clickable: bool,
    pub enabled: bool,
    pub focused: bool,
    pub scrollable: bool,
    /// `None` when the geometry attribute was missing or unparseable
    pub bounds: Option<Bounds>,
    /// Distance from the root; the root itself is 0
    #[serde(skip)]
    pub depth: usize,
}

impl Element {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            ..Default::default()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_resource_id(mut self, id: impl Into<String>) -> Self {
        self.resource_id = id.into();
        self
    }

    pub fn with_content_description(mut self, desc: impl Into<String>) -> Self {
        self.content_description = desc.into();
        self
    }

    pub fn with_clickable(mut self, clickable: bool) -> Self {
        self.clickable = clickable;
        self
    }

    pub fn with_scrollable(mut self, scrollable: bool) -> Self {
        self.scrollable = scrollable;
        self
    }

    pub fn with_bounds(mut self, bounds: Option<Bounds>) -> Self {
        self.bounds = bounds;
        self
    }

    /// First non-empty of text, content description and resource id
    pub fn display_name(&self) -> Option<&str> {
        [&self.text, &self.content_description, &self.resource_id]
            .into_iter()
            .find(|s| !s.is_empty())
            .map(String::as_str)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}' at ", self.class_name, self.text)?;
        match &self.bounds {
            Some(bounds) => write!(f, "{}", bounds),
            None => write!(f, "<no bounds>"),
        }
    }
}
