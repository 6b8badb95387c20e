//! Declarative element selectors

use crate::hierarchy::Element;
use serde::Serialize;
use std::fmt;

/// Criteria for picking one element. Unset criteria match everything; set
/// ones must all hold. `index` picks among the matches in pre-order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Selector {
    /// Case-insensitive substring of text or content description
    pub text: Option<String>,
    /// Case-sensitive substring of the resource id
    pub resource_id: Option<String>,
    /// Case-sensitive substring of the class name
    pub class_name: Option<String>,
    /// Zero-based position among the matches
    pub index: usize,
}

impl Selector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_resource_id(mut self, id: impl Into<String>) -> Self {
        self.resource_id = Some(id.into());
        self
    }

    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = index;
        self
    }

    /// True when no criterion is set
    pub fn is_wildcard(&self) -> bool {
        self.text.is_none() && self.resource_id.is_none() && self.class_name.is_none()
    }

    pub fn matches(&self, element: &Element) -> bool {
        if let Some(text) = &self.text {
            let needle = text.to_lowercase();
            if !element.text.to_lowercase().contains(&needle)
                && !element.content_description.to_lowercase().contains(&needle)
            {
                return false;
            }
        }

        if let Some(id) = &self.resource_id {
            if !element.resource_id.contains(id.as_str()) {
                return false;
            }
        }

        if let Some(class_name) = &self.class_name {
            if !element.class_name.contains(class_name.as_str()) {
                return false;
            }
        }

        true
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(text) = &self.text {
            parts.push(format!("text ~ {:?}", text));
        }
        if let Some(id) = &self.resource_id {
            parts.push(format!("id contains {:?}", id));
        }
        if let Some(class_name) = &self.class_name {
            parts.push(format!("class contains {:?}", class_name));
        }
        if parts.is_empty() {
            parts.push("any element".to_string());
        }
        write!(f, "{} [index {}]", parts.join(", "), self.index)
    }
}
