//! The queryable result of one hierarchy snapshot

use super::classify::{button_label, classify};
use super::element::Element;
use super::parser;
use crate::error::Result;
use serde::Serialize;
use std::collections::BTreeSet;

/// Parsed screen with derived groupings. Built once per query, never mutated.
#[derive(Debug, Clone)]
pub struct ScreenModel {
    elements: Vec<Element>,
    buttons: BTreeSet<String>,
    text_fields: Vec<usize>,
    interactive: Vec<usize>,
}

/// Serializable view of a [`ScreenModel`]
#[derive(Debug, Serialize)]
pub struct ScreenDump<'a> {
    pub buttons: Vec<&'a str>,
    pub text_fields: Vec<&'a Element>,
    pub interactive: Vec<&'a Element>,
    pub all_elements: &'a [Element],
}

impl ScreenModel {
    /// Parse a raw hierarchy dump
    pub fn parse(payload: &str) -> Result<Self> {
        Ok(Self::from_elements(parser::parse(payload)?))
    }

    /// Classify pre-ordered elements and assemble the model
    pub fn from_elements(elements: Vec<Element>) -> Self {
        let mut buttons = BTreeSet::new();
        let mut text_fields = Vec::new();
        let mut interactive = Vec::new();

        for (i, element) in elements.iter().enumerate() {
            let class = classify(element);
            if let Some(label) = button_label(element) {
                buttons.insert(label.to_string());
            }
            if class.text_field {
                text_fields.push(i);
            }
            if class.interactive {
                interactive.push(i);
            }
        }

        Self {
            elements,
            buttons,
            text_fields,
            interactive,
        }
    }

    /// All elements in pre-order
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Deduplicated button labels
    pub fn buttons(&self) -> &BTreeSet<String> {
        &self.buttons
    }

    pub fn text_fields(&self) -> impl Iterator<Item = &Element> + '_ {
        self.text_fields.iter().map(|&i| &self.elements[i])
    }

    pub fn interactive(&self) -> impl Iterator<Item = &Element> + '_ {
        self.interactive.iter().map(|&i| &self.elements[i])
    }

    pub fn text_field_count(&self) -> usize {
        self.text_fields.len()
    }

    pub fn interactive_count(&self) -> usize {
        self.interactive.len()
    }

    /// First element, in pre-order, listed under `label` in [`buttons`](Self::buttons)
    pub fn element_for_label(&self, label: &str) -> Option<&Element> {
        self.elements
            .iter()
            .find(|e| button_label(e) == Some(label))
    }

    pub fn dump(&self) -> ScreenDump<'_> {
        ScreenDump {
            buttons: self.buttons.iter().map(String::as_str).collect(),
            text_fields: self.text_fields().collect(),
            interactive: self.interactive().collect(),
            all_elements: &self.elements,
        }
    }

    /// Short human-readable description of the screen
    pub fn summary(&self) -> String {
        let mut lines = vec![format!(
            "Screen: {} elements ({} interactive)",
            self.elements.len(),
            self.interactive.len()
        )];

        if !self.buttons.is_empty() {
            let shown: Vec<&str> = self.buttons.iter().take(5).map(String::as_str).collect();
            lines.push(format!("Buttons: {}", shown.join(", ")));
            if self.buttons.len() > 5 {
                lines.push(format!("  ... +{} more", self.buttons.len() - 5));
            }
        }

        if !self.text_fields.is_empty() {
            lines.push(format!("TextFields: {}", self.text_fields.len()));
            for field in self.text_fields() {
                let name = [&field.text, &field.resource_id]
                    .into_iter()
                    .find(|s| !s.is_empty())
                    .map(String::as_str)
                    .unwrap_or("Unnamed");
                lines.push(format!("  - {}", name));
            }
        }

        lines.join("\n")
    }

    /// Summary plus every interactive element with its bounds
    pub fn detailed_summary(&self) -> String {
        let mut out = self.summary();
        if self.interactive.is_empty() {
            return out;
        }
        out.push_str("\nInteractive:");
        for element in self.interactive() {
            out.push_str(&format!(
                "\n  {}{}",
                "  ".repeat(element.depth.saturating_sub(1).min(8)),
                element
            ));
            if let Some(name) = element.display_name() {
                if name != element.text {
                    out.push_str(&format!(" ({})", name));
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::bounds::Bounds;

    fn login_screen() -> ScreenModel {
        ScreenModel::parse(
            r#"<hierarchy rotation="0">
                <node class="android.widget.FrameLayout" bounds="[0,0][1080,2400]">
                  <node class="android.widget.EditText" resource-id="user" clickable="true" bounds="[0,100][1080,200]" />
                  <node class="android.widget.EditText" resource-id="pass" text="secret" bounds="[0,200][1080,300]" />
                  <node class="android.widget.Button" text="Sign In" clickable="true" bounds="[100,400][300,460]" />
                  <node class="android.widget.ScrollView" scrollable="true" bounds="[0,500][1080,2400]">
                    <node class="android.widget.TextView" text="Sign In" clickable="true" />
                    <node class="android.widget.ImageButton" content-desc="Help" />
                    <node class="android.widget.ImageButton" />
                  </node>
                </node>
              </hierarchy>"#,
        )
        .unwrap()
    }

    #[test]
    fn test_groupings() {
        let screen = login_screen();
        assert_eq!(screen.elements().len(), 9);

        let fields: Vec<&str> = screen.text_fields().map(|e| e.resource_id.as_str()).collect();
        assert_eq!(fields, vec!["user", "pass"]);

        let interactive: Vec<&str> = screen.interactive().map(|e| e.class_name.as_str()).collect();
        assert_eq!(
            interactive,
            vec![
                "android.widget.EditText",
                "android.widget.EditText",
                "android.widget.Button",
                "android.widget.ScrollView",
                "android.widget.TextView",
            ]
        );
    }

    #[test]
    fn test_button_labels_deduplicated() {
        let screen = login_screen();
        let labels: Vec<&str> = screen.buttons().iter().map(String::as_str).collect();
        // "Sign In" appears twice, the unlabelled ImageButton contributes nothing
        assert_eq!(labels, vec!["Help", "Sign In", "user"]);
    }

    #[test]
    fn test_element_for_label() {
        let screen = login_screen();
        let sign_in = screen.element_for_label("Sign In").unwrap();
        assert_eq!(sign_in.class_name, "android.widget.Button");
        assert_eq!(sign_in.bounds, Bounds::resolve("[100,400][300,460]"));
        assert!(screen.element_for_label("Cancel").is_none());
    }

    #[test]
    fn test_root_only_screen() {
        let screen = ScreenModel::parse("<hierarchy/>").unwrap();
        assert_eq!(screen.elements().len(), 1);
        assert!(screen.buttons().is_empty());
        assert_eq!(screen.interactive_count(), 0);
        assert_eq!(screen.summary(), "Screen: 1 elements (0 interactive)");
    }

    #[test]
    fn test_summary() {
        assert_eq!(
            login_screen().summary(),
            "Screen: 9 elements (5 interactive)\n\
             Buttons: Help, Sign In, user\n\
             TextFields: 2\n  - user\n  - secret"
        );
    }

    #[test]
    fn test_summary_overflow() {
        let elements = (0..8)
            .map(|i| Element::new("android.widget.Button").with_text(format!("b{}", i)))
            .collect();
        let summary = ScreenModel::from_elements(elements).summary();
        assert!(summary.contains("Buttons: b0, b1, b2, b3, b4\n  ... +3 more"));
    }

    #[test]
    fn test_dump_json() {
        let screen = login_screen();
        let value = serde_json::to_value(screen.dump()).unwrap();
        assert_eq!(value["all_elements"].as_array().unwrap().len(), 9);
        assert_eq!(value["text_fields"][1]["resource-id"], "pass");
        assert_eq!(value["interactive"][2]["bounds"]["center_x"], 200);
        assert_eq!(value["buttons"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_detailed_summary_lists_interactive() {
        let detail = login_screen().detailed_summary();
        assert!(detail.contains("Interactive:"));
        assert!(detail.contains("android.widget.Button 'Sign In' at [100,400][300,460]"));
        assert!(detail.contains("android.widget.EditText '' at [0,100][1080,200] (user)"));
    }
}
