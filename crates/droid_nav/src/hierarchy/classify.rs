//! Button / text field / interactive classification

use super::element::Element;

/// Category membership of one element. Categories overlap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Classification {
    pub button: bool,
    pub text_field: bool,
    pub interactive: bool,
}

pub fn classify(element: &Element) -> Classification {
    let text_field = is_text_field(element);
    Classification {
        button: is_button(element),
        text_field,
        interactive: element.clickable || element.scrollable || text_field,
    }
}

pub fn is_button(element: &Element) -> bool {
    element.class_name.ends_with("Button") || element.clickable
}

pub fn is_text_field(element: &Element) -> bool {
    element.class_name.ends_with("EditText")
}

pub fn is_interactive(element: &Element) -> bool {
    classify(element).interactive
}

/// Label a button is listed under: text, then content description, then
/// resource id. Non-buttons and buttons with all three empty have none.
pub fn button_label(element: &Element) -> Option<&str> {
    if !is_button(element) {
        return None;
    }
    element.display_name()
}
