//! Selector resolution against a screen model

use super::selector::Selector;
use crate::error::{NavError, Result};
use crate::hierarchy::{Element, ScreenModel};

/// Every element the selector accepts, in pre-order. `index` is ignored.
pub fn candidates<'a>(screen: &'a ScreenModel, selector: &Selector) -> Vec<&'a Element> {
    screen
        .elements()
        .iter()
        .filter(|e| selector.matches(e))
        .collect()
}

/// The candidate at `selector.index`, or `NotFound`
pub fn find<'a>(screen: &'a ScreenModel, selector: &Selector) -> Result<&'a Element> {
    let matches = candidates(screen, selector);
    let count = matches.len();
    matches.into_iter().nth(selector.index).ok_or_else(|| {
        NavError::NotFound(format!("{} ({} candidates)", selector, count))
    })
}
