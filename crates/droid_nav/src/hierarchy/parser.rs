//! Parsing of uiautomator hierarchy dumps into pre-ordered elements

use super::bounds::Bounds;
use super::element::Element;
use crate::error::{NavError, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::{debug, warn};

/// Parse a hierarchy dump into its elements in pre-order.
///
/// Every markup element becomes an [`Element`], the root included. A parent
/// is always emitted before its children and siblings keep document order.
/// Missing attributes take their empty/false default and a bad geometry
/// string only clears that node's bounds; markup that is not well formed
/// fails the whole call.
pub fn parse(payload: &str) -> Result<Vec<Element>> {
    let mut reader = Reader::from_str(payload);
    reader.config_mut().trim_text(true);

    let mut elements = Vec::new();
    // Names of currently open tags, innermost last
    let mut open: Vec<Vec<u8>> = Vec::new();
    let mut saw_root = false;

    loop {
        let event = reader.read_event().map_err(|e| {
            NavError::Parse(format!("at byte {}: {}", reader.buffer_position(), e))
        })?;

        match event {
            Event::Start(start) => {
                check_single_root(&open, &mut saw_root)?;
                elements.push(node_to_element(&start, open.len())?);
                open.push(start.name().as_ref().to_vec());
            }
            Event::Empty(start) => {
                check_single_root(&open, &mut saw_root)?;
                elements.push(node_to_element(&start, open.len())?);
            }
            Event::End(end) => match open.pop() {
                Some(name) if name == end.name().as_ref() => {}
                Some(name) => {
                    return Err(NavError::Parse(format!(
                        "mismatched closing tag </{}>, expected </{}>",
                        String::from_utf8_lossy(end.name().as_ref()),
                        String::from_utf8_lossy(&name)
                    )));
                }
                None => {
                    return Err(NavError::Parse(format!(
                        "unexpected closing tag </{}>",
                        String::from_utf8_lossy(end.name().as_ref())
                    )));
                }
            },
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(name) = open.last() {
        return Err(NavError::Parse(format!(
            "unexpected end of document inside <{}>",
            String::from_utf8_lossy(name)
        )));
    }
    if !saw_root {
        return Err(NavError::Parse("document has no root element".to_string()));
    }

    debug!("Parsed {} elements from hierarchy dump", elements.len());
    Ok(elements)
}

fn check_single_root(open: &[Vec<u8>], saw_root: &mut bool) -> Result<()> {
    if open.is_empty() {
        if *saw_root {
            return Err(NavError::Parse(
                "document has more than one root element".to_string(),
            ));
        }
        *saw_root = true;
    }
    Ok(())
}

fn node_to_element(start: &BytesStart<'_>, depth: usize) -> Result<Element> {
    let mut element = Element {
        depth,
        ..Default::default()
    };
    let mut geometry = None;

    for attr in start.attributes() {
        let attr = attr.map_err(|e| NavError::Parse(format!("bad attribute: {}", e)))?;
        let value = attr
            .unescape_value()
            .map_err(|e| NavError::Parse(format!("bad attribute value: {}", e)))?
            .into_owned();

        match attr.key.as_ref() {
            b"class" => element.class_name = value,
            b"text" => element.text = value,
            b"resource-id" => element.resource_id = value,
            b"content-desc" => element.content_description = value,
            b"package" => element.package_name = value,
            b"clickable" => element.clickable = value == "true",
            b"enabled" => element.enabled = value == "true",
            b"focused" => element.focused = value == "true",
            b"scrollable" => element.scrollable = value == "true",
            b"bounds" => geometry = Some(value),
            _ => {}
        }
    }

    if let Some(geometry) = geometry {
        element.bounds = Bounds::resolve(&geometry);
        if element.bounds.is_none() {
            warn!(
                "Unparseable bounds {:?} on {} node, leaving it without bounds",
                geometry, element.class_name
            );
        }
    }

    Ok(element)
}
