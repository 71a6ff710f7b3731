//
//  cpanel-publicapi
//  response/xml.rs
//

//! # XML to Structured Value Conversion
//!
//! Event-driven conversion of an XML response body into the same
//! [`Value`](serde_json::Value) shape the JSON backends produce, so the
//! envelope unwrapping downstream is encoding-agnostic.
//!
//! Conversion rules, matching how the remote panel's XML bodies map onto
//! its hash representation:
//! - the root element is dropped and its content becomes the result;
//! - an element with child elements becomes an object;
//! - repeated sibling elements collapse into an array under one key;
//! - a leaf element becomes its text content as a string;
//! - attributes are ignored (the panels put everything in elements).

use quick_xml::events::Event;
use quick_xml::Reader;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Parses an XML document into a structured value.
///
/// # Errors
///
/// [`Error::Decode`] on malformed XML (mismatched tags, bad escapes) or
/// when the document has no root element.
pub(crate) fn to_value(body: &str) -> Result<Value> {
    let mut reader = Reader::from_str(body);
    reader.config_mut().trim_text(true);

    // One frame per open element: (name, child map, accumulated text).
    let mut stack: Vec<(String, Map<String, Value>, String)> = Vec::new();
    let mut root: Option<Value> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Err(e) => return Err(Error::Decode(format!("XML parse error: {}", e))),
            Ok(Event::Eof) => break,
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.name().into_inner()).into_owned();
                stack.push((name, Map::new(), String::new()));
            }
            Ok(Event::Empty(e)) => {
                let name = String::from_utf8_lossy(e.name().into_inner()).into_owned();
                match stack.last_mut() {
                    Some((_, parent, _)) => insert(parent, name, Value::String(String::new())),
                    None => root = Some(Value::String(String::new())),
                }
            }
            Ok(Event::Text(t)) => {
                let text = t
                    .unescape()
                    .map_err(|e| Error::Decode(format!("XML escape error: {}", e)))?;
                if let Some((_, _, accumulated)) = stack.last_mut() {
                    accumulated.push_str(&text);
                }
            }
            Ok(Event::CData(t)) => {
                if let Some((_, _, accumulated)) = stack.last_mut() {
                    accumulated.push_str(&String::from_utf8_lossy(&t.into_inner()));
                }
            }
            Ok(Event::End(_)) => {
                let Some((name, children, text)) = stack.pop() else {
                    return Err(Error::Decode("unexpected closing tag".to_string()));
                };
                let value = if children.is_empty() {
                    Value::String(text)
                } else {
                    Value::Object(children)
                };
                match stack.last_mut() {
                    Some((_, parent, _)) => insert(parent, name, value),
                    // Root wrapper dropped; its content is the result.
                    None => root = Some(value),
                }
            }
            Ok(_) => {}
        }
        buf.clear();
    }

    root.ok_or_else(|| Error::Decode("no XML root element".to_string()))
}

/// Inserts a child value, collapsing repeated keys into an array.
fn insert(map: &mut Map<String, Value>, key: String, value: Value) {
    match map.get_mut(&key) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            map.insert(key, value);
        }
    }
}
