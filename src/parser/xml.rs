//! XML to tree conversion.
//!
//! Turns an XML document into a [`serde_json::Value`] tree:
//!
//! - an element with neither attributes nor children becomes its text as a string
//! - any other element becomes an object; attributes are stored under
//!   `<attribute_prefix><name>` and text content under `text_node_name`
//! - a child that occurs once is stored as a bare value, a child that
//!   repeats becomes an array in document order
//!
//! The last rule means a consumer cannot know from the schema alone whether
//! a field is a value or an array; see [`super::normalize::OneOrMany`].

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use serde_json::{Map, Value};

use crate::error::{ArxivError, Result};

/// Default key prefix marking attributes
pub const ATTRIBUTE_PREFIX: &str = "$";
/// Default key holding the text of an element that also has attributes or children
pub const TEXT_NODE_NAME: &str = "text";

/// Options controlling the tree layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlTreeOptions {
    pub attribute_prefix: String,
    pub text_node_name: String,
    /// Trim surrounding whitespace from text content
    pub trim_text: bool,
}

impl Default for XmlTreeOptions {
    fn default() -> Self {
        Self {
            attribute_prefix: ATTRIBUTE_PREFIX.to_string(),
            text_node_name: TEXT_NODE_NAME.to_string(),
            trim_text: true,
        }
    }
}

/// An element whose end tag has not been read yet
struct Frame {
    name: String,
    fields: Map<String, Value>,
    text: String,
}

impl Frame {
    fn open(start: &BytesStart<'_>, options: &XmlTreeOptions) -> Result<Self> {
        let mut fields = Map::new();
        for attr in start.attributes() {
            let attr = attr.map_err(quick_xml::Error::from)?;
            let key = format!(
                "{}{}",
                options.attribute_prefix,
                String::from_utf8_lossy(attr.key.as_ref())
            );
            let value = attr.unescape_value()?.into_owned();
            fields.insert(key, Value::String(value));
        }

        Ok(Self {
            name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
            fields,
            text: String::new(),
        })
    }

    fn close(self, options: &XmlTreeOptions) -> (String, Value) {
        let text = if options.trim_text {
            self.text.trim().to_string()
        } else {
            self.text
        };

        if self.fields.is_empty() {
            return (self.name, Value::String(text));
        }

        let mut fields = self.fields;
        if !text.is_empty() {
            fields.insert(options.text_node_name.clone(), Value::String(text));
        }
        (self.name, Value::Object(fields))
    }

    fn add_child(&mut self, name: String, value: Value) {
        match self.fields.get_mut(&name) {
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                self.fields.insert(name, value);
            }
        }
    }
}

/// Parse an XML document into a tree using the default options
pub fn parse_xml(xml: &str) -> Result<Value> {
    parse_xml_with(xml, &XmlTreeOptions::default())
}

/// Parse an XML document into a tree
///
/// The returned value is an object holding the root element under its
/// name, so an Atom feed is found at `tree["feed"]`. Fails only when the
/// document is not well-formed.
pub fn parse_xml_with(xml: &str, options: &XmlTreeOptions) -> Result<Value> {
    let mut reader = Reader::from_str(xml);

    let mut document = Frame {
        name: String::new(),
        fields: Map::new(),
        text: String::new(),
    };
    let mut stack: Vec<Frame> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(start) => stack.push(Frame::open(&start, options)?),
            Event::Empty(start) => {
                let (name, value) = Frame::open(&start, options)?.close(options);
                stack.last_mut().unwrap_or(&mut document).add_child(name, value);
            }
            Event::Text(text) => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&text.unescape()?);
                }
            }
            Event::CData(data) => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::End(_) => {
                let frame = stack
                    .pop()
                    .ok_or_else(|| ArxivError::Parse("unexpected closing tag".to_string()))?;
                let (name, value) = frame.close(options);
                stack.last_mut().unwrap_or(&mut document).add_child(name, value);
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions and doctypes carry no data
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(ArxivError::Parse(format!(
            "unexpected end of document inside <{}>",
            open.name
        )));
    }

    Ok(Value::Object(document.fields))
}
