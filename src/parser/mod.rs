//! Response parsing: XML text to tree, tree to [`crate::models::ArxivEntry`].

pub mod normalize;
pub mod xml;

pub use normalize::{normalize_entry, normalize_feed, normalize_search_feed, OneOrMany};
pub use xml::{parse_xml, parse_xml_with, XmlTreeOptions};

use crate::error::Result;
use crate::models::{ArxivEntry, SearchFeed};

/// Parse an Atom response body into entries
pub fn parse_feed(xml: &str) -> Result<Vec<ArxivEntry>> {
    Ok(normalize_feed(&parse_xml(xml)?))
}

/// Parse an Atom response body into entries and paging metadata
pub fn parse_search_feed(xml: &str) -> Result<SearchFeed> {
    Ok(normalize_search_feed(&parse_xml(xml)?))
}
