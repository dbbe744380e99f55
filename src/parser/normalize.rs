//! Conversion of a parsed Atom feed tree into [`ArxivEntry`] records.
//!
//! The tree produced by [`super::xml`] collapses a child that occurs once
//! into a bare value, so every repeatable element (`entry`, `author`,
//! `link`, `category`) may arrive either as an object or as an array.
//! The raw types below read those fields through [`OneOrMany`], one field
//! at a time, and read scalar fields through [`Text`]. Neither fails: a
//! missing or oddly shaped field becomes an empty value.

use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

use super::xml::TEXT_NODE_NAME;
use crate::models::{ArxivAuthor, ArxivCategory, ArxivEntry, ArxivLink, SearchFeed};

/// A field that holds either a single value or a list of them
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        OneOrMany::Many(Vec::new())
    }
}

impl<T> OneOrMany<T> {
    /// Coerce into a list; a single value becomes a one-element list
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(item) => vec![item],
            OneOrMany::Many(items) => items,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            OneOrMany::One(_) => 1,
            OneOrMany::Many(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> From<OneOrMany<T>> for Vec<T> {
    fn from(value: OneOrMany<T>) -> Self {
        value.into_vec()
    }
}

/// Deserialize `value` as `T`, falling back to `T::default()` on a shape mismatch
fn lenient<T: DeserializeOwned + Default>(value: Value) -> T {
    serde_json::from_value(value).unwrap_or_default()
}

impl<'de, T: DeserializeOwned + Default> Deserialize<'de> for OneOrMany<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Null => OneOrMany::Many(Vec::new()),
            Value::Array(items) => OneOrMany::Many(items.into_iter().map(lenient).collect()),
            item => OneOrMany::One(lenient(item)),
        })
    }
}

/// Text content of an element
///
/// Accepts a bare string, a number, or an element object carrying its
/// text under the text node key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Text(pub String);

impl Text {
    fn of(value: &Value) -> String {
        match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Object(fields) => fields.get(TEXT_NODE_NAME).map(Text::of).unwrap_or_default(),
            // A scalar element that repeats: the first occurrence wins
            Value::Array(items) => items.first().map(Text::of).unwrap_or_default(),
            Value::Null => String::new(),
        }
    }
}

impl<'de> Deserialize<'de> for Text {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Text(Text::of(&value)))
    }
}

fn text(field: Option<Text>) -> String {
    field.map(|t| t.0).unwrap_or_default()
}

fn non_empty(field: Option<Text>) -> Option<String> {
    field.map(|t| t.0.trim().to_string()).filter(|s| !s.is_empty())
}

/// `author` element
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawAuthor {
    pub name: Option<Text>,
    #[serde(rename = "arxiv:affiliation")]
    pub affiliation: OneOrMany<Text>,
}

/// `link` element
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawLink {
    #[serde(rename = "$href")]
    pub href: Option<Text>,
    #[serde(rename = "$rel")]
    pub rel: Option<Text>,
    #[serde(rename = "$type")]
    pub link_type: Option<Text>,
    #[serde(rename = "$title")]
    pub title: Option<Text>,
}

/// `category` or `arxiv:primary_category` element
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawCategory {
    #[serde(rename = "$term")]
    pub term: Option<Text>,
    #[serde(rename = "$scheme")]
    pub scheme: Option<Text>,
}

/// `entry` element as the tree presents it
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawEntry {
    pub id: Option<Text>,
    pub title: Option<Text>,
    pub summary: Option<Text>,
    pub published: Option<Text>,
    pub updated: Option<Text>,
    pub author: OneOrMany<RawAuthor>,
    pub link: OneOrMany<RawLink>,
    pub category: OneOrMany<RawCategory>,
    #[serde(rename = "arxiv:primary_category")]
    pub primary_category: OneOrMany<RawCategory>,
    #[serde(rename = "arxiv:comment")]
    pub comment: Option<Text>,
    #[serde(rename = "arxiv:journal_ref")]
    pub journal_ref: Option<Text>,
    #[serde(rename = "arxiv:doi")]
    pub doi: Option<Text>,
}

/// `feed` element as the tree presents it
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawFeed {
    pub entry: OneOrMany<RawEntry>,
    #[serde(rename = "opensearch:totalResults")]
    pub total_results: Option<Text>,
    #[serde(rename = "opensearch:startIndex")]
    pub start_index: Option<Text>,
    #[serde(rename = "opensearch:itemsPerPage")]
    pub items_per_page: Option<Text>,
}

impl RawFeed {
    /// Read the `feed` element of a parsed document
    pub fn from_document(document: &Value) -> Self {
        document.get("feed").cloned().map(lenient).unwrap_or_default()
    }
}

impl From<RawLink> for ArxivLink {
    fn from(raw: RawLink) -> Self {
        ArxivLink {
            href: text(raw.href),
            rel: text(raw.rel),
            link_type: text(raw.link_type),
            title: non_empty(raw.title),
        }
    }
}

impl From<RawCategory> for ArxivCategory {
    fn from(raw: RawCategory) -> Self {
        ArxivCategory {
            term: text(raw.term),
            scheme: text(raw.scheme),
        }
    }
}

impl From<RawAuthor> for ArxivAuthor {
    fn from(raw: RawAuthor) -> Self {
        ArxivAuthor {
            name: text(raw.name),
            affiliations: raw
                .affiliation
                .into_vec()
                .into_iter()
                .map(|t| t.0)
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }
}

impl From<RawEntry> for ArxivEntry {
    fn from(raw: RawEntry) -> Self {
        let author_details: Vec<ArxivAuthor> =
            raw.author.into_vec().into_iter().map(ArxivAuthor::from).collect();

        ArxivEntry {
            id: text(raw.id),
            title: text(raw.title),
            summary: text(raw.summary).trim().to_string(),
            authors: author_details.iter().map(|a| a.name.clone()).collect(),
            links: raw.link.into_vec().into_iter().map(ArxivLink::from).collect(),
            published: text(raw.published),
            updated: text(raw.updated),
            categories: raw
                .category
                .into_vec()
                .into_iter()
                .map(ArxivCategory::from)
                .collect(),
            author_details,
            primary_category: raw
                .primary_category
                .into_vec()
                .into_iter()
                .next()
                .and_then(|c| non_empty(c.term)),
            comment: non_empty(raw.comment),
            journal_ref: non_empty(raw.journal_ref),
            doi: non_empty(raw.doi),
        }
    }
}

/// Normalize one `entry` node of the tree
pub fn normalize_entry(raw: &Value) -> ArxivEntry {
    lenient::<RawEntry>(raw.clone()).into()
}

/// Normalize every entry of a parsed feed document
///
/// A document without `feed` or without `entry` yields no entries; a feed
/// with a single bare `entry` yields one.
pub fn normalize_feed(document: &Value) -> Vec<ArxivEntry> {
    RawFeed::from_document(document)
        .entry
        .into_vec()
        .into_iter()
        .map(ArxivEntry::from)
        .collect()
}

/// Normalize a parsed feed document including its paging metadata
pub fn normalize_search_feed(document: &Value) -> SearchFeed {
    let feed = RawFeed::from_document(document);
    let count = |field: Option<Text>| text(field).trim().parse::<u64>().unwrap_or(0);

    SearchFeed {
        total_results: count(feed.total_results),
        start_index: count(feed.start_index),
        items_per_page: count(feed.items_per_page),
        entries: feed.entry.into_vec().into_iter().map(ArxivEntry::from).collect(),
    }
}
