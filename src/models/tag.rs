//! Search tags and tag groups.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ArxivError;

/// Searchable field a tag is scoped to
///
/// Parses from either the descriptive name (`"journal-ref"`) or the
/// provider's wire code (`"jr"`). Serializes as the wire code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FieldPrefix {
    #[default]
    All,
    Title,
    Author,
    Abstract,
    Comment,
    JournalRef,
    Category,
    ReportNumber,
}

impl FieldPrefix {
    /// Every supported prefix, in the provider's documented order
    pub const ALL: [FieldPrefix; 8] = [
        FieldPrefix::All,
        FieldPrefix::Title,
        FieldPrefix::Author,
        FieldPrefix::Abstract,
        FieldPrefix::Comment,
        FieldPrefix::JournalRef,
        FieldPrefix::Category,
        FieldPrefix::ReportNumber,
    ];

    /// Token used in the `search_query` grammar
    pub fn code(&self) -> &'static str {
        match self {
            FieldPrefix::All => "all",
            FieldPrefix::Title => "ti",
            FieldPrefix::Author => "au",
            FieldPrefix::Abstract => "abs",
            FieldPrefix::Comment => "co",
            FieldPrefix::JournalRef => "jr",
            FieldPrefix::Category => "cat",
            FieldPrefix::ReportNumber => "rn",
        }
    }

    /// Human-readable field name
    pub fn name(&self) -> &'static str {
        match self {
            FieldPrefix::All => "all",
            FieldPrefix::Title => "title",
            FieldPrefix::Author => "author",
            FieldPrefix::Abstract => "abstract",
            FieldPrefix::Comment => "comment",
            FieldPrefix::JournalRef => "journal-ref",
            FieldPrefix::Category => "category",
            FieldPrefix::ReportNumber => "report-number",
        }
    }
}

impl FromStr for FieldPrefix {
    type Err = ArxivError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.code() == s || p.name() == s)
            .ok_or_else(|| ArxivError::validation(format!("unsupported prefix: {}", s)))
    }
}

impl TryFrom<String> for FieldPrefix {
    type Error = ArxivError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FieldPrefix> for String {
    fn from(prefix: FieldPrefix) -> Self {
        prefix.code().to_string()
    }
}

impl fmt::Display for FieldPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A single search term scoped to a field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Search term; must be non-empty after trimming
    pub name: String,

    /// Field the term is matched against
    #[serde(default)]
    pub prefix: FieldPrefix,
}

impl Tag {
    /// Create a tag scoped to the given field
    pub fn new(name: impl Into<String>, prefix: FieldPrefix) -> Self {
        Self {
            name: name.into(),
            prefix,
        }
    }

    /// Create a tag that searches all fields
    pub fn all(name: impl Into<String>) -> Self {
        Self::new(name, FieldPrefix::All)
    }
}

impl FromStr for Tag {
    type Err = ArxivError;

    /// Parse a `prefix:name` token such as `cat:cs.AI` or `author:Hinton`
    ///
    /// A token without a recognised prefix searches all fields as a whole,
    /// so `"Quantum: a review"` becomes `all:Quantum: a review`.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let scoped = token
            .split_once(':')
            .and_then(|(prefix, name)| Some(Self::new(name, prefix.parse().ok()?)));
        Ok(scoped.unwrap_or_else(|| Self::all(token)))
    }
}

/// One OR-disjunct of a search: include tags ANDed, exclude tags AND-NOTed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagGroup {
    /// Tags that must all match; must not be empty
    pub include: Vec<Tag>,

    /// Tags subtracted from the include set
    #[serde(default)]
    pub exclude: Vec<Tag>,
}

impl TagGroup {
    /// Create a group from its include tags
    pub fn new(include: Vec<Tag>) -> Self {
        Self {
            include,
            exclude: Vec::new(),
        }
    }

    /// Add an include tag
    pub fn include(mut self, tag: Tag) -> Self {
        self.include.push(tag);
        self
    }

    /// Add an exclude tag
    pub fn exclude(mut self, tag: Tag) -> Self {
        self.exclude.push(tag);
        self
    }
}
