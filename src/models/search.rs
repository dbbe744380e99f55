//! Search request models.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::tag::{Tag, TagGroup};
use crate::error::{ArxivError, Result};

/// Default page size when none is given
pub const DEFAULT_MAX_RESULTS: u32 = 20;

/// Sort field for search results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SortBy {
    Relevance,
    LastUpdatedDate,
    SubmittedDate,
}

impl SortBy {
    pub const ALL: [SortBy; 3] = [
        SortBy::Relevance,
        SortBy::LastUpdatedDate,
        SortBy::SubmittedDate,
    ];

    /// Value of the `sortBy` request parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Relevance => "relevance",
            SortBy::LastUpdatedDate => "lastUpdatedDate",
            SortBy::SubmittedDate => "submittedDate",
        }
    }
}

/// Sort order for search results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub const ALL: [SortOrder; 2] = [SortOrder::Ascending, SortOrder::Descending];

    /// Value of the `sortOrder` request parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "ascending",
            SortOrder::Descending => "descending",
        }
    }
}

fn allowed<T: Copy>(values: &[T], name: impl Fn(T) -> &'static str) -> String {
    values.iter().map(|v| name(*v)).collect::<Vec<_>>().join(" ")
}

impl FromStr for SortBy {
    type Err = ArxivError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| {
                ArxivError::validation(format!(
                    "unsupported sort by option. should be one of: {}",
                    allowed(&Self::ALL, |v| v.as_str())
                ))
            })
    }
}

impl FromStr for SortOrder {
    type Err = ArxivError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| {
                ArxivError::validation(format!(
                    "unsupported sort order option. should be one of: {}",
                    allowed(&Self::ALL, |v| v.as_str())
                ))
            })
    }
}

impl TryFrom<String> for SortBy {
    type Error = ArxivError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl TryFrom<String> for SortOrder {
    type Error = ArxivError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<SortBy> for String {
    fn from(value: SortBy) -> Self {
        value.as_str().to_string()
    }
}

impl From<SortOrder> for String {
    fn from(value: SortOrder) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Search query parameters
///
/// Groups are ORed together in order. Built fresh for every search and
/// consumed by [`crate::query::build_url`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    /// Tag groups, combined with OR
    pub groups: Vec<TagGroup>,

    /// Sort by field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortBy>,

    /// Sort order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,

    /// Offset of the first result
    #[serde(default)]
    pub start: u32,

    /// Page size
    #[serde(default = "default_max_results")]
    pub max_results: u32,
}

fn default_max_results() -> u32 {
    DEFAULT_MAX_RESULTS
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            groups: Vec::new(),
            sort_by: None,
            sort_order: None,
            start: 0,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

impl SearchQuery {
    /// Create a query from its tag groups
    pub fn new(groups: Vec<TagGroup>) -> Self {
        Self {
            groups,
            ..Default::default()
        }
    }

    /// Create a single-group query that ANDs the given tags
    pub fn from_tags(tags: impl IntoIterator<Item = Tag>) -> Self {
        Self::new(vec![TagGroup::new(tags.into_iter().collect())])
    }

    /// Parse a query model from JSON
    ///
    /// Shape errors (for example an `include` that is not a list) are
    /// reported as validation errors.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Add another OR group
    pub fn or(mut self, group: TagGroup) -> Self {
        self.groups.push(group);
        self
    }

    /// Set sort by
    pub fn sort_by(mut self, sort: SortBy) -> Self {
        self.sort_by = Some(sort);
        self
    }

    /// Set sort order
    pub fn sort_order(mut self, order: SortOrder) -> Self {
        self.sort_order = Some(order);
        self
    }

    /// Set result offset
    pub fn start(mut self, start: u32) -> Self {
        self.start = start;
        self
    }

    /// Set maximum results
    pub fn max_results(mut self, max: u32) -> Self {
        self.max_results = max;
        self
    }
}
