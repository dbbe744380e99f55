//! Fluent construction of arXiv searches.
//!
//! ```no_run
//! use arxiv_search::{ArxivClient, ArxivSearch, SortBy};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ArxivClient::new()?;
//! let entries = ArxivSearch::new()
//!     .with_query("graph neural networks")
//!     .in_category("cs.LG")
//!     .exclude_tag("survey", Default::default())
//!     .sort_by(SortBy::SubmittedDate)
//!     .max_results(10)
//!     .search(&client)
//!     .await?;
//! # Ok(())
//! # }
//! ```

use crate::client::ArxivClient;
use crate::error::Result;
use crate::models::{
    ArxivEntry, FieldPrefix, SearchQuery, SortBy, SortOrder, Tag, TagGroup, DEFAULT_MAX_RESULTS,
};

/// Accumulates chained calls into a [`SearchQuery`]
///
/// Tag calls add to the current group. The first group is current until
/// [`ArxivSearch::or_group`] opens another one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArxivSearch {
    query: SearchQuery,
}

impl Default for ArxivSearch {
    fn default() -> Self {
        Self::new()
    }
}

/// Start a new fluent search
pub fn create_search() -> ArxivSearch {
    ArxivSearch::new()
}

impl ArxivSearch {
    pub fn new() -> Self {
        Self {
            query: SearchQuery {
                groups: vec![TagGroup::default()],
                start: 0,
                max_results: DEFAULT_MAX_RESULTS,
                ..Default::default()
            },
        }
    }

    fn current(&mut self) -> &mut TagGroup {
        if self.query.groups.is_empty() {
            self.query.groups.push(TagGroup::default());
        }
        let last = self.query.groups.len() - 1;
        &mut self.query.groups[last]
    }

    /// Require free text matched against all fields
    pub fn with_query(self, text: impl Into<String>) -> Self {
        self.with_tag(text, FieldPrefix::All)
    }

    /// Require a term in the given field
    pub fn with_tag(mut self, name: impl Into<String>, prefix: FieldPrefix) -> Self {
        self.current().include.push(Tag::new(name, prefix));
        self
    }

    /// Exclude results matching a term in the given field
    pub fn exclude_tag(mut self, name: impl Into<String>, prefix: FieldPrefix) -> Self {
        self.current().exclude.push(Tag::new(name, prefix));
        self
    }

    /// Require a subject category, e.g. `cs.AI` or `cs*`
    pub fn in_category(self, category: impl Into<String>) -> Self {
        self.with_tag(category, FieldPrefix::Category)
    }

    /// Require an author
    pub fn by_author(self, author: impl Into<String>) -> Self {
        self.with_tag(author, FieldPrefix::Author)
    }

    /// Start a new OR group; later tag calls add to it
    pub fn or_group(mut self) -> Self {
        self.query.groups.push(TagGroup::default());
        self
    }

    pub fn sort_by(mut self, sort: SortBy) -> Self {
        self.query.sort_by = Some(sort);
        self
    }

    pub fn sort_order(mut self, order: SortOrder) -> Self {
        self.query.sort_order = Some(order);
        self
    }

    pub fn start_at(mut self, start: u32) -> Self {
        self.query.start = start;
        self
    }

    pub fn max_results(mut self, max: u32) -> Self {
        self.query.max_results = max;
        self
    }

    /// The accumulated query
    pub fn build(self) -> SearchQuery {
        self.query
    }

    /// Run the accumulated query
    pub async fn search(self, client: &ArxivClient) -> Result<Vec<ArxivEntry>> {
        client.search(&self.query).await
    }
}
