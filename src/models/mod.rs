//! Core data models for arXiv search queries and results.

mod entry;
mod search;
mod tag;

pub use entry::{ArxivAuthor, ArxivCategory, ArxivEntry, ArxivLink, SearchFeed};
pub use search::{SearchQuery, SortBy, SortOrder, DEFAULT_MAX_RESULTS};
pub use tag::{FieldPrefix, Tag, TagGroup};
