//! # arXiv Search
//!
//! A typed client for the arXiv search API.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`]: Tags, tag groups, the search query model and normalized entries
//! - [`query`]: Rendering of a query into the `search_query` grammar and the request URL
//! - [`parser`]: XML-to-tree conversion and normalization of feed entries
//! - [`client`]: Request execution and the [`ArxivClient`] search entry points
//! - [`builder`]: The fluent [`ArxivSearch`] builder
//! - [`utils`]: HTTP transport
//! - [`config`]: Configuration management
//!
//! ## Quick Start
//!
//! ```no_run
//! use arxiv_search::{ArxivClient, FieldPrefix, SearchQuery, Tag, TagGroup};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ArxivClient::new()?;
//!
//!     let query = SearchQuery::new(vec![
//!         TagGroup::new(vec![Tag::all("quantum"), Tag::new("quant-ph", FieldPrefix::Category)])
//!             .exclude(Tag::new("review", FieldPrefix::Title)),
//!     ])
//!     .max_results(5);
//!
//!     for entry in client.search(&query).await? {
//!         println!("{} ({})", entry.title, entry.authors.join(", "));
//!     }
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod parser;
pub mod query;
pub mod utils;

// Re-export commonly used types
pub use builder::{create_search, ArxivSearch};
pub use client::{execute, ArxivClient};
pub use error::{ArxivError, Result};
pub use models::{
    ArxivCategory, ArxivEntry, ArxivLink, FieldPrefix, SearchFeed, SearchQuery, SortBy,
    SortOrder, Tag, TagGroup,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
