//! arXiv API client.

use std::sync::Arc;

use crate::config::Config;
use crate::error::{ArxivError, Result};
use crate::models::{ArxivEntry, FieldPrefix, SearchFeed, SearchQuery, SortBy, Tag};
use crate::parser::{normalize_feed, normalize_search_feed, parse_xml};
use crate::query::{self, ARXIV_API_URL};
use crate::utils::{HttpClient, Transport};

/// Category filter applied by [`ArxivClient::search_for`]
pub const COMPUTER_SCIENCE_CATEGORIES: &str = "cs*";

/// Issue a GET for `url` and return the body of a successful response
///
/// A completed response with a non-2xx status is an [`ArxivError::Http`];
/// transport failures are returned as the transport reported them.
pub async fn execute(transport: &dyn Transport, url: &str) -> Result<String> {
    tracing::debug!(url, "Requesting arXiv feed");

    let response = transport.get(url).await?;
    if !response.is_success() {
        tracing::debug!(status = response.status, "arXiv request failed");
        return Err(ArxivError::Http {
            status: response.status,
        });
    }

    Ok(response.body)
}

/// Client for the arXiv search API
///
/// Every search validates and renders the query before any network I/O,
/// issues exactly one request, and normalizes the returned feed.
#[derive(Debug, Clone)]
pub struct ArxivClient {
    transport: Arc<dyn Transport>,
    base_url: String,
}

impl ArxivClient {
    /// Create a client for the public arXiv endpoint
    pub fn new() -> Result<Self> {
        Ok(Self::with_transport(
            Arc::new(HttpClient::new()?),
            ARXIV_API_URL,
        ))
    }

    /// Create a client from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_transport(
            Arc::new(HttpClient::from_config(&config.api)?),
            config.api.base_url.clone(),
        ))
    }

    /// Create with a custom transport and endpoint (for testing)
    pub fn with_transport(transport: Arc<dyn Transport>, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
        }
    }

    /// Endpoint requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the request URL for a query without sending it
    pub fn build_url(&self, query: &SearchQuery) -> Result<String> {
        query::build_url(&self.base_url, query)
    }

    async fn fetch(&self, query: &SearchQuery) -> Result<serde_json::Value> {
        let url = self.build_url(query)?;
        let body = execute(self.transport.as_ref(), &url).await?;
        parse_xml(&body)
    }

    /// Search and return the matching entries
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<ArxivEntry>> {
        let document = self.fetch(query).await?;
        let entries = normalize_feed(&document);
        tracing::debug!(count = entries.len(), "Parsed arXiv entries");
        Ok(entries)
    }

    /// Search and return the entries with the feed's paging metadata
    pub async fn search_feed(&self, query: &SearchQuery) -> Result<SearchFeed> {
        let document = self.fetch(query).await?;
        let feed = normalize_search_feed(&document);
        tracing::debug!(
            count = feed.entries.len(),
            total = feed.total_results,
            "Parsed arXiv feed"
        );
        Ok(feed)
    }

    /// Search computer science papers for free text, newest updates first
    pub async fn search_for(&self, text: &str) -> Result<Vec<ArxivEntry>> {
        self.search(&search_for_query(text)).await
    }
}

/// The query [`ArxivClient::search_for`] sends
pub fn search_for_query(text: &str) -> SearchQuery {
    SearchQuery::from_tags([
        Tag::all(text),
        Tag::new(COMPUTER_SCIENCE_CATEGORIES, FieldPrefix::Category),
    ])
    .sort_by(SortBy::LastUpdatedDate)
}
