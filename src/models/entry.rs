//! Normalized arXiv search results.

use serde::{Deserialize, Serialize};

/// A link attached to an entry (abstract page, PDF, DOI, ...)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArxivLink {
    pub href: String,
    pub rel: String,
    #[serde(rename = "type")]
    pub link_type: String,
    /// Optional `title` attribute; arXiv marks the PDF link with `title="pdf"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// A subject classification of an entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArxivCategory {
    pub term: String,
    pub scheme: String,
}

/// An author with any affiliations the feed reports
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArxivAuthor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub affiliations: Vec<String>,
}

/// A normalized bibliographic record built from one feed `entry`
///
/// Missing scalar fields are empty strings and missing repeated fields are
/// empty lists; a sparse entry is still a valid entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArxivEntry {
    /// Abstract page URL, e.g. `http://arxiv.org/abs/2301.12345v1`
    pub id: String,
    pub title: String,
    /// Abstract, trimmed of surrounding whitespace
    pub summary: String,
    /// Author names in feed order
    pub authors: Vec<String>,
    pub links: Vec<ArxivLink>,
    pub published: String,
    pub updated: String,
    pub categories: Vec<ArxivCategory>,

    /// Authors including affiliations
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub author_details: Vec<ArxivAuthor>,
    /// Term of `arxiv:primary_category`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_category: Option<String>,
    /// Author comment (page counts, conference notes)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub journal_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
}

impl ArxivEntry {
    /// Short arXiv identifier, e.g. `2301.12345v1` for
    /// `http://arxiv.org/abs/2301.12345v1`
    pub fn arxiv_id(&self) -> &str {
        match self.id.split_once("/abs/") {
            Some((_, id)) => id,
            None => &self.id,
        }
    }

    /// URL of the PDF rendition, if the entry links one
    pub fn pdf_url(&self) -> Option<&str> {
        self.links
            .iter()
            .find(|l| l.link_type.contains("pdf") || l.title.as_deref() == Some("pdf"))
            .map(|l| l.href.as_str())
    }

    /// URL of the HTML abstract page, if the entry links one
    pub fn html_url(&self) -> Option<&str> {
        self.links
            .iter()
            .find(|l| l.link_type.contains("html"))
            .map(|l| l.href.as_str())
    }

    /// Category terms in feed order
    pub fn category_terms(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.term.as_str()).collect()
    }
}

/// A page of search results together with the feed's paging metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFeed {
    /// Total number of matches for the query (`opensearch:totalResults`)
    pub total_results: u64,
    /// Offset of the first entry (`opensearch:startIndex`)
    pub start_index: u64,
    /// Page size the provider applied (`opensearch:itemsPerPage`)
    pub items_per_page: u64,
    pub entries: Vec<ArxivEntry>,
}

impl SearchFeed {
    /// Whether results exist beyond this page
    pub fn has_more(&self) -> bool {
        self.start_index.saturating_add(self.entries.len() as u64) < self.total_results
    }
}
