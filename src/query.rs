//! Rendering of search queries into the arXiv `search_query` grammar.
//!
//! A [`SearchQuery`] is rendered as its tag groups joined with `+OR+`.
//! Each group is its include tags joined with `+AND+`, followed by each
//! exclude tag preceded by `+ANDNOT+`. Tags render as `<prefix>:<name>`.
//! The provider evaluates left to right, so input order is preserved.
//!
//! ```
//! use arxiv_search::models::{FieldPrefix, SearchQuery, Tag, TagGroup};
//! use arxiv_search::query::render_query;
//!
//! let query = SearchQuery::new(vec![
//!     TagGroup::new(vec![Tag::all("a")]),
//!     TagGroup::new(vec![Tag::all("b")]).exclude(Tag::all("c")),
//! ]);
//! assert_eq!(render_query(&query.groups).unwrap(), "all:a+OR+all:b+ANDNOT+all:c");
//! ```

use crate::error::{ArxivError, Result};
use crate::models::{SearchQuery, Tag, TagGroup};

/// Base URL for arXiv API
pub const ARXIV_API_URL: &str = "http://export.arxiv.org/api/query";

/// Separator between include tags
pub const AND: &str = "+AND+";
/// Separator between tag groups
pub const OR: &str = "+OR+";
/// Separator before each exclude tag
pub const ANDNOT: &str = "+ANDNOT+";

/// Render one tag as `<prefix>:<name>`
pub fn render_tag(tag: &Tag) -> Result<String> {
    if tag.name.trim().is_empty() {
        return Err(ArxivError::validation("you must specify tag name"));
    }
    Ok(format!("{}:{}", tag.prefix.code(), tag.name))
}

fn render_tags(tags: &[Tag], separator: &str) -> Result<String> {
    Ok(tags
        .iter()
        .map(render_tag)
        .collect::<Result<Vec<_>>>()?
        .join(separator))
}

/// Render one group: include tags ANDed, then each exclude tag AND-NOTed
pub fn render_group(group: &TagGroup) -> Result<String> {
    if group.include.is_empty() {
        return Err(ArxivError::validation("include is a mandatory field"));
    }

    let mut rendered = render_tags(&group.include, AND)?;
    if !group.exclude.is_empty() {
        rendered.push_str(ANDNOT);
        rendered.push_str(&render_tags(&group.exclude, ANDNOT)?);
    }
    Ok(rendered)
}

/// Render all groups joined with OR
pub fn render_query(groups: &[TagGroup]) -> Result<String> {
    if groups.is_empty() {
        return Err(ArxivError::validation(
            "query must contain at least one tag group",
        ));
    }

    Ok(groups
        .iter()
        .map(render_group)
        .collect::<Result<Vec<_>>>()?
        .join(OR))
}

/// Build the full request URL for a query
///
/// Sorting parameters are appended only when set on the query.
pub fn build_url(base_url: &str, query: &SearchQuery) -> Result<String> {
    if query.max_results == 0 {
        return Err(ArxivError::validation("max_results must be greater than 0"));
    }

    let search_query = render_query(&query.groups)?;

    let mut url = format!(
        "{}?search_query={}&start={}&max_results={}",
        base_url, search_query, query.start, query.max_results
    );
    if let Some(sort_by) = query.sort_by {
        url.push_str("&sortBy=");
        url.push_str(sort_by.as_str());
    }
    if let Some(sort_order) = query.sort_order {
        url.push_str("&sortOrder=");
        url.push_str(sort_order.as_str());
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FieldPrefix, SortBy, SortOrder};

    #[test]
    fn test_render_tag() {
        assert_eq!(render_tag(&Tag::all("quantum")).unwrap(), "all:quantum");
        assert_eq!(
            render_tag(&Tag::new("cs.AI", FieldPrefix::Category)).unwrap(),
            "cat:cs.AI"
        );
        assert_eq!(
            render_tag(&Tag::new("Hinton", FieldPrefix::Author)).unwrap(),
            "au:Hinton"
        );
    }

    #[test]
    fn test_render_tag_rejects_empty_name() {
        assert!(render_tag(&Tag::all("")).unwrap_err().is_validation());
        assert!(render_tag(&Tag::all("   ")).unwrap_err().is_validation());
    }

    #[test]
    fn test_render_group_include_only() {
        let group = TagGroup::new(vec![
            Tag::all("quantum"),
            Tag::new("quant-ph", FieldPrefix::Category),
        ]);
        assert_eq!(render_group(&group).unwrap(), "all:quantum+AND+cat:quant-ph");
    }

    #[test]
    fn test_render_group_with_excludes() {
        let group = TagGroup::new(vec![Tag::all("a"), Tag::all("b")])
            .exclude(Tag::new("c", FieldPrefix::Title))
            .exclude(Tag::new("d", FieldPrefix::Abstract));
        let rendered = render_group(&group).unwrap();

        assert_eq!(rendered, "all:a+AND+all:b+ANDNOT+ti:c+ANDNOT+abs:d");
        assert!(!rendered.starts_with('+'));
        assert!(!rendered.ends_with('+'));
        assert!(!rendered.contains("++"));
    }

    #[test]
    fn test_render_group_requires_include() {
        let empty = TagGroup::default();
        assert!(render_group(&empty).unwrap_err().is_validation());

        let only_exclude = TagGroup::default().exclude(Tag::all("x"));
        assert!(render_group(&only_exclude).unwrap_err().is_validation());
    }

    #[test]
    fn test_render_group_rejects_bad_exclude_tag() {
        let group = TagGroup::new(vec![Tag::all("a")]).exclude(Tag::all(" "));
        assert!(render_group(&group).unwrap_err().is_validation());
    }

    #[test]
    fn test_render_query_or_groups() {
        let groups = vec![
            TagGroup::new(vec![Tag::all("a")]),
            TagGroup::new(vec![Tag::all("b")]).exclude(Tag::all("c")),
        ];
        assert_eq!(render_query(&groups).unwrap(), "all:a+OR+all:b+ANDNOT+all:c");
    }

    #[test]
    fn test_render_query_preserves_order() {
        let forward = vec![
            TagGroup::new(vec![Tag::all("x")]),
            TagGroup::new(vec![Tag::all("y")]),
        ];
        let reversed: Vec<_> = forward.iter().cloned().rev().collect();
        assert_eq!(render_query(&forward).unwrap(), "all:x+OR+all:y");
        assert_eq!(render_query(&reversed).unwrap(), "all:y+OR+all:x");
    }

    #[test]
    fn test_render_query_rejects_empty() {
        assert!(render_query(&[]).unwrap_err().is_validation());
    }

    #[test]
    fn test_build_url_without_sort() {
        let query = SearchQuery::from_tags([Tag::all("quantum")]).max_results(5);
        let url = build_url(ARXIV_API_URL, &query).unwrap();

        assert_eq!(
            url,
            "http://export.arxiv.org/api/query?search_query=all:quantum&start=0&max_results=5"
        );
        assert!(!url.contains("sortBy="));
        assert!(!url.contains("sortOrder="));
    }

    #[test]
    fn test_build_url_with_sort() {
        let query = SearchQuery::from_tags([Tag::all("quantum")])
            .sort_by(SortBy::Relevance)
            .sort_order(SortOrder::Descending)
            .start(40);
        let url = build_url(ARXIV_API_URL, &query).unwrap();

        assert_eq!(url.matches("sortBy=relevance").count(), 1);
        assert!(url.ends_with("&start=40&max_results=20&sortBy=relevance&sortOrder=descending"));
    }

    #[test]
    fn test_build_url_sort_order_only() {
        let query = SearchQuery::from_tags([Tag::all("a")]).sort_order(SortOrder::Ascending);
        let url = build_url(ARXIV_API_URL, &query).unwrap();

        assert!(!url.contains("sortBy="));
        assert!(url.ends_with("&sortOrder=ascending"));
    }

    #[test]
    fn test_build_url_rejects_zero_page_size() {
        let query = SearchQuery::from_tags([Tag::all("a")]).max_results(0);
        assert!(build_url(ARXIV_API_URL, &query).unwrap_err().is_validation());
    }

    #[test]
    fn test_build_url_rejects_empty_groups() {
        let query = SearchQuery::default();
        assert!(build_url(ARXIV_API_URL, &query).unwrap_err().is_validation());
    }
}
