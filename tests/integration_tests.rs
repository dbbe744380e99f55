//! Integration tests for arXiv Search
//!
//! These tests run the full search path (URL building, HTTP, XML parsing,
//! normalization) against a local mock server.

use arxiv_search::utils::HttpClient;
use arxiv_search::{
    ArxivClient, ArxivError, ArxivSearch, FieldPrefix, SearchQuery, SortBy, SortOrder, Tag,
    TagGroup,
};
use mockito::Matcher;
use std::sync::Arc;
use tokio_test::{assert_err, assert_ok};

const TWO_ENTRY_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <link href="http://arxiv.org/api/query?search_query%3Dall%3Aquantum" rel="self" type="application/atom+xml"/>
  <title type="html">ArXiv Query: search_query=all:quantum&amp;id_list=&amp;start=0&amp;max_results=2</title>
  <id>http://arxiv.org/api/cHxbiOdZaP56ODnBPIenZhzg5f8</id>
  <updated>2024-03-01T00:00:00-05:00</updated>
  <opensearch:totalResults xmlns:opensearch="http://a9.com/-/spec/opensearch/1.1/">153</opensearch:totalResults>
  <opensearch:startIndex xmlns:opensearch="http://a9.com/-/spec/opensearch/1.1/">0</opensearch:startIndex>
  <opensearch:itemsPerPage xmlns:opensearch="http://a9.com/-/spec/opensearch/1.1/">2</opensearch:itemsPerPage>
  <entry>
    <id>http://arxiv.org/abs/2301.12345v1</id>
    <updated>2023-01-20T12:00:00Z</updated>
    <published>2023-01-15T10:00:00Z</published>
    <title>Quantum Error Correction at Scale</title>
    <summary>
      We study error correction.
    </summary>
    <author>
      <name>Alice Example</name>
      <arxiv:affiliation xmlns:arxiv="http://arxiv.org/schemas/atom">Example University</arxiv:affiliation>
    </author>
    <author>
      <name>Bob Example</name>
    </author>
    <arxiv:doi xmlns:arxiv="http://arxiv.org/schemas/atom">10.1234/qec</arxiv:doi>
    <link title="doi" href="http://dx.doi.org/10.1234/qec" rel="related"/>
    <link href="http://arxiv.org/abs/2301.12345v1" rel="alternate" type="text/html"/>
    <link title="pdf" href="http://arxiv.org/pdf/2301.12345v1" rel="related" type="application/pdf"/>
    <arxiv:primary_category xmlns:arxiv="http://arxiv.org/schemas/atom" term="quant-ph" scheme="http://arxiv.org/schemas/atom"/>
    <category term="quant-ph" scheme="http://arxiv.org/schemas/atom"/>
    <category term="cs.IT" scheme="http://arxiv.org/schemas/atom"/>
  </entry>
  <entry>
    <id>http://arxiv.org/abs/2302.00001v2</id>
    <title>A Single Author Paper</title>
    <summary>Short.</summary>
    <author>
      <name>Carol Solo</name>
    </author>
    <link href="http://arxiv.org/abs/2302.00001v2" rel="alternate" type="text/html"/>
    <category term="quant-ph" scheme="http://arxiv.org/schemas/atom"/>
  </entry>
</feed>"#;

const EMPTY_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title type="html">ArXiv Query: search_query=all:zzzzqqq</title>
  <opensearch:totalResults xmlns:opensearch="http://a9.com/-/spec/opensearch/1.1/">0</opensearch:totalResults>
</feed>"#;

fn client_for(server: &mockito::Server) -> ArxivClient {
    let http = HttpClient::new().expect("http client");
    ArxivClient::with_transport(Arc::new(http), format!("{}/api/query", server.url()))
}

#[tokio::test]
async fn test_search_returns_normalized_entries() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/query")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("search_query".into(), "all:quantum".into()),
            Matcher::UrlEncoded("start".into(), "0".into()),
            Matcher::UrlEncoded("max_results".into(), "2".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/atom+xml")
        .with_body(TWO_ENTRY_FEED)
        .create_async()
        .await;

    let client = client_for(&server);
    let query = SearchQuery::from_tags([Tag::all("quantum")]).max_results(2);
    let entries = assert_ok!(client.search(&query).await);

    mock.assert_async().await;
    assert_eq!(entries.len(), 2);

    let first = &entries[0];
    assert_eq!(first.id, "http://arxiv.org/abs/2301.12345v1");
    assert_eq!(first.arxiv_id(), "2301.12345v1");
    assert_eq!(first.title, "Quantum Error Correction at Scale");
    assert_eq!(first.summary, "We study error correction.");
    assert_eq!(first.authors, vec!["Alice Example", "Bob Example"]);
    assert_eq!(
        first.author_details[0].affiliations,
        vec!["Example University"]
    );
    assert_eq!(first.published, "2023-01-15T10:00:00Z");
    assert_eq!(first.updated, "2023-01-20T12:00:00Z");
    assert_eq!(first.links.len(), 3);
    assert_eq!(first.links[1].rel, "alternate");
    assert_eq!(first.pdf_url(), Some("http://arxiv.org/pdf/2301.12345v1"));
    assert_eq!(first.html_url(), Some("http://arxiv.org/abs/2301.12345v1"));
    assert_eq!(first.category_terms(), vec!["quant-ph", "cs.IT"]);
    assert_eq!(first.primary_category.as_deref(), Some("quant-ph"));
    assert_eq!(first.doi.as_deref(), Some("10.1234/qec"));

    // Singleton author, link and category collapse to bare values in the tree
    let second = &entries[1];
    assert_eq!(second.authors, vec!["Carol Solo"]);
    assert_eq!(second.links.len(), 1);
    assert_eq!(second.categories.len(), 1);
    assert_eq!(second.published, "");
    assert_eq!(second.pdf_url(), None);
}

#[tokio::test]
async fn test_search_feed_metadata() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/query")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(TWO_ENTRY_FEED)
        .create_async()
        .await;

    let client = client_for(&server);
    let query = SearchQuery::from_tags([Tag::all("quantum")]).max_results(2);
    let feed = assert_ok!(client.search_feed(&query).await);

    assert_eq!(feed.total_results, 153);
    assert_eq!(feed.start_index, 0);
    assert_eq!(feed.items_per_page, 2);
    assert_eq!(feed.entries.len(), 2);
    assert!(feed.has_more());
}

#[tokio::test]
async fn test_zero_matches_is_empty_not_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/query")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(EMPTY_FEED)
        .create_async()
        .await;

    let client = client_for(&server);
    let entries = assert_ok!(client.search(&SearchQuery::from_tags([Tag::all("zzzzqqq")])).await);
    assert!(entries.is_empty());
}

#[tokio::test]
async fn test_sort_and_group_parameters_are_sent() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/query")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded(
                "search_query".into(),
                "all:a OR all:b ANDNOT ti:c".into(),
            ),
            Matcher::UrlEncoded("start".into(), "10".into()),
            Matcher::UrlEncoded("max_results".into(), "5".into()),
            Matcher::UrlEncoded("sortBy".into(), "submittedDate".into()),
            Matcher::UrlEncoded("sortOrder".into(), "ascending".into()),
        ]))
        .with_status(200)
        .with_body(EMPTY_FEED)
        .create_async()
        .await;

    let client = client_for(&server);
    let query = SearchQuery::new(vec![
        TagGroup::new(vec![Tag::all("a")]),
        TagGroup::new(vec![Tag::all("b")]).exclude(Tag::new("c", FieldPrefix::Title)),
    ])
    .sort_by(SortBy::SubmittedDate)
    .sort_order(SortOrder::Ascending)
    .start(10)
    .max_results(5);

    assert_ok!(client.search(&query).await);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_builder_search() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/query")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded(
                "search_query".into(),
                "all:quantum AND cat:quant-ph AND au:Example".into(),
            ),
            Matcher::UrlEncoded("sortBy".into(), "relevance".into()),
        ]))
        .with_status(200)
        .with_body(TWO_ENTRY_FEED)
        .create_async()
        .await;

    let client = client_for(&server);
    let entries = assert_ok!(
        ArxivSearch::new()
            .with_query("quantum")
            .in_category("quant-ph")
            .by_author("Example")
            .sort_by(SortBy::Relevance)
            .search(&client)
            .await
    );

    mock.assert_async().await;
    assert_eq!(entries.len(), 2);
}

#[tokio::test]
async fn test_search_for_canned_query() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/query")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("search_query".into(), "all:llm AND cat:cs*".into()),
            Matcher::UrlEncoded("sortBy".into(), "lastUpdatedDate".into()),
        ]))
        .with_status(200)
        .with_body(EMPTY_FEED)
        .create_async()
        .await;

    let client = client_for(&server);
    assert_ok!(client.search_for("llm").await);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_http_error_status() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/query")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("Internal Server Error")
        .create_async()
        .await;

    let client = client_for(&server);
    let err = assert_err!(client.search(&SearchQuery::from_tags([Tag::all("x")])).await);
    assert!(matches!(err, ArxivError::Http { status: 500 }));
}

#[tokio::test]
async fn test_validation_error_sends_nothing() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = assert_err!(client.search(&SearchQuery::new(vec![TagGroup::default()])).await);
    assert!(err.is_validation());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_unreachable_host_is_network_error() {
    let http = HttpClient::new().expect("http client");
    let client = ArxivClient::with_transport(Arc::new(http), "http://127.0.0.1:1/api/query");

    let err = assert_err!(client.search(&SearchQuery::from_tags([Tag::all("x")])).await);
    assert!(matches!(err, ArxivError::Network(_)));
}
