//! Utility modules supporting arXiv requests.
//!
//! - [`Transport`]: the "fetch a URL, return status and body" seam the client talks to
//! - [`HttpClient`]: reqwest-backed [`Transport`] with configured timeouts
//!
//! ```rust,no_run
//! use arxiv_search::utils::{HttpClient, Transport};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new()?;
//! let response = client.get("http://export.arxiv.org/api/query?search_query=all:electron").await?;
//! println!("{} bytes, status {}", response.body.len(), response.status);
//! # Ok(())
//! # }
//! ```

mod http;

pub use http::{HttpClient, Transport, TransportResponse};
