//! Search backend client trait and `reqwest`-backed implementation.
//!
//! The client is stateless between calls and never retries: a failed call
//! is reported once and the next user action issues a fresh one.

use std::time::Duration;

use tracing::debug;

use crate::error::SearchError;
use crate::model::{ErrorBody, SearchPage, SearchResponse};

/// Query string sent when the user has not typed anything
pub const WILDCARD: &str = "*";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches one page of search results.
pub trait SearchClient: Send + Sync {
    /// Run `query` and return page `page` (1-based) of `page_size` items.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] on network failure, non-success status, or an
    /// unexpected response body.
    fn search(&self, query: &str, page: u32, page_size: u32) -> Result<SearchPage, SearchError>;
}

/// Blocking HTTP implementation of [`SearchClient`].
#[derive(Debug, Clone)]
pub struct HttpSearchClient {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl HttpSearchClient {
    /// Create a new client targeting `base_url`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, SearchError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| SearchError::Network(e.to_string()))?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Build `{base}/search?q=..&page=..&pageSize=..` with the query percent-encoded.
    pub fn search_url(&self, query: &str, page: u32, page_size: u32) -> Result<reqwest::Url, SearchError> {
        let mut url = reqwest::Url::parse(&format!("{}/search", self.base_url))
            .map_err(|e| SearchError::Network(format!("invalid search URL: {}", e)))?;
        url.query_pairs_mut()
            .append_pair("q", effective_query(query))
            .append_pair("page", &page.max(1).to_string())
            .append_pair("pageSize", &page_size.to_string());
        Ok(url)
    }
}

impl SearchClient for HttpSearchClient {
    fn search(&self, query: &str, page: u32, page_size: u32) -> Result<SearchPage, SearchError> {
        let url = self.search_url(query, page, page_size)?;
        debug!(url = url.as_str(), "sending search request");

        let response = self.http.get(url).send()?;
        let status = response.status().as_u16();
        let body = response.bytes()?;
        decode_response(status, &body)
    }
}

/// Empty or blank input searches the whole catalog.
pub fn effective_query(query: &str) -> &str {
    if query.trim().is_empty() {
        WILDCARD
    } else {
        query
    }
}

/// Classify a raw HTTP answer into a page or a [`SearchError`].
pub fn decode_response(status: u16, body: &[u8]) -> Result<SearchPage, SearchError> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message);
        return Err(SearchError::Http { status, message });
    }

    let parsed: SearchResponse =
        serde_json::from_slice(body).map_err(|e| SearchError::Parse(e.to_string()))?;
    Ok(parsed.into())
}
