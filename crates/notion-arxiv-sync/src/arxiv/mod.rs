//! arXiv API client.
//!
//! Provides:
//! - Single-paper lookup by identifier (sync mode)
//! - Date-sorted search capped at a result count (discover mode)
//!
//! Responses are Atom XML; see [`feed`] for the wire format.

mod feed;

use async_trait::async_trait;
use reqwest::Client;

use crate::config::{Endpoints, SearchSpec};
use crate::error::{ClientError, ClientResult};
use crate::models::{ArxivEntry, DiscoveredPaper};

/// Source of paper metadata.
///
/// Implemented by [`ArxivClient`]; tests substitute in-memory sources.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Look up one paper.
    ///
    /// Fails with [`ClientError::NotFound`] when no complete record matches.
    async fn fetch_by_id(&self, arxiv_id: &str) -> ClientResult<ArxivEntry>;

    /// Newest-first search, at most `max_results` entries.
    async fn search(&self, query: &str, max_results: usize) -> ClientResult<Vec<ArxivEntry>>;
}

/// arXiv export API client.
#[derive(Clone)]
pub struct ArxivClient {
    /// HTTP client.
    client: Client,

    /// API base URL.
    api_url: String,
}

impl ArxivClient {
    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(endpoints: &Endpoints) -> ClientResult<Self> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(endpoints.request_timeout)
            .connect_timeout(endpoints.connect_timeout)
            .gzip(true)
            .build()?;

        Ok(Self {
            client,
            api_url: endpoints.arxiv_api_url.clone(),
        })
    }

    /// Fetch metadata for one identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] if arXiv has no such paper, or only
    /// an entry missing its id or publication date.
    pub async fn fetch_by_id(&self, arxiv_id: &str) -> ClientResult<ArxivEntry> {
        tracing::debug!(arxiv_id, "Fetching arXiv metadata");

        let params = [
            ("id_list", arxiv_id.to_string()),
            ("max_results", "1".to_string()),
        ];
        let feed = self.query(&params).await?;

        let Some(raw) = feed.entries.into_iter().next() else {
            return Err(ClientError::not_found(format!("arXiv paper {arxiv_id}")));
        };

        if let Some(message) = raw.api_error() {
            return Err(ClientError::not_found(format!("arXiv paper {arxiv_id}: {message}")));
        }

        raw.into_entry().map_err(|reason| {
            tracing::debug!(arxiv_id, %reason, "Feed entry is incomplete");
            ClientError::not_found(format!("arXiv paper {arxiv_id}: {reason}"))
        })
    }

    /// Search for papers, newest submission first.
    ///
    /// Incomplete entries are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::BadRequest`] if arXiv rejects the query.
    pub async fn search(&self, query: &str, max_results: usize) -> ClientResult<Vec<ArxivEntry>> {
        tracing::debug!(query, max_results, "Searching arXiv");

        let params = [
            ("search_query", query.to_string()),
            ("start", "0".to_string()),
            ("max_results", max_results.to_string()),
            ("sortBy", "submittedDate".to_string()),
            ("sortOrder", "descending".to_string()),
        ];
        let feed = self.query(&params).await?;

        let mut entries = Vec::with_capacity(feed.entries.len());
        for raw in feed.entries {
            if let Some(message) = raw.api_error() {
                return Err(ClientError::bad_request(message));
            }
            match raw.into_entry() {
                Ok(entry) => entries.push(entry),
                Err(reason) => tracing::warn!(query, %reason, "Skipping incomplete feed entry"),
            }
        }

        // The API honours sortBy/max_results, but the contract is enforced here too.
        entries.sort_by(|a, b| b.published.cmp(&a.published));
        entries.truncate(max_results);

        Ok(entries)
    }

    /// Make a GET request against `/query` and parse the feed.
    async fn query(&self, params: &[(&str, String)]) -> ClientResult<feed::Feed> {
        let url = format!("{}/query", self.api_url);

        let response = self.client.get(&url).query(params).send().await?;

        if !response.status().is_success() {
            return Err(ClientError::from_response(response).await);
        }

        let body = response.text().await?;
        feed::parse(&body)
    }
}

#[async_trait]
impl MetadataSource for ArxivClient {
    async fn fetch_by_id(&self, arxiv_id: &str) -> ClientResult<ArxivEntry> {
        Self::fetch_by_id(self, arxiv_id).await
    }

    async fn search(&self, query: &str, max_results: usize) -> ClientResult<Vec<ArxivEntry>> {
        Self::search(self, query, max_results).await
    }
}

impl std::fmt::Debug for ArxivClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArxivClient")
            .field("api_url", &self.api_url)
            .finish_non_exhaustive()
    }
}

/// Run a discover search and number the results from 1.
///
/// # Errors
///
/// Propagates any search failure.
pub async fn discover(
    source: &dyn MetadataSource,
    search: &SearchSpec,
) -> ClientResult<Vec<DiscoveredPaper>> {
    let entries = source.search(&search.query, search.max_results).await?;

    tracing::info!(
        count = entries.len(),
        query = %search.query,
        "Fetched recent papers from arXiv"
    );

    Ok(entries
        .into_iter()
        .enumerate()
        .map(|(idx, entry)| DiscoveredPaper {
            sequence_number: idx + 1,
            published_date: entry.published_date(),
            title: entry.title,
            pdf_url: entry.pdf_url,
        })
        .collect())
}
