//! Notion database client.
//!
//! Reads paper rows (title, PDF link) from a database and overwrites the
//! author multi-select of individual rows. Column names come from the
//! [`PropertySchema`] in the settings file.

mod wire;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};

use crate::config::{Endpoints, PropertySchema, api};
use crate::error::{ClientError, ClientResult};
use crate::models::{DatabaseRow, RowIndex};

/// Storage the sync reads rows from and writes authors back to.
///
/// Implemented by [`NotionClient`]; tests substitute in-memory databases.
#[async_trait]
pub trait PaperDatabase: Send + Sync {
    /// Rows that carry a PDF link, keyed by title (last duplicate wins).
    async fn list_rows(&self, database_id: &str, schema: &PropertySchema)
    -> ClientResult<RowIndex>;

    /// Re-assert the title and replace the author tags of one row.
    async fn update_authors(
        &self,
        database_id: &str,
        row_id: &str,
        schema: &PropertySchema,
        title: &str,
        authors: &[String],
    ) -> ClientResult<()>;
}

/// Notion REST API client.
#[derive(Clone)]
pub struct NotionClient {
    /// HTTP client with auth headers.
    client: Client,

    /// API base URL.
    api_url: String,
}

impl NotionClient {
    /// Create a new client authenticated with an integration token.
    ///
    /// # Errors
    ///
    /// Returns error if the token is not a valid header value or HTTP client
    /// initialization fails.
    pub fn new(credential: &str, endpoints: &Endpoints) -> ClientResult<Self> {
        let mut headers = HeaderMap::new();

        let mut auth = HeaderValue::from_str(&format!("Bearer {credential}"))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        let version = HeaderValue::from_str(&endpoints.notion_version)?;
        headers.insert("notion-version", version);

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(endpoints.request_timeout)
            .connect_timeout(endpoints.connect_timeout)
            .gzip(true)
            .build()?;

        Ok(Self {
            client,
            api_url: endpoints.notion_api_url.clone(),
        })
    }

    /// Query the database and index rows by title.
    ///
    /// Only the first result page is read.
    pub async fn list_rows(
        &self,
        database_id: &str,
        schema: &PropertySchema,
    ) -> ClientResult<RowIndex> {
        tracing::info!(database_id, "Reading the database from Notion");

        let url = format!("{}/databases/{}/query", self.api_url, database_id);
        let body = wire::QueryRequest {
            page_size: api::PAGE_SIZE,
        };

        let response = self.client.post(&url).json(&body).send().await?;
        let response = handle_response(response).await?;
        let text = response.text().await?;
        let result: wire::QueryResponse = serde_json::from_str(&text)?;

        if result.has_more {
            tracing::warn!(
                database_id,
                page_size = api::PAGE_SIZE,
                "Database has more rows than one page; the rest are not processed"
            );
        }

        let mut index = RowIndex::new();
        for page in result.results {
            let Some(url) = page.url(&schema.url) else {
                tracing::debug!(row_id = %page.id, "Skipping row without a PDF link");
                continue;
            };
            let Some(title) = page.title(&schema.title) else {
                tracing::debug!(row_id = %page.id, "Skipping row without a title");
                continue;
            };

            if let Some(previous) = index.insert(DatabaseRow::new(page.id, title, url)) {
                tracing::warn!(
                    title = %previous.title,
                    replaced_row_id = %previous.row_id,
                    "Duplicate title; keeping the later row"
                );
            }
        }

        tracing::info!(count = index.len(), "Read rows with PDF links");
        Ok(index)
    }

    /// Overwrite the author tags of one row.
    pub async fn update_authors(
        &self,
        database_id: &str,
        row_id: &str,
        schema: &PropertySchema,
        title: &str,
        authors: &[String],
    ) -> ClientResult<()> {
        tracing::debug!(
            database_id,
            row_id,
            title,
            authors = authors.len(),
            "Updating authors"
        );

        let url = format!("{}/pages/{}", self.api_url, row_id);
        let body = wire::author_patch(&schema.title, &schema.author, title, authors);

        let response = self.client.patch(&url).json(&body).send().await?;
        handle_response(response).await?;

        Ok(())
    }
}

#[async_trait]
impl PaperDatabase for NotionClient {
    async fn list_rows(
        &self,
        database_id: &str,
        schema: &PropertySchema,
    ) -> ClientResult<RowIndex> {
        Self::list_rows(self, database_id, schema).await
    }

    async fn update_authors(
        &self,
        database_id: &str,
        row_id: &str,
        schema: &PropertySchema,
        title: &str,
        authors: &[String],
    ) -> ClientResult<()> {
        Self::update_authors(self, database_id, row_id, schema, title, authors).await
    }
}

impl std::fmt::Debug for NotionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotionClient")
            .field("api_url", &self.api_url)
            .finish_non_exhaustive()
    }
}

/// Handle API response status codes.
async fn handle_response(response: reqwest::Response) -> ClientResult<reqwest::Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    Err(ClientError::from_response(response).await)
}
