//! Configuration for the Notion/arXiv sync.
//!
//! Settings come from a YAML file; API endpoints have production defaults and
//! can be pointed at a mock server for tests.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

/// API configuration constants.
pub mod api {
    use std::time::Duration;

    /// Base URL for the Notion REST API.
    pub const NOTION_API: &str = "https://api.notion.com/v1";

    /// Notion API version sent with every request.
    pub const NOTION_VERSION: &str = "2022-06-28";

    /// Base URL for the arXiv export API.
    pub const ARXIV_API: &str = "https://export.arxiv.org/api";

    /// Request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Rows requested from a database query (single page).
    pub const PAGE_SIZE: u32 = 100;
}

/// Output file names written into the output directory.
pub mod output {
    /// Per-row metadata snapshot written before any database write.
    pub const SNAPSHOT_FILE: &str = "paper_infos.json";

    /// Discover-mode result dump.
    pub const DISCOVER_FILE: &str = "auto_fetch.json";
}

/// Which flow a run executes. Chosen once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Resolve database rows against arXiv and write authors back.
    #[default]
    Sync,
    /// Search arXiv directly and dump the results.
    Discover,
}

/// Names of the database columns the sync reads and writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySchema {
    /// Title column (Notion `title` property).
    pub title: String,
    /// PDF link column (Notion `url` property).
    pub url: String,
    /// Author column (Notion `multi_select` property).
    pub author: String,
}

/// arXiv search parameters for discover mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSpec {
    /// arXiv search expression, e.g. `cat:cs.LG AND ti:diffusion`.
    pub query: String,
    /// Upper bound on returned papers.
    pub max_results: usize,
}

/// Settings loaded from the config file.
#[derive(Clone)]
pub struct Settings {
    /// Notion integration token.
    pub credential: String,

    /// Target database ID.
    pub database_id: String,

    /// Column name mapping.
    pub properties: PropertySchema,

    /// Present only when the file carries an `arxiv` section.
    pub search: Option<SearchSpec>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSettings {
    #[serde(default, alias = "NOTION_TOKEN")]
    credential: Option<String>,

    #[serde(default, alias = "DATABASE_ID")]
    database_id: Option<String>,

    #[serde(default, alias = "PROPERTY")]
    property: Option<RawProperties>,

    #[serde(default)]
    arxiv: Option<RawSearch>,
}

#[derive(Debug, Default, Deserialize)]
struct RawProperties {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    author: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSearch {
    #[serde(default)]
    query: Option<String>,
    #[serde(default)]
    max_results: Option<i64>,
}

impl Settings {
    /// Load settings from a YAML file.
    ///
    /// The `arxiv` section is validated only for [`RunMode::Discover`].
    pub fn load(path: impl AsRef<Path>, mode: RunMode) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        tracing::info!(path = %path.display(), "Reading config file");

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_yaml(&contents, mode)
    }

    /// Parse settings from YAML text.
    pub fn from_yaml(contents: &str, mode: RunMode) -> Result<Self, ConfigError> {
        // An empty document is null in YAML; treat it as a file with no keys.
        let raw: RawSettings = if contents.trim().is_empty() {
            RawSettings::default()
        } else {
            serde_yaml::from_str(contents)?
        };

        let credential = required(raw.credential, "credential")?;
        let database_id = required(raw.database_id, "databaseId")?;

        let property = raw.property.unwrap_or_default();
        let properties = PropertySchema {
            title: required(property.title, "property.title")?,
            url: required(property.url, "property.url")?,
            author: required(property.author, "property.author")?,
        };

        let search = match (mode, raw.arxiv) {
            (RunMode::Discover, arxiv) => Some(search_spec(arxiv.unwrap_or_default())?),
            // Sync runs keep a well-formed section around but never fail on it.
            (RunMode::Sync, Some(arxiv)) => search_spec(arxiv).ok(),
            (RunMode::Sync, None) => None,
        };

        Ok(Self {
            credential,
            database_id,
            properties,
            search,
        })
    }

    /// Search parameters, required in discover mode.
    pub fn search(&self) -> Result<&SearchSpec, ConfigError> {
        self.search
            .as_ref()
            .ok_or(ConfigError::missing("arxiv.query"))
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("database_id", &self.database_id)
            .field("properties", &self.properties)
            .field("search", &self.search)
            .finish_non_exhaustive()
    }
}

fn required(value: Option<String>, key: &'static str) -> Result<String, ConfigError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::missing(key))
}

fn search_spec(raw: RawSearch) -> Result<SearchSpec, ConfigError> {
    let query = required(raw.query, "arxiv.query")?;
    let max_results = raw
        .max_results
        .ok_or(ConfigError::missing("arxiv.maxResults"))?;

    let max_results = usize::try_from(max_results)
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| {
            ConfigError::invalid(
                "arxiv.maxResults",
                format!("expected a positive integer, got {max_results}"),
            )
        })?;

    Ok(SearchSpec { query, max_results })
}

/// Remote endpoints and HTTP timeouts.
#[derive(Debug, Clone)]
pub struct Endpoints {
    /// Base URL for the Notion API (for testing with mock servers).
    pub notion_api_url: String,

    /// Value of the `Notion-Version` header.
    pub notion_version: String,

    /// Base URL for the arXiv API (for testing with mock servers).
    pub arxiv_api_url: String,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,
}

impl Endpoints {
    /// Create a test configuration with custom URLs for mock servers.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            notion_api_url: format!("{}/v1", base_url),
            notion_version: api::NOTION_VERSION.to_string(),
            arxiv_api_url: format!("{}/api", base_url),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            notion_api_url: api::NOTION_API.to_string(),
            notion_version: api::NOTION_VERSION.to_string(),
            arxiv_api_url: api::ARXIV_API.to_string(),
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
        }
    }
}
