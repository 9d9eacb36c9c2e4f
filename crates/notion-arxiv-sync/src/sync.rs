//! Sync orchestration.
//!
//! Two flows, picked once per run by [`RunMode`]:
//!
//! - **Sync**: list rows → extract arXiv ids → fetch metadata one row at a
//!   time → write the snapshot → overwrite each resolved row's authors.
//! - **Discover**: search arXiv → write the result list. Notion is never
//!   contacted.
//!
//! A row whose link has no identifier, or whose lookup fails, is recorded in
//! the [`SyncReport`] and skipped; the run goes on. Listing rows, writing the
//! snapshot and writing a row back are fatal.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::arxiv::{self, ArxivClient, MetadataSource};
use crate::config::{Endpoints, RunMode, Settings, output};
use crate::error::{ClientError, SyncResult};
use crate::identifier::extract_arxiv_id;
use crate::models::{PaperRecord, RowIndex};
use crate::notion::{NotionClient, PaperDatabase};
use crate::snapshot;

/// Why a row was left out of the write-back.
#[derive(Debug)]
pub enum RowFailure {
    /// The link does not contain a `YYMM.NNNNN` identifier.
    NoIdentifier {
        /// Notion page ID.
        row_id: String,
        /// Database title.
        title: String,
        /// The link that was scanned.
        url: String,
    },

    /// arXiv lookup failed (no such paper, or a remote error).
    Lookup {
        /// Notion page ID.
        row_id: String,
        /// Database title.
        title: String,
        /// Identifier that was looked up.
        arxiv_id: String,
        /// Underlying error.
        error: ClientError,
    },
}

impl RowFailure {
    /// Notion page ID of the failed row.
    #[must_use]
    pub fn row_id(&self) -> &str {
        match self {
            Self::NoIdentifier { row_id, .. } | Self::Lookup { row_id, .. } => row_id,
        }
    }

    /// Database title of the failed row.
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::NoIdentifier { title, .. } | Self::Lookup { title, .. } => title,
        }
    }
}

/// Renders the reason only; the row is named by [`RowFailure::row_id`] and
/// [`RowFailure::title`].
impl fmt::Display for RowFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoIdentifier { url, .. } => write!(f, "no arXiv identifier in {url}"),
            Self::Lookup {
                arxiv_id, error, ..
            } => write!(f, "lookup of {arxiv_id} failed: {error}"),
        }
    }
}

/// Outcome of a sync run.
#[derive(Debug)]
pub struct SyncReport {
    /// Rows with a PDF link.
    pub rows: usize,

    /// Resolved rows, keyed by database title, in row order.
    pub resolved: Vec<(String, PaperRecord)>,

    /// Rows whose authors were written back.
    pub updated: usize,

    /// Rows left out, with the reason.
    pub failures: Vec<RowFailure>,

    /// Snapshot file written before the write-back.
    pub snapshot: PathBuf,
}

impl SyncReport {
    /// Whether every row was resolved and written.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Outcome of a discover run.
#[derive(Debug)]
pub struct DiscoverReport {
    /// Papers written.
    pub count: usize,

    /// Output file.
    pub output: PathBuf,
}

/// Result of [`run`].
#[derive(Debug)]
pub enum RunOutcome {
    /// Sync flow finished.
    Synced(SyncReport),
    /// Discover flow finished.
    Discovered(DiscoverReport),
}

/// Build the real clients and execute the flow selected by `mode`.
pub async fn run(
    mode: RunMode,
    settings: &Settings,
    endpoints: &Endpoints,
    output_dir: &Path,
) -> SyncResult<RunOutcome> {
    let source = ArxivClient::new(endpoints)?;

    match mode {
        RunMode::Sync => {
            let database = NotionClient::new(&settings.credential, endpoints)?;
            let report = run_sync(&database, &source, settings, output_dir).await?;
            Ok(RunOutcome::Synced(report))
        }
        RunMode::Discover => {
            let report = run_discover(&source, settings, output_dir).await?;
            Ok(RunOutcome::Discovered(report))
        }
    }
}

/// Sync flow: resolve every row against arXiv, snapshot, then write authors back.
pub async fn run_sync(
    database: &dyn PaperDatabase,
    source: &dyn MetadataSource,
    settings: &Settings,
    output_dir: &Path,
) -> SyncResult<SyncReport> {
    let schema = &settings.properties;
    let rows = database.list_rows(&settings.database_id, schema).await?;

    tracing::info!(
        rows = rows.len(),
        "Getting the paper information from arXiv"
    );
    let (resolved, failures) = resolve_rows(source, &rows).await;

    let snapshot =
        snapshot::write_snapshot(output_dir.join(output::SNAPSHOT_FILE), &resolved).await?;

    tracing::info!(
        rows = resolved.len(),
        "Updating the database with the author information"
    );
    let mut updated = 0;
    for (title, record) in &resolved {
        database
            .update_authors(
                &settings.database_id,
                &record.row_id,
                schema,
                title,
                &record.authors,
            )
            .await?;
        updated += 1;
    }

    let report = SyncReport {
        rows: rows.len(),
        resolved,
        updated,
        failures,
        snapshot,
    };

    tracing::info!(
        rows = report.rows,
        updated = report.updated,
        failed = report.failures.len(),
        "Sync finished"
    );

    Ok(report)
}

/// Look up every row in index order, one at a time.
///
/// Returns resolved records keyed by database title, plus the rows that
/// could not be resolved. Failures are only logged at debug; reporting them
/// is left to the caller.
pub async fn resolve_rows(
    source: &dyn MetadataSource,
    rows: &RowIndex,
) -> (Vec<(String, PaperRecord)>, Vec<RowFailure>) {
    let mut resolved = Vec::with_capacity(rows.len());
    let mut failures = Vec::new();

    for row in rows {
        let Some(arxiv_id) = extract_arxiv_id(&row.url) else {
            tracing::debug!(row_id = %row.row_id, url = %row.url, "No arXiv identifier in link");
            failures.push(RowFailure::NoIdentifier {
                row_id: row.row_id.clone(),
                title: row.title.clone(),
                url: row.url.clone(),
            });
            continue;
        };

        match source.fetch_by_id(arxiv_id).await {
            Ok(entry) => {
                tracing::debug!(
                    row_id = %row.row_id,
                    arxiv_id,
                    authors = entry.authors.len(),
                    "Resolved paper"
                );
                let record = PaperRecord::from_entry(entry, &row.row_id);
                resolved.push((row.title.clone(), record));
            }
            Err(error) => {
                tracing::debug!(row_id = %row.row_id, arxiv_id, %error, "Lookup failed");
                failures.push(RowFailure::Lookup {
                    row_id: row.row_id.clone(),
                    title: row.title.clone(),
                    arxiv_id: arxiv_id.to_string(),
                    error,
                });
            }
        }
    }

    (resolved, failures)
}

/// Discover flow: search arXiv and dump the numbered results.
pub async fn run_discover(
    source: &dyn MetadataSource,
    settings: &Settings,
    output_dir: &Path,
) -> SyncResult<DiscoverReport> {
    let search = settings.search()?;
    let papers = arxiv::discover(source, search).await?;

    let output =
        snapshot::write_discovered(output_dir.join(output::DISCOVER_FILE), &papers).await?;

    Ok(DiscoverReport {
        count: papers.len(),
        output,
    })
}
