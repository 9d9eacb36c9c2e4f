//! Notion ⇄ arXiv paper metadata sync
//!
//! Reads paper rows (title + PDF link) from a Notion database, resolves each
//! link to an arXiv identifier, fetches the authoritative metadata from the
//! arXiv API, and writes the author list back as a multi-select property.
//! A discover mode searches arXiv directly and dumps recent papers to JSON.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use notion_arxiv_sync::config::{Endpoints, RunMode, Settings};
//! use notion_arxiv_sync::sync;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load("config.yaml", RunMode::Sync)?;
//!     let outcome =
//!         sync::run(RunMode::Sync, &settings, &Endpoints::default(), Path::new(".")).await?;
//!     println!("{outcome:?}");
//!     Ok(())
//! }
//! ```

pub mod arxiv;
pub mod config;
pub mod error;
pub mod identifier;
pub mod models;
pub mod notion;
pub mod snapshot;
pub mod sync;

pub use arxiv::{ArxivClient, MetadataSource};
pub use config::{Endpoints, RunMode, Settings};
pub use error::{ClientError, ConfigError, SyncError};
pub use notion::{NotionClient, PaperDatabase};
