//! Data models shared by the database adapter, the arXiv fetcher and the
//! orchestrator.
//!
//! Wire formats of the two remote APIs stay private to their client modules;
//! these are the normalized shapes passed between components.

mod paper;
mod row;

pub use paper::{ArxivEntry, DiscoveredPaper, PaperRecord};
pub use row::{DatabaseRow, RowIndex};
