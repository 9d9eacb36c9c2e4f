//! arXiv identifier extraction from PDF links.
//!
//! Only the modern `YYMM.NNNNN` form is recognized.

use std::sync::LazyLock;

use regex::Regex;

static ARXIV_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{4}\.\d{5}").expect("valid arXiv id pattern"));

/// Return the first `DDDD.DDDDD` substring of `url`, if any.
///
/// Version suffixes are not part of the match: `.../2301.12345v2` yields
/// `2301.12345`.
#[must_use]
pub fn extract_arxiv_id(url: &str) -> Option<&str> {
    ARXIV_ID.find(url).map(|m| m.as_str())
}

/// Canonical PDF link for an identifier (version suffix kept if present).
#[must_use]
pub fn pdf_url(arxiv_id: &str) -> String {
    format!("https://arxiv.org/pdf/{arxiv_id}")
}
