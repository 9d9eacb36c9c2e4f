//! Atom feed wire format returned by `export.arxiv.org/api/query`.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::ClientResult;
use crate::identifier;
use crate::models::ArxivEntry;

/// Marker in the `<id>` of the pseudo-entry arXiv returns for invalid queries.
const API_ERROR_ID: &str = "/api/errors";

#[derive(Debug, Deserialize)]
pub(super) struct Feed {
    #[serde(rename = "entry", default)]
    pub entries: Vec<RawEntry>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawEntry {
    #[serde(default)]
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    published: Option<String>,
    #[serde(rename = "author", default)]
    authors: Vec<RawAuthor>,
    #[serde(rename = "link", default)]
    links: Vec<RawLink>,
}

#[derive(Debug, Deserialize)]
struct RawAuthor {
    name: String,
}

#[derive(Debug, Deserialize)]
struct RawLink {
    #[serde(rename = "@href")]
    href: String,
    #[serde(rename = "@title", default)]
    title: Option<String>,
}

/// Parse an Atom response body.
pub(super) fn parse(xml: &str) -> ClientResult<Feed> {
    Ok(quick_xml::de::from_str(xml)?)
}

impl RawEntry {
    /// Message of an arXiv error pseudo-entry, if this is one.
    pub fn api_error(&self) -> Option<String> {
        self.id
            .contains(API_ERROR_ID)
            .then(|| collapse_whitespace(&self.summary))
    }

    /// Normalize into an [`ArxivEntry`].
    ///
    /// Entries without an `<id>` or a valid `<published>` date do not describe
    /// a paper; the error names the missing piece.
    pub fn into_entry(self) -> Result<ArxivEntry, String> {
        let id = match self.id.trim().rsplit_once("/abs/") {
            Some((_, id)) => id.to_string(),
            None if self.id.trim().is_empty() => return Err("entry without <id>".to_string()),
            None => self.id.trim().to_string(),
        };

        let published = self
            .published
            .as_deref()
            .ok_or_else(|| format!("entry {id} without <published>"))?;
        let published = DateTime::parse_from_rfc3339(published.trim())
            .map_err(|e| format!("entry {id} has a bad <published>: {e}"))?
            .with_timezone(&Utc);

        // Older feeds omit the titled pdf link.
        let pdf_url = self
            .links
            .iter()
            .find(|link| link.title.as_deref() == Some("pdf"))
            .map_or_else(|| identifier::pdf_url(&id), |link| link.href.clone());

        Ok(ArxivEntry {
            title: collapse_whitespace(&self.title),
            authors: self
                .authors
                .into_iter()
                .map(|a| collapse_whitespace(&a.name))
                .collect(),
            summary: collapse_whitespace(&self.summary),
            published,
            pdf_url,
            id,
        })
    }
}

/// arXiv hard-wraps titles and abstracts; fold every run of whitespace to one space.
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
