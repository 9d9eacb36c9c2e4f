//! Paper records produced from arXiv metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A paper as returned by the arXiv API, normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArxivEntry {
    /// Versioned arXiv identifier (e.g., "2301.12345v2").
    pub id: String,

    /// Paper title, whitespace-collapsed.
    pub title: String,

    /// Author names in byline order.
    pub authors: Vec<String>,

    /// Abstract, whitespace-collapsed.
    pub summary: String,

    /// First submission timestamp.
    pub published: DateTime<Utc>,

    /// Link to the PDF.
    pub pdf_url: String,
}

impl ArxivEntry {
    /// Submission date as `YYYY-MM-DD`.
    #[must_use]
    pub fn published_date(&self) -> String {
        self.published.format("%Y-%m-%d").to_string()
    }
}

/// Resolved metadata for one database row.
///
/// Serializes with the field names used in the snapshot file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperRecord {
    /// Official arXiv title.
    pub title: String,

    /// Author names in byline order.
    pub authors: Vec<String>,

    /// Paper abstract.
    pub r#abstract: String,

    /// Notion page the metadata belongs to.
    #[serde(rename = "page_id")]
    pub row_id: String,
}

impl PaperRecord {
    /// Attach arXiv metadata to the row it was resolved for.
    #[must_use]
    pub fn from_entry(entry: ArxivEntry, row_id: impl Into<String>) -> Self {
        Self {
            title: entry.title,
            authors: entry.authors,
            r#abstract: entry.summary,
            row_id: row_id.into(),
        }
    }
}

/// One discover-mode result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveredPaper {
    /// 1-based position in the result list.
    pub sequence_number: usize,

    /// Paper title.
    pub title: String,

    /// Link to the PDF.
    pub pdf_url: String,

    /// Submission date (`YYYY-MM-DD`).
    pub published_date: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> ArxivEntry {
        ArxivEntry {
            id: "2301.12345v1".to_string(),
            title: "Paper X (official)".to_string(),
            authors: vec!["A. Smith".to_string(), "B. Lee".to_string()],
            summary: "We study X.".to_string(),
            published: "2023-01-29T18:59:59Z".parse().unwrap(),
            pdf_url: "http://arxiv.org/pdf/2301.12345v1".to_string(),
        }
    }

    #[test]
    fn test_published_date_format() {
        assert_eq!(entry().published_date(), "2023-01-29");
    }

    #[test]
    fn test_paper_record_snapshot_field_names() {
        let record = PaperRecord::from_entry(entry(), "page-1");
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["title"], "Paper X (official)");
        assert_eq!(value["abstract"], "We study X.");
        assert_eq!(value["page_id"], "page-1");
        assert_eq!(value["authors"][1], "B. Lee");
    }

    #[test]
    fn test_discovered_paper_is_camel_case() {
        let paper = DiscoveredPaper {
            sequence_number: 1,
            title: "T".to_string(),
            pdf_url: "http://arxiv.org/pdf/2401.00001v1".to_string(),
            published_date: "2024-01-01".to_string(),
        };
        let value = serde_json::to_value(&paper).unwrap();

        assert_eq!(value["sequenceNumber"], 1);
        assert_eq!(value["pdfUrl"], "http://arxiv.org/pdf/2401.00001v1");
        assert_eq!(value["publishedDate"], "2024-01-01");
    }
}
