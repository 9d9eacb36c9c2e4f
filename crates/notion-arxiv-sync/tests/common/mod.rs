//! Shared fixtures: canned Notion/arXiv payloads and in-memory fakes.
#![allow(dead_code)]

use std::collections::{BTreeSet, HashMap};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Value, json};

use notion_arxiv_sync::MetadataSource;
use notion_arxiv_sync::PaperDatabase;
use notion_arxiv_sync::config::{PropertySchema, SearchSpec, Settings};
use notion_arxiv_sync::error::{ClientError, ClientResult};
use notion_arxiv_sync::models::{ArxivEntry, DatabaseRow, RowIndex};

pub const DATABASE_ID: &str = "db123";
pub const TOKEN: &str = "secret_abc";

pub fn schema() -> PropertySchema {
    PropertySchema {
        title: "Name".to_string(),
        url: "PDF".to_string(),
        author: "Authors".to_string(),
    }
}

pub fn settings() -> Settings {
    Settings {
        credential: TOKEN.to_string(),
        database_id: DATABASE_ID.to_string(),
        properties: schema(),
        search: Some(SearchSpec {
            query: "cat:cs.LG".to_string(),
            max_results: 3,
        }),
    }
}

// =============================================================================
// Notion payloads
// =============================================================================

/// A database page with the three columns of [`schema`].
pub fn notion_page(id: &str, title: &str, url: Option<&str>) -> Value {
    json!({
        "object": "page",
        "id": id,
        "properties": {
            "Name": {
                "id": "title",
                "type": "title",
                "title": [{
                    "type": "text",
                    "text": {"content": title, "link": null},
                    "plain_text": title,
                    "href": null
                }]
            },
            "PDF": {"id": "%3DpdF", "type": "url", "url": url},
            "Authors": {
                "id": "au%3A",
                "type": "multi_select",
                "multi_select": [{"id": "1", "name": "Old Author", "color": "red"}]
            }
        }
    })
}

pub fn query_response(pages: Vec<Value>) -> Value {
    json!({
        "object": "list",
        "results": pages,
        "next_cursor": null,
        "has_more": false,
        "type": "page_or_database"
    })
}

// =============================================================================
// arXiv payloads
// =============================================================================

pub fn atom_entry(id: &str, title: &str, authors: &[&str], published: &str) -> String {
    let authors: String = authors
        .iter()
        .map(|a| format!("<author><name>{a}</name></author>"))
        .collect();
    format!(
        r#"<entry>
    <id>http://arxiv.org/abs/{id}v1</id>
    <updated>{published}</updated>
    <published>{published}</published>
    <title>{title}</title>
    <summary>Abstract of {title}.</summary>
    {authors}
    <link href="http://arxiv.org/abs/{id}v1" rel="alternate" type="text/html"/>
    <link title="pdf" href="http://arxiv.org/pdf/{id}v1" rel="related" type="application/pdf"/>
    <arxiv:primary_category xmlns:arxiv="http://arxiv.org/schemas/atom" term="cs.LG" scheme="http://arxiv.org/schemas/atom"/>
  </entry>"#
    )
}

pub fn atom_feed(entries: &[String]) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <link href="http://arxiv.org/api/query" rel="self" type="application/atom+xml"/>
  <title type="html">ArXiv Query</title>
  <id>http://arxiv.org/api/test</id>
  <updated>2024-01-01T00:00:00-05:00</updated>
  <opensearch:totalResults xmlns:opensearch="http://a9.com/-/spec/opensearch/1.1/">{}</opensearch:totalResults>
  {}
</feed>"#,
        entries.len(),
        entries.join("\n  ")
    )
}

pub fn entry(id: &str, title: &str, authors: &[&str], published: &str) -> ArxivEntry {
    ArxivEntry {
        id: format!("{id}v1"),
        title: title.to_string(),
        authors: authors.iter().map(|a| (*a).to_string()).collect(),
        summary: format!("Abstract of {title}."),
        published: published.parse().expect("rfc3339 timestamp"),
        pdf_url: format!("http://arxiv.org/pdf/{id}v1"),
    }
}

// =============================================================================
// In-memory fakes
// =============================================================================

/// Database whose author column is a tag set per row.
#[derive(Default)]
pub struct FakeDatabase {
    pub rows: Vec<DatabaseRow>,
    pub tags: Mutex<HashMap<String, BTreeSet<String>>>,
    pub writes: Mutex<Vec<String>>,
    pub fail_write_for: Option<String>,
}

impl FakeDatabase {
    pub fn new(rows: Vec<DatabaseRow>) -> Self {
        Self {
            rows,
            ..Self::default()
        }
    }

    pub fn with_tags(self, row_id: &str, tags: &[&str]) -> Self {
        self.tags
            .lock()
            .unwrap()
            .insert(
                row_id.to_string(),
                tags.iter().map(|t| (*t).to_string()).collect(),
            );
        self
    }

    pub fn tags_of(&self, row_id: &str) -> BTreeSet<String> {
        self.tags
            .lock()
            .unwrap()
            .get(row_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaperDatabase for FakeDatabase {
    async fn list_rows(
        &self,
        _database_id: &str,
        _schema: &PropertySchema,
    ) -> ClientResult<RowIndex> {
        Ok(self.rows.iter().cloned().collect())
    }

    async fn update_authors(
        &self,
        _database_id: &str,
        row_id: &str,
        _schema: &PropertySchema,
        _title: &str,
        authors: &[String],
    ) -> ClientResult<()> {
        if self.fail_write_for.as_deref() == Some(row_id) {
            return Err(ClientError::server(502, "bad gateway"));
        }
        self.writes.lock().unwrap().push(row_id.to_string());
        self.tags
            .lock()
            .unwrap()
            .insert(row_id.to_string(), authors.iter().cloned().collect());
        Ok(())
    }
}

/// Metadata source backed by a map; unknown ids are `NotFound`.
#[derive(Default)]
pub struct FakeSource {
    pub papers: HashMap<String, ArxivEntry>,
    pub search_results: Vec<ArxivEntry>,
    pub lookups: Mutex<Vec<String>>,
}

impl FakeSource {
    pub fn with_paper(mut self, arxiv_id: &str, entry: ArxivEntry) -> Self {
        self.papers.insert(arxiv_id.to_string(), entry);
        self
    }

    /// Register a paper published on 2023-01-01 under `arxiv_id`.
    pub fn with_entry(self, arxiv_id: &str, title: &str, authors: &[&str]) -> Self {
        let paper = entry(arxiv_id, title, authors, "2023-01-01T00:00:00Z");
        self.with_paper(arxiv_id, paper)
    }

    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl MetadataSource for FakeSource {
    async fn fetch_by_id(&self, arxiv_id: &str) -> ClientResult<ArxivEntry> {
        self.lookups.lock().unwrap().push(arxiv_id.to_string());
        self.papers
            .get(arxiv_id)
            .cloned()
            .ok_or_else(|| ClientError::not_found(format!("arXiv paper {arxiv_id}")))
    }

    async fn search(&self, _query: &str, max_results: usize) -> ClientResult<Vec<ArxivEntry>> {
        Ok(self
            .search_results
            .iter()
            .take(max_results)
            .cloned()
            .collect())
    }
}
