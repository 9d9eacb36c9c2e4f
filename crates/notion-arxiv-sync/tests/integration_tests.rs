//! Integration tests against the live arXiv and Notion APIs.
//!
//! Run with: `cargo test --features integration -- --nocapture`
//!
//! The Notion test needs `NOTION_TOKEN` and `NOTION_DATABASE_ID` and is a
//! no-op without them.

#![cfg(feature = "integration")]

use notion_arxiv_sync::config::{Endpoints, PropertySchema};
use notion_arxiv_sync::identifier::extract_arxiv_id;
use notion_arxiv_sync::{ArxivClient, NotionClient};

/// "Attention Is All You Need" - Vaswani et al. 2017
const ATTENTION: &str = "1706.03762";

fn arxiv() -> ArxivClient {
    ArxivClient::new(&Endpoints::default()).expect("Failed to create client")
}

#[tokio::test]
async fn test_fetch_known_paper() {
    let entry = arxiv()
        .fetch_by_id(ATTENTION)
        .await
        .expect("Lookup should succeed");

    assert!(entry.id.starts_with(ATTENTION));
    assert!(entry.title.contains("Attention"));
    assert!(entry.authors.iter().any(|a| a == "Ashish Vaswani"));
    assert_eq!(entry.published_date(), "2017-06-12");
    assert_eq!(extract_arxiv_id(&entry.pdf_url), Some(ATTENTION));
}

#[tokio::test]
async fn test_fetch_unknown_paper_is_not_found() {
    let err = arxiv().fetch_by_id("0000.00000").await.unwrap_err();
    assert!(err.is_not_found(), "unexpected error: {err}");
}

#[tokio::test]
async fn test_search_newest_first() {
    let entries = arxiv()
        .search("cat:cs.LG", 5)
        .await
        .expect("Search should succeed");

    assert!(!entries.is_empty());
    assert!(entries.len() <= 5);
    let dates: Vec<_> = entries.iter().map(|e| e.published).collect();
    assert!(dates.is_sorted_by(|a, b| a >= b));
}

#[tokio::test]
async fn test_list_rows_from_configured_database() {
    let (Ok(token), Ok(database_id)) = (
        std::env::var("NOTION_TOKEN"),
        std::env::var("NOTION_DATABASE_ID"),
    ) else {
        eprintln!("NOTION_TOKEN / NOTION_DATABASE_ID not set, skipping");
        return;
    };

    let schema = PropertySchema {
        title: std::env::var("NOTION_TITLE_PROPERTY").unwrap_or_else(|_| "Name".to_string()),
        url: std::env::var("NOTION_URL_PROPERTY").unwrap_or_else(|_| "PDF".to_string()),
        author: "Authors".to_string(),
    };

    let client = NotionClient::new(&token, &Endpoints::default()).expect("valid token");
    let rows = client
        .list_rows(&database_id, &schema)
        .await
        .expect("Listing should succeed");

    for row in &rows {
        assert!(!row.title.is_empty());
        assert!(!row.url.is_empty());
    }
}
