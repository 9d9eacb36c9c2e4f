//! Notion API request and response shapes.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Response of `POST /databases/{id}/query`.
#[derive(Debug, Deserialize)]
pub(super) struct QueryResponse {
    #[serde(default)]
    pub results: Vec<Page>,

    #[serde(default)]
    pub has_more: bool,
}

/// Request body of `POST /databases/{id}/query`.
#[derive(Debug, Serialize)]
pub(super) struct QueryRequest {
    pub page_size: u32,
}

/// A database row.
#[derive(Debug, Deserialize)]
pub(super) struct Page {
    pub id: String,

    #[serde(default)]
    pub properties: HashMap<String, PropertyValue>,
}

/// The property types the sync reads. Everything else is `Other`.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(super) enum PropertyValue {
    Title {
        #[serde(default)]
        title: Vec<RichText>,
    },
    Url {
        #[serde(default)]
        url: Option<String>,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
pub(super) struct RichText {
    #[serde(default)]
    pub plain_text: String,
}

impl Page {
    /// Plain text of the title property, `None` if absent or empty.
    pub fn title(&self, key: &str) -> Option<String> {
        match self.properties.get(key)? {
            PropertyValue::Title { title } => {
                let text: String = title.iter().map(|t| t.plain_text.as_str()).collect();
                let text = text.trim();
                (!text.is_empty()).then(|| text.to_string())
            }
            _ => None,
        }
    }

    /// Value of the url property, `None` if absent or null.
    pub fn url(&self, key: &str) -> Option<String> {
        match self.properties.get(key)? {
            PropertyValue::Url { url } => url.clone().filter(|u| !u.trim().is_empty()),
            _ => None,
        }
    }
}

/// Body of `PATCH /pages/{id}` re-asserting the title and replacing the authors.
pub(super) fn author_patch(
    title_key: &str,
    author_key: &str,
    title: &str,
    authors: &[String],
) -> Value {
    let mut tags: Vec<Value> = Vec::with_capacity(authors.len());
    let mut seen = std::collections::HashSet::new();

    for author in authors {
        let name = tag_name(author);
        if !name.is_empty() && seen.insert(name.clone()) {
            tags.push(json!({ "name": name }));
        }
    }

    json!({
        "properties": {
            title_key: {
                "title": [{ "text": { "content": title } }]
            },
            author_key: {
                "multi_select": tags
            }
        }
    })
}

/// Notion rejects commas in select option names.
fn tag_name(author: &str) -> String {
    author
        .replace(',', "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
