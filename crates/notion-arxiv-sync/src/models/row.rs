//! Database rows and the title-keyed row index.

use std::collections::HashMap;

/// A database row that carries a PDF link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseRow {
    /// Opaque page ID assigned by Notion.
    pub row_id: String,

    /// Plain-text title.
    pub title: String,

    /// PDF link.
    pub url: String,
}

impl DatabaseRow {
    /// Create a row.
    #[must_use]
    pub fn new(
        row_id: impl Into<String>,
        title: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            row_id: row_id.into(),
            title: title.into(),
            url: url.into(),
        }
    }
}

/// Rows keyed by title, in the order titles were first seen.
///
/// Inserting a row whose title is already present replaces the earlier row
/// in place (last wins, first position kept).
#[derive(Debug, Clone, Default)]
pub struct RowIndex {
    rows: Vec<DatabaseRow>,
    by_title: HashMap<String, usize>,
}

impl RowIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a row, returning the row it replaced, if any.
    pub fn insert(&mut self, row: DatabaseRow) -> Option<DatabaseRow> {
        if let Some(&idx) = self.by_title.get(&row.title) {
            return Some(std::mem::replace(&mut self.rows[idx], row));
        }

        self.by_title.insert(row.title.clone(), self.rows.len());
        self.rows.push(row);
        None
    }

    /// Number of distinct titles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the index is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate rows in index order.
    pub fn iter(&self) -> std::slice::Iter<'_, DatabaseRow> {
        self.rows.iter()
    }
}

impl FromIterator<DatabaseRow> for RowIndex {
    fn from_iter<I: IntoIterator<Item = DatabaseRow>>(iter: I) -> Self {
        let mut index = Self::new();
        for row in iter {
            index.insert(row);
        }
        index
    }
}

impl IntoIterator for RowIndex {
    type Item = DatabaseRow;
    type IntoIter = std::vec::IntoIter<DatabaseRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a RowIndex {
    type Item = &'a DatabaseRow;
    type IntoIter = std::slice::Iter<'a, DatabaseRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
