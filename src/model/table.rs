//! Table grid types.
//!
//! A [`TableGrid`] is what a geometric table extractor hands over: every table
//! found in the document, in page order, as rows of normalized cell strings.

use serde::{Deserialize, Serialize};

use crate::parser::normalize_cell;

/// All tables of one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableGrid {
    /// Tables in document order
    pub tables: Vec<GridTable>,
}

impl TableGrid {
    /// Create an empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table.
    pub fn add_table(&mut self, table: GridTable) {
        self.tables.push(table);
    }

    /// Number of tables.
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Check if the grid has no tables.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Iterate over the tables.
    pub fn iter(&self) -> std::slice::Iter<'_, GridTable> {
        self.tables.iter()
    }
}

impl FromIterator<GridTable> for TableGrid {
    fn from_iter<I: IntoIterator<Item = GridTable>>(iter: I) -> Self {
        Self {
            tables: iter.into_iter().collect(),
        }
    }
}

/// One table: its identity on the page and its rows of cell text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GridTable {
    /// Zero-based page index
    #[serde(default)]
    pub page_index: usize,

    /// Zero-based table index within the page
    #[serde(default)]
    pub table_index: usize,

    /// Rows of cell strings
    pub rows: Vec<Vec<String>>,
}

impl GridTable {
    /// Create an empty table.
    pub fn new(page_index: usize, table_index: usize) -> Self {
        Self {
            page_index,
            table_index,
            rows: Vec::new(),
        }
    }

    /// Create a table from raw rows.
    ///
    /// Cells are normalized and rows with no content at all are dropped.
    pub fn from_rows<R, S>(page_index: usize, table_index: usize, rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = Self::new(page_index, table_index);
        for row in rows {
            table.add_row(row.into_iter().map(|c| normalize_cell(c.as_ref())).collect());
        }
        table
    }

    /// Add a row, skipping rows whose cells are all empty.
    pub fn add_row(&mut self, row: Vec<String>) {
        if row.iter().any(|c| !c.is_empty()) {
            self.rows.push(row);
        }
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Widest row in the table.
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(|r| r.len()).max().unwrap_or(0)
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Text of the first `n` rows joined with spaces, lowercased.
    pub fn preview(&self, n: usize) -> String {
        self.rows
            .iter()
            .take(n)
            .map(|row| row.join(" "))
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }

    /// Get plain text representation of the table.
    pub fn plain_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
