//! In-memory document model.
//!
//! The assembler produces this, the DOCX renderer consumes it. Keeping the
//! two apart lets the table contents be checked without unpacking a file.

/// A table whose first row holds the column headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableBlock {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableBlock {
    pub fn new(header: &[&str], rows: Vec<Vec<String>>) -> Self {
        Self {
            header: header.iter().map(|h| h.to_string()).collect(),
            rows,
        }
    }

    /// Rows including the header row.
    pub fn row_count(&self) -> usize {
        self.rows.len() + 1
    }

    pub fn column_count(&self) -> usize {
        self.header.len()
    }

    /// Cell text by absolute position (row 0 is the header).
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        if row == 0 {
            return self.header.get(col).map(String::as_str);
        }
        self.rows.get(row - 1)?.get(col).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Centered document title.
    Title(String),
    Table(TableBlock),
    /// Empty paragraph separating sections.
    Spacer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanDocument {
    pub file_name: String,
    pub blocks: Vec<Block>,
}

impl PlanDocument {
    pub fn title(&self) -> Option<&str> {
        self.blocks.iter().find_map(|b| match b {
            Block::Title(t) => Some(t.as_str()),
            _ => None,
        })
    }

    pub fn tables(&self) -> impl Iterator<Item = &TableBlock> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Table(t) => Some(t),
            _ => None,
        })
    }

    /// The `index`-th table, zero based.
    pub fn table(&self, index: usize) -> Option<&TableBlock> {
        self.tables().nth(index)
    }
}
