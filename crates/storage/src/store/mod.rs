mod memory;
mod sheets;

use std::collections::HashMap;

use crate::error::Result;

pub use memory::MemoryStore;
pub use sheets::{DEFAULT_SHEETS_API_URL, SheetsConfig, SheetsStore};

/// A data row keyed by header cell.
pub type Record = HashMap<String, String>;

/// Row-level access to a single table whose first row is the header.
///
/// Row indices are 0-based and count data rows only. Every call goes straight
/// to the backing store; nothing is buffered, and failures are never retried.
#[async_trait::async_trait]
pub trait RowStore: Send + Sync {
    async fn header(&self) -> Result<Vec<String>>;

    async fn append(&self, fields: &[String]) -> Result<()>;

    async fn read_all(&self) -> Result<Vec<Record>>;

    /// First data row whose cell at `column` matches `value`.
    async fn find_row_index(&self, column: usize, value: &str) -> Result<Option<usize>>;

    async fn set_cell(&self, row: usize, column: usize, value: &str) -> Result<()>;
}

/// Cells are compared trimmed and ASCII case-insensitively.
pub(crate) fn cell_matches(cell: &str, value: &str) -> bool {
    cell.trim().eq_ignore_ascii_case(value.trim())
}

/// Remote sheets drop trailing blank cells, so short rows are padded.
pub(crate) fn to_records(header: &[String], rows: Vec<Vec<String>>) -> Vec<Record> {
    rows.into_iter()
        .map(|mut row| {
            row.resize(header.len(), String::new());
            header.iter().cloned().zip(row).collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_matches() {
        assert!(cell_matches("alice@example.com", "alice@example.com"));
        assert!(cell_matches(" Alice@Example.com ", "alice@example.com"));
        assert!(!cell_matches("alice@example.com", "bob@example.com"));
        assert!(!cell_matches("", "alice@example.com"));
    }

    #[test]
    fn test_to_records_pads_short_rows() {
        let header = vec!["name".to_string(), "email".to_string(), "won".to_string()];
        let records = to_records(
            &header,
            vec![
                vec!["Alice".to_string(), "alice@example.com".to_string()],
                vec![
                    "Bob".to_string(),
                    "bob@example.com".to_string(),
                    "yes".to_string(),
                ],
            ],
        );

        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["won"], "");
        assert_eq!(records[1]["won"], "yes");
        assert_eq!(records[1]["name"], "Bob");
    }
}
