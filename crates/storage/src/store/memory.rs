use tokio::sync::RwLock;

use super::{Record, RowStore, cell_matches, to_records};
use crate::error::{Result, StorageError};

#[derive(Debug, Default)]
struct Table {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// Process-local table with the same semantics as the remote sheet.
/// Backs local runs (`STORE_BACKEND=memory`) and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    table: RwLock<Table>,
}

impl MemoryStore {
    pub fn new<I, S>(header: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_rows(header, Vec::new())
    }

    pub fn with_rows<I, S>(header: I, rows: Vec<Vec<String>>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            table: RwLock::new(Table {
                header: header.into_iter().map(Into::into).collect(),
                rows,
            }),
        }
    }

    /// Snapshot of the data rows, header excluded.
    pub async fn rows(&self) -> Vec<Vec<String>> {
        self.table.read().await.rows.clone()
    }

    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait::async_trait]
impl RowStore for MemoryStore {
    async fn header(&self) -> Result<Vec<String>> {
        let table = self.table.read().await;
        if table.header.iter().all(|cell| cell.trim().is_empty()) {
            return Err(StorageError::MissingHeader);
        }
        Ok(table.header.clone())
    }

    async fn append(&self, fields: &[String]) -> Result<()> {
        self.table.write().await.rows.push(fields.to_vec());
        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<Record>> {
        let table = self.table.read().await;
        Ok(to_records(&table.header, table.rows.clone()))
    }

    async fn find_row_index(&self, column: usize, value: &str) -> Result<Option<usize>> {
        let table = self.table.read().await;
        Ok(table.rows.iter().position(|row| {
            row.get(column)
                .is_some_and(|cell| cell_matches(cell, value))
        }))
    }

    async fn set_cell(&self, row: usize, column: usize, value: &str) -> Result<()> {
        let mut table = self.table.write().await;
        let cells = table
            .rows
            .get_mut(row)
            .ok_or(StorageError::RowOutOfRange(row))?;

        if cells.len() <= column {
            cells.resize(column + 1, String::new());
        }
        cells[column] = value.to_string();
        Ok(())
    }
}
