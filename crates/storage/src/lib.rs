pub mod dto;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod store;

use std::sync::Arc;

use models::ColumnNames;
use store::RowStore;

pub use store::{MemoryStore, SheetsConfig, SheetsStore};

/// Handle to the participant sheet shared by every request.
#[derive(Clone)]
pub struct Spreadsheet {
    store: Arc<dyn RowStore>,
    columns: ColumnNames,
}

impl Spreadsheet {
    pub fn new(store: Arc<dyn RowStore>, columns: ColumnNames) -> Self {
        Self { store, columns }
    }

    pub fn store(&self) -> &dyn RowStore {
        self.store.as_ref()
    }

    pub fn columns(&self) -> &ColumnNames {
        &self.columns
    }
}
