use crate::error::{Result, StorageError};
use crate::store::Record;

use super::{Participant, WinStatus};

/// Header names the service looks for in the sheet's first row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnNames {
    pub name: String,
    pub email: String,
    pub won: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            name: "name".to_string(),
            email: "email".to_string(),
            won: "won".to_string(),
        }
    }
}

impl ColumnNames {
    pub fn header(&self) -> Vec<String> {
        vec![self.name.clone(), self.email.clone(), self.won.clone()]
    }
}

/// A header cell and its 0-based position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub index: usize,
    pub header: String,
}

/// Column positions resolved against an actual header row.
///
/// Header cells are matched trimmed and ASCII case-insensitively, so a sheet
/// titled `Name | E-mail | Won` still works with `name`, `e-mail`, `won`.
/// The won-status column is optional here: registration never touches it,
/// and the status updater asks for it through [`ColumnLayout::require_won`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    pub name: Column,
    pub email: Column,
    won: Option<Column>,
    won_header: String,
}

impl ColumnLayout {
    pub fn resolve(header: &[String], names: &ColumnNames) -> Result<Self> {
        if header.iter().all(|cell| cell.trim().is_empty()) {
            return Err(StorageError::MissingHeader);
        }

        let name = find_column(header, &names.name)
            .ok_or_else(|| StorageError::MissingColumn(names.name.clone()))?;
        let email = find_column(header, &names.email)
            .ok_or_else(|| StorageError::MissingColumn(names.email.clone()))?;

        Ok(Self {
            name,
            email,
            won: find_column(header, &names.won),
            won_header: names.won.clone(),
        })
    }

    pub fn won(&self) -> Option<&Column> {
        self.won.as_ref()
    }

    pub fn require_won(&self) -> Result<&Column> {
        self.won
            .as_ref()
            .ok_or_else(|| StorageError::MissingColumn(self.won_header.clone()))
    }

    /// Cells for a freshly registered participant; the won-status cell stays blank.
    pub fn new_row(&self, name: &str, email: &str) -> Vec<String> {
        let width = self.name.index.max(self.email.index) + 1;
        let mut row = vec![String::new(); width];
        row[self.name.index] = name.to_string();
        row[self.email.index] = email.to_string();
        row
    }

    pub fn participant(&self, record: &Record) -> Participant {
        let cell = |column: &Column| {
            record
                .get(&column.header)
                .map(|value| value.trim().to_string())
                .unwrap_or_default()
        };

        Participant {
            name: cell(&self.name),
            email: cell(&self.email),
            status: self
                .won()
                .map(|column| WinStatus::from_cell(&cell(column)))
                .unwrap_or(WinStatus::NotWon),
        }
    }
}

fn find_column(header: &[String], wanted: &str) -> Option<Column> {
    header
        .iter()
        .position(|cell| cell.trim().eq_ignore_ascii_case(wanted.trim()))
        .map(|index| Column {
            index,
            header: header[index].clone(),
        })
}
