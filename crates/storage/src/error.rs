use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Row store request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Row store returned {status}: {message}")]
    Remote { status: u16, message: String },

    #[error("Invalid row store URL: {0}")]
    InvalidUrl(String),

    #[error("Row {0} does not exist")]
    RowOutOfRange(usize),

    #[error("Sheet has no header row")]
    MissingHeader,

    #[error("Column '{0}' not found in sheet header")]
    MissingColumn(String),

    #[error("Email already registered: {0}")]
    DuplicateEmail(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    /// The sheet or its connection settings do not match what the service expects.
    /// Raised before anything is written.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            StorageError::MissingHeader
                | StorageError::MissingColumn(_)
                | StorageError::InvalidUrl(_)
        )
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, StorageError::DuplicateEmail(_))
    }
}
