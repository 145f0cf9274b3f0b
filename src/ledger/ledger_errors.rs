use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Custom error type for ledger-store operations
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),
    #[error("Unknown {kind} value '{value}' in ledger row")]
    UnknownCode { kind: &'static str, value: i16 },
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl From<DieselError> for LedgerError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => LedgerError::NotFound("Record not found".to_string()),
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                LedgerError::DuplicateEntry(info.message().to_string())
            }
            _ => LedgerError::DatabaseError(err.to_string()),
        }
    }
}

impl LedgerError {
    /// Duplicate-key failures get a distinct user-facing classification;
    /// everything else is a generic persistence failure.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, LedgerError::DuplicateEntry(_))
    }
}
