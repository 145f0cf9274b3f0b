use diesel::result::Error as DieselError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ParticipantError>;

/// Custom error type for participant-related operations
#[derive(Debug, Error)]
pub enum ParticipantError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Employee with badge {0} not found")]
    EmployeeNotFound(i32),
    #[error("Beneficiary not found: {0}")]
    BeneficiaryNotFound(String),
    #[error("Beneficiary percentages for badge {badge_number} would total {total}, exceeding 100")]
    PercentExceeded { badge_number: i32, total: String },
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl From<DieselError> for ParticipantError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => {
                ParticipantError::DatabaseError("Record not found".to_string())
            }
            _ => ParticipantError::DatabaseError(err.to_string()),
        }
    }
}

impl From<crate::ledger::LedgerError> for ParticipantError {
    fn from(err: crate::ledger::LedgerError) -> Self {
        ParticipantError::DatabaseError(err.to_string())
    }
}
