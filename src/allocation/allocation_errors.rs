use chrono::NaiveDate;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AllocationError>;

/// Custom error type for allocation engine operations
#[derive(Debug, Error)]
pub enum AllocationError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Plan year {0} already has an allocation run in progress")]
    YearBusy(i16),

    #[error("Plan year {plan_year} is outside the supported range {min}..={max}")]
    YearOutOfRange { plan_year: i16, min: i16, max: i16 },

    #[error("Earnings percent must be positive, got {0}")]
    InvalidPercent(String),

    #[error("Contribution amount must be positive, got {0}")]
    InvalidAmount(String),

    #[error("Contribution date {0} is in the future")]
    FutureDate(NaiveDate),

    #[error(
        "A military contribution for badge {badge_number} in plan year {plan_year} already exists"
    )]
    DuplicateMilitaryPosting { badge_number: i32, plan_year: i16 },
}
