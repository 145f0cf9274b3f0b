use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::participants_constants::PAY_FREQUENCY_WEEKLY_EXECUTIVE;
use super::participants_errors::ParticipantError;

/// Domain model representing an employee participant
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    pub badge_number: i32,
    pub ssn: String,
    pub name: String,
    pub pay_frequency_id: i16,
    pub hire_date: Option<NaiveDate>,
    pub date_of_birth: Option<NaiveDate>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Employee {
    pub fn is_executive(&self) -> bool {
        self.pay_frequency_id == PAY_FREQUENCY_WEEKLY_EXECUTIVE
    }
}

/// Input model for creating a new employee
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    pub badge_number: i32,
    pub ssn: String,
    pub name: String,
    pub pay_frequency_id: i16,
    pub hire_date: Option<NaiveDate>,
    pub date_of_birth: Option<NaiveDate>,
}

impl NewEmployee {
    pub fn validate(&self) -> Result<(), ParticipantError> {
        if self.badge_number <= 0 {
            return Err(ParticipantError::InvalidData(
                "Badge number must be positive".to_string(),
            ));
        }
        if self.ssn.trim().is_empty() {
            return Err(ParticipantError::InvalidData(
                "SSN cannot be empty".to_string(),
            ));
        }
        if self.name.trim().is_empty() {
            return Err(ParticipantError::InvalidData(
                "Name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Database model for employees
#[derive(Queryable, Selectable, Identifiable, Insertable, AsChangeset, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::employees)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct EmployeeDB {
    pub id: String,
    pub badge_number: i32,
    pub ssn: String,
    pub name: String,
    pub pay_frequency_id: i16,
    pub hire_date: Option<NaiveDate>,
    pub date_of_birth: Option<NaiveDate>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<EmployeeDB> for Employee {
    fn from(db: EmployeeDB) -> Self {
        Self {
            id: db.id,
            badge_number: db.badge_number,
            ssn: db.ssn,
            name: db.name,
            pay_frequency_id: db.pay_frequency_id,
            hire_date: db.hire_date,
            date_of_birth: db.date_of_birth,
            is_active: db.is_active,
            created_at: DateTime::from_naive_utc_and_offset(db.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(db.updated_at, Utc),
        }
    }
}

/// Domain model representing a beneficiary participant
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Beneficiary {
    pub id: String,
    pub ssn: String,
    /// Badge number of the sponsoring employee.
    pub badge_number: i32,
    /// Share (0-100) of the sponsoring employee's balance.
    pub percent: Decimal,
    pub name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input model for creating a new beneficiary
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBeneficiary {
    pub ssn: String,
    pub badge_number: i32,
    pub percent: Decimal,
    pub name: String,
}

impl NewBeneficiary {
    pub fn validate(&self) -> Result<(), ParticipantError> {
        if self.ssn.trim().is_empty() {
            return Err(ParticipantError::InvalidData(
                "SSN cannot be empty".to_string(),
            ));
        }
        if self.badge_number <= 0 {
            return Err(ParticipantError::InvalidData(
                "Sponsoring badge number must be positive".to_string(),
            ));
        }
        if self.percent <= Decimal::ZERO || self.percent > Decimal::ONE_HUNDRED {
            return Err(ParticipantError::InvalidData(format!(
                "Percent must be in (0, 100], got {}",
                self.percent
            )));
        }
        Ok(())
    }
}

/// Input model for updating an existing beneficiary
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeneficiaryUpdate {
    pub id: String,
    pub percent: Decimal,
    pub name: String,
    pub is_active: bool,
}

/// Database model for beneficiaries
#[derive(Queryable, Selectable, Identifiable, Insertable, AsChangeset, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::beneficiaries)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BeneficiaryDB {
    pub id: String,
    pub ssn: String,
    pub badge_number: i32,
    pub percent: String,
    pub name: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<BeneficiaryDB> for Beneficiary {
    type Error = ParticipantError;

    fn try_from(db: BeneficiaryDB) -> Result<Self, Self::Error> {
        let percent = Decimal::from_str(&db.percent).map_err(|e| {
            ParticipantError::InvalidData(format!(
                "unparseable percent '{}' for beneficiary {}: {}",
                db.percent, db.id, e
            ))
        })?;
        Ok(Self {
            id: db.id,
            ssn: db.ssn,
            badge_number: db.badge_number,
            percent,
            name: db.name,
            is_active: db.is_active,
            created_at: DateTime::from_naive_utc_and_offset(db.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(db.updated_at, Utc),
        })
    }
}

/// A participant as seen by the allocation engine: identity plus the fields
/// that drive tallying and reporting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum Participant {
    Employee {
        badge_number: i32,
        ssn: String,
        is_executive: bool,
    },
    Beneficiary {
        badge_number: i32,
        ssn: String,
        percent: Decimal,
    },
}

impl Participant {
    pub fn ssn(&self) -> &str {
        match self {
            Participant::Employee { ssn, .. } => ssn,
            Participant::Beneficiary { ssn, .. } => ssn,
        }
    }

    pub fn is_employee(&self) -> bool {
        matches!(self, Participant::Employee { .. })
    }
}

/// One resolver result: a participant together with their current balance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EligibleParticipant {
    pub participant: Participant,
    pub current_balance: Decimal,
}
