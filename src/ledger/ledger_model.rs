use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::constants::DECIMAL_PRECISION;
use rust_decimal::RoundingStrategy;

use super::ledger_codes::{CommentType, ProfitCode, YearIteration};
use super::ledger_errors::LedgerError;

/// Domain model for one ledger posting ("profit detail" row).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProfitDetail {
    pub id: String,
    pub ssn: String,
    pub profit_year: i16,
    pub profit_code: ProfitCode,
    pub comment_type: CommentType,
    pub year_iteration: YearIteration,
    pub contribution: Decimal,
    pub earnings: Decimal,
    pub forfeiture: Decimal,
    /// Month marker used to reconstruct the originating contribution date.
    pub month_to_date: i16,
    /// Year marker used to reconstruct the originating contribution date.
    pub year_to_date: i16,
    pub is_supplemental: bool,
    pub remark: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input model for creating a new ledger posting
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProfitDetail {
    pub ssn: String,
    pub profit_year: i16,
    pub profit_code: ProfitCode,
    pub comment_type: CommentType,
    pub year_iteration: YearIteration,
    pub contribution: Decimal,
    pub earnings: Decimal,
    pub forfeiture: Decimal,
    pub month_to_date: i16,
    pub year_to_date: i16,
    pub is_supplemental: bool,
    pub remark: Option<String>,
}

impl NewProfitDetail {
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.ssn.trim().is_empty() {
            return Err(LedgerError::InvalidData(
                "SSN cannot be empty".to_string(),
            ));
        }
        if !(1..=12).contains(&self.month_to_date) {
            return Err(LedgerError::InvalidData(format!(
                "month_to_date must be 1-12, got {}",
                self.month_to_date
            )));
        }
        if self.profit_year <= 0 {
            return Err(LedgerError::InvalidData(format!(
                "profit_year must be positive, got {}",
                self.profit_year
            )));
        }
        Ok(())
    }
}

/// Database model for profit_details
#[derive(Queryable, Selectable, Identifiable, Insertable, AsChangeset, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::profit_details)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ProfitDetailDB {
    pub id: String,
    pub ssn: String,
    pub profit_year: i16,
    pub profit_code: i16,
    pub comment_type: i16,
    pub year_iteration: i16,
    pub contribution: String,
    pub earnings: String,
    pub forfeiture: String,
    pub month_to_date: i16,
    pub year_to_date: i16,
    pub is_supplemental: bool,
    pub remark: Option<String>,
    pub created_at: NaiveDateTime,
}

impl TryFrom<ProfitDetailDB> for ProfitDetail {
    type Error = LedgerError;

    fn try_from(db: ProfitDetailDB) -> Result<Self, Self::Error> {
        Ok(Self {
            profit_code: ProfitCode::from_i16(db.profit_code)?,
            comment_type: CommentType::from_i16(db.comment_type)?,
            year_iteration: YearIteration::from_i16(db.year_iteration)?,
            contribution: parse_amount(&db.contribution, "contribution")?,
            earnings: parse_amount(&db.earnings, "earnings")?,
            forfeiture: parse_amount(&db.forfeiture, "forfeiture")?,
            id: db.id,
            ssn: db.ssn,
            profit_year: db.profit_year,
            month_to_date: db.month_to_date,
            year_to_date: db.year_to_date,
            is_supplemental: db.is_supplemental,
            remark: db.remark,
            created_at: DateTime::from_naive_utc_and_offset(db.created_at, Utc),
        })
    }
}

impl ProfitDetailDB {
    pub fn from_new(id: String, new: NewProfitDetail, now: NaiveDateTime) -> Self {
        Self {
            id,
            ssn: new.ssn,
            profit_year: new.profit_year,
            profit_code: new.profit_code.as_i16(),
            comment_type: new.comment_type.as_i16(),
            year_iteration: new.year_iteration.as_i16(),
            contribution: store_amount(new.contribution),
            earnings: store_amount(new.earnings),
            forfeiture: store_amount(new.forfeiture),
            month_to_date: new.month_to_date,
            year_to_date: new.year_to_date,
            is_supplemental: new.is_supplemental,
            remark: new.remark,
            created_at: now,
        }
    }
}

/// Domain model for the per-(participant, plan year) snapshot row.
///
/// ETVA here is not independently owned data: it is a materialized function
/// of prior-year postings. All mutation goes through the repository's
/// adjustment routines.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PayProfit {
    pub id: String,
    pub ssn: String,
    pub profit_year: i16,
    pub etva: Decimal,
    pub closing_balance: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input model for seeding a snapshot (year-end close collaborator path)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPayProfit {
    pub ssn: String,
    pub profit_year: i16,
    pub etva: Decimal,
    pub closing_balance: Decimal,
}

/// Database model for pay_profits
#[derive(Queryable, Selectable, Identifiable, Insertable, AsChangeset, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::pay_profits)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PayProfitDB {
    pub id: String,
    pub ssn: String,
    pub profit_year: i16,
    pub etva: String,
    pub closing_balance: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<PayProfitDB> for PayProfit {
    type Error = LedgerError;

    fn try_from(db: PayProfitDB) -> Result<Self, Self::Error> {
        Ok(Self {
            etva: parse_amount(&db.etva, "etva")?,
            closing_balance: parse_amount(&db.closing_balance, "closing_balance")?,
            id: db.id,
            ssn: db.ssn,
            profit_year: db.profit_year,
            created_at: DateTime::from_naive_utc_and_offset(db.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(db.updated_at, Utc),
        })
    }
}

/// Formats a monetary amount for TEXT storage, normalized to 2 decimal places.
pub fn store_amount(amount: Decimal) -> String {
    amount
        .round_dp_with_strategy(DECIMAL_PRECISION, RoundingStrategy::MidpointAwayFromZero)
        .to_string()
}

fn parse_amount(raw: &str, column: &str) -> Result<Decimal, LedgerError> {
    Decimal::from_str(raw).map_err(|e| {
        LedgerError::InvalidData(format!("unparseable {} amount '{}': {}", column, raw, e))
    })
}
