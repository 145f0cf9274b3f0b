use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::allocation::allocation_errors::AllocationError;
use crate::constants::{MIN_MILITARY_PLAN_YEAR, MIN_PLAN_YEAR};
use crate::ledger::ProfitDetail;

/// Request to run the year-end 100%-vested earnings allocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationRequest {
    pub plan_year: i16,
    /// Earnings per allocation point, in dollars.
    pub earnings_percent: Decimal,
}

impl AllocationRequest {
    pub fn validate(&self) -> Result<(), AllocationError> {
        if self.plan_year < MIN_PLAN_YEAR {
            return Err(AllocationError::YearOutOfRange {
                plan_year: self.plan_year,
                min: MIN_PLAN_YEAR,
                max: i16::MAX,
            });
        }
        if self.earnings_percent <= Decimal::ZERO {
            return Err(AllocationError::InvalidPercent(
                self.earnings_percent.to_string(),
            ));
        }
        Ok(())
    }
}

/// Tallies reported after an allocation run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AllocationResult {
    pub beneficiaries_effected: u32,
    pub employees_effected: u32,
    /// Always zero for an apply run; snapshots are only repaired on revert.
    pub etvas_effected: u32,
    pub earnings_percent: Decimal,
}

/// Tallies reported after a reversal run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReversalResult {
    pub beneficiaries_effected: u32,
    pub employees_effected: u32,
    /// Distinct snapshot rows whose ETVA was actually rewritten.
    pub etvas_effected: u32,
    pub postings_removed: u32,
}

impl ReversalResult {
    pub fn empty() -> Self {
        Self {
            beneficiaries_effected: 0,
            employees_effected: 0,
            etvas_effected: 0,
            postings_removed: 0,
        }
    }
}

/// Request to post a military-service contribution for one employee.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MilitaryContributionRequest {
    pub badge_number: i32,
    pub plan_year: i16,
    pub amount: Decimal,
    pub contribution_date: NaiveDate,
    /// Supplemental postings are exempt from the one-per-year duplicate rule.
    pub is_supplemental: bool,
    pub remark: Option<String>,
}

impl MilitaryContributionRequest {
    pub fn validate(&self, today: NaiveDate, current_year: i16) -> Result<(), AllocationError> {
        if self.amount <= Decimal::ZERO {
            return Err(AllocationError::InvalidAmount(self.amount.to_string()));
        }
        if self.plan_year < MIN_MILITARY_PLAN_YEAR || self.plan_year > current_year {
            return Err(AllocationError::YearOutOfRange {
                plan_year: self.plan_year,
                min: MIN_MILITARY_PLAN_YEAR,
                max: current_year,
            });
        }
        if self.contribution_date > today {
            return Err(AllocationError::FutureDate(self.contribution_date));
        }
        Ok(())
    }
}

/// A posted military contribution, echoed back with the resolved employee.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MilitaryContributionRecord {
    pub badge_number: i32,
    pub posting: ProfitDetail,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn allocation_request_rejects_bad_inputs() {
        let bad_year = AllocationRequest {
            plan_year: 1940,
            earnings_percent: dec!(11),
        };
        assert!(matches!(
            bad_year.validate(),
            Err(AllocationError::YearOutOfRange { plan_year: 1940, .. })
        ));

        let bad_percent = AllocationRequest {
            plan_year: 2024,
            earnings_percent: Decimal::ZERO,
        };
        assert!(matches!(
            bad_percent.validate(),
            Err(AllocationError::InvalidPercent(_))
        ));
    }

    #[test]
    fn results_serialize_in_camel_case() {
        let result = AllocationResult {
            beneficiaries_effected: 2,
            employees_effected: 5,
            etvas_effected: 0,
            earnings_percent: dec!(11),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["beneficiariesEffected"], 2);
        assert_eq!(json["employeesEffected"], 5);
        assert_eq!(json["etvasEffected"], 0);
        assert!(json.get("earningsPercent").is_some());
    }

    #[test]
    fn military_request_bounds() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let base = MilitaryContributionRequest {
            badge_number: 123,
            plan_year: 2024,
            amount: dec!(500),
            contribution_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            is_supplemental: false,
            remark: None,
        };
        assert!(base.validate(today, 2025).is_ok());

        let mut early = base.clone();
        early.plan_year = 2019;
        assert!(matches!(
            early.validate(today, 2025),
            Err(AllocationError::YearOutOfRange { plan_year: 2019, .. })
        ));

        let mut future = base.clone();
        future.contribution_date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        assert!(matches!(
            future.validate(today, 2025),
            Err(AllocationError::FutureDate(_))
        ));

        let mut zero = base;
        zero.amount = Decimal::ZERO;
        assert!(matches!(
            zero.validate(today, 2025),
            Err(AllocationError::InvalidAmount(_))
        ));
    }
}
