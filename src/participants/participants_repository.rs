use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};
use std::str::FromStr;
use uuid::Uuid;

use crate::ledger::{store_amount, LedgerRepository};
use crate::participants::participants_errors::{ParticipantError, Result};
use crate::participants::participants_model::*;
use crate::schema::{beneficiaries, employees};

/// Repository for employees and beneficiaries.
///
/// Like the ledger repository, methods take a caller-supplied connection so
/// resolution and posting can share one transaction.
#[derive(Debug, Default, Clone)]
pub struct ParticipantRepository;

impl ParticipantRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn create_employee(
        &self,
        conn: &mut SqliteConnection,
        new_employee: NewEmployee,
    ) -> Result<Employee> {
        new_employee.validate()?;

        let now = Utc::now().naive_utc();
        let row = EmployeeDB {
            id: Uuid::new_v4().to_string(),
            badge_number: new_employee.badge_number,
            ssn: new_employee.ssn,
            name: new_employee.name,
            pay_frequency_id: new_employee.pay_frequency_id,
            hire_date: new_employee.hire_date,
            date_of_birth: new_employee.date_of_birth,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        let inserted = diesel::insert_into(employees::table)
            .values(&row)
            .get_result::<EmployeeDB>(conn)?;

        Ok(Employee::from(inserted))
    }

    pub fn get_employee_by_badge(
        &self,
        conn: &mut SqliteConnection,
        badge_number: i32,
    ) -> Result<Employee> {
        employees::table
            .filter(employees::badge_number.eq(badge_number))
            .first::<EmployeeDB>(conn)
            .optional()?
            .map(Employee::from)
            .ok_or(ParticipantError::EmployeeNotFound(badge_number))
    }

    pub fn get_active_employees(&self, conn: &mut SqliteConnection) -> Result<Vec<Employee>> {
        let rows = employees::table
            .filter(employees::is_active.eq(true))
            .order(employees::badge_number.asc())
            .load::<EmployeeDB>(conn)?;

        Ok(rows.into_iter().map(Employee::from).collect())
    }

    pub fn create_beneficiary(
        &self,
        conn: &mut SqliteConnection,
        new_beneficiary: NewBeneficiary,
    ) -> Result<Beneficiary> {
        new_beneficiary.validate()?;

        let now = Utc::now().naive_utc();
        let row = BeneficiaryDB {
            id: Uuid::new_v4().to_string(),
            ssn: new_beneficiary.ssn,
            badge_number: new_beneficiary.badge_number,
            percent: store_amount(new_beneficiary.percent),
            name: new_beneficiary.name,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        let inserted = diesel::insert_into(beneficiaries::table)
            .values(&row)
            .get_result::<BeneficiaryDB>(conn)?;

        Beneficiary::try_from(inserted)
    }

    pub fn update_beneficiary(
        &self,
        conn: &mut SqliteConnection,
        update: BeneficiaryUpdate,
    ) -> Result<Beneficiary> {
        let updated = diesel::update(beneficiaries::table.find(&update.id))
            .set((
                beneficiaries::percent.eq(store_amount(update.percent)),
                beneficiaries::name.eq(&update.name),
                beneficiaries::is_active.eq(update.is_active),
                beneficiaries::updated_at.eq(Utc::now().naive_utc()),
            ))
            .get_result::<BeneficiaryDB>(conn)
            .optional()?
            .ok_or_else(|| ParticipantError::BeneficiaryNotFound(update.id.clone()))?;

        Beneficiary::try_from(updated)
    }

    pub fn get_beneficiary_by_id(
        &self,
        conn: &mut SqliteConnection,
        beneficiary_id: &str,
    ) -> Result<Beneficiary> {
        beneficiaries::table
            .find(beneficiary_id)
            .first::<BeneficiaryDB>(conn)
            .optional()?
            .ok_or_else(|| ParticipantError::BeneficiaryNotFound(beneficiary_id.to_string()))
            .and_then(Beneficiary::try_from)
    }

    pub fn get_active_beneficiaries(&self, conn: &mut SqliteConnection) -> Result<Vec<Beneficiary>> {
        let rows = beneficiaries::table
            .filter(beneficiaries::is_active.eq(true))
            .order(beneficiaries::badge_number.asc())
            .load::<BeneficiaryDB>(conn)?;

        rows.into_iter().map(Beneficiary::try_from).collect()
    }

    /// Sum of active beneficiary percentages for one sponsoring badge,
    /// optionally excluding one beneficiary row (for updates).
    pub fn active_percent_total(
        &self,
        conn: &mut SqliteConnection,
        badge_number: i32,
        exclude_id: Option<&str>,
    ) -> Result<Decimal> {
        let rows: Vec<(String, String)> = beneficiaries::table
            .filter(beneficiaries::badge_number.eq(badge_number))
            .filter(beneficiaries::is_active.eq(true))
            .select((beneficiaries::id, beneficiaries::percent))
            .load(conn)?;

        let mut total = Decimal::ZERO;
        for (id, percent) in rows {
            if exclude_id == Some(id.as_str()) {
                continue;
            }
            total += Decimal::from_str(&percent).map_err(|e| {
                ParticipantError::InvalidData(format!(
                    "unparseable percent '{}' for beneficiary {}: {}",
                    percent, id, e
                ))
            })?;
        }
        Ok(total)
    }

    /// SSNs of every employee, active or not. Used to classify posting rows
    /// back to the participant kind that produced them.
    pub fn employee_ssn_set(&self, conn: &mut SqliteConnection) -> Result<HashSet<String>> {
        let ssns: Vec<String> = employees::table.select(employees::ssn).load(conn)?;
        Ok(ssns.into_iter().collect())
    }

    /// Resolves the participants eligible for a plan year's earnings run.
    ///
    /// Employees are resolved before beneficiaries, and a beneficiary whose
    /// SSN already appears as an employee is dropped so no SSN is posted
    /// twice. Participants with no balance (or a negative one) are excluded.
    pub fn resolve_eligible(
        &self,
        conn: &mut SqliteConnection,
        plan_year: i16,
        ledger: &LedgerRepository,
    ) -> Result<Vec<EligibleParticipant>> {
        let balances: HashMap<String, Decimal> = ledger.net_balances_as_of(conn, plan_year)?;

        let mut seen: HashSet<String> = HashSet::new();
        let mut eligible = Vec::new();

        for employee in self.get_active_employees(conn)? {
            let Some(&balance) = balances.get(&employee.ssn) else {
                continue;
            };
            if balance <= Decimal::ZERO {
                continue;
            }
            seen.insert(employee.ssn.clone());
            eligible.push(EligibleParticipant {
                participant: Participant::Employee {
                    badge_number: employee.badge_number,
                    is_executive: employee.is_executive(),
                    ssn: employee.ssn,
                },
                current_balance: balance,
            });
        }

        for beneficiary in self.get_active_beneficiaries(conn)? {
            if seen.contains(&beneficiary.ssn) {
                continue;
            }
            let Some(&balance) = balances.get(&beneficiary.ssn) else {
                continue;
            };
            if balance <= Decimal::ZERO {
                continue;
            }
            seen.insert(beneficiary.ssn.clone());
            eligible.push(EligibleParticipant {
                participant: Participant::Beneficiary {
                    badge_number: beneficiary.badge_number,
                    percent: beneficiary.percent,
                    ssn: beneficiary.ssn,
                },
                current_balance: balance,
            });
        }

        Ok(eligible)
    }
}
