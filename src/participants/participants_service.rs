use async_trait::async_trait;
use log::debug;
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::db::{get_connection, DbPool, DbTransactionExecutor};
use crate::errors::Result;
use crate::participants::participants_errors::ParticipantError;
use crate::participants::participants_model::*;
use crate::participants::participants_repository::ParticipantRepository;
use crate::participants::participants_traits::ParticipantServiceTrait;

/// Service for managing the participant roster.
pub struct ParticipantService {
    pool: Arc<DbPool>,
    repository: ParticipantRepository,
}

impl ParticipantService {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self {
            pool,
            repository: ParticipantRepository::new(),
        }
    }
}

#[async_trait]
impl ParticipantServiceTrait for ParticipantService {
    async fn create_employee(&self, new_employee: NewEmployee) -> Result<Employee> {
        let repository = self.repository.clone();
        self.pool
            .execute(move |conn| repository.create_employee(conn, new_employee))
    }

    async fn get_employee_by_badge(&self, badge_number: i32) -> Result<Employee> {
        let mut conn = get_connection(&self.pool)?;
        Ok(self.repository.get_employee_by_badge(&mut conn, badge_number)?)
    }

    async fn get_active_employees(&self) -> Result<Vec<Employee>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(self.repository.get_active_employees(&mut conn)?)
    }

    async fn create_beneficiary(&self, new_beneficiary: NewBeneficiary) -> Result<Beneficiary> {
        let repository = self.repository.clone();
        self.pool.execute(move |conn| {
            // The sponsoring employee must exist.
            repository.get_employee_by_badge(conn, new_beneficiary.badge_number)?;

            let existing =
                repository.active_percent_total(conn, new_beneficiary.badge_number, None)?;
            let total = existing + new_beneficiary.percent;
            if total > Decimal::ONE_HUNDRED {
                return Err(ParticipantError::PercentExceeded {
                    badge_number: new_beneficiary.badge_number,
                    total: total.to_string(),
                });
            }

            debug!(
                "Adding beneficiary for badge {} at {}%",
                new_beneficiary.badge_number, new_beneficiary.percent
            );
            repository.create_beneficiary(conn, new_beneficiary)
        })
    }

    async fn update_beneficiary(&self, update: BeneficiaryUpdate) -> Result<Beneficiary> {
        let repository = self.repository.clone();
        self.pool.execute(move |conn| {
            if update.percent <= Decimal::ZERO || update.percent > Decimal::ONE_HUNDRED {
                return Err(ParticipantError::InvalidData(format!(
                    "Percent must be in (0, 100], got {}",
                    update.percent
                )));
            }

            let current = repository.get_beneficiary_by_id(conn, &update.id)?;

            if update.is_active {
                let others = repository.active_percent_total(
                    conn,
                    current.badge_number,
                    Some(update.id.as_str()),
                )?;
                let total = others + update.percent;
                if total > Decimal::ONE_HUNDRED {
                    return Err(ParticipantError::PercentExceeded {
                        badge_number: current.badge_number,
                        total: total.to_string(),
                    });
                }
            }

            repository.update_beneficiary(conn, update)
        })
    }

    async fn get_active_beneficiaries(&self) -> Result<Vec<Beneficiary>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(self.repository.get_active_beneficiaries(&mut conn)?)
    }
}
