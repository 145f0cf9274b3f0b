use async_trait::async_trait;

use crate::errors::Result;
use crate::participants::participants_model::{
    Beneficiary, BeneficiaryUpdate, Employee, NewBeneficiary, NewEmployee,
};

/// Maintains the participant roster: employees and the beneficiaries they
/// sponsor.
#[async_trait]
pub trait ParticipantServiceTrait: Send + Sync {
    async fn create_employee(&self, new_employee: NewEmployee) -> Result<Employee>;

    async fn get_employee_by_badge(&self, badge_number: i32) -> Result<Employee>;

    async fn get_active_employees(&self) -> Result<Vec<Employee>>;

    /// Creates a beneficiary, enforcing that active beneficiary percentages
    /// for the sponsoring badge never total more than 100.
    async fn create_beneficiary(&self, new_beneficiary: NewBeneficiary) -> Result<Beneficiary>;

    /// Updates a beneficiary under the same percentage-total invariant.
    async fn update_beneficiary(&self, update: BeneficiaryUpdate) -> Result<Beneficiary>;

    async fn get_active_beneficiaries(&self) -> Result<Vec<Beneficiary>>;
}
