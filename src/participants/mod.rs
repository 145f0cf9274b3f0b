// Module declarations
pub(crate) mod participants_constants;
pub(crate) mod participants_errors;
pub(crate) mod participants_model;
pub(crate) mod participants_repository;
pub(crate) mod participants_service;
pub(crate) mod participants_traits;

// Re-export the public interface
pub use participants_constants::*;
pub use participants_model::{
    Beneficiary, BeneficiaryUpdate, EligibleParticipant, Employee, NewBeneficiary, NewEmployee,
    Participant,
};
pub use participants_repository::ParticipantRepository;
pub use participants_service::ParticipantService;
pub use participants_traits::ParticipantServiceTrait;

// Re-export error types for convenience
pub use participants_errors::ParticipantError;
