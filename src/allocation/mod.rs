// Module declarations
pub(crate) mod allocation_calculator;
pub(crate) mod allocation_errors;
pub(crate) mod allocation_model;
pub(crate) mod allocation_service;
pub(crate) mod allocation_traits;
pub(crate) mod military_service;
pub(crate) mod reversal_service;
pub(crate) mod year_lock;

// Re-export the public interface
pub use allocation_calculator::{compute_earnings, earn_points};
pub use allocation_model::{
    AllocationRequest, AllocationResult, MilitaryContributionRecord, MilitaryContributionRequest,
    ReversalResult,
};
pub use allocation_service::AllocationService;
pub use allocation_traits::{
    AllocationServiceTrait, MilitaryServiceTrait, NoopObserver, PostingObserver,
    ReversalServiceTrait,
};
pub use military_service::MilitaryService;
pub use reversal_service::ReversalService;
pub use year_lock::{YearLockGuard, YearLockRegistry};

// Re-export error types for convenience
pub use allocation_errors::AllocationError;
