// Module declarations
pub(crate) mod ledger_codes;
pub(crate) mod ledger_errors;
pub(crate) mod ledger_model;
pub(crate) mod ledger_repository;

// Re-export the public interface
pub use ledger_codes::{
    is_engine_reversible, CommentType, ProfitCode, YearIteration, ENGINE_REVERSIBLE_TAGS,
};
pub use ledger_model::{
    store_amount, NewPayProfit, NewProfitDetail, PayProfit, PayProfitDB, ProfitDetail,
    ProfitDetailDB,
};
pub use ledger_repository::LedgerRepository;

// Re-export error types for convenience
pub use ledger_errors::{LedgerError, Result};
