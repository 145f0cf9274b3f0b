pub mod db;

pub mod allocation;
pub mod ledger;
pub mod participants;

pub mod constants;
pub mod errors;
pub mod schema;

pub use allocation::*;
pub use errors::{Error, Result};
