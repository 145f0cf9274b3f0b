use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::allocation::allocation_errors::{AllocationError, Result};

/// Process-wide advisory locks, one per plan year.
///
/// Every engine operation that writes year-scoped rows takes this lock for
/// the duration of its transaction, so two runs against the same plan year
/// fail fast instead of interleaving. Different plan years proceed
/// concurrently.
#[derive(Debug, Default)]
pub struct YearLockRegistry {
    locks: DashMap<i16, ()>,
}

impl YearLockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attempts to claim the plan year, returning a guard that releases it on
    /// drop. Fails with `YearBusy` when another run already holds it.
    pub fn try_acquire(&self, plan_year: i16) -> Result<YearLockGuard<'_>> {
        match self.locks.entry(plan_year) {
            Entry::Occupied(_) => Err(AllocationError::YearBusy(plan_year)),
            Entry::Vacant(entry) => {
                entry.insert(());
                Ok(YearLockGuard {
                    registry: self,
                    plan_year,
                })
            }
        }
    }
}

/// RAII guard over one plan year's advisory lock.
#[derive(Debug)]
pub struct YearLockGuard<'a> {
    registry: &'a YearLockRegistry,
    plan_year: i16,
}

impl Drop for YearLockGuard<'_> {
    fn drop(&mut self) {
        self.registry.locks.remove(&self.plan_year);
    }
}
