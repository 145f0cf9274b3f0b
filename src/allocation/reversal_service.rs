use async_trait::async_trait;
use log::info;
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::allocation::allocation_errors::AllocationError;
use crate::allocation::allocation_model::ReversalResult;
use crate::allocation::allocation_traits::{PostingObserver, ReversalServiceTrait};
use crate::allocation::year_lock::YearLockRegistry;
use crate::constants::MIN_PLAN_YEAR;
use crate::db::{DbPool, DbTransactionExecutor};
use crate::errors::{Error, Result};
use crate::ledger::{LedgerRepository, ProfitCode};
use crate::participants::ParticipantRepository;

/// Reversal engine: removes a plan year's engine-created postings and repairs
/// the snapshots derived from them.
pub struct ReversalService {
    pool: Arc<DbPool>,
    year_locks: Arc<YearLockRegistry>,
    observer: Arc<dyn PostingObserver>,
    ledger: LedgerRepository,
    participants: ParticipantRepository,
}

impl ReversalService {
    pub fn new(
        pool: Arc<DbPool>,
        year_locks: Arc<YearLockRegistry>,
        observer: Arc<dyn PostingObserver>,
    ) -> Self {
        Self {
            pool,
            year_locks,
            observer,
            ledger: LedgerRepository::new(),
            participants: ParticipantRepository::new(),
        }
    }
}

#[async_trait]
impl ReversalServiceTrait for ReversalService {
    async fn revert(&self, plan_year: i16) -> Result<ReversalResult> {
        if plan_year < MIN_PLAN_YEAR {
            return Err(AllocationError::YearOutOfRange {
                plan_year,
                min: MIN_PLAN_YEAR,
                max: i16::MAX,
            }
            .into());
        }

        let _year_guard = self.year_locks.try_acquire(plan_year)?;

        let ledger = self.ledger.clone();
        let participants = self.participants.clone();

        let result = self.pool.execute(move |conn| -> Result<ReversalResult> {
            let rows = ledger.reversible_postings_for_year(conn, plan_year)?;
            if rows.is_empty() {
                // Nothing to undo; report zero tallies without touching
                // any snapshot.
                return Ok(ReversalResult::empty());
            }

            let employee_ssns = participants.employee_ssn_set(conn)?;

            let mut seen: HashSet<&str> = HashSet::new();
            let mut employees_effected = 0u32;
            let mut beneficiaries_effected = 0u32;
            let mut earnings_by_ssn: HashMap<String, Decimal> = HashMap::new();

            for row in &rows {
                if seen.insert(row.ssn.as_str()) {
                    if employee_ssns.contains(&row.ssn) {
                        employees_effected += 1;
                    } else {
                        beneficiaries_effected += 1;
                    }
                }
                if row.profit_code == ProfitCode::Incoming100PercentVestedEarnings {
                    *earnings_by_ssn
                        .entry(row.ssn.clone())
                        .or_insert(Decimal::ZERO) += row.earnings;
                }
            }

            let ids: Vec<String> = rows.iter().map(|r| r.id.clone()).collect();
            let postings_removed = ledger.delete_postings(conn, &ids)? as u32;

            // The reverted earnings were folded into the following year's
            // ETVA at close; back them out, and drop this year's ETVA to
            // zero until the close is re-run.
            let mut etvas_effected = 0u32;
            for (ssn, reverted_earnings) in &earnings_by_ssn {
                if ledger.adjust_snapshot_etva(conn, ssn, plan_year + 1, *reverted_earnings)? {
                    etvas_effected += 1;
                }
                if ledger.reset_snapshot_etva(conn, ssn, plan_year)? {
                    etvas_effected += 1;
                }
            }

            Ok(ReversalResult {
                beneficiaries_effected,
                employees_effected,
                etvas_effected,
                postings_removed,
            })
        })?;

        info!(
            "Reverted plan year {}: removed {} postings, repaired {} snapshots",
            plan_year, result.postings_removed, result.etvas_effected
        );
        self.observer.allocation_reverted(plan_year, &result);

        Ok(result)
    }
}
