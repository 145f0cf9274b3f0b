use async_trait::async_trait;
use log::info;
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::allocation::allocation_calculator::compute_earnings;
use crate::allocation::allocation_model::{AllocationRequest, AllocationResult};
use crate::allocation::allocation_traits::{AllocationServiceTrait, PostingObserver};
use crate::allocation::year_lock::YearLockRegistry;
use crate::constants::MONTH_OF_YEAR_CLOSE;
use crate::db::{DbPool, DbTransactionExecutor};
use crate::errors::{Error, Result};
use crate::ledger::{
    CommentType, LedgerRepository, NewProfitDetail, ProfitCode, YearIteration,
};
use crate::participants::ParticipantRepository;

/// Year-end allocation engine: posts one 100%-vested earnings row per
/// eligible participant, all inside a single transaction.
pub struct AllocationService {
    pool: Arc<DbPool>,
    year_locks: Arc<YearLockRegistry>,
    observer: Arc<dyn PostingObserver>,
    ledger: LedgerRepository,
    participants: ParticipantRepository,
}

impl AllocationService {
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
impl AllocationServiceTrait for AllocationService {
    async fn apply(&self, request: AllocationRequest) -> Result<AllocationResult> {
        request.validate()?;

        let plan_year = request.plan_year;
        let earnings_percent = request.earnings_percent;
        let _year_guard = self.year_locks.try_acquire(plan_year)?;

        let ledger = self.ledger.clone();
        let participants = self.participants.clone();

        let result = self.pool.execute(move |conn| -> Result<AllocationResult> {
            let eligible = participants.resolve_eligible(conn, plan_year, &ledger)?;

            let mut employees_effected = 0u32;
            let mut beneficiaries_effected = 0u32;
            let mut postings = Vec::with_capacity(eligible.len());

            for candidate in eligible {
                let earnings = compute_earnings(candidate.current_balance, earnings_percent);
                // A balance too small to earn a point produces nothing worth
                // posting.
                if earnings == Decimal::ZERO {
                    continue;
                }

                if candidate.participant.is_employee() {
                    employees_effected += 1;
                } else {
                    beneficiaries_effected += 1;
                }

                postings.push(NewProfitDetail {
                    ssn: candidate.participant.ssn().to_string(),
                    profit_year: plan_year,
                    profit_code: ProfitCode::Incoming100PercentVestedEarnings,
                    comment_type: CommentType::OneHundredPercentEarnings,
                    year_iteration: YearIteration::Standard,
                    contribution: Decimal::ZERO,
                    earnings,
                    forfeiture: Decimal::ZERO,
                    month_to_date: MONTH_OF_YEAR_CLOSE,
                    year_to_date: plan_year,
                    is_supplemental: false,
                    remark: Some(
                        CommentType::OneHundredPercentEarnings.label().to_string(),
                    ),
                });
            }

            ledger.insert_postings(conn, postings).map_err(Error::from)?;

            Ok(AllocationResult {
                beneficiaries_effected,
                employees_effected,
                etvas_effected: 0,
                earnings_percent,
            })
        })?;

        info!(
            "Allocation for plan year {} posted earnings at {} per point: {} employees, {} beneficiaries",
            plan_year, earnings_percent, result.employees_effected, result.beneficiaries_effected
        );
        self.observer.allocation_applied(plan_year, &result);

        Ok(result)
    }
}
