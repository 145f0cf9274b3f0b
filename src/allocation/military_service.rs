use async_trait::async_trait;
use chrono::{Datelike, Utc};
use log::info;
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::allocation::allocation_errors::AllocationError;
use crate::allocation::allocation_model::{
    MilitaryContributionRecord, MilitaryContributionRequest,
};
use crate::allocation::allocation_traits::{MilitaryServiceTrait, PostingObserver};
use crate::allocation::year_lock::YearLockRegistry;
use crate::db::{DbPool, DbTransactionExecutor};
use crate::errors::{Error, Result};
use crate::ledger::{CommentType, LedgerRepository, NewProfitDetail, ProfitCode, YearIteration};
use crate::participants::ParticipantRepository;

/// Poster for individual military-service contributions.
///
/// These are incoming-contribution rows tagged with the military provenance
/// pair, so the reversal engine can sweep them together with the plan year's
/// earnings rows.
pub struct MilitaryService {
    pool: Arc<DbPool>,
    year_locks: Arc<YearLockRegistry>,
    observer: Arc<dyn PostingObserver>,
    ledger: LedgerRepository,
    participants: ParticipantRepository,
}

impl MilitaryService {
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
impl MilitaryServiceTrait for MilitaryService {
    async fn post_contribution(
        &self,
        request: MilitaryContributionRequest,
    ) -> Result<MilitaryContributionRecord> {
        let today = Utc::now().date_naive();
        request.validate(today, today.year() as i16)?;

        let plan_year = request.plan_year;
        let badge_number = request.badge_number;
        let _year_guard = self.year_locks.try_acquire(plan_year)?;

        let ledger = self.ledger.clone();
        let participants = self.participants.clone();

        let outcome = self
            .pool
            .execute(move |conn| -> Result<MilitaryContributionRecord> {
                let employee = participants.get_employee_by_badge(conn, request.badge_number)?;

                let posting = ledger.insert_posting(
                    conn,
                    NewProfitDetail {
                        ssn: employee.ssn,
                        profit_year: request.plan_year,
                        profit_code: ProfitCode::IncomingContribution,
                        comment_type: CommentType::Military,
                        year_iteration: YearIteration::Military,
                        contribution: request.amount,
                        earnings: Decimal::ZERO,
                        forfeiture: Decimal::ZERO,
                        month_to_date: request.contribution_date.month() as i16,
                        year_to_date: request.contribution_date.year() as i16,
                        is_supplemental: request.is_supplemental,
                        remark: request
                            .remark
                            .or_else(|| Some(CommentType::Military.label().to_string())),
                    },
                )?;

                Ok(MilitaryContributionRecord {
                    badge_number: employee.badge_number,
                    posting,
                })
            });

        let record = match outcome {
            Ok(record) => record,
            // The partial unique index rejects a second non-supplemental
            // posting for the same (participant, plan year).
            Err(Error::Ledger(e)) if e.is_duplicate() => {
                return Err(AllocationError::DuplicateMilitaryPosting {
                    badge_number,
                    plan_year,
                }
                .into());
            }
            Err(e) => return Err(e),
        };

        info!(
            "Posted military contribution of {} for badge {} in plan year {}",
            record.posting.contribution, record.badge_number, plan_year
        );
        self.observer.military_posted(&record);

        Ok(record)
    }
}
