use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use rust_decimal::Decimal;
use std::collections::HashMap;
use uuid::Uuid;

use crate::ledger::ledger_codes::{is_engine_reversible, ProfitCode, ENGINE_REVERSIBLE_TAGS};
use crate::ledger::ledger_errors::{LedgerError, Result};
use crate::ledger::ledger_model::*;
use crate::schema::{pay_profits, profit_details};

/// Repository for the durable ledger: posting rows and year snapshots.
///
/// Methods operate on a caller-supplied connection so that one engine
/// invocation can compose several reads and writes into a single
/// transaction.
#[derive(Debug, Default, Clone)]
pub struct LedgerRepository;

impl LedgerRepository {
    pub fn new() -> Self {
        Self
    }

    /// Inserts one posting. Unique-constraint violations surface as
    /// `LedgerError::DuplicateEntry`.
    pub fn insert_posting(
        &self,
        conn: &mut SqliteConnection,
        new_posting: NewProfitDetail,
    ) -> Result<ProfitDetail> {
        new_posting.validate()?;

        let row = ProfitDetailDB::from_new(
            Uuid::new_v4().to_string(),
            new_posting,
            Utc::now().naive_utc(),
        );

        diesel::insert_into(profit_details::table)
            .values(&row)
            .get_result::<ProfitDetailDB>(conn)
            .map_err(LedgerError::from)
            .and_then(ProfitDetail::try_from)
    }

    /// Inserts a batch of postings, all-or-nothing when run inside the
    /// caller's transaction.
    pub fn insert_postings(
        &self,
        conn: &mut SqliteConnection,
        new_postings: Vec<NewProfitDetail>,
    ) -> Result<usize> {
        let now = Utc::now().naive_utc();
        let mut rows = Vec::with_capacity(new_postings.len());
        for posting in new_postings {
            posting.validate()?;
            rows.push(ProfitDetailDB::from_new(
                Uuid::new_v4().to_string(),
                posting,
                now,
            ));
        }

        diesel::insert_into(profit_details::table)
            .values(&rows)
            .execute(conn)
            .map_err(LedgerError::from)
    }

    /// Retrieves all postings for one plan year.
    pub fn postings_for_year(
        &self,
        conn: &mut SqliteConnection,
        plan_year: i16,
    ) -> Result<Vec<ProfitDetail>> {
        profit_details::table
            .filter(profit_details::profit_year.eq(plan_year))
            .order(profit_details::created_at.asc())
            .load::<ProfitDetailDB>(conn)
            .map_err(LedgerError::from)?
            .into_iter()
            .map(ProfitDetail::try_from)
            .collect()
    }

    /// Retrieves the plan year's postings that carry an engine-created tag
    /// pair and are therefore eligible for reversal.
    pub fn reversible_postings_for_year(
        &self,
        conn: &mut SqliteConnection,
        plan_year: i16,
    ) -> Result<Vec<ProfitDetail>> {
        let candidate_codes: Vec<i16> = ENGINE_REVERSIBLE_TAGS
            .iter()
            .map(|&(code, _)| code.as_i16())
            .collect();

        let rows = profit_details::table
            .filter(profit_details::profit_year.eq(plan_year))
            .filter(profit_details::profit_code.eq_any(candidate_codes))
            .load::<ProfitDetailDB>(conn)
            .map_err(LedgerError::from)?;

        // The code filter above is a superset; the tag-pair predicate is the
        // authority on what the engine may remove.
        rows.into_iter()
            .map(ProfitDetail::try_from)
            .filter(|parsed| match parsed {
                Ok(detail) => is_engine_reversible(detail.profit_code, detail.comment_type),
                Err(_) => true,
            })
            .collect()
    }

    /// Deletes the given posting rows, returning how many were removed.
    pub fn delete_postings(&self, conn: &mut SqliteConnection, ids: &[String]) -> Result<usize> {
        if ids.is_empty() {
            return Ok(0);
        }
        diesel::delete(profit_details::table.filter(profit_details::id.eq_any(ids)))
            .execute(conn)
            .map_err(LedgerError::from)
    }

    /// Aggregates each participant's net balance from ledger rows up to and
    /// including the given plan year.
    ///
    /// Forfeiture amounts on incoming-contribution rows are incoming
    /// forfeitures (they add); on every other code they are payments out of
    /// the plan (they subtract).
    pub fn net_balances_as_of(
        &self,
        conn: &mut SqliteConnection,
        plan_year: i16,
    ) -> Result<HashMap<String, Decimal>> {
        let rows = profit_details::table
            .filter(profit_details::profit_year.le(plan_year))
            .load::<ProfitDetailDB>(conn)
            .map_err(LedgerError::from)?;

        let mut balances: HashMap<String, Decimal> = HashMap::new();
        for row in rows {
            let detail = ProfitDetail::try_from(row)?;
            let signed_forfeiture = if detail.profit_code == ProfitCode::IncomingContribution {
                detail.forfeiture
            } else {
                -detail.forfeiture
            };
            let delta = detail.contribution + detail.earnings + signed_forfeiture;
            *balances.entry(detail.ssn).or_insert(Decimal::ZERO) += delta;
        }

        Ok(balances)
    }

    /// Retrieves the snapshot row for one (participant, plan year), if any.
    pub fn get_snapshot(
        &self,
        conn: &mut SqliteConnection,
        ssn: &str,
        plan_year: i16,
    ) -> Result<Option<PayProfit>> {
        pay_profits::table
            .filter(pay_profits::ssn.eq(ssn))
            .filter(pay_profits::profit_year.eq(plan_year))
            .first::<PayProfitDB>(conn)
            .optional()
            .map_err(LedgerError::from)?
            .map(PayProfit::try_from)
            .transpose()
    }

    /// Creates a snapshot row. Snapshots are normally produced by the
    /// year-end close collaborator; this path exists for that integration
    /// and for test seeding.
    pub fn create_snapshot(
        &self,
        conn: &mut SqliteConnection,
        new_snapshot: NewPayProfit,
    ) -> Result<PayProfit> {
        let now = Utc::now().naive_utc();
        let row = PayProfitDB {
            id: Uuid::new_v4().to_string(),
            ssn: new_snapshot.ssn,
            profit_year: new_snapshot.profit_year,
            etva: store_amount(new_snapshot.etva),
            closing_balance: store_amount(new_snapshot.closing_balance),
            created_at: now,
            updated_at: now,
        };

        diesel::insert_into(pay_profits::table)
            .values(&row)
            .get_result::<PayProfitDB>(conn)
            .map_err(LedgerError::from)
            .and_then(PayProfit::try_from)
    }

    /// Subtracts `delta` from the snapshot's ETVA. Returns whether a row was
    /// actually mutated. This is the single write path for derived ETVA
    /// arithmetic.
    pub fn adjust_snapshot_etva(
        &self,
        conn: &mut SqliteConnection,
        ssn: &str,
        plan_year: i16,
        delta: Decimal,
    ) -> Result<bool> {
        if delta == Decimal::ZERO {
            return Ok(false);
        }

        let Some(snapshot) = self.get_snapshot(conn, ssn, plan_year)? else {
            return Ok(false);
        };

        let updated = snapshot.etva - delta;
        diesel::update(pay_profits::table.find(&snapshot.id))
            .set((
                pay_profits::etva.eq(store_amount(updated)),
                pay_profits::updated_at.eq(Utc::now().naive_utc()),
            ))
            .execute(conn)
            .map_err(LedgerError::from)?;

        Ok(true)
    }

    /// Resets the snapshot's ETVA to the zero "limbo" value, signaling the
    /// year's close must be re-run before the value is trustworthy again.
    /// Returns whether a row was actually mutated.
    pub fn reset_snapshot_etva(
        &self,
        conn: &mut SqliteConnection,
        ssn: &str,
        plan_year: i16,
    ) -> Result<bool> {
        let Some(snapshot) = self.get_snapshot(conn, ssn, plan_year)? else {
            return Ok(false);
        };
        if snapshot.etva == Decimal::ZERO {
            return Ok(false);
        }

        diesel::update(pay_profits::table.find(&snapshot.id))
            .set((
                pay_profits::etva.eq(store_amount(Decimal::ZERO)),
                pay_profits::updated_at.eq(Utc::now().naive_utc()),
            ))
            .execute(conn)
            .map_err(LedgerError::from)?;

        Ok(true)
    }
}
