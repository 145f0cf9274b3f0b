#![allow(dead_code)]

use chrono::Local;
use rust_decimal::Decimal;
use std::sync::Arc;

use profit_sharing_core::db::{self, DbPool};
use profit_sharing_core::ledger::{
    CommentType, LedgerRepository, NewPayProfit, NewProfitDetail, PayProfit, ProfitCode,
    ProfitDetail, YearIteration,
};
use profit_sharing_core::participants::{
    Beneficiary, Employee, NewBeneficiary, NewEmployee, ParticipantRepository,
    PAY_FREQUENCY_WEEKLY,
};

pub fn get_test_db_path(test_id: &str) -> String {
    let now = Local::now();
    now.format(&format!("./tests/output/%Y%m%d/%H%M%S%.3f-{}/", test_id))
        .to_string()
}

/// Creates a fresh on-disk database for one test and returns its pool.
pub fn setup_pool(test_id: &str) -> Arc<DbPool> {
    let dir = get_test_db_path(test_id);
    let db_path = db::init(&dir).expect("Failed to initialize database");
    let pool = db::create_pool(&db_path).expect("Failed to create database pool");
    db::run_migrations(&pool).expect("Failed to run migrations");
    pool
}

pub fn seed_employee(pool: &DbPool, badge_number: i32, ssn: &str, name: &str) -> Employee {
    let mut conn = db::get_connection(pool).unwrap();
    ParticipantRepository::new()
        .create_employee(
            &mut conn,
            NewEmployee {
                badge_number,
                ssn: ssn.to_string(),
                name: name.to_string(),
                pay_frequency_id: PAY_FREQUENCY_WEEKLY,
                hire_date: None,
                date_of_birth: None,
            },
        )
        .expect("Failed to seed employee")
}

pub fn seed_beneficiary(
    pool: &DbPool,
    badge_number: i32,
    ssn: &str,
    percent: Decimal,
    name: &str,
) -> Beneficiary {
    let mut conn = db::get_connection(pool).unwrap();
    ParticipantRepository::new()
        .create_beneficiary(
            &mut conn,
            NewBeneficiary {
                ssn: ssn.to_string(),
                badge_number,
                percent,
                name: name.to_string(),
            },
        )
        .expect("Failed to seed beneficiary")
}

/// Seeds a manually keyed contribution row. These rows build a participant's
/// balance but carry a tag pair the reversal engine must never touch.
pub fn seed_manual_contribution(
    pool: &DbPool,
    ssn: &str,
    plan_year: i16,
    amount: Decimal,
) -> ProfitDetail {
    let mut conn = db::get_connection(pool).unwrap();
    LedgerRepository::new()
        .insert_posting(
            &mut conn,
            NewProfitDetail {
                ssn: ssn.to_string(),
                profit_year: plan_year,
                profit_code: ProfitCode::IncomingContribution,
                comment_type: CommentType::ManualAdjustment,
                year_iteration: YearIteration::Standard,
                contribution: amount,
                earnings: Decimal::ZERO,
                forfeiture: Decimal::ZERO,
                month_to_date: 12,
                year_to_date: plan_year,
                is_supplemental: false,
                remark: None,
            },
        )
        .expect("Failed to seed contribution")
}

pub fn seed_snapshot(pool: &DbPool, ssn: &str, plan_year: i16, etva: Decimal) -> PayProfit {
    let mut conn = db::get_connection(pool).unwrap();
    LedgerRepository::new()
        .create_snapshot(
            &mut conn,
            NewPayProfit {
                ssn: ssn.to_string(),
                profit_year: plan_year,
                etva,
                closing_balance: Decimal::ZERO,
            },
        )
        .expect("Failed to seed snapshot")
}

pub fn snapshot_etva(pool: &DbPool, ssn: &str, plan_year: i16) -> Decimal {
    let mut conn = db::get_connection(pool).unwrap();
    LedgerRepository::new()
        .get_snapshot(&mut conn, ssn, plan_year)
        .unwrap()
        .expect("Snapshot not found")
        .etva
}

pub fn postings_for_year(pool: &DbPool, plan_year: i16) -> Vec<ProfitDetail> {
    let mut conn = db::get_connection(pool).unwrap();
    LedgerRepository::new()
        .postings_for_year(&mut conn, plan_year)
        .unwrap()
}
