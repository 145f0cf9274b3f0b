use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

use profit_sharing_core::allocation::{
    AllocationRequest, AllocationService, AllocationServiceTrait, NoopObserver, ReversalService,
    ReversalServiceTrait, YearLockRegistry,
};
use profit_sharing_core::db::DbPool;
use profit_sharing_core::ledger::ProfitCode;

mod common;

fn engine(pool: Arc<DbPool>) -> (AllocationService, ReversalService) {
    let locks = Arc::new(YearLockRegistry::new());
    let observer = Arc::new(NoopObserver);
    (
        AllocationService::new(pool.clone(), locks.clone(), observer.clone()),
        ReversalService::new(pool, locks, observer),
    )
}

#[tokio::test]
async fn revert_removes_postings_and_repairs_snapshots() {
    let pool = common::setup_pool("revert_repairs_etva");

    // Balance of 1000 earns 10 points; at 10 per point the run posts 100.
    common::seed_employee(&pool, 100, "111-11-1111", "Alice Grant");
    common::seed_manual_contribution(&pool, "111-11-1111", 2023, dec!(1000));

    // The reverted year's snapshot holds a stale ETVA; the following year's
    // snapshot absorbed the 100 of earnings at close.
    common::seed_snapshot(&pool, "111-11-1111", 2024, dec!(55));
    common::seed_snapshot(&pool, "111-11-1111", 2025, dec!(177));

    let (allocation, reversal) = engine(pool.clone());
    allocation
        .apply(AllocationRequest {
            plan_year: 2024,
            earnings_percent: dec!(10),
        })
        .await
        .unwrap();

    let result = reversal.revert(2024).await.unwrap();

    assert_eq!(result.employees_effected, 1);
    assert_eq!(result.beneficiaries_effected, 0);
    assert_eq!(result.postings_removed, 1);
    // Both the following year's adjustment and this year's reset rewrote a row.
    assert_eq!(result.etvas_effected, 2);

    assert_eq!(common::snapshot_etva(&pool, "111-11-1111", 2025), dec!(77));
    assert_eq!(
        common::snapshot_etva(&pool, "111-11-1111", 2024),
        Decimal::ZERO
    );

    // The earnings row is gone; the manually keyed contribution that built
    // the balance is untouched.
    assert!(common::postings_for_year(&pool, 2024).is_empty());
    assert_eq!(common::postings_for_year(&pool, 2023).len(), 1);
}

#[tokio::test]
async fn revert_counts_only_snapshots_actually_rewritten() {
    let pool = common::setup_pool("revert_counts_mutations");

    common::seed_employee(&pool, 200, "222-22-2222", "Ben Hale");
    common::seed_manual_contribution(&pool, "222-22-2222", 2023, dec!(1000));

    // The reverted year's ETVA is already zero, so only the following
    // year's snapshot gets rewritten.
    common::seed_snapshot(&pool, "222-22-2222", 2024, Decimal::ZERO);
    common::seed_snapshot(&pool, "222-22-2222", 2025, dec!(177));

    let (allocation, reversal) = engine(pool.clone());
    allocation
        .apply(AllocationRequest {
            plan_year: 2024,
            earnings_percent: dec!(10),
        })
        .await
        .unwrap();

    let result = reversal.revert(2024).await.unwrap();

    assert_eq!(result.etvas_effected, 1);
    assert_eq!(common::snapshot_etva(&pool, "222-22-2222", 2025), dec!(77));
}

#[tokio::test]
async fn revert_without_snapshots_still_removes_postings() {
    let pool = common::setup_pool("revert_no_snapshots");

    common::seed_employee(&pool, 300, "333-33-3333", "Cara Voss");
    common::seed_manual_contribution(&pool, "333-33-3333", 2023, dec!(2500));

    let (allocation, reversal) = engine(pool.clone());
    allocation
        .apply(AllocationRequest {
            plan_year: 2024,
            earnings_percent: dec!(8),
        })
        .await
        .unwrap();

    let result = reversal.revert(2024).await.unwrap();

    assert_eq!(result.employees_effected, 1);
    assert_eq!(result.postings_removed, 1);
    assert_eq!(result.etvas_effected, 0);
}

#[tokio::test]
async fn revert_of_untouched_year_is_a_no_op() {
    let pool = common::setup_pool("revert_noop");

    common::seed_employee(&pool, 400, "444-44-4444", "Dane Ruiz");
    common::seed_manual_contribution(&pool, "444-44-4444", 2023, dec!(1000));
    common::seed_snapshot(&pool, "444-44-4444", 2024, dec!(90));

    let (_, reversal) = engine(pool.clone());
    let result = reversal.revert(2024).await.unwrap();

    assert_eq!(result.employees_effected, 0);
    assert_eq!(result.beneficiaries_effected, 0);
    assert_eq!(result.etvas_effected, 0);
    assert_eq!(result.postings_removed, 0);

    // Snapshots are untouched when there is nothing to undo.
    assert_eq!(common::snapshot_etva(&pool, "444-44-4444", 2024), dec!(90));
}

#[tokio::test]
async fn apply_then_revert_leaves_no_vested_earnings_rows() {
    let pool = common::setup_pool("apply_revert_clean");

    common::seed_employee(&pool, 500, "555-55-5555", "Elle Park");
    common::seed_manual_contribution(&pool, "555-55-5555", 2022, dec!(4200));
    common::seed_beneficiary(&pool, 500, "666-66-6666", dec!(100), "Finn Park");
    common::seed_manual_contribution(&pool, "666-66-6666", 2022, dec!(800));

    let (allocation, reversal) = engine(pool.clone());
    allocation
        .apply(AllocationRequest {
            plan_year: 2023,
            earnings_percent: dec!(12),
        })
        .await
        .unwrap();

    let result = reversal.revert(2023).await.unwrap();
    assert_eq!(result.employees_effected, 1);
    assert_eq!(result.beneficiaries_effected, 1);
    assert_eq!(result.postings_removed, 2);

    let leftovers: Vec<_> = common::postings_for_year(&pool, 2023)
        .into_iter()
        .filter(|p| p.profit_code == ProfitCode::Incoming100PercentVestedEarnings)
        .collect();
    assert!(leftovers.is_empty());
}
