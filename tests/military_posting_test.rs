use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

use profit_sharing_core::allocation::{
    AllocationError, MilitaryContributionRequest, MilitaryService, MilitaryServiceTrait,
    NoopObserver, ReversalService, ReversalServiceTrait, YearLockRegistry,
};
use profit_sharing_core::db::DbPool;
use profit_sharing_core::ledger::{CommentType, ProfitCode, YearIteration};
use profit_sharing_core::Error;

mod common;

fn military_service(pool: Arc<DbPool>) -> MilitaryService {
    MilitaryService::new(
        pool,
        Arc::new(YearLockRegistry::new()),
        Arc::new(NoopObserver),
    )
}

fn request(badge_number: i32, plan_year: i16, amount: Decimal) -> MilitaryContributionRequest {
    MilitaryContributionRequest {
        badge_number,
        plan_year,
        amount,
        contribution_date: NaiveDate::from_ymd_opt(plan_year as i32, 3, 15).unwrap(),
        is_supplemental: false,
        remark: None,
    }
}

#[tokio::test]
async fn posts_a_tagged_contribution_row() {
    let pool = common::setup_pool("military_posts_row");
    common::seed_employee(&pool, 100, "111-11-1111", "Alice Grant");

    let service = military_service(pool.clone());
    let record = service
        .post_contribution(request(100, 2024, dec!(750.50)))
        .await
        .unwrap();

    assert_eq!(record.badge_number, 100);
    assert_eq!(record.posting.ssn, "111-11-1111");
    assert_eq!(record.posting.contribution, dec!(750.50));
    assert_eq!(record.posting.earnings, Decimal::ZERO);
    assert_eq!(
        record.posting.profit_code,
        ProfitCode::IncomingContribution
    );
    assert_eq!(record.posting.comment_type, CommentType::Military);
    assert_eq!(record.posting.year_iteration, YearIteration::Military);
    assert_eq!(record.posting.month_to_date, 3);
    assert_eq!(record.posting.year_to_date, 2024);
    // With no caller-supplied remark, the row carries the comment label.
    assert_eq!(record.posting.remark.as_deref(), Some("Military"));
}

#[tokio::test]
async fn a_caller_supplied_remark_is_kept() {
    let pool = common::setup_pool("military_remark");
    common::seed_employee(&pool, 150, "123-45-6789", "Remy Stone");

    let service = military_service(pool);
    let mut req = request(150, 2024, dec!(250));
    req.remark = Some("USERRA make-up".to_string());
    let record = service.post_contribution(req).await.unwrap();
    assert_eq!(record.posting.remark.as_deref(), Some("USERRA make-up"));
}

#[tokio::test]
async fn second_posting_for_same_year_is_classified_as_duplicate() {
    let pool = common::setup_pool("military_duplicate");
    common::seed_employee(&pool, 200, "222-22-2222", "Ben Hale");

    let service = military_service(pool.clone());
    service
        .post_contribution(request(200, 2024, dec!(500)))
        .await
        .unwrap();

    let err = service
        .post_contribution(request(200, 2024, dec!(500)))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Allocation(AllocationError::DuplicateMilitaryPosting {
            badge_number: 200,
            plan_year: 2024,
        })
    ));

    // The failed posting left no row behind.
    let rows = common::postings_for_year(&pool, 2024);
    assert_eq!(rows.len(), 1);

    // A different plan year is not a duplicate.
    assert!(service
        .post_contribution(request(200, 2023, dec!(500)))
        .await
        .is_ok());
}

#[tokio::test]
async fn supplemental_postings_bypass_the_duplicate_rule() {
    let pool = common::setup_pool("military_supplemental");
    common::seed_employee(&pool, 300, "333-33-3333", "Cara Voss");

    let service = military_service(pool.clone());
    service
        .post_contribution(request(300, 2024, dec!(400)))
        .await
        .unwrap();

    let mut supplemental = request(300, 2024, dec!(150));
    supplemental.is_supplemental = true;
    service.post_contribution(supplemental).await.unwrap();

    assert_eq!(common::postings_for_year(&pool, 2024).len(), 2);
}

#[tokio::test]
async fn rejects_unknown_badge_and_bad_inputs() {
    let pool = common::setup_pool("military_validation");
    common::seed_employee(&pool, 400, "444-44-4444", "Dane Ruiz");

    let service = military_service(pool.clone());

    // Unknown badge.
    assert!(service
        .post_contribution(request(999, 2024, dec!(100)))
        .await
        .is_err());

    // Non-positive amount.
    assert!(service
        .post_contribution(request(400, 2024, Decimal::ZERO))
        .await
        .is_err());

    // Plan year before military posting was supported.
    assert!(service
        .post_contribution(request(400, 2019, dec!(100)))
        .await
        .is_err());

    assert!(common::postings_for_year(&pool, 2024).is_empty());
}

#[tokio::test]
async fn revert_sweeps_military_postings_for_the_year() {
    let pool = common::setup_pool("military_revert");
    common::seed_employee(&pool, 500, "555-55-5555", "Elle Park");

    let locks = Arc::new(YearLockRegistry::new());
    let observer = Arc::new(NoopObserver);
    let military = MilitaryService::new(pool.clone(), locks.clone(), observer.clone());
    let reversal = ReversalService::new(pool.clone(), locks, observer);

    military
        .post_contribution(request(500, 2024, dec!(600)))
        .await
        .unwrap();

    let result = reversal.revert(2024).await.unwrap();
    assert_eq!(result.employees_effected, 1);
    assert_eq!(result.postings_removed, 1);
    // Military rows carry no vested earnings, so no snapshot was touched.
    assert_eq!(result.etvas_effected, 0);

    assert!(common::postings_for_year(&pool, 2024).is_empty());
}
