use profit_sharing_core::db;

mod common;

#[test]
fn init_creates_the_database_file() {
    let dir = common::get_test_db_path("db_init");
    let db_path = db::init(&dir).unwrap();
    assert!(std::path::Path::new(&db_path).exists());
}

#[test]
fn migrations_apply_cleanly_to_a_fresh_database() {
    let dir = common::get_test_db_path("db_migrations");
    let db_path = db::init(&dir).unwrap();
    let pool = db::create_pool(&db_path).unwrap();
    db::run_migrations(&pool).unwrap();
    // Re-running against the same database is a no-op, not an error.
    db::run_migrations(&pool).unwrap();
}
