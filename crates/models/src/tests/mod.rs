use migration::MigratorTrait;
use sea_orm::DatabaseConnection;

use crate::db::{connect, DATABASE_URL};

/// Menu item table round trips
pub mod menu_item_tests;


/// Setup test database with migrations; `None` when no Postgres is reachable.
async fn setup_test_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    if !DATABASE_URL.starts_with("postgres") {
        eprintln!("skip: DATABASE_URL is not a postgres url");
        return None;
    }
    let db = match connect().await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("skip: cannot connect to db: {}", e);
            return None;
        }
    };
    if let Err(e) = migration::Migrator::up(&db, None).await {
        eprintln!("skip: migrate up failed: {}", e);
        return None;
    }
    Some(db)
}
