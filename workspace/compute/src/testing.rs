//! Shared helpers for database-backed tests.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{NaiveDate, Utc};
use migration::{Migrator, MigratorTrait};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ConnectionTrait, Database, DatabaseConnection, DbErr, Set};

use model::entities::{budget, category, household, household_member, transaction, user};

pub type Result<T> = std::result::Result<T, DbErr>;

pub async fn setup_db() -> Result<DatabaseConnection> {
    // Connect to the SQLite database
    let db = Database::connect("sqlite::memory:").await?;

    // Enable foreign keys
    db.execute_unprepared("PRAGMA foreign_keys = ON;").await?;

    // Try to apply migrations first
    Migrator::up(&db, None).await.expect("Migrations failed.");
    Ok(db)
}

/// Creates a household with one member and returns both.
pub async fn seed_household(
    db: &DatabaseConnection,
) -> Result<(household::Model, user::Model)> {
    static SEED_ID: AtomicU64 = AtomicU64::new(0);
    let current_id = SEED_ID.fetch_add(1, Ordering::SeqCst);

    let user = user::ActiveModel {
        email: Set(format!("user_{current_id}@example.com")),
        ..Default::default()
    }
    .insert(db)
    .await?;

    let household = household::ActiveModel {
        name: Set(format!("Household {current_id}")),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    household_member::ActiveModel {
        household_id: Set(household.id),
        user_id: Set(user.id),
    }
    .insert(db)
    .await?;

    Ok((household, user))
}

pub async fn new_category(
    db: &DatabaseConnection,
    household_id: i32,
    name: &str,
    kind: category::CategoryKind,
    color: &str,
) -> Result<category::Model> {
    category::ActiveModel {
        household_id: Set(household_id),
        name: Set(name.to_string()),
        kind: Set(kind),
        color: Set(color.to_string()),
        icon: Set("pricetag".to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn new_transaction(
    db: &DatabaseConnection,
    household_id: i32,
    user_id: i32,
    kind: transaction::TransactionKind,
    amount_minor: i64,
    category_id: Option<i32>,
    date: NaiveDate,
) -> Result<transaction::Model> {
    transaction::ActiveModel {
        household_id: Set(household_id),
        user_id: Set(user_id),
        kind: Set(kind),
        amount: Set(Decimal::new(amount_minor, 2)),
        description: Set("test transaction".to_string()),
        category_id: Set(category_id),
        date: Set(date),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn new_budget(
    db: &DatabaseConnection,
    household_id: i32,
    month: &str,
    amount_minor: i64,
) -> Result<budget::Model> {
    budget::ActiveModel {
        household_id: Set(household_id),
        month: Set(month.to_string()),
        amount: Set(Decimal::new(amount_minor, 2)),
        ..Default::default()
    }
    .insert(db)
    .await
}
