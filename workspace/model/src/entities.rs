//! This file serves as the root for all SeaORM entity modules.
//! We define the data models for the household finance tracker here:
//! users grouped into households, their transactions, categories, and
//! monthly budgets.

pub mod budget;
pub mod category;
pub mod household;
pub mod household_member;
pub mod transaction;
pub mod user;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::budget::Entity as Budget;
    pub use super::category::Entity as Category;
    pub use super::household::Entity as Household;
    pub use super::household_member::Entity as HouseholdMember;
    pub use super::transaction::Entity as Transaction;
    pub use super::user::Entity as User;
}

#[cfg(test)]
mod test {
    use chrono::{NaiveDate, Utc};
    use migration::{Migrator, MigratorTrait};
    use rust_decimal::Decimal;
    use sea_orm::{
        ActiveModelTrait, ColumnTrait, ConnectionTrait, Database, DatabaseConnection, DbErr,
        EntityTrait, ModelTrait, QueryFilter, Set,
    };

    use super::*;
    use prelude::*;

    async fn setup_db() -> Result<DatabaseConnection, DbErr> {
        // Connect to the SQLite database
        let db = Database::connect("sqlite::memory:").await?;

        // Enable foreign keys
        db.execute_unprepared("PRAGMA foreign_keys = ON;").await?;

        // Try to apply migrations first
        Migrator::up(&db, None).await.expect("Migrations failed.");
        Ok(db)
    }

    #[tokio::test]
    async fn test_entity_integration() -> Result<(), DbErr> {
        let db = setup_db().await?;

        // Create users
        let user1 = user::ActiveModel {
            email: Set("anna@example.com".to_string()),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let user2 = user::ActiveModel {
            email: Set("ben@example.com".to_string()),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        // Create a household with both users as members
        let household = household::ActiveModel {
            name: Set("WG Sonnenallee".to_string()),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        for user_id in [user1.id, user2.id] {
            household_member::ActiveModel {
                household_id: Set(household.id),
                user_id: Set(user_id),
            }
            .insert(&db)
            .await?;
        }

        // Create categories
        let groceries = category::ActiveModel {
            household_id: Set(household.id),
            name: Set("groceries".to_string()),
            kind: Set(category::CategoryKind::Expense),
            color: Set("#FF6B6B".to_string()),
            icon: Set("basket".to_string()),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let salary = category::ActiveModel {
            household_id: Set(household.id),
            name: Set("salary".to_string()),
            kind: Set(category::CategoryKind::Income),
            color: Set("#52C41A".to_string()),
            icon: Set("cash".to_string()),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        // Create transactions, one per user
        let expense = transaction::ActiveModel {
            household_id: Set(household.id),
            user_id: Set(user1.id),
            kind: Set(transaction::TransactionKind::Expense),
            amount: Set(Decimal::new(5000, 2)), // 50.00
            description: Set("Weekly grocery run".to_string()),
            category_id: Set(Some(groceries.id)),
            date: Set(NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let income = transaction::ActiveModel {
            household_id: Set(household.id),
            user_id: Set(user2.id),
            kind: Set(transaction::TransactionKind::Income),
            amount: Set(Decimal::new(300000, 2)), // 3000.00
            description: Set("March salary".to_string()),
            category_id: Set(Some(salary.id)),
            date: Set(NaiveDate::from_ymd_opt(2025, 3, 25).unwrap()),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        // Create a budget for the month
        let budget = budget::ActiveModel {
            household_id: Set(household.id),
            month: Set("2025-03".to_string()),
            amount: Set(Decimal::new(80000, 2)), // 800.00
            ..Default::default()
        }
        .insert(&db)
        .await?;

        // Read back and verify data
        let members = HouseholdMember::find()
            .filter(household_member::Column::HouseholdId.eq(household.id))
            .all(&db)
            .await?;
        assert_eq!(members.len(), 2);

        let transactions = Transaction::find()
            .filter(transaction::Column::HouseholdId.eq(household.id))
            .all(&db)
            .await?;
        assert_eq!(transactions.len(), 2);
        assert!(transactions.iter().any(|t| t.id == expense.id
            && t.kind == transaction::TransactionKind::Expense
            && t.amount == Decimal::new(5000, 2)));
        assert!(transactions.iter().any(|t| t.id == income.id
            && t.kind == transaction::TransactionKind::Income));

        // A transaction carries its category via the Related impl
        let with_categories = Transaction::find()
            .find_also_related(Category)
            .filter(transaction::Column::Id.eq(expense.id))
            .all(&db)
            .await?;
        assert_eq!(with_categories.len(), 1);
        assert_eq!(
            with_categories[0].1.as_ref().map(|c| c.name.as_str()),
            Some("groceries")
        );

        let budgets = Budget::find()
            .filter(budget::Column::HouseholdId.eq(household.id))
            .all(&db)
            .await?;
        assert_eq!(budgets.len(), 1);
        assert_eq!(budgets[0].id, budget.id);
        assert_eq!(budgets[0].month, "2025-03");

        // Deleting a category detaches it from transactions instead of
        // deleting them (SetNull)
        groceries.delete(&db).await?;
        let orphaned = Transaction::find_by_id(expense.id).one(&db).await?.unwrap();
        assert_eq!(orphaned.category_id, None);

        Ok(())
    }
}
