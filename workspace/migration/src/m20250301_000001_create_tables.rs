use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk_auto(Users::Id))
                    .col(string(Users::Email).unique_key())
                    .to_owned(),
            )
            .await?;

        // Create households table
        manager
            .create_table(
                Table::create()
                    .table(Households::Table)
                    .if_not_exists()
                    .col(pk_auto(Households::Id))
                    .col(string(Households::Name))
                    .col(timestamp_with_time_zone(Households::CreatedAt))
                    .to_owned(),
            )
            .await?;

        // Create household_members table (join table)
        manager
            .create_table(
                Table::create()
                    .table(HouseholdMembers::Table)
                    .if_not_exists()
                    .col(integer(HouseholdMembers::HouseholdId))
                    .col(integer(HouseholdMembers::UserId))
                    .primary_key(
                        Index::create()
                            .name("pk_household_members")
                            .col(HouseholdMembers::HouseholdId)
                            .col(HouseholdMembers::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_household_member_household")
                            .from(HouseholdMembers::Table, HouseholdMembers::HouseholdId)
                            .to(Households::Table, Households::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_household_member_user")
                            .from(HouseholdMembers::Table, HouseholdMembers::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create categories table
        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(pk_auto(Categories::Id))
                    .col(integer(Categories::HouseholdId))
                    .col(string(Categories::Name))
                    .col(string_len(Categories::Kind, 7))
                    .col(string(Categories::Color))
                    .col(string(Categories::Icon))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_category_household")
                            .from(Categories::Table, Categories::HouseholdId)
                            .to(Households::Table, Households::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Category names are unique within a household
        manager
            .create_index(
                Index::create()
                    .name("idx_categories_household_name")
                    .table(Categories::Table)
                    .col(Categories::HouseholdId)
                    .col(Categories::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Create transactions table
        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .if_not_exists()
                    .col(pk_auto(Transactions::Id))
                    .col(integer(Transactions::HouseholdId))
                    .col(integer(Transactions::UserId))
                    .col(string_len(Transactions::Kind, 7))
                    .col(decimal_len(Transactions::Amount, 16, 2))
                    .col(string(Transactions::Description))
                    .col(integer_null(Transactions::CategoryId))
                    .col(date(Transactions::Date))
                    .col(timestamp_with_time_zone(Transactions::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transaction_household")
                            .from(Transactions::Table, Transactions::HouseholdId)
                            .to(Households::Table, Households::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transaction_user")
                            .from(Transactions::Table, Transactions::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transaction_category")
                            .from(Transactions::Table, Transactions::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Monthly dashboard queries filter by household and date range
        manager
            .create_index(
                Index::create()
                    .name("idx_transactions_household_date")
                    .table(Transactions::Table)
                    .col(Transactions::HouseholdId)
                    .col(Transactions::Date)
                    .to_owned(),
            )
            .await?;

        // Create budgets table
        manager
            .create_table(
                Table::create()
                    .table(Budgets::Table)
                    .if_not_exists()
                    .col(pk_auto(Budgets::Id))
                    .col(integer(Budgets::HouseholdId))
                    .col(string_len(Budgets::Month, 7))
                    .col(decimal_len(Budgets::Amount, 16, 2))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_budget_household")
                            .from(Budgets::Table, Budgets::HouseholdId)
                            .to(Households::Table, Households::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One budget row per (household, month); backs the upsert
        manager
            .create_index(
                Index::create()
                    .name("idx_budgets_household_month")
                    .table(Budgets::Table)
                    .col(Budgets::HouseholdId)
                    .col(Budgets::Month)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Budgets::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Transactions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Categories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(HouseholdMembers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Households::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Email,
}

#[derive(DeriveIden)]
enum Households {
    Table,
    Id,
    Name,
    CreatedAt,
}

#[derive(DeriveIden)]
enum HouseholdMembers {
    Table,
    HouseholdId,
    UserId,
}

#[derive(DeriveIden)]
enum Categories {
    Table,
    Id,
    HouseholdId,
    Name,
    Kind,
    Color,
    Icon,
}

#[derive(DeriveIden)]
enum Transactions {
    Table,
    Id,
    HouseholdId,
    UserId,
    Kind,
    Amount,
    Description,
    CategoryId,
    Date,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Budgets {
    Table,
    Id,
    HouseholdId,
    Month,
    Amount,
}
