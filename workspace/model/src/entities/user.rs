use sea_orm::entity::prelude::*;

/// Represents a user of the system.
/// Authentication lives outside this service; only the identity that
/// authors transactions is stored here.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub email: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    // A user can author multiple transactions.
    #[sea_orm(has_many = "super::transaction::Entity")]
    Transaction,
    // A user can be a member of multiple households.
    #[sea_orm(has_many = "super::household_member::Entity")]
    HouseholdMember,
}

impl ActiveModelBehavior for ActiveModel {}
