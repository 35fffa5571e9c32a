//! Thin query wrappers for the aggregator's inputs.
//!
//! Each invocation re-issues its query from scratch; nothing here is a
//! continuation, so overlapping refreshes always see a canonical slice.

use common::{month_bounds, month_key};
use model::entities::{budget, category, transaction};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use tracing::{debug, instrument, trace};

use crate::error::{ComputeError, Result};
use crate::summary::CategorizedTransaction;

/// Gets all transactions of a household dated within the given month,
/// each joined with its optional category, ordered by date descending
/// with `created_at` as the same-date tie-break.
#[instrument(skip(db), fields(household_id = household_id, year = year, month = month))]
pub async fn monthly_transactions(
    db: &DatabaseConnection,
    household_id: i32,
    year: i32,
    month: u32,
) -> Result<Vec<CategorizedTransaction>> {
    let (first, last) = month_bounds(year, month)
        .ok_or_else(|| ComputeError::Month(format!("{year}-{month}")))?;

    trace!(
        "Getting transactions for household_id={} from {} to {}",
        household_id, first, last
    );

    let transactions = transaction::Entity::find()
        .find_also_related(category::Entity)
        .filter(
            Condition::all()
                .add(transaction::Column::HouseholdId.eq(household_id))
                .add(transaction::Column::Date.gte(first))
                .add(transaction::Column::Date.lte(last)),
        )
        .order_by_desc(transaction::Column::Date)
        .order_by_desc(transaction::Column::CreatedAt)
        .all(db)
        .await?;

    debug!(
        "Found {} transactions for household_id={} in {}",
        transactions.len(),
        household_id,
        month_key(year, month)
    );

    Ok(transactions)
}

/// Gets the budget row for a household and month, if one is set.
#[instrument(skip(db), fields(household_id = household_id, year = year, month = month))]
pub async fn budget_for_month(
    db: &DatabaseConnection,
    household_id: i32,
    year: i32,
    month: u32,
) -> Result<Option<budget::Model>> {
    let key = month_key(year, month);

    let budget = budget::Entity::find()
        .filter(
            Condition::all()
                .add(budget::Column::HouseholdId.eq(household_id))
                .add(budget::Column::Month.eq(key.as_str())),
        )
        .one(db)
        .await?;

    debug!(
        "Budget for household_id={} month={}: {:?}",
        household_id,
        key,
        budget.as_ref().map(|b| b.amount)
    );

    Ok(budget)
}
