pub mod classify;
pub mod error;
pub mod fetch;
pub mod summary;

#[cfg(test)]
mod testing;

use chrono::{Datelike, NaiveDate};
use sea_orm::DatabaseConnection;

use classify::FixedCostClassifier;
pub use common::MonthlySummary;
use error::Result;
use summary::MonthlySummaryCalculator;

/// Returns the number of days in the given month using chrono, or `None`
/// when (year, month) is not a calendar month.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    // Validate the month itself, then take one day back from the first
    // day of the following month.
    NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };

    Some(next_first.pred_opt()?.day())
}

/// Returns a calculator backed by the built-in fixed-cost keyword table.
/// This is the configuration used by the dashboard.
pub fn default_calculator() -> MonthlySummaryCalculator {
    MonthlySummaryCalculator::new(FixedCostClassifier::built_in())
}

/// Fetches one month of a household's transactions and aggregates them.
///
/// Convenience path used by callers that do not inject their own
/// classification table. Fetch failures propagate; they are never folded
/// into a zeroed summary.
pub async fn monthly_summary(
    db: &DatabaseConnection,
    calculator: &MonthlySummaryCalculator,
    household_id: i32,
    year: i32,
    month: u32,
) -> Result<MonthlySummary> {
    let transactions = fetch::monthly_transactions(db, household_id, year, month).await?;
    calculator.compute(&transactions, year, month)
}
