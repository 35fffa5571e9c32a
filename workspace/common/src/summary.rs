use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Aggregated budget-relevant spend for one category in one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategorySlice {
    /// Display name of the category, "Other" for uncategorized spend.
    pub category_name: String,
    /// Sum of budget-relevant expense amounts in this category.
    pub amount: Decimal,
    /// Display color carried from the category, a neutral gray for "Other".
    pub color: String,
    /// Share of the budget-relevant total, in percent. 0 when the
    /// budget-relevant total is 0 (never NaN).
    pub percentage: f64,
}

/// One day of the cumulative budget track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BudgetTrackPoint {
    /// Day of the month, 1-based.
    pub day: u32,
    /// Budget-relevant spend accumulated through this day inclusive.
    pub cumulative_spent: Decimal,
}

/// The aggregator's result for one household and month.
///
/// Invariants: `fixed_costs + budget_relevant_expenses == total_expenses`,
/// `net_balance == total_income - total_expenses`, the track is
/// non-decreasing and its last entry equals `budget_relevant_expenses`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MonthlySummary {
    /// Sum of all income transaction amounts.
    pub total_income: Decimal,
    /// Sum of all expense transaction amounts, fixed and budget-relevant.
    pub total_expenses: Decimal,
    /// Expenses whose category matched the fixed-cost keyword table.
    pub fixed_costs: Decimal,
    /// `total_expenses - fixed_costs`; counted against the monthly budget.
    pub budget_relevant_expenses: Decimal,
    /// `total_income - total_expenses`; fixed costs still count here.
    pub net_balance: Decimal,
    /// Budget-relevant spend grouped by category, sorted by amount
    /// descending (stable; ties keep first-encountered order).
    pub by_category: Vec<CategorySlice>,
    /// One entry per calendar day of the month.
    pub budget_track: Vec<BudgetTrackPoint>,
}

/// Dashboard payload: the monthly summary plus the stored budget and the
/// figures derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DashboardSummary {
    pub year: i32,
    pub month: u32,
    /// The stored budget for the month, 0 when none is set.
    pub monthly_budget: Decimal,
    /// `monthly_budget - budget_relevant_expenses`; negative when over.
    pub budget_remaining: Decimal,
    /// Budget-relevant spend as a share of the budget, in percent.
    /// 0 when no budget is set.
    pub budget_percentage: f64,
    pub summary: MonthlySummary,
}
