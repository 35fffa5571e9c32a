//! Monthly summary computation.
//!
//! Pure aggregation over a household's transactions for one calendar
//! month, already fetched and joined with their categories. Produces the
//! totals, the per-category breakdown of budget-relevant spend, and the
//! day-by-day cumulative budget track consumed by the dashboard.

use std::collections::HashMap;

use chrono::Datelike;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::{debug, instrument};

use common::{BudgetTrackPoint, CategorySlice, MonthlySummary};
use model::entities::{category, transaction};

use crate::classify::FixedCostClassifier;
use crate::error::{ComputeError, Result};
use crate::days_in_month;

/// Display name for spend without a category.
pub const OTHER_CATEGORY_NAME: &str = "Other";
/// Neutral gray carried by the "Other" bucket.
pub const OTHER_CATEGORY_COLOR: &str = "#B0B0B0";

/// A transaction paired with its category, as returned by the fetch layer.
pub type CategorizedTransaction = (transaction::Model, Option<category::Model>);

/// Computes [`MonthlySummary`] values from categorized transactions.
///
/// The calculator owns no mutable state; every call recomputes from
/// scratch, so overlapping refresh triggers cannot corrupt each other.
#[derive(Debug, Clone, Default)]
pub struct MonthlySummaryCalculator {
    classifier: FixedCostClassifier,
}

impl MonthlySummaryCalculator {
    /// Creates a calculator with an injected classification table.
    pub fn new(classifier: FixedCostClassifier) -> Self {
        Self { classifier }
    }

    /// The classification table this calculator aggregates with.
    pub fn classifier(&self) -> &FixedCostClassifier {
        &self.classifier
    }

    /// Aggregates one month of transactions.
    ///
    /// Expects every transaction to be dated within the target month; a
    /// row outside it means the input was not the month slice it claims
    /// to be and the whole pass fails with [`ComputeError::OutOfRange`].
    #[instrument(skip(self, transactions), fields(num_transactions = transactions.len(), year, month))]
    pub fn compute(
        &self,
        transactions: &[CategorizedTransaction],
        year: i32,
        month: u32,
    ) -> Result<MonthlySummary> {
        let days = days_in_month(year, month)
            .ok_or_else(|| ComputeError::Month(format!("{year}-{month}")))?;

        let mut total_income = Decimal::ZERO;
        let mut total_expenses = Decimal::ZERO;
        let mut fixed_costs = Decimal::ZERO;

        // Breakdown groups keep first-encountered order so the later
        // descending stable sort has a deterministic tie-break.
        let mut slices: Vec<CategorySlice> = Vec::new();
        let mut slice_index: HashMap<String, usize> = HashMap::new();
        let mut daily_spend = vec![Decimal::ZERO; days as usize];

        for (tx, cat) in transactions {
            if tx.date.year() != year || tx.date.month() != month {
                return Err(ComputeError::OutOfRange(format!(
                    "transaction {} dated {} while aggregating {year}-{month:02}",
                    tx.id, tx.date
                )));
            }

            match tx.kind {
                transaction::TransactionKind::Income => {
                    // Income is never classified; it only feeds the total.
                    total_income += tx.amount;
                }
                transaction::TransactionKind::Expense => {
                    total_expenses += tx.amount;

                    let display_name = cat.as_ref().map(|c| c.name.as_str()).unwrap_or("");
                    if self.classifier.is_fixed_cost(display_name) {
                        fixed_costs += tx.amount;
                        continue;
                    }

                    // Budget-relevant: feeds the breakdown and the track.
                    let (key, name, color) = match cat {
                        Some(c) => (c.name.clone(), c.name.clone(), c.color.clone()),
                        None => (
                            "other".to_string(),
                            OTHER_CATEGORY_NAME.to_string(),
                            OTHER_CATEGORY_COLOR.to_string(),
                        ),
                    };
                    match slice_index.get(&key) {
                        Some(&i) => slices[i].amount += tx.amount,
                        None => {
                            slice_index.insert(key, slices.len());
                            slices.push(CategorySlice {
                                category_name: name,
                                amount: tx.amount,
                                color,
                                percentage: 0.0,
                            });
                        }
                    }

                    daily_spend[(tx.date.day() - 1) as usize] += tx.amount;
                }
            }
        }

        // Derived as the difference so the partition is exact by
        // construction: fixed + budget-relevant == total.
        let budget_relevant_expenses = total_expenses - fixed_costs;
        let net_balance = total_income - total_expenses;

        for slice in &mut slices {
            slice.percentage = share_percentage(slice.amount, budget_relevant_expenses);
        }
        // Stable sort: equal amounts keep their first-encountered order.
        slices.sort_by(|a, b| b.amount.cmp(&a.amount));

        let mut budget_track = Vec::with_capacity(days as usize);
        let mut cumulative = Decimal::ZERO;
        for (i, spent) in daily_spend.iter().enumerate() {
            cumulative += *spent;
            budget_track.push(BudgetTrackPoint {
                day: i as u32 + 1,
                cumulative_spent: cumulative,
            });
        }

        debug!(
            %total_income,
            %total_expenses,
            %fixed_costs,
            %budget_relevant_expenses,
            categories = slices.len(),
            "Computed monthly summary"
        );

        Ok(MonthlySummary {
            total_income,
            total_expenses,
            fixed_costs,
            budget_relevant_expenses,
            net_balance,
            by_category: slices,
            budget_track,
        })
    }
}

/// Percentage of `part` in `total`, with the fixed convention that a zero
/// total yields 0 rather than NaN or an error.
pub fn share_percentage(part: Decimal, total: Decimal) -> f64 {
    if total.is_zero() {
        return 0.0;
    }
    (part / total * Decimal::ONE_HUNDRED)
        .to_f64()
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};
    use rust_decimal::Decimal;

    use super::*;
    use model::entities::category::CategoryKind;
    use model::entities::transaction::TransactionKind;

    fn category(id: i32, name: &str, color: &str) -> category::Model {
        category::Model {
            id,
            household_id: 1,
            name: name.to_string(),
            kind: CategoryKind::Expense,
            color: color.to_string(),
            icon: "pricetag".to_string(),
        }
    }

    fn tx(
        id: i32,
        kind: TransactionKind,
        amount_minor: i64,
        date: NaiveDate,
        cat: Option<category::Model>,
    ) -> CategorizedTransaction {
        (
            transaction::Model {
                id,
                household_id: 1,
                user_id: 1,
                kind,
                amount: Decimal::new(amount_minor, 2),
                description: format!("tx {id}"),
                category_id: cat.as_ref().map(|c| c.id),
                date,
                created_at: Utc::now(),
            },
            cat,
        )
    }

    fn march(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
    }

    #[test]
    fn test_spec_example_rent_groceries_income() {
        let calculator = MonthlySummaryCalculator::default();
        let transactions = vec![
            tx(
                1,
                TransactionKind::Expense,
                100_00,
                march(1),
                Some(category(1, "rent", "#FFA07A")),
            ),
            tx(
                2,
                TransactionKind::Expense,
                50_00,
                march(2),
                Some(category(2, "groceries", "#FF6B6B")),
            ),
            tx(3, TransactionKind::Income, 1000_00, march(3), None),
        ];

        let summary = calculator.compute(&transactions, 2025, 3).unwrap();
        assert_eq!(summary.total_income, Decimal::new(1000_00, 2));
        assert_eq!(summary.total_expenses, Decimal::new(150_00, 2));
        assert_eq!(summary.fixed_costs, Decimal::new(100_00, 2));
        assert_eq!(summary.budget_relevant_expenses, Decimal::new(50_00, 2));
        assert_eq!(summary.net_balance, Decimal::new(850_00, 2));

        assert_eq!(summary.by_category.len(), 1);
        assert_eq!(summary.by_category[0].category_name, "groceries");
        assert_eq!(summary.by_category[0].amount, Decimal::new(50_00, 2));
        assert_eq!(summary.by_category[0].percentage, 100.0);
    }

    #[test]
    fn test_empty_month_is_all_zeros() {
        let calculator = MonthlySummaryCalculator::default();
        let summary = calculator.compute(&[], 2025, 4).unwrap();

        assert_eq!(summary.total_income, Decimal::ZERO);
        assert_eq!(summary.total_expenses, Decimal::ZERO);
        assert_eq!(summary.fixed_costs, Decimal::ZERO);
        assert_eq!(summary.budget_relevant_expenses, Decimal::ZERO);
        assert_eq!(summary.net_balance, Decimal::ZERO);
        assert!(summary.by_category.is_empty());

        assert_eq!(summary.budget_track.len(), 30);
        assert!(summary
            .budget_track
            .iter()
            .all(|p| p.cumulative_spent == Decimal::ZERO));
    }

    #[test]
    fn test_leap_year_february_track_length() {
        let calculator = MonthlySummaryCalculator::default();
        let summary = calculator.compute(&[], 2024, 2).unwrap();
        assert_eq!(summary.budget_track.len(), 29);
        assert_eq!(
            calculator.compute(&[], 2025, 2).unwrap().budget_track.len(),
            28
        );
    }

    #[test]
    fn test_track_is_cumulative_and_ends_at_budget_relevant_total() {
        let calculator = MonthlySummaryCalculator::default();
        let groceries = category(1, "groceries", "#FF6B6B");
        let transactions = vec![
            tx(1, TransactionKind::Expense, 10_00, march(5), Some(groceries.clone())),
            tx(2, TransactionKind::Expense, 20_00, march(5), Some(groceries.clone())),
            tx(3, TransactionKind::Expense, 15_50, march(20), Some(groceries.clone())),
            // Fixed cost: must not appear in the track
            tx(
                4,
                TransactionKind::Expense,
                700_00,
                march(1),
                Some(category(2, "rent", "#FFA07A")),
            ),
        ];

        let summary = calculator.compute(&transactions, 2025, 3).unwrap();
        assert_eq!(summary.budget_track.len(), 31);
        assert_eq!(summary.budget_track[0].day, 1);
        assert_eq!(summary.budget_track[0].cumulative_spent, Decimal::ZERO);
        assert_eq!(summary.budget_track[3].cumulative_spent, Decimal::ZERO);
        // Two same-day transactions land in the same bucket
        assert_eq!(
            summary.budget_track[4].cumulative_spent,
            Decimal::new(30_00, 2)
        );
        assert_eq!(
            summary.budget_track[18].cumulative_spent,
            Decimal::new(30_00, 2)
        );
        assert_eq!(
            summary.budget_track[19].cumulative_spent,
            Decimal::new(45_50, 2)
        );

        // Non-decreasing, ends at the budget-relevant total
        for pair in summary.budget_track.windows(2) {
            assert!(pair[0].cumulative_spent <= pair[1].cumulative_spent);
        }
        assert_eq!(
            summary.budget_track.last().unwrap().cumulative_spent,
            summary.budget_relevant_expenses
        );
    }

    #[test]
    fn test_same_category_merges_into_one_slice() {
        let calculator = MonthlySummaryCalculator::default();
        let groceries = category(1, "groceries", "#FF6B6B");
        let transactions = vec![
            tx(1, TransactionKind::Expense, 12_00, march(8), Some(groceries.clone())),
            tx(2, TransactionKind::Expense, 8_00, march(8), Some(groceries.clone())),
        ];

        let summary = calculator.compute(&transactions, 2025, 3).unwrap();
        assert_eq!(summary.by_category.len(), 1);
        assert_eq!(summary.by_category[0].amount, Decimal::new(20_00, 2));
        assert_eq!(
            summary.budget_track[7].cumulative_spent,
            Decimal::new(20_00, 2)
        );
    }

    #[test]
    fn test_uncategorized_expenses_fall_into_other() {
        let calculator = MonthlySummaryCalculator::default();
        let transactions = vec![
            tx(1, TransactionKind::Expense, 9_99, march(3), None),
            tx(2, TransactionKind::Expense, 5_01, march(4), None),
        ];

        let summary = calculator.compute(&transactions, 2025, 3).unwrap();
        assert_eq!(summary.by_category.len(), 1);
        assert_eq!(summary.by_category[0].category_name, OTHER_CATEGORY_NAME);
        assert_eq!(summary.by_category[0].color, OTHER_CATEGORY_COLOR);
        assert_eq!(summary.by_category[0].amount, Decimal::new(15_00, 2));
        assert_eq!(summary.by_category[0].percentage, 100.0);
    }

    #[test]
    fn test_breakdown_sorted_descending_with_stable_ties() {
        let calculator = MonthlySummaryCalculator::default();
        let transactions = vec![
            tx(1, TransactionKind::Expense, 10_00, march(1), Some(category(1, "shopping", "#F7DC6F"))),
            tx(2, TransactionKind::Expense, 25_00, march(2), Some(category(2, "restaurant", "#BB8FCE"))),
            // Ties with shopping; encountered later, must sort after it
            tx(3, TransactionKind::Expense, 10_00, march(3), Some(category(3, "transport", "#4ECDC4"))),
        ];

        let summary = calculator.compute(&transactions, 2025, 3).unwrap();
        let names: Vec<_> = summary
            .by_category
            .iter()
            .map(|s| s.category_name.as_str())
            .collect();
        assert_eq!(names, vec!["restaurant", "shopping", "transport"]);

        // Percentages follow the amounts and the slices sum to the total
        let amount_sum: Decimal = summary.by_category.iter().map(|s| s.amount).sum();
        assert_eq!(amount_sum, summary.budget_relevant_expenses);
        assert!((summary.by_category[0].percentage - 55.5555555).abs() < 1e-5);
    }

    #[test]
    fn test_partition_invariant_holds_for_mixed_set() {
        let calculator = MonthlySummaryCalculator::default();
        let transactions = vec![
            tx(1, TransactionKind::Income, 2400_00, march(1), None),
            tx(2, TransactionKind::Expense, 850_00, march(1), Some(category(1, "rent", "#FFA07A"))),
            tx(3, TransactionKind::Expense, 49_99, march(2), Some(category(2, "abo", "#45B7D1"))),
            tx(4, TransactionKind::Expense, 120_35, march(9), Some(category(3, "groceries", "#FF6B6B"))),
            tx(5, TransactionKind::Expense, 60_00, march(14), None),
            // Income with a fixed-cost-looking category stays income
            tx(6, TransactionKind::Income, 30_00, march(20), Some(category(4, "rent", "#FFA07A"))),
        ];

        let summary = calculator.compute(&transactions, 2025, 3).unwrap();
        assert_eq!(
            summary.fixed_costs + summary.budget_relevant_expenses,
            summary.total_expenses
        );
        assert_eq!(
            summary.net_balance,
            summary.total_income - summary.total_expenses
        );
        assert_eq!(summary.total_income, Decimal::new(2430_00, 2));
        assert_eq!(summary.fixed_costs, Decimal::new(899_99, 2));
        assert_eq!(summary.budget_relevant_expenses, Decimal::new(180_35, 2));
    }

    #[test]
    fn test_transaction_outside_month_is_rejected() {
        let calculator = MonthlySummaryCalculator::default();
        let transactions = vec![tx(
            1,
            TransactionKind::Expense,
            10_00,
            NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
            None,
        )];

        let err = calculator.compute(&transactions, 2025, 3).unwrap_err();
        assert!(matches!(err, ComputeError::OutOfRange(_)));
    }

    #[test]
    fn test_invalid_month_is_rejected() {
        let calculator = MonthlySummaryCalculator::default();
        let err = calculator.compute(&[], 2025, 13).unwrap_err();
        assert!(matches!(err, ComputeError::Month(_)));
    }

    #[test]
    fn test_share_percentage_zero_total_convention() {
        assert_eq!(share_percentage(Decimal::ZERO, Decimal::ZERO), 0.0);
        assert_eq!(share_percentage(Decimal::new(10_00, 2), Decimal::ZERO), 0.0);
        assert_eq!(
            share_percentage(Decimal::new(25_00, 2), Decimal::new(100_00, 2)),
            25.0
        );
    }
}
