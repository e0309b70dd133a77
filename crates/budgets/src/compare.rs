//! Budget-vs-actual comparison for one calendar month. Joins the month's
//! budgets with per-category spending totals produced by the aggregation
//! side; categories without a budget never appear here.

use crate::models::Budget;
use common::money;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct BudgetComparison {
    #[serde(flatten)]
    pub budget: Budget,
    #[serde(rename = "spent", serialize_with = "money::serialize_cents")]
    pub spent_cents: i64,
    #[serde(rename = "remaining", serialize_with = "money::serialize_cents")]
    pub remaining_cents: i64,
    /// Spent as a share of the budget, in percent. Exceeds 100 when over
    /// budget; capping is left to the presentation layer.
    pub percentage: f64,
}

/// Input budget ordering is preserved. Budgets with no matching spending
/// report zero spent and zero percent.
pub fn compare(
    budgets: &[Budget],
    spent_by_category: &HashMap<String, i64>,
) -> Vec<BudgetComparison> {
    budgets
        .iter()
        .map(|budget| {
            let spent = spent_by_category
                .get(&budget.category)
                .copied()
                .unwrap_or(0);
            let percentage = if budget.amount_cents > 0 {
                (spent as f64 / budget.amount_cents as f64) * 100.0
            } else {
                0.0
            };

            BudgetComparison {
                budget: budget.clone(),
                spent_cents: spent,
                remaining_cents: budget.amount_cents - spent,
                percentage,
            }
        })
        .collect()
}
