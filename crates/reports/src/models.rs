use budgets::models::Budget;
use common::money;
use expenses::models::Expense;
use expenses::summary::CategorySummary;
use serde::Serialize;

/// Everything the presentation layer needs to render one month: headline
/// totals, the category breakdown, the month's budgets, and the raw
/// transaction list. Computed on demand, never persisted.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReport {
    /// "01"-"12"
    pub month: String,
    pub year: i32,
    #[serde(rename = "totalExpenses", serialize_with = "money::serialize_cents")]
    pub total_expenses_cents: i64,
    #[serde(rename = "budgetTotal", serialize_with = "money::serialize_cents")]
    pub budget_total_cents: i64,
    /// Budget total minus spending; negative when the month is over budget.
    #[serde(rename = "remaining", serialize_with = "money::serialize_cents")]
    pub remaining_cents: i64,
    pub expense_count: u32,
    /// The month's expenses, newest first.
    pub expenses: Vec<Expense>,
    pub category_summary: Vec<CategorySummary>,
    pub budgets: Vec<Budget>,
}
