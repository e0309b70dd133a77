//! Monthly report composition. Pure: the same period, expenses and budgets
//! always produce the same report.

use crate::models::MonthlyReport;
use budgets::models::Budget;
use common::period::Period;
use expenses::models::Expense;
use expenses::summary;

/// Assembles the report for one calendar month. Expenses outside the
/// period (and budgets for other periods) are ignored, so callers may pass
/// either pre-filtered or unfiltered slices.
pub fn compose(period: &Period, expenses: &[Expense], budgets: &[Budget]) -> MonthlyReport {
    let (start, end) = period.date_range();

    let mut filtered: Vec<Expense> = expenses
        .iter()
        .filter(|e| e.date >= start && e.date <= end)
        .cloned()
        .collect();
    filtered.sort_by(|a, b| b.date.cmp(&a.date));

    let total_expenses_cents: i64 = filtered.iter().map(|e| e.amount_cents).sum();
    let category_summary = summary::group_by_category(&filtered, None);

    let budgets: Vec<Budget> = budgets
        .iter()
        .filter(|b| b.month == period.month() && b.year == period.year())
        .cloned()
        .collect();
    let budget_total_cents: i64 = budgets.iter().map(|b| b.amount_cents).sum();

    MonthlyReport {
        month: period.month().to_string(),
        year: period.year(),
        total_expenses_cents,
        budget_total_cents,
        remaining_cents: budget_total_cents - total_expenses_cents,
        expense_count: filtered.len() as u32,
        expenses: filtered,
        category_summary,
        budgets,
    }
}
