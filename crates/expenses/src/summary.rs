//! Aggregation over expense records: per-category totals for a date range
//! and a monthly spending trend. Pure functions over already-fetched data;
//! callers bound the input via query-level filtering.

use crate::models::Expense;
use chrono::NaiveDate;
use common::money;
use serde::Serialize;

/// Default number of buckets in the monthly trend.
pub const MONTHLY_TREND_MONTHS: usize = 12;

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct CategorySummary {
    pub category: String,
    #[serde(rename = "total", serialize_with = "money::serialize_cents")]
    pub total_cents: i64,
    pub count: u32,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct MonthlyPoint {
    /// "YYYY-MM"
    pub month: String,
    #[serde(rename = "total", serialize_with = "money::serialize_cents")]
    pub total_cents: i64,
    pub count: u32,
}

/// Totals and counts per category, restricted to `range` (inclusive on both
/// ends) when given. Sorted by total descending; categories with equal
/// totals keep first-encounter order. Categories without matching expenses
/// are omitted. An inverted range matches nothing.
pub fn group_by_category(
    expenses: &[Expense],
    range: Option<(NaiveDate, NaiveDate)>,
) -> Vec<CategorySummary> {
    let mut summaries: Vec<CategorySummary> = Vec::new();

    for expense in expenses {
        if let Some((start, end)) = range {
            if expense.date < start || expense.date > end {
                continue;
            }
        }
        match summaries.iter_mut().find(|s| s.category == expense.category) {
            Some(summary) => {
                summary.total_cents += expense.amount_cents;
                summary.count += 1;
            }
            None => summaries.push(CategorySummary {
                category: expense.category.clone(),
                total_cents: expense.amount_cents,
                count: 1,
            }),
        }
    }

    // Stable sort preserves insertion order for equal totals
    summaries.sort_by(|a, b| b.total_cents.cmp(&a.total_cents));
    summaries
}

/// Totals and counts per calendar month over all given expenses, sorted
/// ascending by month key and then truncated. The truncation happens after
/// the ascending sort, so the oldest `limit` months are returned.
pub fn group_by_month(expenses: &[Expense], limit: usize) -> Vec<MonthlyPoint> {
    let mut points: Vec<MonthlyPoint> = Vec::new();

    for expense in expenses {
        let key = expense.date.format("%Y-%m").to_string();
        match points.iter_mut().find(|p| p.month == key) {
            Some(point) => {
                point.total_cents += expense.amount_cents;
                point.count += 1;
            }
            None => points.push(MonthlyPoint {
                month: key,
                total_cents: expense.amount_cents,
                count: 1,
            }),
        }
    }

    points.sort_by(|a, b| a.month.cmp(&b.month));
    points.truncate(limit);
    points
}
