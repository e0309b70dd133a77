use crate::models::MonthlyReport;
use crate::report;
use budgets::service::{BudgetError, BudgetService};
use common::period::Period;
use database::Database;
use expenses::service::{ExpenseError, ExpenseService};
use tracing::instrument;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Invalid period: {0}")]
    InvalidPeriod(String),
    #[error("Database error: {0}")]
    Infrastructure(String),
}

impl From<ExpenseError> for ReportError {
    fn from(err: ExpenseError) -> Self {
        ReportError::Infrastructure(err.to_string())
    }
}

impl From<BudgetError> for ReportError {
    fn from(err: BudgetError) -> Self {
        ReportError::Infrastructure(err.to_string())
    }
}

pub struct ReportService;

impl ReportService {
    /// Fetches the month's expenses and budgets and composes the report.
    #[instrument(skip(db))]
    pub async fn monthly_report(
        db: &Database,
        period: &Period,
    ) -> Result<MonthlyReport, ReportError> {
        let expenses = ExpenseService::list_expenses(db, Some(period.clone())).await?;
        let budgets = BudgetService::list_budgets(db, Some(period)).await?;

        Ok(report::compose(period, &expenses, &budgets))
    }
}
