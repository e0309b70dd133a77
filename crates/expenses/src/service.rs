use crate::models::{CreateExpenseRequest, Expense};
use crate::repository::ExpenseRepository;
use crate::summary::{self, CategorySummary, MonthlyPoint, MONTHLY_TREND_MONTHS};
use common::period::Period;
use database::{Database, StoreError};
use tracing::instrument;

#[derive(Debug, thiserror::Error)]
pub enum ExpenseError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Database error: {0}")]
    Infrastructure(String),
    #[error("Expense not found")]
    NotFound,
}

impl From<StoreError> for ExpenseError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => ExpenseError::NotFound,
            StoreError::Infrastructure(e) => ExpenseError::Infrastructure(e.to_string()),
            _ => ExpenseError::Infrastructure(err.to_string()),
        }
    }
}

pub struct ExpenseService;

impl ExpenseService {
    #[instrument(skip(db))]
    pub async fn create_expense(
        db: &Database,
        amount_dollars: f64,
        category: String,
        description: Option<String>,
        date: String,
    ) -> Result<Expense, ExpenseError> {
        let req = CreateExpenseRequest::new(amount_dollars, category, description, date)
            .map_err(ExpenseError::InvalidInput)?;

        let mut uow = db.begin().await?;
        let mut repo = ExpenseRepository::new(uow.connection());

        let id = repo.create(&req).await?;
        let expense = repo.find_by_id(id).await?.ok_or(ExpenseError::NotFound)?;

        uow.commit().await?;

        Ok(expense)
    }

    #[instrument(skip(db))]
    pub async fn update_expense(
        db: &Database,
        id: i64,
        amount_dollars: f64,
        category: String,
        description: Option<String>,
        date: String,
    ) -> Result<Expense, ExpenseError> {
        let req = CreateExpenseRequest::new(amount_dollars, category, description, date)
            .map_err(ExpenseError::InvalidInput)?;

        let mut uow = db.begin().await?;
        let mut repo = ExpenseRepository::new(uow.connection());

        repo.update(id, &req).await?;
        let expense = repo.find_by_id(id).await?.ok_or(ExpenseError::NotFound)?;

        uow.commit().await?;

        Ok(expense)
    }

    #[instrument(skip(db))]
    pub async fn get_expense(db: &Database, id: i64) -> Result<Expense, ExpenseError> {
        let mut uow = db.begin().await?;
        let mut repo = ExpenseRepository::new(uow.connection());

        let expense = repo.find_by_id(id).await?.ok_or(ExpenseError::NotFound)?;

        Ok(expense)
    }

    /// Expenses sorted newest-first, restricted to one calendar month when a
    /// period is given.
    #[instrument(skip(db))]
    pub async fn list_expenses(
        db: &Database,
        period: Option<Period>,
    ) -> Result<Vec<Expense>, ExpenseError> {
        let mut uow = db.begin().await?;
        let mut repo = ExpenseRepository::new(uow.connection());

        let expenses = repo.list(period.as_ref().map(|p| p.date_range())).await?;

        Ok(expenses)
    }

    #[instrument(skip(db))]
    pub async fn delete_expense(db: &Database, id: i64) -> Result<(), ExpenseError> {
        let mut uow = db.begin().await?;
        let mut repo = ExpenseRepository::new(uow.connection());

        repo.delete(id).await?;

        uow.commit().await?;
        Ok(())
    }

    /// Per-category totals, optionally restricted to one calendar month.
    /// The range filter is pushed down to the query; grouping happens over
    /// the fetched set.
    #[instrument(skip(db))]
    pub async fn category_summary(
        db: &Database,
        period: Option<Period>,
    ) -> Result<Vec<CategorySummary>, ExpenseError> {
        let mut uow = db.begin().await?;
        let mut repo = ExpenseRepository::new(uow.connection());

        let expenses = repo.list(period.as_ref().map(|p| p.date_range())).await?;

        Ok(summary::group_by_category(&expenses, None))
    }

    /// Spending trend over all recorded expenses, bucketed by month.
    #[instrument(skip(db))]
    pub async fn monthly_summary(db: &Database) -> Result<Vec<MonthlyPoint>, ExpenseError> {
        let mut uow = db.begin().await?;
        let mut repo = ExpenseRepository::new(uow.connection());

        let expenses = repo.list(None).await?;

        Ok(summary::group_by_month(&expenses, MONTHLY_TREND_MONTHS))
    }
}
