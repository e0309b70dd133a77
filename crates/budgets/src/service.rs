use crate::compare::{self, BudgetComparison};
use crate::models::{Budget, UpsertBudgetRequest};
use crate::repository::BudgetRepository;
use common::period::Period;
use database::{Database, StoreError};
use std::collections::HashMap;
use tracing::instrument;

#[derive(Debug, thiserror::Error)]
pub enum BudgetError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Budget already exists for this category, month, and year")]
    Conflict(String),
    #[error("Database error: {0}")]
    Infrastructure(String),
    #[error("Budget not found")]
    NotFound,
}

impl From<StoreError> for BudgetError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => BudgetError::NotFound,
            StoreError::UniqueViolation(msg) => BudgetError::Conflict(msg),
            StoreError::Infrastructure(e) => BudgetError::Infrastructure(e.to_string()),
            _ => BudgetError::Infrastructure(err.to_string()),
        }
    }
}

pub struct BudgetService;

impl BudgetService {
    /// Create-or-update keyed on (category, month, year); a second write to
    /// the same key replaces the amount instead of adding a record.
    #[instrument(skip(db))]
    pub async fn upsert_budget(
        db: &Database,
        category: String,
        amount_dollars: f64,
        month: String,
        year: i32,
    ) -> Result<Budget, BudgetError> {
        let req = UpsertBudgetRequest::new(category, amount_dollars, month, year)
            .map_err(BudgetError::InvalidInput)?;

        let mut uow = db.begin().await?;
        let mut repo = BudgetRepository::new(uow.connection());

        let id = repo.upsert(&req).await?;
        let budget = repo.find_by_id(id).await?.ok_or(BudgetError::NotFound)?;

        uow.commit().await?;

        Ok(budget)
    }

    #[instrument(skip(db))]
    pub async fn list_budgets(
        db: &Database,
        period: Option<&Period>,
    ) -> Result<Vec<Budget>, BudgetError> {
        let mut uow = db.begin().await?;
        let mut repo = BudgetRepository::new(uow.connection());

        let budgets = repo.list(period).await?;

        Ok(budgets)
    }

    #[instrument(skip(db))]
    pub async fn delete_budget(db: &Database, id: i64) -> Result<(), BudgetError> {
        let mut uow = db.begin().await?;
        let mut repo = BudgetRepository::new(uow.connection());

        repo.delete(id).await?;

        uow.commit().await?;
        Ok(())
    }

    /// Budget-vs-actual for one month: each budget joined with the total
    /// spent in its category over that calendar month.
    #[instrument(skip(db))]
    pub async fn comparison(
        db: &Database,
        period: &Period,
    ) -> Result<Vec<BudgetComparison>, BudgetError> {
        let budgets = Self::list_budgets(db, Some(period)).await?;

        let summaries =
            expenses::service::ExpenseService::category_summary(db, Some(period.clone()))
                .await
                .map_err(|e| {
                    tracing::error!("Failed to aggregate expenses for comparison: {:?}", e);
                    BudgetError::Infrastructure(e.to_string())
                })?;

        let spent_by_category: HashMap<String, i64> = summaries
            .into_iter()
            .map(|s| (s.category, s.total_cents))
            .collect();

        Ok(compare::compare(&budgets, &spent_by_category))
    }
}
