use crate::models::{Budget, UpsertBudgetRequest};
use common::period::Period;
use database::{self, StoreError};
use sqlx::FromRow;

#[derive(FromRow)]
struct BudgetRecord {
    id: i64,
    category: String,
    amount: i64,
    month: String,
    year: i32,
}

impl From<BudgetRecord> for Budget {
    fn from(record: BudgetRecord) -> Self {
        Budget {
            id: record.id,
            category: record.category,
            amount_cents: record.amount,
            month: record.month,
            year: record.year,
        }
    }
}

pub(crate) struct BudgetRepository<'a> {
    conn: &'a mut database::Connection,
}

impl<'a> BudgetRepository<'a> {
    pub fn new(conn: &'a mut database::Connection) -> Self {
        Self { conn }
    }

    /// Last-writer-wins on the (category, month, year) key. The conflict
    /// clause makes the write atomic, so concurrent upserts cannot produce
    /// duplicates.
    pub async fn upsert(&mut self, req: &UpsertBudgetRequest) -> Result<i64, StoreError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO budgets (category, amount, month, year)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT(category, month, year) DO UPDATE SET
            amount = excluded.amount
            RETURNING id
            "#,
        )
        .bind(&req.category)
        .bind(req.amount_cents)
        .bind(req.period.month())
        .bind(req.period.year())
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(id)
    }

    pub async fn find_by_id(&mut self, id: i64) -> Result<Option<Budget>, StoreError> {
        let record = sqlx::query_as::<_, BudgetRecord>(
            "SELECT id, category, amount, month, year FROM budgets WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(record.map(|r| r.into()))
    }

    pub async fn list(&mut self, period: Option<&Period>) -> Result<Vec<Budget>, StoreError> {
        let records = match period {
            Some(p) => {
                sqlx::query_as::<_, BudgetRecord>(
                    "SELECT id, category, amount, month, year FROM budgets WHERE month = $1 AND year = $2 ORDER BY year DESC, month DESC",
                )
                .bind(p.month())
                .bind(p.year())
                .fetch_all(&mut *self.conn)
                .await?
            }
            None => {
                sqlx::query_as::<_, BudgetRecord>(
                    "SELECT id, category, amount, month, year FROM budgets ORDER BY year DESC, month DESC",
                )
                .fetch_all(&mut *self.conn)
                .await?
            }
        };

        Ok(records.into_iter().map(|r| r.into()).collect())
    }

    pub async fn delete(&mut self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM budgets WHERE id = $1")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(category: &str, amount: f64, month: &str, year: i32) -> UpsertBudgetRequest {
        UpsertBudgetRequest::new(category.to_string(), amount, month.to_string(), year).unwrap()
    }

    #[tokio::test]
    async fn test_upsert_creates_budget() {
        let db = database::get_test_db().await;
        let mut uow = db.begin().await.unwrap();
        let mut repo = BudgetRepository::new(uow.connection());

        let id = repo.upsert(&req("Food", 100.0, "03", 2024)).await.unwrap();
        let budget = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(budget.category, "Food");
        assert_eq!(budget.amount_cents, 10000);
        assert_eq!(budget.month, "03");
        assert_eq!(budget.year, 2024);
    }

    #[tokio::test]
    async fn test_upsert_same_key_keeps_one_row_with_latest_amount() {
        let db = database::get_test_db().await;
        let mut uow = db.begin().await.unwrap();
        let mut repo = BudgetRepository::new(uow.connection());

        repo.upsert(&req("Food", 100.0, "03", 2024)).await.unwrap();
        repo.upsert(&req("Food", 250.0, "03", 2024)).await.unwrap();

        let period = Period::new("03", 2024).unwrap();
        let budgets = repo.list(Some(&period)).await.unwrap();
        assert_eq!(budgets.len(), 1);
        assert_eq!(budgets[0].amount_cents, 25000);
    }

    #[tokio::test]
    async fn test_upsert_distinct_keys_coexist() {
        let db = database::get_test_db().await;
        let mut uow = db.begin().await.unwrap();
        let mut repo = BudgetRepository::new(uow.connection());

        repo.upsert(&req("Food", 100.0, "03", 2024)).await.unwrap();
        repo.upsert(&req("Food", 100.0, "04", 2024)).await.unwrap();
        repo.upsert(&req("Transport", 50.0, "03", 2024)).await.unwrap();

        let all = repo.list(None).await.unwrap();
        assert_eq!(all.len(), 3);

        let march = Period::new("03", 2024).unwrap();
        assert_eq!(repo.list(Some(&march)).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_budget() {
        let db = database::get_test_db().await;
        let mut uow = db.begin().await.unwrap();
        let mut repo = BudgetRepository::new(uow.connection());

        let id = repo.upsert(&req("Food", 100.0, "03", 2024)).await.unwrap();
        repo.delete(id).await.unwrap();
        assert!(repo.find_by_id(id).await.unwrap().is_none());

        let err = repo.delete(id).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }
}
