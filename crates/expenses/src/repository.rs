use crate::models::{CreateExpenseRequest, Expense};
use chrono::NaiveDate;
use database::{self, StoreError};
use sqlx::FromRow;

#[derive(FromRow)]
struct ExpenseRecord {
    id: i64,
    amount: i64,
    category: String,
    description: String,
    date: NaiveDate,
}

impl From<ExpenseRecord> for Expense {
    fn from(record: ExpenseRecord) -> Self {
        Expense {
            id: record.id,
            amount_cents: record.amount,
            category: record.category,
            description: record.description,
            date: record.date,
        }
    }
}

pub(crate) struct ExpenseRepository<'a> {
    conn: &'a mut database::Connection,
}

impl<'a> ExpenseRepository<'a> {
    pub fn new(conn: &'a mut database::Connection) -> Self {
        Self { conn }
    }

    pub async fn create(&mut self, req: &CreateExpenseRequest) -> Result<i64, StoreError> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO expenses (amount, category, description, date) VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(req.amount_cents())
        .bind(req.category())
        .bind(req.description())
        .bind(req.date())
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(id)
    }

    pub async fn update(&mut self, id: i64, req: &CreateExpenseRequest) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE expenses SET amount = $1, category = $2, description = $3, date = $4 WHERE id = $5",
        )
        .bind(req.amount_cents())
        .bind(req.category())
        .bind(req.description())
        .bind(req.date())
        .bind(id)
        .execute(&mut *self.conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    pub async fn find_by_id(&mut self, id: i64) -> Result<Option<Expense>, StoreError> {
        let record = sqlx::query_as::<_, ExpenseRecord>(
            "SELECT id, amount, category, description, date FROM expenses WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(record.map(|r| r.into()))
    }

    pub async fn list(
        &mut self,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<Vec<Expense>, StoreError> {
        let records = match range {
            Some((start, end)) => {
                sqlx::query_as::<_, ExpenseRecord>(
                    "SELECT id, amount, category, description, date FROM expenses WHERE date >= $1 AND date <= $2 ORDER BY date DESC",
                )
                .bind(start)
                .bind(end)
                .fetch_all(&mut *self.conn)
                .await?
            }
            None => {
                sqlx::query_as::<_, ExpenseRecord>(
                    "SELECT id, amount, category, description, date FROM expenses ORDER BY date DESC",
                )
                .fetch_all(&mut *self.conn)
                .await?
            }
        };

        Ok(records.into_iter().map(|r| r.into()).collect())
    }

    pub async fn delete(&mut self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = $1")
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
    use database::get_test_db;

    fn req(amount: f64, category: &str, date: &str) -> CreateExpenseRequest {
        CreateExpenseRequest::new(amount, category.to_string(), None, date.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_find_expense() {
        let db = get_test_db().await;
        let mut uow = db.begin().await.unwrap();
        let mut repo = ExpenseRepository::new(uow.connection());

        let id = repo.create(&req(45.50, "Food", "2024-03-05")).await.unwrap();
        assert!(id > 0);

        let expense = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(expense.amount_cents, 4550);
        assert_eq!(expense.category, "Food");
        assert_eq!(expense.description, "");
    }

    #[tokio::test]
    async fn test_list_filters_by_range_and_sorts_descending() {
        let db = get_test_db().await;
        let mut uow = db.begin().await.unwrap();
        let mut repo = ExpenseRepository::new(uow.connection());

        repo.create(&req(10.0, "Food", "2024-03-05")).await.unwrap();
        repo.create(&req(20.0, "Food", "2024-03-20")).await.unwrap();
        repo.create(&req(30.0, "Food", "2024-04-01")).await.unwrap();

        let range = Some((
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
        ));
        let march = repo.list(range).await.unwrap();
        assert_eq!(march.len(), 2);
        assert_eq!(march[0].amount_cents, 2000); // newest first
        assert_eq!(march[1].amount_cents, 1000);

        let all = repo.list(None).await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_update_expense() {
        let db = get_test_db().await;
        let mut uow = db.begin().await.unwrap();
        let mut repo = ExpenseRepository::new(uow.connection());

        let id = repo.create(&req(10.0, "Food", "2024-03-05")).await.unwrap();
        repo.update(id, &req(25.0, "Transport", "2024-03-06")).await.unwrap();

        let expense = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(expense.amount_cents, 2500);
        assert_eq!(expense.category, "Transport");
        assert_eq!(expense.date, NaiveDate::from_ymd_opt(2024, 3, 6).unwrap());
    }

    #[tokio::test]
    async fn test_update_missing_expense_is_not_found() {
        let db = get_test_db().await;
        let mut uow = db.begin().await.unwrap();
        let mut repo = ExpenseRepository::new(uow.connection());

        let err = repo.update(999, &req(10.0, "Food", "2024-03-05")).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[tokio::test]
    async fn test_delete_expense() {
        let db = get_test_db().await;
        let mut uow = db.begin().await.unwrap();
        let mut repo = ExpenseRepository::new(uow.connection());

        let id = repo.create(&req(10.0, "Food", "2024-03-05")).await.unwrap();
        repo.delete(id).await.unwrap();
        assert!(repo.find_by_id(id).await.unwrap().is_none());

        let err = repo.delete(id).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }
}
