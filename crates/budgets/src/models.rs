use common::{money, period::Period};
use serde::{Deserialize, Serialize};

/// A spending ceiling for one category in one calendar month. At most one
/// budget exists per (category, month, year); writes go through an upsert.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Budget {
    pub id: i64,
    pub category: String,
    #[serde(rename = "amount", serialize_with = "money::serialize_cents")]
    pub amount_cents: i64,
    /// "01"-"12"
    pub month: String,
    pub year: i32,
}

#[derive(Debug)]
pub struct UpsertBudgetRequest {
    pub category: String,
    pub amount_cents: i64,
    pub period: Period,
}

/// Wire shape of POST bodies; amount arrives in dollars.
#[derive(Deserialize)]
pub struct RawUpsertBudgetRequest {
    pub category: String,
    pub amount: f64,
    pub month: String,
    pub year: i32,
}

impl UpsertBudgetRequest {
    pub fn new(
        category: String,
        amount_dollars: f64,
        month: String,
        year: i32,
    ) -> Result<Self, String> {
        let category = category.trim();
        if category.is_empty() {
            return Err("Category cannot be empty".to_string());
        }

        if !amount_dollars.is_finite() || amount_dollars <= 0.0 {
            return Err("Amount must be a positive number".to_string());
        }
        let amount_cents = money::to_cents(amount_dollars);
        if amount_cents <= 0 {
            return Err("Amount must be a positive number".to_string());
        }

        let period = Period::new(&month, year)?;

        Ok(Self {
            category: category.to_string(),
            amount_cents,
            period,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_budget_request_valid() {
        let req = UpsertBudgetRequest::new("Food".to_string(), 100.0, "03".to_string(), 2024).unwrap();
        assert_eq!(req.category, "Food");
        assert_eq!(req.amount_cents, 10000);
        assert_eq!(req.period.month(), "03");
        assert_eq!(req.period.year(), 2024);
    }

    #[test]
    fn test_upsert_budget_request_pads_month() {
        let req = UpsertBudgetRequest::new("Food".to_string(), 100.0, "3".to_string(), 2024).unwrap();
        assert_eq!(req.period.month(), "03");
    }

    #[test]
    fn test_upsert_budget_request_rejects_bad_input() {
        assert!(UpsertBudgetRequest::new("  ".into(), 100.0, "03".into(), 2024).is_err());
        assert!(UpsertBudgetRequest::new("Food".into(), 0.0, "03".into(), 2024).is_err());
        assert!(UpsertBudgetRequest::new("Food".into(), -5.0, "03".into(), 2024).is_err());
        assert!(UpsertBudgetRequest::new("Food".into(), 100.0, "13".into(), 2024).is_err());
        assert!(UpsertBudgetRequest::new("Food".into(), 100.0, "03".into(), 1999).is_err());
    }
}
