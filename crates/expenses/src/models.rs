use chrono::NaiveDate;
use common::money;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Expense {
    pub id: i64,
    #[serde(rename = "amount", serialize_with = "money::serialize_cents")]
    pub amount_cents: i64,
    pub category: String,
    pub description: String,
    pub date: NaiveDate,
}

#[derive(Debug)]
pub struct CreateExpenseRequest {
    amount_cents: i64,
    category: String,
    description: String,
    date: NaiveDate,
}

/// Wire shape of POST/PUT bodies; amounts arrive in dollars.
#[derive(Deserialize)]
pub struct RawCreateExpenseRequest {
    pub amount: f64,
    pub category: String,
    pub description: Option<String>,
    pub date: String,
}

impl CreateExpenseRequest {
    pub fn new(
        amount_dollars: f64,
        category: String,
        description: Option<String>,
        date: String,
    ) -> Result<Self, String> {
        if !amount_dollars.is_finite() || amount_dollars <= 0.0 {
            return Err("Amount must be a positive number".to_string());
        }
        let amount_cents = money::to_cents(amount_dollars);
        if amount_cents <= 0 {
            return Err("Amount must be a positive number".to_string());
        }

        let category = category.trim();
        if category.is_empty() {
            return Err("Category cannot be empty".to_string());
        }

        let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
            .map_err(|_| "Invalid date format, expected YYYY-MM-DD".to_string())?;

        Ok(Self {
            amount_cents,
            category: category.to_string(),
            description: description
                .map(|d| d.trim().to_string())
                .unwrap_or_default(),
            date,
        })
    }

    pub fn amount_cents(&self) -> i64 {
        self.amount_cents
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_expense_request_valid() {
        let req = CreateExpenseRequest::new(
            45.50,
            "Food".to_string(),
            Some("  lunch ".to_string()),
            "2024-03-05".to_string(),
        )
        .unwrap();
        assert_eq!(req.amount_cents(), 4550);
        assert_eq!(req.category(), "Food");
        assert_eq!(req.description(), "lunch");
        assert_eq!(req.date(), NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
    }

    #[test]
    fn test_create_expense_request_trims_category() {
        let req = CreateExpenseRequest::new(
            10.0,
            "  Transport ".to_string(),
            None,
            "2024-03-10".to_string(),
        )
        .unwrap();
        assert_eq!(req.category(), "Transport");
        assert_eq!(req.description(), "");
    }

    #[test]
    fn test_create_expense_request_rejects_non_positive_amount() {
        assert!(CreateExpenseRequest::new(0.0, "Food".into(), None, "2024-03-05".into()).is_err());
        assert!(CreateExpenseRequest::new(-5.0, "Food".into(), None, "2024-03-05".into()).is_err());
        // Rounds to zero cents
        assert!(CreateExpenseRequest::new(0.001, "Food".into(), None, "2024-03-05".into()).is_err());
        assert!(CreateExpenseRequest::new(f64::NAN, "Food".into(), None, "2024-03-05".into()).is_err());
    }

    #[test]
    fn test_create_expense_request_rejects_empty_category() {
        assert!(CreateExpenseRequest::new(10.0, "   ".into(), None, "2024-03-05".into()).is_err());
    }

    #[test]
    fn test_create_expense_request_rejects_bad_date() {
        assert!(CreateExpenseRequest::new(10.0, "Food".into(), None, "03/05/2024".into()).is_err());
        assert!(CreateExpenseRequest::new(10.0, "Food".into(), None, "2024-02-30".into()).is_err());
    }
}
