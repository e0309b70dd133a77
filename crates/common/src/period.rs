use chrono::NaiveDate;

/// One calendar month, the key for budgets and monthly reports.
///
/// Construction validates the month ("01"-"12", single digits are padded)
/// and the year (2020-2100), and precomputes the first and last calendar
/// day so range filtering never re-derives them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Period {
    month: String,
    year: i32,
    first_day: NaiveDate,
    last_day: NaiveDate,
}

impl Period {
    pub fn new(month: &str, year: i32) -> Result<Self, String> {
        let month = if month.len() == 1 {
            format!("0{month}")
        } else {
            month.to_string()
        };

        // Digit form first: `parse` alone would accept "+1"
        if month.len() != 2 || !month.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format!("Invalid month: {month}, expected 01-12"));
        }
        let number: u32 = month
            .parse()
            .map_err(|_| format!("Invalid month: {month}"))?;
        if !(1..=12).contains(&number) {
            return Err(format!("Invalid month: {month}, expected 01-12"));
        }
        if !(2020..=2100).contains(&year) {
            return Err(format!("Year {year} out of range, expected 2020-2100"));
        }

        let first_day = NaiveDate::from_ymd_opt(year, number, 1)
            .ok_or_else(|| format!("Invalid period: {year}-{month}"))?;
        let next_month = if number == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, number + 1, 1)
        }
        .ok_or_else(|| format!("Invalid period: {year}-{month}"))?;
        let last_day = next_month
            .pred_opt()
            .ok_or_else(|| format!("Invalid period: {year}-{month}"))?;

        Ok(Self {
            month,
            year,
            first_day,
            last_day,
        })
    }

    /// Both month and year, or neither. Used by list endpoints where the
    /// period filter is optional.
    pub fn from_optional(month: Option<&str>, year: Option<i32>) -> Result<Option<Self>, String> {
        match (month, year) {
            (Some(m), Some(y)) => Self::new(m, y).map(Some),
            _ => Ok(None),
        }
    }

    /// Used by comparison and report endpoints where the period is mandatory.
    pub fn require(month: Option<&str>, year: Option<i32>) -> Result<Self, String> {
        match (month, year) {
            (Some(m), Some(y)) => Self::new(m, y),
            _ => Err("Month and year are required".to_string()),
        }
    }

    pub fn month(&self) -> &str {
        &self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Inclusive date range covering the whole month.
    pub fn date_range(&self) -> (NaiveDate, NaiveDate) {
        (self.first_day, self.last_day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_period() {
        let p = Period::new("03", 2024).unwrap();
        assert_eq!(p.month(), "03");
        assert_eq!(p.year(), 2024);
    }

    #[test]
    fn test_single_digit_month_is_padded() {
        let p = Period::new("3", 2024).unwrap();
        assert_eq!(p.month(), "03");
    }

    #[test]
    fn test_invalid_months_rejected() {
        assert!(Period::new("00", 2024).is_err());
        assert!(Period::new("13", 2024).is_err());
        assert!(Period::new("ab", 2024).is_err());
        assert!(Period::new("003", 2024).is_err());
    }

    #[test]
    fn test_signed_month_strings_rejected() {
        // u32 parsing alone would accept a "+" prefix and keep the
        // unnormalized string as the budget key
        assert!(Period::new("+1", 2024).is_err());
        assert!(Period::new("-1", 2024).is_err());
        assert!(Period::new("+", 2024).is_err());
        assert!(Period::new(" 1", 2024).is_err());
    }

    #[test]
    fn test_year_bounds() {
        assert!(Period::new("01", 2019).is_err());
        assert!(Period::new("01", 2101).is_err());
        assert!(Period::new("01", 2020).is_ok());
        assert!(Period::new("01", 2100).is_ok());
    }

    #[test]
    fn test_date_range_covers_whole_month() {
        let (start, end) = Period::new("02", 2024).unwrap().date_range();
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        // 2024 is a leap year
        assert_eq!(end, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());

        let (start, end) = Period::new("12", 2025).unwrap().date_range();
        assert_eq!(start, NaiveDate::from_ymd_opt(2025, 12, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
    }

    #[test]
    fn test_from_optional() {
        assert_eq!(Period::from_optional(None, None).unwrap(), None);
        assert_eq!(Period::from_optional(Some("03"), None).unwrap(), None);
        assert!(Period::from_optional(Some("03"), Some(2024)).unwrap().is_some());
        assert!(Period::from_optional(Some("13"), Some(2024)).is_err());
    }

    #[test]
    fn test_require() {
        assert!(Period::require(None, Some(2024)).is_err());
        assert!(Period::require(Some("03"), Some(2024)).is_ok());
    }
}
