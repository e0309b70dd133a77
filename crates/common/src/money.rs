//! Amounts are stored and summed as integer cents so that aggregation is
//! exact. Dollars only exist at the API boundary: requests arrive as dollar
//! amounts and responses serialize cents back to dollars in one division.

use serde::Serializer;

pub fn to_cents(dollars: f64) -> i64 {
    (dollars * 100.0).round() as i64
}

pub fn to_dollars(cents: i64) -> f64 {
    cents as f64 / 100.0
}

/// Serde helper for response structs holding cent fields.
pub fn serialize_cents<S>(cents: &i64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_f64(to_dollars(*cents))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_cents_rounds() {
        assert_eq!(to_cents(45.50), 4550);
        assert_eq!(to_cents(0.1), 10);
        assert_eq!(to_cents(19.999), 2000);
    }

    #[test]
    fn test_to_dollars() {
        assert_eq!(to_dollars(4550), 45.5);
        assert_eq!(to_dollars(0), 0.0);
        assert_eq!(to_dollars(-2000), -20.0);
    }
}
