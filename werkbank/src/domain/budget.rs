use std::fmt;
use std::ops::Deref;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

static BUDGET_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{1,10}(\.[0-9]{1,2})?$").expect("budget pattern is a valid regex")
});

/// A validated project budget, always normalized to two fraction digits.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Budget(String);

#[derive(Error, Debug, PartialEq)]
pub enum BudgetError {
    #[error("'{0}' is not a valid budget: expected up to 10 digits and at most 2 decimals")]
    InvalidFormat(String),
}

impl TryFrom<&str> for Budget {
    type Error = BudgetError;

    /// Validates a decimal string and converts it into a normalized `Budget`.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        if !BUDGET_PATTERN.is_match(value) {
            return Err(BudgetError::InvalidFormat(value.to_string()));
        }

        let (integer, fraction) = value.split_once('.').unwrap_or((value, ""));
        let integer = integer.trim_start_matches('0');
        let integer = if integer.is_empty() { "0" } else { integer };

        Ok(Self(format!("{integer}.{fraction:0<2}")))
    }
}

impl Deref for Budget {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for Budget {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn normalized(value: &str) -> String {
        Budget::try_from(value).unwrap().to_string()
    }

    #[test]
    fn integers_get_two_fraction_digits() {
        assert_eq!(normalized("12"), "12.00");
        assert_eq!(normalized("0"), "0.00");
    }

    #[test]
    fn short_fractions_are_padded() {
        assert_eq!(normalized("12.5"), "12.50");
        assert_eq!(normalized("12.05"), "12.05");
    }

    #[test]
    fn leading_zeros_are_stripped() {
        assert_eq!(normalized("007.5"), "7.50");
        assert_eq!(normalized("000"), "0.00");
    }

    #[test]
    fn ten_integer_digits_keep_full_precision() {
        assert_eq!(normalized("9999999999.99"), "9999999999.99");
    }

    #[test]
    fn invalid_budgets_are_rejected() {
        for value in [
            "abc", "12.345", "-5", "1,5", "12.", ".5", "12345678901", "1e3", " 12", "",
        ] {
            assert_eq!(
                Budget::try_from(value).unwrap_err(),
                BudgetError::InvalidFormat(value.to_string()),
                "expected {value:?} to be rejected"
            );
        }
    }

    #[test]
    fn non_ascii_digits_are_rejected() {
        assert!(Budget::try_from("١٢").is_err());
    }

    /// Value of a budget string in hundredths.
    fn cents(value: &str) -> u64 {
        let (integer, fraction) = value.split_once('.').unwrap_or((value, ""));
        let integer: u64 = integer.parse().unwrap();
        let fraction: u64 = format!("{fraction:0<2}").parse().unwrap();
        integer * 100 + fraction
    }

    fn invalid_budget() -> impl Strategy<Value = String> {
        prop_oneof![
            "[0-9]{0,5}[a-zA-Z][0-9a-zA-Z.]{0,5}",
            r"-[0-9]{1,10}(\.[0-9]{1,2})?",
            r"[0-9]{1,10}\.[0-9]{3,6}",
        ]
    }

    proptest! {
        #[test]
        fn matching_budgets_keep_their_value_with_two_decimals(
            raw in r"[0-9]{1,10}(\.[0-9]{1,2})?",
        ) {
            let budget = Budget::try_from(raw.as_str()).unwrap();

            let (integer, fraction) = budget.split_once('.').unwrap();
            prop_assert_eq!(fraction.len(), 2);
            prop_assert!(integer == "0" || !integer.starts_with('0'));
            prop_assert_eq!(cents(&budget), cents(&raw));
        }

        #[test]
        fn malformed_budgets_never_parse(raw in invalid_budget()) {
            prop_assert!(Budget::try_from(raw.as_str()).is_err());
        }
    }
}
