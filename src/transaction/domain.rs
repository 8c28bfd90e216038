//! Validated value types that make up a transaction.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize, Serializer};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::error::FieldError;

/// The only accepted format for calendar dates, e.g. "2025-08-01".
pub(crate) const DATE_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day]");

/// Parse a `YYYY-MM-DD` date, returning `None` for anything else.
///
/// Signed or expanded years such as "+2025-08-01" are rejected since dates
/// are compared as text in the database.
pub(crate) fn parse_date(text: &str) -> Option<Date> {
    if text.len() != 10 || !text.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }

    Date::parse(text, DATE_FORMAT).ok()
}

/// A signed amount of money with exactly two decimal places.
///
/// Stored as a whole number of hundredths (cents) so that sums are exact.
/// Serialises as a string with two decimal places, e.g. "-45.90", and
/// deserialises from either that string or a JSON number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "AmountRepr")]
pub struct Amount(i64);

impl Amount {
    /// The largest magnitude that fits in 14 digits with 2 fractional digits.
    pub const MAX_CENTS: i64 = 99_999_999_999_999;

    /// Create an amount from a whole number of hundredths.
    ///
    /// The caller should ensure `cents` is within [Amount::MAX_CENTS].
    pub fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Round `value` to two decimal places.
    ///
    /// Returns `None` if `value` is not finite or does not fit in 14 digits.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }

        let cents = (value * 100.0).round();

        if cents.abs() > Self::MAX_CENTS as f64 {
            return None;
        }

        Some(Self(cents as i64))
    }

    /// The amount as a whole number of hundredths.
    pub fn cents(self) -> i64 {
        self.0
    }

    /// The amount as a floating point number, e.g. for totals in JSON.
    pub fn as_f64(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let magnitude = self.0.unsigned_abs();

        write!(f, "{sign}{}.{:02}", magnitude / 100, magnitude % 100)
    }
}

impl FromStr for Amount {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| {
                FieldError::new("amount", "number", "The amount field must be a number")
            })?;

        Self::from_f64(value).ok_or_else(amount_out_of_range_error)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AmountRepr {
    Number(f64),
    Text(String),
}

impl TryFrom<AmountRepr> for Amount {
    type Error = FieldError;

    fn try_from(value: AmountRepr) -> Result<Self, Self::Error> {
        match value {
            AmountRepr::Number(number) => {
                Amount::from_f64(number).ok_or_else(amount_out_of_range_error)
            }
            AmountRepr::Text(text) => text.parse(),
        }
    }
}

/// The error for an amount that does not fit in 14 digits.
pub(crate) fn amount_out_of_range_error() -> FieldError {
    FieldError::new(
        "amount",
        "range",
        "The amount field must have at most 12 digits before the decimal point",
    )
}

/// A three character currency code such as "USD".
///
/// The code is not checked against a list of real currencies.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// The number of characters in every currency code.
    pub const LENGTH: usize = 3;

    /// Create a currency code from user input.
    ///
    /// Surrounding whitespace is removed and the code is uppercased.
    ///
    /// # Errors
    ///
    /// Returns a [FieldError] if the normalised code is not exactly
    /// [CurrencyCode::LENGTH] characters long.
    pub fn new(code: &str) -> Result<Self, FieldError> {
        let code = code.trim().to_uppercase();

        if code.chars().count() == Self::LENGTH {
            Ok(Self(code))
        } else {
            Err(FieldError::new(
                "currency",
                "fixedLength",
                format!(
                    "The currency field must be {} characters long",
                    Self::LENGTH
                ),
            ))
        }
    }

    /// Create a currency code without validation.
    ///
    /// The caller should ensure that the code is three uppercase characters.
    pub fn new_unchecked(code: &str) -> Self {
        Self(code.to_string())
    }
}

impl AsRef<str> for CurrencyCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated, non-empty category label, e.g. "Groceries".
///
/// Categories are free text, so "Food" and "food" are different categories.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Hash)]
pub struct CategoryName(String);

impl CategoryName {
    /// The maximum number of characters in a category name.
    pub const MAX_LENGTH: usize = 64;

    /// Create a category name, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns a [FieldError] if the trimmed name is empty or longer than
    /// [CategoryName::MAX_LENGTH] characters.
    pub fn new(name: &str) -> Result<Self, FieldError> {
        let name = name.trim();

        if name.is_empty() {
            Err(FieldError::new(
                "category",
                "required",
                "The category field must be defined",
            ))
        } else if name.chars().count() > Self::MAX_LENGTH {
            Err(FieldError::new(
                "category",
                "maxLength",
                format!(
                    "The category field must not be greater than {} characters",
                    Self::MAX_LENGTH
                ),
            ))
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a category name without validation.
    ///
    /// The caller should ensure that the string is trimmed, not empty and
    /// within the length limit.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod amount_tests {
    use super::Amount;

    #[test]
    fn rounds_to_two_decimal_places() {
        assert_eq!(Amount::from_f64(10.0), Some(Amount::from_cents(1000)));
        assert_eq!(Amount::from_f64(5.256), Some(Amount::from_cents(526)));
        assert_eq!(Amount::from_f64(-3.754), Some(Amount::from_cents(-375)));
    }

    #[test]
    fn displays_exactly_two_decimal_places() {
        assert_eq!(Amount::from_cents(1000).to_string(), "10.00");
        assert_eq!(Amount::from_cents(525).to_string(), "5.25");
        assert_eq!(Amount::from_cents(5).to_string(), "0.05");
        assert_eq!(Amount::from_cents(-4590).to_string(), "-45.90");
        assert_eq!(Amount::from_cents(-5).to_string(), "-0.05");
        assert_eq!(Amount::from_cents(0).to_string(), "0.00");
    }

    #[test]
    fn rejects_values_that_do_not_fit_the_column() {
        assert_eq!(
            Amount::from_f64(999_999_999_999.99),
            Some(Amount::from_cents(Amount::MAX_CENTS))
        );
        assert_eq!(Amount::from_f64(1_000_000_000_000.0), None);
        assert_eq!(Amount::from_f64(f64::NAN), None);
        assert_eq!(Amount::from_f64(f64::INFINITY), None);
    }

    #[test]
    fn parses_numeric_strings() {
        assert_eq!("12.3".parse::<Amount>(), Ok(Amount::from_cents(1230)));
        assert_eq!(" -7 ".parse::<Amount>(), Ok(Amount::from_cents(-700)));

        let error = "twelve".parse::<Amount>().unwrap_err();
        assert_eq!(error.rule, "number");
    }

    #[test]
    fn non_finite_strings_are_not_numbers() {
        for text in ["NaN", "inf", "-infinity"] {
            let error = text.parse::<Amount>().unwrap_err();

            assert_eq!(error.rule, "number", "for text {text:?}");
        }
    }

    #[test]
    fn serialises_as_string_and_deserialises_from_number_or_string() {
        let amount = Amount::from_cents(1525);

        assert_eq!(serde_json::to_string(&amount).unwrap(), "\"15.25\"");
        assert_eq!(serde_json::from_str::<Amount>("\"15.25\"").unwrap(), amount);
        assert_eq!(serde_json::from_str::<Amount>("15.25").unwrap(), amount);
    }
}

#[cfg(test)]
mod currency_code_tests {
    use super::CurrencyCode;

    #[test]
    fn trims_and_uppercases() {
        assert_eq!(
            CurrencyCode::new("  usd "),
            Ok(CurrencyCode::new_unchecked("USD"))
        );
    }

    #[test]
    fn rejects_wrong_length() {
        for code in ["US", "", "   ", "USDT"] {
            let error = CurrencyCode::new(code).unwrap_err();
            assert_eq!(error.field, "currency", "for code {code:?}");
            assert_eq!(error.rule, "fixedLength", "for code {code:?}");
        }
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert!(CurrencyCode::new("€€€").is_ok());
    }
}
