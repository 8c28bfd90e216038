//! Validation of the JSON body used to create a transaction.

use serde::Deserialize;
use serde_json::Value;

use crate::{
    error::{FieldError, ValidationErrors},
    transaction::{
        core::{NewTransaction, Transaction},
        domain::{Amount, CategoryName, CurrencyCode, amount_out_of_range_error, parse_date},
    },
};

/// The raw JSON body for creating a transaction.
///
/// Fields are kept as untyped JSON so that every field can be checked and
/// reported, instead of stopping at the first one serde cannot parse.
#[derive(Debug, Default, Deserialize)]
pub struct TransactionPayload {
    /// A JSON number or numeric string.
    #[serde(default)]
    pub amount: Option<Value>,
    /// A three character currency code, case-insensitive.
    #[serde(default)]
    pub currency: Option<Value>,
    /// The date in the format `YYYY-MM-DD`.
    #[serde(default)]
    pub date: Option<Value>,
    /// Optional text detailing the transaction.
    #[serde(default)]
    pub description: Option<Value>,
    /// The grouping label for the transaction.
    #[serde(default)]
    pub category: Option<Value>,
}

impl TransactionPayload {
    /// Check every field and build a [NewTransaction] from the normalised values.
    ///
    /// # Errors
    /// Returns all of the failed fields if any field is missing or invalid.
    pub fn validate(self) -> Result<NewTransaction, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let amount = collect(validate_amount(self.amount), &mut errors);
        let currency = collect(
            required_string("currency", self.currency).and_then(|code| CurrencyCode::new(&code)),
            &mut errors,
        );
        let date = collect(validate_date(self.date), &mut errors);
        let description = collect(validate_description(self.description), &mut errors);
        let category = collect(
            required_string("category", self.category).and_then(|name| CategoryName::new(&name)),
            &mut errors,
        );

        match (amount, currency, date, description, category) {
            (Some(amount), Some(currency), Some(date), Some(description), Some(category))
                if errors.is_empty() =>
            {
                Ok(Transaction::build(amount, currency, date, category).description(&description))
            }
            _ => Err(errors),
        }
    }
}

fn collect<T>(result: Result<T, FieldError>, errors: &mut ValidationErrors) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(error) => {
            errors.push(error);
            None
        }
    }
}

fn required_error(field: &str) -> FieldError {
    FieldError::new(field, "required", format!("The {field} field must be defined"))
}

fn required_string(field: &str, value: Option<Value>) -> Result<String, FieldError> {
    match value {
        None | Some(Value::Null) => Err(required_error(field)),
        Some(Value::String(text)) => Ok(text),
        Some(_) => Err(FieldError::new(
            field,
            "string",
            format!("The {field} field must be a string"),
        )),
    }
}

fn validate_amount(value: Option<Value>) -> Result<Amount, FieldError> {
    match value {
        None | Some(Value::Null) => Err(required_error("amount")),
        Some(Value::String(text)) if text.trim().is_empty() => Err(required_error("amount")),
        Some(Value::Number(number)) => number
            .as_f64()
            .and_then(Amount::from_f64)
            .ok_or_else(amount_out_of_range_error),
        Some(Value::String(text)) => text.parse(),
        Some(_) => Err(FieldError::new(
            "amount",
            "number",
            "The amount field must be a number",
        )),
    }
}

fn validate_date(value: Option<Value>) -> Result<time::Date, FieldError> {
    let text = required_string("date", value)?;

    parse_date(&text).ok_or_else(|| {
        FieldError::new(
            "date",
            "date",
            "The date field must be a datetime value in YYYY-MM-DD format",
        )
    })
}

fn validate_description(value: Option<Value>) -> Result<String, FieldError> {
    let description = match value {
        None | Some(Value::Null) => return Ok(String::new()),
        Some(_) => required_string("description", value)?,
    };

    if description.chars().count() > NewTransaction::MAX_DESCRIPTION_LENGTH {
        return Err(FieldError::new(
            "description",
            "maxLength",
            format!(
                "The description field must not be greater than {} characters",
                NewTransaction::MAX_DESCRIPTION_LENGTH
            ),
        ));
    }

    Ok(description)
}

#[cfg(test)]
mod validate_tests {
    use serde_json::{Value, json};
    use time::macros::date;

    use crate::transaction::{Amount, CategoryName, CurrencyCode, Transaction};

    use super::TransactionPayload;

    fn payload(value: Value) -> TransactionPayload {
        serde_json::from_value(value).expect("Could not deserialise payload")
    }

    #[test]
    fn valid_payload_is_normalised() {
        let got = payload(json!({
            "amount": 10.5,
            "currency": " usd ",
            "date": "2025-08-01",
            "category": " Food ",
            "description": "lunch",
        }))
        .validate();

        let want = Transaction::build(
            Amount::from_cents(1050),
            CurrencyCode::new_unchecked("USD"),
            date!(2025 - 08 - 01),
            CategoryName::new_unchecked("Food"),
        )
        .description("lunch");
        assert_eq!(got, Ok(want));
    }

    #[test]
    fn missing_description_defaults_to_empty() {
        let got = payload(json!({
            "amount": 1,
            "currency": "NZD",
            "date": "2025-08-01",
            "category": "Misc",
        }))
        .validate()
        .unwrap();

        assert_eq!(got.description, "");
    }

    #[test]
    fn null_description_defaults_to_empty() {
        let got = payload(json!({
            "amount": 1,
            "currency": "NZD",
            "date": "2025-08-01",
            "category": "Misc",
            "description": null,
        }))
        .validate()
        .unwrap();

        assert_eq!(got.description, "");
    }

    #[test]
    fn numeric_string_amount_is_accepted() {
        let got = payload(json!({
            "amount": "3.756",
            "currency": "EUR",
            "date": "2025-08-01",
            "category": "Misc",
        }))
        .validate()
        .unwrap();

        assert_eq!(got.amount, Amount::from_cents(376));
    }

    #[test]
    fn two_character_currency_fails() {
        let errors = payload(json!({
            "amount": 10,
            "currency": "US",
            "date": "2025-08-01",
            "category": "Food",
        }))
        .validate()
        .unwrap_err();

        assert_eq!(errors.errors.len(), 1);
        assert_eq!(errors.errors[0].field, "currency");
        assert_eq!(errors.errors[0].rule, "fixedLength");
    }

    #[test]
    fn empty_body_reports_every_required_field() {
        let errors = payload(json!({})).validate().unwrap_err();

        for field in ["amount", "currency", "date", "category"] {
            assert!(errors.contains_field(field), "want error for {field}, got {errors:?}");
        }
        assert!(!errors.contains_field("description"));
    }

    #[test]
    fn reports_all_invalid_fields() {
        let errors = payload(json!({
            "amount": "lots",
            "currency": 840,
            "date": "01/08/2025",
            "category": "a".repeat(65),
            "description": "b".repeat(256),
        }))
        .validate()
        .unwrap_err();

        let rules: Vec<(&str, &str)> = errors
            .errors
            .iter()
            .map(|error| (error.field.as_str(), error.rule.as_str()))
            .collect();
        assert_eq!(
            rules,
            vec![
                ("amount", "number"),
                ("currency", "string"),
                ("date", "date"),
                ("description", "maxLength"),
                ("category", "maxLength"),
            ]
        );
    }

    #[test]
    fn amount_out_of_range_fails() {
        let errors = payload(json!({
            "amount": 1e13,
            "currency": "USD",
            "date": "2025-08-01",
            "category": "Food",
        }))
        .validate()
        .unwrap_err();

        assert_eq!(errors.errors[0].field, "amount");
        assert_eq!(errors.errors[0].rule, "range");
    }

    #[test]
    fn boolean_amount_fails() {
        let errors = payload(json!({
            "amount": true,
            "currency": "USD",
            "date": "2025-08-01",
            "category": "Food",
        }))
        .validate()
        .unwrap_err();

        assert_eq!(errors.errors[0].rule, "number");
    }

    #[test]
    fn blank_category_fails() {
        let errors = payload(json!({
            "amount": 1,
            "currency": "USD",
            "date": "2025-08-01",
            "category": "   ",
        }))
        .validate()
        .unwrap_err();

        assert_eq!(errors.errors[0].field, "category");
        assert_eq!(errors.errors[0].rule, "required");
    }

    #[test]
    fn description_at_max_length_is_accepted() {
        let got = payload(json!({
            "amount": 1,
            "currency": "USD",
            "date": "2025-08-01",
            "category": "Food",
            "description": "b".repeat(255),
        }))
        .validate();

        assert!(got.is_ok());
    }
}
