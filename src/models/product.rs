use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::FieldViolation;

/// Core product entity. Never mutated after the store hands it out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Stamps a validated payload with its store-assigned id and creation time.
    pub fn new(id: i64, new: NewProduct, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: new.name,
            price: new.price,
            created_at,
        }
    }
}

// ── Request payloads ─────────────────────────────────────────────────────────

/// Raw `POST /items` body. Fields stay untyped JSON so that `validate` can
/// report a missing, null or mistyped field against its own name.
#[derive(Debug, Default, Deserialize)]
pub struct CreateProduct {
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub price: Option<Value>,
}

/// Keeps an explicit `null` as `Some(Value::Null)`; only an absent key is `None`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// A create payload that passed validation: `name` non-empty, `price > 0`.
/// Only obtainable through [`CreateProduct::validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    name: String,
    price: f64,
}

impl CreateProduct {
    /// Checks every field and reports all violations at once.
    pub fn validate(self) -> Result<NewProduct, Vec<FieldViolation>> {
        let mut violations = Vec::new();

        let name = match self.name {
            None => {
                violations.push(FieldViolation::missing("body", "name"));
                None
            }
            Some(Value::String(name)) if name.is_empty() => {
                violations.push(FieldViolation::new(
                    "body",
                    "name",
                    "String should have at least 1 character",
                    "string_too_short",
                ));
                None
            }
            Some(Value::String(name)) => Some(name),
            Some(_) => {
                violations.push(FieldViolation::new(
                    "body",
                    "name",
                    "Input should be a valid string",
                    "string_type",
                ));
                None
            }
        };

        // strict: numeric strings such as "1000" are not coerced
        let price = match self.price.as_ref().map(Value::as_f64) {
            None => {
                violations.push(FieldViolation::missing("body", "price"));
                None
            }
            Some(None) => {
                violations.push(FieldViolation::new(
                    "body",
                    "price",
                    "Input should be a valid number",
                    "float_type",
                ));
                None
            }
            Some(Some(price)) if price <= 0.0 => {
                violations.push(FieldViolation::new(
                    "body",
                    "price",
                    "Input should be greater than 0",
                    "greater_than",
                ));
                None
            }
            Some(Some(price)) => Some(price),
        };

        match (name, price) {
            (Some(name), Some(price)) if violations.is_empty() => Ok(NewProduct { name, price }),
            _ => Err(violations),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn payload(body: Value) -> CreateProduct {
        serde_json::from_value(body).unwrap()
    }

    fn reported(violations: &[FieldViolation]) -> Vec<(&str, &str)> {
        violations.iter().map(|v| (v.field(), v.kind())).collect()
    }

    #[test]
    fn valid_payload_passes() {
        let new = payload(json!({ "name": "Widget", "price": 1000.0 })).validate().unwrap();
        assert_eq!(new.name, "Widget");
        assert_eq!(new.price, 1000.0);
    }

    #[test]
    fn smallest_accepted_values() {
        let new = payload(json!({ "name": "a", "price": 0.01 })).validate().unwrap();
        assert_eq!(new.name, "a");
    }

    #[test]
    fn integer_price_is_accepted() {
        let new = payload(json!({ "name": "Widget", "price": 3 })).validate().unwrap();
        assert_eq!(new.price, 3.0);
    }

    #[test]
    fn whitespace_name_is_not_trimmed() {
        assert!(payload(json!({ "name": " ", "price": 1.0 })).validate().is_ok());
    }

    #[test]
    fn empty_name_is_rejected() {
        let err = payload(json!({ "name": "", "price": 1000.0 })).validate().unwrap_err();
        assert_eq!(reported(&err), vec![("name", "string_too_short")]);
    }

    #[test]
    fn zero_and_negative_prices_are_rejected() {
        for price in [json!(0), json!(0.0), json!(-0.0), json!(-100.0)] {
            let err = payload(json!({ "name": "Widget", "price": price }))
                .validate()
                .unwrap_err();
            assert_eq!(reported(&err), vec![("price", "greater_than")], "price {price}");
        }
    }

    #[test]
    fn missing_fields_are_reported_individually() {
        let err = payload(json!({})).validate().unwrap_err();
        assert_eq!(reported(&err), vec![("name", "missing"), ("price", "missing")]);
    }

    #[test]
    fn null_is_a_type_error_not_a_missing_field() {
        let err = payload(json!({ "name": null, "price": null })).validate().unwrap_err();
        assert_eq!(
            reported(&err),
            vec![("name", "string_type"), ("price", "float_type")]
        );
    }

    #[test]
    fn mistyped_fields_are_named_alongside_other_violations() {
        let err = payload(json!({ "name": "", "price": "cheap" })).validate().unwrap_err();
        assert_eq!(
            reported(&err),
            vec![("name", "string_too_short"), ("price", "float_type")]
        );

        let err = payload(json!({ "name": 7, "price": -1 })).validate().unwrap_err();
        assert_eq!(
            reported(&err),
            vec![("name", "string_type"), ("price", "greater_than")]
        );
    }

    #[test]
    fn numeric_strings_are_not_coerced() {
        let err = payload(json!({ "name": "A", "price": "1000" })).validate().unwrap_err();
        assert_eq!(reported(&err), vec![("price", "float_type")]);
    }

    #[test]
    fn product_serializes_with_iso_timestamp() {
        let created_at = DateTime::parse_from_rfc3339("2024-05-01T12:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let new = payload(json!({ "name": "A", "price": 1000.0 })).validate().unwrap();
        let product = Product::new(1, new, created_at);

        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(
            json,
            json!({
                "id": 1,
                "name": "A",
                "price": 1000.0,
                "created_at": "2024-05-01T12:30:00Z",
            })
        );
    }
}
