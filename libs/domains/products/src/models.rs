use rust_decimal::{Decimal, RoundingStrategy};
use sea_orm::ActiveValue::{NotSet, Set};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::entity;

/// Fractional digits kept for prices (`NUMERIC(18,2)`).
pub const PRICE_SCALE: u32 = 2;

/// Largest absolute price `NUMERIC(18,2)` can hold, exclusive.
const PRICE_LIMIT: i64 = 10_000_000_000_000_000;

/// Round to [`PRICE_SCALE`] digits, halves away from zero as PostgreSQL
/// `NUMERIC` does.
pub fn round_price(price: Decimal) -> Decimal {
    price.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Product as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Store-assigned identifier
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Mechanical Keyboard")]
    pub name: String,
    #[schema(example = "Tenkeyless, brown switches")]
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 89.99)]
    pub price: Decimal,
}

impl From<entity::Model> for Product {
    fn from(model: entity::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            // SQLite hands decimals back through f64
            price: round_price(model.price),
        }
    }
}

/// Request body for create and update.
///
/// `id` is ignored on create. On update it must equal the id in the path.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct ProductInput {
    #[serde(default)]
    #[schema(example = 1)]
    pub id: Option<i32>,

    #[validate(length(min = 1, max = 100))]
    #[schema(example = "Mechanical Keyboard")]
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default, with = "rust_decimal::serde::float")]
    #[validate(custom(function = "validate_price"))]
    #[schema(value_type = f64, example = 89.99)]
    pub price: Decimal,
}

impl ProductInput {
    pub fn new(name: impl Into<String>, price: Decimal) -> Self {
        Self {
            name: name.into(),
            price,
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: i32) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Insert model. The store assigns the id.
    pub fn into_active_model(self) -> entity::ActiveModel {
        entity::ActiveModel {
            id: NotSet,
            name: Set(self.name),
            description: Set(self.description),
            price: Set(round_price(self.price)),
        }
    }

    /// Full replacement row for `id`.
    pub fn into_model(self, id: i32) -> entity::Model {
        entity::Model {
            id,
            name: self.name,
            description: self.description,
            price: round_price(self.price),
        }
    }
}

fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(ValidationError::new("negative_price")
            .with_message("Price must not be negative".into()));
    }
    if round_price(*price) >= Decimal::from(PRICE_LIMIT) {
        return Err(ValidationError::new("price_out_of_range")
            .with_message("Price does not fit NUMERIC(18,2)".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_input_deserializes_without_id_or_price() {
        let input: ProductInput = serde_json::from_str(r#"{"name":"Test Product"}"#).unwrap();
        assert_eq!(input.id, None);
        assert_eq!(input.price, Decimal::ZERO);
        assert!(input.description.is_none());
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_name_length_bounds() {
        assert!(ProductInput::new("", Decimal::ONE).validate().is_err());
        assert!(ProductInput::new("x".repeat(100), Decimal::ONE).validate().is_ok());
        assert!(ProductInput::new("x".repeat(101), Decimal::ONE).validate().is_err());
    }

    #[test]
    fn test_negative_price_rejected() {
        let errors = ProductInput::new("Pen", dec("-0.01")).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("price"));
    }

    #[test]
    fn test_price_range() {
        assert!(ProductInput::new("Pen", dec("9999999999999999.99")).validate().is_ok());
        assert!(ProductInput::new("Pen", dec("10000000000000000")).validate().is_err());
    }

    #[test]
    fn test_price_rounded_to_two_places() {
        let model = ProductInput::new("Pen", dec("1.235")).into_model(3);
        assert_eq!(model.id, 3);
        assert_eq!(model.price, dec("1.24"));
    }

    #[test]
    fn test_price_halves_round_away_from_zero() {
        // banker's rounding would give 1.22 and 2.34
        assert_eq!(round_price(dec("1.225")), dec("1.23"));
        assert_eq!(round_price(dec("2.345")), dec("2.35"));
        assert_eq!(round_price(dec("-0.005")), dec("-0.01"));

        let active = ProductInput::new("Pen", dec("1.225")).into_active_model();
        assert_eq!(active.price, Set(dec("1.23")));
    }

    #[test]
    fn test_product_serializes_price_as_number() {
        let product = Product {
            id: 1,
            name: "Pen".into(),
            description: None,
            price: dec("2.50"),
        };
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["price"], serde_json::json!(2.5));
        assert!(json["description"].is_null());
    }
}
