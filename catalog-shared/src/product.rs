//! Canonical product entity and client-supplied input.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when validating client-supplied product input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The product name is empty or whitespace-only.
    #[error("name must be a non-empty string")]
    EmptyName,

    /// The product brand is empty or whitespace-only.
    #[error("brand must be a non-empty string")]
    EmptyBrand,

    /// The price is negative, NaN, or infinite.
    #[error("price must be a finite, non-negative number")]
    InvalidPrice,
}

/// A product as stored in the record store.
///
/// The record store is the source of truth for this entity; the search
/// index only ever holds a derived projection of it (see
/// [`crate::ProductDocument`]). The `id` is assigned by the record store on
/// creation and is immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Primary key, assigned by the record store.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Brand name.
    pub brand: String,
    /// Unit price, non-negative.
    pub price: f64,
    /// Whether the product is currently in stock.
    pub in_stock: bool,
}

/// Client-supplied product data, without an `id`.
///
/// This is the request body for create and full-replacement update calls.
/// [`ProductInput::validate`] is the only path from raw input to a record
/// store write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductInput {
    pub name: String,
    pub brand: String,
    pub price: f64,
    /// Defaults to `true` when absent from the request body.
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
}

fn default_in_stock() -> bool {
    true
}

impl ProductInput {
    /// Validate the input shape: non-empty text fields, finite non-negative price.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.brand.trim().is_empty() {
            return Err(ValidationError::EmptyBrand);
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(ValidationError::InvalidPrice);
        }
        Ok(())
    }

    /// Combine this input with a store-assigned id into a full entity.
    pub fn into_product(self, id: i64) -> Product {
        Product {
            id,
            name: self.name,
            brand: self.brand,
            price: self.price,
            in_stock: self.in_stock,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> ProductInput {
        ProductInput {
            name: "SamsungX12".to_string(),
            brand: "FuzzyBrand".to_string(),
            price: 600.0,
            in_stock: true,
        }
    }

    #[test]
    fn test_valid_input() {
        assert!(input().validate().is_ok());
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut i = input();
        i.name = "   ".to_string();
        assert_eq!(i.validate(), Err(ValidationError::EmptyName));
    }

    #[test]
    fn test_empty_brand_rejected() {
        let mut i = input();
        i.brand = String::new();
        assert_eq!(i.validate(), Err(ValidationError::EmptyBrand));
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut i = input();
        i.price = -1.0;
        assert_eq!(i.validate(), Err(ValidationError::InvalidPrice));
    }

    #[test]
    fn test_nan_price_rejected() {
        let mut i = input();
        i.price = f64::NAN;
        assert_eq!(i.validate(), Err(ValidationError::InvalidPrice));
    }

    #[test]
    fn test_in_stock_defaults_to_true() {
        let parsed: ProductInput =
            serde_json::from_str(r#"{"name":"A","brand":"B","price":1.5}"#).unwrap();
        assert!(parsed.in_stock);
    }

    #[test]
    fn test_into_product() {
        let product = input().into_product(42);
        assert_eq!(product.id, 42);
        assert_eq!(product.name, "SamsungX12");
        assert_eq!(product.brand, "FuzzyBrand");
    }
}
