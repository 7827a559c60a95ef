//! Catalog API response shapes.
//!
//! ## Observed shape of `GET /api/products`
//!
//! A bare JSON array of product objects. Field names drift between admin
//! edits and backend versions: a product may carry `name` or `title`,
//! `price`/`salePrice`/`mrp`, `imageUrl` or `image`, and `category` as a
//! display name, a numeric id, a slug, or a nested `{ "id", "name" }` object.
//! Records are therefore kept as untyped JSON objects and read through the
//! alias table in [`crate::fields`].
//!
//! ### Variants
//! `variants` is an array of `{ id, price, originalPrice, stockQuantity,
//! weightValue, weightUnit }`. Any entry may be missing fields; non-object
//! entries are ignored.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One product object exactly as the backend returned it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawProductRecord(pub Map<String, Value>);

impl RawProductRecord {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Wraps a JSON value if it is an object.
    #[must_use]
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// Splits a catalog response body into product records.
    ///
    /// Accepts a bare array or an object wrapping one under `products` or
    /// `data`. Entries that are not objects are dropped with a warning.
    #[must_use]
    pub fn list_from_value(value: Value) -> Vec<Self> {
        let items = match value {
            Value::Array(items) => items,
            Value::Object(mut map) => match map
                .remove("products")
                .or_else(|| map.remove("data"))
            {
                Some(Value::Array(items)) => items,
                _ => {
                    tracing::warn!("catalog response object has no product array");
                    return Vec::new();
                }
            },
            other => {
                tracing::warn!(
                    kind = %value_kind(&other),
                    "catalog response is not a product list"
                );
                return Vec::new();
            }
        };

        let total = items.len();
        let records: Vec<Self> = items.into_iter().filter_map(Self::from_value).collect();
        if records.len() < total {
            tracing::warn!(
                skipped = total - records.len(),
                "catalog response contained non-object entries"
            );
        }
        records
    }
}

impl From<Map<String, Value>> for RawProductRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
