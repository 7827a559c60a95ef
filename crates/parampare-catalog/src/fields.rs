//! Field-precedence table for raw catalog records.
//!
//! Each canonical field lists the record keys it may arrive under, in the
//! order they are consulted. The first key whose value converts to the
//! field's type wins; `null`, blank strings, and unconvertible values fall
//! through to the next key. The canonical key is always listed first so a
//! serialized [`parampare_core::NormalizedProduct`] reads back unchanged.

use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde_json::{Map, Value};

/// Ordered aliases for one canonical field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldAliases {
    pub field: &'static str,
    pub keys: &'static [&'static str],
}

const fn aliases(field: &'static str, keys: &'static [&'static str]) -> FieldAliases {
    FieldAliases { field, keys }
}

pub const ID: FieldAliases = aliases("id", &["id", "productId"]);
pub const NAME: FieldAliases = aliases("name", &["name", "title"]);
/// Raw label used for category matching; a nested `{ "name" }` object reads as its name.
pub const CATEGORY: FieldAliases = aliases("category", &["category", "categoryId", "subcategory"]);
pub const CATEGORY_ID: FieldAliases = aliases("categoryId", &["categoryId", "category_id"]);
pub const CATEGORY_NAME: FieldAliases = aliases("categoryName", &["categoryName"]);
pub const SUBCATEGORY: FieldAliases = aliases("subcategory", &["subcategory"]);
pub const BRAND: FieldAliases = aliases("brand", &["brand", "manufacturer"]);
pub const PRICE: FieldAliases = aliases("price", &["price", "salePrice", "mrp"]);
pub const SALE_PRICE: FieldAliases = aliases("salePrice", &["salePrice", "price", "mrp"]);
pub const ORIGINAL_PRICE: FieldAliases =
    aliases("originalPrice", &["originalPrice", "mrp", "price"]);
pub const RATING: FieldAliases = aliases("rating", &["rating", "ratingValue"]);
pub const BESTSELLER: FieldAliases =
    aliases("bestseller", &["bestseller", "bestSeller", "isBestseller"]);
pub const IMAGE: FieldAliases = aliases(
    "image",
    &["image", "imageUrl", "imageURL", "thumbnailUrl", "image_path"],
);
pub const DESCRIPTION: FieldAliases = aliases("description", &["description"]);
pub const STOCK_QUANTITY: FieldAliases =
    aliases("stockQuantity", &["stockQuantity", "stock_quantity", "stock"]);
pub const IN_STOCK: FieldAliases = aliases("inStock", &["inStock", "in_stock"]);
pub const DIETARY: FieldAliases = aliases("dietary", &["dietary", "dietaryTags"]);
pub const CREATED_AT: FieldAliases = aliases("createdAt", &["createdAt", "created_at"]);
pub const VARIANTS: FieldAliases = aliases("variants", &["variants"]);

pub const PRODUCT_FIELDS: [FieldAliases; 19] = [
    ID,
    NAME,
    CATEGORY,
    CATEGORY_ID,
    CATEGORY_NAME,
    SUBCATEGORY,
    BRAND,
    PRICE,
    SALE_PRICE,
    ORIGINAL_PRICE,
    RATING,
    BESTSELLER,
    IMAGE,
    DESCRIPTION,
    STOCK_QUANTITY,
    IN_STOCK,
    DIETARY,
    CREATED_AT,
    VARIANTS,
];

pub const VARIANT_ID: FieldAliases = aliases("id", &["id", "variantId"]);
pub const VARIANT_PRICE: FieldAliases = aliases("price", &["price"]);
pub const VARIANT_ORIGINAL_PRICE: FieldAliases =
    aliases("originalPrice", &["originalPrice", "mrp"]);
pub const VARIANT_STOCK_QUANTITY: FieldAliases =
    aliases("stockQuantity", &["stockQuantity", "stock"]);
pub const WEIGHT_VALUE: FieldAliases = aliases("weightValue", &["weightValue"]);
pub const WEIGHT_UNIT: FieldAliases = aliases("weightUnit", &["weightUnit"]);
pub const WEIGHT: FieldAliases = aliases("weight", &["weight"]);

pub const VARIANT_FIELDS: [FieldAliases; 7] = [
    VARIANT_ID,
    VARIANT_PRICE,
    VARIANT_ORIGINAL_PRICE,
    VARIANT_STOCK_QUANTITY,
    WEIGHT_VALUE,
    WEIGHT_UNIT,
    WEIGHT,
];

impl FieldAliases {
    fn read<T>(
        &self,
        record: &Map<String, Value>,
        convert: impl Fn(&Value) -> Option<T>,
    ) -> Option<T> {
        self.keys
            .iter()
            .filter_map(|key| record.get(*key))
            .find_map(convert)
    }

    /// First alias holding a non-blank string, a number, or an object with a `name`.
    #[must_use]
    pub fn text(&self, record: &Map<String, Value>) -> Option<String> {
        self.read(record, as_text)
    }

    #[must_use]
    pub fn decimal(&self, record: &Map<String, Value>) -> Option<Decimal> {
        self.read(record, as_decimal)
    }

    #[must_use]
    pub fn float(&self, record: &Map<String, Value>) -> Option<f64> {
        self.read(record, as_float)
    }

    #[must_use]
    pub fn integer(&self, record: &Map<String, Value>) -> Option<i64> {
        self.read(record, as_integer)
    }

    #[must_use]
    pub fn flag(&self, record: &Map<String, Value>) -> Option<bool> {
        self.read(record, as_flag)
    }

    /// String list from a JSON array or a comma-separated string.
    #[must_use]
    pub fn strings(&self, record: &Map<String, Value>) -> Option<Vec<String>> {
        self.read(record, as_strings)
    }

    #[must_use]
    pub fn timestamp(&self, record: &Map<String, Value>) -> Option<DateTime<Utc>> {
        self.read(record, as_timestamp)
    }

    /// First alias holding a JSON array.
    #[must_use]
    pub fn array<'a>(&self, record: &'a Map<String, Value>) -> Option<&'a Vec<Value>> {
        self.keys
            .iter()
            .filter_map(|key| record.get(*key))
            .find_map(Value::as_array)
    }
}

/// Reads `record[outer][inner]` as text, for nested objects like `category.id`.
#[must_use]
pub fn nested_text(record: &Map<String, Value>, outer: &str, inner: &str) -> Option<String> {
    record
        .get(outer)
        .and_then(Value::as_object)
        .and_then(|obj| obj.get(inner))
        .and_then(as_text)
}

/// Reads `record[key]` only when it is a non-blank JSON string.
#[must_use]
pub fn string_text(record: &Map<String, Value>, key: &str) -> Option<String> {
    record
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Object(obj) => obj.get("name").and_then(as_text),
        _ => None,
    }
}

fn as_decimal(value: &Value) -> Option<Decimal> {
    let raw = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return None,
    };
    Decimal::from_str(&raw)
        .or_else(|_| Decimal::from_scientific(&raw))
        .ok()
}

fn as_float(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|f| f.is_finite())
}

#[allow(clippy::cast_possible_truncation)]
fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < 9.0e15)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn as_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn as_strings(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::Array(items) => Some(items.iter().filter_map(as_text).collect()),
        Value::String(s) => Some(
            s.split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect(),
        ),
        _ => None,
    }
}

/// RFC 3339, or a zone-less `YYYY-MM-DDTHH:MM:SS[.fff]` taken as UTC.
fn as_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    let raw = value.as_str()?.trim();
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|naive| naive.and_utc())
        })
}
