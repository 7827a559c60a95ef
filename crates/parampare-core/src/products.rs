use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Display weight used when a product has no variant weight.
pub const NO_WEIGHT: &str = "N/A";

/// A catalog product in canonical shape: exactly one value per concern,
/// whatever aliases the backend used.
///
/// Serializes with the same camelCase keys the normalizer reads first, so a
/// serialized product normalizes back to itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedProduct {
    /// Backend numeric id. Also the recency proxy for newest/oldest sorting.
    pub id: Option<i64>,
    pub name: String,
    /// Raw category label as the backend sent it (name, slug, or id).
    pub category: String,
    pub category_id: Option<String>,
    /// Display label, when the backend sent one.
    pub category_name: Option<String>,
    pub subcategory: Option<String>,
    pub brand: String,
    pub price: Decimal,
    /// Current selling price; all price filters and sorts use this.
    pub sale_price: Decimal,
    pub original_price: Decimal,
    pub rating: f64,
    pub bestseller: bool,
    /// Fully resolved image URL, or the placeholder path. Never empty.
    pub image: String,
    pub description: String,
    pub stock_quantity: Option<i64>,
    pub in_stock: bool,
    /// Weight label of the first variant, e.g. `"500ml"`, or `"N/A"`.
    pub weight: String,
    pub dietary: Vec<String>,
    pub created_at: Option<DateTime<Utc>>,
    /// Variants in backend order.
    pub variants: Vec<VariantRecord>,
}

impl NormalizedProduct {
    /// The variant the storefront shows by default.
    #[must_use]
    pub fn first_variant(&self) -> Option<&VariantRecord> {
        self.variants.first()
    }

    /// `true` when the original price is above the selling price.
    #[must_use]
    pub fn is_discounted(&self) -> bool {
        self.original_price > self.sale_price
    }
}

/// One purchasable pack size of a product, e.g. 500ml or 1L.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantRecord {
    pub id: Option<i64>,
    pub price: Option<Decimal>,
    pub original_price: Option<Decimal>,
    pub stock_quantity: Option<i64>,
    pub weight_value: Option<Decimal>,
    pub weight_unit: Option<String>,
    /// Pre-formatted weight label; wins over `weight_value` + `weight_unit`.
    pub weight: Option<String>,
}

impl VariantRecord {
    /// Human label for the pack size.
    ///
    /// Prefers the explicit `weight` string, then `weight_value` followed by
    /// `weight_unit` (a zero value counts as absent). `None` if neither is set.
    #[must_use]
    pub fn weight_label(&self) -> Option<String> {
        if let Some(weight) = self.weight.as_deref().map(str::trim) {
            if !weight.is_empty() {
                return Some(weight.to_string());
            }
        }
        let value = self.weight_value.filter(|v| !v.is_zero())?;
        Some(format!(
            "{}{}",
            value.normalize(),
            self.weight_unit.as_deref().unwrap_or_default()
        ))
    }
}
