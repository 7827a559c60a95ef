//! Normalization from raw catalog records to [`parampare_core::NormalizedProduct`].
//!
//! Alias resolution is delegated to the precedence table in [`crate::fields`];
//! this module only decides defaults and derived values (weight, image).
//! Normalization never fails: a malformed field falls back to its default.

use parampare_core::products::NO_WEIGHT;
use parampare_core::{NormalizedProduct, VariantRecord};
use rust_decimal::Decimal;
use serde_json::{Map, Value};

use crate::fields;
use crate::image::ImageUrlResolver;
use crate::types::RawProductRecord;

const DEFAULT_CATEGORY: &str = "misc";
const DEFAULT_BRAND: &str = "Brand";

/// Normalizes every record, preserving backend order.
#[must_use]
pub fn normalize_products(
    records: &[RawProductRecord],
    images: &ImageUrlResolver,
) -> Vec<NormalizedProduct> {
    let products: Vec<NormalizedProduct> = records
        .iter()
        .map(|record| normalize_product(record, images))
        .collect();
    tracing::debug!(count = products.len(), "normalized catalog records");
    products
}

/// Normalizes one raw record into a [`NormalizedProduct`].
///
/// The image reference is resolved through `images`; the weight label comes
/// from the first variant. Feeding the JSON serialization of the result back
/// in yields an equal product.
#[must_use]
pub fn normalize_product(
    record: &RawProductRecord,
    images: &ImageUrlResolver,
) -> NormalizedProduct {
    let r = &record.0;

    let id = fields::ID.integer(r);
    let name = fields::NAME.text(r).unwrap_or_else(|| {
        tracing::debug!(id = ?id, "catalog record has no name");
        String::new()
    });

    let category = fields::CATEGORY
        .text(r)
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());
    let category_id = fields::CATEGORY_ID
        .text(r)
        .or_else(|| fields::nested_text(r, "category", "id"));
    let category_name = fields::CATEGORY_NAME
        .text(r)
        .or_else(|| fields::nested_text(r, "category", "name"))
        .or_else(|| fields::string_text(r, "category"));

    let variants = normalize_variants(r);
    let weight = variants
        .first()
        .and_then(VariantRecord::weight_label)
        .unwrap_or_else(|| NO_WEIGHT.to_string());

    let raw_image = fields::IMAGE.text(r);

    NormalizedProduct {
        id,
        name,
        category,
        category_id,
        category_name,
        subcategory: fields::SUBCATEGORY.text(r),
        brand: fields::BRAND
            .text(r)
            .unwrap_or_else(|| DEFAULT_BRAND.to_string()),
        price: fields::PRICE.decimal(r).unwrap_or(Decimal::ZERO),
        sale_price: fields::SALE_PRICE.decimal(r).unwrap_or(Decimal::ZERO),
        original_price: fields::ORIGINAL_PRICE.decimal(r).unwrap_or(Decimal::ZERO),
        rating: fields::RATING.float(r).unwrap_or(0.0),
        bestseller: fields::BESTSELLER.flag(r).unwrap_or(false),
        image: images.resolve(raw_image.as_deref()),
        description: fields::DESCRIPTION.text(r).unwrap_or_default(),
        stock_quantity: fields::STOCK_QUANTITY.integer(r),
        in_stock: fields::IN_STOCK.flag(r) != Some(false),
        weight,
        dietary: fields::DIETARY.strings(r).unwrap_or_default(),
        created_at: fields::CREATED_AT.timestamp(r),
        variants,
    }
}

fn normalize_variants(record: &Map<String, Value>) -> Vec<VariantRecord> {
    let Some(items) = fields::VARIANTS.array(record) else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(Value::as_object)
        .map(normalize_variant)
        .collect()
}

fn normalize_variant(v: &Map<String, Value>) -> VariantRecord {
    VariantRecord {
        id: fields::VARIANT_ID.integer(v),
        price: fields::VARIANT_PRICE.decimal(v),
        original_price: fields::VARIANT_ORIGINAL_PRICE.decimal(v),
        stock_quantity: fields::VARIANT_STOCK_QUANTITY.integer(v),
        weight_value: fields::WEIGHT_VALUE.decimal(v),
        weight_unit: fields::WEIGHT_UNIT.text(v),
        weight: fields::WEIGHT.text(v),
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
