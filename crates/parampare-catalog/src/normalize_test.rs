use serde_json::json;

use super::*;
use crate::image::PLACEHOLDER_IMAGE;

const BASE: &str = "http://localhost:8080";

fn resolver() -> ImageUrlResolver {
    ImageUrlResolver::new(BASE)
}

fn raw(value: Value) -> RawProductRecord {
    RawProductRecord::from_value(value).expect("fixture must be an object")
}

fn full_record() -> RawProductRecord {
    raw(json!({
        "id": 42,
        "title": "Cold Pressed Groundnut Oil",
        "category": { "id": 1, "name": "Wood Pressed Oils" },
        "subcategory": "Groundnut",
        "manufacturer": "Sanatana",
        "salePrice": "349.50",
        "mrp": 420,
        "ratingValue": "4.6",
        "isBestseller": true,
        "imageUrl": "/api/admin/products/api/admin/products/groundnut.jpg",
        "description": "  Traditional chekku oil.  ",
        "stock": 17,
        "dietaryTags": "vegan, gluten-free",
        "created_at": "2024-03-01T09:30:00",
        "variants": [
            { "id": 7, "price": 349.5, "mrp": 420, "stock": 10, "weightValue": 1, "weightUnit": "L" },
            "not a variant",
            { "variantId": 8, "price": 189, "weight": "500ml" }
        ]
    }))
}

// -----------------------------------------------------------------------
// normalize_product
// -----------------------------------------------------------------------

#[test]
fn reads_aliased_fields() {
    let product = normalize_product(&full_record(), &resolver());
    assert_eq!(product.id, Some(42));
    assert_eq!(product.name, "Cold Pressed Groundnut Oil");
    assert_eq!(product.brand, "Sanatana");
    assert_eq!(product.subcategory.as_deref(), Some("Groundnut"));
    assert_eq!(product.description, "Traditional chekku oil.");
    assert_eq!(product.stock_quantity, Some(17));
    assert!(product.bestseller);
    assert!((product.rating - 4.6).abs() < f64::EPSILON);
    assert_eq!(product.dietary, vec!["vegan", "gluten-free"]);
    assert!(product.created_at.is_some());
}

#[test]
fn price_fields_follow_their_own_precedence() {
    let product = normalize_product(&full_record(), &resolver());
    // no `price` key: price falls to salePrice
    assert_eq!(product.price, Decimal::new(34950, 2));
    assert_eq!(product.sale_price, Decimal::new(34950, 2));
    assert_eq!(product.original_price, Decimal::from(420));
}

#[test]
fn nested_category_object_supplies_id_and_name() {
    let product = normalize_product(&full_record(), &resolver());
    assert_eq!(product.category, "Wood Pressed Oils");
    assert_eq!(product.category_id.as_deref(), Some("1"));
    assert_eq!(product.category_name.as_deref(), Some("Wood Pressed Oils"));
}

#[test]
fn string_category_doubles_as_category_name() {
    let product = normalize_product(&raw(json!({ "id": 1, "category": "Ghee" })), &resolver());
    assert_eq!(product.category, "Ghee");
    assert_eq!(product.category_name.as_deref(), Some("Ghee"));
    assert_eq!(renormalize(&product, &resolver()), product);
}

#[test]
fn explicit_category_name_wins_over_string_category() {
    let product = normalize_product(
        &raw(json!({ "category": "ghee", "categoryName": "A2 Ghee" })),
        &resolver(),
    );
    assert_eq!(product.category, "ghee");
    assert_eq!(product.category_name.as_deref(), Some("A2 Ghee"));
}

#[test]
fn numeric_category_id_becomes_category_label() {
    let product = normalize_product(&raw(json!({ "name": "Ghee", "categoryId": 3 })), &resolver());
    assert_eq!(product.category, "3");
    assert_eq!(product.category_id.as_deref(), Some("3"));
    assert!(product.category_name.is_none());
}

#[test]
fn image_is_resolved() {
    let product = normalize_product(&full_record(), &resolver());
    assert_eq!(
        product.image,
        format!("{BASE}/api/admin/products/groundnut.jpg")
    );
}

#[test]
fn variants_skip_non_objects_and_keep_order() {
    let product = normalize_product(&full_record(), &resolver());
    let ids: Vec<Option<i64>> = product.variants.iter().map(|v| v.id).collect();
    assert_eq!(ids, vec![Some(7), Some(8)]);
    assert_eq!(product.variants[0].original_price, Some(Decimal::from(420)));
    assert_eq!(product.variants[0].stock_quantity, Some(10));
    assert_eq!(product.variants[1].weight.as_deref(), Some("500ml"));
}

#[test]
fn weight_comes_from_first_variant() {
    let product = normalize_product(&full_record(), &resolver());
    assert_eq!(product.weight, "1L");
}

#[test]
fn empty_record_gets_defaults() {
    let product = normalize_product(&RawProductRecord::default(), &resolver());
    assert_eq!(product.id, None);
    assert_eq!(product.name, "");
    assert_eq!(product.category, "misc");
    assert_eq!(product.brand, "Brand");
    assert_eq!(product.price, Decimal::ZERO);
    assert_eq!(product.sale_price, Decimal::ZERO);
    assert_eq!(product.original_price, Decimal::ZERO);
    assert!(product.rating.abs() < f64::EPSILON);
    assert!(!product.bestseller);
    assert_eq!(product.image, PLACEHOLDER_IMAGE);
    assert_eq!(product.description, "");
    assert_eq!(product.stock_quantity, None);
    assert!(product.in_stock);
    assert_eq!(product.weight, "N/A");
    assert!(product.dietary.is_empty());
    assert!(product.variants.is_empty());
}

#[test]
fn in_stock_only_false_when_explicitly_false() {
    let r = resolver();
    assert!(!normalize_product(&raw(json!({ "inStock": false })), &r).in_stock);
    assert!(!normalize_product(&raw(json!({ "in_stock": "no" })), &r).in_stock);
    assert!(normalize_product(&raw(json!({ "inStock": null })), &r).in_stock);
    assert!(normalize_product(&raw(json!({ "inStock": "unknown" })), &r).in_stock);
    assert!(normalize_product(&raw(json!({ "inStock": true })), &r).in_stock);
}

#[test]
fn garbage_prices_fall_back() {
    let product = normalize_product(
        &raw(json!({ "price": "ask in store", "salePrice": null, "mrp": "250" })),
        &resolver(),
    );
    assert_eq!(product.price, Decimal::from(250));
    assert_eq!(product.sale_price, Decimal::from(250));
}

#[test]
fn variants_that_are_not_an_array_are_ignored() {
    let product = normalize_product(&raw(json!({ "variants": { "id": 1 } })), &resolver());
    assert!(product.variants.is_empty());
    assert_eq!(product.weight, "N/A");
}

#[test]
fn zero_weight_value_yields_no_weight() {
    let product = normalize_product(
        &raw(json!({ "variants": [{ "weightValue": 0, "weightUnit": "g" }] })),
        &resolver(),
    );
    assert_eq!(product.weight, "N/A");
}

// -----------------------------------------------------------------------
// normalize_products
// -----------------------------------------------------------------------

#[test]
fn preserves_order_and_count() {
    let records = vec![
        raw(json!({ "id": 3, "name": "C" })),
        raw(json!({ "id": 1, "name": "A" })),
        raw(json!({ "id": 2, "name": "B" })),
    ];
    let names: Vec<String> = normalize_products(&records, &resolver())
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["C", "A", "B"]);
}

#[test]
fn empty_input_is_empty_output() {
    assert!(normalize_products(&[], &resolver()).is_empty());
}

// -----------------------------------------------------------------------
// idempotence
// -----------------------------------------------------------------------

fn renormalize(product: &NormalizedProduct, images: &ImageUrlResolver) -> NormalizedProduct {
    let value = serde_json::to_value(product).expect("serialization failed");
    normalize_product(&raw(value), images)
}

#[test]
fn normalizing_a_normalized_product_is_a_no_op() {
    let r = resolver();
    let records = vec![
        full_record(),
        RawProductRecord::default(),
        raw(json!({ "name": "Ghee", "categoryId": 3, "price": 650, "image": "ghee.png" })),
        raw(json!({ "name": "Honey", "category": "Honey", "inStock": false, "image": r"C:\pics\honey.jpg" })),
        raw(json!({ "name": "Papad", "createdAt": "2024-01-05T10:00:00.250Z", "rating": 4 })),
    ];
    for product in normalize_products(&records, &r) {
        assert_eq!(renormalize(&product, &r), product, "product {:?}", product.name);
    }
}

#[test]
fn idempotent_with_same_origin_base() {
    let r = ImageUrlResolver::new("");
    let product = normalize_product(&full_record(), &r);
    assert_eq!(product.image, "/api/admin/products/groundnut.jpg");
    assert_eq!(renormalize(&product, &r), product);
}
