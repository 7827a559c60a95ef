//! Filter stage of the catalog projection.
//!
//! Each [`FilterDimension`] is an independent predicate: values within a
//! dimension are OR-ed, dimensions are AND-ed, and an empty dimension passes
//! everything. Because the predicates are independent, applying the
//! dimensions one at a time in any order gives the same result as
//! [`filter_products`].

use parampare_core::{FilterDimension, FilterState, NormalizedProduct};

use crate::reconcile::matches_any_category;

/// Products that satisfy every dimension of `filters`, in input order.
#[must_use]
pub fn filter_products(
    products: &[NormalizedProduct],
    filters: &FilterState,
) -> Vec<NormalizedProduct> {
    if filters.is_empty() {
        return products.to_vec();
    }
    let kept: Vec<NormalizedProduct> = products
        .iter()
        .filter(|p| matches_filters(p, filters))
        .cloned()
        .collect();
    tracing::debug!(before = products.len(), after = kept.len(), "applied catalog filters");
    kept
}

/// Products that satisfy a single dimension of `filters`, in input order.
#[must_use]
pub fn apply_dimension(
    products: &[NormalizedProduct],
    filters: &FilterState,
    dimension: FilterDimension,
) -> Vec<NormalizedProduct> {
    products
        .iter()
        .filter(|p| matches_dimension(p, filters, dimension))
        .cloned()
        .collect()
}

#[must_use]
pub fn matches_filters(product: &NormalizedProduct, filters: &FilterState) -> bool {
    FilterDimension::ALL
        .into_iter()
        .all(|dimension| matches_dimension(product, filters, dimension))
}

#[must_use]
pub fn matches_dimension(
    product: &NormalizedProduct,
    filters: &FilterState,
    dimension: FilterDimension,
) -> bool {
    match dimension {
        FilterDimension::PriceRange => {
            filters.price_range.is_empty()
                || filters
                    .price_range
                    .iter()
                    .any(|bucket| bucket.contains(product.sale_price))
        }
        FilterDimension::Dietary => {
            filters.dietary.is_empty()
                || product.dietary.iter().any(|tag| filters.dietary.contains(tag))
        }
        FilterDimension::Categories => matches_any_category(product, &filters.categories),
        FilterDimension::Brands => {
            filters.brands.is_empty() || filters.brands.contains(&product.brand)
        }
    }
}
