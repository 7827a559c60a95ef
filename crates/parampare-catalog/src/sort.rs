//! Sort stage of the catalog projection.
//!
//! Every order is produced by a stable sort on a copy of the input, so
//! products with equal keys keep their incoming relative order.

use std::cmp::Ordering;

use parampare_core::{NormalizedProduct, SortKey};

/// Returns `products` ordered by `key`. The input slice is not touched.
#[must_use]
pub fn sort_products(products: &[NormalizedProduct], key: SortKey) -> Vec<NormalizedProduct> {
    let mut sorted = products.to_vec();
    match key {
        SortKey::BestSelling => sorted.sort_by_key(|p| !p.bestseller),
        SortKey::PriceLowHigh => sorted.sort_by(|a, b| a.sale_price.cmp(&b.sale_price)),
        SortKey::PriceHighLow => sorted.sort_by(|a, b| b.sale_price.cmp(&a.sale_price)),
        SortKey::Newest => sort_by_recency(&mut sorted, true),
        SortKey::Oldest => sort_by_recency(&mut sorted, false),
        SortKey::NameAZ => sorted.sort_by(|a, b| collate(&a.name, &b.name)),
        SortKey::NameZA => sorted.sort_by(|a, b| collate(&b.name, &a.name)),
        SortKey::RatingHighLow => sorted.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
    }
    sorted
}

/// Orders by `createdAt` when every product has one, otherwise by id.
///
/// Products missing an id go last in both directions.
fn sort_by_recency(products: &mut [NormalizedProduct], newest_first: bool) {
    let directed = |ord: Ordering| if newest_first { ord.reverse() } else { ord };

    if !products.is_empty() && products.iter().all(|p| p.created_at.is_some()) {
        products.sort_by(|a, b| directed(a.created_at.cmp(&b.created_at)));
        return;
    }
    products.sort_by(|a, b| match (a.id, b.id) {
        (Some(x), Some(y)) => directed(x.cmp(&y)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

/// Case-insensitive primary comparison with a raw tiebreak, approximating a
/// locale collation for the Latin product names the catalog carries.
fn collate(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
