//! Category reconciliation between filter values and product labels.
//!
//! Filter values come from category links (`?category=3`), sidebar
//! checkboxes (display names), or slugs; products carry whatever the backend
//! stored. Matching is deliberately forgiving so a representation mismatch
//! never hides products.

use parampare_core::categories::{id_for_name, name_for_id, slugify};
use parampare_core::NormalizedProduct;

/// Whether `product` belongs to the category named by `filter_value`.
///
/// Tried in order, against the product's `category` and `categoryName`:
/// case-insensitive equality, equality after whitespace becomes `-`,
/// containment in either direction. The same cascade is repeated against the
/// table name when `filter_value` is a known category id. Finally the
/// product's `categoryId` is compared with the filter value and with the id
/// the table assigns to it.
#[must_use]
pub fn category_matches(product: &NormalizedProduct, filter_value: &str) -> bool {
    let filter = filter_value.trim();
    if filter.is_empty() {
        return false;
    }
    let wanted = filter.to_lowercase();
    let mapped = name_for_id(filter).map(str::to_lowercase);

    let labels = [Some(product.category.as_str()), product.category_name.as_deref()];
    let label_hit = labels
        .into_iter()
        .flatten()
        .map(|label| label.trim().to_lowercase())
        .filter(|label| !label.is_empty())
        .any(|label| {
            labels_match(&label, &wanted)
                || mapped.as_deref().is_some_and(|m| labels_match(&label, m))
        });
    if label_hit {
        return true;
    }

    let Some(product_id) = product.category_id.as_deref().map(str::trim) else {
        return false;
    };
    product_id == filter || id_for_name(filter).is_some_and(|id| id == product_id)
}

/// OR across `filter_values`; an empty set matches everything.
#[must_use]
pub fn matches_any_category<I, S>(product: &NormalizedProduct, filter_values: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut values = filter_values.into_iter().peekable();
    if values.peek().is_none() {
        return true;
    }
    values.any(|value| category_matches(product, value.as_ref()))
}

/// Both sides already trimmed, lowercased, and non-empty.
fn labels_match(label: &str, wanted: &str) -> bool {
    label == wanted
        || slugify(label) == slugify(wanted)
        || label.contains(wanted)
        || wanted.contains(label)
}
