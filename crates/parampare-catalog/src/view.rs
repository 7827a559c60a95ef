//! Projection state held by a collection page.
//!
//! A [`CatalogView`] owns the three inputs of the projection (normalized
//! products, active filters, active sort) and derives the visible list on
//! demand. Changing filters or sort never re-normalizes; replacing the raw
//! records normalizes exactly once.

use parampare_core::{FilterDimension, FilterState, NormalizedProduct, SortKey};

use crate::filter::filter_products;
use crate::image::ImageUrlResolver;
use crate::normalize::normalize_products;
use crate::sort::sort_products;
use crate::types::RawProductRecord;

/// Filters then sorts `products`.
#[must_use]
pub fn project(
    products: &[NormalizedProduct],
    filters: &FilterState,
    sort: SortKey,
) -> Vec<NormalizedProduct> {
    sort_products(&filter_products(products, filters), sort)
}

#[derive(Debug, Clone)]
pub struct CatalogView {
    images: ImageUrlResolver,
    products: Vec<NormalizedProduct>,
    filters: FilterState,
    sort: SortKey,
}

impl CatalogView {
    #[must_use]
    pub fn new(images: ImageUrlResolver) -> Self {
        Self {
            images,
            products: Vec::new(),
            filters: FilterState::default(),
            sort: SortKey::default(),
        }
    }

    /// Starts with `filters` preselected, e.g. from a `?category=` link.
    #[must_use]
    pub fn with_filters(mut self, filters: FilterState) -> Self {
        self.filters = filters;
        self
    }

    /// Normalizes a fresh fetch result and replaces the held products.
    pub fn replace_products(&mut self, records: &[RawProductRecord]) {
        self.products = normalize_products(records, &self.images);
    }

    #[must_use]
    pub fn products(&self) -> &[NormalizedProduct] {
        &self.products
    }

    #[must_use]
    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Mutable access for the per-dimension helpers on [`FilterState`].
    pub fn filters_mut(&mut self) -> &mut FilterState {
        &mut self.filters
    }

    pub fn set_filters(&mut self, filters: FilterState) {
        self.filters = filters;
    }

    pub fn remove_filter(&mut self, dimension: FilterDimension, value: &str) {
        self.filters.remove(dimension, value);
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    #[must_use]
    pub fn sort(&self) -> SortKey {
        self.sort
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
    }

    /// The filtered, sorted list to display.
    #[must_use]
    pub fn visible(&self) -> Vec<NormalizedProduct> {
        project(&self.products, &self.filters, self.sort)
    }

    /// How many held products survive the active filters.
    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.products
            .iter()
            .filter(|p| crate::filter::matches_filters(p, &self.filters))
            .count()
    }
}
