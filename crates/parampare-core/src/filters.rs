//! Filter and sort parameters for the collection grid.
//!
//! These arrive from UI state (query parameters, sidebar checkboxes, the sort
//! dropdown) as kebab-case labels and are parsed here once, at the boundary.

use std::collections::BTreeSet;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Fixed sale-price buckets. Adjacent buckets share their boundary value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PriceBucket {
    #[serde(rename = "under-200")]
    Under200,
    #[serde(rename = "200-500")]
    From200To500,
    #[serde(rename = "500-1000")]
    From500To1000,
    #[serde(rename = "above-1000")]
    Above1000,
}

impl PriceBucket {
    pub const ALL: [PriceBucket; 4] = [
        PriceBucket::Under200,
        PriceBucket::From200To500,
        PriceBucket::From500To1000,
        PriceBucket::Above1000,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            PriceBucket::Under200 => "under-200",
            PriceBucket::From200To500 => "200-500",
            PriceBucket::From500To1000 => "500-1000",
            PriceBucket::Above1000 => "above-1000",
        }
    }

    /// Whether `price` falls in this bucket. Middle buckets are closed on both ends.
    #[must_use]
    pub fn contains(self, price: Decimal) -> bool {
        let d200 = Decimal::from(200);
        let d500 = Decimal::from(500);
        let d1000 = Decimal::from(1000);
        match self {
            PriceBucket::Under200 => price < d200,
            PriceBucket::From200To500 => price >= d200 && price <= d500,
            PriceBucket::From500To1000 => price >= d500 && price <= d1000,
            PriceBucket::Above1000 => price > d1000,
        }
    }
}

impl std::fmt::Display for PriceBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PriceBucket {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PriceBucket::ALL
            .into_iter()
            .find(|bucket| bucket.label() == s.trim())
            .ok_or_else(|| CoreError::UnknownPriceRange(s.to_string()))
    }
}

/// One independent dimension of [`FilterState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDimension {
    PriceRange,
    Dietary,
    Categories,
    Brands,
}

impl FilterDimension {
    pub const ALL: [FilterDimension; 4] = [
        FilterDimension::PriceRange,
        FilterDimension::Dietary,
        FilterDimension::Categories,
        FilterDimension::Brands,
    ];
}

/// Active filters. An empty set in any dimension constrains nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    pub price_range: BTreeSet<PriceBucket>,
    pub dietary: BTreeSet<String>,
    /// Category names, slugs, or numeric id strings.
    pub categories: BTreeSet<String>,
    /// Exact brand names.
    pub brands: BTreeSet<String>,
}

impl FilterState {
    /// `true` when no dimension constrains anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.price_range.is_empty()
            && self.dietary.is_empty()
            && self.categories.is_empty()
            && self.brands.is_empty()
    }

    /// Filter state preselected from a `?category=` query parameter.
    #[must_use]
    pub fn for_category(category: &str) -> Self {
        let mut state = Self::default();
        let category = category.trim();
        if !category.is_empty() {
            state.categories.insert(category.to_string());
        }
        state
    }

    /// Replaces every value of one dimension.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownPriceRange`] if a price label is not one of
    /// the four buckets; the state is left untouched in that case.
    pub fn set<I, S>(&mut self, dimension: FilterDimension, values: I) -> Result<(), CoreError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let values = values.into_iter().map(|v| v.as_ref().trim().to_string());
        match dimension {
            FilterDimension::PriceRange => {
                self.price_range = values
                    .map(|v| v.parse::<PriceBucket>())
                    .collect::<Result<_, _>>()?;
            }
            FilterDimension::Dietary => self.dietary = non_empty(values),
            FilterDimension::Categories => self.categories = non_empty(values),
            FilterDimension::Brands => self.brands = non_empty(values),
        }
        Ok(())
    }

    /// Removes a single value from one dimension. Unknown values are a no-op.
    pub fn remove(&mut self, dimension: FilterDimension, value: &str) {
        match dimension {
            FilterDimension::PriceRange => {
                if let Ok(bucket) = value.parse::<PriceBucket>() {
                    self.price_range.remove(&bucket);
                }
            }
            FilterDimension::Dietary => {
                self.dietary.remove(value);
            }
            FilterDimension::Categories => {
                self.categories.remove(value);
            }
            FilterDimension::Brands => {
                self.brands.remove(value);
            }
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

fn non_empty(values: impl Iterator<Item = String>) -> BTreeSet<String> {
    values.filter(|v| !v.is_empty()).collect()
}

/// Sort order for the collection grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    BestSelling,
    PriceLowHigh,
    PriceHighLow,
    Newest,
    Oldest,
    NameAZ,
    NameZA,
    RatingHighLow,
}

impl SortKey {
    pub const ALL: [SortKey; 8] = [
        SortKey::BestSelling,
        SortKey::PriceLowHigh,
        SortKey::PriceHighLow,
        SortKey::Newest,
        SortKey::Oldest,
        SortKey::NameAZ,
        SortKey::NameZA,
        SortKey::RatingHighLow,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SortKey::BestSelling => "best-selling",
            SortKey::PriceLowHigh => "price-low-high",
            SortKey::PriceHighLow => "price-high-low",
            SortKey::Newest => "newest",
            SortKey::Oldest => "oldest",
            SortKey::NameAZ => "name-a-z",
            SortKey::NameZA => "name-z-a",
            SortKey::RatingHighLow => "rating-high-low",
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SortKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.label() == s.trim())
            .ok_or_else(|| CoreError::UnknownSortKey(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_boundary_at_200() {
        let price = Decimal::from(200);
        assert!(!PriceBucket::Under200.contains(price));
        assert!(PriceBucket::From200To500.contains(price));
    }

    #[test]
    fn bucket_boundary_at_500_is_shared() {
        let price = Decimal::from(500);
        assert!(PriceBucket::From200To500.contains(price));
        assert!(PriceBucket::From500To1000.contains(price));
    }

    #[test]
    fn bucket_boundary_at_1000() {
        let price = Decimal::from(1000);
        assert!(PriceBucket::From500To1000.contains(price));
        assert!(!PriceBucket::Above1000.contains(price));
        assert!(PriceBucket::Above1000.contains(Decimal::new(100_001, 2)));
    }

    #[test]
    fn bucket_labels_parse_back() {
        for bucket in PriceBucket::ALL {
            assert_eq!(bucket.label().parse::<PriceBucket>(), Ok(bucket));
        }
    }

    #[test]
    fn unknown_bucket_label_is_rejected() {
        assert_eq!(
            "cheap".parse::<PriceBucket>(),
            Err(CoreError::UnknownPriceRange("cheap".to_string()))
        );
    }

    #[test]
    fn sort_key_defaults_to_best_selling() {
        assert_eq!(SortKey::default(), SortKey::BestSelling);
    }

    #[test]
    fn sort_key_labels_parse_back() {
        for key in SortKey::ALL {
            assert_eq!(key.label().parse::<SortKey>(), Ok(key));
        }
    }

    #[test]
    fn sort_key_serde_matches_label() {
        let json = serde_json::to_string(&SortKey::NameAZ).unwrap();
        assert_eq!(json, "\"name-a-z\"");
        let json = serde_json::to_string(&SortKey::RatingHighLow).unwrap();
        assert_eq!(json, "\"rating-high-low\"");
    }

    #[test]
    fn unknown_sort_key_is_rejected() {
        assert!(matches!(
            "popular".parse::<SortKey>(),
            Err(CoreError::UnknownSortKey(_))
        ));
    }

    #[test]
    fn empty_state_is_empty() {
        assert!(FilterState::default().is_empty());
    }

    #[test]
    fn for_category_preselects_one_value() {
        let state = FilterState::for_category(" 3 ");
        assert_eq!(state.categories.len(), 1);
        assert!(state.categories.contains("3"));
        assert!(FilterState::for_category("").is_empty());
    }

    #[test]
    fn set_replaces_dimension() {
        let mut state = FilterState::default();
        state
            .set(FilterDimension::Brands, ["Sanatana", "Desi Farms"])
            .unwrap();
        state.set(FilterDimension::Brands, ["Sanatana"]).unwrap();
        assert_eq!(state.brands.len(), 1);
    }

    #[test]
    fn set_price_range_rejects_unknown_label_without_mutation() {
        let mut state = FilterState::default();
        state
            .set(FilterDimension::PriceRange, ["under-200"])
            .unwrap();
        let result = state.set(FilterDimension::PriceRange, ["200-500", "free"]);
        assert!(result.is_err());
        assert!(state.price_range.contains(&PriceBucket::Under200));
        assert_eq!(state.price_range.len(), 1);
    }

    #[test]
    fn set_drops_blank_values() {
        let mut state = FilterState::default();
        state
            .set(FilterDimension::Dietary, ["vegan", "  "])
            .unwrap();
        assert_eq!(state.dietary.len(), 1);
    }

    #[test]
    fn remove_single_value() {
        let mut state = FilterState::default();
        state
            .set(FilterDimension::PriceRange, ["under-200", "above-1000"])
            .unwrap();
        state.remove(FilterDimension::PriceRange, "under-200");
        assert_eq!(
            state.price_range.iter().copied().collect::<Vec<_>>(),
            vec![PriceBucket::Above1000]
        );
        state.remove(FilterDimension::PriceRange, "not-a-bucket");
        assert_eq!(state.price_range.len(), 1);
    }

    #[test]
    fn clear_resets_every_dimension() {
        let mut state = FilterState::for_category("Ghee");
        state.set(FilterDimension::Brands, ["Sanatana"]).unwrap();
        state.clear();
        assert!(state.is_empty());
    }
}
