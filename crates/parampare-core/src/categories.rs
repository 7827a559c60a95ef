//! The storefront's fixed category list.
//!
//! Category links use the numeric id (`?category=3`) while the backend may
//! label products by name or slug, so both the reconciliation filter and the
//! page headings look categories up here.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub id: &'static str,
    pub name: &'static str,
    /// Marketing badge shown next to the heading; empty when none.
    pub badge: &'static str,
}

pub static CATEGORIES: [Category; 9] = [
    Category::new("1", "Wood Pressed Oils", "Best Seller"),
    Category::new("2", "Essential Oils", ""),
    Category::new("3", "Ghee", "Premium"),
    Category::new("4", "Honey", ""),
    Category::new("5", "Papads", "Handmade"),
    Category::new("6", "Pickles", "Homemade"),
    Category::new("7", "Spice Powders", "Authentic"),
    Category::new("8", "Chemical Free Jaggery", "Natural"),
    Category::new("9", "Other Food Products", ""),
];

const ALL_PRODUCTS_TITLE: &str = "All Products";

impl Category {
    const fn new(id: &'static str, name: &'static str, badge: &'static str) -> Self {
        Self { id, name, badge }
    }

    /// URL slug, e.g. `"wood-pressed-oils"`.
    #[must_use]
    pub fn slug(&self) -> String {
        slugify(self.name)
    }
}

#[must_use]
pub fn find_by_id(id: &str) -> Option<&'static Category> {
    let id = id.trim();
    CATEGORIES.iter().find(|c| c.id == id)
}

#[must_use]
pub fn name_for_id(id: &str) -> Option<&'static str> {
    find_by_id(id).map(|c| c.name)
}

#[must_use]
pub fn badge_for_id(id: &str) -> Option<&'static str> {
    find_by_id(id).map(|c| c.badge).filter(|b| !b.is_empty())
}

/// Looks up a category id by display name or slug, case-insensitively.
#[must_use]
pub fn id_for_name(name: &str) -> Option<&'static str> {
    let wanted = slugify(name);
    if wanted.is_empty() {
        return None;
    }
    CATEGORIES
        .iter()
        .find(|c| c.slug() == wanted)
        .map(|c| c.id)
}

/// Heading for a collection page given its `?category=` parameter.
///
/// A known id maps to its name; anything else is treated as a slug and
/// title-cased (`"cold-pressed"` → `"Cold Pressed"`).
#[must_use]
pub fn category_title(param: Option<&str>) -> String {
    let Some(param) = param.map(str::trim).filter(|p| !p.is_empty()) else {
        return ALL_PRODUCTS_TITLE.to_string();
    };
    if let Some(name) = name_for_id(param) {
        return name.to_string();
    }
    param
        .split('-')
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lowercases and joins whitespace runs with a single hyphen.
#[must_use]
pub fn slugify(s: &str) -> String {
    s.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        let mut ids: Vec<_> = CATEGORIES.iter().map(|c| c.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), CATEGORIES.len());
    }

    #[test]
    fn name_for_known_id() {
        assert_eq!(name_for_id("3"), Some("Ghee"));
        assert_eq!(name_for_id(" 1 "), Some("Wood Pressed Oils"));
    }

    #[test]
    fn name_for_unknown_id() {
        assert!(name_for_id("42").is_none());
    }

    #[test]
    fn id_for_name_accepts_name_or_slug() {
        assert_eq!(id_for_name("Wood Pressed Oils"), Some("1"));
        assert_eq!(id_for_name("wood-pressed-oils"), Some("1"));
        assert_eq!(id_for_name("  spice   powders "), Some("7"));
        assert!(id_for_name("").is_none());
        assert!(id_for_name("Furniture").is_none());
    }

    #[test]
    fn badge_only_when_non_empty() {
        assert_eq!(badge_for_id("3"), Some("Premium"));
        assert!(badge_for_id("2").is_none());
    }

    #[test]
    fn slug_of_category() {
        assert_eq!(CATEGORIES[7].slug(), "chemical-free-jaggery");
    }

    #[test]
    fn title_for_id_param() {
        assert_eq!(category_title(Some("6")), "Pickles");
    }

    #[test]
    fn title_for_slug_param() {
        assert_eq!(category_title(Some("cold-pressed-oils")), "Cold Pressed Oils");
    }

    #[test]
    fn title_without_param() {
        assert_eq!(category_title(None), "All Products");
        assert_eq!(category_title(Some("  ")), "All Products");
    }
}
