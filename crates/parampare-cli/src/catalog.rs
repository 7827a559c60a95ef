//! Catalog command handlers for the CLI.
//!
//! Fetch failures in `browse` degrade to the fallback file (or an empty
//! list) the same way the storefront does; the other commands report them.

use std::path::{Path, PathBuf};

use anyhow::Context;
use parampare_catalog::{
    load_catalog, normalize_product, CatalogClient, CatalogView, ImageUrlResolver,
    RawProductRecord, SuggestOutcome, Suggester,
};
use parampare_core::categories::{badge_for_id, id_for_name, CATEGORIES};
use parampare_core::{
    category_title, AppConfig, FilterDimension, FilterState, NormalizedProduct, PriceBucket,
    SortKey,
};

#[derive(Debug)]
pub(crate) struct BrowseRequest {
    pub search: Option<String>,
    pub category: Option<String>,
    pub price: Vec<PriceBucket>,
    pub dietary: Vec<String>,
    pub brands: Vec<String>,
    pub sort: SortKey,
    pub fallback: Option<PathBuf>,
    pub json: bool,
}

impl BrowseRequest {
    pub(crate) fn filters(&self) -> anyhow::Result<FilterState> {
        let mut filters = self
            .category
            .as_deref()
            .map(FilterState::for_category)
            .unwrap_or_default();
        filters.price_range = self.price.iter().copied().collect();
        filters.set(FilterDimension::Dietary, &self.dietary)?;
        filters.set(FilterDimension::Brands, &self.brands)?;
        Ok(filters)
    }
}

fn build_client(config: &AppConfig) -> anyhow::Result<CatalogClient> {
    CatalogClient::from_config(config)
        .map_err(|e| anyhow::anyhow!("failed to build catalog client: {e}"))
}

/// Reads fallback product records from a JSON file (array or `{ "products": [...] }`).
pub(crate) fn read_fallback(path: &Path) -> anyhow::Result<Vec<RawProductRecord>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read fallback file {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("fallback file {} is not valid JSON", path.display()))?;
    Ok(RawProductRecord::list_from_value(value))
}

/// Heading for a browse run: category title plus badge when the table has one.
pub(crate) fn heading(category: Option<&str>) -> String {
    let title = category_title(category);
    let badge = category
        .and_then(|c| badge_for_id(c).or_else(|| id_for_name(c).and_then(badge_for_id)));
    match badge {
        Some(badge) => format!("{title} [{badge}]"),
        None => title,
    }
}

pub(crate) fn format_row(product: &NormalizedProduct) -> String {
    let id = product
        .id
        .map_or_else(|| "-".to_string(), |id| id.to_string());
    let stock = if product.in_stock { "" } else { " (out of stock)" };
    format!(
        "{id}\t{name}\t{price}\t{weight}\t{category}\t{image}{stock}",
        name = product.name,
        price = product.sale_price,
        weight = product.weight,
        category = product.category,
        image = product.image,
    )
}

/// Fetches, normalizes, filters, and sorts the catalog, then prints it.
///
/// # Errors
///
/// Returns an error if the client cannot be built, the fallback file cannot
/// be read, or output serialization fails. API failures are not errors.
pub(crate) async fn run_browse(config: &AppConfig, request: BrowseRequest) -> anyhow::Result<()> {
    let client = build_client(config)?;
    let fallback = match &request.fallback {
        Some(path) => read_fallback(path)?,
        None => Vec::new(),
    };
    let filters = request.filters()?;

    let records = load_catalog(&client, request.search.as_deref(), &fallback).await;

    let mut view = CatalogView::new(ImageUrlResolver::from_config(config)).with_filters(filters);
    view.replace_products(&records);
    view.set_sort(request.sort);
    let visible = view.visible();

    tracing::info!(
        fetched = records.len(),
        visible = visible.len(),
        sort = %request.sort,
        "browse complete"
    );

    if request.json {
        println!("{}", serde_json::to_string_pretty(&visible)?);
        return Ok(());
    }

    println!("{} ({} products)", heading(request.category.as_deref()), visible.len());
    for product in &visible {
        println!("{}", format_row(product));
    }
    Ok(())
}

/// # Errors
///
/// Returns an error if the id is blank or the product cannot be fetched.
pub(crate) async fn run_product(config: &AppConfig, id: &str) -> anyhow::Result<()> {
    let client = build_client(config)?;
    let record = client
        .get_by_id(id)
        .await
        .with_context(|| format!("failed to fetch product {id}"))?;
    let product = normalize_product(&record, &ImageUrlResolver::from_config(config));
    println!("{}", serde_json::to_string_pretty(&product)?);
    Ok(())
}

pub(crate) fn run_resolve_image(config: &AppConfig, inputs: &[String]) {
    let resolver = ImageUrlResolver::from_config(config);
    for input in inputs {
        println!("{input}\t{}", resolver.resolve(Some(input)));
    }
}

/// # Errors
///
/// Returns an error if the catalog client cannot be built.
pub(crate) async fn run_suggest(config: &AppConfig, query: &str) -> anyhow::Result<()> {
    let suggester = Suggester::from_config(build_client(config)?, config);
    match suggester.suggest(query).await {
        SuggestOutcome::Ready(items) if items.is_empty() => println!("no matches for \"{query}\""),
        SuggestOutcome::Ready(items) => {
            for item in items {
                let id = item.id.map_or_else(|| "-".to_string(), |id| id.to_string());
                println!("{id}\t{}\t{}\t{}", item.name, item.price, item.image);
            }
        }
        SuggestOutcome::Cleared => println!(
            "query too short (minimum {} characters)",
            config.suggest_min_query_len
        ),
        SuggestOutcome::Superseded => println!("query superseded"),
        SuggestOutcome::Unavailable => println!("suggestions unavailable: catalog fetch failed"),
    }
    Ok(())
}

pub(crate) fn run_categories() {
    for category in &CATEGORIES {
        let badge = if category.badge.is_empty() { "-" } else { category.badge };
        println!("{}\t{}\t{}\t{badge}", category.id, category.name, category.slug());
    }
}
