use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["parampare"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn browse_defaults() {
    let cli = Cli::try_parse_from(["parampare", "browse"]).expect("expected valid cli args");
    match cli.command {
        Some(Commands::Browse {
            search,
            category,
            price,
            dietary,
            brand,
            sort,
            fallback,
            json,
        }) => {
            assert!(search.is_none());
            assert!(category.is_none());
            assert!(price.is_empty());
            assert!(dietary.is_empty());
            assert!(brand.is_empty());
            assert_eq!(sort, SortKey::BestSelling);
            assert!(fallback.is_none());
            assert!(!json);
        }
        other => panic!("expected browse, got {other:?}"),
    }
}

#[test]
fn browse_parses_filters_and_sort() {
    let cli = Cli::try_parse_from([
        "parampare",
        "browse",
        "--category",
        "3",
        "--price",
        "under-200,500-1000",
        "--brand",
        "Gir Farms",
        "--sort",
        "price-low-high",
        "--json",
    ])
    .expect("expected valid cli args");
    match cli.command {
        Some(Commands::Browse {
            category,
            price,
            brand,
            sort,
            json,
            ..
        }) => {
            assert_eq!(category.as_deref(), Some("3"));
            assert_eq!(price, vec![PriceBucket::Under200, PriceBucket::From500To1000]);
            assert_eq!(brand, vec!["Gir Farms".to_string()]);
            assert_eq!(sort, SortKey::PriceLowHigh);
            assert!(json);
        }
        other => panic!("expected browse, got {other:?}"),
    }
}

#[test]
fn browse_rejects_unknown_sort_key() {
    let result = Cli::try_parse_from(["parampare", "browse", "--sort", "cheapest"]);
    assert!(result.is_err());
}

#[test]
fn browse_rejects_unknown_price_bucket() {
    let result = Cli::try_parse_from(["parampare", "browse", "--price", "under-100"]);
    assert!(result.is_err());
}

#[test]
fn resolve_image_requires_input() {
    assert!(Cli::try_parse_from(["parampare", "resolve-image"]).is_err());
    let cli = Cli::try_parse_from(["parampare", "resolve-image", "a.jpg", "/uploads/b.png"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::ResolveImage { ref inputs }) if inputs.len() == 2
    ));
}

#[test]
fn parses_suggest_product_and_categories() {
    let cli = Cli::try_parse_from(["parampare", "suggest", "ghee"]).expect("valid args");
    assert!(matches!(cli.command, Some(Commands::Suggest { ref query }) if query == "ghee"));

    let cli = Cli::try_parse_from(["parampare", "product", "42"]).expect("valid args");
    assert!(matches!(cli.command, Some(Commands::Product { ref id }) if id == "42"));

    let cli = Cli::try_parse_from(["parampare", "categories"]).expect("valid args");
    assert!(matches!(cli.command, Some(Commands::Categories)));
}

#[test]
fn heading_includes_badge() {
    assert_eq!(catalog::heading(Some("3")), "Ghee [Premium]");
    assert_eq!(catalog::heading(Some("pickles")), "Pickles [Homemade]");
    assert_eq!(catalog::heading(Some("4")), "Honey");
    assert_eq!(catalog::heading(None), "All Products");
}

#[test]
fn browse_request_builds_filter_state() {
    let request = catalog::BrowseRequest {
        search: None,
        category: Some("6".to_string()),
        price: vec![PriceBucket::Above1000],
        dietary: vec!["vegan".to_string(), " ".to_string()],
        brands: vec![],
        sort: SortKey::Newest,
        fallback: None,
        json: false,
    };
    let filters = request.filters().expect("valid filters");
    assert!(filters.categories.contains("6"));
    assert!(filters.price_range.contains(&PriceBucket::Above1000));
    assert_eq!(filters.dietary.len(), 1);
    assert!(filters.brands.is_empty());
}

#[test]
fn read_fallback_accepts_wrapped_list() {
    let path =
        std::env::temp_dir().join(format!("parampare-fallback-{}.json", std::process::id()));
    std::fs::write(&path, r#"{ "products": [{ "id": 1 }, { "id": 2 }] }"#)
        .expect("write fixture");
    let records = catalog::read_fallback(&path).expect("fallback should parse");
    std::fs::remove_file(&path).ok();
    assert_eq!(records.len(), 2);
}

#[test]
fn read_fallback_missing_file_is_error() {
    let path = std::env::temp_dir().join("parampare-fallback-does-not-exist.json");
    assert!(catalog::read_fallback(&path).is_err());
}
