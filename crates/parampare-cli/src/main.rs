use std::path::PathBuf;

use clap::{Parser, Subcommand};
use parampare_core::{PriceBucket, SortKey};
use tracing_subscriber::EnvFilter;

mod catalog;

#[derive(Debug, Parser)]
#[command(name = "parampare")]
#[command(about = "Parampare storefront catalog tools")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch the catalog and print the filtered, sorted collection
    Browse {
        /// Search query sent to the catalog API
        #[arg(long)]
        search: Option<String>,

        /// Category id, name, or slug to preselect
        #[arg(long)]
        category: Option<String>,

        /// Price buckets: under-200, 200-500, 500-1000, above-1000
        #[arg(long, value_delimiter = ',', value_parser = parse_price_bucket)]
        price: Vec<PriceBucket>,

        /// Dietary tags, exact match
        #[arg(long, value_delimiter = ',')]
        dietary: Vec<String>,

        /// Brand names, exact match
        #[arg(long, value_delimiter = ',')]
        brand: Vec<String>,

        #[arg(long, default_value = "best-selling", value_parser = parse_sort_key)]
        sort: SortKey,

        /// JSON file of product records used when the API is unreachable
        #[arg(long)]
        fallback: Option<PathBuf>,

        /// Print normalized products as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Fetch and normalize a single product
    Product { id: String },
    /// Resolve stored image references to display URLs
    ResolveImage {
        #[arg(required = true)]
        inputs: Vec<String>,
    },
    /// Print the suggestions the header search box would show
    Suggest { query: String },
    /// List the storefront categories
    Categories,
}

fn parse_sort_key(s: &str) -> Result<SortKey, String> {
    s.parse::<SortKey>().map_err(|e| e.to_string())
}

fn parse_price_bucket(s: &str) -> Result<PriceBucket, String> {
    s.parse::<PriceBucket>().map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = parampare_core::load_app_config_from_env()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
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
            let request = catalog::BrowseRequest {
                search,
                category,
                price,
                dietary,
                brands: brand,
                sort,
                fallback,
                json,
            };
            catalog::run_browse(&config, request).await?;
        }
        Some(Commands::Product { id }) => catalog::run_product(&config, &id).await?,
        Some(Commands::ResolveImage { inputs }) => catalog::run_resolve_image(&config, &inputs),
        Some(Commands::Suggest { query }) => catalog::run_suggest(&config, &query).await?,
        Some(Commands::Categories) => catalog::run_categories(),
        None => println!("parampare: run with --help to list commands"),
    }

    Ok(())
}

#[cfg(test)]
mod tests;
