pub mod app_config;
pub mod categories;
pub mod config;
pub mod filters;
pub mod products;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use categories::{category_title, Category, CATEGORIES};
pub use config::{load_app_config, load_app_config_from_env};
pub use filters::{FilterDimension, FilterState, PriceBucket, SortKey};
pub use products::{NormalizedProduct, VariantRecord};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("unknown sort key: {0}")]
    UnknownSortKey(String),

    #[error("unknown price range: {0}")]
    UnknownPriceRange(String),
}
