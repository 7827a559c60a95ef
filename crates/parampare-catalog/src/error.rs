use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("rate limited by catalog API (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("endpoint not found: {url}")]
    NotFound { url: String },

    #[error("access denied by catalog API: {url}")]
    Forbidden { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid catalog API URL \"{url}\": {reason}")]
    InvalidApiUrl { url: String, reason: String },

    #[error("product id is required to {operation}")]
    MissingProductId { operation: &'static str },
}

/// Rejections for cart and wishlist calls made with unusable arguments.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ActionError {
    #[error("cannot {action}: product has no id")]
    MissingProductId { action: &'static str },

    #[error("cannot add to cart: quantity must be at least 1")]
    ZeroQuantity,
}
