#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    /// Backend origin without a trailing slash, e.g. `"http://localhost:8080"`.
    /// Empty means same-origin: resolved image URLs stay origin-relative.
    pub api_base_url: String,
    pub log_level: String,
    pub catalog_request_timeout_secs: u64,
    pub catalog_user_agent: String,
    pub catalog_max_retries: u32,
    pub catalog_retry_backoff_base_secs: u64,
    pub suggest_debounce_ms: u64,
    pub suggest_min_query_len: usize,
    pub suggest_limit: usize,
}

impl AppConfig {
    /// The REST root every catalog endpoint hangs off, e.g. `"http://localhost:8080/api"`.
    #[must_use]
    pub fn api_url(&self) -> String {
        format!("{}/api", self.api_base_url)
    }
}
