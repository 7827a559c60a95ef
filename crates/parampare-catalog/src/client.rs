use std::time::Duration;

use async_trait::async_trait;
use parampare_core::AppConfig;
use reqwest::{Client, StatusCode, Url};

use crate::error::CatalogError;
use crate::rate_limit::retry_with_backoff;
use crate::types::RawProductRecord;

/// Source of raw product records for the storefront.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Every product in the catalog.
    async fn get_all(&self) -> Result<Vec<RawProductRecord>, CatalogError>;

    /// Products the backend considers a match for `query`.
    async fn search(&self, query: &str) -> Result<Vec<RawProductRecord>, CatalogError>;
}

/// HTTP client for the storefront's product API (`{api}/products`).
///
/// Maps 429, 404, 403 and other non-2xx responses to typed errors. 429 and
/// transport failures are retried with exponential backoff up to
/// `max_retries` additional attempts.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    api_url: String,
    max_retries: u32,
    /// `backoff_base_secs * 2^attempt` seconds between retries.
    backoff_base_secs: u64,
}

impl CatalogClient {
    /// `api_url` is the API root including its `/api` segment,
    /// e.g. `"http://localhost:8080/api"`.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::InvalidApiUrl`] if `api_url` is not an absolute URL.
    /// - [`CatalogError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(
        api_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, CatalogError> {
        parse_api_url(api_url)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_owned(),
            max_retries,
            backoff_base_secs,
        })
    }

    /// Builds a client from the `PARAMPARE_CATALOG_*` settings.
    ///
    /// # Errors
    ///
    /// Same as [`Self::new`]. A same-origin deployment (empty
    /// `PARAMPARE_API_URL`) has no absolute API URL and is rejected.
    pub fn from_config(config: &AppConfig) -> Result<Self, CatalogError> {
        Self::new(
            &config.api_url(),
            config.catalog_request_timeout_secs,
            &config.catalog_user_agent,
            config.catalog_max_retries,
            config.catalog_retry_backoff_base_secs,
        )
    }

    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// `GET {api}/products`.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::RateLimited`] after retries are exhausted.
    /// - [`CatalogError::NotFound`], [`CatalogError::Forbidden`],
    ///   [`CatalogError::UnexpectedStatus`] for non-2xx answers.
    /// - [`CatalogError::Deserialize`] if the body is not JSON.
    pub async fn get_all(&self) -> Result<Vec<RawProductRecord>, CatalogError> {
        let url = products_url(&self.api_url)?;
        self.fetch_list(url, "product list").await
    }

    /// `GET {api}/products?search={query}`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_all`].
    pub async fn search(&self, query: &str) -> Result<Vec<RawProductRecord>, CatalogError> {
        let url = search_url(&self.api_url, query)?;
        self.fetch_list(url, "product search").await
    }

    /// `GET {api}/products?category={category}`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_all`].
    pub async fn get_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<RawProductRecord>, CatalogError> {
        let url = category_url(&self.api_url, category)?;
        self.fetch_list(url, "category products").await
    }

    /// `GET {api}/products/{id}`.
    ///
    /// # Errors
    ///
    /// [`CatalogError::MissingProductId`] for a blank id, before any request.
    /// Otherwise the same as [`Self::get_all`]; a body that is not a JSON
    /// object is a [`CatalogError::Deserialize`].
    pub async fn get_by_id(&self, id: &str) -> Result<RawProductRecord, CatalogError> {
        let url = product_url(&self.api_url, id)?;
        let body = self.fetch_body(&url).await?;
        serde_json::from_str::<RawProductRecord>(&body).map_err(|source| {
            CatalogError::Deserialize {
                context: format!("product {} from {url}", id.trim()),
                source,
            }
        })
    }

    async fn fetch_list(
        &self,
        url: String,
        context: &str,
    ) -> Result<Vec<RawProductRecord>, CatalogError> {
        let body = self.fetch_body(&url).await?;
        let value = serde_json::from_str::<serde_json::Value>(&body).map_err(|source| {
            CatalogError::Deserialize {
                context: format!("{context} from {url}"),
                source,
            }
        })?;
        let records = RawProductRecord::list_from_value(value);
        tracing::debug!(url = %url, count = records.len(), "fetched catalog records");
        Ok(records)
    }

    async fn fetch_body(&self, url: &str) -> Result<String, CatalogError> {
        retry_with_backoff(self.max_retries, self.backoff_base_secs, || async move {
            let response = self.client.get(url).send().await?;
            let status = response.status();

            if status == StatusCode::TOO_MANY_REQUESTS {
                let retry_after_secs = response
                    .headers()
                    .get(reqwest::header::RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.trim().parse::<u64>().ok())
                    .unwrap_or(60);
                return Err(CatalogError::RateLimited { retry_after_secs });
            }
            if status == StatusCode::NOT_FOUND {
                return Err(CatalogError::NotFound {
                    url: url.to_owned(),
                });
            }
            if status == StatusCode::FORBIDDEN {
                return Err(CatalogError::Forbidden {
                    url: url.to_owned(),
                });
            }
            if !status.is_success() {
                return Err(CatalogError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: url.to_owned(),
                });
            }

            Ok(response.text().await?)
        })
        .await
    }
}

#[async_trait]
impl CatalogProvider for CatalogClient {
    async fn get_all(&self) -> Result<Vec<RawProductRecord>, CatalogError> {
        CatalogClient::get_all(self).await
    }

    async fn search(&self, query: &str) -> Result<Vec<RawProductRecord>, CatalogError> {
        CatalogClient::search(self, query).await
    }
}

fn parse_api_url(api_url: &str) -> Result<Url, CatalogError> {
    let url = Url::parse(api_url).map_err(|e| CatalogError::InvalidApiUrl {
        url: api_url.to_owned(),
        reason: e.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(CatalogError::InvalidApiUrl {
            url: api_url.to_owned(),
            reason: "URL cannot carry a path".to_owned(),
        });
    }
    Ok(url)
}

/// Appends path segments (percent-encoded) and an optional query pair.
fn endpoint(
    api_url: &str,
    segments: &[&str],
    query: Option<(&str, &str)>,
) -> Result<String, CatalogError> {
    let mut url = parse_api_url(api_url)?;
    url.path_segments_mut()
        .map_err(|()| CatalogError::InvalidApiUrl {
            url: api_url.to_owned(),
            reason: "URL cannot carry a path".to_owned(),
        })?
        .pop_if_empty()
        .extend(segments);
    if let Some((key, value)) = query {
        url.query_pairs_mut().append_pair(key, value);
    }
    Ok(url.into())
}

pub(crate) fn products_url(api_url: &str) -> Result<String, CatalogError> {
    endpoint(api_url, &["products"], None)
}

pub(crate) fn search_url(api_url: &str, query: &str) -> Result<String, CatalogError> {
    endpoint(api_url, &["products"], Some(("search", query)))
}

pub(crate) fn category_url(api_url: &str, category: &str) -> Result<String, CatalogError> {
    endpoint(api_url, &["products"], Some(("category", category)))
}

pub(crate) fn product_url(api_url: &str, id: &str) -> Result<String, CatalogError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(CatalogError::MissingProductId {
            operation: "fetch a product",
        });
    }
    endpoint(api_url, &["products", id], None)
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
