//! Fetching the record list a collection page projects.

use crate::client::CatalogProvider;
use crate::types::RawProductRecord;

/// Loads raw records for a collection page. Never fails.
///
/// With a non-blank `search` query the provider's search is tried first and
/// a failed search falls back to the full catalog. If the catalog fetch
/// itself fails, `fallback` is returned (pass `&[]` for an empty page).
pub async fn load_catalog<P>(
    provider: &P,
    search: Option<&str>,
    fallback: &[RawProductRecord],
) -> Vec<RawProductRecord>
where
    P: CatalogProvider + ?Sized,
{
    if let Some(query) = search.map(str::trim).filter(|q| !q.is_empty()) {
        match provider.search(query).await {
            Ok(records) => {
                tracing::info!(query, count = records.len(), "catalog search returned");
                return records;
            }
            Err(e) => {
                tracing::warn!(
                    query,
                    error = %e,
                    "catalog search failed, falling back to full list"
                );
            }
        }
    }

    match provider.get_all().await {
        Ok(records) => records,
        Err(e) => {
            tracing::error!(
                error = %e,
                fallback = fallback.len(),
                "catalog fetch failed, using fallback records"
            );
            fallback.to_vec()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use crate::error::CatalogError;

    #[derive(Default)]
    struct FakeProvider {
        fail_search: bool,
        fail_all: bool,
        search_calls: AtomicU32,
        all_calls: AtomicU32,
    }

    fn record(id: i64) -> RawProductRecord {
        RawProductRecord::from_value(json!({ "id": id })).expect("object")
    }

    fn down() -> CatalogError {
        CatalogError::UnexpectedStatus {
            status: 503,
            url: "http://localhost:8080/api/products".to_owned(),
        }
    }

    #[async_trait]
    impl CatalogProvider for FakeProvider {
        async fn get_all(&self) -> Result<Vec<RawProductRecord>, CatalogError> {
            self.all_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_all {
                Err(down())
            } else {
                Ok(vec![record(1), record(2), record(3)])
            }
        }

        async fn search(&self, _query: &str) -> Result<Vec<RawProductRecord>, CatalogError> {
            self.search_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_search {
                Err(down())
            } else {
                Ok(vec![record(2)])
            }
        }
    }

    #[tokio::test]
    async fn no_query_fetches_everything() {
        let provider = FakeProvider::default();
        let records = load_catalog(&provider, None, &[]).await;
        assert_eq!(records.len(), 3);
        assert_eq!(provider.search_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn blank_query_is_treated_as_none() {
        let provider = FakeProvider::default();
        let records = load_catalog(&provider, Some("   "), &[]).await;
        assert_eq!(records.len(), 3);
        assert_eq!(provider.search_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn query_uses_search() {
        let provider = FakeProvider::default();
        let records = load_catalog(&provider, Some("ghee"), &[]).await;
        assert_eq!(records, vec![record(2)]);
        assert_eq!(provider.all_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn failed_search_falls_back_to_all() {
        let provider = FakeProvider {
            fail_search: true,
            ..FakeProvider::default()
        };
        let records = load_catalog(&provider, Some("ghee"), &[]).await;
        assert_eq!(records.len(), 3);
        assert_eq!(provider.all_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_fetch_returns_fallback() {
        let provider = FakeProvider {
            fail_all: true,
            ..FakeProvider::default()
        };
        let fallback = vec![record(99)];
        assert_eq!(load_catalog(&provider, None, &fallback).await, fallback);
    }

    #[tokio::test]
    async fn total_failure_without_fallback_is_empty() {
        let provider = FakeProvider {
            fail_search: true,
            fail_all: true,
            ..FakeProvider::default()
        };
        assert!(load_catalog(&provider, Some("ghee"), &[]).await.is_empty());
    }
}
