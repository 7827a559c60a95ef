//! Search-as-you-type suggestions for the header search box.
//!
//! Each keystroke calls [`Suggester::suggest`]. A call waits out the debounce
//! window and gives up if a newer call started meanwhile, so a burst of
//! keystrokes costs one catalog fetch and a slow response for an old query
//! can never replace the results of a newer one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parampare_core::AppConfig;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::client::CatalogProvider;
use crate::fields::{self, FieldAliases};
use crate::image::ImageUrlResolver;
use crate::types::RawProductRecord;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(250);
pub const DEFAULT_MIN_QUERY_LEN: usize = 2;
pub const DEFAULT_LIMIT: usize = 8;

const SUGGESTION_PRICE: FieldAliases = FieldAliases {
    field: "price",
    keys: &["price", "salePrice"],
};
const SUGGESTION_IMAGE: FieldAliases = FieldAliases {
    field: "image",
    keys: &["imageUrl", "image", "thumbnailUrl", "image_path"],
};

/// Issues monotonically increasing generations; only the newest is current.
#[derive(Debug, Clone, Default)]
pub struct GenerationGate {
    current: Arc<AtomicU64>,
}

/// Proof of having started work at a given generation.
#[derive(Debug, Clone)]
pub struct Ticket {
    generation: u64,
    current: Arc<AtomicU64>,
}

impl GenerationGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new generation, making every earlier ticket stale.
    #[must_use]
    pub fn issue(&self) -> Ticket {
        let generation = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        Ticket {
            generation,
            current: Arc::clone(&self.current),
        }
    }

    /// Makes every outstanding ticket stale without handing out a new one.
    pub fn invalidate(&self) {
        self.current.fetch_add(1, Ordering::SeqCst);
    }
}

impl Ticket {
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// `false` once a newer ticket was issued or the gate was invalidated.
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.current.load(Ordering::SeqCst) == self.generation
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub id: Option<i64>,
    pub name: String,
    pub price: Decimal,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SuggestOutcome {
    /// Query too short; any open suggestion list should close.
    Cleared,
    /// A newer query or a cancel arrived first. Leave the display alone.
    Superseded,
    Ready(Vec<Suggestion>),
    /// The catalog could not be fetched; close the suggestion list.
    Unavailable,
}

pub struct Suggester<P> {
    provider: P,
    images: ImageUrlResolver,
    gate: GenerationGate,
    debounce: Duration,
    min_query_len: usize,
    limit: usize,
}

impl<P: CatalogProvider> Suggester<P> {
    #[must_use]
    pub fn new(provider: P, images: ImageUrlResolver) -> Self {
        Self {
            provider,
            images,
            gate: GenerationGate::new(),
            debounce: DEFAULT_DEBOUNCE,
            min_query_len: DEFAULT_MIN_QUERY_LEN,
            limit: DEFAULT_LIMIT,
        }
    }

    /// Uses the `PARAMPARE_SUGGEST_*` settings.
    #[must_use]
    pub fn from_config(provider: P, config: &AppConfig) -> Self {
        Self::new(provider, ImageUrlResolver::from_config(config))
            .with_debounce(Duration::from_millis(config.suggest_debounce_ms))
            .with_min_query_len(config.suggest_min_query_len)
            .with_limit(config.suggest_limit)
    }

    #[must_use]
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    #[must_use]
    pub fn with_min_query_len(mut self, min_query_len: usize) -> Self {
        self.min_query_len = min_query_len;
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Suggestions for the current contents of the search box.
    pub async fn suggest(&self, query: &str) -> SuggestOutcome {
        let query = query.trim();
        if query.chars().count() < self.min_query_len {
            self.gate.invalidate();
            return SuggestOutcome::Cleared;
        }

        let ticket = self.gate.issue();
        tokio::time::sleep(self.debounce).await;
        if !ticket.is_current() {
            tracing::debug!(
                query,
                generation = ticket.generation(),
                "suggestion superseded before fetch"
            );
            return SuggestOutcome::Superseded;
        }

        let fetched = self.provider.get_all().await;
        if !ticket.is_current() {
            tracing::debug!(
                query,
                generation = ticket.generation(),
                "suggestion superseded after fetch"
            );
            return SuggestOutcome::Superseded;
        }

        match fetched {
            Ok(records) => SuggestOutcome::Ready(self.matching(&records, query)),
            Err(e) => {
                tracing::warn!(query, error = %e, "suggestion fetch failed");
                SuggestOutcome::Unavailable
            }
        }
    }

    /// Invalidates every in-flight [`Self::suggest`] call, e.g. on unmount.
    pub fn cancel(&self) {
        self.gate.invalidate();
    }

    fn matching(&self, records: &[RawProductRecord], query: &str) -> Vec<Suggestion> {
        let needle = query.to_lowercase();
        records
            .iter()
            .filter_map(|record| {
                let name = fields::NAME.text(&record.0)?;
                name.to_lowercase()
                    .contains(&needle)
                    .then(|| self.suggestion(record, name))
            })
            .take(self.limit)
            .collect()
    }

    fn suggestion(&self, record: &RawProductRecord, name: String) -> Suggestion {
        let r = &record.0;
        Suggestion {
            id: fields::ID.integer(r),
            name,
            price: SUGGESTION_PRICE.decimal(r).unwrap_or(Decimal::ZERO),
            image: self.images.resolve(SUGGESTION_IMAGE.text(r).as_deref()),
        }
    }
}
