use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use influencer_domain::ModelDescriptor;
use tokio::sync::Mutex;
use tracing::debug;

use crate::clock::Clock;
use crate::error::Result;

pub(crate) type Catalog = Arc<Vec<ModelDescriptor>>;

struct CacheEntry {
    fetched_at: Instant,
    models: Catalog,
}

impl CacheEntry {
    fn is_fresh(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.fetched_at) < ttl
    }
}

/// Single-slot, time-bounded cache for the model catalog.
///
/// The lock is held for the whole check-fetch-publish sequence, so concurrent
/// callers that find the slot stale wait for the one refresh in flight instead
/// of issuing their own. A published catalog is never mutated; a refresh
/// swaps in a new `Arc`.
pub(crate) struct ModelCache {
    ttl: Duration,
    clock: Arc<dyn Clock>,
    slot: Mutex<Option<CacheEntry>>,
}

impl ModelCache {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self { ttl, clock, slot: Mutex::new(None) }
    }

    /// Returns the cached catalog while it is fresh, otherwise awaits `fetch`
    /// and publishes its result. A failed fetch leaves the slot untouched.
    pub async fn get_or_refresh<F, Fut>(&self, fetch: F) -> Result<Catalog>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<ModelDescriptor>>>,
    {
        let mut slot = self.slot.lock().await;
        let now = self.clock.now();

        if let Some(entry) = slot.as_ref().filter(|entry| entry.is_fresh(now, self.ttl)) {
            debug!(models = entry.models.len(), "Serving model catalog from cache");
            return Ok(entry.models.clone());
        }

        debug!("Model catalog cache is stale; refreshing");
        let models: Catalog = Arc::new(fetch().await?);
        *slot = Some(CacheEntry { fetched_at: now, models: models.clone() });
        Ok(models)
    }

    /// The cached catalog regardless of age.
    #[cfg(test)]
    pub async fn peek(&self) -> Option<Catalog> {
        self.slot.lock().await.as_ref().map(|entry| entry.models.clone())
    }
}
