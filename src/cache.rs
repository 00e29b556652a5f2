//! In-memory cache for the last successful game list.
//!
//! Expired entries are never evicted. They are still returned by [`GamesCache::read`]
//! with `is_expired = true` so callers can serve stale data when upstream is down.

use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use crate::models::SharedGameList;

/// Default freshness window.
///
/// At 60 requests/minute upstream, 5s bounds this service to 12 requests/minute.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
struct CacheEntry {
    response: SharedGameList,
    stored_at: Instant,
}

/// Result of reading the cache
#[derive(Debug, Clone)]
pub struct CachedGames {
    pub response: SharedGameList,
    /// Time since the entry was stored
    pub age: Duration,
    pub is_expired: bool,
}

/// Single-slot cache shared by every request
#[derive(Debug)]
pub struct GamesCache {
    ttl: Duration,
    entry: RwLock<Option<CacheEntry>>,
}

impl GamesCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entry: RwLock::new(None),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Current entry, fresh or not
    pub async fn read(&self) -> Option<CachedGames> {
        let entry = self.entry.read().await;

        entry.as_ref().map(|e| {
            let age = e.stored_at.elapsed();
            CachedGames {
                response: e.response.clone(),
                age,
                is_expired: age >= self.ttl,
            }
        })
    }

    /// Current entry only if it is younger than the TTL
    pub async fn fresh(&self) -> Option<CachedGames> {
        self.read().await.filter(|cached| !cached.is_expired)
    }

    /// Replace the entry; value and timestamp are swapped together
    pub async fn store(&self, response: SharedGameList) {
        let mut entry = self.entry.write().await;
        *entry = Some(CacheEntry {
            response,
            stored_at: Instant::now(),
        });
    }
}

impl Default for GamesCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}
