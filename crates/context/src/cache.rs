//! The context cache — memoizes assembled contexts for a bounded time.
//!
//! Keyed by (tier, budget, user, query-prefix). Entries expire by real
//! elapsed time against the configured TTL; an expired entry reads as a
//! miss and is overwritten by the next `put` for its key.
//!
//! Thread-safe via `RwLock` — two requests with the same key may race on a
//! preemptive runtime, and a lock around the map read/write is all the
//! coordination this needs (both would build identical contexts anyway;
//! last write wins).

use querygate_core::context::{BuiltContext, SizeTier};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};
use tracing::debug;

/// Number of query characters participating in the key.
const QUERY_PREFIX_CHARS: usize = 20;

/// User label for anonymous requests.
const ANONYMOUS_USER: &str = "anonymous";

/// Cache key: (tier, budget, user, query-prefix).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    tier: SizeTier,
    max_tokens: u32,
    user: String,
    query_prefix: String,
}

impl CacheKey {
    pub fn new(tier: SizeTier, max_tokens: u32, user_id: Option<&str>, query: &str) -> Self {
        Self {
            tier,
            max_tokens,
            user: user_id.unwrap_or(ANONYMOUS_USER).to_string(),
            query_prefix: query.chars().take(QUERY_PREFIX_CHARS).collect(),
        }
    }
}

struct CacheEntry {
    context: Arc<BuiltContext>,
    stored_at: Instant,
}

/// Cache observability counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Live entries (including any not yet purged after expiry).
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

/// TTL-bounded context cache.
pub struct ContextCache {
    entries: RwLock<HashMap<CacheKey, CacheEntry>>,
    ttl: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ContextCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Look up a cached context. Expired entries read as misses.
    pub fn get(&self, key: &CacheKey) -> Option<Arc<BuiltContext>> {
        let entries = self.entries.read().unwrap();
        match entries.get(key) {
            Some(entry) if entry.stored_at.elapsed() < self.ttl => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!(?key, "Context cache hit");
                Some(entry.context.clone())
            }
            Some(_) => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                debug!(?key, "Context cache entry expired");
                None
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Store a context unconditionally, overwriting any prior entry.
    pub fn put(&self, key: CacheKey, context: Arc<BuiltContext>) {
        let mut entries = self.entries.write().unwrap();
        entries.insert(
            key,
            CacheEntry {
                context,
                stored_at: Instant::now(),
            },
        );
    }

    /// Drop every expired entry.
    pub fn purge_expired(&self) {
        let mut entries = self.entries.write().unwrap();
        let before = entries.len();
        entries.retain(|_, entry| entry.stored_at.elapsed() < self.ttl);
        let removed = before - entries.len();
        if removed > 0 {
            debug!(removed, "Purged expired context cache entries");
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().unwrap().is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}
