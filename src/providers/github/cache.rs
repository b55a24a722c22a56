use chrono::{DateTime, Duration, Utc};

pub const FETCH_TTL_SECONDS: i64 = 60;

#[derive(Debug, Clone)]
struct CacheEntry<T> {
    value: T,
    fetched_at: DateTime<Utc>,
}

impl<T> CacheEntry<T> {
    fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.fetched_at > ttl
    }
}

/// Single-slot memo with time-based expiry and no manual invalidation.
#[derive(Debug)]
pub struct TtlCache<T> {
    ttl: Duration,
    entry: Option<CacheEntry<T>>,
}

impl<T> TtlCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, entry: None }
    }

    pub fn get(&self, now: DateTime<Utc>) -> Option<&T> {
        self.entry
            .as_ref()
            .filter(|entry| !entry.is_expired(now, self.ttl))
            .map(|entry| &entry.value)
    }

    pub fn insert(&mut self, value: T, now: DateTime<Utc>) -> &T {
        &self
            .entry
            .insert(CacheEntry {
                value,
                fetched_at: now,
            })
            .value
    }
}

impl<T> Default for TtlCache<T> {
    fn default() -> Self {
        Self::new(Duration::seconds(FETCH_TTL_SECONDS))
    }
}
