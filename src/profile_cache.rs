use std::num::NonZeroUsize;
use std::time::Duration;
use std::time::Instant;

use lru::LruCache;
use tokio::sync::Mutex;

use crate::profile::UserProfile;

pub(crate) const DEFAULT_CACHE_CAPACITY: usize = 1024;

struct CacheEntry {
    profile: UserProfile,
    created_at: Instant,
}

impl CacheEntry {
    fn new(profile: UserProfile, created_at: Instant) -> Self {
        Self {
            profile,
            created_at,
        }
    }

    fn is_fresh(&self, ttl: Option<Duration>, now: Instant) -> bool {
        match ttl {
            None => true,
            Some(ttl) => self
                .created_at
                .checked_add(ttl)
                .map_or(true, |expires_at| now < expires_at),
        }
    }
}

/// Bounded cache of verified profiles keyed by provider access token
///
/// Freshness is decided at lookup time against the caller's TTL. Expired
/// entries stay in place until a successful re-verification replaces them or
/// the least-recently-used policy evicts them.
pub struct ProfileCache {
    entries: Mutex<LruCache<String, CacheEntry>>,
}

impl std::fmt::Debug for ProfileCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileCache").finish_non_exhaustive()
    }
}

impl Default for ProfileCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl ProfileCache {
    /// Create a cache holding at most `capacity` profiles (a zero capacity holds one)
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Return the profile cached under `key` if it is still fresh at `now`
    ///
    /// With no `ttl` an entry is fresh until it is replaced or evicted.
    pub async fn lookup(
        &self,
        key: &str,
        ttl: Option<Duration>,
        now: Instant,
    ) -> Option<UserProfile> {
        let mut entries = self.entries.lock().await;
        let entry = entries.get(key)?;

        if !entry.is_fresh(ttl, now) {
            return None;
        }

        Some(entry.profile.clone())
    }

    /// Insert or replace the profile cached under `key`, stamped with `now`
    pub async fn store(&self, key: &str, profile: UserProfile, now: Instant) {
        let mut entries = self.entries.lock().await;
        entries.put(key.to_owned(), CacheEntry::new(profile, now));
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    pub async fn capacity(&self) -> usize {
        self.entries.lock().await.cap().get()
    }
}
