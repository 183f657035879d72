//! Cache store and the `add`/`get` facade
//!
//! Provides a `Cache` that maps request URLs to raw response bodies behind a
//! single mutex. The lock is only held for one map operation (or one reaper
//! sweep) and never across network I/O.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use super::reaper::ReaperHandle;

/// Default period of the background reaper, and its staleness threshold
pub const DEFAULT_REAP_INTERVAL: Duration = Duration::from_secs(30);

/// Default read-time ceiling enforced by `Cache::get`
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(24 * 60 * 60);

/// Smallest interval the reaper will tick at; `tokio::time::interval` panics on zero
const MIN_REAP_INTERVAL: Duration = Duration::from_millis(1);

/// Source of the current time for entry timestamps and expiry checks
pub trait Clock: Send + Sync + fmt::Debug {
    fn now(&self) -> Instant;
}

/// Clock backed by `Instant::now`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Expiry settings for a cache
///
/// The two durations are independent: `reap_interval` drives the background
/// sweep and is its age threshold, `max_age` is checked on every `get`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Period of the reaper and the age beyond which it evicts entries
    pub reap_interval: Duration,
    /// Age beyond which `get` reports an entry as missing and removes it
    pub max_age: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            reap_interval: DEFAULT_REAP_INTERVAL,
            max_age: DEFAULT_MAX_AGE,
        }
    }
}

/// A stored response body and when it was inserted
#[derive(Debug, Clone)]
struct CacheEntry {
    created_at: Instant,
    value: Vec<u8>,
}

impl CacheEntry {
    fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created_at)
    }
}

/// The locked key/value map shared between the facade and the reaper
#[derive(Debug, Default)]
pub(crate) struct Store {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl Store {
    /// Locks the map, recovering it if a previous holder panicked
    ///
    /// Every critical section leaves the map consistent, so a poisoned lock
    /// still guards valid data.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.lock().unwrap_or_else(|poisoned: PoisonError<_>| {
            warn!("cache lock was poisoned; recovering");
            poisoned.into_inner()
        })
    }

    fn insert(&self, key: &str, value: Vec<u8>, now: Instant) {
        self.lock().insert(
            key.to_string(),
            CacheEntry {
                created_at: now,
                value,
            },
        );
    }

    fn lookup(&self, key: &str, now: Instant, max_age: Duration) -> Option<Vec<u8>> {
        let mut entries = self.lock();
        let entry = entries.get(key)?;

        if entry.age(now) > max_age {
            entries.remove(key);
            debug!(key, "cache entry exceeded max age; removed on read");
            return None;
        }

        Some(entry.value.clone())
    }

    /// Removes every entry older than `threshold`, returning how many were removed
    pub(crate) fn sweep(&self, now: Instant, threshold: Duration) -> usize {
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|_, entry| entry.age(now) <= threshold);
        before - entries.len()
    }

    pub(crate) fn len(&self) -> usize {
        self.lock().len()
    }
}

/// Thread-safe, time-expiring cache of raw response bodies keyed by URL
///
/// Constructing a cache spawns its reaper on the current tokio runtime, so
/// construction must happen inside a runtime. Call [`Cache::stop`] during
/// shutdown to join the reaper; dropping the cache also ends it.
#[derive(Debug)]
pub struct Cache {
    store: Arc<Store>,
    clock: Arc<dyn Clock>,
    config: CacheConfig,
    reaper: ReaperHandle,
}

impl Cache {
    /// Creates a cache whose reaper runs every `interval`, with the default max age
    pub fn new(interval: Duration) -> Self {
        Self::with_config(CacheConfig {
            reap_interval: interval,
            ..CacheConfig::default()
        })
    }

    /// Creates a cache with explicit expiry settings
    pub fn with_config(config: CacheConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Creates a cache that reads time from `clock`
    ///
    /// Useful for testing expiry without sleeping.
    pub fn with_clock(config: CacheConfig, clock: Arc<dyn Clock>) -> Self {
        let config = CacheConfig {
            reap_interval: config.reap_interval.max(MIN_REAP_INTERVAL),
            ..config
        };
        let store = Arc::new(Store::default());
        let reaper =
            ReaperHandle::spawn(Arc::clone(&store), Arc::clone(&clock), config.reap_interval);

        Self {
            store,
            clock,
            config,
            reaper,
        }
    }

    /// Inserts or replaces the entry for `key`, stamped with the current time
    pub fn add(&self, key: &str, value: Vec<u8>) {
        self.store.insert(key, value, self.clock.now());
    }

    /// Returns a copy of the value for `key` if present and within the max age
    ///
    /// An entry older than the max age is removed as a side effect and
    /// reported as missing.
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.store.lookup(key, self.clock.now(), self.config.max_age)
    }

    /// Number of entries currently stored, including any not yet reaped
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn config(&self) -> CacheConfig {
        self.config
    }

    /// Whether the background reaper is still running
    pub fn is_reaper_running(&self) -> bool {
        self.reaper.is_running()
    }

    /// Stops the reaper and waits for the task to exit
    pub async fn stop(self) {
        self.reaper.stop().await;
    }
}
