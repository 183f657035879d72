//! In-memory response cache with time-based expiry
//!
//! Raw API response bodies are stored keyed by request URL. Entries expire in
//! two independent ways: a background reaper sweeps out anything older than
//! the reap interval, and `get` drops anything older than the maximum age on
//! read, regardless of whether the reaper has run.

mod reaper;
mod store;

pub use store::{Cache, CacheConfig, Clock, SystemClock, DEFAULT_MAX_AGE, DEFAULT_REAP_INTERVAL};
