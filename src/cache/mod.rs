//! Per-sprint ticket cache with a time-to-live.
//!
//! Each sprint gets one JSON file under the per-user cache directory. A
//! corrupted or missing file degrades to a miss; a failed write degrades
//! to a warning. The fetch pipeline stays usable either way.

mod entry;
mod store;

pub use entry::{CacheEntry, DEFAULT_TTL_SECS};
pub use store::{should_refresh, CacheStore};
