use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::jira::Ticket;

/// Default cache TTL in seconds (5 minutes).
pub const DEFAULT_TTL_SECS: i64 = 300;

/// Cached sprint ticket data with expiry metadata, one per sprint.
///
/// Serialized field names are part of the on-disk format; changing them
/// invalidates existing cache files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
  #[serde(rename = "sprintId")]
  pub sprint_id: u64,
  #[serde(rename = "cachedAt")]
  pub cached_at: DateTime<Utc>,
  #[serde(rename = "ttlSeconds")]
  pub ttl_seconds: i64,
  pub total: u64,
  pub issues: Vec<Ticket>,
}

impl CacheEntry {
  /// True once the entry's age strictly exceeds its TTL.
  pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
    now - self.cached_at > Duration::seconds(self.ttl_seconds)
  }

  pub fn is_expired(&self) -> bool {
    self.is_expired_at(Utc::now())
  }

  /// Age of the entry; non-negative with a consistent clock.
  pub fn age_at(&self, now: DateTime<Utc>) -> Duration {
    now - self.cached_at
  }

  pub fn age(&self) -> Duration {
    self.age_at(Utc::now())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn entry(cached_at: DateTime<Utc>) -> CacheEntry {
    CacheEntry {
      sprint_id: 42,
      cached_at,
      ttl_seconds: DEFAULT_TTL_SECS,
      total: 0,
      issues: vec![],
    }
  }

  #[test]
  fn age_equal_to_ttl_is_not_expired() {
    let now = Utc::now();
    let e = entry(now - Duration::seconds(DEFAULT_TTL_SECS));
    assert!(!e.is_expired_at(now));
  }

  #[test]
  fn one_second_past_ttl_is_expired() {
    let now = Utc::now();
    let e = entry(now - Duration::seconds(DEFAULT_TTL_SECS + 1));
    assert!(e.is_expired_at(now));
  }

  #[test]
  fn fresh_entry_reports_its_age() {
    let now = Utc::now();
    let e = entry(now - Duration::seconds(90));
    assert_eq!(e.age_at(now), Duration::seconds(90));
    assert!(!e.is_expired_at(now));
  }
}
