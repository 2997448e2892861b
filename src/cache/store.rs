//! Filesystem-backed sprint ticket cache, one JSON file per sprint.

use std::fs;
use std::path::PathBuf;

use chrono::Utc;
use color_eyre::{eyre::eyre, Result};

use crate::jira::Ticket;

use super::entry::{CacheEntry, DEFAULT_TTL_SECS};

/// Cache store rooted at a per-user cache directory.
///
/// There is no cross-process locking: two concurrent invocations racing on
/// the same sprint file resolve as last-writer-wins. The rename-based write
/// keeps individual entries whole either way.
pub struct CacheStore {
  root: PathBuf,
}

impl CacheStore {
  /// Open the store at the default per-user location.
  pub fn open() -> Result<Self> {
    let cache_dir = dirs::cache_dir()
      .or_else(|| dirs::home_dir().map(|p| p.join(".cache")))
      .ok_or_else(|| eyre!("Could not determine cache directory"))?;

    Ok(Self {
      root: cache_dir.join("sprintctl"),
    })
  }

  /// Open a store rooted at an explicit directory.
  pub fn with_root(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  fn entry_path(&self, sprint_id: u64) -> PathBuf {
    self.root.join(format!("sprint_{sprint_id}.json"))
  }

  /// Read the cached entry for a sprint.
  ///
  /// A missing file is a cache miss, `Ok(None)`. Unreadable or malformed
  /// content is an error; callers degrade it to a miss rather than abort.
  pub fn read(&self, sprint_id: u64) -> Result<Option<CacheEntry>> {
    let path = self.entry_path(sprint_id);

    let data = match fs::read(&path) {
      Ok(data) => data,
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
      Err(e) => return Err(eyre!("Failed to read cache file {}: {}", path.display(), e)),
    };

    let entry: CacheEntry = serde_json::from_slice(&data)
      .map_err(|e| eyre!("Corrupted cache file {}: {}", path.display(), e))?;

    Ok(Some(entry))
  }

  /// Write a fresh entry for a sprint, replacing any previous one.
  ///
  /// The entry is written to a temp file in the same directory and renamed
  /// over the destination, so a concurrent reader sees either the old or
  /// the new entry, never a mix.
  pub fn write(&self, sprint_id: u64, tickets: &[Ticket], total: u64) -> Result<()> {
    fs::create_dir_all(&self.root)
      .map_err(|e| eyre!("Failed to create cache directory {}: {}", self.root.display(), e))?;

    let entry = CacheEntry {
      sprint_id,
      cached_at: Utc::now(),
      ttl_seconds: DEFAULT_TTL_SECS,
      total,
      issues: tickets.to_vec(),
    };

    let data = serde_json::to_vec_pretty(&entry)
      .map_err(|e| eyre!("Failed to serialize cache entry: {}", e))?;

    let path = self.entry_path(sprint_id);
    let tmp_path = path.with_extension("json.tmp");

    fs::write(&tmp_path, data)
      .map_err(|e| eyre!("Failed to write cache file {}: {}", tmp_path.display(), e))?;
    fs::rename(&tmp_path, &path)
      .map_err(|e| eyre!("Failed to replace cache file {}: {}", path.display(), e))?;

    Ok(())
  }
}

/// Single authority for the freshness decision: refresh when the cache is
/// bypassed, missing, or expired.
pub fn should_refresh(entry: Option<&CacheEntry>, no_cache: bool) -> bool {
  if no_cache {
    return true;
  }
  match entry {
    None => true,
    Some(entry) => entry.is_expired(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::jira::types::Assignee;
  use chrono::Duration;
  use std::collections::HashSet;

  fn sample_tickets() -> Vec<Ticket> {
    vec![
      Ticket {
        key: "PROJ-1".to_string(),
        summary: "First".to_string(),
        status: "To Do".to_string(),
        assignee: Some(Assignee {
          display_name: "Ada".to_string(),
          email: "ada@x.com".to_string(),
        }),
        priority: Some("High".to_string()),
      },
      Ticket {
        key: "PROJ-2".to_string(),
        summary: "Second".to_string(),
        status: "Blocked".to_string(),
        assignee: None,
        priority: None,
      },
    ]
  }

  #[test]
  fn missing_file_is_a_miss_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = CacheStore::with_root(dir.path());
    assert!(store.read(123).unwrap().is_none());
  }

  #[test]
  fn write_then_read_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let store = CacheStore::with_root(dir.path());
    let tickets = sample_tickets();

    let before = Utc::now();
    store.write(42, &tickets, 2).unwrap();

    let entry = store.read(42).unwrap().expect("entry should exist");
    assert_eq!(entry.sprint_id, 42);
    assert_eq!(entry.total, 2);
    assert_eq!(entry.ttl_seconds, DEFAULT_TTL_SECS);
    assert!(entry.cached_at >= before);

    let keys: HashSet<&str> = entry.issues.iter().map(|t| t.key.as_str()).collect();
    assert_eq!(keys, HashSet::from(["PROJ-1", "PROJ-2"]));
  }

  #[test]
  fn cached_fields_use_the_documented_names() {
    let dir = tempfile::tempdir().unwrap();
    let store = CacheStore::with_root(dir.path());
    store.write(7, &sample_tickets(), 2).unwrap();

    let raw = fs::read_to_string(dir.path().join("sprint_7.json")).unwrap();
    for field in ["sprintId", "cachedAt", "ttlSeconds", "total", "issues"] {
      assert!(raw.contains(field), "missing field {field}");
    }
  }

  #[test]
  fn corrupted_content_errors_without_panicking() {
    let dir = tempfile::tempdir().unwrap();
    let store = CacheStore::with_root(dir.path());
    fs::write(dir.path().join("sprint_9.json"), b"not json at all {{{").unwrap();

    assert!(store.read(9).is_err());
  }

  #[test]
  fn write_supersedes_the_previous_entry() {
    let dir = tempfile::tempdir().unwrap();
    let store = CacheStore::with_root(dir.path());

    store.write(1, &sample_tickets(), 2).unwrap();
    store.write(1, &sample_tickets()[..1], 1).unwrap();

    let entry = store.read(1).unwrap().unwrap();
    assert_eq!(entry.total, 1);
    assert_eq!(entry.issues.len(), 1);

    // No temp file should linger after a successful write.
    assert!(!dir.path().join("sprint_1.json.tmp").exists());
  }

  #[test]
  fn refresh_decision_matrix() {
    let fresh = CacheEntry {
      sprint_id: 1,
      cached_at: Utc::now(),
      ttl_seconds: DEFAULT_TTL_SECS,
      total: 0,
      issues: vec![],
    };
    let expired = CacheEntry {
      cached_at: Utc::now() - Duration::seconds(DEFAULT_TTL_SECS + 5),
      ..fresh.clone()
    };

    assert!(should_refresh(None, false));
    assert!(!should_refresh(Some(&fresh), false));
    assert!(should_refresh(Some(&fresh), true));
    assert!(should_refresh(Some(&expired), false));
  }
}
