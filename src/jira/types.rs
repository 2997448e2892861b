use serde::{Deserialize, Serialize};

/// A sprint ticket with the fields needed for display and filtering.
///
/// Tickets are immutable value records once fetched; they are serialized
/// as-is into the cache file and into JSON output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
  pub key: String,
  pub summary: String,
  pub status: String,
  /// None when the ticket is unassigned.
  pub assignee: Option<Assignee>,
  /// None when no priority is set; displayed as "Medium" by convention.
  pub priority: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignee {
  pub display_name: String,
  pub email: String,
}

impl Ticket {
  /// Assignee display name, or the unassigned placeholder.
  pub fn assignee_name(&self) -> &str {
    self
      .assignee
      .as_ref()
      .map(|a| a.display_name.as_str())
      .unwrap_or("Unassigned")
  }

  /// Priority name, defaulting to "Medium" when Jira reports none.
  pub fn priority_name(&self) -> &str {
    self.priority.as_deref().unwrap_or("Medium")
  }
}

/// The authenticated Jira user, as reported by the `myself` endpoint.
#[derive(Debug, Clone)]
pub struct UserProfile {
  pub account_id: String,
  pub email: String,
  pub display_name: String,
}
