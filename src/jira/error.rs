//! Error taxonomy for Jira API access.
//!
//! Callers need to tell an authentication failure from a connectivity one
//! to show useful hints, so the client reports structured variants rather
//! than opaque report strings.

use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum JiraError {
  /// A required setting is absent. Fatal to the operation, no retry.
  #[error("missing configuration: {0}")]
  MissingConfig(&'static str),

  /// DNS/connect failure or timeout reaching the Jira API.
  #[error("calling Jira API: {0}")]
  Transport(#[from] reqwest::Error),

  /// Jira answered with a non-success HTTP status.
  #[error("Jira API returned status {status}")]
  Status { status: StatusCode },

  /// The response body could not be decoded.
  #[error("decoding Jira response: {0}")]
  Decode(#[source] serde_json::Error),

  /// Page size must be positive; the planner never infers a default.
  #[error("page size must be positive, got {0}")]
  InvalidPageSize(u64),

  #[error("no board found with exact name '{0}'")]
  BoardNotFound(String),

  #[error("sprint '{0}' not found")]
  SprintNotFound(String),

  #[error("no active sprint on board {0}")]
  NoActiveSprint(u64),

  #[error("invalid status key '{0}'")]
  UnknownStatusKey(String),
}

impl JiraError {
  /// True when the token was rejected, as opposed to a connectivity problem.
  pub fn is_auth_failure(&self) -> bool {
    match self {
      JiraError::Status { status } => {
        *status == StatusCode::UNAUTHORIZED || *status == StatusCode::FORBIDDEN
      }
      _ => false,
    }
  }

  pub fn is_connectivity(&self) -> bool {
    match self {
      JiraError::Transport(e) => e.is_connect() || e.is_timeout(),
      _ => false,
    }
  }
}
