//! Serde-deserializable types matching Jira agile API responses.
//!
//! These types are separate from domain types to allow clean deserialization
//! while keeping domain types focused on application needs.

use serde::Deserialize;

use super::types::{Assignee, Ticket, UserProfile};

// ============================================================================
// Common nested field types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ApiStatus {
  pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ApiUser {
  #[serde(rename = "displayName")]
  pub display_name: String,
  #[serde(rename = "emailAddress", default)]
  pub email_address: String,
}

#[derive(Debug, Deserialize)]
pub struct ApiPriority {
  pub name: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct ApiIssueFields {
  #[serde(default)]
  pub summary: String,
  pub status: Option<ApiStatus>,
  pub assignee: Option<ApiUser>,
  pub priority: Option<ApiPriority>,
}

#[derive(Debug, Deserialize)]
pub struct ApiIssue {
  pub key: String,
  #[serde(default)]
  pub fields: ApiIssueFields,
}

impl ApiIssue {
  pub fn into_ticket(self) -> Ticket {
    Ticket {
      key: self.key,
      summary: self.fields.summary,
      status: self.fields.status.map(|s| s.name).unwrap_or_default(),
      assignee: self.fields.assignee.map(|a| Assignee {
        display_name: a.display_name,
        email: a.email_address,
      }),
      priority: self.fields.priority.map(|p| p.name),
    }
  }
}

// ============================================================================
// Sprint issues endpoint response
// ============================================================================

/// One page of `/rest/agile/1.0/sprint/{id}/issue`. The wire format also
/// carries `maxResults` and `startAt`, which we never consume.
#[derive(Debug, Deserialize)]
pub struct ApiSprintIssuesResponse {
  #[serde(default)]
  pub total: u64,
  #[serde(rename = "isLast", default)]
  pub is_last: bool,
  #[serde(default)]
  pub issues: Vec<ApiIssue>,
}

// ============================================================================
// Board and sprint listing responses
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ApiBoard {
  pub id: u64,
  pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ApiBoardListResponse {
  #[serde(default)]
  pub values: Vec<ApiBoard>,
}

#[derive(Debug, Deserialize)]
pub struct ApiSprint {
  pub id: u64,
  pub name: String,
  /// "active", "future" or "closed"
  #[serde(default)]
  pub state: String,
}

#[derive(Debug, Deserialize)]
pub struct ApiSprintListResponse {
  #[serde(default)]
  pub values: Vec<ApiSprint>,
}

// ============================================================================
// Current user endpoint response
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ApiMyself {
  #[serde(rename = "accountId", default)]
  pub account_id: String,
  #[serde(rename = "emailAddress", default)]
  pub email_address: String,
  #[serde(rename = "displayName", default)]
  pub display_name: String,
}

impl ApiMyself {
  pub fn into_profile(self) -> UserProfile {
    UserProfile {
      account_id: self.account_id,
      email: self.email_address,
      display_name: self.display_name,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn sprint_issue_page_deserializes() {
    let body = r#"{
      "maxResults": 25,
      "startAt": 0,
      "total": 57,
      "isLast": false,
      "issues": [
        {
          "key": "PROJ-1",
          "fields": {
            "summary": "Fix the widget",
            "status": { "name": "In Progress" },
            "assignee": { "displayName": "Ada", "emailAddress": "ada@x.com" },
            "priority": { "name": "High" }
          }
        },
        {
          "key": "PROJ-2",
          "fields": {
            "summary": "Unassigned one",
            "status": { "name": "To Do" },
            "assignee": null,
            "priority": null
          }
        }
      ]
    }"#;

    let page: ApiSprintIssuesResponse = serde_json::from_str(body).unwrap();
    assert_eq!(page.total, 57);
    assert!(!page.is_last);
    assert_eq!(page.issues.len(), 2);

    let first = page.issues.into_iter().next().unwrap().into_ticket();
    assert_eq!(first.key, "PROJ-1");
    assert_eq!(first.status, "In Progress");
    assert_eq!(first.assignee.unwrap().email, "ada@x.com");
    assert_eq!(first.priority.as_deref(), Some("High"));
  }

  #[test]
  fn missing_optional_fields_become_none() {
    let issue: ApiIssue =
      serde_json::from_str(r#"{ "key": "PROJ-3", "fields": { "summary": "Bare" } }"#).unwrap();
    let ticket = issue.into_ticket();
    assert!(ticket.assignee.is_none());
    assert!(ticket.priority.is_none());
    assert_eq!(ticket.priority_name(), "Medium");
  }
}
