//! HTTP client for the Jira agile REST API.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::api_types::{
  ApiBoardListResponse, ApiMyself, ApiSprintIssuesResponse, ApiSprintListResponse,
};
use super::error::JiraError;
use super::types::UserProfile;

/// Every request is bounded by this client-level timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Jira API client. Holds the base URL and bearer token explicitly;
/// nothing here reads ambient configuration.
#[derive(Clone)]
pub struct JiraClient {
  http: reqwest::Client,
  base_url: Url,
  token: String,
}

impl JiraClient {
  pub fn new(base_url: &str, token: &str) -> Result<Self, JiraError> {
    if base_url.is_empty() {
      return Err(JiraError::MissingConfig("jira.url"));
    }
    if token.is_empty() {
      return Err(JiraError::MissingConfig("jira.token"));
    }

    // A trailing slash would make Url::join drop the last path segment.
    let base_url = Url::parse(base_url.trim_end_matches('/'))
      .map_err(|_| JiraError::MissingConfig("jira.url"))?;

    let http = reqwest::Client::builder()
      .timeout(REQUEST_TIMEOUT)
      .build()?;

    Ok(Self {
      http,
      base_url,
      token: token.to_string(),
    })
  }

  /// GET a JSON document from `path` (relative to the base URL).
  async fn get_json<T: DeserializeOwned>(
    &self,
    path: &str,
    query: &[(&str, String)],
  ) -> Result<T, JiraError> {
    let mut url = self
      .base_url
      .join(path)
      .map_err(|_| JiraError::MissingConfig("jira.url"))?;
    for (name, value) in query {
      url.query_pairs_mut().append_pair(name, value);
    }

    debug!(%url, "GET");

    let response = self
      .http
      .get(url)
      .header("Accept", "application/json")
      .bearer_auth(&self.token)
      .send()
      .await?;

    let status = response.status();
    if !status.is_success() {
      return Err(JiraError::Status { status });
    }

    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(JiraError::Decode)
  }

  /// Fetch one page of a sprint's issues.
  pub async fn sprint_issue_page(
    &self,
    sprint_id: u64,
    start_at: u64,
    max_results: u64,
  ) -> Result<ApiSprintIssuesResponse, JiraError> {
    self
      .get_json(
        &format!("/rest/agile/1.0/sprint/{sprint_id}/issue"),
        &[
          ("startAt", start_at.to_string()),
          ("maxResults", max_results.to_string()),
        ],
      )
      .await
  }

  /// Resolve a board id from its exact name.
  pub async fn board_id_from_name(&self, board_name: &str) -> Result<u64, JiraError> {
    let response: ApiBoardListResponse = self
      .get_json(
        "/rest/agile/1.0/board",
        &[("name", board_name.to_string())],
      )
      .await?;

    response
      .values
      .into_iter()
      .find(|b| b.name == board_name)
      .map(|b| b.id)
      .ok_or_else(|| JiraError::BoardNotFound(board_name.to_string()))
  }

  /// The id of the board's currently active sprint.
  pub async fn active_sprint_id(&self, board_id: u64) -> Result<u64, JiraError> {
    let response: ApiSprintListResponse = self
      .get_json(
        &format!("/rest/agile/1.0/board/{board_id}/sprint"),
        &[("state", "active".to_string())],
      )
      .await?;

    response
      .values
      .iter()
      .find(|s| s.state == "active")
      .map(|s| s.id)
      .ok_or(JiraError::NoActiveSprint(board_id))
  }

  /// Resolve a sprint id from its number, matching "Sprint {board_name} {n}".
  pub async fn sprint_id_from_number(
    &self,
    board_id: u64,
    board_name: &str,
    sprint_number: u32,
  ) -> Result<u64, JiraError> {
    let sprint_name = format!("Sprint {board_name} {sprint_number}");

    let response: ApiSprintListResponse = self
      .get_json(
        &format!("/rest/agile/1.0/board/{board_id}/sprint"),
        &[("maxResults", "500".to_string())],
      )
      .await?;

    response
      .values
      .into_iter()
      .find(|s| s.name == sprint_name)
      .map(|s| s.id)
      .ok_or(JiraError::SprintNotFound(sprint_name))
  }

  /// Profile of the authenticated user.
  pub async fn current_user(&self) -> Result<UserProfile, JiraError> {
    let myself: ApiMyself = self.get_json("/rest/api/2/myself", &[]).await?;
    Ok(myself.into_profile())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_url_or_token_is_a_config_error() {
    assert!(matches!(
      JiraClient::new("", "tok"),
      Err(JiraError::MissingConfig("jira.url"))
    ));
    assert!(matches!(
      JiraClient::new("https://jira.example.com", ""),
      Err(JiraError::MissingConfig("jira.token"))
    ));
  }

  #[test]
  fn trailing_slash_is_tolerated() {
    let client = JiraClient::new("https://jira.example.com/", "tok").unwrap();
    assert_eq!(client.base_url.as_str(), "https://jira.example.com/");
  }
}
