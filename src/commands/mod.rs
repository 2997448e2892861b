//! Command implementations, wiring cache lookup, fetch and filtering
//! together. All network and cache access goes through the seams in
//! `jira` and `cache`; nothing here re-implements their policies.

pub mod fetch;
pub mod init;
pub mod pulse;

use chrono::Duration;
use color_eyre::{eyre::eyre, Report, Result};
use tracing::warn;

use crate::cache::{should_refresh, CacheStore};
use crate::config::{self, Config};
use crate::jira::{JiraClient, JiraError, Ticket};

/// Sprint ticket data, from cache or a fresh fetch.
pub(crate) struct SprintData {
  pub tickets: Vec<Ticket>,
  /// Total tickets in the sprint, as reported by the API at fetch time.
  pub total: u64,
  /// Zero when freshly fetched.
  pub cache_age: Duration,
}

/// Cache-first acquisition of a sprint's tickets.
///
/// A corrupted cache entry degrades to a miss; a failed cache write
/// degrades to a warning. Only a failed fetch probe aborts.
pub(crate) async fn load_sprint_tickets(
  client: &JiraClient,
  store: &CacheStore,
  sprint_id: u64,
  no_cache: bool,
) -> Result<SprintData> {
  let cached = match store.read(sprint_id) {
    Ok(entry) => entry,
    Err(err) => {
      warn!(sprint_id, %err, "cache unreadable, refreshing");
      None
    }
  };

  if should_refresh(cached.as_ref(), no_cache) {
    let outcome = client
      .fetch_sprint_tickets(sprint_id)
      .await
      .map_err(describe_api_error)?;

    if let Err(err) = store.write(sprint_id, &outcome.tickets, outcome.total) {
      warn!(sprint_id, %err, "failed to write cache");
    }

    Ok(SprintData {
      tickets: outcome.tickets,
      total: outcome.total,
      cache_age: Duration::zero(),
    })
  } else {
    let entry = cached.expect("should_refresh returned false for a miss");
    Ok(SprintData {
      cache_age: entry.age(),
      tickets: entry.issues,
      total: entry.total,
    })
  }
}

/// Board id from config, resolving through the API by name when needed.
pub(crate) async fn resolve_board_id(client: &JiraClient, config: &Config) -> Result<u64> {
  if let Some(board_id) = config.jira.board_id {
    return Ok(board_id);
  }

  let board_name = config
    .jira
    .board_name
    .as_deref()
    .ok_or(JiraError::MissingConfig("jira.boardId or jira.boardName"))?;

  client
    .board_id_from_name(board_name)
    .await
    .map_err(describe_api_error)
}

/// The email used by the `me` filter: configured, or fetched from the
/// user's profile and saved back to the local config for next time.
pub(crate) async fn resolve_user_email(client: &JiraClient, config: &Config) -> Result<String> {
  if let Some(email) = config.jira.user_email.as_deref().filter(|e| !e.is_empty()) {
    return Ok(email.to_string());
  }

  eprintln!("Fetching user profile from Jira...");
  let profile = client.current_user().await.map_err(describe_api_error)?;

  if let Err(err) = config::save_user_email(&profile.email) {
    warn!(%err, "failed to save user email to config");
  } else {
    eprintln!("User email saved to config: {}", profile.email);
  }

  Ok(profile.email)
}

/// Turn a Jira error into a report with an actionable hint.
pub(crate) fn describe_api_error(err: JiraError) -> Report {
  if err.is_auth_failure() {
    eyre!(
      "Jira authentication failed ({err})\n\n\
       Verify your token: set jira.token in .sprintctl.local.yml,\n\
       or export SPRINTCTL_TOKEN / JIRA_API_TOKEN."
    )
  } else if err.is_connectivity() {
    eyre!(
      "Failed to reach the Jira API ({err})\n\n\
       Verify jira.url in your configuration and your network connection."
    )
  } else {
    Report::new(err)
  }
}

pub(crate) fn print_ticket_list(tickets: &[Ticket]) {
  if tickets.is_empty() {
    println!("  No tickets.");
    return;
  }
  for ticket in tickets {
    println!(
      "  {} - {} [{}] ({})",
      ticket.key,
      ticket.summary,
      ticket.assignee_name(),
      ticket.priority_name()
    );
  }
}
