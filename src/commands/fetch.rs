//! `sprintctl fetch` - fetch, filter and display sprint tickets.

use std::path::PathBuf;

use clap::Args;
use color_eyre::{eyre::eyre, Result};
use tracing::debug;

use crate::cache::CacheStore;
use crate::config::Config;
use crate::jira::filters::{filter_by_assignee, filter_by_status};
use crate::jira::status::{map_status_key, valid_status_keys};
use crate::jira::{AssigneeFilter, JiraClient};
use crate::output::{render_json, render_markdown, render_text, ReportContext};

use super::{load_sprint_tickets, resolve_board_id, resolve_user_email};

#[derive(Debug, Args)]
pub struct FetchArgs {
  /// Status key to filter by (e.g. to-do, in-progress, blocked).
  /// Omit to fetch all tickets.
  pub status: Option<String>,

  /// Filter by assignee.
  #[arg(long, value_enum, default_value_t)]
  pub filter: AssigneeFilter,

  /// Bypass the cache and fetch fresh data.
  #[arg(long)]
  pub no_cache: bool,

  /// Output results as JSON.
  #[arg(long)]
  pub json: bool,

  /// Fetch a specific sprint by number instead of the active one.
  #[arg(long)]
  pub sprint_number: Option<u32>,

  /// Write output to a file (markdown, or JSON with --json).
  #[arg(short, long)]
  pub output: Option<PathBuf>,
}

pub async fn run(args: FetchArgs, config: &Config) -> Result<()> {
  // Validate the status key before any network work.
  let status_name = match args.status.as_deref() {
    Some(key) => Some(map_status_key(key).map_err(|err| {
      eprintln!("Error: {err}\n\nValid status keys:");
      for key in valid_status_keys() {
        eprintln!("  - {key}");
      }
      eyre!("invalid status key")
    })?),
    None => None,
  };

  let client = JiraClient::new(config.url()?, config.token()?)?;
  let store = CacheStore::open()?;

  let board_id = resolve_board_id(&client, config).await?;
  let sprint_id = match args.sprint_number {
    Some(number) => {
      let board_name = config
        .jira
        .board_name
        .as_deref()
        .ok_or(crate::jira::JiraError::MissingConfig("jira.boardName"))?;
      client
        .sprint_id_from_number(board_id, board_name, number)
        .await
        .map_err(super::describe_api_error)?
    }
    None => client
      .active_sprint_id(board_id)
      .await
      .map_err(super::describe_api_error)?,
  };
  debug!(sprint_id, "resolved sprint");

  let data = load_sprint_tickets(&client, &store, sprint_id, args.no_cache).await?;

  let mut tickets = data.tickets;
  if let Some(status_name) = status_name {
    tickets = filter_by_status(&tickets, status_name);
  }
  if args.filter != AssigneeFilter::All {
    let user_email = if args.filter == AssigneeFilter::Me {
      resolve_user_email(&client, config).await?
    } else {
      String::new()
    };
    tickets = filter_by_assignee(&tickets, args.filter, &user_email);
  }

  let ctx = ReportContext {
    sprint_id,
    total: data.total,
    cache_age: data.cache_age,
    no_cache: args.no_cache,
    status_label: status_name.unwrap_or("all statuses"),
    assignee_filter: args.filter,
  };

  if let Some(path) = args.output {
    let content = if args.json {
      render_json(&tickets, &ctx)?
    } else {
      render_markdown(&tickets, &ctx)
    };
    std::fs::write(&path, content)
      .map_err(|e| eyre!("writing output to {}: {}", path.display(), e))?;
    eprintln!("Output written to: {}", path.display());
    return Ok(());
  }

  if args.json {
    println!("{}", render_json(&tickets, &ctx)?);
  } else {
    print!("{}", render_text(&tickets, &ctx));
  }

  Ok(())
}
