//! `sprintctl pulse` - sprint overview grouped by key statuses.
//!
//! Fetches the sprint once through the cache pipeline and filters
//! in-memory for each group.

use color_eyre::Result;

use crate::cache::CacheStore;
use crate::config::Config;
use crate::jira::filters::{filter_by_assignee, filter_by_status};
use crate::jira::{AssigneeFilter, JiraClient};
use crate::output::format_duration;

use super::{load_sprint_tickets, print_ticket_list, resolve_board_id, resolve_user_email};

pub async fn run(config: &Config) -> Result<()> {
  let client = JiraClient::new(config.url()?, config.token()?)?;
  let store = CacheStore::open()?;

  let board_id = resolve_board_id(&client, config).await?;
  let sprint_id = client
    .active_sprint_id(board_id)
    .await
    .map_err(super::describe_api_error)?;

  let data = load_sprint_tickets(&client, &store, sprint_id, false).await?;
  if data.cache_age > chrono::Duration::zero() {
    println!("Using cache (age: {})", format_duration(data.cache_age));
  }

  let user_email = resolve_user_email(&client, config).await?;

  let my_todo = filter_by_assignee(
    &filter_by_status(&data.tickets, "To Do"),
    AssigneeFilter::Me,
    &user_email,
  );
  let my_in_progress = filter_by_assignee(
    &filter_by_status(&data.tickets, "In Progress"),
    AssigneeFilter::Me,
    &user_email,
  );
  let deploy_uat = filter_by_status(&data.tickets, "DEPLOY IN UAT");
  let blocked = filter_by_status(&data.tickets, "Blocked");

  println!("\nSprint Pulse\n");

  println!("My TO DO: {} ticket(s)", my_todo.len());
  print_ticket_list(&my_todo);

  println!("\nMy IN PROGRESS: {} ticket(s)", my_in_progress.len());
  print_ticket_list(&my_in_progress);

  println!("\nDEPLOY IN UAT: {} ticket(s)", deploy_uat.len());
  print_ticket_list(&deploy_uat);

  println!("\nBLOCKED: {} ticket(s)", blocked.len());
  print_ticket_list(&blocked);

  println!("\nSprint total: {} tickets", data.total);

  Ok(())
}
