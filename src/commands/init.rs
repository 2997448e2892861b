//! `sprintctl init` - resolve the board id once and store it in a config
//! file, avoiding an extra API call on every later invocation.

use std::path::PathBuf;

use clap::Args;
use color_eyre::{eyre::eyre, Result};

use crate::config::{self, Config};
use crate::jira::{JiraClient, JiraError};

#[derive(Debug, Args)]
pub struct InitArgs {
  /// Name of the Jira board to resolve. Falls back to jira.boardName.
  #[arg(long)]
  pub board_name: Option<String>,

  /// Config file to store the resolved board id in.
  #[arg(long, default_value = config::LOCAL_CONFIG_FILE)]
  pub config_path: PathBuf,
}

pub async fn run(args: InitArgs, config: &Config) -> Result<()> {
  let board_name = args
    .board_name
    .as_deref()
    .or(config.jira.board_name.as_deref())
    .ok_or(JiraError::MissingConfig("jira.boardName"))?;

  println!("Resolving board id for '{board_name}'...");

  let client = JiraClient::new(config.url()?, config.token()?)?;
  let board_id = client
    .board_id_from_name(board_name)
    .await
    .map_err(super::describe_api_error)?;

  println!("Board found: '{board_name}' (id: {board_id})");

  config::update_config_field(
    &args.config_path,
    "jira.boardId",
    serde_yaml::Value::Number(board_id.into()),
  )
  .map_err(|e| eyre!("updating {}: {}", args.config_path.display(), e))?;

  println!("Board id saved to {}", args.config_path.display());

  Ok(())
}
