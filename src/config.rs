//! Layered YAML configuration.
//!
//! Three layers merge field-by-field, later layers winning:
//! 1. `~/.sprintctl.yml` (user)
//! 2. `./.sprintctl.yml` (project)
//! 3. `./.sprintctl.local.yml` (project secrets, not committed)
//!
//! The API token may instead come from the SPRINTCTL_TOKEN or
//! JIRA_API_TOKEN environment variables, which take precedence.

use std::path::Path;

use color_eyre::{eyre::eyre, Result};
use serde::{Deserialize, Serialize};

use crate::jira::JiraError;

pub const LOCAL_CONFIG_FILE: &str = ".sprintctl.local.yml";
/// Shared by the home-directory and project layers.
const CONFIG_FILE: &str = ".sprintctl.yml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
  #[serde(default)]
  pub jira: JiraSettings,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct JiraSettings {
  pub url: Option<String>,
  pub token: Option<String>,
  #[serde(rename = "boardId")]
  pub board_id: Option<u64>,
  #[serde(rename = "boardName")]
  pub board_name: Option<String>,
  #[serde(rename = "userEmail")]
  pub user_email: Option<String>,
}

impl Config {
  /// Load and merge all configuration layers plus the token env vars.
  pub fn load() -> Result<Self> {
    let mut config = Config::default();

    if let Some(home) = dirs::home_dir() {
      config.merge(Self::from_file_if_exists(&home.join(CONFIG_FILE))?);
    }
    if let Ok(cwd) = std::env::current_dir() {
      config.merge(Self::from_file_if_exists(&cwd.join(CONFIG_FILE))?);
      config.merge(Self::from_file_if_exists(&cwd.join(LOCAL_CONFIG_FILE))?);
    }

    if let Some(token) = Self::token_from_env() {
      config.jira.token = Some(token);
    }

    Ok(config)
  }

  fn token_from_env() -> Option<String> {
    std::env::var("SPRINTCTL_TOKEN")
      .or_else(|_| std::env::var("JIRA_API_TOKEN"))
      .ok()
      .filter(|t| !t.is_empty())
  }

  fn from_file_if_exists(path: &Path) -> Result<Option<Config>> {
    if !path.exists() {
      return Ok(None);
    }
    Self::from_file(path).map(Some)
  }

  pub fn from_file(path: &Path) -> Result<Self> {
    let contents = std::fs::read_to_string(path)
      .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;
    serde_yaml::from_str(&contents)
      .map_err(|e| eyre!("Failed to parse config file {}: {}", path.display(), e))
  }

  /// Merge another layer into this one; set fields in `other` win.
  pub fn merge(&mut self, other: Option<Config>) {
    let Some(other) = other else { return };
    let jira = other.jira;
    if jira.url.is_some() {
      self.jira.url = jira.url;
    }
    if jira.token.is_some() {
      self.jira.token = jira.token;
    }
    if jira.board_id.is_some() {
      self.jira.board_id = jira.board_id;
    }
    if jira.board_name.is_some() {
      self.jira.board_name = jira.board_name;
    }
    if jira.user_email.is_some() {
      self.jira.user_email = jira.user_email;
    }
  }

  pub fn url(&self) -> Result<&str, JiraError> {
    self
      .jira
      .url
      .as_deref()
      .filter(|s| !s.is_empty())
      .ok_or(JiraError::MissingConfig("jira.url"))
  }

  pub fn token(&self) -> Result<&str, JiraError> {
    self
      .jira
      .token
      .as_deref()
      .filter(|s| !s.is_empty())
      .ok_or(JiraError::MissingConfig("jira.token"))
  }
}

/// Set one dotted field in a YAML config file, preserving the rest of the
/// document structure. Creates the file if it does not exist.
pub fn update_config_field(path: &Path, dotted_key: &str, value: serde_yaml::Value) -> Result<()> {
  let mut doc: serde_yaml::Value = if path.exists() {
    let contents = std::fs::read_to_string(path)
      .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;
    if contents.trim().is_empty() {
      serde_yaml::Value::Mapping(serde_yaml::Mapping::new())
    } else {
      serde_yaml::from_str(&contents)
        .map_err(|e| eyre!("Failed to parse config file {}: {}", path.display(), e))?
    }
  } else {
    serde_yaml::Value::Mapping(serde_yaml::Mapping::new())
  };

  let segments: Vec<&str> = dotted_key.split('.').collect();
  set_nested(&mut doc, &segments, value)
    .map_err(|e| eyre!("Setting config field '{}': {}", dotted_key, e))?;

  let serialized =
    serde_yaml::to_string(&doc).map_err(|e| eyre!("Failed to serialize config: {}", e))?;
  std::fs::write(path, serialized)
    .map_err(|e| eyre!("Failed to write config file {}: {}", path.display(), e))?;

  Ok(())
}

fn set_nested(
  node: &mut serde_yaml::Value,
  segments: &[&str],
  value: serde_yaml::Value,
) -> Result<()> {
  let mapping = node
    .as_mapping_mut()
    .ok_or_else(|| eyre!("expected a mapping at '{}'", segments[0]))?;
  let key = serde_yaml::Value::String(segments[0].to_string());

  if segments.len() == 1 {
    mapping.insert(key, value);
    return Ok(());
  }

  if !mapping.contains_key(&key) {
    mapping.insert(
      key.clone(),
      serde_yaml::Value::Mapping(serde_yaml::Mapping::new()),
    );
  }
  let child = mapping.get_mut(&key).expect("key inserted above");
  set_nested(child, &segments[1..], value)
}

/// Persist the resolved user email into the local config file (best effort;
/// callers treat failure as a warning).
pub fn save_user_email(email: &str) -> Result<()> {
  let path = std::env::current_dir()?.join(LOCAL_CONFIG_FILE);
  update_config_field(
    &path,
    "jira.userEmail",
    serde_yaml::Value::String(email.to_string()),
  )
}
