//! CLI status key to Jira status name mapping.

use super::error::JiraError;

/// CLI-friendly status keys and the Jira workflow status they map to.
/// Keys are what users type; names are what the API reports.
const STATUS_MAP: &[(&str, &str)] = &[
  ("archived", "Archived"),
  ("blocked", "Blocked"),
  ("closed", "Closed"),
  ("deploy-uat", "DEPLOY IN UAT"),
  ("in-progress", "In Progress"),
  ("new", "New"),
  ("prep", "Prep"),
  ("to-deploy", "To deploy"),
  ("to-do", "To Do"),
  ("to-test", "To test"),
  ("uat", "UAT"),
];

/// All valid CLI status keys, sorted, for help and error text.
pub fn valid_status_keys() -> Vec<&'static str> {
  STATUS_MAP.iter().map(|(key, _)| *key).collect()
}

/// Convert a CLI status key to the Jira status name.
pub fn map_status_key(cli_key: &str) -> Result<&'static str, JiraError> {
  STATUS_MAP
    .iter()
    .find(|(key, _)| *key == cli_key)
    .map(|(_, name)| *name)
    .ok_or_else(|| JiraError::UnknownStatusKey(cli_key.to_string()))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn known_keys_map_to_jira_names() {
    assert_eq!(map_status_key("to-do").unwrap(), "To Do");
    assert_eq!(map_status_key("deploy-uat").unwrap(), "DEPLOY IN UAT");
    assert_eq!(map_status_key("blocked").unwrap(), "Blocked");
  }

  #[test]
  fn unknown_key_is_rejected() {
    assert!(matches!(
      map_status_key("doing"),
      Err(JiraError::UnknownStatusKey(_))
    ));
  }

  #[test]
  fn keys_are_sorted_for_help_text() {
    let keys = valid_status_keys();
    let mut sorted = keys.clone();
    sorted.sort_unstable();
    assert_eq!(keys, sorted);
  }
}
