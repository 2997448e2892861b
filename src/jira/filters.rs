//! Pure in-memory filters over fetched or cached ticket collections.

use clap::ValueEnum;

use super::types::Ticket;

/// Assignee filtering mode for ticket views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum AssigneeFilter {
  /// Keep every ticket.
  #[default]
  All,
  /// Keep tickets assigned to the given email; unassigned tickets are dropped.
  Me,
  /// Keep only tickets with no assignee.
  Unassigned,
}

impl AssigneeFilter {
  pub fn as_str(&self) -> &'static str {
    match self {
      AssigneeFilter::All => "all",
      AssigneeFilter::Me => "me",
      AssigneeFilter::Unassigned => "unassigned",
    }
  }
}

impl std::fmt::Display for AssigneeFilter {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Keep tickets whose status name matches exactly (case-sensitive).
/// Order-preserving; no match yields an empty vec.
pub fn filter_by_status(tickets: &[Ticket], status_name: &str) -> Vec<Ticket> {
  tickets
    .iter()
    .filter(|t| t.status == status_name)
    .cloned()
    .collect()
}

/// Filter tickets by assignee. `user_email` is only consulted for `Me`.
pub fn filter_by_assignee(
  tickets: &[Ticket],
  filter: AssigneeFilter,
  user_email: &str,
) -> Vec<Ticket> {
  match filter {
    AssigneeFilter::All => tickets.to_vec(),
    AssigneeFilter::Me => tickets
      .iter()
      .filter(|t| t.assignee.as_ref().is_some_and(|a| a.email == user_email))
      .cloned()
      .collect(),
    AssigneeFilter::Unassigned => tickets
      .iter()
      .filter(|t| t.assignee.is_none())
      .cloned()
      .collect(),
  }
}
