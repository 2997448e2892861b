//! Presentation of fetched ticket collections: plain text, JSON and
//! markdown. Nothing here touches the network or the cache.

use chrono::Duration;
use serde::Serialize;

use crate::jira::{AssigneeFilter, Ticket};

/// Context shared by every output format.
pub struct ReportContext<'a> {
  pub sprint_id: u64,
  /// Total tickets in the sprint, before filtering.
  pub total: u64,
  /// Zero when the data came fresh from the API.
  pub cache_age: Duration,
  pub no_cache: bool,
  /// Human-readable status label ("Blocked", or "all statuses").
  pub status_label: &'a str,
  pub assignee_filter: AssigneeFilter,
}

/// Compact duration display: "45s", "3m20s", "1.5h".
pub fn format_duration(d: Duration) -> String {
  let secs = d.num_seconds().max(0);
  if secs < 60 {
    return format!("{secs}s");
  }
  if secs < 3600 {
    let minutes = secs / 60;
    let rest = secs % 60;
    if rest == 0 {
      return format!("{minutes}m");
    }
    return format!("{minutes}m{rest}s");
  }
  format!("{:.1}h", secs as f64 / 3600.0)
}

fn ticket_line(ticket: &Ticket) -> String {
  format!(
    "{} - {} [{}] ({})",
    ticket.key,
    ticket.summary,
    ticket.assignee_name(),
    ticket.priority_name()
  )
}

/// Render the default terminal view.
pub fn render_text(tickets: &[Ticket], ctx: &ReportContext) -> String {
  let mut out = String::new();

  if ctx.no_cache {
    out.push_str("Cache bypassed (--no-cache)\n");
  } else {
    out.push_str(&format!(
      "Using cache (age: {})\n",
      format_duration(ctx.cache_age)
    ));
  }
  out.push_str(&format!(
    "Tickets: {} (filter: {})\n\n",
    ctx.status_label,
    ctx.assignee_filter.as_str()
  ));

  if tickets.is_empty() {
    out.push_str("No tickets found.\n\n");
  } else {
    for ticket in tickets {
      out.push_str(&ticket_line(ticket));
      out.push('\n');
    }
    out.push('\n');
  }

  out.push_str(&format!(
    "Total: {} ticket(s) in status '{}' (filter: {})\n",
    tickets.len(),
    ctx.status_label,
    ctx.assignee_filter.as_str()
  ));
  out.push_str(&format!("Cache: {} tickets in the sprint\n", ctx.total));

  out
}

// ============================================================================
// JSON output
// ============================================================================

#[derive(Serialize)]
struct JsonReport<'a> {
  sprint: JsonSprint,
  filter: JsonFilter<'a>,
  tickets: &'a [Ticket],
  summary: JsonSummary,
}

#[derive(Serialize)]
struct JsonSprint {
  id: u64,
  total: u64,
  cache: JsonCache,
}

#[derive(Serialize)]
struct JsonCache {
  age: String,
  expired: bool,
}

#[derive(Serialize)]
struct JsonFilter<'a> {
  status: &'a str,
  assignee: &'static str,
}

#[derive(Serialize)]
struct JsonSummary {
  count: usize,
  total_cache: u64,
  cache_used: bool,
}

pub fn render_json(tickets: &[Ticket], ctx: &ReportContext) -> color_eyre::Result<String> {
  let report = JsonReport {
    sprint: JsonSprint {
      id: ctx.sprint_id,
      total: ctx.total,
      cache: JsonCache {
        age: format_duration(ctx.cache_age),
        expired: ctx.cache_age > Duration::seconds(crate::cache::DEFAULT_TTL_SECS),
      },
    },
    filter: JsonFilter {
      status: ctx.status_label,
      assignee: ctx.assignee_filter.as_str(),
    },
    tickets,
    summary: JsonSummary {
      count: tickets.len(),
      total_cache: ctx.total,
      cache_used: !ctx.no_cache,
    },
  };

  Ok(serde_json::to_string_pretty(&report)?)
}

// ============================================================================
// Markdown output
// ============================================================================

pub fn render_markdown(tickets: &[Ticket], ctx: &ReportContext) -> String {
  let mut md = String::new();

  md.push_str(&format!("# Sprint Report - {}\n\n", ctx.status_label));
  md.push_str(&format!("**Sprint ID**: {}\n", ctx.sprint_id));
  md.push_str(&format!("**Filter**: {}\n", ctx.assignee_filter.as_str()));
  md.push_str(&format!(
    "**Cache**: {}\n",
    format_duration(ctx.cache_age)
  ));
  if ctx.no_cache {
    md.push_str("**Cache Status**: Bypassed (--no-cache)\n");
  }
  md.push_str("\n## Summary\n\n");
  md.push_str(&format!("- **Total tickets in sprint**: {}\n", ctx.total));
  md.push_str(&format!("- **Filtered tickets**: {}\n\n", tickets.len()));

  md.push_str("## Tickets\n\n");
  if tickets.is_empty() {
    md.push_str("_No tickets found._\n");
  } else {
    for ticket in tickets {
      md.push_str(&format!("### {}\n\n", ticket.key));
      md.push_str(&format!("**Summary**: {}\n\n", ticket.summary));
      md.push_str(&format!("- **Assignee**: {}\n", ticket.assignee_name()));
      md.push_str(&format!("- **Priority**: {}\n", ticket.priority_name()));
      md.push_str(&format!("- **Status**: {}\n\n", ticket.status));
    }
  }

  md
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::jira::types::Assignee;

  fn tickets() -> Vec<Ticket> {
    vec![Ticket {
      key: "PROJ-1".to_string(),
      summary: "Fix the widget".to_string(),
      status: "Blocked".to_string(),
      assignee: Some(Assignee {
        display_name: "Ada".to_string(),
        email: "ada@x.com".to_string(),
      }),
      priority: None,
    }]
  }

  fn ctx(label: &str) -> ReportContext {
    ReportContext {
      sprint_id: 42,
      total: 57,
      cache_age: Duration::seconds(95),
      no_cache: false,
      status_label: label,
      assignee_filter: AssigneeFilter::All,
    }
  }

  #[test]
  fn duration_formatting() {
    assert_eq!(format_duration(Duration::seconds(0)), "0s");
    assert_eq!(format_duration(Duration::seconds(45)), "45s");
    assert_eq!(format_duration(Duration::seconds(180)), "3m");
    assert_eq!(format_duration(Duration::seconds(200)), "3m20s");
    assert_eq!(format_duration(Duration::seconds(5400)), "1.5h");
    // Negative ages never render, but must not underflow.
    assert_eq!(format_duration(Duration::seconds(-5)), "0s");
  }

  #[test]
  fn text_report_includes_counts_and_age() {
    let out = render_text(&tickets(), &ctx("Blocked"));
    assert!(out.contains("age: 1m35s"));
    assert!(out.contains("PROJ-1 - Fix the widget [Ada] (Medium)"));
    assert!(out.contains("Total: 1 ticket(s) in status 'Blocked'"));
    assert!(out.contains("Cache: 57 tickets in the sprint"));
  }

  #[test]
  fn json_report_has_the_expected_shape() {
    let out = render_json(&tickets(), &ctx("Blocked")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["sprint"]["id"], 42);
    assert_eq!(value["sprint"]["cache"]["expired"], false);
    assert_eq!(value["summary"]["count"], 1);
    assert_eq!(value["tickets"][0]["key"], "PROJ-1");
  }

  #[test]
  fn markdown_report_lists_tickets() {
    let md = render_markdown(&tickets(), &ctx("Blocked"));
    assert!(md.starts_with("# Sprint Report - Blocked"));
    assert!(md.contains("### PROJ-1"));
    assert!(md.contains("- **Priority**: Medium"));
  }

  #[test]
  fn empty_markdown_report_has_placeholder() {
    let md = render_markdown(&[], &ctx("UAT"));
    assert!(md.contains("_No tickets found._"));
  }
}
