//! Concurrent, paginated sprint ticket fetching.
//!
//! One probe request learns the sprint's total ticket count, the page
//! planner turns that into a list of page requests, and the pages are
//! fetched with bounded concurrency. Pages complete out of order and are
//! merged by the collecting task, so the returned collection has no
//! defined order; consumers that need one sort by key themselves.

use std::future::Future;

use futures::{stream, StreamExt};
use tracing::{debug, info, warn};

use super::client::JiraClient;
use super::error::JiraError;
use super::pages::{plan_pages, PageRequest};
use super::types::Ticket;

/// Page size for sprint issue requests. Below the API maximum of 50.
pub const PAGE_SIZE: u64 = 25;

/// Cap on concurrently in-flight page requests.
const MAX_IN_FLIGHT: usize = 8;

/// Result of a full sprint fetch.
///
/// `failed_pages` counts pages whose tickets were lost to per-page
/// failures; callers decide whether such a partial result is acceptable.
#[derive(Debug)]
pub struct FetchOutcome {
  pub tickets: Vec<Ticket>,
  /// Authoritative total reported by the API, regardless of failed pages.
  pub total: u64,
  pub failed_pages: usize,
}

impl FetchOutcome {
  pub fn is_complete(&self) -> bool {
    self.failed_pages == 0
  }
}

/// Fan out one fetch per page request, at most [`MAX_IN_FLIGHT`] at a time,
/// and merge the results as pages complete.
///
/// A failed page contributes nothing and is counted; it never fails the
/// whole fan-out, and no cancellation is propagated to in-flight pages.
pub async fn fetch_pages<F, Fut>(plan: Vec<PageRequest>, fetch_page: F) -> (Vec<Ticket>, usize)
where
  F: Fn(PageRequest) -> Fut,
  Fut: Future<Output = Result<Vec<Ticket>, JiraError>>,
{
  let mut pages = stream::iter(plan)
    .map(|req| {
      let page = fetch_page(req);
      async move { (req, page.await) }
    })
    .buffer_unordered(MAX_IN_FLIGHT);

  let mut tickets = Vec::new();
  let mut failed_pages = 0usize;

  while let Some((req, result)) = pages.next().await {
    match result {
      Ok(page_tickets) => {
        debug!(
          page = req.page_num,
          count = page_tickets.len(),
          "page received"
        );
        tickets.extend(page_tickets);
      }
      Err(err) => {
        warn!(page = req.page_num, start_at = req.start_at, %err, "page fetch failed");
        failed_pages += 1;
      }
    }
  }

  (tickets, failed_pages)
}

impl JiraClient {
  /// Fetch the complete ticket collection for a sprint.
  ///
  /// Returns an error only when the initial probe fails; per-page failures
  /// during fan-out are reported through [`FetchOutcome::failed_pages`].
  pub async fn fetch_sprint_tickets(&self, sprint_id: u64) -> Result<FetchOutcome, JiraError> {
    // Page count depends on the total, so probe before planning.
    let probe = self.sprint_issue_page(sprint_id, 0, 1).await?;
    let total = probe.total;

    let plan = plan_pages(total, PAGE_SIZE)?;
    info!(sprint_id, total, pages = plan.len(), "fetching sprint tickets");

    let (tickets, failed_pages) = fetch_pages(plan, |req| {
      let client = self.clone();
      async move {
        let page = client
          .sprint_issue_page(sprint_id, req.start_at, req.max_results)
          .await?;
        Ok(
          page
            .issues
            .into_iter()
            .map(|issue| issue.into_ticket())
            .collect(),
        )
      }
    })
    .await;

    let outcome = FetchOutcome {
      tickets,
      total,
      failed_pages,
    };
    if !outcome.is_complete() {
      warn!(failed_pages, "sprint fetch is missing pages");
    }

    Ok(outcome)
  }
}
