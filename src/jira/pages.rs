//! Page planning for paginated sprint issue fetches.

use super::error::JiraError;

/// One page worth of a paginated issue request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
  /// 1-based page number, used for progress reporting.
  pub page_num: u64,
  /// 0-based offset into the result set.
  pub start_at: u64,
  pub max_results: u64,
}

/// Compute the page requests needed to cover `total` items.
///
/// The plan exactly partitions `[0, total)`: requests are contiguous,
/// non-overlapping, and there are `ceil(total / page_size)` of them.
/// `total == 0` yields an empty plan.
pub fn plan_pages(total: u64, page_size: u64) -> Result<Vec<PageRequest>, JiraError> {
  if page_size == 0 {
    return Err(JiraError::InvalidPageSize(page_size));
  }

  let page_count = total.div_ceil(page_size);
  let plan = (0..page_count)
    .map(|i| PageRequest {
      page_num: i + 1,
      start_at: i * page_size,
      max_results: page_size,
    })
    .collect();

  Ok(plan)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_plan_for_zero_total() {
    assert!(plan_pages(0, 25).unwrap().is_empty());
  }

  #[test]
  fn zero_page_size_is_rejected() {
    assert!(matches!(
      plan_pages(10, 0),
      Err(JiraError::InvalidPageSize(0))
    ));
  }

  #[test]
  fn fifty_seven_items_need_three_pages() {
    let plan = plan_pages(57, 25).unwrap();
    assert_eq!(plan.len(), 3);
    assert_eq!(
      plan[0],
      PageRequest {
        page_num: 1,
        start_at: 0,
        max_results: 25
      }
    );
    assert_eq!(plan[2].start_at, 50);
  }

  #[test]
  fn exact_multiple_has_no_trailing_page() {
    assert_eq!(plan_pages(50, 25).unwrap().len(), 2);
  }

  #[test]
  fn plan_partitions_the_range_exactly() {
    for (total, page_size) in [(1u64, 1u64), (1, 100), (99, 10), (100, 10), (101, 10), (7, 3)] {
      let plan = plan_pages(total, page_size).unwrap();
      assert_eq!(plan.len() as u64, total.div_ceil(page_size));

      let mut next = 0u64;
      for (i, req) in plan.iter().enumerate() {
        assert_eq!(req.page_num, i as u64 + 1);
        assert_eq!(req.start_at, next, "pages must be contiguous");
        assert_eq!(req.max_results, page_size);
        next += req.max_results;
      }
      // The last page may overhang but the union must cover [0, total).
      assert!(next >= total);
      assert!(next - total < page_size);
    }
  }
}
