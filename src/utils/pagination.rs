use serde::{Deserialize, Serialize};
use validator::Validate;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Query parameters for paged listings. Zero is treated the same as an absent value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, Validate)]
pub struct PaginationParams {
  #[validate(range(min = 0, message = "page must be at least 1"))]
  pub page: Option<i64>,
  #[validate(range(min = 0, max = 100, message = "page_size must be between 1 and 100"))]
  pub page_size: Option<i64>,
}

impl PaginationParams {
  pub fn new(page: i64, page_size: i64) -> Self {
    Self {
      page: Some(page),
      page_size: Some(page_size),
    }
  }

  /// Fills in the defaults, returning `(page, page_size)`.
  pub fn normalize(&self) -> (i64, i64) {
    let page = match self.page {
      Some(page) if page > 0 => page,
      _ => DEFAULT_PAGE,
    };
    let page_size = match self.page_size {
      Some(size) if size > 0 => size,
      _ => DEFAULT_PAGE_SIZE,
    };
    (page, page_size)
  }

  /// Rows to skip before the requested page. Saturates instead of overflowing for huge pages.
  pub fn offset(&self) -> i64 {
    let (page, page_size) = self.normalize();
    (page - 1).saturating_mul(page_size)
  }

  pub fn limit(&self) -> i64 {
    self.normalize().1
  }
}

/// Number of pages needed to hold `total_rows`; zero rows means zero pages.
pub fn total_pages(total_rows: i64, page_size: i64) -> i64 {
  if total_rows <= 0 || page_size <= 0 {
    return 0;
  }
  (total_rows + page_size - 1) / page_size
}
