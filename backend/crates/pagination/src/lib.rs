//! Page-number pagination primitives shared by backend query endpoints.
//!
//! Two pieces live here:
//!
//! - [`convert`] turns a client-supplied `(page, limit)` pair into the
//!   `(skip, limit)` window a store understands, validating that supplied
//!   values are at least 1 and defaulting absent ones.
//! - [`PageResponse`] is the response envelope pairing one page of items
//!   with its [`Pagination`] block (`page`, `limit`, `totalRecords`,
//!   `totalPages`).
//!
//! The conversion is pure: no I/O, no side effects.

use serde::{Deserialize, Serialize};

/// Page used when the request does not supply one.
pub const DEFAULT_PAGE: u64 = 1;

/// Page size used when the request does not supply one.
pub const DEFAULT_LIMIT: u64 = 10;

/// Errors raised while converting client pagination input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PaginationError {
    /// A supplied `page` or `limit` was below 1.
    #[error("page and limit must be greater than 0")]
    OutOfRange,
}

/// Skip/limit window handed to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// Number of leading records to skip.
    pub skip: u64,
    /// Maximum number of records to return.
    pub limit: u64,
}

/// Convert `(page, limit)` into a [`PageWindow`].
///
/// Absent values default to [`DEFAULT_PAGE`] and [`DEFAULT_LIMIT`]. The
/// output window satisfies `skip = (page - 1) * limit` with `limit`
/// unchanged; `skip` saturates at `u64::MAX` rather than wrapping, so an
/// absurdly large page yields an empty page instead of a panic.
///
/// # Errors
///
/// Returns [`PaginationError::OutOfRange`] when either supplied value is
/// below 1.
pub fn convert(page: Option<u64>, limit: Option<u64>) -> Result<PageWindow, PaginationError> {
    if page.is_some_and(|value| value < 1) || limit.is_some_and(|value| value < 1) {
        return Err(PaginationError::OutOfRange);
    }
    let page = page.unwrap_or(DEFAULT_PAGE);
    let limit = limit.unwrap_or(DEFAULT_LIMIT);
    Ok(PageWindow {
        skip: page.saturating_sub(1).saturating_mul(limit),
        limit,
    })
}

/// Pagination block echoed back to the client alongside a page of items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Page the response covers (1-based).
    pub page: u64,
    /// Requested page size.
    pub limit: u64,
    /// Total matching records, ignoring pagination.
    pub total_records: u64,
    /// `ceil(total_records / limit)`; zero when nothing matches.
    pub total_pages: u64,
}

impl Pagination {
    /// Build a pagination block, deriving `total_pages`.
    #[must_use]
    pub fn new(page: u64, limit: u64, total_records: u64) -> Self {
        let total_pages = if limit == 0 {
            0
        } else {
            total_records.div_ceil(limit)
        };
        Self {
            page,
            limit,
            total_records,
            total_pages,
        }
    }
}

/// One page of results plus its pagination block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    /// Items on the current page, in store order.
    pub items: Vec<T>,
    /// Pagination metadata for the whole result set.
    pub pagination: Pagination,
}

impl<T> PageResponse<T> {
    /// Assemble a response, echoing the request's original `page`/`limit`
    /// (absent values echo the defaults).
    #[must_use]
    pub fn new(items: Vec<T>, page: Option<u64>, limit: Option<u64>, total_records: u64) -> Self {
        Self {
            items,
            pagination: Pagination::new(
                page.unwrap_or(DEFAULT_PAGE),
                limit.unwrap_or(DEFAULT_LIMIT),
                total_records,
            ),
        }
    }
}
