// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Navigation errors.

use thiserror::Error;

/// Why a navigation request was rejected.
///
/// A rejected navigation leaves the pager's state untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// The target is at or beyond the known page count.
    #[error("page {page} is out of range for {page_count} pages")]
    OutOfRange {
        /// Requested page.
        page: usize,
        /// Resolved page count.
        page_count: usize,
    },
    /// The content provider has no content for the target.
    #[error("no content for page {page}")]
    NoContent {
        /// Requested page.
        page: usize,
    },
    /// Traversal to the previous page from the first page, or before any page
    /// is current.
    #[error("there is no page before the current one")]
    BeforeFirstPage,
    /// The viewport has not been laid out along the paging axis.
    #[error("viewport has zero extent along the paging axis")]
    ZeroExtent,
    /// The pager has been disposed.
    #[error("pager has been disposed")]
    Disposed,
}
