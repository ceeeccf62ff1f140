// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pager configuration.

use crate::axis::Axis;
use crate::geometry::DEFAULT_TRAILING_EDGE_INSET;

/// Construction-time settings for a [`Pager`](crate::Pager) or
/// [`WindowingEngine`](crate::WindowingEngine).
///
/// ```rust
/// use understory_pager::{Axis, PagerConfig};
///
/// let config = PagerConfig::default()
///     .with_axis(Axis::Vertical)
///     .with_page_count(Some(12));
/// assert_eq!(config.page_count, Some(12));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PagerConfig {
    /// Paging direction.
    pub axis: Axis,
    /// Explicit page count; overrides the provider's count.
    pub page_count: Option<usize>,
    /// How far inside the trailing edge the visibility probe sits.
    pub trailing_edge_inset: f64,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            axis: Axis::default(),
            page_count: None,
            trailing_edge_inset: DEFAULT_TRAILING_EDGE_INSET,
        }
    }
}

impl PagerConfig {
    /// Sets the paging direction.
    #[must_use]
    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    /// Sets the explicit page count.
    #[must_use]
    pub fn with_page_count(mut self, page_count: Option<usize>) -> Self {
        self.page_count = page_count;
        self
    }

    /// Sets the trailing-edge probe inset, in geometry units.
    ///
    /// Negative values are treated as zero.
    #[must_use]
    pub fn with_trailing_edge_inset(mut self, inset: f64) -> Self {
        self.trailing_edge_inset = inset.max(0.0);
        self
    }
}
