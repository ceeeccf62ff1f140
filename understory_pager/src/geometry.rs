// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll geometry along the paging axis.

use kurbo::{Rect, Size};
use smallvec::SmallVec;

use crate::axis::Axis;

/// Default distance, in geometry units, that the trailing probe is pulled back
/// from the viewport's trailing edge.
pub const DEFAULT_TRAILING_EDGE_INSET: f64 = 1.0;

/// A 1D snapshot of the scroll state along the paging axis.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct ScrollGeometry {
    /// Scroll offset of the viewport's leading edge.
    pub offset: f64,
    /// Viewport length, which is also the length of one page.
    pub extent: f64,
    /// Total scrollable length.
    pub content_extent: f64,
}

impl ScrollGeometry {
    /// Creates a geometry snapshot from raw scalars.
    #[must_use]
    pub const fn new(offset: f64, extent: f64, content_extent: f64) -> Self {
        Self {
            offset,
            extent,
            content_extent,
        }
    }

    /// Projects viewport bounds (in content coordinates) and the content size
    /// onto `axis`.
    #[must_use]
    pub fn from_bounds(axis: Axis, bounds: Rect, content_size: Size) -> Self {
        let projected = axis.project_rect(bounds);
        Self {
            offset: projected.origin.along,
            extent: projected.size.along,
            content_extent: axis.along(content_size),
        }
    }

    /// Returns `true` when the viewport has a usable, positive extent.
    #[must_use]
    pub fn has_extent(&self) -> bool {
        self.extent > 0.0 && self.extent.is_finite() && self.offset.is_finite()
    }

    /// Returns `offset / extent`, or `None` when there is no usable extent.
    #[must_use]
    pub fn fractional_page(&self) -> Option<f64> {
        self.has_extent().then(|| self.offset / self.extent)
    }

    /// Returns the page under the viewport's leading edge.
    ///
    /// Offsets before the first page (overscroll) observe no page.
    #[must_use]
    pub fn leading_page(&self) -> Option<usize> {
        self.fractional_page().and_then(floor_to_page)
    }

    /// Returns the page under the viewport's trailing edge, probed `inset`
    /// units inside it so an exact page boundary does not round into the next
    /// page.
    #[must_use]
    pub fn trailing_page(&self, inset: f64) -> Option<usize> {
        if !self.has_extent() {
            return None;
        }
        let inset = inset.clamp(0.0, self.extent);
        let probe = self.offset + self.extent - inset;
        floor_to_page(probe / self.extent)
    }

    /// Returns the distinct pages under the leading and trailing probes, in
    /// increasing order.
    #[must_use]
    pub fn visible_pages(&self, inset: f64) -> SmallVec<[usize; 2]> {
        let mut pages = SmallVec::new();
        if let Some(leading) = self.leading_page() {
            pages.push(leading);
        }
        if let Some(trailing) = self.trailing_page(inset)
            && pages.last() != Some(&trailing)
        {
            pages.push(trailing);
        }
        pages
    }

    /// Returns the along-axis offset of the start of `page`.
    #[must_use]
    pub fn page_offset(&self, page: usize) -> f64 {
        self.extent * page_scalar(page)
    }
}

/// Returns the frame of `page` for a viewport of `viewport` size.
///
/// Pages tile the content along `axis`, each exactly one viewport long, and
/// start at the content origin on the other axis.
#[must_use]
pub fn frame_for_page(axis: Axis, viewport: Size, page: usize) -> Rect {
    let mut projected = axis.project_rect(Rect::from_origin_size((0.0, 0.0), viewport));
    projected.origin.along = projected.size.along * page_scalar(page);
    axis.unproject_rect(projected)
}

/// Returns the content size needed to hold `pages` pages.
#[must_use]
pub fn content_size_for_pages(axis: Axis, viewport: Size, pages: usize) -> Size {
    let mut projected = axis.project_size(viewport);
    projected.along *= page_scalar(pages);
    axis.unproject_size(projected)
}

/// Returns `true` if the two rectangles overlap with a positive area.
///
/// Rectangles that only share an edge do not intersect.
#[must_use]
pub fn intersects(a: Rect, b: Rect) -> bool {
    a.x0 < b.x1 && b.x0 < a.x1 && a.y0 < b.y1 && b.y0 < a.y1
}

fn floor_to_page(fractional: f64) -> Option<usize> {
    if !fractional.is_finite() {
        return None;
    }
    let floored = fractional.floor();
    if floored < 0.0 || floored >= usize::MAX as f64 {
        return None;
    }
    #[expect(
        clippy::cast_possible_truncation,
        reason = "Range checked above; floored value is a non-negative integer"
    )]
    {
        Some(floored as usize)
    }
}

fn page_scalar(page: usize) -> f64 {
    page as f64
}
