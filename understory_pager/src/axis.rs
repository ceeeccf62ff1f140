// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis projection: map 2D geometry onto the paging axis and back.
//!
//! All windowing math in this crate is written against a single "along" axis
//! (the scroll direction) and an "across" axis (the other dimension). An
//! [`Axis`] selects which geometric dimension plays which role:
//!
//! - [`Axis::Horizontal`] pages along X; Y is carried through untouched.
//! - [`Axis::Vertical`] pages along Y; X is carried through untouched.
//!
//! Projection is a pure coordinate swap, so projecting a rectangle and
//! reconstructing it with the same axis reproduces the original rectangle.
//!
//! ```rust
//! use kurbo::Rect;
//! use understory_pager::Axis;
//!
//! let rect = Rect::new(10.0, 20.0, 110.0, 70.0);
//! let projected = Axis::Vertical.project_rect(rect);
//! assert_eq!(projected.origin.along, 20.0);
//! assert_eq!(projected.size.along, 50.0);
//! assert_eq!(Axis::Vertical.unproject_rect(projected), rect);
//! ```

use kurbo::{Point, Rect, Size};

/// Paging direction.
///
/// `Horizontal` is the primary orientation and the default.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Axis {
    /// Pages are laid out left to right; the paging axis is X.
    #[default]
    Horizontal,
    /// Pages are laid out top to bottom; the paging axis is Y.
    Vertical,
}

/// A pair of scalars split into the paging-axis component and the other one.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct AxisPair {
    /// Component along the paging axis.
    pub along: f64,
    /// Component across the paging axis.
    pub across: f64,
}

impl AxisPair {
    /// Creates a pair from its along/across components.
    #[must_use]
    pub const fn new(along: f64, across: f64) -> Self {
        Self { along, across }
    }
}

/// A rectangle expressed in paging-axis terms.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct AxisRect {
    /// Minimum corner of the rectangle.
    pub origin: AxisPair,
    /// Extent of the rectangle.
    pub size: AxisPair,
}

impl AxisRect {
    /// Returns the `(origin, extent)` pair along the paging axis.
    #[must_use]
    pub fn along(&self) -> (f64, f64) {
        (self.origin.along, self.size.along)
    }

    /// Returns the end coordinate along the paging axis.
    #[must_use]
    pub fn along_end(&self) -> f64 {
        self.origin.along + self.size.along
    }

    /// Returns a copy with the along-axis origin replaced.
    #[must_use]
    pub fn with_along_origin(mut self, origin: f64) -> Self {
        self.origin.along = origin;
        self
    }

    /// Returns a copy with the along-axis extent replaced.
    #[must_use]
    pub fn with_along_extent(mut self, extent: f64) -> Self {
        self.size.along = extent;
        self
    }
}

impl Axis {
    /// Returns the other axis.
    #[must_use]
    pub const fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }

    /// Projects a point onto this axis.
    #[must_use]
    pub fn project_point(self, point: Point) -> AxisPair {
        match self {
            Self::Horizontal => AxisPair::new(point.x, point.y),
            Self::Vertical => AxisPair::new(point.y, point.x),
        }
    }

    /// Rebuilds a point from its projection.
    #[must_use]
    pub fn unproject_point(self, pair: AxisPair) -> Point {
        match self {
            Self::Horizontal => Point::new(pair.along, pair.across),
            Self::Vertical => Point::new(pair.across, pair.along),
        }
    }

    /// Projects a size onto this axis.
    #[must_use]
    pub fn project_size(self, size: Size) -> AxisPair {
        match self {
            Self::Horizontal => AxisPair::new(size.width, size.height),
            Self::Vertical => AxisPair::new(size.height, size.width),
        }
    }

    /// Rebuilds a size from its projection.
    #[must_use]
    pub fn unproject_size(self, pair: AxisPair) -> Size {
        match self {
            Self::Horizontal => Size::new(pair.along, pair.across),
            Self::Vertical => Size::new(pair.across, pair.along),
        }
    }

    /// Projects a rectangle onto this axis.
    #[must_use]
    pub fn project_rect(self, rect: Rect) -> AxisRect {
        AxisRect {
            origin: self.project_point(rect.origin()),
            size: self.project_size(rect.size()),
        }
    }

    /// Rebuilds a rectangle from its projection.
    #[must_use]
    pub fn unproject_rect(self, rect: AxisRect) -> Rect {
        Rect::from_origin_size(
            self.unproject_point(rect.origin),
            self.unproject_size(rect.size),
        )
    }

    /// Returns the extent of `size` along this axis.
    #[must_use]
    pub fn along(self, size: Size) -> f64 {
        self.project_size(size).along
    }
}
