// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Containing boxes for splines.
//!
//! Used to work out which region has to be redrawn. When every factor is +1
//! the curve is a convex combination of its control points, so the control
//! box is exact. Otherwise interpolating points can push the curve outside
//! the control polygon, and each of them gets a quarter-chord bulge. That
//! bulge is a heuristic: it is generous in practice, but not a proven bound.

use crate::model::{CurveKind, Spline, SplineError};
use kurbo::{Point, Rect};

/// An integer box, inclusive on all sides
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl Bounds {
    fn around(x: i32, y: i32) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    fn include(&mut self, x: i32, y: i32) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    /// Smallest box holding both
    pub fn union(self, other: Bounds) -> Bounds {
        Bounds {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= f64::from(self.min_x)
            && point.x <= f64::from(self.max_x)
            && point.y >= f64::from(self.min_y)
            && point.y <= f64::from(self.max_y)
    }

    pub fn to_rect(self) -> Rect {
        Rect::new(
            f64::from(self.min_x),
            f64::from(self.min_y),
            f64::from(self.max_x),
            f64::from(self.max_y),
        )
    }
}

/// Containing box of `spline`, picking the cheap form when it is exact
pub fn bounds(spline: &Spline) -> Result<Bounds, SplineError> {
    match spline.curve_kind() {
        CurveKind::Approximating => approx_bounds(spline),
        CurveKind::Interpolating | CurveKind::General => general_bounds(spline),
    }
}

/// Box of the raw control points
pub fn approx_bounds(spline: &Spline) -> Result<Bounds, SplineError> {
    let mut points = spline.points();
    let first = points.next().ok_or(SplineError::Empty)?;
    let mut bounds = Bounds::around(first.x, first.y);
    for p in points {
        bounds.include(p.x, p.y);
    }
    Ok(bounds)
}

/// Control box widened around every interpolating point
///
/// For each point `p1` with neighbors `p0` and `p2` (wrapping on closed
/// splines, the point itself standing in past the ends of open ones), a
/// negative factor widens the box by a quarter of `p2 - p0` on each axis
/// around `p1`.
pub fn general_bounds(spline: &Spline) -> Result<Bounds, SplineError> {
    let mut bounds = approx_bounds(spline)?;
    let nodes = spline.nodes();

    for (i, node) in nodes.iter().enumerate() {
        if !node.shape.is_interpolating() {
            continue;
        }
        let p0 = nodes[spline.neighbor(i, -1).unwrap_or(i)].point;
        let p2 = nodes[spline.neighbor(i, 1).unwrap_or(i)].point;
        let p1 = node.point;

        let bulge_x = quarter_span(p0.x, p2.x);
        let bulge_y = quarter_span(p0.y, p2.y);
        bounds.include(p1.x.saturating_sub(bulge_x), p1.y.saturating_sub(bulge_y));
        bounds.include(p1.x.saturating_add(bulge_x), p1.y.saturating_add(bulge_y));
    }

    Ok(bounds)
}

/// `ceil(|b - a| / 4)` without overflow
fn quarter_span(a: i32, b: i32) -> i32 {
    let span = (i64::from(b) - i64::from(a)).abs();
    let quarter = (span + 3) / 4;
    i32::try_from(quarter).unwrap_or(i32::MAX)
}
