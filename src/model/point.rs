// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Integer control point coordinates

use serde::{Deserialize, Serialize};

/// A control point in figure units
///
/// Figures store integer coordinates; conversion to `kurbo::Point` happens
/// only when a curve is evaluated or drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ControlPoint {
    pub x: i32,
    pub y: i32,
}

impl ControlPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Squared euclidean distance to `(x, y)`, widened to avoid overflow
    pub fn distance_sq_to(&self, x: i32, y: i32) -> i64 {
        let dx = i64::from(self.x) - i64::from(x);
        let dy = i64::from(self.y) - i64::from(y);
        dx * dx + dy * dy
    }

    pub fn to_kurbo(self) -> kurbo::Point {
        kurbo::Point::new(f64::from(self.x), f64::from(self.y))
    }
}

impl From<(i32, i32)> for ControlPoint {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}
