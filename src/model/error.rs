// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

/// Errors from spline queries and geometry
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SplineError {
    #[error("spline has no points")]
    Empty,

    #[error("point index {index} out of range for a spline of {len} points")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("no control point within {tolerance} units of ({x}, {y})")]
    NoPointInRange { x: i32, y: i32, tolerance: f64 },
}
