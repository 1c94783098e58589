// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Curve geometry: evaluation and redraw bounds

pub mod bounds;
pub mod xspline;

pub use bounds::{Bounds, approx_bounds, bounds, general_bounds};
