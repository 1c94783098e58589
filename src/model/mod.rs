// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Spline data model

pub mod error;
pub mod id;
pub mod point;
pub mod shape;
pub mod spline;

pub use error::SplineError;
pub use id::{NodeId, SplineId};
pub use point::ControlPoint;
pub use shape::{CurveKind, ShapeFactor, Weight};
pub use spline::{LineStyle, Spline, SplineNode, SplineStyle};
