// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Shape factors and the aggregate curve kind.
//!
//! Each control point carries a shape factor in [-1, 1]. Negative values pull
//! the curve through the point (interpolating), positive values let it pass
//! inside the control polygon (approximating), and zero makes a sharp corner.
//! The three regions are separate variants so a corner is never a magic
//! number, while the signed scalar stays available for sliders and files.

use serde::{Deserialize, Serialize};

/// Strength of an approximating or interpolating factor, always in (0, 1]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Weight(f64);

impl Weight {
    pub const FULL: Weight = Weight(1.0);

    /// Clamp `w` down to 1. Zero, negative and NaN weights are `None`.
    pub fn new(w: f64) -> Option<Self> {
        (w > 0.0).then(|| Weight(w.min(1.0)))
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

/// Per-point curve behavior
///
/// `value()` maps an `Approximating` weight to (0, 1] and an `Interpolating`
/// one to [-1, 0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeFactor {
    Approximating(Weight),
    Angular,
    Interpolating(Weight),
}

impl ShapeFactor {
    /// Fully approximating (+1)
    pub const APPROXIMATING: ShapeFactor = ShapeFactor::Approximating(Weight::FULL);

    /// Fully interpolating (-1)
    pub const INTERPOLATING: ShapeFactor = ShapeFactor::Interpolating(Weight::FULL);

    /// Build a factor from a signed scalar, clamping into [-1, 1]
    ///
    /// NaN has no sensible place on the scale and is returned as `None`.
    pub fn from_value(value: f64) -> Option<Self> {
        if value.is_nan() {
            return None;
        }
        Some(if let Some(w) = Weight::new(value) {
            ShapeFactor::Approximating(w)
        } else if let Some(b) = Weight::new(-value) {
            ShapeFactor::Interpolating(b)
        } else {
            ShapeFactor::Angular
        })
    }

    /// The signed scalar in [-1, 1]
    pub fn value(self) -> f64 {
        match self {
            ShapeFactor::Approximating(w) => w.get(),
            ShapeFactor::Angular => 0.0,
            ShapeFactor::Interpolating(b) => -b.get(),
        }
    }

    pub fn is_interpolating(self) -> bool {
        matches!(self, ShapeFactor::Interpolating(_))
    }

    /// True only for the +1 extreme
    pub fn is_fully_approximating(self) -> bool {
        self == Self::APPROXIMATING
    }

    /// True only for the -1 extreme
    pub fn is_fully_interpolating(self) -> bool {
        self == Self::INTERPOLATING
    }
}

impl Default for ShapeFactor {
    fn default() -> Self {
        Self::APPROXIMATING
    }
}

// Files and configs see the plain signed scalar.
impl Serialize for ShapeFactor {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.value())
    }
}

impl<'de> Deserialize<'de> for ShapeFactor {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        ShapeFactor::from_value(value)
            .ok_or_else(|| serde::de::Error::custom("shape factor must be a number"))
    }
}

/// Which evaluation routine a whole spline needs
///
/// Recomputed from the shape factors whenever one of them changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CurveKind {
    /// Every factor is +1
    #[default]
    Approximating,
    /// Every factor is -1
    Interpolating,
    /// Anything else
    General,
}

impl CurveKind {
    /// Classify a sequence of shape factors
    ///
    /// An empty sequence counts as approximating.
    pub fn classify<I>(factors: I) -> Self
    where
        I: IntoIterator<Item = ShapeFactor>,
    {
        let mut all_approx = true;
        let mut all_interp = true;
        for factor in factors {
            all_approx &= factor.is_fully_approximating();
            all_interp &= factor.is_fully_interpolating();
            if !all_approx && !all_interp {
                return CurveKind::General;
            }
        }
        if all_approx {
            CurveKind::Approximating
        } else {
            CurveKind::Interpolating
        }
    }
}
