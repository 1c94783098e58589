// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Editor settings and configuration constants.
//!
//! The constants below are the defaults. `EditorConfig` can override the
//! runtime-tunable ones from a TOML file; the quick-redraw threshold is
//! fixed because window extraction, the edit session and the draw
//! dispatcher must agree on it.

use crate::model::{LineStyle, SplineStyle};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

// ============================================================================
// WINDOW SETTINGS
// ============================================================================
/// Splines with this many points or fewer are edited and drawn whole
const QUICK_REDRAW_THRESHOLD: usize = 2;

/// Largest window ever extracted: two predecessors, the target, two
/// successors
const MAX_WINDOW_POINTS: usize = 5;

// ============================================================================
// HIT TEST SETTINGS
// ============================================================================
/// Maximum distance (figure units) for a click to pick a control point
const HIT_TOLERANCE: f64 = 6.0;

// ============================================================================
// FLATTENING SETTINGS
// ============================================================================
/// Approximate length (figure units) of one flattened step
const FLATTEN_RESOLUTION: f64 = 2.0;

/// Upper bound on flattened steps per segment
const FLATTEN_MAX_STEPS: usize = 256;

// ============================================================================
// EDIT OVERLAY SETTINGS
// ============================================================================
// The overlay has to read as different from the curve underneath it:
// thin, dashed and in a fixed highlight color.
const OVERLAY_PEN_WIDTH: u32 = 1;
const OVERLAY_COLOR: u32 = 0xff40_80ff; // 0xAARRGGBB
const OVERLAY_DASH: f64 = 4.0;

// ============================================================================
// PUBLIC API - Don't edit below this line unless you know what you're doing
// ============================================================================

/// Local window extraction
pub mod window {
    /// Point count at or below which no window is extracted
    pub const QUICK_REDRAW_THRESHOLD: usize = super::QUICK_REDRAW_THRESHOLD;

    /// Maximum number of points in an extracted window
    pub const MAX_POINTS: usize = super::MAX_WINDOW_POINTS;
}

/// Control point picking
pub mod hit_test {
    pub const TOLERANCE: f64 = super::HIT_TOLERANCE;
}

/// X-spline flattening
pub mod flatten {
    pub const RESOLUTION: f64 = super::FLATTEN_RESOLUTION;
    pub const MAX_STEPS: usize = super::FLATTEN_MAX_STEPS;
}

/// Style of the live preview drawn during a shape edit
pub mod overlay {
    pub const PEN_WIDTH: u32 = super::OVERLAY_PEN_WIDTH;
    pub const COLOR: u32 = super::OVERLAY_COLOR;
    pub const DASH: f64 = super::OVERLAY_DASH;
}

/// Runtime configuration, usually read from `editor.toml`
///
/// Missing keys fall back to the constants above.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub hit_tolerance: f64,
    pub flatten_resolution: f64,
    pub overlay: OverlayConfig,
}

/// Overlay style overrides
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub pen_width: u32,
    pub color: u32,
    pub dash: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            hit_tolerance: hit_test::TOLERANCE,
            flatten_resolution: flatten::RESOLUTION,
            overlay: OverlayConfig::default(),
        }
    }
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            pen_width: overlay::PEN_WIDTH,
            color: overlay::COLOR,
            dash: overlay::DASH,
        }
    }
}

impl OverlayConfig {
    /// The spline style used to draw the edit preview
    pub fn style(&self) -> SplineStyle {
        SplineStyle {
            pen_width: self.pen_width,
            color: self.color,
            line: LineStyle::Dashed(self.dash),
        }
    }
}

impl EditorConfig {
    /// Parse a config from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: EditorConfig = toml::from_str(text).context("Invalid editor config")?;
        config.validated()
    }

    /// Load a config file
    pub fn load(path: &Path) -> Result<Self> {
        tracing::info!("Loading editor config: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml_str(&text)
    }

    fn validated(self) -> Result<Self> {
        if !(self.hit_tolerance.is_finite() && self.hit_tolerance >= 0.0) {
            anyhow::bail!("hit_tolerance must be a non-negative number");
        }
        if !(self.flatten_resolution.is_finite() && self.flatten_resolution > 0.0) {
            anyhow::bail!("flatten_resolution must be positive");
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = EditorConfig::from_toml_str("").unwrap();
        assert_eq!(config, EditorConfig::default());
        assert_eq!(config.overlay.style(), SplineStyle::edit_overlay());
    }

    #[test]
    fn partial_config_overrides_only_given_keys() {
        let config = EditorConfig::from_toml_str(
            "hit_tolerance = 10.0\n[overlay]\ncolor = 255\n",
        )
        .unwrap();
        assert_eq!(config.hit_tolerance, 10.0);
        assert_eq!(config.flatten_resolution, flatten::RESOLUTION);
        assert_eq!(config.overlay.color, 255);
        assert_eq!(config.overlay.pen_width, overlay::PEN_WIDTH);
    }

    #[test]
    fn rejects_non_positive_resolution() {
        assert!(EditorConfig::from_toml_str("flatten_resolution = 0.0").is_err());
        assert!(EditorConfig::from_toml_str("hit_tolerance = -1.0").is_err());
    }
}
