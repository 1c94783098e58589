// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Shared helpers for unit tests

use crate::editing::{LocalWindow, SubsplineWindow};
use crate::model::{ControlPoint, ShapeFactor, SplineStyle, Spline};
use crate::render::{DrawMode, Renderer};
use kurbo::{BezPath, PathEl, Point};

/// One recorded draw call
#[derive(Debug, Clone)]
pub struct DrawCall {
    pub path: BezPath,
    pub style: SplineStyle,
    pub mode: DrawMode,
}

/// Renderer that remembers every call
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub calls: Vec<DrawCall>,
}

impl Renderer for RecordingRenderer {
    fn draw_path(&mut self, path: &BezPath, style: &SplineStyle, mode: DrawMode) {
        self.calls.push(DrawCall {
            path: path.clone(),
            style: *style,
            mode,
        });
    }
}

/// `n` distinct approximating points on a rising zigzag
pub fn line_of(n: usize, closed: bool) -> Spline {
    let points = (0..n as i32).map(|k| (k * 10, if k % 2 == 0 { k } else { k + 20 }));
    Spline::uniform(points, ShapeFactor::APPROXIMATING, closed)
}

pub fn points_of(spline: &Spline) -> Vec<ControlPoint> {
    spline.points().collect()
}

/// Shape factors as raw bits, for exact comparisons
pub fn factor_bits(spline: &Spline) -> Vec<u64> {
    spline.shape_factors().map(|s| s.value().to_bits()).collect()
}

/// Unwrap a window that is expected to be a local copy
pub fn local(window: SubsplineWindow<'_>) -> LocalWindow {
    match window {
        SubsplineWindow::Local(window) => window,
        SubsplineWindow::Whole(_) => panic!("expected a local window"),
    }
}

/// End points of every element of a polyline path
pub fn path_points(path: &BezPath) -> Vec<Point> {
    path.elements()
        .iter()
        .filter_map(|el| match el {
            PathEl::MoveTo(p) | PathEl::LineTo(p) => Some(*p),
            _ => None,
        })
        .collect()
}
