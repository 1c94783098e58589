// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Local subspline windows.
//!
//! Changing one shape factor only moves the curve near that point: the two
//! segments on each side of it. A window is a small copy of the spline
//! holding the target, up to two points before it and up to two after it,
//! which is enough to redraw the affected part without evaluating the rest
//! of a possibly large curve.
//!
//! Closed splines wrap in both directions. Open splines stop at their ends,
//! so a window near an end is shorter. Splines at or below the quick-redraw
//! threshold are not windowed at all.

use super::error::WindowError;
use crate::model::{ControlPoint, ShapeFactor, Spline, SplineError};
use crate::settings;

/// The part of a spline an edit session works on
#[derive(Debug)]
pub enum SubsplineWindow<'a> {
    /// The spline is small enough to edit and draw whole
    Whole(&'a Spline),
    /// A value copy around the target
    Local(LocalWindow),
}

/// A copied slice of a spline around one target point
#[derive(Debug, Clone)]
pub struct LocalWindow {
    spline: Spline,
    /// Index of the target inside `spline`
    target: usize,
    /// Index of the target in the parent
    parent_index: usize,
    target_point: ControlPoint,
}

impl LocalWindow {
    /// The window as a spline of its own (always open)
    pub fn spline(&self) -> &Spline {
        &self.spline
    }

    pub fn target(&self) -> usize {
        self.target
    }

    pub fn parent_index(&self) -> usize {
        self.parent_index
    }

    pub fn target_point(&self) -> ControlPoint {
        self.target_point
    }

    pub fn target_factor(&self) -> ShapeFactor {
        self.spline.nodes()[self.target].shape
    }

    /// Change the target's factor inside the window only
    pub(crate) fn set_target_factor(
        &mut self,
        shape: ShapeFactor,
    ) -> Result<ShapeFactor, SplineError> {
        self.spline.set_shape_factor(self.target, shape)
    }

    pub(crate) fn spline_mut(&mut self) -> &mut Spline {
        &mut self.spline
    }
}

/// Parent indices copied into a window, and the slot the target lands in
fn window_indices(spline: &Spline, index: usize) -> (Vec<usize>, usize) {
    let mut indices = Vec::with_capacity(settings::window::MAX_POINTS);
    indices.extend([-2, -1].into_iter().filter_map(|o| spline.neighbor(index, o)));
    let slot = indices.len();
    indices.push(index);
    indices.extend([1, 2].into_iter().filter_map(|o| spline.neighbor(index, o)));
    (indices, slot)
}

/// Build the window an edit of point `index` works on
///
/// Either returns a complete window or nothing; a half-built copy never
/// leaves this function.
pub fn extract_window(spline: &Spline, index: usize) -> Result<SubsplineWindow<'_>, WindowError> {
    let len = spline.point_count();
    if index >= len {
        return Err(WindowError::TargetOutOfRange { index, len });
    }

    if len <= settings::window::QUICK_REDRAW_THRESHOLD {
        tracing::debug!("[window] {} points, editing spline whole", len);
        return Ok(SubsplineWindow::Whole(spline));
    }

    let (indices, slot) = window_indices(spline, index);

    let mut window = Spline::new(false);
    window.style = spline.style;
    for &i in &indices {
        let point = spline.point(i)?;
        let shape = spline.shape_factor_of(i)?;
        window.push(point, shape);
    }

    // Window nodes are copies with their own ids, so find the target again
    // by its coordinates
    let target_point = spline.point(index)?;
    let target = window
        .nodes()
        .get(slot)
        .filter(|node| node.point == target_point)
        .map(|_| slot)
        .or_else(|| window.index_of(target_point))
        .ok_or(WindowError::TargetNotRelocated)?;

    tracing::debug!(
        "[window] target {} -> parent indices {:?}, window slot {}",
        index,
        indices,
        target
    );

    Ok(SubsplineWindow::Local(LocalWindow {
        spline: window,
        target,
        parent_index: index,
        target_point,
    }))
}
