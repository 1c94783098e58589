// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Drawing contract between the spline core and the canvas.
//!
//! The crate never rasterizes anything itself. It turns splines into
//! `kurbo::BezPath`s and hands them to a [`Renderer`] together with a style
//! and a mode. Erasing is drawing the same path again in `Erase` mode, so a
//! renderer that XORs or repaints the damaged region both work.

use crate::geometry::xspline;
use crate::model::{Spline, SplineStyle};
use crate::settings;
use kurbo::BezPath;

/// Whether a draw call adds or removes ink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    Paint,
    Erase,
}

/// Which routine `draw_subspline` picked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawRoutine {
    /// Straight line through the stored points, for tiny splines
    SingleSegment,
    /// Full X-spline flattening
    Generalized,
}

/// Something that can put paths on screen
pub trait Renderer {
    fn draw_path(&mut self, path: &BezPath, style: &SplineStyle, mode: DrawMode);
}

/// Draw a whole spline in its own style
pub fn draw_spline(renderer: &mut dyn Renderer, spline: &Spline, mode: DrawMode) {
    let path = xspline::to_bezpath(spline, xspline::DEFAULT_RESOLUTION);
    renderer.draw_path(&path, &spline.style, mode);
}

/// Draw the part of `spline` an edit of point `target` changes
///
/// `point_count` is the point count of the spline being edited, not of the
/// window. At or below the quick-redraw threshold the spline is drawn whole
/// as straight segments; the same threshold decides whether a window is
/// extracted at all. Above it only the two curve segments meeting at
/// `target` are drawn. On a window those match the parent curve exactly,
/// while the window's outer segments end at cut points and are not part of
/// it.
pub fn draw_subspline(
    renderer: &mut dyn Renderer,
    point_count: usize,
    spline: &Spline,
    target: usize,
    style: &SplineStyle,
    mode: DrawMode,
) -> DrawRoutine {
    if point_count <= settings::window::QUICK_REDRAW_THRESHOLD {
        renderer.draw_path(&polyline(spline), style, mode);
        DrawRoutine::SingleSegment
    } else {
        let path = xspline::to_bezpath_around(spline, target, xspline::DEFAULT_RESOLUTION);
        renderer.draw_path(&path, style, mode);
        DrawRoutine::Generalized
    }
}

fn polyline(spline: &Spline) -> BezPath {
    let mut path = BezPath::new();
    let mut points = spline.points().map(|p| p.to_kurbo());
    if let Some(first) = points.next() {
        path.move_to(first);
        for p in points {
            path.line_to(p);
        }
    }
    path
}

/// Renderer that only reports what it would draw
///
/// Used by the command-line driver, where there is no canvas.
#[derive(Debug, Default)]
pub struct TraceRenderer {
    pub paints: usize,
    pub erases: usize,
}

impl Renderer for TraceRenderer {
    fn draw_path(&mut self, path: &BezPath, style: &SplineStyle, mode: DrawMode) {
        match mode {
            DrawMode::Paint => self.paints += 1,
            DrawMode::Erase => self.erases += 1,
        }
        tracing::debug!(
            "[draw] {:?} {} elements, pen {} color {:#010x}",
            mode,
            path.elements().len(),
            style.pen_width,
            style.color
        );
    }
}
