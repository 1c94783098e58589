// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Shape edit session - interactive editing of one shape factor

mod finish;
mod preview;

use super::document::Document;
use super::error::EditError;
use super::window::{LocalWindow, SubsplineWindow, extract_window};
use crate::model::{ControlPoint, ShapeFactor, Spline, SplineId, SplineStyle};
use crate::render::{DrawMode, Renderer, draw_subspline};

/// Drives shape-factor edits on one spline at a time
///
/// Idle until `begin` succeeds, then editing until `commit` or `cancel`.
/// The parent spline is passed into every call rather than held, and must
/// not be changed by anyone else between `begin` and the end of the session.
#[derive(Debug)]
pub struct ShapeEditor {
    /// Style the live preview is drawn in
    overlay: SplineStyle,
    session: Option<EditSession>,
}

/// Everything an active edit needs between calls
#[derive(Debug)]
struct EditSession {
    spline_id: SplineId,
    parent_index: usize,
    target_point: ControlPoint,
    /// Factor of the target before the session started
    original: ShapeFactor,
    /// Factor shown by the live preview
    current: ShapeFactor,
    /// Document modified flag before the session started
    was_modified: bool,
    window: SessionWindow,
    /// Whether the overlay preview is currently on screen
    preview_drawn: bool,
}

/// The owned side of a `SubsplineWindow`
#[derive(Debug)]
enum SessionWindow {
    /// Small spline, edited in place in the parent
    Whole,
    Local(LocalWindow),
}

impl EditSession {
    /// Draw the part of the curve this edit affects
    fn draw(
        &self,
        parent: &Spline,
        renderer: &mut dyn Renderer,
        style: &SplineStyle,
        mode: DrawMode,
    ) {
        let (spline, target) = match &self.window {
            SessionWindow::Whole => (parent, self.parent_index),
            SessionWindow::Local(window) => (window.spline(), window.target()),
        };
        draw_subspline(renderer, parent.point_count(), spline, target, style, mode);
    }
}

impl ShapeEditor {
    pub fn new() -> Self {
        Self::with_overlay(SplineStyle::edit_overlay())
    }

    /// An editor drawing its preview in `overlay`
    pub fn with_overlay(overlay: SplineStyle) -> Self {
        Self {
            overlay,
            session: None,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.session.is_some()
    }

    /// Factor currently shown for the target, if editing
    pub fn current_factor(&self) -> Option<ShapeFactor> {
        self.session.as_ref().map(|s| s.current)
    }

    /// The extracted window, if editing a spline large enough to have one
    pub fn window(&self) -> Option<&LocalWindow> {
        match self.session.as_ref().map(|s| &s.window) {
            Some(SessionWindow::Local(window)) => Some(window),
            _ => None,
        }
    }

    /// Start editing the shape factor of point `index` of `spline`
    ///
    /// Endpoints of open splines are refused. On any failure the editor
    /// stays idle.
    pub fn begin(
        &mut self,
        spline: &Spline,
        index: usize,
        document: &dyn Document,
    ) -> Result<(), EditError> {
        if self.session.is_some() {
            tracing::warn!("[shape edit] begin while another edit is active");
            return Err(EditError::SessionActive);
        }

        if spline.is_endpoint(index) {
            tracing::warn!("[shape edit] point {} is an endpoint of an open spline", index);
            return Err(EditError::InvalidEditTarget);
        }

        let window = match extract_window(spline, index) {
            Ok(SubsplineWindow::Whole(_)) => SessionWindow::Whole,
            Ok(SubsplineWindow::Local(mut window)) => {
                window.spline_mut().style = self.overlay;
                SessionWindow::Local(window)
            }
            Err(e) => {
                tracing::warn!("[shape edit] window for point {} failed: {}", index, e);
                return Err(e.into());
            }
        };

        let node = spline.node(index).map_err(|_| EditError::InvalidEditTarget)?;
        tracing::debug!(
            "[shape edit] begin on point {} ({}, {}), factor {}",
            index,
            node.point.x,
            node.point.y,
            node.shape.value()
        );

        self.session = Some(EditSession {
            spline_id: spline.id(),
            parent_index: index,
            target_point: node.point,
            original: node.shape,
            current: node.shape,
            was_modified: document.is_modified(),
            window,
            preview_drawn: false,
        });
        Ok(())
    }

    /// The active session, checked against the spline the caller passed in
    fn session_for(&mut self, spline: &Spline) -> Result<&mut EditSession, EditError> {
        let session = self.session.as_mut().ok_or(EditError::NoSession)?;
        if session.spline_id != spline.id() {
            tracing::warn!(
                "[shape edit] session is on {}, called with {}",
                session.spline_id,
                spline.id()
            );
            return Err(EditError::SplineMismatch);
        }
        Ok(session)
    }
}

impl Default for ShapeEditor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::MemoryDocument;
    use crate::editing::error::WindowError;
    use crate::geometry::xspline;
    use crate::settings;
    use crate::testing::{RecordingRenderer, factor_bits, line_of, path_points, points_of};

    fn setup(n: usize, closed: bool) -> (ShapeEditor, Spline, RecordingRenderer, MemoryDocument) {
        (
            ShapeEditor::new(),
            line_of(n, closed),
            RecordingRenderer::default(),
            MemoryDocument::default(),
        )
    }

    #[test]
    fn begin_on_interior_point() {
        let (mut editor, spline, _, doc) = setup(6, false);
        editor.begin(&spline, 2, &doc).unwrap();

        assert!(editor.is_editing());
        assert_eq!(editor.current_factor(), Some(ShapeFactor::APPROXIMATING));
        let window = editor.window().unwrap();
        assert_eq!(window.spline().point_count(), 5);
        assert_eq!(window.spline().style, SplineStyle::edit_overlay());
        assert_ne!(window.spline().style, spline.style);
    }

    #[test]
    fn begin_rejects_open_endpoints() {
        let (mut editor, spline, _, doc) = setup(5, false);
        assert_eq!(editor.begin(&spline, 0, &doc), Err(EditError::InvalidEditTarget));
        assert_eq!(editor.begin(&spline, 4, &doc), Err(EditError::InvalidEditTarget));
        assert!(!editor.is_editing());
    }

    #[test]
    fn begin_accepts_closed_first_and_last() {
        let (mut editor, spline, mut renderer, mut doc) = setup(5, true);
        editor.begin(&spline, 0, &doc).unwrap();
        let mut spline = spline;
        editor.cancel(&mut spline, &mut renderer, &mut doc).unwrap();
        editor.begin(&spline, 4, &doc).unwrap();
    }

    #[test]
    fn begin_out_of_range_stays_idle() {
        let (mut editor, spline, _, doc) = setup(5, true);
        assert_eq!(
            editor.begin(&spline, 9, &doc),
            Err(EditError::Window(WindowError::TargetOutOfRange { index: 9, len: 5 }))
        );
        assert!(!editor.is_editing());
    }

    #[test]
    fn begin_twice_is_refused_and_keeps_first_session() {
        let (mut editor, spline, _, doc) = setup(6, true);
        editor.begin(&spline, 1, &doc).unwrap();
        assert_eq!(editor.begin(&spline, 3, &doc), Err(EditError::SessionActive));
        assert_eq!(editor.window().unwrap().parent_index(), 1);
    }

    #[test]
    fn commit_writes_back_clamped_value_only() {
        let (mut editor, mut spline, mut renderer, mut doc) = setup(7, false);
        let points_before = points_of(&spline);
        let bits_before = factor_bits(&spline);

        editor.begin(&spline, 3, &doc).unwrap();
        editor.set_value(&mut spline, -0.4, &mut renderer, &mut doc).unwrap();
        editor.set_value(&mut spline, -4.0, &mut renderer, &mut doc).unwrap();
        let committed = editor.commit(&mut spline, &mut renderer, &mut doc).unwrap();

        assert!(!editor.is_editing());
        assert_eq!(committed, ShapeFactor::INTERPOLATING);
        assert_eq!(spline.shape_factor_of(3).unwrap().value(), -1.0);
        assert_eq!(points_of(&spline), points_before);
        let bits_after = factor_bits(&spline);
        for (i, (a, b)) in bits_before.iter().zip(&bits_after).enumerate() {
            if i != 3 {
                assert_eq!(a, b, "factor {i} changed");
            }
        }
    }

    #[test]
    fn parent_untouched_until_commit() {
        let (mut editor, mut spline, mut renderer, mut doc) = setup(6, true);
        let bits_before = factor_bits(&spline);
        editor.begin(&spline, 0, &doc).unwrap();
        editor.set_value(&mut spline, 0.3, &mut renderer, &mut doc).unwrap();

        assert_eq!(factor_bits(&spline), bits_before);
        assert_eq!(editor.window().unwrap().target_factor().value(), 0.3);
    }

    #[test]
    fn commit_hands_undo_pair_to_document() {
        let (mut editor, mut spline, mut renderer, mut doc) = setup(5, true);
        editor.begin(&spline, 2, &doc).unwrap();
        editor.set_value(&mut spline, 0.5, &mut renderer, &mut doc).unwrap();
        editor.commit(&mut spline, &mut renderer, &mut doc).unwrap();

        let (old, new) = doc.last_undo.as_ref().unwrap();
        assert_eq!(old.shape_factor_of(2).unwrap(), ShapeFactor::APPROXIMATING);
        assert_eq!(new.shape_factor_of(2).unwrap().value(), 0.5);
        assert_eq!(points_of(old), points_of(new));
    }

    #[test]
    fn cancel_restores_everything() {
        let (mut editor, mut spline, mut renderer, mut doc) = setup(6, false);
        let points_before = points_of(&spline);
        let bits_before = factor_bits(&spline);

        editor.begin(&spline, 2, &doc).unwrap();
        for v in [0.2, -0.7, 0.0, 1.5] {
            editor.set_value(&mut spline, v, &mut renderer, &mut doc).unwrap();
        }
        assert!(doc.modified);
        editor.cancel(&mut spline, &mut renderer, &mut doc).unwrap();

        assert!(!editor.is_editing());
        assert!(!doc.modified);
        assert!(doc.last_undo.is_none());
        assert_eq!(points_of(&spline), points_before);
        assert_eq!(factor_bits(&spline), bits_before);
    }

    #[test]
    fn cancel_keeps_a_flag_that_was_already_set() {
        let (mut editor, mut spline, mut renderer, mut doc) = setup(6, false);
        doc.modified = true;
        editor.begin(&spline, 2, &doc).unwrap();
        editor.set_value(&mut spline, -1.0, &mut renderer, &mut doc).unwrap();
        editor.cancel(&mut spline, &mut renderer, &mut doc).unwrap();
        assert!(doc.modified);
    }

    #[test]
    fn cancel_erases_the_preview() {
        let (mut editor, mut spline, mut renderer, mut doc) = setup(6, true);
        editor.begin(&spline, 2, &doc).unwrap();
        editor.set_value(&mut spline, -0.5, &mut renderer, &mut doc).unwrap();
        renderer.calls.clear();
        editor.cancel(&mut spline, &mut renderer, &mut doc).unwrap();

        let overlay = SplineStyle::edit_overlay();
        let erase = &renderer.calls[0];
        assert_eq!(erase.mode, DrawMode::Erase);
        assert_eq!(erase.style, overlay);
        let last = renderer.calls.last().unwrap();
        assert_eq!(last.mode, DrawMode::Paint);
        assert_eq!(last.style, spline.style);
    }

    #[test]
    fn cancel_without_changes_draws_nothing() {
        let (mut editor, mut spline, mut renderer, mut doc) = setup(6, true);
        editor.begin(&spline, 2, &doc).unwrap();
        editor.cancel(&mut spline, &mut renderer, &mut doc).unwrap();
        assert!(renderer.calls.is_empty());
        assert!(!doc.modified);
    }

    #[test]
    fn set_value_erases_then_redraws_and_marks_modified() {
        let (mut editor, mut spline, mut renderer, mut doc) = setup(6, true);
        editor.begin(&spline, 2, &doc).unwrap();

        editor.set_value(&mut spline, -0.5, &mut renderer, &mut doc).unwrap();
        assert!(doc.modified);
        let modes: Vec<_> = renderer.calls.iter().map(|c| c.mode).collect();
        assert_eq!(modes, vec![DrawMode::Erase, DrawMode::Paint]);
        // First erase removes the curve as drawn in its own style
        assert_eq!(renderer.calls[0].style, spline.style);
        assert_eq!(renderer.calls[1].style, SplineStyle::edit_overlay());

        renderer.calls.clear();
        editor.set_value(&mut spline, 0.5, &mut renderer, &mut doc).unwrap();
        assert_eq!(renderer.calls[0].mode, DrawMode::Erase);
        assert_eq!(renderer.calls[0].style, SplineStyle::edit_overlay());
    }

    #[test]
    fn preview_erases_and_repaints_exactly_the_parent_curve() {
        for (closed, index) in [(true, 4), (true, 0), (false, 1), (false, 7)] {
            let (mut editor, mut spline, mut renderer, mut doc) = setup(9, closed);
            let on_screen = xspline::flatten_around(&spline, index, xspline::DEFAULT_RESOLUTION);

            editor.begin(&spline, index, &doc).unwrap();
            editor.set_value(&mut spline, -0.6, &mut renderer, &mut doc).unwrap();

            // The first erase removes what the parent put on screen
            let erase = &renderer.calls[0];
            assert_eq!(erase.mode, DrawMode::Erase);
            assert_eq!(erase.style, spline.style);
            assert_eq!(path_points(&erase.path), on_screen, "erase around {index}");

            editor.commit(&mut spline, &mut renderer, &mut doc).unwrap();

            // The final paint is the committed parent's own curve
            let committed = xspline::flatten_around(&spline, index, xspline::DEFAULT_RESOLUTION);
            let full = xspline::flatten(&spline, xspline::DEFAULT_RESOLUTION);
            let last = renderer.calls.last().unwrap();
            assert_eq!(last.mode, DrawMode::Paint);
            assert_eq!(path_points(&last.path), committed, "paint around {index}");
            assert!(committed.iter().all(|p| full.contains(p)));
        }
    }

    #[test]
    fn set_value_reclassifies_window_kind() {
        use crate::model::CurveKind;
        let (mut editor, mut spline, mut renderer, mut doc) = setup(6, true);
        editor.begin(&spline, 2, &doc).unwrap();
        assert_eq!(editor.window().unwrap().spline().curve_kind(), CurveKind::Approximating);

        editor.set_value(&mut spline, 0.2, &mut renderer, &mut doc).unwrap();
        assert_eq!(editor.window().unwrap().spline().curve_kind(), CurveKind::General);

        editor.set_value(&mut spline, 1.0, &mut renderer, &mut doc).unwrap();
        assert_eq!(editor.window().unwrap().spline().curve_kind(), CurveKind::Approximating);
    }

    #[test]
    fn snap_angular_sets_exact_corner() {
        let (mut editor, mut spline, mut renderer, mut doc) = setup(6, true);
        editor.begin(&spline, 1, &doc).unwrap();
        let applied = editor.snap_angular(&mut spline, &mut renderer, &mut doc).unwrap();
        assert_eq!(applied, ShapeFactor::Angular);
        editor.commit(&mut spline, &mut renderer, &mut doc).unwrap();
        assert_eq!(spline.shape_factor_of(1).unwrap(), ShapeFactor::Angular);
    }

    #[test]
    fn nan_is_refused_without_side_effects() {
        let (mut editor, mut spline, mut renderer, mut doc) = setup(6, true);
        editor.begin(&spline, 1, &doc).unwrap();
        assert_eq!(
            editor.set_value(&mut spline, f64::NAN, &mut renderer, &mut doc),
            Err(EditError::NotANumber)
        );
        assert!(renderer.calls.is_empty());
        assert!(!doc.modified);
        assert!(editor.is_editing());
    }

    #[test]
    fn operations_need_a_session() {
        let (mut editor, mut spline, mut renderer, mut doc) = setup(6, true);
        assert_eq!(
            editor.set_value(&mut spline, 0.1, &mut renderer, &mut doc),
            Err(EditError::NoSession)
        );
        assert_eq!(
            editor.commit(&mut spline, &mut renderer, &mut doc),
            Err(EditError::NoSession)
        );
        assert_eq!(
            editor.cancel(&mut spline, &mut renderer, &mut doc),
            Err(EditError::NoSession)
        );
    }

    #[test]
    fn other_splines_are_refused() {
        let (mut editor, spline, mut renderer, mut doc) = setup(6, true);
        let mut other = line_of(6, true);
        editor.begin(&spline, 1, &doc).unwrap();
        assert_eq!(
            editor.set_value(&mut other, 0.1, &mut renderer, &mut doc),
            Err(EditError::SplineMismatch)
        );
        assert_eq!(
            editor.commit(&mut other, &mut renderer, &mut doc),
            Err(EditError::SplineMismatch)
        );
        assert!(editor.is_editing());
    }

    #[test]
    fn small_closed_spline_edits_in_place() {
        for n in 1..=settings::window::QUICK_REDRAW_THRESHOLD {
            let (mut editor, mut spline, mut renderer, mut doc) = setup(n, true);
            let bits_before = factor_bits(&spline);

            editor.begin(&spline, 0, &doc).unwrap();
            assert!(editor.window().is_none());
            editor.set_value(&mut spline, -0.25, &mut renderer, &mut doc).unwrap();
            assert_eq!(spline.shape_factor_of(0).unwrap().value(), -0.25);
            // Tiny splines are always drawn as plain segments
            assert!(renderer.calls.iter().all(|c| c.path.elements().len() == n));

            editor.cancel(&mut spline, &mut renderer, &mut doc).unwrap();
            assert_eq!(factor_bits(&spline), bits_before);
            assert!(!doc.modified);
        }
    }

    #[test]
    fn small_closed_spline_commit_records_original() {
        let (mut editor, mut spline, mut renderer, mut doc) = setup(2, true);
        editor.begin(&spline, 1, &doc).unwrap();
        editor.set_value(&mut spline, 0.0, &mut renderer, &mut doc).unwrap();
        editor.commit(&mut spline, &mut renderer, &mut doc).unwrap();

        let (old, new) = doc.last_undo.as_ref().unwrap();
        assert_eq!(old.shape_factor_of(1).unwrap(), ShapeFactor::APPROXIMATING);
        assert_eq!(new.shape_factor_of(1).unwrap(), ShapeFactor::Angular);
        assert_eq!(spline.shape_factor_of(1).unwrap(), ShapeFactor::Angular);
    }

    #[test]
    fn open_two_point_spline_has_nothing_to_edit() {
        let (mut editor, spline, _, doc) = setup(2, false);
        assert_eq!(editor.begin(&spline, 0, &doc), Err(EditError::InvalidEditTarget));
        assert_eq!(editor.begin(&spline, 1, &doc), Err(EditError::InvalidEditTarget));
    }

    #[test]
    fn error_messages_are_status_lines() {
        assert_eq!(EditError::InvalidEditTarget.to_string(), "cannot edit this point");
    }
}
