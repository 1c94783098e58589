// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Ending a shape edit: commit and cancel

use super::{EditSession, SessionWindow, ShapeEditor};
use crate::editing::document::Document;
use crate::editing::error::EditError;
use crate::model::{ShapeFactor, Spline};
use crate::render::{DrawMode, Renderer};

impl ShapeEditor {
    /// Write the edited factor into the parent and end the session
    ///
    /// Only the target's factor changes. The previous and new spline go to
    /// the document's undo hook. If the target point no longer matches, the
    /// session is kept so the caller can still cancel.
    pub fn commit(
        &mut self,
        spline: &mut Spline,
        renderer: &mut dyn Renderer,
        document: &mut dyn Document,
    ) -> Result<ShapeFactor, EditError> {
        let session = self.session_for(spline)?;
        match spline.point(session.parent_index) {
            Ok(point) if point == session.target_point => {}
            _ => {
                tracing::warn!(
                    "[shape edit] point {} no longer at ({}, {})",
                    session.parent_index,
                    session.target_point.x,
                    session.target_point.y
                );
                return Err(EditError::StaleTarget);
            }
        }

        let Some(session) = self.session.take() else {
            return Err(EditError::NoSession);
        };
        let index = session.parent_index;
        let factor = session.current;

        // Whole-spline sessions already wrote into the parent
        let mut old = spline.clone();
        old.set_shape_factor(index, session.original)
            .map_err(|_| EditError::StaleTarget)?;
        spline
            .set_shape_factor(index, factor)
            .map_err(|_| EditError::StaleTarget)?;

        if session.preview_drawn {
            self.replace_preview(&session, spline, renderer);
        }

        tracing::info!(
            "[shape edit] committed point {}: {} -> {}",
            index,
            session.original.value(),
            factor.value()
        );
        document.record_undo(old, spline.clone());
        Ok(factor)
    }

    /// Drop the session without touching the parent
    ///
    /// Any preview is erased, the original curve redrawn, and the
    /// document's modified flag put back to what it was at `begin`.
    pub fn cancel(
        &mut self,
        spline: &mut Spline,
        renderer: &mut dyn Renderer,
        document: &mut dyn Document,
    ) -> Result<(), EditError> {
        self.session_for(spline)?;
        let Some(mut session) = self.session.take() else {
            return Err(EditError::NoSession);
        };

        let original = session.original;
        if session.preview_drawn {
            self.erase_preview(&session, spline, renderer);
        }
        match &mut session.window {
            SessionWindow::Local(window) => {
                window
                    .set_target_factor(original)
                    .map_err(|_| EditError::StaleTarget)?;
            }
            SessionWindow::Whole => {
                spline
                    .set_shape_factor(session.parent_index, original)
                    .map_err(|_| EditError::StaleTarget)?;
            }
        }
        if session.preview_drawn {
            self.paint_normal(&session, spline, renderer);
        }

        document.set_modified(session.was_modified);
        tracing::debug!("[shape edit] cancelled edit of point {}", session.parent_index);
        Ok(())
    }

    /// Swap the overlay preview for the curve in its normal style
    fn replace_preview(&self, session: &EditSession, spline: &Spline, renderer: &mut dyn Renderer) {
        self.erase_preview(session, spline, renderer);
        self.paint_normal(session, spline, renderer);
    }

    fn erase_preview(&self, session: &EditSession, spline: &Spline, renderer: &mut dyn Renderer) {
        session.draw(spline, renderer, &self.overlay, DrawMode::Erase);
    }

    fn paint_normal(&self, session: &EditSession, spline: &Spline, renderer: &mut dyn Renderer) {
        session.draw(spline, renderer, &spline.style, DrawMode::Paint);
    }
}
