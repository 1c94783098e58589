// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Live value changes for ShapeEditor

use super::{SessionWindow, ShapeEditor};
use crate::editing::document::Document;
use crate::editing::error::EditError;
use crate::model::{ShapeFactor, Spline};
use crate::render::{DrawMode, Renderer};

impl ShapeEditor {
    /// Preview a new shape value for the target
    ///
    /// Values outside [-1, 1] are clamped. Returns the factor applied.
    pub fn set_value(
        &mut self,
        spline: &mut Spline,
        value: f64,
        renderer: &mut dyn Renderer,
        document: &mut dyn Document,
    ) -> Result<ShapeFactor, EditError> {
        let factor = ShapeFactor::from_value(value).ok_or(EditError::NotANumber)?;
        self.apply(spline, factor, renderer, document)
    }

    /// Preview the target as a sharp corner
    pub fn snap_angular(
        &mut self,
        spline: &mut Spline,
        renderer: &mut dyn Renderer,
        document: &mut dyn Document,
    ) -> Result<ShapeFactor, EditError> {
        self.apply(spline, ShapeFactor::Angular, renderer, document)
    }

    fn apply(
        &mut self,
        spline: &mut Spline,
        factor: ShapeFactor,
        renderer: &mut dyn Renderer,
        document: &mut dyn Document,
    ) -> Result<ShapeFactor, EditError> {
        let overlay = self.overlay;
        let session = self.session_for(spline)?;

        // The first change removes the curve as drawn normally; later ones
        // remove the previous preview
        let erase_style = if session.preview_drawn {
            overlay
        } else {
            spline.style
        };
        session.draw(spline, renderer, &erase_style, DrawMode::Erase);

        match &mut session.window {
            SessionWindow::Local(window) => {
                window
                    .set_target_factor(factor)
                    .map_err(|_| EditError::StaleTarget)?;
            }
            SessionWindow::Whole => {
                spline
                    .set_shape_factor(session.parent_index, factor)
                    .map_err(|_| EditError::StaleTarget)?;
            }
        }
        session.current = factor;

        session.draw(spline, renderer, &overlay, DrawMode::Paint);
        session.preview_drawn = true;
        document.mark_modified();

        tracing::debug!(
            "[shape edit] point {} -> {}",
            session.parent_index,
            factor.value()
        );
        Ok(factor)
    }
}
