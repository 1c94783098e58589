// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! The document side of an edit: the modified flag and the undo hand-off.

use crate::model::Spline;

/// The figure document an edited spline belongs to
pub trait Document {
    fn is_modified(&self) -> bool;

    fn set_modified(&mut self, modified: bool);

    /// Raised on every live value change
    fn mark_modified(&mut self) {
        self.set_modified(true);
    }

    /// Receive the spline as it was before and after a committed edit
    fn record_undo(&mut self, old: Spline, new: Spline);
}

/// A document that keeps everything in memory
///
/// Holds only the most recent undo pair; the real undo stack lives
/// elsewhere.
#[derive(Debug, Default)]
pub struct MemoryDocument {
    pub modified: bool,
    pub last_undo: Option<(Spline, Spline)>,
}

impl Document for MemoryDocument {
    fn is_modified(&self) -> bool {
        self.modified
    }

    fn set_modified(&mut self, modified: bool) {
        self.modified = modified;
    }

    fn record_undo(&mut self, old: Spline, new: Spline) {
        self.last_undo = Some((old, new));
    }
}
