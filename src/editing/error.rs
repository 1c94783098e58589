// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Errors for window extraction and shape editing

use crate::model::SplineError;
use thiserror::Error;

/// Why a subspline window could not be built
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum WindowError {
    #[error("target index {index} out of range for a spline of {len} points")]
    TargetOutOfRange { index: usize, len: usize },

    #[error("lookup failed while copying points: {0}")]
    Lookup(#[from] SplineError),

    #[error("target point not found in the extracted window")]
    TargetNotRelocated,
}

/// Why a shape edit operation was refused
///
/// `Display` gives the short status-line message.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum EditError {
    #[error("cannot edit this point")]
    InvalidEditTarget,

    #[error("cannot prepare this point for editing: {0}")]
    Window(#[from] WindowError),

    #[error("a shape edit is already in progress")]
    SessionActive,

    #[error("no shape edit in progress")]
    NoSession,

    #[error("shape value is not a number")]
    NotANumber,

    #[error("this edit belongs to another spline")]
    SplineMismatch,

    #[error("the edited point has moved")]
    StaleTarget,
}
