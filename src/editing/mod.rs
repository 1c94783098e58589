// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Local windows and interactive shape editing

pub mod document;
pub mod error;
pub mod session;
pub mod window;

pub use document::{Document, MemoryDocument};
pub use error::{EditError, WindowError};
pub use session::ShapeEditor;
pub use window::{LocalWindow, SubsplineWindow, extract_window};
