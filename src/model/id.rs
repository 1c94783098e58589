// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Identity of splines and their nodes.
//!
//! Coordinates are not identity: a window copies points from its parent, and
//! two splines can hold the same points. Splines and nodes therefore carry
//! ids drawn from separate process-wide counters, so an edit session can
//! check it was handed the spline it started on and a window's nodes never
//! pass for the parent's.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

macro_rules! counter_id {
    ($(#[$doc:meta])* $name:ident, $counter:ident, $prefix:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(u64);

        static $counter: AtomicU64 = AtomicU64::new(1);

        impl $name {
            /// A fresh id, never handed out before in this process
            pub fn next() -> Self {
                Self($counter.fetch_add(1, Ordering::Relaxed))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

counter_id!(
    /// Identity of one spline, fresh on creation and on load
    SplineId,
    SPLINE_COUNTER,
    "spline#"
);

counter_id!(
    /// Identity of one node; copies into a window get new ones
    NodeId,
    NODE_COUNTER,
    "node#"
);
