// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! The spline model: an ordered sequence of control points, each with its
//! own shape factor.
//!
//! Points and factors live together in one `SplineNode`, so the two
//! sequences can never drift apart. Closed splines have no duplicated
//! closing node; neighbors are found with index arithmetic modulo the point
//! count (see [`Spline::neighbor`]).

use super::error::SplineError;
use super::id::{NodeId, SplineId};
use super::point::ControlPoint;
use super::shape::{CurveKind, ShapeFactor};
use crate::settings;
use serde::{Deserialize, Serialize};

/// One control point of a spline together with its shape factor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplineNode {
    pub id: NodeId,
    pub point: ControlPoint,
    pub shape: ShapeFactor,
}

impl SplineNode {
    pub fn new(point: ControlPoint, shape: ShapeFactor) -> Self {
        Self {
            id: NodeId::next(),
            point,
            shape,
        }
    }
}

/// Stroke pattern of a spline
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    #[default]
    Solid,
    /// Dash length in figure units
    Dashed(f64),
    /// Gap between dots in figure units
    Dotted(f64),
}

/// Rendering attributes carried through to the renderer untouched
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplineStyle {
    pub pen_width: u32,
    /// 0xAARRGGBB
    pub color: u32,
    pub line: LineStyle,
}

impl Default for SplineStyle {
    fn default() -> Self {
        Self {
            pen_width: 1,
            color: 0xff00_0000,
            line: LineStyle::Solid,
        }
    }
}

impl SplineStyle {
    /// The fixed style used for the live preview during a shape edit
    pub fn edit_overlay() -> Self {
        Self {
            pen_width: settings::overlay::PEN_WIDTH,
            color: settings::overlay::COLOR,
            line: LineStyle::Dashed(settings::overlay::DASH),
        }
    }
}

/// A generalized spline (X-spline)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "SplineRecord", into = "SplineRecord")]
pub struct Spline {
    nodes: Vec<SplineNode>,
    closed: bool,
    kind: CurveKind,
    id: SplineId,
    pub style: SplineStyle,
}

impl Spline {
    /// Create an empty spline
    pub fn new(closed: bool) -> Self {
        Self {
            nodes: Vec::new(),
            closed,
            kind: CurveKind::Approximating,
            id: SplineId::next(),
            style: SplineStyle::default(),
        }
    }

    /// Create a spline from `(point, factor)` pairs
    pub fn from_points<I, P>(points: I, closed: bool) -> Self
    where
        I: IntoIterator<Item = (P, ShapeFactor)>,
        P: Into<ControlPoint>,
    {
        let nodes: Vec<SplineNode> = points
            .into_iter()
            .map(|(point, shape)| SplineNode::new(point.into(), shape))
            .collect();
        let kind = CurveKind::classify(nodes.iter().map(|n| n.shape));
        Self {
            nodes,
            closed,
            kind,
            id: SplineId::next(),
            style: SplineStyle::default(),
        }
    }

    /// Create a spline where every point has the same shape factor
    pub fn uniform<I, P>(points: I, shape: ShapeFactor, closed: bool) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<ControlPoint>,
    {
        Self::from_points(points.into_iter().map(|p| (p, shape)), closed)
    }

    /// Append a point and its factor as one step
    pub fn push(&mut self, point: ControlPoint, shape: ShapeFactor) {
        self.nodes.push(SplineNode::new(point, shape));
        self.reclassify();
    }

    pub fn id(&self) -> SplineId {
        self.id
    }

    pub fn point_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// The evaluation routine this spline currently needs
    pub fn curve_kind(&self) -> CurveKind {
        self.kind
    }

    pub fn nodes(&self) -> &[SplineNode] {
        &self.nodes
    }

    pub fn points(&self) -> impl Iterator<Item = ControlPoint> + '_ {
        self.nodes.iter().map(|n| n.point)
    }

    pub fn shape_factors(&self) -> impl Iterator<Item = ShapeFactor> + '_ {
        self.nodes.iter().map(|n| n.shape)
    }

    pub fn node(&self, index: usize) -> Result<&SplineNode, SplineError> {
        self.nodes.get(index).ok_or(SplineError::IndexOutOfRange {
            index,
            len: self.nodes.len(),
        })
    }

    pub fn point(&self, index: usize) -> Result<ControlPoint, SplineError> {
        self.node(index).map(|n| n.point)
    }

    /// Shape factor of the point at `index`
    pub fn shape_factor_of(&self, index: usize) -> Result<ShapeFactor, SplineError> {
        self.node(index).map(|n| n.shape)
    }

    /// Replace one shape factor, returning the previous one
    ///
    /// Coordinates and point count never change here.
    pub fn set_shape_factor(
        &mut self,
        index: usize,
        shape: ShapeFactor,
    ) -> Result<ShapeFactor, SplineError> {
        let len = self.nodes.len();
        let node = self
            .nodes
            .get_mut(index)
            .ok_or(SplineError::IndexOutOfRange { index, len })?;
        let previous = std::mem::replace(&mut node.shape, shape);
        self.reclassify();
        Ok(previous)
    }

    /// Index of the first point with these coordinates
    pub fn index_of(&self, point: ControlPoint) -> Option<usize> {
        self.nodes.iter().position(|n| n.point == point)
    }

    /// Index of the closest control point within `tolerance` of `(x, y)`
    ///
    /// Ties go to the point stored first.
    pub fn find_nearest_point(&self, x: i32, y: i32, tolerance: f64) -> Result<usize, SplineError> {
        let mut best: Option<(usize, i64)> = None;
        for (i, node) in self.nodes.iter().enumerate() {
            let dist_sq = node.point.distance_sq_to(x, y);
            match best {
                Some((_, best_sq)) if best_sq <= dist_sq => {}
                _ => best = Some((i, dist_sq)),
            }
        }

        match best {
            Some((index, dist_sq)) if (dist_sq as f64).sqrt() <= tolerance => Ok(index),
            _ => Err(SplineError::NoPointInRange { x, y, tolerance }),
        }
    }

    /// Whether `index` is the first or last point of an open spline
    ///
    /// Closed splines have no endpoints.
    pub fn is_endpoint(&self, index: usize) -> bool {
        !self.closed && !self.nodes.is_empty() && (index == 0 || index + 1 == self.nodes.len())
    }

    /// Index `offset` steps away from `index`
    ///
    /// Closed splines wrap around; open splines return `None` past either
    /// end.
    pub fn neighbor(&self, index: usize, offset: isize) -> Option<usize> {
        let len = self.nodes.len();
        if index >= len {
            return None;
        }
        let target = index as isize + offset;
        if self.closed {
            Some(target.rem_euclid(len as isize) as usize)
        } else if (0..len as isize).contains(&target) {
            Some(target as usize)
        } else {
            None
        }
    }

    fn reclassify(&mut self) {
        self.kind = CurveKind::classify(self.nodes.iter().map(|n| n.shape));
    }
}

// ===== SERIALIZATION =====

/// On-disk form of a spline: ids and the kind tag are derived, not stored
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SplineRecord {
    #[serde(default)]
    closed: bool,
    points: Vec<NodeRecord>,
    #[serde(default)]
    style: SplineStyle,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct NodeRecord {
    x: i32,
    y: i32,
    #[serde(default)]
    shape: ShapeFactor,
}

impl From<SplineRecord> for Spline {
    fn from(record: SplineRecord) -> Self {
        let mut spline = Spline::from_points(
            record
                .points
                .into_iter()
                .map(|n| (ControlPoint::new(n.x, n.y), n.shape)),
            record.closed,
        );
        spline.style = record.style;
        spline
    }
}

impl From<Spline> for SplineRecord {
    fn from(spline: Spline) -> Self {
        SplineRecord {
            closed: spline.closed,
            points: spline
                .nodes
                .iter()
                .map(|n| NodeRecord {
                    x: n.point.x,
                    y: n.point.y,
                    shape: n.shape,
                })
                .collect(),
            style: spline.style,
        }
    }
}
