// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! X-spline evaluation.
//!
//! Each segment `p1 -> p2` is a weighted average of four control points
//! `p0..p3`. The weights come from the shape factors `s1` (at `p1`) and `s2`
//! (at `p2`): a non-negative factor uses the approximating blend `f`, a
//! negative one the interpolating pair `g`/`h`. A factor of 0 falls on the
//! approximating side and yields a sharp corner through the point.
//!
//! Open splines duplicate their first and last point and treat both
//! endpoints as corners, so the curve starts and ends exactly on them.

use crate::model::{ControlPoint, Spline};
use kurbo::{BezPath, Point};

/// Flattening resolution for ordinary drawing
pub use crate::settings::flatten::RESOLUTION as DEFAULT_RESOLUTION;
use crate::settings::flatten::MAX_STEPS;

/// Approximating blend, `p = 2 * denominator^2`
fn f_blend(numerator: f64, denominator: f64) -> f64 {
    let p = 2.0 * denominator * denominator;
    let u = numerator / denominator;
    u * u * u * (10.0 - p + (2.0 * p - 15.0) * u + (6.0 - p) * u * u)
}

/// Interpolating blend for the near side of a point
fn g_blend(u: f64, q: f64) -> f64 {
    u * (q + u * (2.0 * q + u * (8.0 - 12.0 * q + u * (14.0 * q - 11.0 + u * (4.0 - 5.0 * q)))))
}

/// Interpolating blend for the far side of a point, zero at both ends
fn h_blend(u: f64, q: f64) -> f64 {
    let u2 = u * u;
    u * (q + u * (2.0 * q + u2 * (-2.0 * q - u * q)))
}

/// Weights of `p0` and `p2` contributed by the factor at `p1`
fn s1_influence(t: f64, s1: f64) -> (f64, f64) {
    if s1 < 0.0 {
        let q = -s1;
        (h_blend(-t, q), g_blend(t, q))
    } else {
        let a0 = if t < s1 {
            f_blend(t - s1, -1.0 - s1)
        } else {
            0.0
        };
        (a0, f_blend(t + s1, 1.0 + s1))
    }
}

/// Weights of `p1` and `p3` contributed by the factor at `p2`
fn s2_influence(t: f64, s2: f64) -> (f64, f64) {
    if s2 < 0.0 {
        let q = -s2;
        (g_blend(1.0 - t, q), h_blend(t - 1.0, q))
    } else {
        let a3 = if t > 1.0 - s2 {
            f_blend(t - 1.0 + s2, 1.0 + s2)
        } else {
            0.0
        };
        (f_blend(t - 1.0 - s2, -1.0 - s2), a3)
    }
}

/// Four control points and the two factors of one segment
#[derive(Debug, Clone, Copy)]
struct Segment {
    p: [Point; 4],
    s1: f64,
    s2: f64,
}

impl Segment {
    fn eval(&self, t: f64) -> Point {
        let (a0, a2) = s1_influence(t, self.s1);
        let (a1, a3) = s2_influence(t, self.s2);
        let weights = [a0, a1, a2, a3];
        let sum: f64 = weights.iter().sum();
        if sum.abs() < f64::EPSILON {
            return self.p[1];
        }
        let (x, y) = weights
            .iter()
            .zip(self.p.iter())
            .fold((0.0, 0.0), |(x, y), (w, p)| (x + w * p.x, y + w * p.y));
        Point::new(x / sum, y / sum)
    }

    /// Steps needed so each one covers about `resolution` units
    fn step_count(&self, resolution: f64) -> usize {
        let start = self.eval(0.0);
        let mid = self.eval(0.5);
        let end = self.eval(1.0);
        let length = start.distance(mid) + mid.distance(end);
        let steps = (length / resolution).ceil();
        if steps.is_finite() && steps >= 1.0 {
            (steps as usize).min(MAX_STEPS)
        } else {
            1
        }
    }
}

fn segments(spline: &Spline) -> Vec<Segment> {
    let nodes = spline.nodes();
    let n = nodes.len();
    if n < 2 {
        return Vec::new();
    }

    if spline.is_closed() {
        (0..n)
            .map(|i| {
                let at = |k: usize| nodes[k % n];
                Segment {
                    p: [
                        at(i + n - 1).point.to_kurbo(),
                        at(i).point.to_kurbo(),
                        at(i + 1).point.to_kurbo(),
                        at(i + 2).point.to_kurbo(),
                    ],
                    s1: at(i).shape.value(),
                    s2: at(i + 1).shape.value(),
                }
            })
            .collect()
    } else {
        // Endpoints are doubled and forced to corners
        let mut ext: Vec<(ControlPoint, f64)> = Vec::with_capacity(n + 2);
        ext.push((nodes[0].point, 0.0));
        ext.extend(nodes.iter().enumerate().map(|(i, node)| {
            let s = if i == 0 || i == n - 1 {
                0.0
            } else {
                node.shape.value()
            };
            (node.point, s)
        }));
        ext.push((nodes[n - 1].point, 0.0));

        ext.windows(4)
            .map(|w| Segment {
                p: [
                    w[0].0.to_kurbo(),
                    w[1].0.to_kurbo(),
                    w[2].0.to_kurbo(),
                    w[3].0.to_kurbo(),
                ],
                s1: w[1].1,
                s2: w[2].1,
            })
            .collect()
    }
}

/// Sample the curve into a polyline
///
/// Closed splines end where they started, so the first point is repeated
/// at the end.
pub fn flatten(spline: &Spline, resolution: f64) -> Vec<Point> {
    let nodes = spline.nodes();
    match nodes.len() {
        0 => return Vec::new(),
        1 => return vec![nodes[0].point.to_kurbo()],
        _ => {}
    }
    sample(&segments(spline), resolution)
}

/// Sample only the segments that start or end at point `index`
///
/// Segment `k` runs from point `k` to point `k + 1`, so these are the only
/// segments a change to the factor at `index` can move. Each one is
/// evaluated exactly as `flatten` would, so the samples lie on the full
/// curve.
pub fn flatten_around(spline: &Spline, index: usize, resolution: f64) -> Vec<Point> {
    let n = spline.point_count();
    if index >= n {
        return Vec::new();
    }
    let all = segments(spline);
    let before = if spline.is_closed() {
        Some((index + n - 1) % n)
    } else {
        index.checked_sub(1)
    };
    let picked: Vec<Segment> = before
        .into_iter()
        .chain([index])
        .filter_map(|k| all.get(k).copied())
        .collect();
    sample(&picked, resolution)
}

fn sample(segments: &[Segment], resolution: f64) -> Vec<Point> {
    let mut out = Vec::new();
    for segment in segments {
        let steps = segment.step_count(resolution);
        out.extend((0..steps).map(|j| segment.eval(j as f64 / steps as f64)));
    }
    if let Some(last) = segments.last() {
        out.push(last.eval(1.0));
    }
    out
}

/// The curve as a polyline path ready for a renderer
pub fn to_bezpath(spline: &Spline, resolution: f64) -> BezPath {
    let close = spline.is_closed() && spline.point_count() > 2;
    polyline(flatten(spline, resolution), close)
}

/// The part of the curve around point `index`, see [`flatten_around`]
pub fn to_bezpath_around(spline: &Spline, index: usize, resolution: f64) -> BezPath {
    polyline(flatten_around(spline, index, resolution), false)
}

fn polyline(points: Vec<Point>, close: bool) -> BezPath {
    let mut path = BezPath::new();
    let mut iter = points.into_iter();
    if let Some(first) = iter.next() {
        path.move_to(first);
        for p in iter {
            path.line_to(p);
        }
        if close {
            path.close_path();
        }
    }
    path
}
