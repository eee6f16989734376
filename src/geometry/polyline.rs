// SPDX-License-Identifier: MIT
//
// Copyright (c) 2025 Alexandre Severino
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use crate::geometry::{Point2, Segment2, segment_intersection};

/// Closest point of a polyline to some query point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub point: Point2,
    /// Arc-length parameter of `point` measured from the first vertex.
    pub param: f64,
    pub distance: f64,
    pub segment: usize,
}

/// A polyline with cached cumulative arc length, open or closed.
#[derive(Debug, Clone)]
pub struct Polyline {
    points: Vec<Point2>,
    cumulative: Vec<f64>,
    closed: bool,
}

impl Polyline {
    pub fn new(points: Vec<Point2>, closed: bool) -> Self {
        let mut cumulative = Vec::with_capacity(points.len() + 1);
        let mut acc = 0.0;
        cumulative.push(0.0);
        for w in points.windows(2) {
            acc += w[0].distance_to(&w[1]);
            cumulative.push(acc);
        }
        if closed && points.len() > 1 {
            acc += points[points.len() - 1].distance_to(&points[0]);
            cumulative.push(acc);
        }
        if points.is_empty() {
            cumulative.clear();
        }
        Self {
            points,
            cumulative,
            closed,
        }
    }

    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn length(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    pub fn segment_count(&self) -> usize {
        match self.points.len() {
            0 | 1 => 0,
            n if self.closed => n,
            n => n - 1,
        }
    }

    pub fn segment(&self, i: usize) -> Segment2 {
        let j = (i + 1) % self.points.len();
        Segment2::new(&self.points[i], &self.points[j])
    }

    /// Arc-length parameter of vertex `i`.
    pub fn vertex_param(&self, i: usize) -> f64 {
        self.cumulative[i]
    }

    /// Point at arc length `s`; closed polylines wrap, open ones clamp.
    pub fn point_at(&self, s: f64) -> Point2 {
        let total = self.length();
        if self.points.len() < 2 || total <= 0.0 {
            return self.points.first().copied().unwrap_or_default();
        }
        let s = if self.closed {
            s.rem_euclid(total)
        } else {
            s.clamp(0.0, total)
        };
        let seg = match self
            .cumulative
            .binary_search_by(|c| c.partial_cmp(&s).unwrap_or(std::cmp::Ordering::Less))
        {
            Ok(i) => i.min(self.segment_count() - 1),
            Err(i) => i.saturating_sub(1).min(self.segment_count() - 1),
        };
        let start = self.cumulative[seg];
        let span = self.cumulative[seg + 1] - start;
        let t = if span > 0.0 { (s - start) / span } else { 0.0 };
        let edge = self.segment(seg);
        edge.a.lerp(&edge.b, t.clamp(0.0, 1.0))
    }

    /// Clamped projection of `p`, `None` for a polyline without segments.
    pub fn project(&self, p: &Point2) -> Option<Projection> {
        let mut best: Option<Projection> = None;
        for i in 0..self.segment_count() {
            let seg = self.segment(i);
            let (q, t) = seg.closest_point(p);
            let distance = q.distance_to(p);
            if best.as_ref().is_none_or(|b| distance < b.distance) {
                best = Some(Projection {
                    point: q,
                    param: self.cumulative[i] + t * (self.cumulative[i + 1] - self.cumulative[i]),
                    distance,
                    segment: i,
                });
            }
        }
        best
    }

    pub fn distance_to(&self, p: &Point2) -> f64 {
        self.project(p).map_or(f64::INFINITY, |pr| pr.distance)
    }

    /// First point, walking from `from` to `to`, where that step crosses the polyline.
    ///
    /// Returns the crossing and its arc-length parameter on the polyline.
    pub fn first_crossing(&self, from: &Point2, to: &Point2) -> Option<(Point2, f64)> {
        let step = Segment2::new(from, to);
        let step_bb = step.bounds();
        let mut best: Option<(f64, Point2, f64)> = None;
        for i in 0..self.segment_count() {
            let seg = self.segment(i);
            if !seg.bounds().intersects(&step_bb) {
                continue;
            }
            let hit = match segment_intersection(&step, &seg) {
                crate::geometry::SegmentIntersection::Point(p) => p,
                _ => continue,
            };
            let along = from.distance_squared_to(&hit);
            if best.as_ref().is_none_or(|b| along < b.0) {
                let (_, t) = seg.closest_point(&hit);
                let param = self.cumulative[i] + t * (self.cumulative[i + 1] - self.cumulative[i]);
                best = Some((along, hit, param));
            }
        }
        best.map(|(_, p, s)| (p, s))
    }

    /// Evenly spaced points along the polyline at roughly `spacing`.
    ///
    /// Open polylines keep both end points; closed ones yield at least three points.
    pub fn resample(&self, spacing: f64) -> Vec<Point2> {
        let total = self.length();
        if self.points.len() < 2 || total <= 0.0 || spacing <= 0.0 {
            return self.points.clone();
        }
        if self.closed {
            let n = ((total / spacing).round() as usize).max(3);
            let step = total / n as f64;
            (0..n).map(|i| self.point_at(i as f64 * step)).collect()
        } else {
            let n = ((total / spacing).round() as usize).max(1);
            let step = total / n as f64;
            (0..=n).map(|i| self.point_at(i as f64 * step)).collect()
        }
    }
}
