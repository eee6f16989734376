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

use crate::geometry::{Point2, Segment2, util::SLOPE_TOLERANCE};

/// Result of intersecting the supporting lines of two segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentIntersection {
    /// Parallel lines that never meet.
    ParallelDisjoint,
    /// Collinear segments sharing a stretch; carries the middle of the overlap.
    Overlapping(Point2),
    /// The lines cross, but outside at least one of the segments.
    Outside(Point2),
    /// The segments themselves cross.
    Point(Point2),
}

impl SegmentIntersection {
    /// Integer code: `-1` parallel, `-2` overlapping, `0` outside, `1` crossing.
    pub fn code(&self) -> i8 {
        match self {
            SegmentIntersection::ParallelDisjoint => -1,
            SegmentIntersection::Overlapping(_) => -2,
            SegmentIntersection::Outside(_) => 0,
            SegmentIntersection::Point(_) => 1,
        }
    }

    pub fn point(&self) -> Option<Point2> {
        match self {
            SegmentIntersection::ParallelDisjoint => None,
            SegmentIntersection::Overlapping(p)
            | SegmentIntersection::Outside(p)
            | SegmentIntersection::Point(p) => Some(*p),
        }
    }
}

pub fn segment_intersection(s1: &Segment2, s2: &Segment2) -> SegmentIntersection {
    segment_intersection_with_tolerance(s1, s2, SLOPE_TOLERANCE)
}

/// Slope/intercept intersection of two segments.
///
/// Near-vertical segments (`|dx| < tol`) are handled as `x = const` lines, and slopes
/// closer than `tol` count as parallel. Every expression is written so that swapping
/// `s1` and `s2` yields the same answer.
pub fn segment_intersection_with_tolerance(
    s1: &Segment2,
    s2: &Segment2,
    tol: f64,
) -> SegmentIntersection {
    let dx1 = s1.b.x - s1.a.x;
    let dx2 = s2.b.x - s2.a.x;
    let vertical1 = dx1.abs() < tol;
    let vertical2 = dx2.abs() < tol;

    if vertical1 && vertical2 {
        let x1 = (s1.a.x + s1.b.x) * 0.5;
        let x2 = (s2.a.x + s2.b.x) * 0.5;
        if (x1 - x2).abs() >= tol {
            return SegmentIntersection::ParallelDisjoint;
        }
        let lo = s1.a.y.min(s1.b.y).max(s2.a.y.min(s2.b.y));
        let hi = s1.a.y.max(s1.b.y).min(s2.a.y.max(s2.b.y));
        if lo > hi + tol {
            return SegmentIntersection::ParallelDisjoint;
        }
        return SegmentIntersection::Overlapping(Point2::new((x1 + x2) * 0.5, (lo + hi) * 0.5));
    }

    if vertical1 || vertical2 {
        let (vert, other) = if vertical1 { (s1, s2) } else { (s2, s1) };
        let x = (vert.a.x + vert.b.x) * 0.5;
        let (m, c) = slope_intercept(other);
        let p = Point2::new(x, m * x + c);
        return classify(s1, s2, p, tol);
    }

    let (m1, c1) = slope_intercept(s1);
    let (m2, c2) = slope_intercept(s2);

    if (m1 - m2).abs() < tol {
        if (c1 - c2).abs() >= tol {
            return SegmentIntersection::ParallelDisjoint;
        }
        let lo = s1.a.x.min(s1.b.x).max(s2.a.x.min(s2.b.x));
        let hi = s1.a.x.max(s1.b.x).min(s2.a.x.max(s2.b.x));
        if lo > hi + tol {
            return SegmentIntersection::ParallelDisjoint;
        }
        let x = (lo + hi) * 0.5;
        let y = ((m1 * x + c1) + (m2 * x + c2)) * 0.5;
        return SegmentIntersection::Overlapping(Point2::new(x, y));
    }

    let x = (c2 - c1) / (m1 - m2);
    let y = ((m1 * x + c1) + (m2 * x + c2)) * 0.5;
    classify(s1, s2, Point2::new(x, y), tol)
}

fn slope_intercept(s: &Segment2) -> (f64, f64) {
    let m = (s.b.y - s.a.y) / (s.b.x - s.a.x);
    (m, s.a.y - m * s.a.x)
}

fn classify(s1: &Segment2, s2: &Segment2, p: Point2, tol: f64) -> SegmentIntersection {
    if s1.bounds().expanded(tol).contains(&p) && s2.bounds().expanded(tol).contains(&p) {
        SegmentIntersection::Point(p)
    } else {
        SegmentIntersection::Outside(p)
    }
}
