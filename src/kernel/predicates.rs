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
use crate::kernel::orientation::orient2d;

#[inline(always)]
fn sign(v: f64) -> i8 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}

/// True when the open segments `p1p2` and `q1q2` cross at a single interior point.
///
/// Touching at an end point and collinear overlap do not count.
pub fn segments_cross(p1: &Point2, p2: &Point2, q1: &Point2, q2: &Point2) -> bool {
    let o1 = sign(orient2d(p1, p2, q1));
    let o2 = sign(orient2d(p1, p2, q2));
    let o3 = sign(orient2d(q1, q2, p1));
    let o4 = sign(orient2d(q1, q2, p2));
    o1 * o2 < 0 && o3 * o4 < 0
}

/// True when `p` lies on the open segment `q1q2`, end points excluded.
pub fn on_segment_interior(p: &Point2, q1: &Point2, q2: &Point2) -> bool {
    if orient2d(q1, q2, p) != 0.0 {
        return false;
    }
    let d = q1.vector_to(q2);
    let t = q1.vector_to(p).dot(&d);
    t > 0.0 && t < d.norm2()
}

/// Side of the chain `a0 -> v -> a1` that `w` falls on, seen from `v`.
///
/// `Some(true)` is the left side. `None` when `w` is collinear with either edge.
pub fn side_of_chain(a0: &Point2, v: &Point2, a1: &Point2, w: &Point2) -> Option<bool> {
    let l0 = sign(orient2d(a0, v, w));
    let l1 = sign(orient2d(v, a1, w));
    if l0 == 0 || l1 == 0 {
        return None;
    }
    if orient2d(a0, v, a1) >= 0.0 {
        Some(l0 > 0 && l1 > 0)
    } else {
        Some(l0 > 0 || l1 > 0)
    }
}

/// Crossing point of two segments already known to cross.
///
/// Uses the slope/intercept primitive and falls back to the parametric line form when
/// the primitive classifies the pair as (near) parallel.
pub fn crossing_point(p1: &Point2, p2: &Point2, q1: &Point2, q2: &Point2) -> Point2 {
    let s1 = Segment2::new(p1, p2);
    let s2 = Segment2::new(q1, q2);
    if let crate::geometry::SegmentIntersection::Point(p) = segment_intersection(&s1, &s2) {
        return p;
    }
    let r = p1.vector_to(p2);
    let s = q1.vector_to(q2);
    let denom = r.cross(&s);
    if denom == 0.0 {
        return p1.midpoint(q1);
    }
    let t = (p1.vector_to(q1).cross(&s) / denom).clamp(0.0, 1.0);
    p1.lerp(p2, t)
}

/// Crossing-number containment test. Points on the boundary may land either way.
pub fn point_in_polygon(p: &Point2, polygon: &[Point2]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let a = &polygon[i];
        let b = &polygon[j];
        if (a.y > p.y) != (b.y > p.y) {
            let x = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if p.x < x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Shoelace signed area; positive for anticlockwise polygons.
pub fn polygon_signed_area(polygon: &[Point2]) -> f64 {
    let n = polygon.len();
    if n < 3 {
        return 0.0;
    }
    let mut acc = 0.0;
    for i in 0..n {
        let a = &polygon[i];
        let b = &polygon[(i + 1) % n];
        acc += a.x * b.y - b.x * a.y;
    }
    acc * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn cross_and_touch() {
        assert!(segments_cross(&p(0.0, 0.0), &p(2.0, 2.0), &p(0.0, 2.0), &p(2.0, 0.0)));
        // shared end point
        assert!(!segments_cross(&p(0.0, 0.0), &p(1.0, 1.0), &p(1.0, 1.0), &p(2.0, 0.0)));
        // collinear overlap
        assert!(!segments_cross(&p(0.0, 0.0), &p(2.0, 0.0), &p(1.0, 0.0), &p(3.0, 0.0)));
    }

    #[test]
    fn crossing_point_of_diagonals() {
        let c = crossing_point(&p(0.0, 0.0), &p(2.0, 2.0), &p(0.0, 2.0), &p(2.0, 0.0));
        assert!((c.x - 1.0).abs() < 1e-12 && (c.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn square_containment_and_area() {
        let sq = [p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)];
        assert!(point_in_polygon(&p(0.5, 0.5), &sq));
        assert!(!point_in_polygon(&p(1.5, 0.5), &sq));
        assert_eq!(polygon_signed_area(&sq), 1.0);
    }
}
