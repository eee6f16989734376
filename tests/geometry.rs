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

use ecmm::geometry::{Point2, Polyline, Segment2, Vector2};

fn unit_square() -> Vec<Point2> {
    vec![
        Point2::new(0.0, 0.0),
        Point2::new(0.0, 1.0),
        Point2::new(1.0, 1.0),
        Point2::new(1.0, 0.0),
    ]
}

#[test]
fn point_and_vector_arithmetic() {
    let a = Point2::new(1.0, 2.0);
    let b = Point2::new(4.0, 6.0);
    assert_eq!(a.distance_to(&b), 5.0);
    assert_eq!(b - a, Vector2::new(3.0, 4.0));
    assert_eq!(a + Vector2::new(1.0, 1.0), Point2::new(2.0, 3.0));
    assert_eq!(a.midpoint(&b), Point2::new(2.5, 4.0));
    assert_eq!(Vector2::new(1.0, 0.0).perp_left(), Vector2::new(0.0, 1.0));
    assert_eq!(Vector2::zero().normalized(), Vector2::zero());
}

#[test]
fn segment_projection_is_clamped() {
    let s = Segment2::new(&Point2::new(0.0, 0.0), &Point2::new(2.0, 0.0));
    let (q, t) = s.closest_point(&Point2::new(1.0, 3.0));
    assert_eq!(q, Point2::new(1.0, 0.0));
    assert_eq!(t, 0.5);
    let (q, t) = s.closest_point(&Point2::new(-1.0, 1.0));
    assert_eq!(q, Point2::new(0.0, 0.0));
    assert_eq!(t, 0.0);
    assert!((s.distance_to_point(&Point2::new(3.0, 0.0)) - 1.0).abs() < 1e-12);
    assert!(s.is_point_on(&Point2::new(1.5, 1e-12), 1e-9));
}

#[test]
fn closed_polyline_wraps() {
    let line = Polyline::new(unit_square(), true);
    assert_eq!(line.length(), 4.0);
    assert_eq!(line.segment_count(), 4);
    assert_eq!(line.point_at(0.5), Point2::new(0.0, 0.5));
    assert_eq!(line.point_at(4.5), Point2::new(0.0, 0.5));
    assert_eq!(line.point_at(3.5), Point2::new(0.5, 0.0));
}

#[test]
fn open_polyline_clamps() {
    let line = Polyline::new(unit_square(), false);
    assert_eq!(line.length(), 3.0);
    assert_eq!(line.point_at(-1.0), Point2::new(0.0, 0.0));
    assert_eq!(line.point_at(10.0), Point2::new(1.0, 0.0));
}

#[test]
fn projection_reports_arc_parameter() {
    let line = Polyline::new(unit_square(), true);
    let pr = line.project(&Point2::new(0.5, 1.2)).expect("segments");
    assert_eq!(pr.segment, 1);
    assert!((pr.param - 1.5).abs() < 1e-12);
    assert!((pr.distance - 0.2).abs() < 1e-12);
}

#[test]
fn first_crossing_along_a_step() {
    let line = Polyline::new(unit_square(), true);
    let (hit, s) = line
        .first_crossing(&Point2::new(0.5, 0.5), &Point2::new(0.5, 1.5))
        .expect("crosses the top edge");
    assert!((hit.y - 1.0).abs() < 1e-12);
    assert!((s - 1.5).abs() < 1e-12);
    assert!(line
        .first_crossing(&Point2::new(0.2, 0.2), &Point2::new(0.4, 0.4))
        .is_none());
}

#[test]
fn resample_spacing() {
    let line = Polyline::new(unit_square(), true);
    let pts = line.resample(0.25);
    assert_eq!(pts.len(), 16);
    let open = Polyline::new(vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)], false).resample(0.3);
    assert_eq!(open.len(), 4);
    assert_eq!(open[3], Point2::new(1.0, 0.0));
}
