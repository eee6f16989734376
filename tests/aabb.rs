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

use ecmm::geometry::{Aabb, Point2};

#[test]
fn test_aabb_from_points_and_intersection_2() {
    let a = Aabb::from_points(&Point2::new(0.0, 1.0), &Point2::new(2.0, -1.0));
    assert_eq!(a.min, Point2::new(0.0, -1.0));
    assert_eq!(a.max, Point2::new(2.0, 1.0));

    let b = Aabb::from_points(&Point2::new(0.5, -0.5), &Point2::new(3.0, 0.5));
    assert!(a.intersects(&b));

    let far = Aabb::from_points(&Point2::new(5.0, 5.0), &Point2::new(6.0, 6.0));
    assert!(!a.intersects(&far));
}

#[test]
fn touching_boxes_intersect() {
    let a = Aabb::from_points(&Point2::new(0.0, 0.0), &Point2::new(1.0, 1.0));
    let b = Aabb::from_points(&Point2::new(1.0, 0.0), &Point2::new(2.0, 1.0));
    assert!(a.intersects(&b));
    assert!(a.contains(&Point2::new(1.0, 0.5)));
}

#[test]
fn enclosing_points() {
    let pts = [Point2::new(1.0, 2.0), Point2::new(-1.0, 0.5), Point2::new(0.0, 3.0)];
    let bb = Aabb::enclosing(pts.iter()).expect("non-empty");
    assert_eq!(bb.min, Point2::new(-1.0, 0.5));
    assert_eq!(bb.max, Point2::new(1.0, 3.0));
    assert!(bb.expanded(0.5).contains(&Point2::new(-1.5, 3.5)));
    assert!(Aabb::enclosing(std::iter::empty()).is_none());
}
