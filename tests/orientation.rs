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

use ecmm::geometry::Point2;
use ecmm::kernel::{
    Orientation, on_segment_interior, orient2d, orient2d_exact, orientation, point_in_polygon,
    polygon_signed_area, segments_cross, side_of_chain, triangle_area,
};
use rand::{Rng, SeedableRng, rngs::StdRng};

#[test]
fn ccw_test() {
    let a = Point2::new(0.0, 0.0);
    let b = Point2::new(1.0, 0.0);
    let c = Point2::new(0.0, 1.0);
    assert!(orient2d(&a, &b, &c) > 0.0);
    assert_eq!(orientation(&a, &c, &b), Orientation::Clockwise);
    assert_eq!(
        orientation(&a, &Point2::new(1.0, 1.0), &Point2::new(2.0, 2.0)),
        Orientation::Collinear
    );
}

#[test]
fn triangle_area_flips_with_order() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..1000 {
        let mut p = || Point2::new(rng.random_range(-5.0..5.0), rng.random_range(-5.0..5.0));
        let (a, b, c) = (p(), p(), p());
        let abc = triangle_area(&a, &b, &c);
        if abc == 0.0 {
            continue;
        }
        assert_eq!(abc, -triangle_area(&a, &c, &b));
    }
}

#[test]
fn filtered_sign_matches_exact_sign() {
    let mut rng = StdRng::seed_from_u64(3);
    let a = Point2::new(0.0, 0.0);
    let b = Point2::new(1.0, 1.0);
    for _ in 0..500 {
        let t: f64 = rng.random_range(-4.0..4.0);
        let jitter: f64 = rng.random_range(-1e-15..1e-15);
        let c = Point2::new(t, t + jitter);
        let fast = orient2d(&a, &b, &c);
        assert_eq!(fast.partial_cmp(&0.0), Some(orient2d_exact(&a, &b, &c)));
    }
}

#[test]
fn proper_crossings_only() {
    let p = |x, y| Point2::new(x, y);
    assert!(segments_cross(&p(0.0, 0.0), &p(2.0, 2.0), &p(0.0, 2.0), &p(2.0, 0.0)));
    // shared end point
    assert!(!segments_cross(&p(0.0, 0.0), &p(1.0, 1.0), &p(1.0, 1.0), &p(2.0, 0.0)));
    // collinear overlap
    assert!(!segments_cross(&p(0.0, 0.0), &p(2.0, 0.0), &p(1.0, 0.0), &p(3.0, 0.0)));
}

#[test]
fn vertex_contacts() {
    let p = |x, y| Point2::new(x, y);
    assert!(on_segment_interior(&p(1.0, 1.0), &p(0.0, 0.0), &p(2.0, 2.0)));
    assert!(!on_segment_interior(&p(2.0, 2.0), &p(0.0, 0.0), &p(2.0, 2.0)));
    assert!(!on_segment_interior(&p(3.0, 3.0), &p(0.0, 0.0), &p(2.0, 2.0)));
    assert!(!on_segment_interior(&p(1.0, 1.1), &p(0.0, 0.0), &p(2.0, 2.0)));

    // straight chain heading right: left is up
    let (a0, v, a1) = (p(-1.0, 0.0), p(0.0, 0.0), p(1.0, 0.0));
    assert_eq!(side_of_chain(&a0, &v, &a1, &p(0.0, 1.0)), Some(true));
    assert_eq!(side_of_chain(&a0, &v, &a1, &p(0.0, -1.0)), Some(false));
    assert_eq!(side_of_chain(&a0, &v, &a1, &p(2.0, 0.0)), None);

    // right turn: the reflex side is on the left
    let a1 = p(0.0, -1.0);
    assert_eq!(side_of_chain(&a0, &v, &a1, &p(1.0, 1.0)), Some(true));
    assert_eq!(side_of_chain(&a0, &v, &a1, &p(-1.0, -1.0)), Some(false));
}

#[test]
fn square_area_and_containment() {
    let square = [
        Point2::new(0.0, 0.0),
        Point2::new(1.0, 0.0),
        Point2::new(1.0, 1.0),
        Point2::new(0.0, 1.0),
    ];
    assert_eq!(polygon_signed_area(&square), 1.0);
    assert!(point_in_polygon(&Point2::new(0.5, 0.5), &square));
    assert!(!point_in_polygon(&Point2::new(1.5, 0.5), &square));
}
