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

use std::cmp::Ordering;

use rug::Rational;

use crate::geometry::Point2;

/// Error bound factor for the floating point 2D orientation determinant.
const ORIENT_ERRBOUND: f64 = (3.0 + 16.0 * f64::EPSILON) * f64::EPSILON;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    CounterClockwise,
    Clockwise,
    Collinear,
}

/// Doubled signed area of the triangle `(a, b, c)`, i.e. `(b - a) x (c - a)`.
///
/// Positive when `c` lies to the left of `a -> b`.
pub fn triangle_area(a: &Point2, b: &Point2, c: &Point2) -> f64 {
    (b - a).cross(&(c - a))
}

/// Returns:
/// - >0 if counter-clockwise
/// - <0 if clockwise
/// - =0 if collinear
///
/// The sign is exact: determinants inside the floating point error bound are
/// re-evaluated with rationals, and then only the sign survives in the result.
pub fn orient2d(a: &Point2, b: &Point2, c: &Point2) -> f64 {
    let left = (b.x - a.x) * (c.y - a.y);
    let right = (b.y - a.y) * (c.x - a.x);
    let det = left - right;
    let bound = ORIENT_ERRBOUND * (left.abs() + right.abs());
    if det.abs() > bound {
        return det;
    }
    match orient2d_exact(a, b, c) {
        Ordering::Greater => f64::MIN_POSITIVE,
        Ordering::Less => -f64::MIN_POSITIVE,
        Ordering::Equal => 0.0,
    }
}

pub fn orientation(a: &Point2, b: &Point2, c: &Point2) -> Orientation {
    let o = orient2d(a, b, c);
    if o > 0.0 {
        Orientation::CounterClockwise
    } else if o < 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}

/// Sign of the orientation determinant evaluated in exact rational arithmetic.
pub fn orient2d_exact(a: &Point2, b: &Point2, c: &Point2) -> Ordering {
    let r = |v: f64| Rational::from_f64(v).unwrap_or_default();
    let (ax, ay) = (r(a.x), r(a.y));
    let bx_ax = r(b.x) - &ax;
    let cy_ay = r(c.y) - &ay;
    let by_ay = r(b.y) - &ay;
    let cx_ax = r(c.x) - &ax;
    let det = bx_ax * cy_ay - by_ay * cx_ax;
    det.cmp0()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ccw_test() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(1.0, 0.0);
        let c = Point2::new(0.0, 1.0);

        assert!(orient2d(&a, &b, &c) > 0.0); // Counter-clockwise
        assert_eq!(orientation(&a, &c, &b), Orientation::Clockwise);
    }

    #[test]
    fn nearly_collinear_resolved_exactly() {
        let a = Point2::new(0.5, 0.5);
        let b = Point2::new(12.0, 12.0);
        let c = Point2::new(24.0, 24.0);
        assert_eq!(orientation(&a, &b, &c), Orientation::Collinear);

        let c_up = Point2::new(24.0, 24.000000000000004);
        assert_eq!(orientation(&a, &b, &c_up), Orientation::CounterClockwise);
    }

    #[test]
    fn triangle_area_is_doubled() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(2.0, 0.0);
        let c = Point2::new(0.0, 2.0);
        assert_eq!(triangle_area(&a, &b, &c), 4.0);
    }
}
