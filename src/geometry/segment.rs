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

use crate::geometry::{Aabb, Point2, Vector2};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment2 {
    pub a: Point2,
    pub b: Point2,
}

impl Segment2 {
    pub fn new(a: &Point2, b: &Point2) -> Self {
        Self { a: *a, b: *b }
    }

    pub fn length(&self) -> f64 {
        self.a.distance_to(&self.b)
    }

    pub fn midpoint(&self) -> Point2 {
        self.a.midpoint(&self.b)
    }

    pub fn direction(&self) -> Vector2 {
        self.a.vector_to(&self.b)
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(&self.a, &self.b)
    }

    /// Clamped projection of `p` onto the segment.
    ///
    /// Returns the closest point and its parameter in `[0, 1]` measured from `a`.
    /// A degenerate segment projects everything onto `a`.
    pub fn closest_point(&self, p: &Point2) -> (Point2, f64) {
        let d = self.direction();
        let len2 = d.norm2();
        if len2 == 0.0 {
            return (self.a, 0.0);
        }
        let t = (self.a.vector_to(p).dot(&d) / len2).clamp(0.0, 1.0);
        (self.a.lerp(&self.b, t), t)
    }

    pub fn distance_to_point(&self, p: &Point2) -> f64 {
        self.closest_point(p).0.distance_to(p)
    }

    pub fn is_point_on(&self, p: &Point2, eps: f64) -> bool {
        self.distance_to_point(p) <= eps
    }
}
