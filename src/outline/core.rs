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

use crate::{
    error::OutlineError,
    geometry::{
        Aabb, Point2, Polyline, Vector2,
        util::{EPS, lerp, wrap_unit},
    },
    kernel::{point_in_polygon, polygon_signed_area},
    outline::vertex::Vertex,
};

/// Coordinate dips smaller than this are not counted as order violations.
const COORD_TOLERANCE: f64 = 1e-9;

/// A closed polygon stored as a circular doubly-linked list inside a vertex arena.
///
/// Vertices are addressed by arena index. Removing a vertex only unlinks it, so
/// indices held by callers stay valid (and point at a `removed` vertex) until
/// [`Outline::compact`] rebuilds the arena.
#[derive(Debug, Clone)]
pub struct Outline {
    pub(crate) vertices: Vec<Vertex>,
    head: usize,
    count: usize,
    next_tracking: u64,
}

/// Walks vertex indices along `next` links, visiting each live vertex once.
pub struct OutlineIter<'a> {
    outline: &'a Outline,
    current: usize,
    remaining: usize,
}

impl Iterator for OutlineIter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let v = self.current;
        self.current = self.outline.vertices[v].next;
        self.remaining -= 1;
        Some(v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl Outline {
    /// Builds a clockwise outline, tracking ids starting at zero.
    pub fn from_points(points: &[Point2]) -> Result<Self, OutlineError> {
        Self::from_points_tracked(points, 0)
    }

    /// Builds a clockwise outline whose tracking ids start at `first_tracking`.
    ///
    /// Consecutive duplicates are dropped and anticlockwise input is reversed.
    pub fn from_points_tracked(points: &[Point2], first_tracking: u64) -> Result<Self, OutlineError> {
        let mut pts: Vec<Point2> = Vec::with_capacity(points.len());
        for (index, p) in points.iter().enumerate() {
            if !p.is_finite() {
                return Err(OutlineError::NonFiniteCoordinate { index });
            }
            if pts.last().is_some_and(|q| q.distance_to(p) <= EPS) {
                continue;
            }
            pts.push(*p);
        }
        while pts.len() > 1 && pts[0].distance_to(&pts[pts.len() - 1]) <= EPS {
            pts.pop();
        }
        if pts.len() < 3 {
            return Err(OutlineError::TooFewVertices { count: pts.len() });
        }
        if polygon_signed_area(&pts) > 0.0 {
            pts.reverse();
        }

        let n = pts.len();
        let vertices = pts
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let mut v = Vertex::new(*p, first_tracking + i as u64);
                v.next = (i + 1) % n;
                v.prev = (i + n - 1) % n;
                v
            })
            .collect();

        let mut outline = Outline {
            vertices,
            head: 0,
            count: n,
            next_tracking: first_tracking + n as u64,
        };
        outline.update_normals();
        outline.update_coordinates();
        Ok(outline)
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn head(&self) -> usize {
        self.head
    }

    pub fn is_head(&self, v: usize) -> bool {
        v == self.head
    }

    pub fn set_head(&mut self, v: usize) -> Result<(), OutlineError> {
        self.check(v)?;
        self.head = v;
        Ok(())
    }

    fn check(&self, v: usize) -> Result<(), OutlineError> {
        match self.vertices.get(v) {
            Some(vertex) if !vertex.removed => Ok(()),
            _ => Err(OutlineError::InvalidVertex(v)),
        }
    }

    pub fn vertex(&self, v: usize) -> &Vertex {
        &self.vertices[v]
    }

    pub fn vertex_mut(&mut self, v: usize) -> &mut Vertex {
        &mut self.vertices[v]
    }

    pub fn next(&self, v: usize) -> usize {
        self.vertices[v].next
    }

    pub fn prev(&self, v: usize) -> usize {
        self.vertices[v].prev
    }

    pub fn position(&self, v: usize) -> Point2 {
        self.vertices[v].position
    }

    /// Next id handed to an inserted vertex; larger than every id in the outline.
    pub fn next_tracking(&self) -> u64 {
        self.next_tracking
    }

    pub fn iter(&self) -> OutlineIter<'_> {
        self.iter_from(self.head)
    }

    pub fn iter_from(&self, start: usize) -> OutlineIter<'_> {
        OutlineIter {
            outline: self,
            current: start,
            remaining: self.count,
        }
    }

    pub fn positions(&self) -> Vec<Point2> {
        self.iter().map(|v| self.vertices[v].position).collect()
    }

    /// Inserts a new vertex between `v` and its successor.
    ///
    /// The new vertex gets a fresh tracking id, a coordinate interpolated from its
    /// neighbours and the mean of their normals.
    pub fn insert_after(&mut self, v: usize, position: Point2) -> usize {
        debug_assert!(self.check(v).is_ok());
        let n = self.vertices[v].next;
        let a = self.vertices[v].position;
        let b = self.vertices[n].position;

        let c0 = self.vertices[v].coord;
        let mut c1 = self.vertices[n].coord;
        // only the seam between 1 and 0 wraps
        if c0 - c1 > 0.5 {
            c1 += 1.0;
        }
        let span = a.distance_to(&b);
        let t = if span > 0.0 {
            (a.distance_to(&position) / span).clamp(0.0, 1.0)
        } else {
            0.5
        };

        let mut vertex = Vertex::new(position, self.next_tracking);
        self.next_tracking += 1;
        vertex.coord = wrap_unit(lerp(c0, c1, t));
        vertex.normal = (self.vertices[v].normal + self.vertices[n].normal).normalized();
        vertex.prev = v;
        vertex.next = n;

        let idx = self.vertices.len();
        self.vertices.push(vertex);
        self.vertices[v].next = idx;
        self.vertices[n].prev = idx;
        self.count += 1;
        idx
    }

    /// Unlinks `v`. The head moves to the successor when `v` was the head.
    ///
    /// Fails instead of leaving fewer than three vertices.
    pub fn remove(&mut self, v: usize) -> Result<(), OutlineError> {
        self.check(v)?;
        if self.count <= 3 {
            return Err(OutlineError::TooFewVertices {
                count: self.count - 1,
            });
        }
        let (p, n) = (self.vertices[v].prev, self.vertices[v].next);
        self.vertices[p].next = n;
        self.vertices[n].prev = p;
        let vertex = &mut self.vertices[v];
        vertex.removed = true;
        vertex.next = usize::MAX;
        vertex.prev = usize::MAX;
        if self.head == v {
            self.head = n;
        }
        self.count -= 1;
        Ok(())
    }

    /// Length of the edge leaving `v`.
    pub fn edge_length(&self, v: usize) -> f64 {
        let n = self.vertices[v].next;
        self.vertices[v].position.distance_to(&self.vertices[n].position)
    }

    pub fn length(&self) -> f64 {
        self.iter().map(|v| self.edge_length(v)).sum()
    }

    /// Vertices from `from` to `to` inclusive, following `next`.
    ///
    /// `from == to` yields the whole loop starting at `from` (without repeating it).
    pub fn walk(&self, from: usize, to: usize) -> Vec<usize> {
        let mut out = Vec::new();
        let mut v = from;
        for _ in 0..self.count {
            out.push(v);
            if v == to && out.len() > 1 {
                break;
            }
            v = self.vertices[v].next;
            if v == from {
                break;
            }
        }
        out
    }

    /// Arc length walking forward from `from` to `to`.
    pub fn arc_length(&self, from: usize, to: usize) -> f64 {
        if from == to {
            return 0.0;
        }
        let path = self.walk(from, to);
        path.windows(2)
            .map(|w| self.vertices[w[0]].position.distance_to(&self.vertices[w[1]].position))
            .sum()
    }

    /// Number of vertices strictly between `from` and `to` walking forward.
    pub fn vertices_between(&self, from: usize, to: usize) -> usize {
        if from == to {
            return self.count.saturating_sub(1);
        }
        self.walk(from, to).len().saturating_sub(2)
    }

    /// Shoelace area, negative for the clockwise outlines this crate keeps.
    pub fn signed_area(&self) -> f64 {
        polygon_signed_area(&self.positions())
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    pub fn is_clockwise(&self) -> bool {
        self.signed_area() < 0.0
    }

    /// Recomputes outward unit normals from the two edges meeting at each vertex.
    pub fn update_normals(&mut self) {
        let outward = if self.is_clockwise() { 1.0 } else { -1.0 };
        let live: Vec<usize> = self.iter().collect();
        for v in live {
            let p = self.vertices[self.vertices[v].prev].position;
            let c = self.vertices[v].position;
            let n = self.vertices[self.vertices[v].next].position;
            let e0 = p.vector_to(&c).normalized();
            let e1 = c.vector_to(&n).normalized();
            let mut normal = (e0 + e1).perp_left().normalized();
            if normal == Vector2::zero() {
                normal = e1.perp_left();
            }
            self.vertices[v].normal = normal.scale(outward);
        }
    }

    /// Sets every `coord` to its normalised arc position from the head.
    pub fn update_coordinates(&mut self) {
        let total = self.length();
        let live: Vec<usize> = self.iter().collect();
        let mut acc = 0.0;
        for v in live {
            self.vertices[v].coord = if total > 0.0 { acc / total } else { 0.0 };
            acc += self.edge_length(v);
        }
    }

    /// Coordinate-validity check: enough vertices, finite positions, and tracking
    /// coordinates that still run once around the outline.
    pub fn check_coordinates(&self) -> Result<(), OutlineError> {
        if self.count < 3 {
            return Err(OutlineError::TooFewVertices { count: self.count });
        }
        let live: Vec<usize> = self.iter().collect();
        for &v in &live {
            let vertex = &self.vertices[v];
            if !vertex.position.is_finite() || !vertex.coord.is_finite() {
                return Err(OutlineError::NonFiniteCoordinate { index: v });
            }
        }
        let n = live.len();
        let descents = (0..n)
            .filter(|&i| {
                let a = self.vertices[live[i]].coord;
                let b = self.vertices[live[(i + 1) % n]].coord;
                b < a - COORD_TOLERANCE
            })
            .count();
        if descents > 1 {
            return Err(OutlineError::CoordinateOrder { descents });
        }
        Ok(())
    }

    pub fn bounds(&self) -> Aabb {
        let pts = self.positions();
        Aabb::enclosing(pts.iter()).unwrap_or(Aabb::new(Point2::default(), Point2::default()))
    }

    pub fn contains(&self, p: &Point2) -> bool {
        point_in_polygon(p, &self.positions())
    }

    /// Area centroid; falls back to the vertex mean for a zero-area outline.
    pub fn centroid(&self) -> Point2 {
        let pts = self.positions();
        let a = polygon_signed_area(&pts);
        let n = pts.len();
        if a.abs() <= EPS {
            let (sx, sy) = pts.iter().fold((0.0, 0.0), |(x, y), p| (x + p.x, y + p.y));
            return Point2::new(sx / n as f64, sy / n as f64);
        }
        let (mut cx, mut cy) = (0.0, 0.0);
        for i in 0..n {
            let p = &pts[i];
            let q = &pts[(i + 1) % n];
            let f = p.x * q.y - q.x * p.y;
            cx += (p.x + q.x) * f;
            cy += (p.y + q.y) * f;
        }
        Point2::new(cx / (6.0 * a), cy / (6.0 * a))
    }

    /// Closed polyline through the vertices, starting at the head.
    pub fn polyline(&self) -> Polyline {
        Polyline::new(self.positions(), true)
    }

    /// Drops the crossing marks of every vertex.
    pub fn clear_marks(&mut self) {
        for v in self.vertices.iter_mut() {
            v.clear_marks();
        }
    }

    /// Rebuilds the arena without removed vertices; the head becomes index 0.
    pub fn compact(&self) -> Outline {
        let order: Vec<usize> = self.iter().collect();
        let n = order.len();
        let vertices = order
            .iter()
            .enumerate()
            .map(|(i, &old)| {
                let mut v = self.vertices[old].clone();
                v.next = (i + 1) % n;
                v.prev = (i + n - 1) % n;
                v
            })
            .collect();
        Outline {
            vertices,
            head: 0,
            count: n,
            next_tracking: self.next_tracking,
        }
    }
}
