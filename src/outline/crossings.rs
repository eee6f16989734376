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

use log::debug;

use crate::{
    geometry::{Aabb, Point2},
    kernel::{crossing_point, on_segment_interior, orient2d, segments_cross, side_of_chain},
    outline::Outline,
};

/// Where a crossing sits on one of the two outlines.
#[derive(Debug, Clone, Copy)]
enum Site {
    /// Inside the edge starting at `edge`, at parameter `t`.
    Edge { edge: usize, t: f64 },
    /// On an existing vertex.
    Vertex(usize),
}

/// One crossing between the first and the second outline.
#[derive(Debug, Clone, Copy)]
struct Crossing {
    a: Site,
    b: Site,
    point: Point2,
}

fn edge_param(a: &Point2, b: &Point2, p: &Point2) -> f64 {
    let d = a.vector_to(b);
    let len2 = d.norm2();
    if len2 == 0.0 {
        0.0
    } else {
        (a.vector_to(p).dot(&d) / len2).clamp(0.0, 1.0)
    }
}

fn edges(outline: &Outline) -> Vec<(usize, Aabb)> {
    outline
        .iter()
        .map(|v| (v, Aabb::from_points(&outline.position(v), &outline.position(outline.next(v)))))
        .collect()
}

/// Vertices of `outline` lying inside an edge of `other`, with their neighbours on
/// opposite sides of that edge. Returns `(vertex, edge of other, t on that edge)`.
fn vertices_through_edges(outline: &Outline, other: &Outline, other_edges: &[(usize, Aabb)]) -> Vec<(usize, usize, f64)> {
    let mut found = Vec::new();
    for v in outline.iter() {
        let p = outline.position(v);
        let before = outline.position(outline.prev(v));
        let after = outline.position(outline.next(v));
        let bb = Aabb::from_points(&p, &p);
        for (e, bb_e) in other_edges {
            if !bb.intersects(bb_e) {
                continue;
            }
            let (q1, q2) = (other.position(*e), other.position(other.next(*e)));
            if !on_segment_interior(&p, &q1, &q2) {
                continue;
            }
            let (s0, s1) = (orient2d(&q1, &q2, &before), orient2d(&q1, &q2, &after));
            if s0 != 0.0 && s1 != 0.0 && (s0 > 0.0) != (s1 > 0.0) {
                found.push((v, *e, edge_param(&q1, &q2, &p)));
            }
        }
    }
    found
}

/// Finds where `a` and `b` cross and marks every crossing on both outlines.
///
/// Proper edge crossings get a new vertex on each outline. A crossing passing
/// exactly through a vertex reuses that vertex. Touching contacts are ignored.
/// Paired vertices share an intersection id, and are marked `intersect` and
/// `frozen`. Returns the number of crossings.
pub fn mark_intersections(a: &mut Outline, b: &mut Outline) -> usize {
    let edges_a = edges(a);
    let edges_b = edges(b);

    let mut crossings = Vec::new();
    for (va, bb) in &edges_a {
        let (p1, p2) = (a.position(*va), a.position(a.next(*va)));
        for (vb, bb_b) in &edges_b {
            if !bb.intersects(bb_b) {
                continue;
            }
            let (q1, q2) = (b.position(*vb), b.position(b.next(*vb)));
            if !segments_cross(&p1, &p2, &q1, &q2) {
                continue;
            }
            let point = crossing_point(&p1, &p2, &q1, &q2);
            crossings.push(Crossing {
                a: Site::Edge {
                    edge: *va,
                    t: edge_param(&p1, &p2, &point),
                },
                b: Site::Edge {
                    edge: *vb,
                    t: edge_param(&q1, &q2, &point),
                },
                point,
            });
        }
    }

    for (va, eb, t) in vertices_through_edges(a, b, &edges_b) {
        crossings.push(Crossing {
            a: Site::Vertex(va),
            b: Site::Edge { edge: eb, t },
            point: a.position(va),
        });
    }
    for (vb, ea, t) in vertices_through_edges(b, a, &edges_a) {
        crossings.push(Crossing {
            a: Site::Edge { edge: ea, t },
            b: Site::Vertex(vb),
            point: b.position(vb),
        });
    }

    for va in a.iter() {
        let p = a.position(va);
        let Some(vb) = b.iter().find(|&vb| b.position(vb) == p) else {
            continue;
        };
        let (a0, a1) = (a.position(a.prev(va)), a.position(a.next(va)));
        let before = side_of_chain(&a0, &p, &a1, &b.position(b.prev(vb)));
        let after = side_of_chain(&a0, &p, &a1, &b.position(b.next(vb)));
        if matches!((before, after), (Some(x), Some(y)) if x != y) {
            crossings.push(Crossing {
                a: Site::Vertex(va),
                b: Site::Vertex(vb),
                point: p,
            });
        }
    }

    insert_sorted(a, &crossings, |c| c.a);
    insert_sorted(b, &crossings, |c| c.b);
    debug!("marked {} outline crossings", crossings.len());
    crossings.len()
}

fn mark(outline: &mut Outline, v: usize, id: usize) {
    let vertex = outline.vertex_mut(v);
    vertex.intersect = true;
    vertex.intersection = Some(id);
    vertex.frozen = true;
}

/// Marks vertex sites in place, then inserts edge sites edge by edge in increasing
/// order along each edge.
fn insert_sorted<F>(outline: &mut Outline, crossings: &[Crossing], site: F)
where
    F: Fn(&Crossing) -> Site,
{
    let mut on_edges = Vec::new();
    for (id, crossing) in crossings.iter().enumerate() {
        match site(crossing) {
            Site::Vertex(v) => mark(outline, v, id),
            Site::Edge { edge, t } => on_edges.push((edge, t, id)),
        }
    }
    on_edges.sort_by(|x, y| x.0.cmp(&y.0).then(x.1.total_cmp(&y.1)));

    let mut last_edge = usize::MAX;
    let mut anchor = usize::MAX;
    for (edge, _, id) in on_edges {
        if edge != last_edge {
            last_edge = edge;
            anchor = edge;
        }
        let v = outline.insert_after(anchor, crossings[id].point);
        mark(outline, v, id);
        anchor = v;
    }
}
