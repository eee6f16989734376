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

use log::{debug, warn};

use crate::{
    error::OutlineError,
    geometry::{Aabb, Point2},
    kernel::{crossing_point, segments_cross},
    outline::Outline,
    outline_processing::density::{DensityReport, correct_density},
};

#[derive(Debug, Clone)]
pub struct RepairOptions {
    /// Edges shorter than this are collapsed.
    pub min_edge_length: f64,
    /// Target vertex spacing; `None` skips density correction.
    pub spacing: Option<f64>,
}

impl RepairOptions {
    pub fn new(spacing: f64) -> Self {
        Self {
            min_edge_length: spacing * 1e-3,
            spacing: Some(spacing),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepairReport {
    pub nano_edges: usize,
    pub intersections_cut: usize,
    pub density: DensityReport,
}

/// Collapses every edge shorter than `eps` into its midpoint, keeping the older vertex.
///
/// A triangle is left as it is.
pub fn remove_nano_edges(outline: &mut Outline, eps: f64) -> Result<usize, OutlineError> {
    let mut merged = 0;
    loop {
        let mut changed = false;
        let live: Vec<usize> = outline.iter().collect();
        for v in live {
            if outline.len() <= 3 {
                break;
            }
            if outline.vertex(v).removed || outline.edge_length(v) >= eps {
                continue;
            }
            let n = outline.next(v);
            let (keep, gone) = if outline.vertex(n).tracking < outline.vertex(v).tracking {
                (n, v)
            } else {
                (v, n)
            };
            let mid = outline.position(v).midpoint(&outline.position(n));
            outline.remove(gone)?;
            outline.vertex_mut(keep).position = mid;
            merged += 1;
            changed = true;
        }
        if !changed {
            break;
        }
    }
    Ok(merged)
}

/// First pair of non-adjacent crossing edges, as the start vertices of both edges
/// in head order.
fn find_crossing(outline: &Outline) -> Option<(usize, usize)> {
    let edges: Vec<(usize, Point2, Point2, Aabb)> = outline
        .iter()
        .map(|v| {
            let a = outline.position(v);
            let b = outline.position(outline.next(v));
            (v, a, b, Aabb::from_points(&a, &b))
        })
        .collect();
    let n = edges.len();
    for i in 0..n {
        for j in (i + 2)..n {
            if i == 0 && j == n - 1 {
                continue;
            }
            let (vi, p1, p2, bi) = &edges[i];
            let (vj, q1, q2, bj) = &edges[j];
            if bi.intersects(bj) && segments_cross(p1, p2, q1, q2) {
                return Some((*vi, *vj));
            }
        }
    }
    None
}

/// Removes self-intersections by cutting out the smaller loop at each crossing.
///
/// The crossing point replaces the removed loop. Returns the number of cuts.
pub fn cut_self_intersections(outline: &mut Outline) -> Result<usize, OutlineError> {
    let mut cuts = 0;
    while let Some((a, b)) = find_crossing(outline) {
        let a_next = outline.next(a);
        let b_next = outline.next(b);
        let p = crossing_point(
            &outline.position(a),
            &outline.position(a_next),
            &outline.position(b),
            &outline.position(b_next),
        );

        let inner = outline.walk(a_next, b);
        let outer = outline.walk(b_next, a);
        if inner.len() <= outer.len() {
            outline.insert_after(a, p);
            for v in inner {
                outline.remove(v)?;
            }
        } else {
            outline.insert_after(b, p);
            for v in outer {
                outline.remove(v)?;
            }
        }
        cuts += 1;
        debug!("cut self-intersection at ({:.3}, {:.3})", p.x, p.y);
    }
    Ok(cuts)
}

/// Full repair pass: nano edges, self-intersections, then density.
pub fn repair(outline: &mut Outline, options: &RepairOptions) -> Result<RepairReport, OutlineError> {
    let mut report = RepairReport {
        nano_edges: remove_nano_edges(outline, options.min_edge_length)?,
        ..RepairReport::default()
    };
    report.intersections_cut = cut_self_intersections(outline)?;
    if report.intersections_cut > 0 {
        warn!(
            "removed {} self-intersection(s) from migrated outline",
            report.intersections_cut
        );
    }
    if let Some(spacing) = options.spacing {
        report.density = correct_density(outline, spacing)?;
        // merging short edges can leave new nano edges behind corners
        report.nano_edges += remove_nano_edges(outline, options.min_edge_length)?;
    }
    outline.update_normals();
    Ok(report)
}
