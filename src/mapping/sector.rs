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

use std::collections::HashMap;

use log::{debug, warn};
use serde::Serialize;

use crate::{
    error::MappingError,
    geometry::{Point2, Polyline},
    kernel::{Orientation, orientation, triangle_area},
    mapping::params::EcmParams,
    outline::Outline,
};

/// Which outline of the pair a sector migrates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Side {
    O1,
    O2,
}

/// Matching sub-arcs of two consecutive outlines, bounded by a pair of crossings.
///
/// Bounds are vertex indices into the arenas of the two outlines. A whole-outline
/// sector starts and ends at the same vertex on each side.
#[derive(Debug, Clone)]
pub struct Sector {
    pub id: usize,
    pub start_o1: usize,
    pub end_o1: usize,
    pub start_o2: usize,
    pub end_o2: usize,
    pub length_o1: f64,
    pub length_o2: f64,
    /// Vertices strictly inside the sector on O1 (all vertices for a whole sector).
    pub vert_s_o1: usize,
    pub vert_s_o2: usize,
    pub forward_map: bool,
    pub expansion: bool,
    /// Sign applied to the migrating side's outward normals when offsetting charges.
    pub outer_normal: f64,
    pub whole: bool,
}

/// Per-sector diagnostics of one frame pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectorSummary {
    pub id: usize,
    pub length_o1: f64,
    pub length_o2: f64,
    pub vert_s_o1: usize,
    pub vert_s_o2: usize,
    pub forward_map: bool,
    pub expansion: bool,
    pub whole: bool,
    pub unsnapped: usize,
}

fn outer_normal(expansion: bool, forward_map: bool) -> f64 {
    let sign = if expansion { -1.0 } else { 1.0 };
    if forward_map { sign } else { -sign }
}

fn arc(outline: &Outline, start: usize, end: usize, whole: bool) -> Vec<usize> {
    if whole {
        outline.walk(start, start)
    } else {
        outline.walk(start, end)
    }
}

impl Sector {
    pub fn migrating(&self) -> Side {
        if self.forward_map { Side::O1 } else { Side::O2 }
    }

    /// Vertex indices of the sector on O1, bounds included.
    pub fn path_o1(&self, o1: &Outline) -> Vec<usize> {
        arc(o1, self.start_o1, self.end_o1, self.whole)
    }

    pub fn path_o2(&self, o2: &Outline) -> Vec<usize> {
        arc(o2, self.start_o2, self.end_o2, self.whole)
    }

    /// The sector's arc on `outline` as a polyline, closed for a whole sector.
    pub fn polyline(&self, outline: &Outline, path: &[usize]) -> Polyline {
        Polyline::new(path.iter().map(|&v| outline.position(v)).collect(), self.whole)
    }

    /// Positions in `path` of the vertices that may move: the non-frozen interior of a
    /// bounded sector, every non-frozen vertex of a whole one.
    pub fn movable(&self, outline: &Outline, path: &[usize]) -> Vec<usize> {
        let range = if self.whole {
            0..path.len()
        } else {
            1..path.len().saturating_sub(1)
        };
        range.filter(|&i| !outline.vertex(path[i]).frozen).collect()
    }

    pub fn summary(&self, unsnapped: usize) -> SectorSummary {
        SectorSummary {
            id: self.id,
            length_o1: self.length_o1,
            length_o2: self.length_o2,
            vert_s_o1: self.vert_s_o1,
            vert_s_o2: self.vert_s_o2,
            forward_map: self.forward_map,
            expansion: self.expansion,
            whole: self.whole,
            unsnapped,
        }
    }
}

/// Whether `b` lists the same ids as `a` in the same cyclic order.
fn same_cyclic_order(a: &[usize], b: &[usize]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let Some(shift) = a.first().and_then(|first| b.iter().position(|id| id == first)) else {
        return a.is_empty();
    };
    a.iter()
        .enumerate()
        .all(|(i, id)| b[(i + shift) % b.len()] == *id)
}

/// Local growth test at the first crossing of a sector.
///
/// Falls back to asking whether the middle of the O2 arc lies outside O1 when the
/// three defining points are collinear.
fn local_expansion(o1: &Outline, o2: &Outline, start_o1: usize, start_o2: usize, end_o2: usize) -> bool {
    let s = o1.position(start_o1);
    let a = o1.position(o1.next(start_o1));
    let b = o2.position(o2.next(start_o2));
    match orientation(&s, &a, &b) {
        Orientation::CounterClockwise => true,
        Orientation::Clockwise => false,
        Orientation::Collinear => {
            let path = o2.walk(start_o2, end_o2);
            let arc = Polyline::new(path.iter().map(|&v| o2.position(v)).collect(), false);
            let mid: Point2 = arc.point_at(arc.length() * 0.5);
            !o1.contains(&mid)
        }
    }
}

/// One sector covering both outlines entirely.
///
/// Growth is decided from the enclosed areas. O2 is entered at its vertex closest
/// to the O1 head.
pub fn whole_sector(o1: &Outline, o2: &Outline, params: &EcmParams) -> Sector {
    let head = o1.position(o1.head());
    let start_o2 = o2
        .iter()
        .min_by(|&a, &b| {
            let da = o2.position(a).distance_squared_to(&head);
            let db = o2.position(b).distance_squared_to(&head);
            da.total_cmp(&db)
        })
        .unwrap_or(o2.head());
    let length_o1 = o1.length();
    let length_o2 = o2.length();
    let forward_map = params.forward_map(length_o1, length_o2);
    let expansion = o2.area() > o1.area();
    Sector {
        id: 0,
        start_o1: o1.head(),
        end_o1: o1.head(),
        start_o2,
        end_o2: start_o2,
        length_o1,
        length_o2,
        vert_s_o1: o1.len(),
        vert_s_o2: o2.len(),
        forward_map,
        expansion,
        outer_normal: outer_normal(expansion, forward_map),
        whole: true,
    }
}

/// True when one outline lies inside the other, boundary contacts within
/// `tolerance` allowed.
fn nested(o1: &Outline, o2: &Outline, tolerance: f64) -> bool {
    let (inner, outer) = if o1.area() <= o2.area() { (o1, o2) } else { (o2, o1) };
    let reach = outer.bounds().expanded(tolerance);
    let inner_bounds = inner.bounds();
    if !reach.contains(&inner_bounds.min) || !reach.contains(&inner_bounds.max) {
        return false;
    }
    let boundary = outer.polyline();
    inner
        .positions()
        .iter()
        .all(|p| outer.contains(p) || boundary.distance_to(p) <= tolerance)
}

/// Splits a pair of outlines, already carrying crossing marks, into sectors.
///
/// Crossings are taken in O1 order starting from its head. Uses a single
/// whole-outline sector (and clears the crossing marks) when there are no
/// crossings or when sectors are disabled. Crossings that cannot be paired into
/// sectors (an odd number of them, or a different cyclic order on O2) are a
/// degenerate decomposition, as is a whole-outline sector for outlines that are not
/// nested.
pub fn decompose(o1: &mut Outline, o2: &mut Outline, params: &EcmParams) -> Result<Vec<Sector>, MappingError> {
    let marks_o1: Vec<(usize, usize)> = o1
        .iter()
        .filter_map(|v| o1.vertex(v).intersection.map(|id| (v, id)))
        .collect();
    let ids_o1: Vec<usize> = marks_o1.iter().map(|&(_, id)| id).collect();
    let ids_o2: Vec<usize> = o2.iter().filter_map(|v| o2.vertex(v).intersection).collect();
    let count = marks_o1.len();

    let unpaired = if count % 2 == 1 {
        Some(format!("odd number of crossings ({count})"))
    } else if !same_cyclic_order(&ids_o1, &ids_o2) {
        Some("crossings appear in a different order on the two outlines".to_string())
    } else {
        None
    };
    if let Some(reason) = unpaired {
        o1.clear_marks();
        o2.clear_marks();
        warn!("{reason}");
        return Err(MappingError::Degenerate { reason });
    }

    if params.force_no_sectors || count == 0 {
        if params.force_no_sectors {
            debug!("sectors disabled, mapping whole outlines");
        }
        o1.clear_marks();
        o2.clear_marks();
        if count > 0 || !nested(o1, o2, params.min_edge_length) {
            return Err(MappingError::Degenerate {
                reason: format!("outlines are not nested ({count} crossings), no whole-outline sector"),
            });
        }
        let sector = whole_sector(o1, o2, params);
        debug!(
            "whole sector: L1={:.3} L2={:.3} forward={} expansion={}",
            sector.length_o1, sector.length_o2, sector.forward_map, sector.expansion
        );
        return Ok(vec![sector]);
    }

    let on_o2: HashMap<usize, usize> = o2
        .iter()
        .filter_map(|v| o2.vertex(v).intersection.map(|id| (id, v)))
        .collect();
    let paired = |id: usize| {
        on_o2.get(&id).copied().ok_or_else(|| MappingError::Degenerate {
            reason: format!("crossing {id} has no partner on the second outline"),
        })
    };

    let n = marks_o1.len();
    let mut sectors = Vec::with_capacity(n);
    for i in 0..n {
        let (start_o1, id_start) = marks_o1[i];
        let (end_o1, id_end) = marks_o1[(i + 1) % n];
        let start_o2 = paired(id_start)?;
        let end_o2 = paired(id_end)?;

        let length_o1 = o1.arc_length(start_o1, end_o1);
        let length_o2 = o2.arc_length(start_o2, end_o2);
        let forward_map = params.forward_map(length_o1, length_o2);
        let expansion = local_expansion(o1, o2, start_o1, start_o2, end_o2);
        let sector = Sector {
            id: i,
            start_o1,
            end_o1,
            start_o2,
            end_o2,
            length_o1,
            length_o2,
            vert_s_o1: o1.vertices_between(start_o1, end_o1),
            vert_s_o2: o2.vertices_between(start_o2, end_o2),
            forward_map,
            expansion,
            outer_normal: outer_normal(expansion, forward_map),
            whole: false,
        };
        debug!(
            "sector {}: L1={:.3} L2={:.3} forward={} expansion={} area={:.3e}",
            sector.id,
            sector.length_o1,
            sector.length_o2,
            sector.forward_map,
            sector.expansion,
            triangle_area(
                &o1.position(start_o1),
                &o1.position(o1.next(start_o1)),
                &o2.position(o2.next(start_o2))
            )
        );
        sectors.push(sector);
    }
    Ok(sectors)
}
