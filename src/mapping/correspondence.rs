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
    geometry::{Point2, Polyline, util::{EPS, lerp}},
    mapping::solver::Landing,
    outline::Outline,
};

fn argmin(values: impl Iterator<Item = f64>) -> usize {
    values
        .enumerate()
        .fold((0, f64::INFINITY), |best, (i, v)| if v < best.1 { (i, v) } else { best })
        .0
}

/// Makes landing parameters non-decreasing in migration order.
///
/// Open arcs are clamped to `[0, length]` and raised to a running maximum. Closed
/// arcs run once around from the smallest parameter.
pub fn enforce_monotone(params: &mut [f64], length: f64, closed: bool) {
    if params.is_empty() {
        return;
    }
    if !closed {
        let mut floor = 0.0_f64;
        for s in params.iter_mut() {
            *s = s.clamp(0.0, length).max(floor);
            floor = *s;
        }
        return;
    }
    let n = params.len();
    let k = argmin(params.iter().copied());
    let mut floor = params[k];
    for i in 1..n {
        let j = (k + i) % n;
        if params[j] < floor {
            params[j] = floor;
        } else {
            floor = params[j];
        }
    }
}

/// Arc-length map from the O1 sector arc onto the O2 sector arc.
///
/// Built from O2 vertices that migrated onto O1: each landing pairs its O1 parameter
/// with the vertex's own parameter on O2. Queries interpolate linearly in between.
#[derive(Debug, Clone)]
pub struct ArcMap {
    source: Vec<f64>,
    target: Vec<f64>,
    source_length: f64,
    target_length: f64,
    closed: bool,
}

impl ArcMap {
    /// `pairs` are `(O1 param, O2 param)` in O2 order.
    pub fn new(mut pairs: Vec<(f64, f64)>, source_length: f64, target_length: f64, closed: bool) -> Self {
        if closed {
            if pairs.is_empty() {
                pairs.push((0.0, 0.0));
            }
            let k = argmin(pairs.iter().map(|p| p.0));
            pairs.rotate_left(k);
            let mut floor = pairs[0].0;
            let mut last_u = pairs[0].1;
            let mut turns = 0.0;
            for pair in pairs.iter_mut().skip(1) {
                pair.0 = pair.0.max(floor);
                floor = pair.0;
                let mut u = pair.1 + turns;
                if u < last_u {
                    turns += target_length;
                    u += target_length;
                }
                pair.1 = u;
                last_u = u;
            }
            let (s0, u0) = pairs[0];
            pairs.push((s0 + source_length, u0 + target_length));
        } else {
            let mut floor = 0.0_f64;
            for pair in pairs.iter_mut() {
                pair.0 = pair.0.clamp(0.0, source_length).max(floor);
                floor = pair.0;
            }
            pairs.insert(0, (0.0, 0.0));
            pairs.push((source_length, target_length));
        }
        let (source, target) = pairs.into_iter().unzip();
        Self {
            source,
            target,
            source_length,
            target_length,
            closed,
        }
    }

    pub fn map(&self, s: f64) -> f64 {
        let s = if self.closed {
            let s = s.rem_euclid(self.source_length.max(EPS));
            if s < self.source[0] { s + self.source_length } else { s }
        } else {
            s.clamp(0.0, self.source_length)
        };
        let last = self.source.len() - 1;
        let i = self.source.partition_point(|&x| x <= s);
        let (a, b) = match i {
            0 => (0, 0),
            i if i > last => (last, last),
            i => (i - 1, i),
        };
        let span = self.source[b] - self.source[a];
        let u = if span > EPS {
            lerp(self.target[a], self.target[b], (s - self.source[a]) / span)
        } else {
            self.target[a]
        };
        if self.closed {
            u.rem_euclid(self.target_length.max(EPS))
        } else {
            u.clamp(0.0, self.target_length)
        }
    }
}

/// Moves `v` to `to`, recording the displacement along its outward normal.
fn move_vertex(outline: &mut Outline, v: usize, to: Point2) {
    let vertex = outline.vertex_mut(v);
    vertex.distance = vertex.position.vector_to(&to).dot(&vertex.normal);
    vertex.position = to;
}

/// Writes forward-migrated O1 vertices back, in order, onto the target arc.
pub fn place_forward(o1: &mut Outline, vertices: &[usize], target: &Polyline, landings: &[Landing]) {
    let mut params: Vec<f64> = landings.iter().map(|l| l.param).collect();
    enforce_monotone(&mut params, target.length(), target.is_closed());
    for (&v, s) in vertices.iter().zip(params) {
        move_vertex(o1, v, target.point_at(s));
    }
}

/// Moves O1 vertices, given with their O1 arc parameter, to their image on the O2 arc.
pub fn place_backward(o1: &mut Outline, vertices: &[(usize, f64)], map: &ArcMap, o2_arc: &Polyline) {
    for &(v, s) in vertices {
        move_vertex(o1, v, o2_arc.point_at(map.map(s)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::util::approx_eq;

    #[test]
    fn open_params_become_monotone() {
        let mut params = vec![0.1, 0.5, 0.3, 0.7, 2.0];
        enforce_monotone(&mut params, 1.0, false);
        assert_eq!(params, vec![0.1, 0.5, 0.5, 0.7, 1.0]);
    }

    #[test]
    fn closed_params_wrap_once() {
        let mut params = vec![0.8, 0.9, 0.1, 0.3];
        enforce_monotone(&mut params, 1.0, true);
        assert_eq!(params, vec![0.8, 0.9, 0.1, 0.3]);

        let mut params = vec![0.8, 0.1, 0.2, 0.15, 0.3];
        enforce_monotone(&mut params, 1.0, true);
        assert_eq!(params, vec![0.8, 0.1, 0.2, 0.2, 0.3]);
    }

    #[test]
    fn open_map_interpolates_between_bounds() {
        let map = ArcMap::new(vec![(1.0, 2.0)], 2.0, 4.0, false);
        assert!(approx_eq(map.map(0.5), 1.0, 1e-12));
        assert!(approx_eq(map.map(1.5), 3.0, 1e-12));
        assert_eq!(map.map(5.0), 4.0);
    }

    #[test]
    fn closed_map_unwraps() {
        // O2 starts half a turn away from O1.
        let pairs = vec![(2.0, 0.0), (3.0, 1.0), (0.0, 2.0), (1.0, 3.0)];
        let map = ArcMap::new(pairs, 4.0, 4.0, true);
        assert!(approx_eq(map.map(0.5), 2.5, 1e-12));
        assert!(approx_eq(map.map(2.5), 0.5, 1e-12));
        assert!(approx_eq(map.map(3.5), 1.5, 1e-12));
    }
}
