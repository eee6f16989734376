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
    geometry::{Point2, Polyline, Vector2},
    mapping::{charges::Charges, params::EcmParams},
};

/// Charges closer than this to the evaluation point are ignored.
const MIN_CHARGE_DISTANCE: f64 = 1e-12;

/// Where a migrating vertex ended up on the target arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landing {
    pub point: Point2,
    /// Arc-length parameter of `point` on the target arc.
    pub param: f64,
    /// False when the vertex was clamped instead of reaching the target.
    pub snapped: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Migration {
    /// One landing per migrating vertex, in input order.
    pub landings: Vec<Landing>,
    pub iterations: usize,
    pub unsnapped: usize,
}

fn accumulate(field: &mut Vector2, p: &Point2, sources: &[Point2], q: f64, power: f64) {
    for c in sources {
        let d = c.vector_to(p);
        let r = d.norm();
        if r < MIN_CHARGE_DISTANCE {
            continue;
        }
        *field += d.scale(q / (r * r.powf(power)));
    }
}

/// Coulomb-like field of both charge curves at `p`.
pub fn field_at(p: &Point2, charges: &Charges, params: &EcmParams) -> Vector2 {
    let mut field = Vector2::zero();
    accumulate(&mut field, p, charges.mig.points(), params.mig_q, params.mig_power);
    accumulate(&mut field, p, charges.tar.points(), params.tar_q, params.tar_power);
    field.scale(params.coulomb_k)
}

fn closest(target: &Polyline, p: &Point2, snapped: bool) -> Landing {
    target.project(p).map_or(
        Landing {
            point: *p,
            param: 0.0,
            snapped,
        },
        |pr| Landing {
            point: pr.point,
            param: pr.param,
            snapped,
        },
    )
}

fn snap_near(target: &Polyline, p: &Point2, d: f64) -> Option<Landing> {
    target
        .project(p)
        .filter(|pr| pr.distance <= d)
        .map(|pr| Landing {
            point: pr.point,
            param: pr.param,
            snapped: true,
        })
}

struct Walker {
    position: Point2,
    inside: bool,
    landing: Option<Landing>,
}

/// Moves `start` through the field of `charges` until every vertex lands on the target.
///
/// Each iteration takes one explicit Euler step per live vertex, capped at
/// `max_step`. A step crossing the target lands at the crossing; ending within the
/// convergence distance lands at the closest target point. Leaving the charge
/// region, running out of iterations or stalling clamps the vertex to its closest
/// target point and counts it as unsnapped. A lone vertex gets a temporary charge
/// behind it for the duration of the run.
pub fn migrate(start: &[Point2], normals: &[Vector2], charges: &mut Charges, params: &EcmParams) -> Migration {
    let lone = start.len() == 1 && !normals.is_empty();
    if lone {
        charges.mig.insert_temporary(&start[0], &normals[0]);
    }
    let migration = integrate(start, charges, params);
    if lone {
        charges.mig.remove_temporary();
    }
    migration
}

fn integrate(start: &[Point2], charges: &Charges, params: &EcmParams) -> Migration {
    let target = &charges.target;
    let d = params.convergence_distance;
    let mut walkers: Vec<Walker> = start
        .iter()
        .map(|p| Walker {
            position: *p,
            inside: charges.region.contains(p),
            landing: snap_near(target, p, d),
        })
        .collect();

    let mut iterations = 0;
    while iterations < params.max_iter && walkers.iter().any(|w| w.landing.is_none()) {
        iterations += 1;
        let mut largest = 0.0_f64;
        for w in walkers.iter_mut().filter(|w| w.landing.is_none()) {
            let mut step = field_at(&w.position, charges, params).scale(params.time_step);
            if !step.is_finite() {
                step = Vector2::zero();
            }
            let len = step.norm();
            if len > params.max_step {
                step = step.scale(params.max_step / len);
            }
            largest = largest.max(step.norm());
            let next = w.position + step;

            if let Some((point, param)) = target.first_crossing(&w.position, &next) {
                w.landing = Some(Landing {
                    point,
                    param,
                    snapped: true,
                });
                continue;
            }
            if let Some(landing) = snap_near(target, &next, d) {
                w.landing = Some(landing);
                continue;
            }
            let inside = charges.region.contains(&next);
            if w.inside && !inside {
                w.landing = Some(closest(target, &w.position, false));
                continue;
            }
            w.inside = inside;
            w.position = next;
        }
        if largest < d {
            break;
        }
    }

    let landings: Vec<Landing> = walkers
        .iter()
        .map(|w| w.landing.unwrap_or_else(|| closest(target, &w.position, false)))
        .collect();
    let unsnapped = landings.iter().filter(|l| !l.snapped).count();
    Migration {
        landings,
        iterations,
        unsnapped,
    }
}
