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
    kernel::point_in_polygon,
    mapping::{params::EcmParams, sector::Sector},
};

/// Point charges laid along a sector arc.
#[derive(Debug, Clone)]
pub struct ChargeCurve {
    points: Vec<Point2>,
    closed: bool,
    /// Signed distance charges are pushed along the supplied normals.
    shift: f64,
    temporary: Option<usize>,
}

impl ChargeCurve {
    /// Charges sitting exactly on `points`.
    pub fn new(points: Vec<Point2>, closed: bool) -> Self {
        Self {
            points,
            closed,
            shift: 0.0,
            temporary: None,
        }
    }

    /// Charges at `points`, each moved `shift` along its normal.
    pub fn offset(points: &[Point2], normals: &[Vector2], shift: f64, closed: bool) -> Self {
        let points = points
            .iter()
            .zip(normals)
            .map(|(p, n)| p.add_vector(&n.scale(shift)))
            .collect();
        Self {
            points,
            closed,
            shift,
            temporary: None,
        }
    }

    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Replaces the charges by evenly spaced ones along the same curve.
    pub fn resample(&mut self, spacing: f64) {
        self.remove_temporary();
        self.points = Polyline::new(std::mem::take(&mut self.points), self.closed).resample(spacing);
    }

    /// Adds one charge behind `p`, on the closest segment of the curve.
    ///
    /// The charge is offset from `p` along `normal` the same way the curve was built.
    /// Any previous temporary charge is dropped first.
    pub fn insert_temporary(&mut self, p: &Point2, normal: &Vector2) -> Point2 {
        self.remove_temporary();
        let charge = p.add_vector(&normal.scale(self.shift));
        let at = Polyline::new(self.points.clone(), self.closed)
            .project(&charge)
            .map_or(self.points.len(), |pr| pr.segment + 1);
        self.points.insert(at, charge);
        self.temporary = Some(at);
        charge
    }

    pub fn remove_temporary(&mut self) -> Option<Point2> {
        self.temporary.take().map(|i| self.points.remove(i))
    }
}

/// Where a migrating vertex is allowed to be.
#[derive(Debug, Clone)]
pub enum ChargeRegion {
    /// Polygon closed by the migrating charges and the target arc.
    Lens(Vec<Point2>),
    /// Ring between two closed curves, for whole-outline sectors.
    Annulus { inner: Vec<Point2>, outer: Vec<Point2> },
}

impl ChargeRegion {
    pub fn contains(&self, p: &Point2) -> bool {
        match self {
            ChargeRegion::Lens(polygon) => point_in_polygon(p, polygon),
            ChargeRegion::Annulus { inner, outer } => {
                point_in_polygon(p, outer) && !point_in_polygon(p, inner)
            }
        }
    }
}

/// Everything the solver needs for one sector.
#[derive(Debug, Clone)]
pub struct Charges {
    pub mig: ChargeCurve,
    pub tar: ChargeCurve,
    pub region: ChargeRegion,
    /// Arc the migrating vertices land on.
    pub target: Polyline,
}

impl Charges {
    /// Builds both charge curves for `sector`.
    ///
    /// `mig_points`/`mig_normals` describe the migrating arc, bounds included.
    pub fn build(
        sector: &Sector,
        mig_points: &[Point2],
        mig_normals: &[Vector2],
        target: Polyline,
        params: &EcmParams,
    ) -> Self {
        let closed = sector.whole;
        let mut mig = ChargeCurve::offset(
            mig_points,
            mig_normals,
            sector.outer_normal * params.charge_offset,
            closed,
        );
        let mut tar = ChargeCurve::new(target.points().to_vec(), closed);
        if let Some(spacing) = params.charge_density {
            mig.resample(spacing);
            tar.resample(spacing);
        }

        let region = if closed {
            let mig_inner = sector.forward_map == sector.expansion;
            let (inner, outer) = if mig_inner {
                (mig.points().to_vec(), target.points().to_vec())
            } else {
                (target.points().to_vec(), mig.points().to_vec())
            };
            ChargeRegion::Annulus { inner, outer }
        } else {
            let mut lens = mig.points().to_vec();
            lens.extend(target.points().iter().rev());
            ChargeRegion::Lens(lens)
        };

        Self {
            mig,
            tar,
            region,
            target,
        }
    }
}
