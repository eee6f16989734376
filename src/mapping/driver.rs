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

use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info, warn};

use crate::{
    error::MappingError,
    geometry::{Point2, Vector2},
    mapping::{
        charges::Charges,
        correspondence::{ArcMap, place_backward, place_forward},
        handler::OutlineHandler,
        params::EcmParams,
        sector::{Sector, SectorSummary, Side, decompose},
        solver::{Migration, migrate},
    },
    outline::{Outline, mark_intersections},
    outline_processing::{RepairReport, correct_density, repair},
};

/// Result of mapping one outline onto its successor.
#[derive(Debug, Clone)]
pub struct FramePair {
    /// Frame of the target outline.
    pub frame: usize,
    /// The previous outline moved onto the target, carrying its tracking ids.
    pub outline: Outline,
    pub sectors: Vec<SectorSummary>,
    pub crossings: usize,
    pub unsnapped: usize,
    pub repair: RepairReport,
}

#[derive(Debug)]
pub struct FrameFailure {
    pub frame: usize,
    pub error: MappingError,
}

/// Outcome of a whole run. Frames in `saved_frames` were handed to the handler.
#[derive(Debug, Default)]
pub struct RunReport {
    pub saved_frames: Vec<usize>,
    pub unsnapped: usize,
    pub intersections_cut: usize,
    pub failure: Option<FrameFailure>,
    pub cancelled: bool,
}

impl RunReport {
    pub fn is_complete(&self) -> bool {
        self.failure.is_none() && !self.cancelled
    }
}

/// Maps a tracked cell's outlines frame after frame.
pub struct Tracker<'a> {
    params: &'a EcmParams,
    cancel: Option<&'a AtomicBool>,
}

impl<'a> Tracker<'a> {
    pub fn new(params: &'a EcmParams) -> Result<Self, MappingError> {
        params.validate()?;
        Ok(Self {
            params,
            cancel: None,
        })
    }

    /// Stops the run before the next frame once `flag` is set.
    pub fn with_cancel(mut self, flag: &'a AtomicBool) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn params(&self) -> &EcmParams {
        self.params
    }

    fn cancelled(&self) -> bool {
        self.cancel.is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    /// Brings the first outline of a run to the working vertex density.
    pub fn prepare(&self, outline: &mut Outline) -> Result<(), MappingError> {
        if !self.params.disable_density_correction {
            correct_density(outline, self.params.marker_res)?;
        }
        outline.update_normals();
        Ok(())
    }

    /// Runs over every frame of `handler`, saving each mapped outline as it goes.
    ///
    /// Frame-local failures end the run early and are reported in
    /// [`RunReport::failure`]; handler failures are returned as errors.
    pub fn run<H: OutlineHandler + ?Sized>(&self, handler: &mut H) -> Result<RunReport, MappingError> {
        let frames = handler.frame_range();
        let mut report = RunReport::default();
        if frames.is_empty() {
            return Ok(report);
        }

        let first = frames.start;
        let mut current = match handler.get(first).and_then(|mut o| {
            self.prepare(&mut o)?;
            Ok(o)
        }) {
            Ok(outline) => outline,
            Err(error) if error.is_frame_local() => {
                warn!("first frame {first} is unusable: {error}");
                report.failure = Some(FrameFailure { frame: first, error });
                return Ok(report);
            }
            Err(error) => return Err(error),
        };
        handler.save(&current, first)?;
        report.saved_frames.push(first);

        for frame in (first + 1)..frames.end {
            if self.cancelled() {
                warn!("run cancelled before frame {frame}");
                report.cancelled = true;
                break;
            }
            match handler.get(frame).and_then(|next| self.map_pair(frame, &current, &next)) {
                Ok(pair) => {
                    handler.save(&pair.outline, frame)?;
                    report.saved_frames.push(frame);
                    report.unsnapped += pair.unsnapped;
                    report.intersections_cut += pair.repair.intersections_cut;
                    current = pair.outline;
                }
                Err(error) if error.is_frame_local() => {
                    warn!("stopping at frame {frame}: {error}");
                    report.failure = Some(FrameFailure { frame, error });
                    break;
                }
                Err(error) => return Err(error),
            }
        }

        info!(
            "mapped {} frame(s), {} unsnapped vertices, {} self-intersection cut(s)",
            report.saved_frames.len(),
            report.unsnapped,
            report.intersections_cut
        );
        Ok(report)
    }

    /// Moves `o1` onto `o2`, the outline of `frame`.
    ///
    /// Neither input is modified. The result keeps the tracking ids and tracking
    /// coordinates of `o1`.
    pub fn map_pair(&self, frame: usize, o1: &Outline, o2: &Outline) -> Result<FramePair, MappingError> {
        let params = self.params;
        let mut o1 = o1.compact();
        let mut o2 = o2.compact();
        o1.clear_marks();
        o2.clear_marks();
        for v in o1.vertices.iter_mut() {
            v.distance = 0.0;
        }
        if !params.disable_density_correction {
            correct_density(&mut o2, params.marker_res)?;
        }
        o1.update_normals();
        o2.update_normals();

        let crossings = mark_intersections(&mut o1, &mut o2);
        let sectors = decompose(&mut o1, &mut o2, params)?;

        let mut summaries = Vec::with_capacity(sectors.len());
        let mut unsnapped = 0;
        for sector in &sectors {
            let migration = self.migrate_sector(&mut o1, &o2, sector);
            if migration.unsnapped > 0 {
                warn!(
                    "frame {frame}, sector {}: {} vertices did not reach the target",
                    sector.id, migration.unsnapped
                );
            }
            debug!(
                "frame {frame}, sector {}: {} landings in {} iterations",
                sector.id,
                migration.landings.len(),
                migration.iterations
            );
            unsnapped += migration.unsnapped;
            summaries.push(sector.summary(migration.unsnapped));
        }

        o1.clear_marks();
        let repair = repair(&mut o1, &params.repair_options())?;
        o1.check_coordinates()
            .map_err(|source| MappingError::Inconsistent { frame, source })?;
        o1.update_normals();
        let outline = o1.compact();

        info!(
            "frame {frame}: {} sector(s), {crossings} crossing(s), {unsnapped} unsnapped, {} vertices",
            summaries.len(),
            outline.len()
        );
        Ok(FramePair {
            frame,
            outline,
            sectors: summaries,
            crossings,
            unsnapped,
            repair,
        })
    }

    fn migrate_sector(&self, o1: &mut Outline, o2: &Outline, sector: &Sector) -> Migration {
        let path_o1 = sector.path_o1(o1);
        let path_o2 = sector.path_o2(o2);
        let arc_o1 = sector.polyline(o1, &path_o1);
        let arc_o2 = sector.polyline(o2, &path_o2);

        let forward = sector.migrating() == Side::O1;
        let (mig, path, target) = if forward {
            (&*o1, &path_o1, arc_o2.clone())
        } else {
            (o2, &path_o2, arc_o1.clone())
        };
        let mig_points: Vec<Point2> = path.iter().map(|&v| mig.position(v)).collect();
        let mig_normals: Vec<Vector2> = path.iter().map(|&v| mig.vertex(v).normal).collect();
        let movers = sector.movable(mig, path);
        let start: Vec<Point2> = movers.iter().map(|&i| mig_points[i]).collect();
        let normals: Vec<Vector2> = movers.iter().map(|&i| mig_normals[i]).collect();

        let mut charges = Charges::build(sector, &mig_points, &mig_normals, target, self.params);
        let migration = migrate(&start, &normals, &mut charges, self.params);

        if forward {
            let vertices: Vec<usize> = movers.iter().map(|&i| path_o1[i]).collect();
            place_forward(o1, &vertices, &charges.target, &migration.landings);
        } else {
            let pairs = movers
                .iter()
                .zip(&migration.landings)
                .map(|(&i, landing)| (landing.param, arc_o2.vertex_param(i)))
                .collect();
            let map = ArcMap::new(pairs, arc_o1.length(), arc_o2.length(), sector.whole);
            let vertices: Vec<(usize, f64)> = sector
                .movable(o1, &path_o1)
                .into_iter()
                .map(|i| (path_o1[i], arc_o1.vertex_param(i)))
                .collect();
            place_backward(o1, &vertices, &map, &arc_o2);
        }
        migration
    }
}
