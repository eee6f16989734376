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

use crate::{error::OutlineError, outline::Outline};

/// Accepted edge lengths are `[spacing / DENSITY_RATIO, spacing * DENSITY_RATIO]`.
pub const DENSITY_RATIO: f64 = 1.6;

const MAX_PASSES: usize = 16;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DensityReport {
    pub inserted: usize,
    pub removed: usize,
    pub passes: usize,
}

/// Resamples `outline` so every edge length falls inside the accepted band around `spacing`.
///
/// Short edges are merged by dropping the younger endpoint (higher tracking id), long
/// edges are split evenly. Vertices that are not touched keep their position, normal
/// and tracking id.
pub fn correct_density(outline: &mut Outline, spacing: f64) -> Result<DensityReport, OutlineError> {
    let mut report = DensityReport::default();
    if !(spacing > 0.0 && spacing.is_finite()) {
        return Ok(report);
    }
    let max = spacing * DENSITY_RATIO;
    let min = spacing / DENSITY_RATIO;

    for _ in 0..MAX_PASSES {
        report.passes += 1;
        let mut changed = false;

        let live: Vec<usize> = outline.iter().collect();
        for v in live {
            if outline.vertex(v).removed {
                continue;
            }
            while outline.len() > 3 && outline.edge_length(v) < min {
                let n = outline.next(v);
                let gone = if outline.vertex(n).tracking < outline.vertex(v).tracking {
                    v
                } else {
                    n
                };
                outline.remove(gone)?;
                report.removed += 1;
                changed = true;
                if gone == v {
                    break;
                }
            }
        }

        let live: Vec<usize> = outline.iter().collect();
        for v in live {
            let len = outline.edge_length(v);
            if len <= max {
                continue;
            }
            let pieces = (len / spacing).ceil() as usize;
            let a = outline.position(v);
            let b = outline.position(outline.next(v));
            let mut anchor = v;
            for k in 1..pieces {
                anchor = outline.insert_after(anchor, a.lerp(&b, k as f64 / pieces as f64));
                report.inserted += 1;
            }
            changed = true;
        }

        if !changed {
            break;
        }
    }

    outline.update_normals();
    debug!(
        "density correction: +{} -{} vertices in {} passes",
        report.inserted, report.removed, report.passes
    );
    Ok(report)
}
