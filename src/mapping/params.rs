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

use serde::{Deserialize, Serialize};

use crate::{error::MappingError, outline_processing::RepairOptions};

/// Tunables of one tracking run. Read-only while a run is in progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EcmParams {
    /// Target vertex spacing of every produced outline.
    pub marker_res: f64,
    /// Charge of migrating-side charges (repulsive when positive).
    pub mig_q: f64,
    /// Charge of target-side charges (attractive when negative).
    pub tar_q: f64,
    pub mig_power: f64,
    pub tar_power: f64,
    pub coulomb_k: f64,
    /// Euler time step `h`.
    pub time_step: f64,
    /// Snap distance and convergence threshold `d`.
    pub convergence_distance: f64,
    pub max_iter: usize,
    /// Upper bound on the length of one Euler step.
    pub max_step: f64,
    /// How far the migrating charge curve sits behind the migrating vertices.
    pub charge_offset: f64,
    /// Resampling spacing of both charge curves, `None` keeps the outline vertices.
    pub charge_density: Option<f64>,
    /// Edges shorter than this are collapsed during repair.
    pub min_edge_length: f64,
    pub force_forward_mapping: bool,
    pub force_backward_mapping: bool,
    pub force_no_sectors: bool,
    pub disable_density_correction: bool,
}

impl Default for EcmParams {
    fn default() -> Self {
        Self {
            marker_res: 4.0,
            mig_q: 2.4e-5,
            tar_q: -2.5e-5,
            mig_power: 2.0,
            tar_power: 2.0,
            coulomb_k: 8.987e9,
            time_step: 0.3,
            convergence_distance: 0.2,
            max_iter: 4000,
            max_step: 0.5,
            charge_offset: 0.5,
            charge_density: None,
            min_edge_length: 1e-3,
            force_forward_mapping: false,
            force_backward_mapping: false,
            force_no_sectors: false,
            disable_density_correction: false,
        }
    }
}

fn positive(name: &str, value: f64) -> Result<(), MappingError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(MappingError::InvalidParams {
            reason: format!("{name} must be positive and finite, got {value}"),
        })
    }
}

fn finite(name: &str, value: f64) -> Result<(), MappingError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(MappingError::InvalidParams {
            reason: format!("{name} must be finite, got {value}"),
        })
    }
}

impl EcmParams {
    pub fn validate(&self) -> Result<(), MappingError> {
        positive("marker_res", self.marker_res)?;
        positive("time_step", self.time_step)?;
        positive("convergence_distance", self.convergence_distance)?;
        positive("max_step", self.max_step)?;
        positive("charge_offset", self.charge_offset)?;
        positive("min_edge_length", self.min_edge_length)?;
        positive("coulomb_k", self.coulomb_k)?;
        finite("mig_q", self.mig_q)?;
        finite("tar_q", self.tar_q)?;
        finite("mig_power", self.mig_power)?;
        finite("tar_power", self.tar_power)?;
        if let Some(spacing) = self.charge_density {
            positive("charge_density", spacing)?;
        }
        if self.max_iter == 0 {
            return Err(MappingError::InvalidParams {
                reason: "max_iter must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Repair settings derived from these parameters.
    pub fn repair_options(&self) -> RepairOptions {
        RepairOptions {
            min_edge_length: self.min_edge_length,
            spacing: (!self.disable_density_correction).then_some(self.marker_res),
        }
    }

    /// Whether sector `length_o1`/`length_o2` migrates O1 onto O2.
    pub fn forward_map(&self, length_o1: f64, length_o2: f64) -> bool {
        if self.force_backward_mapping {
            return false;
        }
        length_o1 > length_o2 || self.force_forward_mapping
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(EcmParams::default().validate().is_ok());
    }

    #[test]
    fn backward_flag_wins() {
        let params = EcmParams {
            force_forward_mapping: true,
            force_backward_mapping: true,
            ..EcmParams::default()
        };
        assert!(!params.forward_map(10.0, 1.0));
    }

    #[test]
    fn rejects_zero_iterations() {
        let params = EcmParams {
            max_iter: 0,
            ..EcmParams::default()
        };
        assert!(matches!(params.validate(), Err(MappingError::InvalidParams { .. })));
    }
}
