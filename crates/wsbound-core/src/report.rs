//! JSON-facing view of a solve, for CLI output and outer tooling.

use crate::domain::{BoundStateResult, SolverError, SolverResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Serializable mirror of [`BoundStateResult`]. The wavefunction samples are
/// the normalized ones, which is what plotting front-ends consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundStateReport {
    pub energy_mev: f64,
    pub node_count: usize,
    pub node_target: u32,
    pub l: u32,
    pub boundary_value: f64,
    pub converged: bool,
    pub r_max_fm: f64,
    pub step_fm: f64,
    pub warnings: Vec<String>,
    pub wavefunction: Vec<f64>,
}

impl From<&BoundStateResult> for BoundStateReport {
    fn from(result: &BoundStateResult) -> Self {
        Self {
            energy_mev: result.energy_mev,
            node_count: result.node_count,
            node_target: result.label.node_target,
            l: result.label.l,
            boundary_value: result.boundary_value,
            converged: result.converged,
            r_max_fm: result.grid.r_max_fm(),
            step_fm: result.grid.step_fm(),
            warnings: result.diagnostics.warnings.clone(),
            wavefunction: result.normalized_wavefunction.samples().to_vec(),
        }
    }
}

impl BoundStateReport {
    pub fn write_json(&self, path: impl AsRef<Path>) -> SolverResult<()> {
        let path = path.as_ref();
        let rendered =
            serde_json::to_string_pretty(self).map_err(|source| SolverError::ReportWrite {
                path: path.to_path_buf(),
                message: source.to_string(),
            })?;
        fs::write(path, rendered).map_err(|source| SolverError::ReportWrite {
            path: path.to_path_buf(),
            message: source.to_string(),
        })
    }
}
