pub mod errors;

pub use errors::{SolverError, SolverResult};

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Woods-Saxon well parameters: `V(r) = -V0 / (1 + exp((r - R0) / a0))`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PotentialParams {
    depth_mev: f64,
    radius_fm: f64,
    diffuseness_fm: f64,
}

impl PotentialParams {
    pub fn new(depth_mev: f64, radius_fm: f64, diffuseness_fm: f64) -> SolverResult<Self> {
        if !depth_mev.is_finite() || depth_mev <= 0.0 {
            return Err(SolverError::InvalidDepth { value: depth_mev });
        }
        if !radius_fm.is_finite() || radius_fm <= 0.0 {
            return Err(SolverError::InvalidRadius { value: radius_fm });
        }
        if !diffuseness_fm.is_finite() || diffuseness_fm <= 0.0 {
            return Err(SolverError::InvalidDiffuseness {
                value: diffuseness_fm,
            });
        }

        Ok(Self {
            depth_mev,
            radius_fm,
            diffuseness_fm,
        })
    }

    pub fn depth_mev(&self) -> f64 {
        self.depth_mev
    }

    pub fn radius_fm(&self) -> f64 {
        self.radius_fm
    }

    pub fn diffuseness_fm(&self) -> f64 {
        self.diffuseness_fm
    }

    /// Diffuseness ratio `alpha = a0 / R0` of the dimensionless well.
    pub fn diffuseness_ratio(&self) -> f64 {
        self.diffuseness_fm / self.radius_fm
    }

    /// Potential value in MeV at radius `r` in fm.
    pub fn value_mev(&self, radius_fm: f64) -> f64 {
        -self.depth_mev * self.shape(radius_fm / self.radius_fm)
    }

    /// Dimensionless well shape `v(rho) = -1 / (1 + exp((rho - 1) / alpha))`.
    pub fn shape_at(&self, rho: f64) -> f64 {
        -self.shape(rho)
    }

    /// Outer classical turning point `V(r) = E` for a bound energy. The nodes
    /// of a bound wavefunction all sit inside it; beyond it the solution is
    /// exponential and any sign flip is an integration artifact. Infinite for
    /// unbound energies, `R0` for energies at or below the well floor.
    pub fn outer_turning_point_fm(&self, energy_mev: f64) -> f64 {
        if energy_mev >= 0.0 {
            return f64::INFINITY;
        }
        let well_ratio = self.depth_mev / -energy_mev - 1.0;
        if well_ratio <= 0.0 {
            return self.radius_fm;
        }
        self.radius_fm + self.diffuseness_fm * well_ratio.ln()
    }

    fn shape(&self, rho: f64) -> f64 {
        1.0 / (1.0 + ((rho - 1.0) / self.diffuseness_ratio()).exp())
    }
}

/// Target eigenstate: orbital angular momentum and interior node count.
///
/// Only the node count is exposed; for a finite well it labels states
/// unambiguously, while "principal quantum number" conventions differ once
/// `l > 0`. Callers that need one can use [`QuantumLabel::principal_quantum_number`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuantumLabel {
    pub l: u32,
    pub node_target: u32,
}

impl QuantumLabel {
    pub fn new(node_target: u32, l: u32) -> Self {
        Self { l, node_target }
    }

    pub fn principal_quantum_number(&self) -> u32 {
        self.node_target + self.l + 1
    }

    pub fn spectroscopic_letter(&self) -> char {
        match self.l {
            0 => 's',
            1 => 'p',
            2 => 'd',
            3 => 'f',
            4 => 'g',
            5 => 'h',
            other => char::from_digit(other.min(9), 10).unwrap_or('?'),
        }
    }
}

impl Display for QuantumLabel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{} (nodes={})",
            self.principal_quantum_number(),
            self.spectroscopic_letter(),
            self.node_target
        )
    }
}

/// Uniform radial grid over `[0, r_max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    r_max_fm: f64,
    step_fm: f64,
}

impl GridSpec {
    pub const DEFAULT_R_MAX_FM: f64 = 20.0;
    pub const DEFAULT_STEP_FM: f64 = 0.01;

    pub fn new(r_max_fm: f64, step_fm: f64) -> SolverResult<Self> {
        let valid = r_max_fm.is_finite()
            && step_fm.is_finite()
            && step_fm > 0.0
            && r_max_fm > step_fm;
        if !valid {
            return Err(SolverError::InvalidGrid { r_max_fm, step_fm });
        }

        Ok(Self { r_max_fm, step_fm })
    }

    pub fn r_max_fm(&self) -> f64 {
        self.r_max_fm
    }

    pub fn step_fm(&self) -> f64 {
        self.step_fm
    }

    /// Number of samples including both endpoints.
    pub fn sample_count(&self) -> usize {
        (self.r_max_fm / self.step_fm).round() as usize + 1
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            r_max_fm: Self::DEFAULT_R_MAX_FM,
            step_fm: Self::DEFAULT_STEP_FM,
        }
    }
}

/// Discretized radial wavefunction `u(r)` on a uniform grid.
///
/// Immutable once produced; `u[0] = 0` and `u[1] = h^(l+1)` by construction
/// (regular solution at the origin).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wavefunction {
    samples: Vec<f64>,
    step_fm: f64,
}

impl Wavefunction {
    pub(crate) fn from_samples(samples: Vec<f64>, step_fm: f64) -> Self {
        Self { samples, step_fm }
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn step_fm(&self) -> f64 {
        self.step_fm
    }

    pub fn r_max_fm(&self) -> f64 {
        self.step_fm * (self.samples.len().saturating_sub(1)) as f64
    }

    /// Value at the outer edge of the grid; magnitude measures how far the
    /// trial energy is from a genuine bound state.
    pub fn boundary_value(&self) -> f64 {
        self.samples.last().copied().unwrap_or(0.0)
    }
}

/// Intermediate artifact produced while scanning or refining.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub energy_mev: f64,
    pub wavefunction: Wavefunction,
    pub boundary_value: f64,
    pub node_count: usize,
}

impl Candidate {
    pub fn boundary_magnitude(&self) -> f64 {
        self.boundary_value.abs()
    }
}

/// Which refinement stage produced the accepted candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RefinementStage {
    Secant,
    Bisection,
    GridSearch,
}

impl Display for RefinementStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Secant => "secant",
            Self::Bisection => "bisection",
            Self::GridSearch => "grid-search",
        };
        f.write_str(name)
    }
}

/// Diagnostics record returned alongside every result instead of interleaved
/// console output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolveDiagnostics {
    pub brackets_tried: u32,
    pub refinement_stage: Option<RefinementStage>,
    pub warnings: Vec<String>,
}

/// Final output of a bound-state search.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundStateResult {
    pub energy_mev: f64,
    pub wavefunction: Wavefunction,
    pub normalized_wavefunction: Wavefunction,
    pub node_count: usize,
    pub boundary_value: f64,
    pub converged: bool,
    pub label: QuantumLabel,
    pub grid: GridSpec,
    pub diagnostics: SolveDiagnostics,
}
