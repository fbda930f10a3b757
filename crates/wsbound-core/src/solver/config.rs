use serde::{Deserialize, Serialize};

/// Acceptance and noise thresholds of the eigenvalue search.
///
/// These cutoffs are tied to the grid: with the default `r_max = 20 fm`,
/// `h = 0.01 fm` grid an off-eigenvalue tail is amplified by roughly
/// `exp(kappa * r_max)`, so "small" boundary magnitudes are order 10 while
/// hopeless ones reach 1e5 and beyond. Coarser grids or larger `r_max`
/// shift these scales, which is why they are configuration rather than
/// hardcoded literals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverTolerances {
    /// Node-counting noise floor, relative to the wavefunction's peak.
    pub node_noise_floor: f64,
    /// Boundary magnitude treated as a strong eigenvalue signal.
    pub boundary_small: f64,
    /// Looser cutoff under which a node-count match is still trusted.
    pub boundary_loose: f64,
    /// Refinement stages reject their own output above this magnitude.
    pub stage_sanity: f64,
    /// Final acceptance cutoff for `converged = true`.
    pub boundary_accept: f64,
    /// Secant roots within this fraction of the well depth of zero or of the
    /// well floor are rejected as divergence to non-physical energies.
    pub secant_edge_margin: f64,
    /// Energy interval below which root iterations stop.
    pub energy_tolerance_mev: f64,
}

impl Default for SolverTolerances {
    fn default() -> Self {
        Self {
            node_noise_floor: 1.0e-6,
            boundary_small: 10.0,
            boundary_loose: 1.0e5,
            stage_sanity: 1.0e6,
            boundary_accept: 1.0,
            secant_edge_margin: 0.05,
            energy_tolerance_mev: 1.0e-9,
        }
    }
}

/// Sample counts and iteration caps. Every loop in the search is bounded by
/// one of these fields, so a full solve has a fixed worst-case budget even
/// for pathological wells.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    pub tolerances: SolverTolerances,
    /// Evenly spaced energies evaluated per coarse scan.
    pub coarse_samples: usize,
    pub secant_max_iterations: usize,
    pub bisection_max_iterations: usize,
    /// Pre-scan points used to localize a sign change before bisecting.
    pub bisection_prescan_samples: usize,
    pub grid_search_samples: usize,
    /// Fallback bracket `[-deep * V0, -shallow * V0]` tried when the
    /// heuristic bracket fails.
    pub wide_bracket_deep_fraction: f64,
    pub wide_bracket_shallow_fraction: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerances: SolverTolerances::default(),
            coarse_samples: 80,
            secant_max_iterations: 50,
            bisection_max_iterations: 100,
            bisection_prescan_samples: 20,
            grid_search_samples: 100,
            wide_bracket_deep_fraction: 0.8,
            wide_bracket_shallow_fraction: 0.1,
        }
    }
}
