//! Bound-state search orchestration.
//!
//! The search runs coarse-to-fine: a heuristic bracket is scanned, the most
//! promising sample is refined by the secant/bisection/grid cascade, and a
//! fixed wide bracket is retried when the heuristic misses or refinement
//! fails to improve on the coarse result. A search that never reaches the
//! requested node count still returns its best effort, flagged
//! `converged = false` with a warning in the diagnostics.

pub mod config;

mod bracket;
mod refine;
mod scan;

pub use config::{SolverConfig, SolverTolerances};

use crate::common::PhysicalConstants;
use crate::domain::{
    BoundStateResult, Candidate, GridSpec, PotentialParams, QuantumLabel, RefinementStage,
    SolveDiagnostics, SolverError, SolverResult,
};
use crate::numerics::{count_radial_nodes, integrate_radial, normalize};
use bracket::{EnergyBracket, heuristic_bracket, wide_bracket};
use refine::refine;
use scan::{scan_bracket, select_candidate};

/// Node counting stops this many diffuseness widths past the outer classical
/// turning point. Interior nodes all sit inside the allowed region; past it
/// the solution is exponential, and the sign flip where a growing admixture
/// overtakes the decaying tail would otherwise be counted as a node.
const NODE_WINDOW_MARGIN_WIDTHS: f64 = 2.0;

/// Shared inputs of one eigenvalue search, threaded through every stage.
pub(crate) struct SearchContext<'a> {
    pub potential: &'a PotentialParams,
    pub constants: &'a PhysicalConstants,
    pub label: QuantumLabel,
    pub grid: GridSpec,
    pub config: &'a SolverConfig,
}

impl SearchContext<'_> {
    /// Propagate one trial energy and tag it with its boundary value and
    /// node count. Nodes are counted only inside the classically allowed
    /// region plus a margin; the boundary value always comes from the full
    /// grid.
    pub(crate) fn evaluate(&self, energy_mev: f64) -> SolverResult<Candidate> {
        let wavefunction = integrate_radial(
            self.potential,
            self.constants,
            self.label.l,
            energy_mev,
            self.grid,
        )?;
        let samples = wavefunction.samples();
        let window_fm = self.potential.outer_turning_point_fm(energy_mev)
            + NODE_WINDOW_MARGIN_WIDTHS * self.potential.diffuseness_fm();
        let window = if window_fm.is_finite() {
            ((window_fm / self.grid.step_fm()).ceil() as usize + 1).min(samples.len())
        } else {
            samples.len()
        };
        let node_count =
            count_radial_nodes(&samples[..window], self.config.tolerances.node_noise_floor);
        let boundary_value = wavefunction.boundary_value();

        Ok(Candidate {
            energy_mev,
            wavefunction,
            boundary_value,
            node_count,
        })
    }
}

/// Outcome of scanning plus refining one bracket.
struct BracketAttempt {
    candidate: Candidate,
    stage: Option<RefinementStage>,
    /// Refinement reduced the boundary magnitude and either kept the
    /// requested node count or landed below the acceptance cutoff; anything
    /// less triggers the wide-bracket retry.
    refinement_accepted: bool,
}

/// Bound-state eigenvalue solver for a Woods-Saxon well.
///
/// Pure and reentrant: every call depends only on its inputs, so independent
/// `(node_target, l)` searches can run concurrently from different threads.
#[derive(Debug, Clone)]
pub struct BoundStateSolver {
    constants: PhysicalConstants,
    config: SolverConfig,
}

impl BoundStateSolver {
    pub fn new(constants: PhysicalConstants) -> Self {
        Self {
            constants,
            config: SolverConfig::default(),
        }
    }

    pub fn with_config(constants: PhysicalConstants, config: SolverConfig) -> Self {
        Self { constants, config }
    }

    pub fn constants(&self) -> &PhysicalConstants {
        &self.constants
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Locate the eigenstate with `label.node_target` interior nodes.
    ///
    /// Raises only configuration, integration, or normalization errors; a
    /// search that misses the requested node count returns the best-effort
    /// state with `converged = false`.
    pub fn solve(
        &self,
        potential: &PotentialParams,
        label: QuantumLabel,
        grid: GridSpec,
    ) -> SolverResult<BoundStateResult> {
        let context = SearchContext {
            potential,
            constants: &self.constants,
            label,
            grid,
            config: &self.config,
        };
        let node_target = label.node_target as usize;
        let mut diagnostics = SolveDiagnostics::default();
        let mut last_error = None;

        let narrow = heuristic_bracket(potential.depth_mev(), label);
        diagnostics.brackets_tried = 1;
        let first = self.attempt_bracket(&context, &narrow, node_target, &mut last_error);
        if first.is_none() {
            diagnostics
                .warnings
                .push(format!(
                    "no usable candidate in heuristic bracket [{:.3}, {:.3}] MeV",
                    narrow.e_min_mev, narrow.e_max_mev
                ));
        }

        let retry = match &first {
            None => true,
            Some(attempt) => {
                attempt.candidate.node_count != node_target || !attempt.refinement_accepted
            }
        };
        let second = if retry {
            let wide = wide_bracket(potential.depth_mev(), &self.config);
            diagnostics.brackets_tried += 1;
            self.attempt_bracket(&context, &wide, node_target, &mut last_error)
        } else {
            None
        };

        let best = match (first, second) {
            (Some(lhs), Some(rhs)) => {
                if prefer(&rhs.candidate, &lhs.candidate, node_target) {
                    Some(rhs)
                } else {
                    Some(lhs)
                }
            }
            (Some(attempt), None) | (None, Some(attempt)) => Some(attempt),
            (None, None) => None,
        };
        let Some(best) = best else {
            return Err(match last_error {
                Some(last) => SolverError::SearchSpaceExhausted {
                    last: Box::new(last),
                },
                None => SolverError::EmptySearchSpace {
                    depth_mev: potential.depth_mev(),
                },
            });
        };

        diagnostics.refinement_stage = best.stage;
        let candidate = best.candidate;
        let converged = candidate.node_count == node_target
            && candidate.boundary_magnitude() <= self.config.tolerances.boundary_accept;
        if !converged {
            diagnostics.warnings.push(format!(
                "requested {} node(s), found {} at {:.4} MeV (boundary magnitude {:.3e})",
                node_target,
                candidate.node_count,
                candidate.energy_mev,
                candidate.boundary_magnitude()
            ));
        }

        let normalized_wavefunction = normalize(&candidate.wavefunction)?;
        Ok(BoundStateResult {
            energy_mev: candidate.energy_mev,
            boundary_value: candidate.boundary_value,
            node_count: candidate.node_count,
            wavefunction: candidate.wavefunction,
            normalized_wavefunction,
            converged,
            label,
            grid,
            diagnostics,
        })
    }

    /// Scan one bracket and refine its best sample. Returns whichever of the
    /// refined and coarse candidates is preferable, or `None` when the scan
    /// produced nothing at all.
    fn attempt_bracket(
        &self,
        context: &SearchContext<'_>,
        search: &EnergyBracket,
        node_target: usize,
        last_error: &mut Option<SolverError>,
    ) -> Option<BracketAttempt> {
        let report = scan_bracket(context, search);
        if let Some(error) = report.last_error {
            *last_error = Some(error);
        }
        let coarse = select_candidate(&report.samples, node_target, &self.config.tolerances)?;
        if coarse.energy_mev >= 0.0 || !search.contains(coarse.energy_mev) {
            return None;
        }

        let local = local_bracket(coarse.energy_mev, search, self.config.coarse_samples);
        match refine(context, &coarse, &local) {
            Some(refinement) => {
                let improved =
                    refinement.candidate.boundary_magnitude() < coarse.boundary_magnitude();
                // A boundary below the acceptance cutoff is an eigenvalue;
                // a node-count disagreement must not discard it in favor of
                // an unrefined coarse sample.
                let strong = refinement.candidate.boundary_magnitude()
                    <= self.config.tolerances.boundary_accept;
                let accepted =
                    improved && (strong || refinement.candidate.node_count == node_target);
                if improved && (strong || prefer(&refinement.candidate, &coarse, node_target)) {
                    Some(BracketAttempt {
                        candidate: refinement.candidate,
                        stage: Some(refinement.stage),
                        refinement_accepted: accepted,
                    })
                } else {
                    Some(BracketAttempt {
                        candidate: coarse,
                        stage: None,
                        refinement_accepted: false,
                    })
                }
            }
            None => Some(BracketAttempt {
                candidate: coarse,
                stage: None,
                refinement_accepted: false,
            }),
        }
    }
}

/// Narrow refinement window: one coarse-scan step either side of the guess,
/// clamped to the search bracket.
fn local_bracket(
    coarse_energy_mev: f64,
    search: &EnergyBracket,
    coarse_samples: usize,
) -> EnergyBracket {
    let half_width = search.width_mev() / (coarse_samples.max(2) - 1) as f64;
    EnergyBracket {
        e_min_mev: (coarse_energy_mev - half_width).max(search.e_min_mev),
        e_max_mev: (coarse_energy_mev + half_width).min(search.e_max_mev),
    }
}

/// `true` when `lhs` is the better pick: node-count agreement first, smaller
/// boundary magnitude as the tie-break.
fn prefer(lhs: &Candidate, rhs: &Candidate, node_target: usize) -> bool {
    match (lhs.node_count == node_target, rhs.node_count == node_target) {
        (true, false) => true,
        (false, true) => false,
        _ => lhs.boundary_magnitude() < rhs.boundary_magnitude(),
    }
}

/// Solve with default configuration and grid (`r_max = 20 fm`, `h = 0.01 fm`).
pub fn solve_bound_state(
    potential: &PotentialParams,
    node_target: u32,
    l: u32,
    constants: PhysicalConstants,
) -> SolverResult<BoundStateResult> {
    BoundStateSolver::new(constants).solve(
        potential,
        QuantumLabel::new(node_target, l),
        GridSpec::default(),
    )
}
