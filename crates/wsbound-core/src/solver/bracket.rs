//! Energy search brackets.
//!
//! For a fixed well the eigenstates are ordered by node count, with each
//! additional node sitting at a less negative energy. The heuristic bracket
//! exploits that ordering to shrink the coarse scan; it is a search-space
//! optimization, not a formula, and the orchestrator falls back to
//! [`wide_bracket`] whenever it turns out to be wrong.

use crate::domain::QuantumLabel;
use crate::solver::config::SolverConfig;

/// Closed energy interval `[e_min, e_max]`, both negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct EnergyBracket {
    pub e_min_mev: f64,
    pub e_max_mev: f64,
}

impl EnergyBracket {
    pub(crate) fn width_mev(&self) -> f64 {
        self.e_max_mev - self.e_min_mev
    }

    pub(crate) fn contains(&self, energy_mev: f64) -> bool {
        energy_mev >= self.e_min_mev && energy_mev <= self.e_max_mev
    }

    pub(crate) fn clamp(&self, energy_mev: f64) -> f64 {
        energy_mev.clamp(self.e_min_mev, self.e_max_mev)
    }
}

/// Upper bracket edge as a fraction of `-V0`; kept just below zero so every
/// coarse sample stays a bound-state trial.
const SHALLOW_EDGE_FRACTION: f64 = 0.002;

/// Plausible bracket for the state with `label.node_target` interior nodes.
/// Narrows toward zero as the node target increases and deepens with `l`,
/// since the centrifugal barrier shifts the plausible energies.
pub(crate) fn heuristic_bracket(depth_mev: f64, label: QuantumLabel) -> EnergyBracket {
    let narrow = 0.995 - 0.08 * f64::from(label.node_target);
    let deepen = 0.03 * f64::from(label.l);
    let deep_fraction = (narrow + deepen).clamp(0.15, 0.995);

    EnergyBracket {
        e_min_mev: -depth_mev * deep_fraction,
        e_max_mev: -depth_mev * SHALLOW_EDGE_FRACTION,
    }
}

/// Fixed fallback bracket tried when the heuristic one misses.
pub(crate) fn wide_bracket(depth_mev: f64, config: &SolverConfig) -> EnergyBracket {
    EnergyBracket {
        e_min_mev: -depth_mev * config.wide_bracket_deep_fraction,
        e_max_mev: -depth_mev * config.wide_bracket_shallow_fraction,
    }
}
