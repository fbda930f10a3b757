//! Coarse energy scan across a bracket.
//!
//! The boundary value does not vary smoothly or monotonically with energy
//! near resonances and centrifugal barriers, so no single selection criterion
//! is reliable across all well shapes. Selection is a layered fallback: a
//! boundary sign change is the strongest signal, then small boundary
//! magnitudes, then node-count agreement, then a weighted score over
//! everything sampled.

use super::SearchContext;
use crate::domain::{Candidate, SolverError};
use crate::numerics::linear_grid;
use crate::solver::bracket::EnergyBracket;
use crate::solver::config::SolverTolerances;

/// Candidates evaluated across a bracket, in ascending energy order, plus the
/// last integration failure if any trial energy could not be propagated.
#[derive(Debug)]
pub(crate) struct ScanReport {
    pub samples: Vec<Candidate>,
    pub last_error: Option<SolverError>,
}

pub(crate) fn scan_bracket(context: &SearchContext<'_>, bracket: &EnergyBracket) -> ScanReport {
    let energies = linear_grid(
        bracket.e_min_mev,
        bracket.e_max_mev,
        context.config.coarse_samples.max(2),
    )
    .unwrap_or_default();

    let mut samples = Vec::with_capacity(energies.len());
    let mut last_error = None;
    for energy_mev in energies {
        if energy_mev >= 0.0 {
            continue;
        }
        match context.evaluate(energy_mev) {
            Ok(candidate) => samples.push(candidate),
            Err(error) => last_error = Some(error),
        }
    }

    ScanReport {
        samples,
        last_error,
    }
}

/// Pick the most promising candidate from an ascending-energy scan.
/// Returns `None` only when nothing was sampled.
pub(crate) fn select_candidate(
    samples: &[Candidate],
    node_target: usize,
    tolerances: &SolverTolerances,
) -> Option<Candidate> {
    if samples.is_empty() {
        return None;
    }

    if let Some(candidate) = sign_change_candidate(samples, node_target) {
        return Some(candidate);
    }

    if let Some(candidate) = small_boundary_candidate(samples, node_target, tolerances) {
        return Some(candidate);
    }

    if let Some(candidate) = node_match_candidate(samples, node_target, tolerances) {
        return Some(candidate);
    }

    samples
        .iter()
        .min_by(|lhs, rhs| {
            weighted_score(lhs, node_target).total_cmp(&weighted_score(rhs, node_target))
        })
        .cloned()
}

/// Rule 1: a boundary sign change between adjacent samples. Pairs where one
/// member already has the target node count win over other pairs; within a
/// pair the smaller boundary magnitude wins.
fn sign_change_candidate(samples: &[Candidate], node_target: usize) -> Option<Candidate> {
    let mut fallback: Option<&Candidate> = None;
    for pair in samples.windows(2) {
        if pair[0].boundary_value * pair[1].boundary_value >= 0.0 {
            continue;
        }

        let closer = if pair[0].boundary_magnitude() <= pair[1].boundary_magnitude() {
            &pair[0]
        } else {
            &pair[1]
        };
        if pair[0].node_count == node_target || pair[1].node_count == node_target {
            return Some(closer.clone());
        }
        if fallback.is_none() {
            fallback = Some(closer);
        }
    }

    fallback.cloned()
}

/// Rule 2: boundary magnitude already below the "small" threshold, weighted
/// toward the target node count.
fn small_boundary_candidate(
    samples: &[Candidate],
    node_target: usize,
    tolerances: &SolverTolerances,
) -> Option<Candidate> {
    let small: Vec<&Candidate> = samples
        .iter()
        .filter(|candidate| candidate.boundary_magnitude() < tolerances.boundary_small)
        .collect();

    let matching = small
        .iter()
        .filter(|candidate| candidate.node_count == node_target)
        .min_by(|lhs, rhs| lhs.boundary_magnitude().total_cmp(&rhs.boundary_magnitude()));
    if let Some(candidate) = matching {
        return Some((*candidate).clone());
    }

    small
        .into_iter()
        .min_by(|lhs, rhs| lhs.boundary_magnitude().total_cmp(&rhs.boundary_magnitude()))
        .cloned()
}

/// Rule 3: exact node-count match under the loose boundary cutoff.
fn node_match_candidate(
    samples: &[Candidate],
    node_target: usize,
    tolerances: &SolverTolerances,
) -> Option<Candidate> {
    samples
        .iter()
        .filter(|candidate| {
            candidate.node_count == node_target
                && candidate.boundary_magnitude() < tolerances.boundary_loose
        })
        .min_by(|lhs, rhs| lhs.boundary_magnitude().total_cmp(&rhs.boundary_magnitude()))
        .cloned()
}

/// Rule 4 score: node mismatch dominates, boundary magnitude breaks ties.
fn weighted_score(candidate: &Candidate, node_target: usize) -> f64 {
    let node_distance = candidate.node_count.abs_diff(node_target) as f64;
    10.0 * node_distance + candidate.boundary_magnitude()
}

#[cfg(test)]
mod tests {
    use super::select_candidate;
    use crate::domain::{Candidate, Wavefunction};
    use crate::solver::config::SolverTolerances;

    fn candidate(energy_mev: f64, boundary_value: f64, node_count: usize) -> Candidate {
        Candidate {
            energy_mev,
            wavefunction: Wavefunction::from_samples(vec![0.0, 1.0, boundary_value], 0.01),
            boundary_value,
            node_count,
        }
    }

    #[test]
    fn sign_change_beats_every_other_rule() {
        let samples = vec![
            candidate(-30.0, 250.0, 0),
            candidate(-20.0, 40.0, 1),
            candidate(-10.0, -90.0, 1),
            candidate(-5.0, 0.5, 2),
        ];
        let selected =
            select_candidate(&samples, 1, &SolverTolerances::default()).expect("candidate");
        assert_eq!(selected.energy_mev, -20.0);
    }

    #[test]
    fn sign_change_pairs_with_matching_nodes_win_over_earlier_pairs() {
        let samples = vec![
            candidate(-40.0, 100.0, 0),
            candidate(-30.0, -80.0, 0),
            candidate(-20.0, -60.0, 0),
            candidate(-10.0, 20.0, 1),
        ];
        let selected =
            select_candidate(&samples, 1, &SolverTolerances::default()).expect("candidate");
        assert_eq!(selected.energy_mev, -10.0);
    }

    #[test]
    fn small_boundary_rule_prefers_the_target_node_count() {
        let samples = vec![
            candidate(-30.0, 2.0, 0),
            candidate(-20.0, 6.0, 1),
            candidate(-10.0, 500.0, 1),
        ];
        let selected =
            select_candidate(&samples, 1, &SolverTolerances::default()).expect("candidate");
        assert_eq!(selected.energy_mev, -20.0);
    }

    #[test]
    fn node_match_rule_applies_under_the_loose_cutoff() {
        let samples = vec![
            candidate(-30.0, 9.0e4, 2),
            candidate(-20.0, 2.0e4, 1),
            candidate(-10.0, 8.0e5, 1),
        ];
        let selected =
            select_candidate(&samples, 1, &SolverTolerances::default()).expect("candidate");
        assert_eq!(selected.energy_mev, -20.0);
    }

    #[test]
    fn weighted_score_always_returns_something() {
        let samples = vec![
            candidate(-30.0, 45.0, 0),
            candidate(-20.0, 60.0, 3),
            candidate(-10.0, 50.0, 5),
        ];
        // Node distance dominates: target 4 picks the 3-node or 5-node sample
        // with the smaller boundary.
        let selected =
            select_candidate(&samples, 4, &SolverTolerances::default()).expect("candidate");
        assert_eq!(selected.energy_mev, -10.0);
    }

    #[test]
    fn empty_scan_yields_no_candidate() {
        assert!(select_candidate(&[], 0, &SolverTolerances::default()).is_none());
    }
}
