//! Refinement cascade: secant, then bracketed bisection, then dense grid
//! search. Each stage reports a tagged outcome and the first success wins;
//! a stage's own output is accepted only below the sanity threshold, so a
//! diverging stage hands over to the next instead of poisoning the result.

use super::SearchContext;
use crate::domain::{Candidate, RefinementStage};
use crate::numerics::linear_grid;
use crate::solver::bracket::EnergyBracket;

#[derive(Debug)]
pub(crate) enum StageOutcome {
    Success(Candidate),
    NotApplicable,
    Failed,
}

#[derive(Debug)]
pub(crate) struct Refinement {
    pub candidate: Candidate,
    pub stage: RefinementStage,
}

pub(crate) fn refine(
    context: &SearchContext<'_>,
    coarse: &Candidate,
    bracket: &EnergyBracket,
) -> Option<Refinement> {
    if let StageOutcome::Success(candidate) = secant_stage(context, coarse, bracket) {
        return Some(Refinement {
            candidate,
            stage: RefinementStage::Secant,
        });
    }

    if let StageOutcome::Success(candidate) = bisection_stage(context, bracket) {
        return Some(Refinement {
            candidate,
            stage: RefinementStage::Bisection,
        });
    }

    if let StageOutcome::Success(candidate) = grid_search_stage(context, bracket) {
        return Some(Refinement {
            candidate,
            stage: RefinementStage::GridSearch,
        });
    }

    None
}

/// Secant iteration seeded by whichever two of `{guess, lo, hi}` carry the
/// smallest boundary magnitudes. The converged root is clamped to the bracket
/// and rejected when it sits within the edge margin of zero or of the well
/// floor, which is where a diverging secant ends up.
fn secant_stage(
    context: &SearchContext<'_>,
    coarse: &Candidate,
    bracket: &EnergyBracket,
) -> StageOutcome {
    let tolerances = &context.config.tolerances;
    let mut seeds: Vec<Candidate> = [bracket.e_min_mev, bracket.e_max_mev]
        .iter()
        .filter_map(|&energy| context.evaluate(energy).ok())
        .collect();
    seeds.push(coarse.clone());
    seeds.sort_by(|lhs, rhs| lhs.boundary_magnitude().total_cmp(&rhs.boundary_magnitude()));
    if seeds.len() < 2 {
        return StageOutcome::Failed;
    }

    let mut previous = seeds[1].clone();
    let mut current = seeds[0].clone();
    for _ in 0..context.config.secant_max_iterations {
        let slope_denominator = current.boundary_value - previous.boundary_value;
        if slope_denominator == 0.0 {
            return StageOutcome::Failed;
        }

        let proposed = current.energy_mev
            - current.boundary_value * (current.energy_mev - previous.energy_mev)
                / slope_denominator;
        if !proposed.is_finite() {
            return StageOutcome::Failed;
        }
        let clamped = bracket.clamp(proposed);

        let Ok(next) = context.evaluate(clamped) else {
            return StageOutcome::Failed;
        };
        let step = (next.energy_mev - current.energy_mev).abs();
        previous = current;
        current = next;

        if step < tolerances.energy_tolerance_mev {
            break;
        }
    }

    let depth = context.potential.depth_mev();
    let margin = tolerances.secant_edge_margin * depth;
    if current.energy_mev > -margin || current.energy_mev < -(depth - margin) {
        return StageOutcome::Failed;
    }
    if current.boundary_magnitude() < tolerances.stage_sanity {
        StageOutcome::Success(current)
    } else {
        StageOutcome::Failed
    }
}

/// Bracketed bisection. Applicable only when the boundary values at
/// `{lo, mid, hi}` do not all share one sign; a short pre-scan then localizes
/// a genuine sign change before bisecting it.
fn bisection_stage(context: &SearchContext<'_>, bracket: &EnergyBracket) -> StageOutcome {
    let tolerances = &context.config.tolerances;
    let mid = 0.5 * (bracket.e_min_mev + bracket.e_max_mev);
    let probes: Vec<Candidate> = [bracket.e_min_mev, mid, bracket.e_max_mev]
        .iter()
        .filter_map(|&energy| context.evaluate(energy).ok())
        .collect();
    if probes.len() < 2 {
        return StageOutcome::Failed;
    }
    let all_one_sign = probes
        .windows(2)
        .all(|pair| pair[0].boundary_value * pair[1].boundary_value > 0.0);
    if all_one_sign {
        return StageOutcome::NotApplicable;
    }

    let Some((mut lower, mut upper)) = prescan_sign_change(context, bracket) else {
        return StageOutcome::NotApplicable;
    };

    for _ in 0..context.config.bisection_max_iterations {
        if (upper.energy_mev - lower.energy_mev).abs() < tolerances.energy_tolerance_mev {
            break;
        }
        let midpoint = 0.5 * (lower.energy_mev + upper.energy_mev);
        let Ok(candidate) = context.evaluate(midpoint) else {
            return StageOutcome::Failed;
        };
        if candidate.boundary_value == 0.0 {
            lower = candidate.clone();
            upper = candidate;
            break;
        }
        if candidate.boundary_value * lower.boundary_value < 0.0 {
            upper = candidate;
        } else {
            lower = candidate;
        }
    }

    let best = if lower.boundary_magnitude() <= upper.boundary_magnitude() {
        lower
    } else {
        upper
    };
    if best.boundary_magnitude() < tolerances.stage_sanity {
        StageOutcome::Success(best)
    } else {
        StageOutcome::Failed
    }
}

fn prescan_sign_change(
    context: &SearchContext<'_>,
    bracket: &EnergyBracket,
) -> Option<(Candidate, Candidate)> {
    let energies = linear_grid(
        bracket.e_min_mev,
        bracket.e_max_mev,
        context.config.bisection_prescan_samples.max(2),
    )?;
    let samples: Vec<Candidate> = energies
        .into_iter()
        .filter_map(|energy| context.evaluate(energy).ok())
        .collect();

    for pair in samples.windows(2) {
        if pair[0].boundary_value * pair[1].boundary_value < 0.0 {
            return Some((pair[0].clone(), pair[1].clone()));
        }
    }
    None
}

/// Last resort: dense sampling, minimum boundary magnitude wins.
fn grid_search_stage(context: &SearchContext<'_>, bracket: &EnergyBracket) -> StageOutcome {
    let Some(energies) = linear_grid(
        bracket.e_min_mev,
        bracket.e_max_mev,
        context.config.grid_search_samples.max(2),
    ) else {
        return StageOutcome::Failed;
    };

    let best = energies
        .into_iter()
        .filter(|&energy| energy < 0.0)
        .filter_map(|energy| context.evaluate(energy).ok())
        .min_by(|lhs, rhs| lhs.boundary_magnitude().total_cmp(&rhs.boundary_magnitude()));

    match best {
        Some(candidate)
            if candidate.boundary_magnitude() < context.config.tolerances.stage_sanity =>
        {
            StageOutcome::Success(candidate)
        }
        _ => StageOutcome::Failed,
    }
}
