//! Fourth-order Numerov propagation of the radial equation.
//!
//! The integration runs in dimensionless variables `rho = r/R0`,
//! `eps = E/V0`, `lambda = (2 mu / hbar^2) V0 R0^2`: physical-unit recurrences
//! over tens of femtometers with MeV-scale potentials are poorly conditioned
//! for some parameter combinations, while the dimensionless form keeps every
//! intermediate magnitude near unity. The returned samples are rescaled by
//! `R0` to physical units.

use crate::common::PhysicalConstants;
use crate::domain::{GridSpec, PotentialParams, SolverError, SolverResult, Wavefunction};

const DENOMINATOR_FLOOR: f64 = 1.0e-12;

/// Integrate the radial equation at trial energy `energy_mev` for orbital
/// angular momentum `l`, producing `u(r)` over the grid.
///
/// The effective function is `f(rho) = lambda (v(rho) - eps) + l(l+1)/rho^2`,
/// with `f(0) = 0` by convention: the centrifugal term is singular at the
/// origin but multiplies `u(0) = 0` exactly. Seeds follow the regular
/// power-series solution, `u[0] = 0`, `u[1] = h^(l+1)`.
pub fn integrate_radial(
    potential: &PotentialParams,
    constants: &PhysicalConstants,
    l: u32,
    energy_mev: f64,
    grid: GridSpec,
) -> SolverResult<Wavefunction> {
    let radius = potential.radius_fm();
    let lambda = constants.coupling(potential);
    let epsilon = energy_mev / potential.depth_mev();
    let h = grid.step_fm() / radius;
    let h_sq_12 = h * h / 12.0;
    let centrifugal = f64::from(l * (l + 1));
    let sample_count = grid.sample_count();

    let effective = |index: usize| -> f64 {
        if index == 0 {
            return 0.0;
        }
        let rho = index as f64 * h;
        lambda * (potential.shape_at(rho) - epsilon) + centrifugal / (rho * rho)
    };

    let mut samples = Vec::with_capacity(sample_count);
    samples.push(0.0);
    if sample_count > 1 {
        samples.push(h.powi(l as i32 + 1));
    }

    let mut f_prev = effective(0);
    let mut f_here = effective(1);
    for index in 1..sample_count.saturating_sub(1) {
        let f_next = effective(index + 1);
        let denominator = 1.0 - h_sq_12 * f_next;
        if denominator.abs() < DENOMINATOR_FLOOR {
            return Err(SolverError::DegenerateStep {
                index: index + 1,
                radius_fm: (index + 1) as f64 * grid.step_fm(),
                energy_mev,
            });
        }

        let u_here = samples[index];
        let u_prev = samples[index - 1];
        let numerator =
            2.0 * u_here - u_prev + h_sq_12 * (10.0 * f_here * u_here + f_prev * u_prev);
        let u_next = numerator / denominator;
        if !u_next.is_finite() {
            return Err(SolverError::NonFiniteSample {
                index: index + 1,
                energy_mev,
            });
        }

        samples.push(u_next);
        f_prev = f_here;
        f_here = f_next;
    }

    for sample in &mut samples {
        *sample *= radius;
    }

    Ok(Wavefunction::from_samples(samples, grid.step_fm()))
}

#[cfg(test)]
mod tests {
    use super::integrate_radial;
    use crate::common::PhysicalConstants;
    use crate::domain::{GridSpec, PotentialParams};

    fn deuteron_well() -> (PotentialParams, PhysicalConstants, GridSpec) {
        (
            PotentialParams::new(50.0, 1.5, 0.6).expect("valid potential"),
            PhysicalConstants::neutron_proton(),
            GridSpec::new(20.0, 0.01).expect("valid grid"),
        )
    }

    #[test]
    fn seeds_follow_the_regular_solution_at_the_origin() {
        let (potential, constants, grid) = deuteron_well();

        let s_wave =
            integrate_radial(&potential, &constants, 0, -2.0, grid).expect("integration");
        let h_rho = grid.step_fm() / potential.radius_fm();
        assert_eq!(s_wave.samples()[0], 0.0);
        assert!((s_wave.samples()[1] - potential.radius_fm() * h_rho).abs() < 1.0e-15);

        let p_wave =
            integrate_radial(&potential, &constants, 1, -2.0, grid).expect("integration");
        assert!(
            (p_wave.samples()[1] - potential.radius_fm() * h_rho * h_rho).abs() < 1.0e-15,
            "l=1 seed should follow h^(l+1)"
        );
    }

    #[test]
    fn sample_count_matches_the_grid() {
        let (potential, constants, grid) = deuteron_well();
        let wavefunction =
            integrate_radial(&potential, &constants, 0, -5.0, grid).expect("integration");
        assert_eq!(wavefunction.samples().len(), grid.sample_count());
        assert_eq!(wavefunction.step_fm(), grid.step_fm());
    }

    #[test]
    fn boundary_value_changes_sign_across_the_deuteron_eigenvalue() {
        // The single s-wave level of this well sits near -2.2 MeV, so the
        // boundary value at -4 MeV and -1 MeV must bracket a zero.
        let (potential, constants, grid) = deuteron_well();
        let below = integrate_radial(&potential, &constants, 0, -4.0, grid)
            .expect("integration")
            .boundary_value();
        let above = integrate_radial(&potential, &constants, 0, -1.0, grid)
            .expect("integration")
            .boundary_value();

        assert!(
            below * above < 0.0,
            "expected a sign change, got {below} and {above}"
        );
    }

    #[test]
    fn all_samples_are_finite_for_ordinary_inputs() {
        let (potential, constants, grid) = deuteron_well();
        for energy in [-45.0, -20.0, -10.0, -0.5] {
            let wavefunction = integrate_radial(&potential, &constants, 2, energy, grid)
                .expect("integration");
            assert!(wavefunction.samples().iter().all(|value| value.is_finite()));
        }
    }
}
