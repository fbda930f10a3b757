//! Simpson's-rule quadrature and probability normalization.

use crate::domain::{SolverError, SolverResult, Wavefunction};

/// Integrate `u(r)^2 dr` over the uniform grid with Simpson's rule:
/// `(h/3) [u0^2 + uN^2 + 4 sum_odd u^2 + 2 sum_even u^2]`.
pub fn probability_norm_integral(samples: &[f64], step_fm: f64) -> SolverResult<f64> {
    if samples.len() < 2 {
        return Err(SolverError::TooFewSamples {
            actual: samples.len(),
        });
    }

    let last = samples.len() - 1;
    let mut total = samples[0] * samples[0] + samples[last] * samples[last];
    for (index, value) in samples.iter().enumerate().take(last).skip(1) {
        let weight = if index % 2 == 1 { 4.0 } else { 2.0 };
        total += weight * value * value;
    }

    let integral = step_fm / 3.0 * total;
    if !integral.is_finite() {
        return Err(SolverError::NonFiniteNorm {
            sample_count: samples.len(),
        });
    }

    Ok(integral)
}

/// Rescale a wavefunction to unit probability norm. A zero integral leaves
/// the input unchanged rather than dividing by zero.
pub fn normalize(wavefunction: &Wavefunction) -> SolverResult<Wavefunction> {
    let integral = probability_norm_integral(wavefunction.samples(), wavefunction.step_fm())?;
    let scale = if integral > 0.0 {
        1.0 / integral.sqrt()
    } else {
        1.0
    };

    let samples = wavefunction
        .samples()
        .iter()
        .map(|value| value * scale)
        .collect();
    Ok(Wavefunction::from_samples(samples, wavefunction.step_fm()))
}

#[cfg(test)]
mod tests {
    use super::{normalize, probability_norm_integral};
    use crate::domain::{SolverError, Wavefunction};

    fn sine_wavefunction(count: usize, length: f64) -> Wavefunction {
        let step = length / (count - 1) as f64;
        let samples = (0..count)
            .map(|index| (index as f64 * step * std::f64::consts::PI / length).sin())
            .collect();
        Wavefunction::from_samples(samples, step)
    }

    #[test]
    fn simpson_matches_the_analytic_half_period_integral() {
        // Integral of sin^2(pi x / L) over [0, L] is L/2.
        let wavefunction = sine_wavefunction(2001, 2.0);
        let integral =
            probability_norm_integral(wavefunction.samples(), wavefunction.step_fm())
                .expect("integration");
        assert!((integral - 1.0).abs() < 1.0e-9);
    }

    #[test]
    fn normalized_wavefunction_has_unit_norm() {
        let wavefunction = sine_wavefunction(801, 7.5);
        let normalized = normalize(&wavefunction).expect("normalization");
        let integral =
            probability_norm_integral(normalized.samples(), normalized.step_fm())
                .expect("integration");
        assert!((integral - 1.0).abs() < 1.0e-10);
    }

    #[test]
    fn normalization_is_idempotent() {
        let wavefunction = sine_wavefunction(501, 3.0);
        let once = normalize(&wavefunction).expect("first pass");
        let twice = normalize(&once).expect("second pass");

        for (first, second) in once.samples().iter().zip(twice.samples()) {
            let scale = first.abs().max(1.0e-300);
            assert!(
                ((first - second) / scale).abs() < 1.0e-6,
                "idempotence violated: {first} vs {second}"
            );
        }
    }

    #[test]
    fn empty_or_single_sample_input_is_an_explicit_error() {
        let empty = Wavefunction::from_samples(Vec::new(), 0.01);
        assert_eq!(
            normalize(&empty),
            Err(SolverError::TooFewSamples { actual: 0 })
        );

        let single = Wavefunction::from_samples(vec![1.0], 0.01);
        assert_eq!(
            normalize(&single),
            Err(SolverError::TooFewSamples { actual: 1 })
        );
    }

    #[test]
    fn all_zero_wavefunction_normalizes_to_itself() {
        let zeros = Wavefunction::from_samples(vec![0.0; 16], 0.1);
        let normalized = normalize(&zeros).expect("normalization");
        assert_eq!(normalized.samples(), zeros.samples());
    }
}
