//! Counting of physically meaningful zero crossings.
//!
//! A shooting-method wavefunction carries two kinds of artifact the raw sign
//! changes must not see: the near-origin region where `u` is numerically
//! indistinguishable from zero, and the outer few percent of the grid where an
//! off-eigenvalue tail can spuriously flip sign.

/// Fraction of the grid excluded at the outer boundary.
const BOUNDARY_EXCLUSION: f64 = 0.05;

/// Count interior sign changes of `samples`, ignoring values whose magnitude
/// is below `noise_floor_rel` times the peak magnitude. Both the peak and the
/// count are taken inside the counting window: an off-eigenvalue tail can be
/// orders of magnitude above the interior oscillation, and a peak measured
/// over the full array would raise the threshold until every genuine crossing
/// fell below it. Returns 0 when the usable window has fewer than 3 points.
pub fn count_radial_nodes(samples: &[f64], noise_floor_rel: f64) -> usize {
    let end = samples.len() - (samples.len() as f64 * BOUNDARY_EXCLUSION).ceil() as usize;
    let window = &samples[..end.min(samples.len())];
    let peak = window.iter().fold(0.0_f64, |acc, value| acc.max(value.abs()));
    if peak == 0.0 || !peak.is_finite() {
        return 0;
    }
    let threshold = noise_floor_rel.abs() * peak;

    let start = match window.iter().position(|value| value.abs() > threshold) {
        Some(index) => index,
        None => return 0,
    };
    if end <= start || end - start < 3 {
        return 0;
    }

    let mut nodes = 0;
    let mut last_significant_sign = 0.0_f64;
    for value in &window[start..] {
        if value.abs() <= threshold {
            continue;
        }
        let sign = value.signum();
        if last_significant_sign != 0.0 && sign != last_significant_sign {
            nodes += 1;
        }
        last_significant_sign = sign;
    }

    nodes
}

#[cfg(test)]
mod tests {
    use super::count_radial_nodes;

    const NOISE_FLOOR: f64 = 1.0e-6;

    fn sine_with_crossings(crossings: usize, length: usize) -> Vec<f64> {
        // k interior zero crossings of sin(x) over (0, (k+1) pi).
        let period = (crossings + 1) as f64 * std::f64::consts::PI;
        (0..length)
            .map(|index| (index as f64 / (length - 1) as f64 * period).sin())
            .collect()
    }

    #[test]
    fn counts_hand_constructed_interior_crossings() {
        for crossings in 0..5 {
            let samples = sine_with_crossings(crossings, 400);
            assert_eq!(
                count_radial_nodes(&samples, NOISE_FLOOR),
                crossings,
                "sequence built with {crossings} crossings"
            );
        }
    }

    #[test]
    fn ignores_noise_level_leading_samples() {
        let mut samples = vec![1.0e-12, -1.0e-12, 1.0e-12];
        samples.extend(sine_with_crossings(2, 300));
        assert_eq!(count_radial_nodes(&samples, NOISE_FLOOR), 2);
    }

    #[test]
    fn ignores_boundary_artifacts_in_the_outer_window() {
        let mut samples = sine_with_crossings(1, 400);
        // Artificial shooting-method blow-up with the opposite sign in the
        // excluded trailing 5%.
        let len = samples.len();
        for value in &mut samples[len - 10..] {
            *value = 5.0;
        }
        assert_eq!(count_radial_nodes(&samples, NOISE_FLOOR), 1);
    }

    #[test]
    fn threshold_ignores_a_diverging_tail_outside_the_window() {
        // An off-eigenvalue tail dwarfs the interior oscillation; it must not
        // set the significance threshold and silence every genuine crossing.
        let mut samples = sine_with_crossings(2, 400);
        let len = samples.len();
        for (offset, value) in samples[len - 10..].iter_mut().enumerate() {
            *value = 1.0e9 * (offset + 1) as f64;
        }
        assert_eq!(count_radial_nodes(&samples, NOISE_FLOOR), 2);
    }

    #[test]
    fn short_or_silent_windows_report_zero() {
        assert_eq!(count_radial_nodes(&[], NOISE_FLOOR), 0);
        assert_eq!(count_radial_nodes(&[0.0, 0.0, 0.0, 0.0], NOISE_FLOOR), 0);
        assert_eq!(count_radial_nodes(&[0.0, 1.0], NOISE_FLOOR), 0);
    }

    #[test]
    fn transitions_require_both_samples_above_the_floor() {
        // A dip to noise level and back is not a crossing.
        let samples = [0.0, 0.4, 0.8, 1.0e-9, 0.7, 0.3, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0,
            1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0];
        assert_eq!(count_radial_nodes(&samples, NOISE_FLOOR), 0);
    }
}
