use std::path::PathBuf;

pub type SolverResult<T> = Result<T, SolverError>;

/// Error taxonomy for the bound-state solver.
///
/// Configuration errors are raised before any integration begins; integration
/// and normalization errors indicate that a propagated wavefunction cannot be
/// trusted. Search failure (no eigenstate with the requested node count) is
/// deliberately NOT an error: it is reported through
/// [`crate::domain::BoundStateResult::converged`] and the attached
/// diagnostics, so internal scan/refine stages never raise.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SolverError {
    #[error("potential depth must be finite and > 0 MeV, got {value}")]
    InvalidDepth { value: f64 },
    #[error("potential radius must be finite and > 0 fm, got {value}")]
    InvalidRadius { value: f64 },
    #[error("potential diffuseness must be finite and > 0 fm, got {value}")]
    InvalidDiffuseness { value: f64 },
    #[error("reduced mass must be finite and > 0 MeV, got {value}")]
    InvalidReducedMass { value: f64 },
    #[error("radial grid requires finite r_max > step > 0, got r_max={r_max_fm} fm, step={step_fm} fm")]
    InvalidGrid { r_max_fm: f64, step_fm: f64 },
    #[error(
        "numerov denominator collapsed at sample {index} (r={radius_fm} fm, E={energy_mev} MeV): \
         step too coarse for this potential"
    )]
    DegenerateStep {
        index: usize,
        radius_fm: f64,
        energy_mev: f64,
    },
    #[error("integration produced a non-finite sample at index {index} (E={energy_mev} MeV)")]
    NonFiniteSample { index: usize, energy_mev: f64 },
    #[error("normalization requires at least 2 samples, got {actual}")]
    TooFewSamples { actual: usize },
    #[error("normalization integral is non-finite for a {sample_count}-sample wavefunction")]
    NonFiniteNorm { sample_count: usize },
    #[error("every trial energy in the search bracket failed to integrate: {last}")]
    SearchSpaceExhausted { last: Box<SolverError> },
    #[error("search brackets for the {depth_mev} MeV well contained no negative trial energies")]
    EmptySearchSpace { depth_mev: f64 },
    #[error("failed to write report '{}': {message}", path.display())]
    ReportWrite { path: PathBuf, message: String },
}
