//! Bound-state eigenvalue solver for a Woods-Saxon nuclear well.
//!
//! The radial Schrödinger equation is integrated with the Numerov method on a
//! uniform grid; eigenvalues are located by a shooting search that drives the
//! outer boundary value of the trial wavefunction to zero while matching the
//! requested interior node count.

pub mod common;
pub mod domain;
pub mod numerics;
pub mod report;
pub mod solver;

pub use common::PhysicalConstants;
pub use domain::{
    BoundStateResult, GridSpec, PotentialParams, QuantumLabel, RefinementStage, SolveDiagnostics,
    SolverError, SolverResult, Wavefunction,
};
pub use report::BoundStateReport;
pub use solver::{BoundStateSolver, SolverConfig, SolverTolerances, solve_bound_state};
