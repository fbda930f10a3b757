//! Physical constants shared across the solver.
//!
//! The reduced mass and `hbar*c` live in an immutable struct injected into the
//! propagator rather than process-wide state, so different particle pairs can
//! be solved side by side.

use crate::domain::{PotentialParams, SolverError, SolverResult};
use serde::{Deserialize, Serialize};

pub const HBAR_C_MEV_FM: f64 = 197.326_980_4_f64;
pub const PROTON_MASS_MEV: f64 = 938.272_088_16_f64;
pub const NEUTRON_MASS_MEV: f64 = 939.565_420_52_f64;
pub const ALPHA_MASS_MEV: f64 = 3_727.379_406_6_f64;
pub const OXYGEN16_MASS_MEV: f64 = 14_895.081_f64;

/// Immutable kinematic constants for one particle pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicalConstants {
    reduced_mass_mev: f64,
    hbar_c_mev_fm: f64,
}

impl PhysicalConstants {
    pub fn from_reduced_mass(reduced_mass_mev: f64) -> SolverResult<Self> {
        if !reduced_mass_mev.is_finite() || reduced_mass_mev <= 0.0 {
            return Err(SolverError::InvalidReducedMass {
                value: reduced_mass_mev,
            });
        }

        Ok(Self {
            reduced_mass_mev,
            hbar_c_mev_fm: HBAR_C_MEV_FM,
        })
    }

    pub fn from_pair_masses(mass_a_mev: f64, mass_b_mev: f64) -> SolverResult<Self> {
        let sum = mass_a_mev + mass_b_mev;
        if !sum.is_finite() || mass_a_mev <= 0.0 || mass_b_mev <= 0.0 {
            return Err(SolverError::InvalidReducedMass { value: sum });
        }
        Self::from_reduced_mass(mass_a_mev * mass_b_mev / sum)
    }

    /// Neutron-proton pair (deuteron-like light systems).
    pub fn neutron_proton() -> Self {
        Self::pair(NEUTRON_MASS_MEV, PROTON_MASS_MEV)
    }

    /// Alpha-neutron pair (helium-5 style systems).
    pub fn alpha_neutron() -> Self {
        Self::pair(ALPHA_MASS_MEV, NEUTRON_MASS_MEV)
    }

    /// Neutron bound to an oxygen-16 core (single-particle shell states).
    pub fn neutron_oxygen16() -> Self {
        Self::pair(NEUTRON_MASS_MEV, OXYGEN16_MASS_MEV)
    }

    fn pair(mass_a_mev: f64, mass_b_mev: f64) -> Self {
        Self {
            reduced_mass_mev: mass_a_mev * mass_b_mev / (mass_a_mev + mass_b_mev),
            hbar_c_mev_fm: HBAR_C_MEV_FM,
        }
    }

    pub fn reduced_mass_mev(&self) -> f64 {
        self.reduced_mass_mev
    }

    pub fn hbar_c_mev_fm(&self) -> f64 {
        self.hbar_c_mev_fm
    }

    /// `2 mu / hbar^2` in fm^-2 MeV^-1.
    pub fn two_mu_over_hbar_sq(&self) -> f64 {
        2.0 * self.reduced_mass_mev / (self.hbar_c_mev_fm * self.hbar_c_mev_fm)
    }

    /// Dimensionless well strength `lambda = (2 mu / hbar^2) V0 R0^2` for a
    /// given potential. Fixes the entire dimensionless eigenvalue problem.
    pub fn coupling(&self, potential: &PotentialParams) -> f64 {
        self.two_mu_over_hbar_sq()
            * potential.depth_mev()
            * potential.radius_fm()
            * potential.radius_fm()
    }
}
