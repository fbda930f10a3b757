pub mod constants;

pub use constants::{
    ALPHA_MASS_MEV, HBAR_C_MEV_FM, NEUTRON_MASS_MEV, OXYGEN16_MASS_MEV, PROTON_MASS_MEV,
    PhysicalConstants,
};
