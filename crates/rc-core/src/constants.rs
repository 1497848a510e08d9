//! Physical constants shared by every temperature definition in the code.
//!
//! The cooling term and the initial state generator both convert between
//! temperature and (pressure, density) through [`PhysicalConstants`]; they
//! must see the same numbers or the two definitions of T drift apart.

use crate::numeric::Real;

/// Gas constants in cgs units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicalConstants {
    /// Mean molecular weight (dimensionless)
    pub mu: Real,
    /// Boltzmann constant [erg/K]
    pub k_b: Real,
    /// Atomic mass unit [g]
    pub amu: Real,
}

impl PhysicalConstants {
    /// Fully ionized plasma at solar metallicity.
    pub const CGS_PLASMA: Self = Self {
        mu: 0.62,
        k_b: 1.3807e-16,
        amu: 1.660539e-24,
    };

    /// Gas temperature [K] from pressure and density: `p/ρ · μ·amu / k_B`.
    #[inline]
    pub fn temperature(&self, pressure: Real, density: Real) -> Real {
        pressure / density * self.mu * self.amu / self.k_b
    }

    /// Thermal energy density of gas at rest: `ρ·k_B·T / (γ−1) / μ / amu`.
    #[inline]
    pub fn thermal_energy_density(&self, density: Real, temperature: Real, gamma: Real) -> Real {
        density * self.k_b * temperature / (gamma - 1.0) / self.mu / self.amu
    }
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self::CGS_PLASMA
    }
}
