//! Equation of state: variable layout and conserved → primitive recovery.

use crate::array::{CellArray, IDN, IEN, IM1, IM2, IM3, IPR, IVX, IVY, IVZ};
use crate::block::MeshBlock;
use crate::error::{SimError, SimResult};
use rc_core::Real;

/// Equation of state of the host fluid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EquationOfState {
    /// Ideal gas with an energy equation.
    Adiabatic { gamma: Real },
    /// Barotropic gas: `p = ρ c²`, no energy field is carried.
    Isothermal { iso_sound_speed: Real },
}

impl EquationOfState {
    pub fn adiabatic(gamma: Real) -> SimResult<Self> {
        if !(gamma.is_finite() && gamma > 1.0) {
            return Err(SimError::InvalidArg {
                what: "gamma must be finite and > 1",
            });
        }
        Ok(Self::Adiabatic { gamma })
    }

    pub fn isothermal(iso_sound_speed: Real) -> SimResult<Self> {
        if !(iso_sound_speed.is_finite() && iso_sound_speed > 0.0) {
            return Err(SimError::InvalidArg {
                what: "iso_sound_speed must be finite and positive",
            });
        }
        Ok(Self::Isothermal { iso_sound_speed })
    }

    /// Whether the conserved state carries a total energy density.
    pub fn has_energy(&self) -> bool {
        matches!(self, Self::Adiabatic { .. })
    }

    /// Number of hydro variables (density, 3 momenta, optionally energy).
    pub fn nhydro(&self) -> usize {
        if self.has_energy() { 5 } else { 4 }
    }

    pub fn gamma(&self) -> Option<Real> {
        match self {
            Self::Adiabatic { gamma } => Some(*gamma),
            Self::Isothermal { .. } => None,
        }
    }

    /// Recover primitives on the owned cells of `block`.
    ///
    /// No floors are applied; a non-positive density shows up as a
    /// non-finite velocity and is left for the diagnostics to report.
    pub fn conserved_to_primitive(&self, block: &MeshBlock, cons: &CellArray, prim: &mut CellArray) {
        for (k, j, i) in block.owned() {
            let d = cons.get(IDN, k, j, i);
            let m1 = cons.get(IM1, k, j, i);
            let m2 = cons.get(IM2, k, j, i);
            let m3 = cons.get(IM3, k, j, i);
            let di = 1.0 / d;
            let (v1, v2, v3) = (m1 * di, m2 * di, m3 * di);
            prim.set(IDN, k, j, i, d);
            prim.set(IVX, k, j, i, v1);
            prim.set(IVY, k, j, i, v2);
            prim.set(IVZ, k, j, i, v3);
            if let Self::Adiabatic { gamma } = self {
                let ke = 0.5 * d * (v1 * v1 + v2 * v2 + v3 * v3);
                let e = cons.get(IEN, k, j, i);
                prim.set(IPR, k, j, i, (gamma - 1.0) * (e - ke));
            }
        }
    }

    /// Pressure of an owned cell, whatever the EOS.
    pub fn pressure(&self, prim: &CellArray, k: usize, j: usize, i: usize) -> Real {
        match self {
            Self::Adiabatic { .. } => prim.get(IPR, k, j, i),
            Self::Isothermal { iso_sound_speed } => {
                prim.get(IDN, k, j, i) * iso_sound_speed * iso_sound_speed
            }
        }
    }
}
