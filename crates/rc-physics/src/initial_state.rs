//! Uniform, at-rest initial condition.

use rc_core::{PhysicalConstants, RcResult, Real, Temperature, ensure_positive, kelvin};
use rc_sim::{CellArray, EquationOfState, IDN, IEN, IM1, IM2, IM3, MeshBlock};

/// Gas of density `density` and temperature `temperature` everywhere, at rest.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UniformState {
    density: Real,
    temperature: Real,
    constants: PhysicalConstants,
}

impl UniformState {
    pub fn new(density: Real, temperature: Temperature, constants: PhysicalConstants) -> RcResult<Self> {
        let density = ensure_positive(density, "rho")?;
        let temperature = ensure_positive(kelvin(temperature), "T")?;
        Ok(Self {
            density,
            temperature,
            constants,
        })
    }

    pub fn density(&self) -> Real {
        self.density
    }

    pub fn temperature(&self) -> Real {
        self.temperature
    }

    /// Total energy density for an ideal gas with adiabatic index `gamma`.
    pub fn energy_density(&self, gamma: Real) -> Real {
        self.constants
            .thermal_energy_density(self.density, self.temperature, gamma)
    }

    /// Fill the owned cells of `block`. The energy component is written only
    /// when `eos` carries one.
    pub fn fill(&self, block: &MeshBlock, eos: &EquationOfState, cons: &mut CellArray) {
        let energy = eos.gamma().map(|gamma| self.energy_density(gamma));
        for k in block.ks..=block.ke {
            for j in block.js..=block.je {
                for i in block.is..=block.ie {
                    cons.set(IDN, k, j, i, self.density);

                    cons.set(IM1, k, j, i, 0.0);
                    cons.set(IM2, k, j, i, 0.0);
                    cons.set(IM3, k, j, i, 0.0);

                    if let Some(e) = energy {
                        cons.set(IEN, k, j, i, e);
                    }
                }
            }
        }
    }
}
