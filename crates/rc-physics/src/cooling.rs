//! Explicit radiative cooling source.
//!
//! Each call removes energy from every owned cell with a single forward
//! Euler update evaluated at the incoming primitive state. Λ is not
//! re-evaluated after the update and nothing limits the step: a `dt` longer
//! than the local cooling time overshoots, possibly to negative energy.
//! Keeping `dt` below the cooling time is the caller's job.

use rc_core::{PhysicalConstants, RcError, RcResult, Real, Temperature, ensure_positive, kelvin};
use rc_sim::{BlockFields, ExplicitSource, IDN, IEN, SourceContext, SourceReport};

use crate::cooling_curve;

/// How the energy loss of a cell is computed.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum CoolingLaw {
    /// `dE = dt · (ρ/amu)² · Λ(T)`
    #[default]
    RadiativeLoss,
    /// `dE = dt/τ · ρ (T − T_goal) / (γ − 1)`, relaxing towards `temp_goal`
    /// on a fixed time scale.
    RelaxationTime { tau: Real },
}

/// Outcome for a single cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CellCooling {
    /// Density or pressure non-positive or non-finite; energy untouched.
    Degenerate,
    /// `T ≤ temp_goal`; energy untouched.
    BelowFloor,
    /// Energy density to subtract.
    Loss(Real),
}

#[derive(Clone, Debug, PartialEq)]
pub struct CoolingSource {
    constants: PhysicalConstants,
    temp_goal: Real,
    law: CoolingLaw,
}

impl CoolingSource {
    /// Temperature below which no cooling is applied [K]. This is a
    /// placeholder far below any radiative floor; set `cooling.temp_goal`
    /// when a physical threshold matters.
    pub const DEFAULT_TEMP_GOAL: Real = 0.1;

    pub fn new(constants: PhysicalConstants, temp_goal: Temperature, law: CoolingLaw) -> RcResult<Self> {
        let temp_goal = kelvin(temp_goal);
        if !temp_goal.is_finite() {
            return Err(RcError::NonFinite {
                what: "temp_goal",
                value: temp_goal,
            });
        }
        if let CoolingLaw::RelaxationTime { tau } = law {
            ensure_positive(tau, "tau")?;
        }
        Ok(Self {
            constants,
            temp_goal,
            law,
        })
    }

    /// Radiative loss with the default floor.
    pub fn radiative(constants: PhysicalConstants) -> Self {
        Self {
            constants,
            temp_goal: Self::DEFAULT_TEMP_GOAL,
            law: CoolingLaw::RadiativeLoss,
        }
    }

    pub fn temp_goal(&self) -> Real {
        self.temp_goal
    }

    pub fn law(&self) -> CoolingLaw {
        self.law
    }

    pub fn constants(&self) -> &PhysicalConstants {
        &self.constants
    }

    /// Energy loss of one cell over `dt`. `gamma` is only read by the
    /// relaxation-time law.
    #[inline]
    pub fn cell(&self, density: Real, pressure: Real, gamma: Real, dt: Real) -> CellCooling {
        if !(density.is_finite() && pressure.is_finite() && density > 0.0 && pressure > 0.0) {
            return CellCooling::Degenerate;
        }
        let amu = self.constants.amu;
        let temp = self.constants.temperature(pressure, density);
        if !temp.is_finite() {
            return CellCooling::Degenerate;
        }
        if temp <= self.temp_goal {
            return CellCooling::BelowFloor;
        }
        let loss = match self.law {
            CoolingLaw::RadiativeLoss => {
                let log10_lambda = cooling_curve::log10_lambda(temp.log10());
                let lambda = Real::powf(10.0, log10_lambda);
                dt * density * density / amu / amu * lambda
            }
            CoolingLaw::RelaxationTime { tau } => {
                dt / tau * density * (temp - self.temp_goal) / (gamma - 1.0)
            }
        };
        CellCooling::Loss(loss)
    }
}

impl ExplicitSource for CoolingSource {
    fn name(&self) -> &str {
        match self.law {
            CoolingLaw::RadiativeLoss => "radiative-cooling",
            CoolingLaw::RelaxationTime { .. } => "relaxation-cooling",
        }
    }

    fn apply(&self, ctx: &SourceContext<'_>, fields: BlockFields<'_>) -> SourceReport {
        let mut report = SourceReport::default();
        let Some(gamma) = ctx.eos.gamma() else {
            return report;
        };
        if !fields.cons.has_var(IEN) {
            return report;
        }
        let block = ctx.block;
        for k in block.ks..=block.ke {
            for j in block.js..=block.je {
                for i in block.is..=block.ie {
                    let density = fields.prim.get(IDN, k, j, i);
                    let pressure = ctx.eos.pressure(fields.prim, k, j, i);
                    match self.cell(density, pressure, gamma, ctx.dt) {
                        CellCooling::Loss(loss) => {
                            *fields.cons.get_mut(IEN, k, j, i) -= loss;
                            report.cells_updated += 1;
                            report.energy_removed += loss;
                        }
                        CellCooling::BelowFloor => {}
                        CellCooling::Degenerate => report.cells_skipped += 1,
                    }
                }
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rc_core::k;

    const GAMMA: Real = 5.0 / 3.0;

    fn source() -> CoolingSource {
        CoolingSource::radiative(PhysicalConstants::CGS_PLASMA)
    }

    /// Pressure giving temperature `t` at density `rho`.
    fn pressure_for(rho: Real, t: Real) -> Real {
        let c = PhysicalConstants::CGS_PLASMA;
        rho * t * c.k_b / (c.mu * c.amu)
    }

    #[test]
    fn loss_matches_closed_form() {
        let c = PhysicalConstants::CGS_PLASMA;
        let rho = 1.0e-24;
        let p = pressure_for(rho, 1.0e6);
        let dt = 1.0e9;
        let CellCooling::Loss(loss) = source().cell(rho, p, GAMMA, dt) else {
            panic!("expected cooling");
        };
        let t = c.temperature(p, rho);
        let lambda = Real::powf(10.0, cooling_curve::log10_lambda(t.log10()));
        assert_eq!(loss, dt * rho * rho / c.amu / c.amu * lambda);
        assert!(loss > 0.0);
    }

    #[test]
    fn doubling_dt_doubles_loss() {
        let rho = 3.0e-25;
        let p = pressure_for(rho, 2.0e7);
        let s = source();
        let (CellCooling::Loss(a), CellCooling::Loss(b)) =
            (s.cell(rho, p, GAMMA, 1.0e8), s.cell(rho, p, GAMMA, 2.0e8))
        else {
            panic!("expected cooling");
        };
        assert_eq!(b, 2.0 * a);
    }

    #[test]
    fn at_or_below_floor_is_untouched() {
        let s = source();
        let rho = 1.0;
        let p = pressure_for(rho, 0.05);
        assert_eq!(s.cell(rho, p, GAMMA, 1.0), CellCooling::BelowFloor);
    }

    #[test]
    fn floor_is_inclusive() {
        let c = PhysicalConstants::CGS_PLASMA;
        let rho = 1.0e-24;
        let p = pressure_for(rho, 1.0e4);
        let at_floor =
            CoolingSource::new(c, k(c.temperature(p, rho)), CoolingLaw::RadiativeLoss).unwrap();
        assert_eq!(at_floor.cell(rho, p, GAMMA, 1.0e9), CellCooling::BelowFloor);

        let just_below = CoolingSource::new(
            c,
            k(c.temperature(p, rho) * (1.0 - 1e-15)),
            CoolingLaw::RadiativeLoss,
        )
        .unwrap();
        assert!(matches!(just_below.cell(rho, p, GAMMA, 1.0e9), CellCooling::Loss(_)));
    }

    #[test]
    fn degenerate_cells_are_flagged() {
        let s = source();
        assert_eq!(s.cell(0.0, 1.0, GAMMA, 1.0), CellCooling::Degenerate);
        assert_eq!(s.cell(-1.0, 1.0, GAMMA, 1.0), CellCooling::Degenerate);
        assert_eq!(s.cell(1.0, 0.0, GAMMA, 1.0), CellCooling::Degenerate);
        assert_eq!(s.cell(1.0, Real::NAN, GAMMA, 1.0), CellCooling::Degenerate);
        // p/ρ overflows to an infinite temperature
        assert_eq!(s.cell(1.0e-300, 1.0e10, GAMMA, 1.0), CellCooling::Degenerate);
    }

    #[test]
    fn relaxation_law_is_opt_in() {
        let c = PhysicalConstants::CGS_PLASMA;
        let s = CoolingSource::new(c, k(0.1), CoolingLaw::RelaxationTime { tau: 0.01 }).unwrap();
        let rho = 2.0;
        let p = pressure_for(rho, 100.0);
        let t = c.temperature(p, rho);
        let CellCooling::Loss(loss) = s.cell(rho, p, GAMMA, 1e-3) else {
            panic!("expected cooling");
        };
        assert_eq!(loss, 1e-3 / 0.01 * rho * (t - 0.1) / (GAMMA - 1.0));
        assert_eq!(CoolingLaw::default(), CoolingLaw::RadiativeLoss);
    }

    #[test]
    fn constructor_validates() {
        let c = PhysicalConstants::CGS_PLASMA;
        assert!(CoolingSource::new(c, k(Real::NAN), CoolingLaw::RadiativeLoss).is_err());
        assert!(CoolingSource::new(c, k(0.1), CoolingLaw::RelaxationTime { tau: 0.0 }).is_err());
        let s = CoolingSource::new(c, k(1.0e4), CoolingLaw::RadiativeLoss).unwrap();
        assert_eq!(s.temp_goal(), 1.0e4);
        assert_eq!(s.name(), "radiative-cooling");
    }
}
