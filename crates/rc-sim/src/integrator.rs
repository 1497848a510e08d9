//! Stage driver: primitive recovery followed by the explicit source.
//!
//! The host carries no flux update, so a step is the source term integrated
//! with the selected scheme.

use rayon::prelude::*;

use crate::block::BlockData;
use crate::eos::EquationOfState;
use crate::mesh::Mesh;
use crate::source::{BlockFields, ExplicitSource, SourceContext, SourceReport};
use rc_core::Real;

/// Integrator selection for the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IntegratorType {
    /// Van Leer predictor-corrector (default, 2 stages).
    #[default]
    Vl2,
    /// Forward Euler (1 stage).
    ForwardEuler,
}

impl IntegratorType {
    pub fn nstages(self) -> usize {
        match self {
            Self::Vl2 => 2,
            Self::ForwardEuler => 1,
        }
    }
}

/// Advance every block by `dt`. Blocks run in parallel; the returned report
/// sums the final stage of every block.
pub fn advance(mesh: &mut Mesh, integrator: IntegratorType, time: Real, dt: Real) -> SourceReport {
    let eos = *mesh.eos();
    let source = mesh.explicit_source_handle();
    mesh.blocks_mut()
        .par_iter_mut()
        .map(|bd| step_block(bd, &eos, source.as_deref(), integrator, time, dt))
        .reduce(SourceReport::default, |mut a, b| {
            a += b;
            a
        })
}

fn step_block(
    bd: &mut BlockData,
    eos: &EquationOfState,
    source: Option<&dyn ExplicitSource>,
    integrator: IntegratorType,
    time: Real,
    dt: Real,
) -> SourceReport {
    match integrator {
        IntegratorType::ForwardEuler => {
            recover(bd, eos);
            apply_source(bd, eos, source, time, dt)
        }
        IntegratorType::Vl2 => {
            bd.cons0.copy_from(&bd.cons);
            bd.cons_scalar0.copy_from(&bd.cons_scalar);

            // Predictor: half step from the start-of-step state.
            recover(bd, eos);
            apply_source(bd, eos, source, time, 0.5 * dt);

            // Corrector: full step from the start-of-step registers, with
            // the source evaluated at the half-step primitives.
            recover(bd, eos);
            bd.cons.copy_from(&bd.cons0);
            bd.cons_scalar.copy_from(&bd.cons_scalar0);
            apply_source(bd, eos, source, time + 0.5 * dt, dt)
        }
    }
}

/// Conserved → primitive on owned cells, scalars included.
pub(crate) fn recover(bd: &mut BlockData, eos: &EquationOfState) {
    eos.conserved_to_primitive(&bd.block, &bd.cons, &mut bd.prim);
    let nscalars = bd.cons_scalar.nvar();
    for n in 0..nscalars {
        for (k, j, i) in bd.block.owned() {
            let d = bd.prim.get(crate::array::IDN, k, j, i);
            bd.prim_scalar.set(n, k, j, i, bd.cons_scalar.get(n, k, j, i) / d);
        }
    }
}

fn apply_source(
    bd: &mut BlockData,
    eos: &EquationOfState,
    source: Option<&dyn ExplicitSource>,
    time: Real,
    dt: Real,
) -> SourceReport {
    let Some(source) = source else {
        return SourceReport::default();
    };
    let ctx = SourceContext {
        block: &bd.block,
        time,
        dt,
        eos,
    };
    let fields = BlockFields {
        prim: &bd.prim,
        prim_scalar: &bd.prim_scalar,
        bcc: &bd.bcc,
        cons: &mut bd.cons,
        cons_scalar: &mut bd.cons_scalar,
    };
    source.apply(&ctx, fields)
}
