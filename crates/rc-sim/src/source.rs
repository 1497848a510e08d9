//! Explicit source-term callback interface.
//!
//! The host owns a single slot. Whatever is enrolled there is invoked once
//! per block per integrator stage, after primitives have been recovered,
//! with exclusive access to that block's conserved registers.

use std::ops::AddAssign;

use crate::array::CellArray;
use crate::block::MeshBlock;
use crate::eos::EquationOfState;
use rc_core::Real;

/// Where and when a source is being applied.
#[derive(Clone, Copy, Debug)]
pub struct SourceContext<'a> {
    pub block: &'a MeshBlock,
    /// Simulation time at the start of the stage
    pub time: Real,
    /// Stage time step
    pub dt: Real,
    pub eos: &'a EquationOfState,
}

/// Field registers of one block as seen by a source.
pub struct BlockFields<'a> {
    pub prim: &'a CellArray,
    pub prim_scalar: &'a CellArray,
    pub bcc: &'a CellArray,
    pub cons: &'a mut CellArray,
    pub cons_scalar: &'a mut CellArray,
}

/// Per-invocation tally returned to the host for logging.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SourceReport {
    /// Cells whose conserved state was modified
    pub cells_updated: usize,
    /// Cells the source declined to touch because their state was degenerate
    pub cells_skipped: usize,
    /// Total energy density removed, summed over cells
    pub energy_removed: Real,
}

impl AddAssign for SourceReport {
    fn add_assign(&mut self, rhs: Self) {
        self.cells_updated += rhs.cells_updated;
        self.cells_skipped += rhs.cells_skipped;
        self.energy_removed += rhs.energy_removed;
    }
}

/// An operator-split source term applied by the host every stage.
///
/// Implementations must only touch cells of the block in `ctx` and must not
/// read other blocks; the host runs blocks in parallel.
pub trait ExplicitSource: Send + Sync {
    /// Short name for diagnostics.
    fn name(&self) -> &str;

    fn apply(&self, ctx: &SourceContext<'_>, fields: BlockFields<'_>) -> SourceReport;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_accumulate() {
        let mut total = SourceReport::default();
        total += SourceReport {
            cells_updated: 3,
            cells_skipped: 1,
            energy_removed: 0.5,
        };
        total += SourceReport {
            cells_updated: 2,
            cells_skipped: 0,
            energy_removed: 0.25,
        };
        assert_eq!(total.cells_updated, 5);
        assert_eq!(total.cells_skipped, 1);
        assert_eq!(total.energy_removed, 0.75);
    }
}
