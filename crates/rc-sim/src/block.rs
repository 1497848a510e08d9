//! Mesh blocks: index bounds plus the field registers a block owns.

use crate::array::CellArray;
use crate::eos::EquationOfState;
use rc_core::BlockId;

/// Index bounds of one block. Owned cells are `ks..=ke`, `js..=je`,
/// `is..=ie`; everything outside is ghost.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MeshBlock {
    pub gid: BlockId,
    /// Logical location of the block in the block grid (x1, x2, x3)
    pub lloc: [usize; 3],
    pub is: usize,
    pub ie: usize,
    pub js: usize,
    pub je: usize,
    pub ks: usize,
    pub ke: usize,
    /// Total cells including ghosts (x1, x2, x3)
    pub ncells: [usize; 3],
}

impl MeshBlock {
    /// Build bounds for a block of `block_nx` owned cells with `nghost`
    /// ghost layers in every active direction (a direction with a single
    /// cell carries no ghosts).
    pub fn new(gid: BlockId, lloc: [usize; 3], block_nx: [usize; 3], nghost: usize) -> Self {
        let ng = |n: usize| if n > 1 { nghost } else { 0 };
        let (g1, g2, g3) = (ng(block_nx[0]), ng(block_nx[1]), ng(block_nx[2]));
        Self {
            gid,
            lloc,
            is: g1,
            ie: g1 + block_nx[0] - 1,
            js: g2,
            je: g2 + block_nx[1] - 1,
            ks: g3,
            ke: g3 + block_nx[2] - 1,
            ncells: [
                block_nx[0] + 2 * g1,
                block_nx[1] + 2 * g2,
                block_nx[2] + 2 * g3,
            ],
        }
    }

    pub fn owned_cells(&self) -> usize {
        (self.ie - self.is + 1) * (self.je - self.js + 1) * (self.ke - self.ks + 1)
    }

    /// Iterate owned `(k, j, i)` triples with `i` innermost.
    pub fn owned(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        (self.ks..=self.ke).flat_map(move |k| {
            (self.js..=self.je).flat_map(move |j| (self.is..=self.ie).map(move |i| (k, j, i)))
        })
    }

    /// Zeroed array with this block's full (ghosted) extent.
    pub fn alloc(&self, nvar: usize) -> CellArray {
        CellArray::zeros(nvar, self.ncells[2], self.ncells[1], self.ncells[0])
    }
}

/// A block together with its field registers.
#[derive(Clone, Debug)]
pub struct BlockData {
    pub block: MeshBlock,
    /// Conserved variables
    pub cons: CellArray,
    /// Primitive variables
    pub prim: CellArray,
    /// Passive scalar densities
    pub cons_scalar: CellArray,
    /// Passive scalar concentrations
    pub prim_scalar: CellArray,
    /// Cell-centred magnetic field (empty for pure hydro)
    pub bcc: CellArray,
    /// Start-of-step copies of `cons` / `cons_scalar` for multi-stage integrators
    pub(crate) cons0: CellArray,
    pub(crate) cons_scalar0: CellArray,
}

impl BlockData {
    pub fn new(block: MeshBlock, eos: &EquationOfState, nscalars: usize) -> Self {
        let nhydro = eos.nhydro();
        let cons = block.alloc(nhydro);
        let prim = block.alloc(nhydro);
        let cons_scalar = block.alloc(nscalars);
        let prim_scalar = block.alloc(nscalars);
        Self {
            cons0: cons.clone(),
            cons_scalar0: cons_scalar.clone(),
            cons,
            prim,
            cons_scalar,
            prim_scalar,
            bcc: CellArray::empty(),
            block,
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn owned_cells_sit_inside_the_ghost_frame(
            nx1 in 1_usize..12,
            nx2 in 1_usize..12,
            nx3 in 1_usize..12,
            nghost in 1_usize..4,
        ) {
            let b = MeshBlock::new(BlockId::from_index(0), [0, 0, 0], [nx1, nx2, nx3], nghost);
            prop_assert_eq!(b.owned_cells(), nx1 * nx2 * nx3);
            prop_assert_eq!(b.owned().count(), b.owned_cells());
            for (k, j, i) in b.owned() {
                prop_assert!(i < b.ncells[0] && j < b.ncells[1] && k < b.ncells[2]);
            }
            prop_assert_eq!(b.ncells[0] - b.ie - 1, b.is);
            prop_assert_eq!(b.ncells[2] - b.ke - 1, b.ks);
        }
    }
}
