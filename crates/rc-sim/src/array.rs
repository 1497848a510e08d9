//! Dense per-block field storage indexed as `(n, k, j, i)`.

use rc_core::Real;

/// Conserved variable indices.
pub const IDN: usize = 0;
pub const IM1: usize = 1;
pub const IM2: usize = 2;
pub const IM3: usize = 3;
pub const IEN: usize = 4;

/// Primitive variable indices (density shares `IDN`).
pub const IVX: usize = 1;
pub const IVY: usize = 2;
pub const IVZ: usize = 3;
pub const IPR: usize = 4;

/// A 4-D array of `nvar` scalar fields over an `nx3 × nx2 × nx1` cell box.
///
/// `i` is the fastest-varying index so that the innermost cell loop walks
/// contiguous memory.
#[derive(Clone, Debug, PartialEq)]
pub struct CellArray {
    nvar: usize,
    nx3: usize,
    nx2: usize,
    nx1: usize,
    data: Vec<Real>,
}

impl CellArray {
    /// Zero-filled array.
    pub fn zeros(nvar: usize, nx3: usize, nx2: usize, nx1: usize) -> Self {
        Self {
            nvar,
            nx3,
            nx2,
            nx1,
            data: vec![0.0; nvar * nx3 * nx2 * nx1],
        }
    }

    /// Array with no variables, used for absent field groups (scalars, bcc).
    pub fn empty() -> Self {
        Self::zeros(0, 0, 0, 0)
    }

    pub fn nvar(&self) -> usize {
        self.nvar
    }

    pub fn has_var(&self, n: usize) -> bool {
        n < self.nvar
    }

    #[inline]
    fn offset(&self, n: usize, k: usize, j: usize, i: usize) -> usize {
        debug_assert!(n < self.nvar && k < self.nx3 && j < self.nx2 && i < self.nx1);
        ((n * self.nx3 + k) * self.nx2 + j) * self.nx1 + i
    }

    #[inline]
    pub fn get(&self, n: usize, k: usize, j: usize, i: usize) -> Real {
        self.data[self.offset(n, k, j, i)]
    }

    #[inline]
    pub fn set(&mut self, n: usize, k: usize, j: usize, i: usize, v: Real) {
        let idx = self.offset(n, k, j, i);
        self.data[idx] = v;
    }

    #[inline]
    pub fn get_mut(&mut self, n: usize, k: usize, j: usize, i: usize) -> &mut Real {
        let idx = self.offset(n, k, j, i);
        &mut self.data[idx]
    }

    pub fn copy_from(&mut self, other: &CellArray) {
        debug_assert_eq!(self.data.len(), other.data.len());
        self.data.copy_from_slice(&other.data);
    }
}
