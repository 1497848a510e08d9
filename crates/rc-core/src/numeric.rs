use crate::RcError;

/// Floating point type used throughout system
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

/// Relative-only tolerance, for quantities whose magnitude is far from 1
/// (cgs energy densities sit anywhere between 1e-14 and 1e14).
pub const REL_ONLY: Tolerances = Tolerances { abs: 0.0, rel: 1e-12 };

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, RcError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(RcError::NonFinite { what, value: v })
    }
}

/// Finite and strictly positive.
pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, RcError> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(RcError::OutOfRange {
            what,
            value: v,
            expected: "> 0",
        })
    }
}
