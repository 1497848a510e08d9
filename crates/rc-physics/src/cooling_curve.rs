//! Piecewise-linear cooling curve in log-log space.
//!
//! Λ(T) is the optically thin cooling-rate coefficient in erg·cm³·s⁻¹.
//! Segments are left-closed, right-open and join continuously.

use rc_core::Real;

/// One segment of the curve, ordered by temperature.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Segment {
    /// log10 T < 4: flat floor
    Floor,
    /// 4 ≤ log10 T < 5: hydrogen/helium line rise
    LineRise,
    /// 5 ≤ log10 T < 7.5: metal line decline
    LineDecline,
    /// 7.5 ≤ log10 T < 9: free-free
    FreeFree,
    /// log10 T ≥ 9
    Relativistic,
}

impl Segment {
    pub const ALL: [Segment; 5] = [
        Segment::Floor,
        Segment::LineRise,
        Segment::LineDecline,
        Segment::FreeFree,
        Segment::Relativistic,
    ];

    /// Segment containing `log10_t`. NaN lands in the last segment and
    /// evaluates to NaN.
    pub fn for_log_t(log10_t: Real) -> Self {
        if log10_t < 4.0 {
            Segment::Floor
        } else if log10_t < 5.0 {
            Segment::LineRise
        } else if log10_t < 7.5 {
            Segment::LineDecline
        } else if log10_t < 9.0 {
            Segment::FreeFree
        } else {
            Segment::Relativistic
        }
    }

    /// Inclusive lower bound in log10 T.
    pub fn lower(self) -> Real {
        match self {
            Segment::Floor => Real::NEG_INFINITY,
            Segment::LineRise => 4.0,
            Segment::LineDecline => 5.0,
            Segment::FreeFree => 7.5,
            Segment::Relativistic => 9.0,
        }
    }

    /// This segment's formula, evaluated without a range check.
    pub fn formula(self, x: Real) -> Real {
        match self {
            Segment::Floor => -24.0,
            Segment::LineRise => -24.0 + (-20.5 + 24.0) * (x - 4.0),
            Segment::LineDecline => -20.5 + (-22.5 + 20.5) * (x - 5.0) / (7.5 - 5.0),
            Segment::FreeFree => -22.5 + (-22.0 + 22.5) * (x - 7.5) / (9.0 - 7.5),
            Segment::Relativistic => -22.0 + (x - 9.0) / 3.0,
        }
    }
}

/// log10 Λ for a given log10 T.
#[inline]
pub fn log10_lambda(log10_t: Real) -> Real {
    Segment::for_log_t(log10_t).formula(log10_t)
}

/// Λ for a temperature in kelvin.
#[inline]
pub fn lambda(temperature: Real) -> Real {
    Real::powf(10.0, log10_lambda(temperature.log10()))
}

/// `n` evenly spaced samples of (log10 T, log10 Λ) over `[lo, hi]`.
pub fn tabulate(lo: Real, hi: Real, n: usize) -> Vec<(Real, Real)> {
    match n {
        0 => Vec::new(),
        1 => vec![(lo, log10_lambda(lo))],
        _ => {
            let step = (hi - lo) / (n - 1) as Real;
            (0..n)
                .map(|i| {
                    let x = lo + step * i as Real;
                    (x, log10_lambda(x))
                })
                .collect()
        }
    }
}
