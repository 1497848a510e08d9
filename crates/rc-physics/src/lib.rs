//! rc-physics: radiative cooling and the uniform initial condition.
//!
//! - `cooling_curve`: piecewise log10 Λ(log10 T)
//! - `cooling`: explicit operator-split energy loss, enrolled as a host source
//! - `initial_state`: uniform, at-rest conserved state

pub mod cooling;
pub mod cooling_curve;
pub mod initial_state;

pub use cooling::{CellCooling, CoolingLaw, CoolingSource};
pub use cooling_curve::{Segment, lambda, log10_lambda, tabulate};
pub use initial_state::UniformState;
