//! Minimal block-structured fluid host for radcool.
//!
//! Provides:
//! - Per-block field storage with ghost zones
//! - Ideal-gas and isothermal equations of state
//! - A single explicit source-term slot invoked once per block per stage
//! - Capability-gated gravity and turbulence settings
//! - Fixed-step forward Euler and VL2 stage drivers
//!
//! There is no flux update: a step is the enrolled source integrated in time.

pub mod array;
pub mod block;
pub mod capabilities;
pub mod eos;
pub mod error;
pub mod integrator;
pub mod mesh;
pub mod sim;
pub mod source;

// Re-exports for public API
pub use array::{CellArray, IDN, IEN, IM1, IM2, IM3, IPR, IVX, IVY, IVZ};
pub use block::{BlockData, MeshBlock};
pub use capabilities::{GravitySettings, HostCapabilities, TurbulenceMode};
pub use eos::EquationOfState;
pub use error::{SimError, SimResult};
pub use integrator::{IntegratorType, advance};
pub use mesh::{Mesh, MeshSpec};
pub use sim::{MeshSummary, SimOptions, SimProgress, SimRecord, run_sim, run_sim_with_progress, summarize};
pub use source::{BlockFields, ExplicitSource, SourceContext, SourceReport};
