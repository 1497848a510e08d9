//! rc-core: stable foundation for radcool.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - numeric (Real + tolerances + float helpers)
//! - constants (physical constants shared by every temperature definition)
//! - ids (compact block identifiers)
//! - error (shared error types)

pub mod constants;
pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use constants::PhysicalConstants;
pub use error::{RcError, RcResult};
pub use ids::BlockId;
pub use numeric::*;
pub use units::*;
