//! Error types for host operations.

use rc_core::BlockId;
use thiserror::Error;

/// Errors encountered while building or advancing the host mesh.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Non-physical state in block {block}: {what} = {value}")]
    NonPhysical {
        block: BlockId,
        what: &'static str,
        value: f64,
    },

    #[error("Explicit source slot already holds '{existing}'")]
    SourceAlreadyEnrolled { existing: String },
}

pub type SimResult<T> = Result<T, SimError>;
