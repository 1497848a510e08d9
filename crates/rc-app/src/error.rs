//! Error types for the rc-app service layer.

use std::path::PathBuf;

use crate::setup::SetupError;

/// Application error type that wraps errors from the backend crates and
/// gives the CLI one error surface.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Failed to write {path}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Setup failed: {0}")]
    Setup(#[from] SetupError),

    #[error("Invalid physics input: {0}")]
    Physics(String),

    #[error("Simulation error: {0}")]
    Simulation(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AppError {
    /// Configuration problems the user must fix before any run can start.
    pub fn is_configuration(&self) -> bool {
        matches!(self, AppError::Config(_) | AppError::Setup(_))
    }
}

/// Result type for rc-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<rc_project::ProjectError> for AppError {
    fn from(err: rc_project::ProjectError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<rc_sim::SimError> for AppError {
    fn from(err: rc_sim::SimError) -> Self {
        AppError::Simulation(err.to_string())
    }
}

impl From<rc_core::RcError> for AppError {
    fn from(err: rc_core::RcError) -> Self {
        AppError::Physics(err.to_string())
    }
}
