//! Application service layer for radcool.
//!
//! Wires the run configuration, the host mesh and the cooling physics
//! together for the CLI: one-time setup, initial state, run and history.

pub mod compile;
pub mod error;
pub mod run_service;
pub mod setup;

// Re-export key types for convenience
pub use error::{AppError, AppResult};
pub use run_service::{
    HistorySample, RunHistory, RunOverrides, RunRequest, RunResponse, RunTimingSummary, run,
    run_config, save_history,
};
pub use setup::{SetupError, SetupOutcome, initialize};
