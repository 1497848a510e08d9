//! Run execution: load, set up, generate, advance, summarise.

use std::path::Path;
use std::time::Instant;

use rc_core::PhysicalConstants;
use rc_project::RunConfig;
use rc_sim::{EquationOfState, HostCapabilities, SimProgress, SimRecord, run_sim_with_progress};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::compile;
use crate::error::{AppError, AppResult};
use crate::setup::{self, SetupOutcome};

/// Command-line overrides of the `time` section.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOverrides {
    pub dt: Option<f64>,
    pub t_end: Option<f64>,
}

/// Request to execute a run.
pub struct RunRequest<'a> {
    pub config_path: &'a Path,
    pub capabilities: HostCapabilities,
    pub overrides: RunOverrides,
}

/// Wall-clock breakdown of a run.
#[derive(Debug, Clone, Default)]
pub struct RunTimingSummary {
    pub setup_time_s: f64,
    pub init_time_s: f64,
    pub solve_time_s: f64,
    pub total_time_s: f64,
}

/// One recorded instant, volume averaged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistorySample {
    pub t: f64,
    pub mean_density: f64,
    pub mean_energy: f64,
    pub min_energy: f64,
    /// Temperature of the mean state; absent without an energy equation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean_temperature: Option<f64>,
}

/// Serializable run history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunHistory {
    pub name: String,
    pub steps: usize,
    pub cells_cooled: usize,
    pub cells_skipped: usize,
    pub energy_removed: f64,
    pub samples: Vec<HistorySample>,
}

impl RunHistory {
    fn from_record(
        name: &str,
        record: &SimRecord,
        eos: &EquationOfState,
        constants: &PhysicalConstants,
    ) -> Self {
        let samples = record
            .t
            .iter()
            .zip(&record.summary)
            .map(|(&t, s)| HistorySample {
                t,
                mean_density: s.mean_density,
                mean_energy: s.mean_energy,
                min_energy: s.min_energy,
                mean_temperature: eos.gamma().map(|gamma| {
                    constants.temperature((gamma - 1.0) * s.mean_energy, s.mean_density)
                }),
            })
            .collect();
        Self {
            name: name.to_string(),
            steps: record.steps,
            cells_cooled: record.sources.cells_updated,
            cells_skipped: record.sources.cells_skipped,
            energy_removed: record.sources.energy_removed,
            samples,
        }
    }
}

/// Response from a run execution.
#[derive(Debug, Clone)]
pub struct RunResponse {
    pub setup: SetupOutcome,
    pub history: RunHistory,
    pub timing: RunTimingSummary,
}

/// Load the config at `request.config_path` and run it.
pub fn run(
    request: &RunRequest<'_>,
    progress: Option<&mut dyn FnMut(SimProgress)>,
) -> AppResult<RunResponse> {
    let mut config = rc_project::load(request.config_path)?;
    if let Some(dt) = request.overrides.dt {
        config.time.dt = dt;
    }
    if let Some(t_end) = request.overrides.t_end {
        config.time.t_end = t_end;
    }
    rc_project::validate_config(&config).map_err(|e| AppError::Config(e.to_string()))?;
    run_config(&config, request.capabilities, progress)
}

/// Run an already loaded config.
pub fn run_config(
    config: &RunConfig,
    capabilities: HostCapabilities,
    progress: Option<&mut dyn FnMut(SimProgress)>,
) -> AppResult<RunResponse> {
    let started = Instant::now();
    let constants = PhysicalConstants::CGS_PLASMA;
    let mut timing = RunTimingSummary::default();

    info!(name = %config.name, ?capabilities, "setting up run");
    let mut mesh = compile::build_mesh(config, capabilities)?;
    let setup = setup::initialize(&mut mesh, &config.problem, &config.cooling, &constants)?;
    timing.setup_time_s = started.elapsed().as_secs_f64();

    let init_start = Instant::now();
    let state = compile::initial_state(&config.problem, &constants)?;
    mesh.generate(|block, eos, cons| state.fill(block, eos, cons));
    timing.init_time_s = init_start.elapsed().as_secs_f64();

    let solve_start = Instant::now();
    let opts = compile::sim_options(&config.time);
    let record = run_sim_with_progress(&mut mesh, &opts, progress)?;
    timing.solve_time_s = solve_start.elapsed().as_secs_f64();

    let history = RunHistory::from_record(&config.name, &record, mesh.eos(), &constants);
    timing.total_time_s = started.elapsed().as_secs_f64();

    Ok(RunResponse {
        setup,
        history,
        timing,
    })
}

/// Write the history as pretty JSON.
pub fn save_history(path: &Path, history: &RunHistory) -> AppResult<()> {
    let content = serde_json::to_string_pretty(history)
        .map_err(|e| AppError::Serialization(e.to_string()))?;
    std::fs::write(path, content).map_err(|e| AppError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(())
}
