//! One-time simulation setup: gravity parameters, turbulence gating and
//! cooling enrolment.
//!
//! Runs single-threaded on a freshly built mesh, before the problem
//! generator and before any block is advanced.

use std::sync::Arc;

use rc_core::PhysicalConstants;
use rc_project::schema::{CoolingDef, ProblemDef};
use rc_sim::{ExplicitSource, GravitySettings, Mesh, SimError, TurbulenceMode};
use tracing::{error, info, warn};

use crate::compile;

#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("non zero turbulence flag ({flag}) is set without FFT")]
    TurbulenceWithoutFft { flag: i64 },

    #[error("problem.four_pi_G is required when self-gravity is enabled")]
    MissingFourPiG,

    #[error("invalid problem.turb_flag: {flag}")]
    InvalidTurbFlag { flag: i64 },

    #[error("host rejected setting: {0}")]
    Host(#[from] SimError),

    #[error("invalid cooling configuration: {0}")]
    Cooling(String),
}

/// What setup decided.
#[derive(Clone, Debug, PartialEq)]
pub struct SetupOutcome {
    /// Forwarded gravity parameters, only when the host has self-gravity
    pub gravity: Option<GravitySettings>,
    pub turbulence: TurbulenceMode,
    /// Name of the enrolled source, `None` when the EOS has no energy
    pub cooling: Option<String>,
}

/// Forward 4πG and the softening threshold when the host has self-gravity.
pub fn configure_gravity(
    mesh: &mut Mesh,
    problem: &ProblemDef,
) -> Result<Option<GravitySettings>, SetupError> {
    if !mesh.capabilities().self_gravity {
        return Ok(None);
    }
    let four_pi_g = problem.four_pi_g.ok_or(SetupError::MissingFourPiG)?;
    let eps = problem.grav_eps.unwrap_or(0.0);
    mesh.set_four_pi_g(four_pi_g)?;
    mesh.set_gravity_threshold(eps)?;
    info!(four_pi_g, eps, "self-gravity configured");
    Ok(mesh.gravity())
}

/// Validate `turb_flag` against the host's spectral capability.
pub fn configure_turbulence(
    mesh: &mut Mesh,
    problem: &ProblemDef,
) -> Result<TurbulenceMode, SetupError> {
    let flag = problem.turb_flag;
    let mode =
        TurbulenceMode::from_flag(flag).map_err(|_| SetupError::InvalidTurbFlag { flag })?;
    if mode.requires_fft() && !mesh.capabilities().fft {
        error!(flag, "non zero turbulence flag is set without FFT");
        return Err(SetupError::TurbulenceWithoutFft { flag });
    }
    mesh.set_turbulence(mode)?;
    if mode != TurbulenceMode::Disabled {
        info!(?mode, "turbulence driving requested");
    }
    Ok(mode)
}

/// Enrol the cooling source in the host's explicit source slot.
pub fn enroll_cooling(
    mesh: &mut Mesh,
    cooling: &CoolingDef,
    constants: &PhysicalConstants,
) -> Result<Option<String>, SetupError> {
    if !mesh.eos().has_energy() {
        warn!("equation of state carries no energy; cooling not enrolled");
        return Ok(None);
    }
    let source = compile::cooling_source(cooling, constants)
        .map_err(|e| SetupError::Cooling(e.to_string()))?;
    let name = source.name().to_string();
    info!(
        source = %name,
        law = ?source.law(),
        temp_goal = source.temp_goal(),
        mu = source.constants().mu,
        "cooling enrolled"
    );
    mesh.enroll_explicit_source(Arc::new(source))?;
    Ok(Some(name))
}

/// Full setup sequence. Fails before any block work on configuration errors.
pub fn initialize(
    mesh: &mut Mesh,
    problem: &ProblemDef,
    cooling: &CoolingDef,
    constants: &PhysicalConstants,
) -> Result<SetupOutcome, SetupError> {
    let gravity = configure_gravity(mesh, problem)?;
    let turbulence = configure_turbulence(mesh, problem)?;
    let cooling = enroll_cooling(mesh, cooling, constants)?;
    Ok(SetupOutcome {
        gravity,
        turbulence,
        cooling,
    })
}
