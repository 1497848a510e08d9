//! Capability-independent validation of a run configuration.
//!
//! Checks that depend on what the host was built with (self-gravity, FFT)
//! belong to simulation setup, not here.

use crate::schema::{CoolingLawDef, EosDef, RunConfig};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn positive(field: &str, v: f64) -> Result<(), ValidationError> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, v, "must be finite and positive"))
    }
}

pub fn validate_config(config: &RunConfig) -> Result<(), ValidationError> {
    if config.name.trim().is_empty() {
        return Err(invalid("name", "", "must not be empty"));
    }

    let problem = &config.problem;
    positive("problem.rho", problem.rho)?;
    positive("problem.T", problem.temperature_k)?;
    if let Some(g) = problem.four_pi_g {
        positive("problem.four_pi_G", g)?;
    }
    if let Some(eps) = problem.grav_eps {
        if !(eps.is_finite() && eps >= 0.0) {
            return Err(invalid(
                "problem.grav_eps",
                eps,
                "must be finite and non-negative",
            ));
        }
    }
    if !(0..=3).contains(&problem.turb_flag) {
        return Err(invalid(
            "problem.turb_flag",
            problem.turb_flag,
            "must be 0, 1, 2 or 3",
        ));
    }

    if !(config.hydro.gamma.is_finite() && config.hydro.gamma > 1.0) {
        return Err(invalid("hydro.gamma", config.hydro.gamma, "must be > 1"));
    }
    if let EosDef::Isothermal { iso_sound_speed } = config.hydro.eos {
        positive("hydro.eos.iso_sound_speed", iso_sound_speed)?;
    }

    if !config.cooling.temp_goal.is_finite() {
        return Err(invalid(
            "cooling.temp_goal",
            config.cooling.temp_goal,
            "must be finite",
        ));
    }
    if let CoolingLawDef::RelaxationTime { tau } = config.cooling.law {
        positive("cooling.law.tau", tau)?;
    }

    let mesh = &config.mesh;
    for d in 0..3 {
        if mesh.nx[d] == 0 || mesh.block_nx[d] == 0 {
            return Err(invalid(
                "mesh",
                format!("{:?}/{:?}", mesh.nx, mesh.block_nx),
                "sizes must be positive",
            ));
        }
        if mesh.nx[d] % mesh.block_nx[d] != 0 {
            return Err(invalid(
                "mesh.block_nx",
                format!("{:?}", mesh.block_nx),
                "must evenly divide mesh.nx",
            ));
        }
    }
    if mesh.nghost == 0 {
        return Err(invalid("mesh.nghost", 0, "must be positive"));
    }

    let time = &config.time;
    positive("time.dt", time.dt)?;
    if !(time.t_end.is_finite() && time.t_end >= 0.0) {
        return Err(invalid(
            "time.t_end",
            time.t_end,
            "must be finite and non-negative",
        ));
    }
    if time.max_steps == 0 {
        return Err(invalid("time.max_steps", 0, "must be positive"));
    }
    if time.record_every == 0 {
        return Err(invalid("time.record_every", 0, "must be positive"));
    }

    Ok(())
}
