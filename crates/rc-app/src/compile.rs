//! Turn a validated [`RunConfig`] into host and physics objects.

use rc_core::{PhysicalConstants, k};
use rc_physics::{CoolingLaw, CoolingSource, UniformState};
use rc_project::schema::{
    CoolingDef, CoolingLawDef, EosDef, HydroDef, IntegratorDef, MeshDef, ProblemDef, RunConfig,
    TimeDef,
};
use rc_sim::{EquationOfState, HostCapabilities, IntegratorType, Mesh, MeshSpec, SimOptions};

use crate::error::AppResult;

pub fn equation_of_state(hydro: &HydroDef) -> AppResult<EquationOfState> {
    let eos = match hydro.eos {
        EosDef::Adiabatic => EquationOfState::adiabatic(hydro.gamma)?,
        EosDef::Isothermal { iso_sound_speed } => EquationOfState::isothermal(iso_sound_speed)?,
    };
    Ok(eos)
}

pub fn mesh_spec(mesh: &MeshDef) -> MeshSpec {
    MeshSpec {
        mesh_nx: mesh.nx,
        block_nx: mesh.block_nx,
        nghost: mesh.nghost,
        nscalars: mesh.nscalars,
    }
}

pub fn sim_options(time: &TimeDef) -> SimOptions {
    SimOptions {
        dt: time.dt,
        t_end: time.t_end,
        max_steps: time.max_steps,
        record_every: time.record_every,
        integrator: match time.integrator {
            IntegratorDef::Vl2 => IntegratorType::Vl2,
            IntegratorDef::ForwardEuler => IntegratorType::ForwardEuler,
        },
    }
}

pub fn cooling_source(
    cooling: &CoolingDef,
    constants: &PhysicalConstants,
) -> AppResult<CoolingSource> {
    let law = match cooling.law {
        CoolingLawDef::RadiativeLoss => CoolingLaw::RadiativeLoss,
        CoolingLawDef::RelaxationTime { tau } => CoolingLaw::RelaxationTime { tau },
    };
    Ok(CoolingSource::new(*constants, k(cooling.temp_goal), law)?)
}

pub fn initial_state(
    problem: &ProblemDef,
    constants: &PhysicalConstants,
) -> AppResult<UniformState> {
    Ok(UniformState::new(
        problem.rho,
        k(problem.temperature_k),
        *constants,
    )?)
}

/// Build an empty mesh for `config` on a host with `capabilities`.
pub fn build_mesh(config: &RunConfig, capabilities: HostCapabilities) -> AppResult<Mesh> {
    let eos = equation_of_state(&config.hydro)?;
    Ok(Mesh::new(mesh_spec(&config.mesh), eos, capabilities)?)
}
