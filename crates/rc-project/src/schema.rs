//! Run configuration schema.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunConfig {
    pub name: String,
    pub problem: ProblemDef,
    pub hydro: HydroDef,
    #[serde(default)]
    pub cooling: CoolingDef,
    #[serde(default)]
    pub mesh: MeshDef,
    pub time: TimeDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProblemDef {
    /// Initial density [g/cm³]
    pub rho: f64,
    /// Initial temperature [K]
    #[serde(rename = "T")]
    pub temperature_k: f64,
    /// Required when the host has self-gravity
    #[serde(rename = "four_pi_G", default, skip_serializing_if = "Option::is_none")]
    pub four_pi_g: Option<f64>,
    /// Gravity softening, 0.0 when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grav_eps: Option<f64>,
    /// 0 off, 1 decaying, 2 impulsive, 3 continuous
    pub turb_flag: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HydroDef {
    pub gamma: f64,
    #[serde(default)]
    pub eos: EosDef,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EosDef {
    #[default]
    Adiabatic,
    Isothermal { iso_sound_speed: f64 },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoolingDef {
    #[serde(default)]
    pub law: CoolingLawDef,
    /// Cooling floor [K]
    #[serde(default = "default_temp_goal")]
    pub temp_goal: f64,
}

impl Default for CoolingDef {
    fn default() -> Self {
        Self {
            law: CoolingLawDef::default(),
            temp_goal: default_temp_goal(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CoolingLawDef {
    #[default]
    RadiativeLoss,
    RelaxationTime {
        #[serde(default = "default_tau")]
        tau: f64,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MeshDef {
    /// Root-grid cells (x1, x2, x3)
    #[serde(default = "default_mesh_nx")]
    pub nx: [usize; 3],
    /// Cells per block (x1, x2, x3)
    #[serde(default = "default_block_nx")]
    pub block_nx: [usize; 3],
    #[serde(default = "default_nghost")]
    pub nghost: usize,
    #[serde(default)]
    pub nscalars: usize,
}

impl Default for MeshDef {
    fn default() -> Self {
        Self {
            nx: default_mesh_nx(),
            block_nx: default_block_nx(),
            nghost: default_nghost(),
            nscalars: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeDef {
    /// Fixed step [s]
    pub dt: f64,
    /// End time [s]
    pub t_end: f64,
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,
    #[serde(default = "default_record_every")]
    pub record_every: usize,
    #[serde(default)]
    pub integrator: IntegratorDef,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum IntegratorDef {
    #[default]
    Vl2,
    ForwardEuler,
}

fn default_temp_goal() -> f64 {
    0.1
}

fn default_tau() -> f64 {
    0.01
}

fn default_mesh_nx() -> [usize; 3] {
    [16, 16, 16]
}

fn default_block_nx() -> [usize; 3] {
    [8, 8, 8]
}

fn default_nghost() -> usize {
    2
}

fn default_max_steps() -> usize {
    100_000
}

fn default_record_every() -> usize {
    10
}
