//! Simulation runner and result recording.

use tracing::{debug, info, warn};

use crate::array::{IDN, IEN};
use crate::error::{SimError, SimResult};
use crate::integrator::{IntegratorType, advance};
use crate::mesh::Mesh;
use crate::source::SourceReport;
use rc_core::Real;

/// Options for simulation runs.
#[derive(Clone, Debug)]
pub struct SimOptions {
    /// Fixed time step (seconds); the last step is shortened to hit `t_end`
    pub dt: f64,
    /// Final simulation time (seconds)
    pub t_end: f64,
    /// Maximum number of steps (safety limit)
    pub max_steps: usize,
    /// Record every N-th step (decimation)
    pub record_every: usize,
    pub integrator: IntegratorType,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            dt: 1e-3,
            t_end: 1.0,
            max_steps: 100_000,
            record_every: 10,
            integrator: IntegratorType::default(),
        }
    }
}

impl SimOptions {
    pub fn validate(&self) -> SimResult<()> {
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(SimError::InvalidArg {
                what: "dt must be positive",
            });
        }
        if !(self.t_end.is_finite() && self.t_end >= 0.0) {
            return Err(SimError::InvalidArg {
                what: "t_end must be non-negative",
            });
        }
        if self.max_steps == 0 {
            return Err(SimError::InvalidArg {
                what: "max_steps must be positive",
            });
        }
        if self.record_every == 0 {
            return Err(SimError::InvalidArg {
                what: "record_every must be positive",
            });
        }
        Ok(())
    }
}

/// Volume-averaged state of the mesh at one instant.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MeshSummary {
    pub mean_density: Real,
    /// Zero for barotropic EOS
    pub mean_energy: Real,
    pub min_energy: Real,
    /// Owned cells whose total energy density is negative
    pub negative_energy_cells: usize,
}

/// Record of simulation results.
#[derive(Clone, Debug, Default)]
pub struct SimRecord {
    /// Time points (seconds)
    pub t: Vec<f64>,
    /// Mesh summaries at the recorded times
    pub summary: Vec<MeshSummary>,
    /// Source tallies accumulated over the whole run
    pub sources: SourceReport,
    pub steps: usize,
}

/// Progress callback payload.
#[derive(Clone, Copy, Debug)]
pub struct SimProgress {
    pub step: usize,
    pub t: f64,
    pub t_end: f64,
}

/// Summarise owned cells and reject non-finite conserved values.
pub fn summarize(mesh: &Mesh) -> SimResult<MeshSummary> {
    let has_energy = mesh.eos().has_energy();
    let ncells = mesh.total_owned_cells() as Real;
    let mut sum_d = 0.0;
    let mut sum_e = 0.0;
    let mut min_e = Real::INFINITY;
    let mut negative = 0;
    for bd in mesh.blocks() {
        for (k, j, i) in bd.block.owned() {
            let d = bd.cons.get(IDN, k, j, i);
            if !d.is_finite() {
                return Err(SimError::NonPhysical {
                    block: bd.block.gid,
                    what: "density",
                    value: d,
                });
            }
            sum_d += d;
            if has_energy {
                let e = bd.cons.get(IEN, k, j, i);
                if !e.is_finite() {
                    return Err(SimError::NonPhysical {
                        block: bd.block.gid,
                        what: "energy density",
                        value: e,
                    });
                }
                sum_e += e;
                min_e = min_e.min(e);
                if e < 0.0 {
                    negative += 1;
                }
            }
        }
    }
    Ok(MeshSummary {
        mean_density: sum_d / ncells,
        mean_energy: sum_e / ncells,
        min_energy: if has_energy { min_e } else { 0.0 },
        negative_energy_cells: negative,
    })
}

/// Run a fixed-step simulation on an initialised mesh.
pub fn run_sim(mesh: &mut Mesh, opts: &SimOptions) -> SimResult<SimRecord> {
    run_sim_with_progress(mesh, opts, None)
}

pub fn run_sim_with_progress(
    mesh: &mut Mesh,
    opts: &SimOptions,
    mut progress: Option<&mut dyn FnMut(SimProgress)>,
) -> SimResult<SimRecord> {
    opts.validate()?;

    info!(
        dt = opts.dt,
        t_end = opts.t_end,
        integrator = ?opts.integrator,
        source = mesh.explicit_source().map(|s| s.name()).unwrap_or("none"),
        "starting run"
    );

    let mut t = 0.0;
    let mut record = SimRecord {
        t: vec![t],
        summary: vec![summarize(mesh)?],
        ..SimRecord::default()
    };

    let mut step = 0;
    let mut warned_negative = false;
    while step < opts.max_steps {
        let remaining = opts.t_end - t;
        if remaining <= opts.dt * 1e-9 {
            break;
        }
        let dt = remaining.min(opts.dt);

        let report = advance(mesh, opts.integrator, t, dt);
        if report.cells_skipped > 0 {
            warn!(
                step,
                skipped = report.cells_skipped,
                "source skipped cells with non-positive density or pressure"
            );
        }
        record.sources += report;
        t += dt;
        step += 1;

        let summary = summarize(mesh)?;
        if summary.negative_energy_cells > 0 && !warned_negative {
            warn!(
                step,
                cells = summary.negative_energy_cells,
                min_energy = summary.min_energy,
                "energy driven negative; time step exceeds the local cooling time"
            );
            warned_negative = true;
        }
        debug!(step, t, mean_energy = summary.mean_energy, "step complete");

        if let Some(cb) = progress.as_deref_mut() {
            cb(SimProgress {
                step,
                t,
                t_end: opts.t_end,
            });
        }

        if step % opts.record_every == 0 {
            record.t.push(t);
            record.summary.push(summary);
        }
    }

    // Always record final state
    if step % opts.record_every != 0 {
        record.t.push(t);
        record.summary.push(summarize(mesh)?);
    }
    record.steps = step;

    info!(steps = step, t, "run finished");
    Ok(record)
}
