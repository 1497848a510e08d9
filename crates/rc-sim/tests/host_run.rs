//! Integration test: the host run loop with simple hand-written sources.

use std::sync::Arc;

use rc_core::Real;
use rc_sim::{
    BlockFields, EquationOfState, ExplicitSource, HostCapabilities, IDN, IEN, IntegratorType, Mesh,
    MeshSpec, SimError, SimOptions, SimProgress, SourceContext, SourceReport, run_sim, run_sim_with_progress,
};

/// Removes a fixed amount of energy density per unit time.
struct ConstantLoss(Real);

impl ExplicitSource for ConstantLoss {
    fn name(&self) -> &str {
        "constant-loss"
    }

    fn apply(&self, ctx: &SourceContext<'_>, fields: BlockFields<'_>) -> SourceReport {
        let mut report = SourceReport::default();
        for (k, j, i) in ctx.block.owned() {
            let loss = self.0 * ctx.dt;
            *fields.cons.get_mut(IEN, k, j, i) -= loss;
            report.cells_updated += 1;
            report.energy_removed += loss;
        }
        report
    }
}

/// Poisons the first owned cell of every block.
struct Poison;

impl ExplicitSource for Poison {
    fn name(&self) -> &str {
        "poison"
    }

    fn apply(&self, ctx: &SourceContext<'_>, fields: BlockFields<'_>) -> SourceReport {
        let (k, j, i) = ctx.block.owned().next().unwrap();
        fields.cons.set(IEN, k, j, i, Real::NAN);
        SourceReport::default()
    }
}

fn mesh(source: Arc<dyn ExplicitSource>) -> Mesh {
    let spec = MeshSpec {
        mesh_nx: [8, 8, 1],
        block_nx: [4, 4, 1],
        nghost: 2,
        nscalars: 1,
    };
    let eos = EquationOfState::adiabatic(5.0 / 3.0).unwrap();
    let mut mesh = Mesh::new(spec, eos, HostCapabilities::default()).unwrap();
    mesh.generate(|block, _, cons| {
        for (k, j, i) in block.owned() {
            cons.set(IDN, k, j, i, 1.0);
            cons.set(IEN, k, j, i, 10.0);
        }
    });
    mesh.enroll_explicit_source(source).unwrap();
    mesh
}

#[test]
fn records_initial_decimated_and_final_states() {
    let mut m = mesh(Arc::new(ConstantLoss(1.0)));
    let opts = SimOptions {
        dt: 0.1,
        t_end: 0.75,
        max_steps: 100,
        record_every: 3,
        integrator: IntegratorType::ForwardEuler,
    };
    let record = run_sim(&mut m, &opts).unwrap();
    // 7 full steps plus a shortened last one
    assert_eq!(record.steps, 8);
    // t = 0, steps 3 and 6, final
    assert_eq!(record.t.len(), 4);
    assert!((record.t.last().unwrap() - 0.75).abs() < 1e-12);

    let last = record.summary.last().unwrap();
    assert!((last.mean_energy - (10.0 - 0.75)).abs() < 1e-12);
    assert_eq!(last.mean_density, 1.0);
    assert_eq!(record.sources.cells_updated, 8 * 64);
    assert!((record.sources.energy_removed - 0.75 * 64.0).abs() < 1e-9);
}

#[test]
fn overshoot_is_not_corrected() {
    let mut m = mesh(Arc::new(ConstantLoss(100.0)));
    let opts = SimOptions {
        dt: 1.0,
        t_end: 1.0,
        max_steps: 10,
        record_every: 1,
        integrator: IntegratorType::Vl2,
    };
    let record = run_sim(&mut m, &opts).unwrap();
    let last = record.summary.last().unwrap();
    assert_eq!(last.negative_energy_cells, 64);
    assert_eq!(last.min_energy, -90.0);
}

#[test]
fn non_finite_energy_stops_the_run() {
    let mut m = mesh(Arc::new(Poison));
    let err = run_sim(&mut m, &SimOptions {
        dt: 1.0,
        t_end: 5.0,
        max_steps: 10,
        record_every: 1,
        integrator: IntegratorType::ForwardEuler,
    })
    .unwrap_err();
    assert!(matches!(err, SimError::NonPhysical { what: "energy density", .. }));
}

#[test]
fn max_steps_caps_the_run() {
    let mut m = mesh(Arc::new(ConstantLoss(0.0)));
    let mut seen = Vec::new();
    let opts = SimOptions {
        dt: 1.0,
        t_end: 1.0e6,
        max_steps: 5,
        record_every: 2,
        integrator: IntegratorType::Vl2,
    };
    let record = run_sim_with_progress(&mut m, &opts, Some(&mut |p: SimProgress| seen.push(p.step))).unwrap();
    assert_eq!(record.steps, 5);
    assert_eq!(seen, vec![1, 2, 3, 4, 5]);
}

#[test]
fn zero_end_time_takes_no_steps() {
    let mut m = mesh(Arc::new(ConstantLoss(1.0)));
    let opts = SimOptions {
        t_end: 0.0,
        ..SimOptions::default()
    };
    let record = run_sim(&mut m, &opts).unwrap();
    assert_eq!(record.steps, 0);
    assert_eq!(record.t, vec![0.0]);
}
