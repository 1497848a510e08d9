use rc_project::schema::*;
use rc_project::{ValidationError, validate_config};

fn base() -> RunConfig {
    serde_yaml::from_str(
        r#"
name: base
problem:
  rho: 1.0e-24
  T: 1.0e6
  turb_flag: 0
hydro:
  gamma: 1.6666666666666667
time:
  dt: 1.0e9
  t_end: 1.0e10
"#,
    )
    .unwrap()
}

fn field_of(err: ValidationError) -> String {
    match err {
        ValidationError::InvalidValue { field, .. } => field,
    }
}

#[test]
fn base_is_valid() {
    validate_config(&base()).unwrap();
}

#[test]
fn turb_flag_range() {
    for flag in 0..=3 {
        let mut c = base();
        c.problem.turb_flag = flag;
        validate_config(&c).unwrap();
    }
    for flag in [-1, 4, 10] {
        let mut c = base();
        c.problem.turb_flag = flag;
        assert_eq!(field_of(validate_config(&c).unwrap_err()), "problem.turb_flag");
    }
}

#[test]
fn physical_inputs_must_be_positive() {
    let mut c = base();
    c.problem.rho = 0.0;
    assert_eq!(field_of(validate_config(&c).unwrap_err()), "problem.rho");

    let mut c = base();
    c.problem.temperature_k = -1.0;
    assert_eq!(field_of(validate_config(&c).unwrap_err()), "problem.T");

    let mut c = base();
    c.hydro.gamma = 1.0;
    assert_eq!(field_of(validate_config(&c).unwrap_err()), "hydro.gamma");

    let mut c = base();
    c.problem.grav_eps = Some(-0.5);
    assert_eq!(field_of(validate_config(&c).unwrap_err()), "problem.grav_eps");
}

#[test]
fn mesh_must_tile() {
    let mut c = base();
    c.mesh.block_nx = [5, 8, 8];
    assert_eq!(field_of(validate_config(&c).unwrap_err()), "mesh.block_nx");
}

#[test]
fn time_controls() {
    let mut c = base();
    c.time.dt = 0.0;
    assert_eq!(field_of(validate_config(&c).unwrap_err()), "time.dt");

    let mut c = base();
    c.time.record_every = 0;
    assert_eq!(field_of(validate_config(&c).unwrap_err()), "time.record_every");
}

#[test]
fn cooling_controls() {
    let mut c = base();
    c.cooling.law = CoolingLawDef::RelaxationTime { tau: -1.0 };
    assert_eq!(field_of(validate_config(&c).unwrap_err()), "cooling.law.tau");

    let mut c = base();
    c.cooling.temp_goal = f64::NAN;
    assert_eq!(field_of(validate_config(&c).unwrap_err()), "cooling.temp_goal");
}
