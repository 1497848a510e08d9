use rc_project::schema::*;
use rc_project::{load, load_json, load_yaml, save_json, save_yaml, validate_config};

fn sample() -> RunConfig {
    RunConfig {
        name: "roundtrip".to_string(),
        problem: ProblemDef {
            rho: 1.0e-24,
            temperature_k: 1.0e6,
            four_pi_g: Some(8.385e-7),
            grav_eps: None,
            turb_flag: 1,
        },
        hydro: HydroDef {
            gamma: 5.0 / 3.0,
            eos: EosDef::Adiabatic,
        },
        cooling: CoolingDef {
            law: CoolingLawDef::RelaxationTime { tau: 0.01 },
            temp_goal: 0.1,
        },
        mesh: MeshDef::default(),
        time: TimeDef {
            dt: 1.0e9,
            t_end: 1.0e11,
            max_steps: 500,
            record_every: 5,
            integrator: IntegratorDef::ForwardEuler,
        },
    }
}

#[test]
fn roundtrip_yaml() {
    let config = sample();
    validate_config(&config).unwrap();

    let path = std::env::temp_dir().join("rc_project_roundtrip.yaml");
    save_yaml(&path, &config).unwrap();
    let loaded = load_yaml(&path).unwrap();
    assert_eq!(config, loaded);
}

#[test]
fn roundtrip_json() {
    let config = sample();
    let path = std::env::temp_dir().join("rc_project_roundtrip.json");
    save_json(&path, &config).unwrap();
    let loaded = load_json(&path).unwrap();
    assert_eq!(config, loaded);

    let by_ext = load(&path).unwrap();
    assert_eq!(config, by_ext);
}

#[test]
fn yaml_uses_config_key_names() {
    let text = serde_yaml::to_string(&sample()).unwrap();
    assert!(text.contains("T: "));
    assert!(text.contains("four_pi_G: "));
    assert!(text.contains("turb_flag: 1"));
    // absent optional keys are not written
    assert!(!text.contains("grav_eps"));
}

#[test]
fn defaults_fill_optional_sections() {
    let text = r#"
name: minimal
problem:
  rho: 1.0
  T: 100.0
  turb_flag: 0
hydro:
  gamma: 1.4
time:
  dt: 0.1
  t_end: 1.0
"#;
    let config: RunConfig = serde_yaml::from_str(text).unwrap();
    validate_config(&config).unwrap();
    assert_eq!(config.problem.four_pi_g, None);
    assert_eq!(config.problem.grav_eps, None);
    assert_eq!(config.hydro.eos, EosDef::Adiabatic);
    assert_eq!(config.cooling.law, CoolingLawDef::RadiativeLoss);
    assert_eq!(config.cooling.temp_goal, 0.1);
    assert_eq!(config.mesh, MeshDef::default());
    assert_eq!(config.time.integrator, IntegratorDef::Vl2);
    assert_eq!(config.time.record_every, 10);
}

#[test]
fn relaxation_tau_defaults() {
    let law: CoolingLawDef = serde_yaml::from_str("type: relaxation_time").unwrap();
    assert_eq!(law, CoolingLawDef::RelaxationTime { tau: 0.01 });
}

#[test]
fn missing_turb_flag_is_rejected() {
    let text = r#"
name: no-turb
problem:
  rho: 1.0
  T: 100.0
hydro:
  gamma: 1.4
time:
  dt: 0.1
  t_end: 1.0
"#;
    assert!(serde_yaml::from_str::<RunConfig>(text).is_err());
}

#[test]
fn unknown_extension_is_rejected() {
    let err = load(std::path::Path::new("config.toml")).unwrap_err();
    assert!(err.to_string().contains("toml"));
}
