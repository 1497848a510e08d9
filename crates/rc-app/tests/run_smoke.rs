use std::path::Path;

use rc_app::{AppError, RunOverrides, RunRequest, run, save_history};
use rc_sim::HostCapabilities;

fn demo(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../demos")
        .join(name)
}

#[test]
fn uniform_demo_cools() {
    let path = demo("cool_uniform.yaml");
    let request = RunRequest {
        config_path: &path,
        capabilities: HostCapabilities::default(),
        overrides: RunOverrides {
            dt: None,
            t_end: Some(2.0e10),
        },
    };
    let mut calls = 0;
    let response = run(&request, Some(&mut |_| calls += 1)).unwrap();
    assert_eq!(calls, 20);

    let h = &response.history;
    assert_eq!(h.steps, 20);
    assert_eq!(h.cells_skipped, 0);
    // Corrector stage of every step touches every one of the 16³ cells.
    assert_eq!(h.cells_cooled, 20 * 16 * 16 * 16);
    assert!(h.energy_removed > 0.0);

    let first = h.samples.first().unwrap();
    let last = h.samples.last().unwrap();
    assert!(last.mean_energy < first.mean_energy);
    let t0 = first.mean_temperature.unwrap();
    assert!((t0 / 1.0e6 - 1.0).abs() < 1e-9);
    assert!(last.mean_temperature.unwrap() < t0);

    let out = std::env::temp_dir().join("rc_app_history.json");
    save_history(&out, h).unwrap();
    let loaded: rc_app::RunHistory =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(&loaded, h);
}

#[test]
fn driven_demo_refused_without_fft() {
    let path = demo("cool_turb_driven.yaml");
    let request = RunRequest {
        config_path: &path,
        capabilities: HostCapabilities {
            self_gravity: false,
            fft: false,
        },
        overrides: RunOverrides::default(),
    };
    let err = run(&request, None).unwrap_err();
    assert!(err.is_configuration());
    assert!(matches!(err, AppError::Setup(_)));
}

#[test]
fn selfgrav_demo_with_gravity() {
    let path = demo("cool_selfgrav.json");
    let request = RunRequest {
        config_path: &path,
        capabilities: HostCapabilities {
            self_gravity: true,
            fft: false,
        },
        overrides: RunOverrides::default(),
    };
    let response = run(&request, None).unwrap();
    let g = response.setup.gravity.unwrap();
    assert_eq!(g.four_pi_g, 8.385e-7);
    assert_eq!(response.setup.cooling.as_deref(), Some("relaxation-cooling"));
    assert_eq!(response.history.steps, 10);
}

#[test]
fn bad_override_is_a_config_error() {
    let path = demo("cool_uniform.yaml");
    let request = RunRequest {
        config_path: &path,
        capabilities: HostCapabilities::default(),
        overrides: RunOverrides {
            dt: Some(-1.0),
            t_end: None,
        },
    };
    assert!(run(&request, None).unwrap_err().is_configuration());
}
