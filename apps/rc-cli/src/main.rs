use clap::{Parser, Subcommand};
use rc_app::{AppResult, RunOverrides, RunRequest, RunResponse, run_service};
use rc_core::PhysicalConstants;
use rc_sim::{HostCapabilities, SimProgress};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rc-cli")]
#[command(about = "radcool CLI - radiative cooling on a block-structured mesh", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a run configuration
    Validate {
        /// Path to the YAML or JSON config
        config_path: PathBuf,
    },
    /// Set up and run a configuration
    Run {
        /// Path to the YAML or JSON config
        config_path: PathBuf,
        /// Override time.dt (seconds)
        #[arg(long)]
        dt: Option<f64>,
        /// Override time.t_end (seconds)
        #[arg(long)]
        t_end: Option<f64>,
        /// Write the run history as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the cooling curve as (log10 T, log10 Lambda) pairs
    Curve {
        #[arg(long, default_value_t = 3.0)]
        lo: f64,
        #[arg(long, default_value_t = 10.0)]
        hi: f64,
        #[arg(short, long, default_value_t = 29)]
        n: usize,
    },
    /// Show what this build of the host supports
    Capabilities,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate { config_path } => cmd_validate(&config_path),
        Commands::Run {
            config_path,
            dt,
            t_end,
            output,
        } => cmd_run(&config_path, RunOverrides { dt, t_end }, output.as_deref()),
        Commands::Curve { lo, hi, n } => {
            cmd_curve(lo, hi, n);
            Ok(())
        }
        Commands::Capabilities => {
            cmd_capabilities();
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if err.is_configuration() => {
            eprintln!("### FATAL ERROR: {err}");
            ExitCode::from(2)
        }
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn cmd_validate(config_path: &Path) -> AppResult<()> {
    println!("Validating config: {}", config_path.display());
    let config = rc_project::load(config_path)?;
    println!("✓ Config '{}' is valid", config.name);
    Ok(())
}

fn cmd_run(config_path: &Path, overrides: RunOverrides, output: Option<&Path>) -> AppResult<()> {
    let capabilities = HostCapabilities::from_build();
    info!(config = %config_path.display(), ?capabilities, "run requested");
    let request = RunRequest {
        config_path,
        capabilities,
        overrides,
    };

    let mut last_emit = Instant::now();
    let response = run_service::run(
        &request,
        Some(&mut |p: SimProgress| {
            if last_emit.elapsed().as_millis() >= 100 {
                render_cli_progress(p.t, p.t_end, p.step);
                last_emit = Instant::now();
            }
        }),
    )?;
    clear_progress_line();

    print_summary(&response);

    if let Some(path) = output {
        run_service::save_history(path, &response.history)?;
        println!("✓ History written to {}", path.display());
    }
    Ok(())
}

fn cmd_curve(lo: f64, hi: f64, n: usize) {
    println!("{:>10}  {:>12}", "log10_T", "log10_Lambda");
    for (x, y) in rc_physics::tabulate(lo, hi, n) {
        println!("{:>10.4}  {:>12.4}", x, y);
    }
}

fn cmd_capabilities() {
    let caps = HostCapabilities::from_build();
    let c = PhysicalConstants::CGS_PLASMA;
    println!("self-gravity: {}", caps.self_gravity);
    println!("fft:          {}", caps.fft);
    println!("mu = {}, k_B = {:e} erg/K, amu = {:e} g", c.mu, c.k_b, c.amu);
}

fn clear_progress_line() {
    print!("\r{}\r", " ".repeat(80));
    let _ = io::stdout().flush();
}

fn render_cli_progress(t: f64, t_end: f64, step: usize) {
    let fraction = if t_end > 0.0 { (t / t_end).min(1.0) } else { 1.0 };
    let width = 28usize;
    let filled = ((fraction * width as f64).round() as usize).min(width);
    let bar = format!(
        "{}{}",
        "#".repeat(filled),
        "-".repeat(width.saturating_sub(filled))
    );
    print!(
        "\r[{}] {:>6.2}%  t={:.3e}/{:.3e}s  step={}",
        bar,
        fraction * 100.0,
        t,
        t_end,
        step
    );
    let _ = io::stdout().flush();
}

fn print_summary(response: &RunResponse) {
    let setup = &response.setup;
    let history = &response.history;
    println!("✓ Run '{}' completed: {} steps", history.name, history.steps);
    println!(
        "  Cooling: {}",
        setup.cooling.as_deref().unwrap_or("not enrolled")
    );
    println!(
        "  Turbulence: {:?} (turb_flag={})",
        setup.turbulence,
        setup.turbulence.flag()
    );
    if let Some(g) = setup.gravity {
        println!("  Gravity: 4piG={:e}, eps={:e}", g.four_pi_g, g.threshold);
    }
    println!("  Cells cooled: {}", history.cells_cooled);
    if history.cells_skipped > 0 {
        println!("  Cells skipped (degenerate): {}", history.cells_skipped);
    }
    if let (Some(first), Some(last)) = (history.samples.first(), history.samples.last()) {
        println!(
            "  Mean energy: {:.4e} -> {:.4e} erg/cm^3",
            first.mean_energy, last.mean_energy
        );
        if let (Some(t0), Some(t1)) = (first.mean_temperature, last.mean_temperature) {
            println!("  Mean temperature: {:.4e} -> {:.4e} K", t0, t1);
        }
    }

    let timing = &response.timing;
    let total = timing.total_time_s.max(1.0e-12);
    println!("\nTiming summary:");
    println!(
        "  Setup: {:.3}s ({:.1}%)",
        timing.setup_time_s,
        100.0 * timing.setup_time_s / total
    );
    println!(
        "  Init:  {:.3}s ({:.1}%)",
        timing.init_time_s,
        100.0 * timing.init_time_s / total
    );
    println!(
        "  Solve: {:.3}s ({:.1}%)",
        timing.solve_time_s,
        100.0 * timing.solve_time_s / total
    );
    println!("  Total: {:.3}s", timing.total_time_s);
}
