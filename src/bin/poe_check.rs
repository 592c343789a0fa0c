//! Product-of-exponentials consistency check.
//!
//! Samples random joint angles for a manipulator, computes the end-effector pose
//! in both the space and body frames, and reports whether they agree. Exits with
//! status 1 when any case disagrees and 2 on configuration or kinematics errors.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use screw_kinematics::check::check_batch;
use screw_kinematics::sampling::joint_angle_batch;
use screw_kinematics::{Error, Manipulator};

const DEFAULT_ARM: &str = include_str!("../../configs/six_joint_arm.toml");

// *** COMMAND LINE ***

/// Compare space-frame and body-frame forward kinematics on random joint angles.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Manipulator description (TOML). Defaults to the built-in six-joint arm.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of random joint-angle vectors.
    #[arg(short = 'n', long, default_value_t = 4)]
    samples: usize,

    /// Random seed. A fresh one is drawn and logged when omitted.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Largest entry-wise difference accepted between the two poses.
    #[arg(short, long, default_value_t = 1e-9)]
    tolerance: f64,
}

fn run(cli: &Cli) -> Result<bool, Error> {
    let manipulator = match &cli.config {
        Some(path) => Manipulator::from_file(path)?,
        None => Manipulator::from_toml_str(DEFAULT_ARM)?,
    };
    let seed = cli.seed.unwrap_or_else(rand::random);
    info!(
        manipulator = manipulator.name(),
        dof = manipulator.dof(),
        samples = cli.samples,
        seed,
        "checking forward kinematics"
    );

    let batch = joint_angle_batch(seed, manipulator.dof(), cli.samples);
    let report = check_batch(&manipulator, &batch, cli.tolerance)?;

    for (i, case) in report.cases.iter().enumerate() {
        println!("\nTest {}:", i + 1);
        println!("Joint angles: {:?}", case.thetas);
        println!("Transformation in spatial frame:{}", case.spatial);
        println!("Transformation in body frame:{}", case.body);
        println!(
            "Are both transformations approximately equal? {} (max error {:.3e})",
            case.consistent,
            case.max_error
        );
    }

    info!(
        failures = report.failures(),
        worst_error = report.worst_error(),
        "done"
    );
    Ok(report.passed())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            error!("{e}");
            ExitCode::from(2)
        }
    }
}
