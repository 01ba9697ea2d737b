use std::process::{exit, Command, ExitStatus};

use clap::{Parser, Subcommand, ValueEnum};

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Task runner for the power tuning workspace",
    long_about = "A unified CLI for running the power tuner and CI checks\n\
                  in the power tuning workspace."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tune every Lambda function in the current AWS account and region
    Tune {
        /// Build profile used for the tuner binary
        #[arg(value_enum, long, default_value_t = BuildProfile::Release)]
        profile: BuildProfile,
        /// Extra arguments forwarded to `power_tuner`
        #[arg(last = true)]
        args: Vec<String>,
    },
    /// List candidate functions and the tuning state machine
    Discover,
    /// Run CI checks (fmt, clippy, tests)
    Ci {
        /// Job to run
        #[arg(value_enum, default_value_t = CiJob::Check)]
        job: CiJob,
    },
}

#[derive(Clone, ValueEnum)]
enum CiJob {
    /// Formatting and clippy
    Lint,
    /// Workspace tests
    Test,
    /// Lint + test
    Check,
}

#[derive(Clone, Copy, ValueEnum)]
enum BuildProfile {
    Debug,
    Release,
}

impl BuildProfile {
    fn as_cargo_flag(self) -> Option<&'static str> {
        match self {
            Self::Debug => None,
            Self::Release => Some("--release"),
        }
    }
}

// ── helpers ────────────────────────────────────────────────────────

fn step(label: &str) {
    eprintln!("\n=== {label} ===");
}

fn cargo(args: &[&str]) -> ExitStatus {
    eprintln!("+ cargo {}", args.join(" "));
    Command::new("cargo")
        .args(args)
        .status()
        .expect("failed to execute cargo")
}

fn run_cargo(args: &[&str]) {
    let status = cargo(args);
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

fn run_tuner(profile: BuildProfile, tuner_args: &[&str]) {
    let mut cargo_args = vec!["run", "-p", "power_tuning_aws", "--bin", "power_tuner"];
    if let Some(flag) = profile.as_cargo_flag() {
        cargo_args.push(flag);
    }
    cargo_args.push("--");
    cargo_args.extend_from_slice(tuner_args);
    run_cargo(&cargo_args);
}

// ── CI jobs ────────────────────────────────────────────────────────

fn ci_lint() {
    step("Check formatting");
    run_cargo(&["fmt", "--all", "--", "--check"]);

    step("Clippy");
    run_cargo(&[
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ]);
}

fn ci_test() {
    step("Test power_tuning_core");
    run_cargo(&["test", "-p", "power_tuning_core"]);

    step("Test power_tuning_aws");
    run_cargo(&["test", "-p", "power_tuning_aws"]);
}

// ── main ───────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Tune { profile, args } => {
            let mut tuner_args = vec!["analyze"];
            tuner_args.extend(args.iter().map(String::as_str));
            run_tuner(profile, &tuner_args);
        }
        Commands::Discover => run_tuner(BuildProfile::Debug, &["discover"]),
        Commands::Ci { job } => match job {
            CiJob::Lint => ci_lint(),
            CiJob::Test => ci_test(),
            CiJob::Check => {
                ci_lint();
                ci_test();
            }
        },
    }
}
