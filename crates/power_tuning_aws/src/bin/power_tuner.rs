use std::future::Future;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use power_tuning_aws::adapters::engine::WorkflowEngine;
use power_tuning_aws::adapters::inventory::FunctionInventory;
use power_tuning_aws::adapters::registry::WorkflowRegistry;
use power_tuning_aws::adapters::sleeper::ThreadSleeper;
use power_tuning_aws::handlers::orchestrator::{analyze_and_write, discover, TuningClients};
use power_tuning_aws::settings::AnalysisSettings;
use power_tuning_core::contract::{
    ExecutionDescription, ExecutionStatus, Target, WorkflowDefinition,
};
use power_tuning_core::polling::{DEFAULT_POLL_INTERVAL_SECS, DEFAULT_TIMEOUT_SECS};
use power_tuning_core::report::DEFAULT_REPORT_PATH;
use power_tuning_core::selection::{DEFAULT_EXCLUDE_PREFIX, DEFAULT_WORKFLOW_PREFIX};
use tracing_subscriber::EnvFilter;

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "power_tuner",
    version,
    about = "Run Lambda power tuning for every function in the account",
    long_about = "Starts one cost-strategy power tuning execution per Lambda function,\n\
                  waits for each to finish, and writes the visualization links to CSV.\n\
                  Function configurations are never modified."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Skip functions whose name starts with this prefix
    #[arg(
        long,
        global = true,
        env = "POWER_TUNER_EXCLUDE_PREFIX",
        default_value = DEFAULT_EXCLUDE_PREFIX,
    )]
    exclude_prefix: String,

    /// Use the first state machine whose name starts with this prefix
    #[arg(
        long,
        global = true,
        env = "POWER_TUNER_WORKFLOW_PREFIX",
        default_value = DEFAULT_WORKFLOW_PREFIX,
    )]
    workflow_prefix: String,

    /// Seconds between execution status checks
    #[arg(
        long,
        global = true,
        env = "POWER_TUNER_POLL_INTERVAL_SECS",
        default_value_t = DEFAULT_POLL_INTERVAL_SECS,
    )]
    poll_interval_secs: u64,

    /// Maximum seconds to wait for each execution
    #[arg(
        long,
        global = true,
        env = "POWER_TUNER_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT_SECS,
    )]
    timeout_secs: u64,

    /// CSV report path
    #[arg(
        long,
        global = true,
        env = "POWER_TUNER_OUTPUT",
        default_value = DEFAULT_REPORT_PATH,
    )]
    output: PathBuf,

    /// Log output format
    #[arg(
        value_enum,
        long,
        global = true,
        env = "POWER_TUNER_LOG_FORMAT",
        default_value_t = LogFormat::Text,
    )]
    log_format: LogFormat,
}

#[derive(Clone, Copy, Subcommand)]
enum Commands {
    /// Tune every function and write the report (default)
    Analyze,
    /// List candidate functions and the tuning state machine without starting executions
    Discover,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

impl Cli {
    fn settings(&self) -> anyhow::Result<AnalysisSettings> {
        AnalysisSettings::new(
            self.exclude_prefix.clone(),
            self.workflow_prefix.clone(),
            self.poll_interval_secs,
            self.timeout_secs,
            self.output.clone(),
        )
        .context("invalid settings")
    }
}

// ── AWS adapters ───────────────────────────────────────────────────

fn block_on_sdk<F: Future>(future: F) -> F::Output {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

struct LambdaFunctionInventory {
    lambda_client: aws_sdk_lambda::Client,
}

impl FunctionInventory for LambdaFunctionInventory {
    fn list_functions(&self) -> Result<Vec<Target>, String> {
        let client = self.lambda_client.clone();

        block_on_sdk(async move {
            let mut pages = client.list_functions().into_paginator().send();
            let mut functions = Vec::new();
            while let Some(page) = pages.next().await {
                let page = page.map_err(|error| format!("failed to list functions: {error}"))?;
                for function in page.functions() {
                    let (Some(name), Some(arn)) =
                        (function.function_name(), function.function_arn())
                    else {
                        continue;
                    };
                    functions.push(Target::new(name, arn, function.memory_size()));
                }
            }
            Ok::<_, String>(functions)
        })
    }
}

struct StepFunctionsRegistry {
    sfn_client: aws_sdk_sfn::Client,
}

impl WorkflowRegistry for StepFunctionsRegistry {
    fn list_workflows(&self) -> Result<Vec<WorkflowDefinition>, String> {
        let client = self.sfn_client.clone();

        block_on_sdk(async move {
            let mut pages = client.list_state_machines().into_paginator().send();
            let mut workflows = Vec::new();
            while let Some(page) = pages.next().await {
                let page =
                    page.map_err(|error| format!("failed to list state machines: {error}"))?;
                for state_machine in page.state_machines() {
                    workflows.push(WorkflowDefinition::new(
                        state_machine.name(),
                        state_machine.state_machine_arn(),
                    ));
                }
            }
            Ok::<_, String>(workflows)
        })
    }
}

struct StepFunctionsEngine {
    sfn_client: aws_sdk_sfn::Client,
}

impl WorkflowEngine for StepFunctionsEngine {
    fn start_execution(&self, workflow_arn: &str, input: &str) -> Result<String, String> {
        let client = self.sfn_client.clone();
        let state_machine_arn = workflow_arn.to_string();
        let input = input.to_string();

        block_on_sdk(async move {
            client
                .start_execution()
                .state_machine_arn(state_machine_arn)
                .input(input)
                .send()
                .await
                .map(|output| output.execution_arn().to_string())
                .map_err(|error| format!("failed to start execution: {error}"))
        })
    }

    fn describe_execution(&self, execution_arn: &str) -> Result<ExecutionDescription, String> {
        let client = self.sfn_client.clone();
        let execution_arn = execution_arn.to_string();

        block_on_sdk(async move {
            client
                .describe_execution()
                .execution_arn(execution_arn)
                .send()
                .await
                .map(|output| ExecutionDescription {
                    status: ExecutionStatus::parse(output.status().as_str()),
                    output: output.output().map(str::to_string),
                })
                .map_err(|error| format!("failed to describe execution: {error}"))
        })
    }
}

// ── main ───────────────────────────────────────────────────────────

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn run_command(
    command: Commands,
    settings: AnalysisSettings,
    lambda_client: aws_sdk_lambda::Client,
    sfn_client: aws_sdk_sfn::Client,
) -> anyhow::Result<()> {
    let inventory = LambdaFunctionInventory { lambda_client };
    let registry = StepFunctionsRegistry {
        sfn_client: sfn_client.clone(),
    };
    let engine = StepFunctionsEngine { sfn_client };
    let sleeper = ThreadSleeper;
    let clients = TuningClients {
        inventory: &inventory,
        registry: &registry,
        engine: &engine,
        sleeper: &sleeper,
    };

    match command {
        Commands::Analyze => {
            tracing::info!("starting Lambda power tuning analysis (read-only mode)");
            let report = analyze_and_write(&clients, &settings)?;
            let succeeded = report
                .rows
                .iter()
                .filter(|row| row.status == "Success")
                .count();
            tracing::info!(
                analyzed = report.rows.len(),
                succeeded,
                report = %settings.report_path.display(),
                "analysis finished"
            );
        }
        Commands::Discover => {
            let discovery = discover(&clients, &settings)?;
            for target in &discovery.targets {
                println!("{}\t{}\t{}", target.name, target.memory_label(), target.arn);
            }
            println!("state machine: {}", discovery.workflow.arn);
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    let settings = cli.settings()?;
    let command = cli.command.unwrap_or(Commands::Analyze);

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let lambda_client = aws_sdk_lambda::Client::new(&aws_config);
    let sfn_client = aws_sdk_sfn::Client::new(&aws_config);

    tokio::task::spawn_blocking(move || run_command(command, settings, lambda_client, sfn_client))
        .await
        .context("analysis task panicked")?
}
