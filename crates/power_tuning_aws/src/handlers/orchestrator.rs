use std::time::Instant;

use power_tuning_core::contract::{ExecutionResult, ExecutionStatus, Target, WorkflowDefinition};
use power_tuning_core::error::TuningError;
use power_tuning_core::report::{write_report, ReportRow, TargetOutcome};
use power_tuning_core::selection::{analysis_targets, locate_workflow};
use power_tuning_core::visualization::extract_visualization_url;

use crate::adapters::engine::WorkflowEngine;
use crate::adapters::inventory::FunctionInventory;
use crate::adapters::registry::WorkflowRegistry;
use crate::adapters::sleeper::Sleeper;
use crate::handlers::driver::ExecutionDriver;
use crate::settings::AnalysisSettings;

/// Collaborators for one run.
#[derive(Clone, Copy)]
pub struct TuningClients<'a> {
    pub inventory: &'a dyn FunctionInventory,
    pub registry: &'a dyn WorkflowRegistry,
    pub engine: &'a dyn WorkflowEngine,
    pub sleeper: &'a dyn Sleeper,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discovery {
    pub targets: Vec<Target>,
    pub workflow: WorkflowDefinition,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisReport {
    pub workflow: WorkflowDefinition,
    pub rows: Vec<ReportRow>,
}

/// Lists analysis targets and locates the tuning workflow. Read-only.
pub fn discover(
    clients: &TuningClients<'_>,
    settings: &AnalysisSettings,
) -> Result<Discovery, TuningError> {
    let functions = clients
        .inventory
        .list_functions()
        .map_err(TuningError::Inventory)?;
    let targets = analysis_targets(functions, &settings.exclude_prefix);
    tracing::info!(
        component = "orchestrator",
        event = "targets_listed",
        count = targets.len(),
        "found {} Lambda functions to analyze",
        targets.len()
    );

    let workflows = clients
        .registry
        .list_workflows()
        .map_err(TuningError::Registry)?;
    let workflow = locate_workflow(&workflows, &settings.workflow_prefix)?;
    tracing::info!(
        component = "orchestrator",
        event = "workflow_located",
        workflow_arn = %workflow.arn,
        "using power tuner state machine"
    );

    Ok(Discovery { targets, workflow })
}

/// Drives every target to an outcome, one at a time. Returns exactly one row
/// per target; only discovery failures end the run early.
pub fn run_analysis(
    clients: &TuningClients<'_>,
    settings: &AnalysisSettings,
) -> Result<AnalysisReport, TuningError> {
    let Discovery { targets, workflow } = discover(clients, settings)?;
    let driver = ExecutionDriver::new(clients.engine, clients.sleeper, settings.poll_policy);

    let mut rows = Vec::with_capacity(targets.len());
    for target in &targets {
        let outcome = analyze_target(&driver, &workflow, target);
        rows.push(ReportRow::from_outcome(target, &outcome));
    }

    Ok(AnalysisReport { workflow, rows })
}

/// [`run_analysis`], then writes the report once. No file is written when
/// discovery fails.
pub fn analyze_and_write(
    clients: &TuningClients<'_>,
    settings: &AnalysisSettings,
) -> Result<AnalysisReport, TuningError> {
    let report = run_analysis(clients, settings)?;
    write_report(&report.rows, &settings.report_path)?;
    tracing::info!(
        component = "orchestrator",
        event = "report_written",
        path = %settings.report_path.display(),
        rows = report.rows.len(),
        "results written; no Lambda configurations were modified"
    );
    Ok(report)
}

/// Never fails: any error is folded into [`TargetOutcome::Errored`].
pub fn analyze_target(
    driver: &ExecutionDriver<'_>,
    workflow: &WorkflowDefinition,
    target: &Target,
) -> TargetOutcome {
    let started_at = Instant::now();
    tracing::info!(
        component = "orchestrator",
        event = "target_started",
        function = %target.name,
        current_memory = %target.memory_label()
    );

    let outcome = match drive_execution(driver, workflow, target) {
        Ok(result) if result.status == ExecutionStatus::Succeeded => TargetOutcome::Succeeded {
            visualization: extract_visualization_url(result.output.as_deref()),
        },
        Ok(result) => TargetOutcome::EndedWithStatus(result.status),
        Err(error) => TargetOutcome::Errored(error.to_string()),
    };

    let elapsed_ms = started_at.elapsed().as_millis() as u64;
    match &outcome {
        TargetOutcome::Succeeded { visualization } => tracing::info!(
            component = "orchestrator",
            event = "target_succeeded",
            function = %target.name,
            duration_ms = elapsed_ms,
            visualization = %visualization
        ),
        TargetOutcome::EndedWithStatus(status) => tracing::warn!(
            component = "orchestrator",
            event = "target_failed",
            function = %target.name,
            duration_ms = elapsed_ms,
            status = %status
        ),
        TargetOutcome::Errored(message) => tracing::error!(
            component = "orchestrator",
            event = "target_errored",
            function = %target.name,
            duration_ms = elapsed_ms,
            error = %message
        ),
    }

    outcome
}

fn drive_execution(
    driver: &ExecutionDriver<'_>,
    workflow: &WorkflowDefinition,
    target: &Target,
) -> Result<ExecutionResult, TuningError> {
    let handle = driver.start(workflow, target)?;
    driver.await_terminal(&handle)
}
