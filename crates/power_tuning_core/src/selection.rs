use crate::contract::{Target, WorkflowDefinition};
use crate::error::TuningError;

pub const DEFAULT_EXCLUDE_PREFIX: &str = "serverlessrepo-aws-lambda-power-tuning";
pub const DEFAULT_WORKFLOW_PREFIX: &str = "powerTuningStateMachine";

/// Drops the tuning stack's own functions, keeping listing order.
pub fn analysis_targets(functions: Vec<Target>, exclude_prefix: &str) -> Vec<Target> {
    functions
        .into_iter()
        .filter(|function| !function.name.starts_with(exclude_prefix))
        .collect()
}

/// First workflow, in listing order, whose name starts with `prefix`.
pub fn locate_workflow(
    workflows: &[WorkflowDefinition],
    prefix: &str,
) -> Result<WorkflowDefinition, TuningError> {
    workflows
        .iter()
        .find(|workflow| workflow.name.starts_with(prefix))
        .cloned()
        .ok_or_else(|| TuningError::DiscoveryEmpty {
            prefix: prefix.to_string(),
        })
}
