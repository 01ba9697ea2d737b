use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use power_tuning_aws::adapters::engine::WorkflowEngine;
use power_tuning_aws::adapters::inventory::FunctionInventory;
use power_tuning_aws::adapters::registry::WorkflowRegistry;
use power_tuning_aws::adapters::sleeper::Sleeper;
use power_tuning_aws::handlers::orchestrator::TuningClients;
use power_tuning_core::contract::{
    ExecutionDescription, ExecutionStatus, Target, WorkflowDefinition,
};

pub const WORKFLOW_ARN: &str =
    "arn:aws:states:us-east-1:123456789012:stateMachine:powerTuningStateMachine-Xy12";

pub fn function(name: &str, memory_size: Option<i32>) -> Target {
    Target::new(
        name,
        format!("arn:aws:lambda:us-east-1:123456789012:function:{name}"),
        memory_size,
    )
}

pub fn tuning_workflow() -> WorkflowDefinition {
    WorkflowDefinition::new("powerTuningStateMachine-Xy12", WORKFLOW_ARN)
}

pub fn status(status: ExecutionStatus) -> ExecutionDescription {
    ExecutionDescription {
        status,
        output: None,
    }
}

pub fn succeeded_with(output: &str) -> ExecutionDescription {
    ExecutionDescription {
        status: ExecutionStatus::Succeeded,
        output: Some(output.to_string()),
    }
}

pub struct StaticInventory {
    pub result: Result<Vec<Target>, String>,
}

impl StaticInventory {
    pub fn new(functions: Vec<Target>) -> Self {
        Self {
            result: Ok(functions),
        }
    }
}

impl FunctionInventory for StaticInventory {
    fn list_functions(&self) -> Result<Vec<Target>, String> {
        self.result.clone()
    }
}

pub struct StaticRegistry {
    pub result: Result<Vec<WorkflowDefinition>, String>,
}

impl StaticRegistry {
    pub fn new(workflows: Vec<WorkflowDefinition>) -> Self {
        Self {
            result: Ok(workflows),
        }
    }
}

impl WorkflowRegistry for StaticRegistry {
    fn list_workflows(&self) -> Result<Vec<WorkflowDefinition>, String> {
        self.result.clone()
    }
}

/// Per-function script: how `start` answers and the sequence of statuses
/// `describe` reports. An exhausted status script keeps reporting RUNNING.
#[derive(Default)]
pub struct ExecutionScript {
    pub start_error: Option<String>,
    pub statuses: VecDeque<Result<ExecutionDescription, String>>,
}

impl ExecutionScript {
    pub fn statuses(statuses: Vec<Result<ExecutionDescription, String>>) -> Self {
        Self {
            start_error: None,
            statuses: statuses.into(),
        }
    }

    pub fn start_fails(message: &str) -> Self {
        Self {
            start_error: Some(message.to_string()),
            statuses: VecDeque::new(),
        }
    }

    pub fn never_finishes() -> Self {
        Self::default()
    }
}

#[derive(Default)]
pub struct ScriptedEngine {
    scripts: RefCell<HashMap<String, ExecutionScript>>,
    started: RefCell<Vec<(String, serde_json::Value)>>,
    describes: RefCell<HashMap<String, usize>>,
}

impl ScriptedEngine {
    pub fn with_script(self, function_name: &str, script: ExecutionScript) -> Self {
        self.scripts
            .borrow_mut()
            .insert(execution_arn_for(function_name), script);
        self
    }

    /// Workflow ARN and parsed input document of every start call.
    pub fn started(&self) -> Vec<(String, serde_json::Value)> {
        self.started.borrow().clone()
    }

    pub fn describe_count(&self, function_name: &str) -> usize {
        self.describes
            .borrow()
            .get(&execution_arn_for(function_name))
            .copied()
            .unwrap_or(0)
    }
}

fn execution_arn_for(function_name: &str) -> String {
    format!(
        "arn:aws:states:us-east-1:123456789012:execution:powerTuningStateMachine-Xy12:{function_name}"
    )
}

fn function_name_from_arn(lambda_arn: &str) -> &str {
    lambda_arn.rsplit(':').next().unwrap_or(lambda_arn)
}

impl WorkflowEngine for ScriptedEngine {
    fn start_execution(&self, workflow_arn: &str, input: &str) -> Result<String, String> {
        let document: serde_json::Value =
            serde_json::from_str(input).map_err(|error| format!("bad input: {error}"))?;
        let lambda_arn = document["lambdaARN"].as_str().unwrap_or_default().to_string();
        self.started
            .borrow_mut()
            .push((workflow_arn.to_string(), document));

        let execution_arn = execution_arn_for(function_name_from_arn(&lambda_arn));
        match self
            .scripts
            .borrow()
            .get(&execution_arn)
            .and_then(|script| script.start_error.clone())
        {
            Some(message) => Err(message),
            None => Ok(execution_arn),
        }
    }

    fn describe_execution(&self, execution_arn: &str) -> Result<ExecutionDescription, String> {
        *self
            .describes
            .borrow_mut()
            .entry(execution_arn.to_string())
            .or_insert(0) += 1;

        self.scripts
            .borrow_mut()
            .get_mut(execution_arn)
            .and_then(|script| script.statuses.pop_front())
            .unwrap_or_else(|| Ok(status(ExecutionStatus::Running)))
    }
}

#[derive(Default)]
pub struct RecordingSleeper {
    naps: RefCell<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn naps(&self) -> Vec<Duration> {
        self.naps.borrow().clone()
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration) {
        self.naps.borrow_mut().push(duration);
    }
}

pub fn clients<'a>(
    inventory: &'a StaticInventory,
    registry: &'a StaticRegistry,
    engine: &'a ScriptedEngine,
    sleeper: &'a RecordingSleeper,
) -> TuningClients<'a> {
    TuningClients {
        inventory,
        registry,
        engine,
        sleeper,
    }
}
