use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TuningError;

pub const TUNING_STRATEGY: &str = "cost";
pub const POWER_VALUES: [u32; 6] = [128, 256, 512, 1024, 2048, 3008];
pub const INVOCATIONS_PER_POWER_VALUE: u32 = 10;

/// A function whose memory size is being evaluated. Sourced from the
/// inventory and never modified by this system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub name: String,
    pub arn: String,
    pub memory_size: Option<i32>,
}

impl Target {
    pub fn new(name: impl Into<String>, arn: impl Into<String>, memory_size: Option<i32>) -> Self {
        Self {
            name: name.into(),
            arn: arn.into(),
            memory_size,
        }
    }

    pub fn memory_label(&self) -> String {
        self.memory_size
            .map(|size| size.to_string())
            .unwrap_or_else(|| "Unknown".to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowDefinition {
    pub name: String,
    pub arn: String,
}

impl WorkflowDefinition {
    pub fn new(name: impl Into<String>, arn: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arn: arn.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutputOptions {
    pub data: String,
    pub visualization: String,
}

/// Input document for one tuning execution, using the workflow's field names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisConfiguration {
    #[serde(rename = "lambdaARN")]
    pub lambda_arn: String,
    pub strategy: String,
    #[serde(rename = "autoOptimize")]
    pub auto_optimize: bool,
    pub payload: serde_json::Value,
    #[serde(rename = "powerValues")]
    pub power_values: Vec<u32>,
    pub num: u32,
    #[serde(rename = "parallelInvocation")]
    pub parallel_invocation: bool,
    pub output: OutputOptions,
}

impl AnalysisConfiguration {
    /// Builds the fixed cost analysis for `target`. `autoOptimize` is always
    /// false: the workflow must never reconfigure the function it measures.
    pub fn for_target(target: &Target) -> Result<Self, TuningError> {
        let lambda_arn = target.arn.trim();
        if lambda_arn.is_empty() {
            return Err(TuningError::InvalidTarget {
                name: target.name.clone(),
                message: "function ARN cannot be empty".to_string(),
            });
        }

        Ok(Self {
            lambda_arn: lambda_arn.to_string(),
            strategy: TUNING_STRATEGY.to_string(),
            auto_optimize: false,
            payload: serde_json::json!({}),
            power_values: POWER_VALUES.to_vec(),
            num: INVOCATIONS_PER_POWER_VALUE,
            parallel_invocation: true,
            output: OutputOptions {
                data: "true".to_string(),
                visualization: "true".to_string(),
            },
        })
    }

    pub fn to_input_document(&self) -> Result<String, TuningError> {
        serde_json::to_string(self).map_err(|error| TuningError::Serialization(error.to_string()))
    }
}

/// Opaque execution identifier assigned by the workflow engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExecutionHandle(String);

impl ExecutionHandle {
    pub fn new(arn: impl Into<String>) -> Self {
        Self(arn.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExecutionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionStatus {
    Running,
    Succeeded,
    Failed,
    TimedOut,
    Aborted,
    PendingRedrive,
    Unknown(String),
}

impl ExecutionStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "RUNNING" => Self::Running,
            "SUCCEEDED" => Self::Succeeded,
            "FAILED" => Self::Failed,
            "TIMED_OUT" => Self::TimedOut,
            "ABORTED" => Self::Aborted,
            "PENDING_REDRIVE" => Self::PendingRedrive,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Running => "RUNNING",
            Self::Succeeded => "SUCCEEDED",
            Self::Failed => "FAILED",
            Self::TimedOut => "TIMED_OUT",
            Self::Aborted => "ABORTED",
            Self::PendingRedrive => "PENDING_REDRIVE",
            Self::Unknown(raw) => raw,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Succeeded | Self::Failed | Self::TimedOut | Self::Aborted
        )
    }
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `describe` observation of an execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionDescription {
    pub status: ExecutionStatus,
    pub output: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub handle: ExecutionHandle,
    pub status: ExecutionStatus,
    pub output: Option<String>,
}
