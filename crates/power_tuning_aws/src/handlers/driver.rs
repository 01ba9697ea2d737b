//! Execution lifecycle for a single target.
//!
//! Locally a drive moves `Started -> Polling -> {Terminal, LocalTimeout}`.
//! On local timeout the driver only stops waiting: no stop call is sent, so
//! the remote execution keeps running until the engine ends it.

use power_tuning_core::contract::{
    AnalysisConfiguration, ExecutionHandle, ExecutionResult, Target, WorkflowDefinition,
};
use power_tuning_core::error::TuningError;
use power_tuning_core::polling::PollPolicy;

use crate::adapters::engine::WorkflowEngine;
use crate::adapters::sleeper::Sleeper;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverPhase {
    Started,
    Polling,
    Terminal,
    LocalTimeout,
}

impl DriverPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Started => "started",
            Self::Polling => "polling",
            Self::Terminal => "terminal",
            Self::LocalTimeout => "local_timeout",
        }
    }
}

pub struct ExecutionDriver<'a> {
    engine: &'a dyn WorkflowEngine,
    sleeper: &'a dyn Sleeper,
    policy: PollPolicy,
}

impl<'a> ExecutionDriver<'a> {
    pub fn new(
        engine: &'a dyn WorkflowEngine,
        sleeper: &'a dyn Sleeper,
        policy: PollPolicy,
    ) -> Self {
        Self {
            engine,
            sleeper,
            policy,
        }
    }

    /// Starts one tuning execution for `target`. Not retried on failure.
    pub fn start(
        &self,
        workflow: &WorkflowDefinition,
        target: &Target,
    ) -> Result<ExecutionHandle, TuningError> {
        let configuration = AnalysisConfiguration::for_target(target)?;
        let input = configuration.to_input_document()?;
        tracing::debug!(
            component = "execution_driver",
            event = "execution_input",
            function = %target.name,
            input = %input
        );

        let execution_arn = self
            .engine
            .start_execution(&workflow.arn, &input)
            .map_err(|message| TuningError::StartFailure {
                lambda_arn: configuration.lambda_arn.clone(),
                message,
            })?;

        let handle = ExecutionHandle::new(execution_arn);
        log_phase(DriverPhase::Started, &handle);
        Ok(handle)
    }

    /// Polls until a terminal status or until the poll budget is spent.
    pub fn await_terminal(&self, handle: &ExecutionHandle) -> Result<ExecutionResult, TuningError> {
        log_phase(DriverPhase::Polling, handle);

        for attempt in 1..=self.policy.max_polls() {
            let description = self
                .engine
                .describe_execution(handle.as_str())
                .map_err(|message| TuningError::Describe {
                    execution_arn: handle.to_string(),
                    message,
                })?;

            tracing::debug!(
                component = "execution_driver",
                event = "status_polled",
                execution_arn = %handle,
                attempt,
                status = %description.status
            );

            if description.status.is_terminal() {
                log_phase(DriverPhase::Terminal, handle);
                return Ok(ExecutionResult {
                    handle: handle.clone(),
                    status: description.status,
                    output: description.output,
                });
            }

            self.sleeper.sleep(self.policy.interval());
        }

        tracing::warn!(
            component = "execution_driver",
            event = DriverPhase::LocalTimeout.as_str(),
            execution_arn = %handle,
            polls = self.policy.max_polls(),
            "stopped waiting; the remote execution was not aborted"
        );
        Err(TuningError::LocalTimeout {
            execution_arn: handle.to_string(),
            waited: self.policy.budget(),
        })
    }
}

fn log_phase(phase: DriverPhase, handle: &ExecutionHandle) {
    tracing::info!(
        component = "execution_driver",
        event = phase.as_str(),
        execution_arn = %handle
    );
}
