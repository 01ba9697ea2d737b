//! Error types for a tuning run.

use std::time::Duration;

use thiserror::Error;

/// Errors raised while discovering, driving, or reporting tuning executions.
///
/// Only [`TuningError::DiscoveryEmpty`] and the listing failures end a run;
/// every other variant is caught per target and recorded as a report row.
#[derive(Debug, Error)]
pub enum TuningError {
    /// No state machine name matches the configured prefix.
    #[error("no state machine found with prefix '{prefix}'")]
    DiscoveryEmpty { prefix: String },

    #[error("failed to list functions: {0}")]
    Inventory(String),

    #[error("failed to list state machines: {0}")]
    Registry(String),

    #[error("invalid target '{name}': {message}")]
    InvalidTarget { name: String, message: String },

    #[error("failed to serialize execution input: {0}")]
    Serialization(String),

    #[error("failed to start execution for {lambda_arn}: {message}")]
    StartFailure { lambda_arn: String, message: String },

    #[error("failed to describe execution {execution_arn}: {message}")]
    Describe {
        execution_arn: String,
        message: String,
    },

    /// The poll budget ran out. The remote execution is left running.
    #[error(
        "Execution {execution_arn} did not complete within timeout ({} seconds).",
        .waited.as_secs()
    )]
    LocalTimeout {
        execution_arn: String,
        waited: Duration,
    },

    #[error("failed to write report: {0}")]
    Report(String),
}

/// Invalid run settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("poll interval must be greater than zero")]
    ZeroPollInterval,

    #[error("timeout ({timeout_secs}s) must be at least one poll interval ({interval_secs}s)")]
    TimeoutShorterThanInterval {
        timeout_secs: u64,
        interval_secs: u64,
    },

    #[error("{field} cannot be empty")]
    EmptyPrefix { field: &'static str },
}
