use std::path::PathBuf;

use power_tuning_core::error::ConfigError;
use power_tuning_core::polling::{PollPolicy, DEFAULT_POLL_INTERVAL_SECS, DEFAULT_TIMEOUT_SECS};
use power_tuning_core::report::DEFAULT_REPORT_PATH;
use power_tuning_core::selection::{DEFAULT_EXCLUDE_PREFIX, DEFAULT_WORKFLOW_PREFIX};

/// Validated settings for one analysis run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisSettings {
    pub exclude_prefix: String,
    pub workflow_prefix: String,
    pub poll_policy: PollPolicy,
    pub report_path: PathBuf,
}

impl AnalysisSettings {
    pub fn new(
        exclude_prefix: impl Into<String>,
        workflow_prefix: impl Into<String>,
        poll_interval_secs: u64,
        timeout_secs: u64,
        report_path: impl Into<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let exclude_prefix = exclude_prefix.into();
        if exclude_prefix.trim().is_empty() {
            return Err(ConfigError::EmptyPrefix {
                field: "exclude_prefix",
            });
        }

        let workflow_prefix = workflow_prefix.into();
        if workflow_prefix.trim().is_empty() {
            return Err(ConfigError::EmptyPrefix {
                field: "workflow_prefix",
            });
        }

        Ok(Self {
            exclude_prefix,
            workflow_prefix,
            poll_policy: PollPolicy::from_secs(poll_interval_secs, timeout_secs)?,
            report_path: report_path.into(),
        })
    }
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            exclude_prefix: DEFAULT_EXCLUDE_PREFIX.to_string(),
            workflow_prefix: DEFAULT_WORKFLOW_PREFIX.to_string(),
            poll_policy: PollPolicy::default(),
            report_path: PathBuf::from(DEFAULT_REPORT_PATH),
        }
    }
}
