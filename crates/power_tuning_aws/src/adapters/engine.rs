use power_tuning_core::contract::ExecutionDescription;

pub trait WorkflowEngine {
    /// Starts an execution and returns its ARN.
    fn start_execution(&self, workflow_arn: &str, input: &str) -> Result<String, String>;

    fn describe_execution(&self, execution_arn: &str) -> Result<ExecutionDescription, String>;
}
