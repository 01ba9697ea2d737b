use power_tuning_core::contract::WorkflowDefinition;

/// Lists every state machine in the account, across all pages.
pub trait WorkflowRegistry {
    fn list_workflows(&self) -> Result<Vec<WorkflowDefinition>, String>;
}
