use power_tuning_core::contract::Target;

/// Lists every function in the account, across all pages.
pub trait FunctionInventory {
    fn list_functions(&self) -> Result<Vec<Target>, String>;
}
