pub mod engine;
pub mod inventory;
pub mod registry;
pub mod sleeper;
