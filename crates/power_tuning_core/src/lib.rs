//! Shared power-tuning domain primitives.
//!
//! This crate owns the deterministic parts of a tuning run: the analysis
//! contract sent to the workflow, the execution status model, the poll
//! budget, visualization lookup, target/workflow selection, and the report.
//! It intentionally excludes AWS SDK and async runtime concerns.

pub mod contract;
pub mod error;
pub mod polling;
pub mod report;
pub mod selection;
pub mod visualization;
