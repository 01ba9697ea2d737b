//! AWS-oriented driver for power-tuning runs.
//!
//! This crate owns the execution lifecycle (start, poll, classify) and the
//! per-target orchestration. Collaborators are injected through the traits
//! in [`adapters`]; the SDK-backed implementations live in the
//! `power_tuner` binary.

pub mod adapters;
pub mod handlers;
pub mod settings;
