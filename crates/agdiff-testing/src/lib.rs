//! Testing infrastructure for agdiff integration tests.
//!
//! This crate provides utilities for writing deterministic tests:
//! - `fixtures`: Builders for execution summaries and on-disk case layouts
//! - `reasoning`: Stub reasoning clients that record prompts and replay replies

pub mod fixtures;
pub mod reasoning;

pub use fixtures::{CaseDir, RunBuilder, run, write_summary};
pub use reasoning::{FailingClient, ScriptedClient};
