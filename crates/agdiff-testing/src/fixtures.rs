//! Fixtures for execution summaries and on-disk case layouts.
//!
//! Provides utilities to:
//! - Build `ExecutionSummary` values from a tool-name list
//! - Write `<case>/candidate.json` + `<case>/reference.json` pairs for CLI tests

use agdiff_types::{ExecutionSummary, ToolCallEvent};
use anyhow::Result;
use serde_json::{Map, Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Start building a run for `agent_id`.
pub fn run(agent_id: &str) -> RunBuilder {
    RunBuilder::new(agent_id)
}

/// Fluent builder for `ExecutionSummary`.
///
/// Defaults: successful, 1 turn, no tokens, zero duration.
#[derive(Debug, Clone)]
pub struct RunBuilder {
    summary: ExecutionSummary,
}

impl RunBuilder {
    pub fn new(agent_id: &str) -> Self {
        Self {
            summary: ExecutionSummary {
                success: true,
                num_turns: 1,
                ..ExecutionSummary::new(agent_id)
            },
        }
    }

    /// Append calls with empty input.
    pub fn tools(mut self, names: &[&str]) -> Self {
        for name in names {
            self.summary
                .tool_calls
                .push(ToolCallEvent::new(*name, Map::new()));
        }
        self
    }

    /// Append one call with JSON arguments.
    pub fn call(mut self, name: &str, input: Value) -> Self {
        let input = input.as_object().cloned().unwrap_or_default();
        self.summary.tool_calls.push(ToolCallEvent::new(name, input));
        self
    }

    /// Append one failed call with JSON arguments.
    pub fn failed_call(mut self, name: &str, input: Value) -> Self {
        let input = input.as_object().cloned().unwrap_or_default();
        self.summary
            .tool_calls
            .push(ToolCallEvent::new(name, input).with_output(json!("error"), false));
        self
    }

    pub fn success(mut self, success: bool) -> Self {
        self.summary.success = success;
        self
    }

    pub fn tokens(mut self, input: u64, output: u64, thinking: u64) -> Self {
        self.summary.input_tokens = input;
        self.summary.output_tokens = output;
        self.summary.thinking_tokens = thinking;
        self
    }

    pub fn turns(mut self, turns: u32) -> Self {
        self.summary.num_turns = turns;
        self
    }

    pub fn duration_ms(mut self, duration_ms: u64) -> Self {
        self.summary.duration_ms = duration_ms;
        self
    }

    pub fn build(self) -> ExecutionSummary {
        self.summary
    }
}

/// Temporary directory holding comparison cases laid out for `agdiff batch`.
pub struct CaseDir {
    dir: TempDir,
}

impl CaseDir {
    pub fn new() -> Result<Self> {
        Ok(Self {
            dir: TempDir::new()?,
        })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `<root>/<name>/candidate.json` and `reference.json`.
    pub fn add_case(
        &self,
        name: &str,
        candidate: &ExecutionSummary,
        reference: &ExecutionSummary,
    ) -> Result<PathBuf> {
        let case_dir = self.dir.path().join(name);
        fs::create_dir_all(&case_dir)?;
        write_summary(&case_dir.join("candidate.json"), candidate)?;
        write_summary(&case_dir.join("reference.json"), reference)?;
        Ok(case_dir)
    }
}

pub fn write_summary(path: &Path, summary: &ExecutionSummary) -> Result<()> {
    fs::write(path, serde_json::to_string_pretty(summary)?)?;
    Ok(())
}
