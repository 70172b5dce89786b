use crate::tool::ToolCallEvent;
use crate::util::null_as_default;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Normalized record of one agent run.
///
/// `tool_calls` keeps invocation order; repeated calls to the same tool stay
/// as distinct positions. Missing or `null` collections load as empty.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExecutionSummary {
    #[serde(alias = "agentId")]
    pub agent_id: String,
    #[serde(default, alias = "toolCalls", deserialize_with = "null_as_default")]
    pub tool_calls: Vec<ToolCallEvent>,
    #[serde(default, alias = "inputTokens")]
    pub input_tokens: u64,
    #[serde(default, alias = "outputTokens")]
    pub output_tokens: u64,
    #[serde(default, alias = "thinkingTokens")]
    pub thinking_tokens: u64,
    #[serde(default, alias = "numTurns")]
    pub num_turns: u32,
    #[serde(default)]
    pub success: bool,
    #[serde(default, alias = "durationMs")]
    pub duration_ms: u64,
}

impl ExecutionSummary {
    pub fn new(agent_id: impl Into<String>) -> Self {
        Self {
            agent_id: agent_id.into(),
            ..Self::default()
        }
    }

    /// Sum of all token counters, saturating at `u64::MAX`.
    pub fn total_tokens(&self) -> u64 {
        self.input_tokens
            .saturating_add(self.output_tokens)
            .saturating_add(self.thinking_tokens)
    }

    /// Tool names in call order, as the executor reported them.
    pub fn tool_sequence(&self) -> Vec<&str> {
        self.tool_calls.iter().map(|c| c.tool_name.as_str()).collect()
    }

    pub fn tool_call_count(&self) -> usize {
        self.tool_calls.len()
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}
