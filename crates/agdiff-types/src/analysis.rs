use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Closed classification of why a tool gap exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RootCause {
    /// No gap, nothing to explain
    None,
    /// The candidate's prompt does not steer it toward the tool
    PromptIssue,
    /// The tool exists but its description is unclear
    ToolDescription,
    /// The tool is not registered for the candidate at all
    MissingTool,
    /// The model simply prefers another approach
    ModelPreference,
    Unknown,
}

impl RootCause {
    pub fn as_str(&self) -> &'static str {
        match self {
            RootCause::None => "NONE",
            RootCause::PromptIssue => "PROMPT_ISSUE",
            RootCause::ToolDescription => "TOOL_DESCRIPTION",
            RootCause::MissingTool => "MISSING_TOOL",
            RootCause::ModelPreference => "MODEL_PREFERENCE",
            RootCause::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for RootCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Diagnosis of a single compared use case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub test_name: String,
    pub tool_gaps: BTreeSet<String>,
    pub similarity: f64,
    pub root_cause: RootCause,
    pub analysis: String,
    pub confidence: f64,
}

impl AnalysisResult {
    pub fn has_gap(&self) -> bool {
        !self.tool_gaps.is_empty()
    }
}

/// Diagnosis across a batch of compared use cases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchAnalysisResult {
    pub total_tests: usize,
    pub tests_with_gaps: usize,
    pub all_tool_gaps: BTreeSet<String>,
    pub analysis: String,
    pub confidence: f64,
}
