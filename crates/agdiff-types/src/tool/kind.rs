use serde::{Deserialize, Serialize};
use std::fmt;

/// Role a single tool call plays within a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolPurpose {
    /// Reading or searching the workspace (files, globs, grep, early shell lookups)
    Exploration,
    /// Changing the workspace (edit, write, patch)
    Modification,
    /// Task-list and plan management
    Planning,
    /// Shell execution after the early phase (builds, tests, checks)
    Verification,
    /// Anything unrecognized
    Other,
}

impl ToolPurpose {
    pub const ALL: [ToolPurpose; 5] = [
        ToolPurpose::Exploration,
        ToolPurpose::Modification,
        ToolPurpose::Planning,
        ToolPurpose::Verification,
        ToolPurpose::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolPurpose::Exploration => "exploration",
            ToolPurpose::Modification => "modification",
            ToolPurpose::Planning => "planning",
            ToolPurpose::Verification => "verification",
            ToolPurpose::Other => "other",
        }
    }
}

impl fmt::Display for ToolPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
