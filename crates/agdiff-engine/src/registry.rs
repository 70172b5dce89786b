//! Registry of canonical tool names and the family each belongs to.
//!
//! Names here are already normalized (lowercase, aliases resolved); look
//! them up through [`crate::ToolNameNormalizer`] first.

/// Behavioral family of a known tool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolFamily {
    /// Read and search tools
    Exploration,
    /// Write and edit tools
    Modification,
    /// Task-list and plan tools
    Planning,
    /// Generic shell execution; purpose depends on position
    Shell,
    /// Terminal answer submission
    Submit,
}

/// Tool specification with canonical name and family
pub struct ToolSpec {
    pub name: &'static str,
    pub family: ToolFamily,
}

impl ToolSpec {
    pub const fn new(name: &'static str, family: ToolFamily) -> Self {
        Self { name, family }
    }
}

const KNOWN_TOOLS: &[ToolSpec] = &[
    // Exploration tools
    ToolSpec::new("read", ToolFamily::Exploration),
    ToolSpec::new("glob", ToolFamily::Exploration),
    ToolSpec::new("grep", ToolFamily::Exploration),
    ToolSpec::new("webfetch", ToolFamily::Exploration),
    ToolSpec::new("websearch", ToolFamily::Exploration),
    ToolSpec::new("notebookread", ToolFamily::Exploration),
    // Modification tools
    ToolSpec::new("edit", ToolFamily::Modification),
    ToolSpec::new("write", ToolFamily::Modification),
    ToolSpec::new("notebookedit", ToolFamily::Modification),
    // Planning tools
    ToolSpec::new("todowrite", ToolFamily::Planning),
    ToolSpec::new("todoread", ToolFamily::Planning),
    ToolSpec::new("enterplanmode", ToolFamily::Planning),
    ToolSpec::new("exitplanmode", ToolFamily::Planning),
    // Shell
    ToolSpec::new("bash", ToolFamily::Shell),
    // Submission
    ToolSpec::new("submit", ToolFamily::Submit),
];

/// Family of a canonical tool name, if the tool is known
pub fn family_of(canonical_name: &str) -> Option<ToolFamily> {
    KNOWN_TOOLS
        .iter()
        .find(|spec| spec.name == canonical_name)
        .map(|spec| spec.family)
}

pub fn is_shell(canonical_name: &str) -> bool {
    family_of(canonical_name) == Some(ToolFamily::Shell)
}

pub fn is_submit(canonical_name: &str) -> bool {
    family_of(canonical_name) == Some(ToolFamily::Submit)
}

pub fn is_planning(canonical_name: &str) -> bool {
    family_of(canonical_name) == Some(ToolFamily::Planning)
}
