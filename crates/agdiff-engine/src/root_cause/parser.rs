use agdiff_types::RootCause;

/// Keyword rules checked in order against the lowercased reply; first match wins.
pub const KEYWORD_RULES: &[(RootCause, &[&str])] = &[
    (RootCause::PromptIssue, &["prompt"]),
    (RootCause::MissingTool, &["missing", "not registered"]),
    (RootCause::ToolDescription, &["description"]),
];

/// Map a free-text diagnosis onto the closed root-cause set.
///
/// Replies matching no rule are `Unknown`. `ModelPreference` is never
/// produced here; it is reserved for callers that classify by other means.
pub fn parse_root_cause(reply: &str) -> RootCause {
    let lower = reply.to_lowercase();
    KEYWORD_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(cause, _)| *cause)
        .unwrap_or(RootCause::Unknown)
}
