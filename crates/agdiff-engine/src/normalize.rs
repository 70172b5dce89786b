//! Tool-name normalization.
//!
//! Candidate and reference executors spell the same tool differently
//! (`bash` vs `Bash`, `str_replace_editor` vs `Edit`). Every set, sequence
//! comparison and pattern predicate in the engine goes through
//! [`ToolNameNormalizer::normalize`]: trim, case-fold, then alias lookup.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Built-in alias table, keyed by case-folded spelling
const BUILTIN_ALIASES: &[(&str, &str)] = &[
    // Shell
    ("shell", "bash"),
    ("execute_command", "bash"),
    ("run_shell_command", "bash"),
    ("run_terminal_cmd", "bash"),
    // Read
    ("read_file", "read"),
    ("view", "read"),
    ("cat", "read"),
    // Write
    ("write_file", "write"),
    ("create_file", "write"),
    // Edit
    ("str_replace_editor", "edit"),
    ("str_replace_based_edit_tool", "edit"),
    ("apply_patch", "edit"),
    ("multiedit", "edit"),
    // Search
    ("list_files", "glob"),
    ("ls", "glob"),
    ("search_files", "grep"),
    ("search", "grep"),
    // Planning
    ("update_plan", "todowrite"),
    ("todo_write", "todowrite"),
    // Submission
    ("submit_answer", "submit"),
    ("finish", "submit"),
];

static DEFAULT_NORMALIZER: LazyLock<ToolNameNormalizer> = LazyLock::new(ToolNameNormalizer::new);

#[derive(Debug, Clone, PartialEq)]
pub struct ToolNameNormalizer {
    aliases: HashMap<String, String>,
}

impl Default for ToolNameNormalizer {
    fn default() -> Self {
        DEFAULT_NORMALIZER.clone()
    }
}

impl ToolNameNormalizer {
    /// Normalizer with the built-in alias table.
    pub fn new() -> Self {
        let aliases = BUILTIN_ALIASES
            .iter()
            .map(|(from, to)| (from.to_string(), to.to_string()))
            .collect();
        Self { aliases }
    }

    /// Merge extra aliases over the current table.
    ///
    /// Both sides are case-folded so configured entries behave like the
    /// built-ins regardless of how they were written.
    pub fn with_aliases<I, K, V>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (from, to) in extra {
            self.aliases.insert(fold(from.as_ref()), fold(to.as_ref()));
        }
        self
    }

    /// Canonical identity of a tool name.
    pub fn normalize(&self, name: &str) -> String {
        let folded = fold(name);
        match self.aliases.get(&folded) {
            Some(canonical) => canonical.clone(),
            None => folded,
        }
    }

    pub fn normalize_all<S: AsRef<str>>(&self, names: &[S]) -> Vec<String> {
        names.iter().map(|n| self.normalize(n.as_ref())).collect()
    }

    pub fn alias_count(&self) -> usize {
        self.aliases.len()
    }
}

fn fold(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_folding() {
        let normalizer = ToolNameNormalizer::default();
        assert_eq!(normalizer.normalize("Bash"), "bash");
        assert_eq!(normalizer.normalize("bash"), "bash");
        assert_eq!(normalizer.normalize("  TodoWrite "), "todowrite");
    }

    #[test]
    fn test_builtin_aliases() {
        let normalizer = ToolNameNormalizer::default();
        assert_eq!(normalizer.normalize("execute_command"), "bash");
        assert_eq!(normalizer.normalize("Str_Replace_Editor"), "edit");
        assert_eq!(normalizer.normalize("update_plan"), "todowrite");
        assert_eq!(normalizer.normalize("read_file"), "read");
    }

    #[test]
    fn test_unknown_names_pass_through_folded() {
        let normalizer = ToolNameNormalizer::default();
        assert_eq!(normalizer.normalize("mcp__Sqlite__Query"), "mcp__sqlite__query");
    }

    #[test]
    fn test_configured_aliases_override_builtins() {
        let normalizer =
            ToolNameNormalizer::new().with_aliases([("Finish", "Done"), ("RunTests", "Bash")]);
        assert_eq!(normalizer.normalize("finish"), "done");
        assert_eq!(normalizer.normalize("runtests"), "bash");
        assert_eq!(normalizer.normalize("shell"), "bash");
    }
}
