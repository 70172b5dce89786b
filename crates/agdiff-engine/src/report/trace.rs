use crate::patterns::PatternAnalyzer;
use agdiff_types::{ExecutionSummary, ToolPurpose};
use std::fmt;

const ARG_SUMMARY_MAX_CHARS: usize = 80;

/// One rendered tool call
#[derive(Debug, Clone, PartialEq)]
pub struct TraceLine {
    pub position: usize,
    pub tool_name: String,
    pub purpose: ToolPurpose,
    pub success: bool,
    pub arguments: String,
}

/// Formatted trace of a single run: a header line plus one line per call.
#[derive(Debug, Clone)]
pub struct TraceView<'a> {
    summary: &'a ExecutionSummary,
    lines: Vec<TraceLine>,
}

impl<'a> TraceView<'a> {
    pub fn new(summary: &'a ExecutionSummary, analyzer: &PatternAnalyzer) -> Self {
        let purposes = analyzer.classify_calls(&summary.tool_calls);
        let lines = summary
            .tool_calls
            .iter()
            .zip(purposes)
            .enumerate()
            .map(|(i, (call, purpose))| TraceLine {
                position: i + 1,
                tool_name: call.tool_name.clone(),
                purpose,
                success: call.success,
                arguments: truncate(&single_line(&call.argument_text()), ARG_SUMMARY_MAX_CHARS),
            })
            .collect();

        Self { summary, lines }
    }

    pub fn lines(&self) -> &[TraceLine] {
        &self.lines
    }

    pub fn header(&self) -> String {
        let s = self.summary;
        format!(
            "{}: {}, {} turns, {} tokens (in {} / out {} / thinking {}), {}ms",
            s.agent_id,
            super::pass_fail(s.success),
            s.num_turns,
            s.total_tokens(),
            s.input_tokens,
            s.output_tokens,
            s.thinking_tokens,
            s.duration_ms
        )
    }
}

impl fmt::Display for TraceView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.header())?;
        if self.lines.is_empty() {
            return writeln!(f, "  (no tool calls)");
        }
        for line in &self.lines {
            write!(
                f,
                "  {:>2}. {} [{}] {}",
                line.position,
                line.tool_name,
                line.purpose,
                if line.success { "ok" } else { "err" }
            )?;
            if line.arguments.is_empty() {
                writeln!(f)?;
            } else {
                writeln!(f, " {}", line.arguments)?;
            }
        }
        Ok(())
    }
}

fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agdiff_types::ToolCallEvent;
    use serde_json::json;

    fn call(name: &str, args: serde_json::Value, success: bool) -> ToolCallEvent {
        ToolCallEvent::new(name, args.as_object().cloned().unwrap_or_default())
            .with_output(json!(null), success)
    }

    #[test]
    fn test_trace_lines_carry_purpose_and_arguments() {
        let summary = ExecutionSummary {
            tool_calls: vec![
                call("Read", json!({"file_path": "src/lib.rs"}), true),
                call("bash", json!({"command": "cargo\n  test"}), false),
            ],
            success: true,
            ..ExecutionSummary::new("candidate")
        };

        let view = TraceView::new(&summary, &PatternAnalyzer::default());
        assert_eq!(view.lines().len(), 2);
        assert_eq!(view.lines()[0].purpose, ToolPurpose::Exploration);
        assert_eq!(view.lines()[1].purpose, ToolPurpose::Verification);
        assert_eq!(view.lines()[1].arguments, "cargo test");

        let rendered = view.to_string();
        assert!(rendered.contains("   1. Read [exploration] ok src/lib.rs"));
        assert!(rendered.contains("   2. bash [verification] err cargo test"));
    }

    #[test]
    fn test_truncate_long_arguments() {
        let long = "x".repeat(120);
        let truncated = truncate(&long, 80);
        assert_eq!(truncated.chars().count(), 80);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn test_empty_trace() {
        let summary = ExecutionSummary::new("reference");
        let rendered = TraceView::new(&summary, &PatternAnalyzer::default()).to_string();
        assert!(rendered.starts_with("reference: FAIL, 0 turns, 0 tokens"));
        assert!(rendered.contains("(no tool calls)"));
    }
}
