//! Comparison report over a candidate run and a reference run.

mod render;
mod trace;

pub use render::{MarkdownReport, TextReport};
pub use trace::{TraceLine, TraceView};

use crate::comparison::ToolUsageComparison;
use crate::patterns::{BehaviorProfile, PatternAnalyzer};
use agdiff_types::ExecutionSummary;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// Separator used when printing raw tool sequences
pub const SEQUENCE_SEPARATOR: &str = " → ";

/// Immutable aggregate of two runs of the same use case.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    use_case: String,
    candidate: ExecutionSummary,
    reference: ExecutionSummary,
    usage: ToolUsageComparison,
    candidate_profile: BehaviorProfile,
    reference_profile: BehaviorProfile,
    #[serde(skip)]
    analyzer: PatternAnalyzer,
    #[serde(skip)]
    candidate_canonical: Vec<String>,
    #[serde(skip)]
    reference_canonical: Vec<String>,
}

impl ComparisonReport {
    /// Build a report with the default normalizer and early-phase threshold.
    pub fn new(
        use_case: impl Into<String>,
        candidate: ExecutionSummary,
        reference: ExecutionSummary,
    ) -> Self {
        Self::build(use_case, candidate, reference, &PatternAnalyzer::default())
    }

    pub fn build(
        use_case: impl Into<String>,
        candidate: ExecutionSummary,
        reference: ExecutionSummary,
        analyzer: &PatternAnalyzer,
    ) -> Self {
        let normalizer = analyzer.normalizer();
        let usage = ToolUsageComparison::from_summaries(normalizer, &candidate, &reference);
        let candidate_profile = analyzer.profile(&candidate.tool_calls);
        let reference_profile = analyzer.profile(&reference.tool_calls);
        let candidate_canonical = normalizer.normalize_all(&candidate.tool_sequence());
        let reference_canonical = normalizer.normalize_all(&reference.tool_sequence());

        Self {
            use_case: use_case.into(),
            candidate,
            reference,
            usage,
            candidate_profile,
            reference_profile,
            analyzer: analyzer.clone(),
            candidate_canonical,
            reference_canonical,
        }
    }

    pub fn use_case(&self) -> &str {
        &self.use_case
    }

    pub fn candidate(&self) -> &ExecutionSummary {
        &self.candidate
    }

    pub fn reference(&self) -> &ExecutionSummary {
        &self.reference
    }

    pub fn usage(&self) -> &ToolUsageComparison {
        &self.usage
    }

    pub fn candidate_profile(&self) -> &BehaviorProfile {
        &self.candidate_profile
    }

    pub fn reference_profile(&self) -> &BehaviorProfile {
        &self.reference_profile
    }

    pub fn candidate_trace(&self) -> TraceView<'_> {
        TraceView::new(&self.candidate, &self.analyzer)
    }

    pub fn reference_trace(&self) -> TraceView<'_> {
        TraceView::new(&self.reference, &self.analyzer)
    }

    pub fn both_succeeded(&self) -> bool {
        self.candidate.success && self.reference.success
    }

    /// Same tools in the same order, after normalization.
    pub fn sequences_identical(&self) -> bool {
        self.candidate_canonical == self.reference_canonical
    }

    /// Most salient difference between the runs.
    pub fn insight(&self) -> Insight {
        match (self.candidate.success, self.reference.success) {
            (false, false) => Insight::failed("both candidate and reference runs failed"),
            (false, true) => {
                Insight::failed("candidate run failed while reference run succeeded")
            }
            (true, false) => {
                Insight::failed("reference run failed while candidate run succeeded")
            }
            (true, true) if self.sequences_identical() => Insight {
                kind: InsightKind::Identical,
                message: format!(
                    "both runs succeeded with the same {}-call tool sequence",
                    self.candidate.tool_call_count()
                ),
            },
            (true, true) => Insight {
                kind: InsightKind::Different,
                message: self.first_divergence(),
            },
        }
    }

    pub fn generate_insight(&self) -> String {
        self.insight().to_string()
    }

    fn first_divergence(&self) -> String {
        let candidate_count = self.candidate_canonical.len();
        let reference_count = self.reference_canonical.len();
        if candidate_count != reference_count {
            return format!(
                "candidate made {} tool calls, reference made {}",
                candidate_count, reference_count
            );
        }

        let candidate_seq = self.candidate.tool_sequence();
        let reference_seq = self.reference.tool_sequence();
        let position = self
            .candidate_canonical
            .iter()
            .zip(&self.reference_canonical)
            .position(|(c, r)| c != r)
            .unwrap_or(0);

        if position == 0 {
            format!(
                "candidate started with {}, reference started with {}",
                candidate_seq.first().copied().unwrap_or("(none)"),
                reference_seq.first().copied().unwrap_or("(none)")
            )
        } else {
            format!(
                "sequences diverge at call #{} ({} vs {})",
                position + 1,
                candidate_seq[position],
                reference_seq[position]
            )
        }
    }

    /// Discrete difference statements in a fixed order: tool-call count,
    /// first tool, turns, total tokens, duration.
    pub fn analyze_differences(&self) -> Vec<String> {
        let mut differences = Vec::new();
        let candidate = &self.candidate;
        let reference = &self.reference;

        if candidate.tool_call_count() != reference.tool_call_count() {
            differences.push(format!(
                "Tool calls: candidate {} vs reference {}",
                candidate.tool_call_count(),
                reference.tool_call_count()
            ));
        }

        if self.candidate_canonical.first() != self.reference_canonical.first() {
            differences.push(format!(
                "First tool: candidate {} vs reference {}",
                candidate
                    .tool_sequence()
                    .first()
                    .copied()
                    .unwrap_or("(none)"),
                reference
                    .tool_sequence()
                    .first()
                    .copied()
                    .unwrap_or("(none)")
            ));
        }

        if candidate.num_turns != reference.num_turns {
            differences.push(format!(
                "Turns: candidate {} vs reference {}",
                candidate.num_turns, reference.num_turns
            ));
        }

        if candidate.total_tokens() != reference.total_tokens() {
            let delta = candidate.total_tokens() as i128 - reference.total_tokens() as i128;
            differences.push(format!(
                "Total tokens: candidate {} vs reference {} ({:+})",
                candidate.total_tokens(),
                reference.total_tokens(),
                delta
            ));
        }

        if candidate.duration_ms != reference.duration_ms {
            differences.push(format!(
                "Duration: candidate {}ms vs reference {}ms",
                candidate.duration_ms, reference.duration_ms
            ));
        }

        differences
    }

    /// Raw candidate tool sequence joined for display
    pub fn candidate_sequence_line(&self) -> String {
        join_sequence(&self.candidate)
    }

    pub fn reference_sequence_line(&self) -> String {
        join_sequence(&self.reference)
    }

    /// Plain-text rendering for console and logs
    pub fn to_text(&self) -> String {
        TextReport::new(self).to_string()
    }

    /// Markdown rendering for persisted reports
    pub fn to_markdown(&self) -> String {
        MarkdownReport::new(self).to_string()
    }
}

pub fn pass_fail(success: bool) -> &'static str {
    if success { "PASS" } else { "FAIL" }
}

/// Comma-joined tool names, or `(none)` for an empty set.
pub fn join_set(set: &BTreeSet<String>) -> String {
    if set.is_empty() {
        "(none)".to_string()
    } else {
        set.iter().cloned().collect::<Vec<_>>().join(", ")
    }
}

fn join_sequence(summary: &ExecutionSummary) -> String {
    let sequence = summary.tool_sequence();
    if sequence.is_empty() {
        "(no tool calls)".to_string()
    } else {
        sequence.join(SEQUENCE_SEPARATOR)
    }
}

/// Class of the headline insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InsightKind {
    Identical,
    Different,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub message: String,
}

impl Insight {
    fn failed(message: &str) -> Self {
        Self {
            kind: InsightKind::Failed,
            message: message.to_string(),
        }
    }
}

impl fmt::Display for Insight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            InsightKind::Identical => write!(f, "IDENTICAL: {}", self.message),
            InsightKind::Different => write!(f, "Different: {}", self.message),
            InsightKind::Failed => write!(f, "FAILED: {}", self.message),
        }
    }
}
