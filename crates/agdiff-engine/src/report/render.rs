use super::{ComparisonReport, join_set, pass_fail};
use std::fmt;

/// Console rendering of a [`ComparisonReport`].
///
/// Carries the same sections as [`MarkdownReport`]: title, pass/fail,
/// insight, traces, tool usage, behavior, differences, raw sequences.
pub struct TextReport<'a> {
    report: &'a ComparisonReport,
}

impl<'a> TextReport<'a> {
    pub fn new(report: &'a ComparisonReport) -> Self {
        Self { report }
    }
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.report;
        let usage = r.usage();

        writeln!(f, "=== Comparison: {} ===", r.use_case())?;
        writeln!(
            f,
            "Result: candidate {} | reference {}",
            pass_fail(r.candidate().success),
            pass_fail(r.reference().success)
        )?;
        writeln!(f, "Insight: {}", r.insight())?;
        writeln!(f)?;

        writeln!(f, "Candidate trace:")?;
        write!(f, "{}", r.candidate_trace())?;
        writeln!(f, "Reference trace:")?;
        write!(f, "{}", r.reference_trace())?;
        writeln!(f)?;

        writeln!(f, "Tool usage (similarity {:.2}):", usage.jaccard_similarity)?;
        writeln!(f, "  shared: {}", join_set(&usage.shared))?;
        writeln!(f, "  candidate only: {}", join_set(&usage.a_only))?;
        writeln!(f, "  reference only: {}", join_set(&usage.b_only))?;
        writeln!(f)?;

        writeln!(f, "Behavior:")?;
        writeln!(f, "  candidate: {}", r.candidate_profile())?;
        writeln!(f, "  reference: {}", r.reference_profile())?;
        writeln!(f)?;

        writeln!(f, "Differences:")?;
        let differences = r.analyze_differences();
        if differences.is_empty() {
            writeln!(f, "  (none)")?;
        }
        for difference in differences {
            writeln!(f, "  - {}", difference)?;
        }
        writeln!(f)?;

        writeln!(f, "Sequences:")?;
        writeln!(f, "  candidate: {}", r.candidate_sequence_line())?;
        writeln!(f, "  reference: {}", r.reference_sequence_line())
    }
}

/// Markdown rendering of a [`ComparisonReport`] for persisted reports.
pub struct MarkdownReport<'a> {
    report: &'a ComparisonReport,
}

impl<'a> MarkdownReport<'a> {
    pub fn new(report: &'a ComparisonReport) -> Self {
        Self { report }
    }
}

impl fmt::Display for MarkdownReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.report;
        let usage = r.usage();

        writeln!(f, "# Comparison: {}\n", r.use_case())?;
        writeln!(
            f,
            "**Result:** candidate {} | reference {}\n",
            pass_fail(r.candidate().success),
            pass_fail(r.reference().success)
        )?;
        writeln!(f, "> {}\n", r.insight())?;

        writeln!(f, "## Candidate Trace\n")?;
        writeln!(f, "```text\n{}```\n", r.candidate_trace())?;
        writeln!(f, "## Reference Trace\n")?;
        writeln!(f, "```text\n{}```\n", r.reference_trace())?;

        writeln!(f, "## Tool Usage\n")?;
        writeln!(f, "- Similarity: {:.2}", usage.jaccard_similarity)?;
        writeln!(f, "- Shared: {}", join_set(&usage.shared))?;
        writeln!(f, "- Candidate only: {}", join_set(&usage.a_only))?;
        writeln!(f, "- Reference only: {}\n", join_set(&usage.b_only))?;

        writeln!(f, "## Behavior\n")?;
        writeln!(f, "- Candidate: {}", r.candidate_profile())?;
        writeln!(f, "- Reference: {}\n", r.reference_profile())?;

        writeln!(f, "## Differences\n")?;
        let differences = r.analyze_differences();
        if differences.is_empty() {
            writeln!(f, "- (none)")?;
        }
        for difference in differences {
            writeln!(f, "- {}", difference)?;
        }
        writeln!(f)?;

        writeln!(f, "## Tool Sequences\n")?;
        writeln!(f, "- Candidate: `{}`", r.candidate_sequence_line())?;
        writeln!(f, "- Reference: `{}`", r.reference_sequence_line())
    }
}
