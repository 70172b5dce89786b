//! Terminal and file output shared by the handlers.

use agdiff_engine::report::{join_set, pass_fail};
use agdiff_engine::{ComparisonReport, InsightKind};
use agdiff_types::{AnalysisResult, BatchAnalysisResult, RootCause};
use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::path::Path;

/// Colors only when stdout is a terminal and NO_COLOR is unset.
pub fn use_color() -> bool {
    std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

pub fn status_label(success: bool, color: bool) -> String {
    let label = pass_fail(success);
    match (success, color) {
        (_, false) => label.to_string(),
        (true, true) => label.green().to_string(),
        (false, true) => label.red().to_string(),
    }
}

pub fn insight_label(kind: InsightKind, color: bool) -> String {
    let label = match kind {
        InsightKind::Identical => "IDENTICAL",
        InsightKind::Different => "DIFFERENT",
        InsightKind::Failed => "FAILED",
    };
    if !color {
        return label.to_string();
    }
    match kind {
        InsightKind::Identical => label.green().to_string(),
        InsightKind::Different => label.yellow().to_string(),
        InsightKind::Failed => label.red().to_string(),
    }
}

pub fn root_cause_label(cause: RootCause, color: bool) -> String {
    let label = cause.as_str();
    if !color {
        return label.to_string();
    }
    match cause {
        RootCause::None => label.green().to_string(),
        RootCause::Unknown => label.dimmed().to_string(),
        _ => label.yellow().bold().to_string(),
    }
}

/// One line per case for batch listings.
pub fn case_line(report: &ComparisonReport, color: bool) -> String {
    let insight = report.insight();
    let usage = report.usage();
    let mut line = format!(
        "{:<32} {} {}/{} similarity {:.2}",
        report.use_case(),
        insight_label(insight.kind, color),
        status_label(report.candidate().success, color),
        status_label(report.reference().success, color),
        usage.jaccard_similarity
    );
    if usage.has_tool_gap() {
        line.push_str(&format!(" gap: {}", join_set(&usage.b_only)));
    }
    line
}

/// Analysis result stamped with the time it was produced.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisRecord<T> {
    pub analyzed_at: DateTime<Utc>,
    #[serde(flatten)]
    pub result: T,
}

impl<T> AnalysisRecord<T> {
    pub fn now(result: T) -> Self {
        Self {
            analyzed_at: Utc::now(),
            result,
        }
    }

    fn timestamp(&self) -> String {
        self.analyzed_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

pub fn analysis_text(record: &AnalysisRecord<AnalysisResult>, color: bool) -> String {
    let result = &record.result;
    format!(
        "Root cause: {} (confidence {:.2})\nReference-only tools: {}\nSimilarity: {:.2}\nAnalyzed at: {}\n\n{}\n",
        root_cause_label(result.root_cause, color),
        result.confidence,
        join_set(&result.tool_gaps),
        result.similarity,
        record.timestamp(),
        result.analysis
    )
}

pub fn batch_analysis_text(record: &AnalysisRecord<BatchAnalysisResult>) -> String {
    let result = &record.result;
    format!(
        "Batch analysis: {} of {} tests with tool gaps (confidence {:.2})\nReference-only tools: {}\nAnalyzed at: {}\n\n{}\n",
        result.tests_with_gaps,
        result.total_tests,
        result.confidence,
        join_set(&result.all_tool_gaps),
        record.timestamp(),
        result.analysis
    )
}

pub fn analysis_markdown(record: &AnalysisRecord<AnalysisResult>) -> String {
    let result = &record.result;
    format!(
        "\n## Root Cause\n\n- Classification: {}\n- Confidence: {:.2}\n- Reference-only tools: {}\n- Analyzed at: {}\n\n{}\n",
        result.root_cause,
        result.confidence,
        join_set(&result.tool_gaps),
        record.timestamp(),
        result.analysis
    )
}

/// Write `content`, creating parent directories as needed.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use agdiff_testing::run;
    use chrono::TimeZone;
    use std::collections::BTreeSet;

    fn record(result: AnalysisResult) -> AnalysisRecord<AnalysisResult> {
        AnalysisRecord {
            analyzed_at: Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap(),
            result,
        }
    }

    fn missing_glob() -> AnalysisResult {
        AnalysisResult {
            test_name: "needs-glob".to_string(),
            tool_gaps: BTreeSet::from(["glob".to_string()]),
            similarity: 0.5,
            root_cause: RootCause::MissingTool,
            analysis: "Glob is not registered.".to_string(),
            confidence: 0.8,
        }
    }

    #[test]
    fn test_plain_labels() {
        assert_eq!(status_label(true, false), "PASS");
        assert_eq!(status_label(false, false), "FAIL");
        assert_eq!(insight_label(InsightKind::Different, false), "DIFFERENT");
        assert_eq!(root_cause_label(RootCause::PromptIssue, false), "PROMPT_ISSUE");
    }

    #[test]
    fn test_colored_label_keeps_text() {
        let label = status_label(true, true);
        assert!(label.contains("PASS"));
        assert_ne!(label, "PASS");
    }

    #[test]
    fn test_case_line_mentions_gap() {
        let report = ComparisonReport::new(
            "needs-glob",
            run("candidate").tools(&["Read"]).build(),
            run("reference").tools(&["Glob", "Read"]).build(),
        );
        let line = case_line(&report, false);
        assert!(line.starts_with("needs-glob"));
        assert!(line.contains("DIFFERENT PASS/PASS similarity 0.50"));
        assert!(line.ends_with("gap: glob"));
    }

    #[test]
    fn test_record_flattens_result_with_timestamp() {
        let json = serde_json::to_value(record(missing_glob())).unwrap();
        assert_eq!(json["analyzed_at"], "2025-01-02T03:04:05Z");
        assert_eq!(json["root_cause"], "MISSING_TOOL");
        assert_eq!(json["test_name"], "needs-glob");
    }

    #[test]
    fn test_analysis_text() {
        insta::assert_snapshot!(analysis_text(&record(missing_glob()), false), @r"
        Root cause: MISSING_TOOL (confidence 0.80)
        Reference-only tools: glob
        Similarity: 0.50
        Analyzed at: 2025-01-02T03:04:05Z

        Glob is not registered.
        ");
    }

    #[test]
    fn test_write_file_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("case.md");
        write_file(&path, "# hi\n").unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "# hi\n");
    }
}
