//! Root-cause diagnosis of tool gaps.
//!
//! Cheap local checks run first; the external reasoning service is only
//! consulted when the reference used tools the candidate lacks. Every
//! failure of that call is folded into the returned result.

mod parser;
mod prompt;

pub use parser::{KEYWORD_RULES, parse_root_cause};
pub use prompt::{build_batch_prompt, build_single_prompt};

use crate::report::ComparisonReport;
use crate::{Error, Result};
use agdiff_types::{
    AnalysisResult, BatchAnalysisResult, ReasoningClient, ReasoningContext, RootCause,
};
use std::collections::BTreeSet;
use tracing::{debug, info, info_span, warn};

/// Confidence attached to any successfully parsed reply.
///
/// A fixed stand-in, not a calibrated probability.
pub const PARSED_REPLY_CONFIDENCE: f64 = 0.8;

/// Where the candidate's configuration lives, plus the reasoning context.
///
/// Both locations are opaque: they are quoted in prompts and never read.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzerSettings {
    pub tool_docs_path: String,
    pub prompt_config_path: String,
    pub context: ReasoningContext,
}

impl AnalyzerSettings {
    pub fn new(
        tool_docs_path: impl Into<String>,
        prompt_config_path: impl Into<String>,
        context: ReasoningContext,
    ) -> Self {
        Self {
            tool_docs_path: tool_docs_path.into(),
            prompt_config_path: prompt_config_path.into(),
            context,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.tool_docs_path.trim().is_empty() {
            return Err(Error::Config(
                "tool documentation location is not set".to_string(),
            ));
        }
        if self.prompt_config_path.trim().is_empty() {
            return Err(Error::Config(
                "prompt configuration location is not set".to_string(),
            ));
        }
        if self.context.model.trim().is_empty() {
            return Err(Error::Config("reasoning model is not set".to_string()));
        }
        Ok(())
    }
}

pub struct RootCauseAnalyzer<C: ReasoningClient> {
    settings: AnalyzerSettings,
    client: C,
}

impl<C: ReasoningClient> RootCauseAnalyzer<C> {
    /// Fails fast on setup defects, before any report is processed.
    pub fn new(settings: AnalyzerSettings, client: C) -> Result<Self> {
        settings.validate()?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &AnalyzerSettings {
        &self.settings
    }

    /// Diagnose one report. Never fails; service errors become `UNKNOWN`.
    pub fn analyze(&self, report: &ComparisonReport) -> AnalysisResult {
        let usage = report.usage();
        let test_name = report.use_case().to_string();

        if !usage.has_tool_gap() {
            debug!(use_case = %test_name, "no tool gap, skipping reasoning call");
            return AnalysisResult {
                test_name,
                tool_gaps: BTreeSet::new(),
                similarity: usage.jaccard_similarity,
                root_cause: RootCause::None,
                analysis: "No tool gap: the reference used no tools the candidate lacks"
                    .to_string(),
                confidence: 1.0,
            };
        }

        let prompt = build_single_prompt(report, &self.settings);
        let tool_gaps = usage.b_only.clone();
        let similarity = usage.jaccard_similarity;

        match self.consult(&test_name, &prompt) {
            Ok(reply) => {
                let root_cause = parse_root_cause(&reply);
                info!(use_case = %test_name, %root_cause, "root cause classified");
                AnalysisResult {
                    test_name,
                    tool_gaps,
                    similarity,
                    root_cause,
                    analysis: reply,
                    confidence: PARSED_REPLY_CONFIDENCE,
                }
            }
            Err(message) => AnalysisResult {
                test_name,
                tool_gaps,
                similarity,
                root_cause: RootCause::Unknown,
                analysis: message,
                confidence: 0.0,
            },
        }
    }

    /// Diagnose a batch with at most one reasoning call.
    pub fn analyze_batch(&self, reports: &[ComparisonReport]) -> BatchAnalysisResult {
        let (gapped, passing): (Vec<&ComparisonReport>, Vec<&ComparisonReport>) =
            reports.iter().partition(|r| r.usage().has_tool_gap());

        if gapped.is_empty() {
            debug!(total = reports.len(), "no tool gaps in batch, skipping reasoning call");
            return BatchAnalysisResult {
                total_tests: reports.len(),
                tests_with_gaps: 0,
                all_tool_gaps: BTreeSet::new(),
                analysis: format!(
                    "All {} tests passing: no reference-only tools",
                    reports.len()
                ),
                confidence: 1.0,
            };
        }

        let all_tool_gaps: BTreeSet<String> = gapped
            .iter()
            .flat_map(|r| r.usage().b_only.iter().cloned())
            .collect();
        let prompt = build_batch_prompt(&gapped, passing.len(), &all_tool_gaps, &self.settings);

        let (analysis, confidence) = match self.consult("batch", &prompt) {
            Ok(reply) => (reply, PARSED_REPLY_CONFIDENCE),
            Err(message) => (message, 0.0),
        };

        BatchAnalysisResult {
            total_tests: reports.len(),
            tests_with_gaps: gapped.len(),
            all_tool_gaps,
            analysis,
            confidence,
        }
    }

    /// One scoped reasoning call. The span and any client resources are
    /// released when this returns, whatever the outcome.
    fn consult(&self, label: &str, prompt: &str) -> std::result::Result<String, String> {
        let context = &self.settings.context;
        let _span = info_span!("reasoning_call", label, model = %context.model).entered();
        debug!(prompt_len = prompt.len(), "submitting prompt");

        match self.client.submit(prompt, context) {
            Ok(reply) if reply.trim().is_empty() => {
                warn!("reasoning service returned an empty reply");
                Err(format!(
                    "Analysis failed: {}",
                    agdiff_types::ReasoningError::EmptyReply
                ))
            }
            Ok(reply) => Ok(reply.trim().to_string()),
            Err(err) => {
                warn!(error = %err, "reasoning call failed");
                Err(format!("Analysis failed: {}", err))
            }
        }
    }
}
