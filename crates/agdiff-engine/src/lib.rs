// Engine module - comparison, pattern classification, report synthesis, root-cause diagnosis
// This layer sits between normalized execution summaries (types) and the runtime/CLI layers

pub mod comparison;
pub mod error;
pub mod normalize;
pub mod patterns;
pub mod registry;
pub mod report;
pub mod root_cause;

pub use comparison::ToolUsageComparison;
pub use error::{Error, Result};
pub use normalize::ToolNameNormalizer;
pub use patterns::{BehaviorProfile, EarlyPhase, PatternAnalyzer, PurposeBreakdown};
pub use report::{ComparisonReport, Insight, InsightKind};
pub use root_cause::{
    AnalyzerSettings, PARSED_REPLY_CONFIDENCE, RootCauseAnalyzer, parse_root_cause,
};

use agdiff_types::ToolPurpose;

// Façade API - pure functions with the default normalizer and early-phase threshold

/// Classify what role one call plays, given its position in the run.
pub fn classify_tool_purpose(
    tool_name: &str,
    arg_text: &str,
    position: usize,
    total_length: usize,
) -> ToolPurpose {
    PatternAnalyzer::default().classify_tool_purpose(tool_name, arg_text, position, total_length)
}

/// True when the run ends by executing something (optionally followed by submit).
pub fn has_end_verification<S: AsRef<str>>(sequence: &[S]) -> bool {
    PatternAnalyzer::default().has_end_verification(sequence)
}

/// True when a shell call lands in the early phase of the run.
pub fn has_early_verification<S: AsRef<str>>(sequence: &[S]) -> bool {
    PatternAnalyzer::default().has_early_verification(sequence)
}

/// True when the first call is a planning tool.
pub fn starts_with_planning<S: AsRef<str>>(sequence: &[S]) -> bool {
    PatternAnalyzer::default().starts_with_planning(sequence)
}
