//! Behavioral pattern classification over ordered tool sequences.
//!
//! Everything here is a pure function of the sequence: no shared state, no
//! I/O. The predicates are independent of each other; a run can verify both
//! early and at the end.

use crate::normalize::ToolNameNormalizer;
use crate::registry::{self, ToolFamily};
use agdiff_types::{ToolCallEvent, ToolPurpose};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::trace;

/// Boundary of the "early" phase of a run, as a fraction of its length.
///
/// Position `p` of a sequence of length `n` is early iff `p < n * fraction`,
/// computed in floating point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EarlyPhase {
    pub fraction: f64,
}

impl EarlyPhase {
    pub const DEFAULT_FRACTION: f64 = 1.0 / 3.0;

    pub fn new(fraction: f64) -> Self {
        Self { fraction }
    }

    pub fn contains(&self, position: usize, total_length: usize) -> bool {
        (position as f64) < (total_length as f64) * self.fraction
    }
}

impl Default for EarlyPhase {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FRACTION)
    }
}

/// Classifies tool calls and whole sequences.
#[derive(Debug, Clone, Default)]
pub struct PatternAnalyzer {
    normalizer: ToolNameNormalizer,
    early_phase: EarlyPhase,
}

impl PatternAnalyzer {
    pub fn new(normalizer: ToolNameNormalizer, early_phase: EarlyPhase) -> Self {
        Self {
            normalizer,
            early_phase,
        }
    }

    pub fn normalizer(&self) -> &ToolNameNormalizer {
        &self.normalizer
    }

    pub fn early_phase(&self) -> EarlyPhase {
        self.early_phase
    }

    /// Purpose of one call from its identity and ordinal position.
    ///
    /// Shell calls in the early phase are exploration, later ones are
    /// verification. Submissions and unknown tools are `Other`.
    pub fn classify_tool_purpose(
        &self,
        tool_name: &str,
        arg_text: &str,
        position: usize,
        total_length: usize,
    ) -> ToolPurpose {
        let canonical = self.normalizer.normalize(tool_name);
        let purpose = match registry::family_of(&canonical) {
            Some(ToolFamily::Exploration) => ToolPurpose::Exploration,
            Some(ToolFamily::Modification) => ToolPurpose::Modification,
            Some(ToolFamily::Planning) => ToolPurpose::Planning,
            Some(ToolFamily::Shell) => {
                if self.early_phase.contains(position, total_length) {
                    ToolPurpose::Exploration
                } else {
                    ToolPurpose::Verification
                }
            }
            Some(ToolFamily::Submit) | None => ToolPurpose::Other,
        };

        trace!(
            tool = %canonical,
            args = %arg_text,
            position,
            total_length,
            %purpose,
            "classified tool call"
        );
        purpose
    }

    /// Purposes of every call in a run, in call order.
    pub fn classify_calls(&self, calls: &[ToolCallEvent]) -> Vec<ToolPurpose> {
        let total = calls.len();
        calls
            .iter()
            .enumerate()
            .map(|(i, call)| {
                self.classify_tool_purpose(&call.tool_name, &call.argument_text(), i, total)
            })
            .collect()
    }

    /// The run ends by executing something, optionally followed by a submit.
    pub fn has_end_verification<S: AsRef<str>>(&self, sequence: &[S]) -> bool {
        let canonical = self.normalizer.normalize_all(sequence);
        match canonical.as_slice() {
            [] => false,
            [.., last] if registry::is_shell(last) => true,
            [.., before, last] => registry::is_submit(last) && registry::is_shell(before),
            [_] => false,
        }
    }

    /// A shell call lands strictly inside the early phase.
    pub fn has_early_verification<S: AsRef<str>>(&self, sequence: &[S]) -> bool {
        let total = sequence.len();
        sequence.iter().enumerate().any(|(i, name)| {
            self.early_phase.contains(i, total)
                && registry::is_shell(&self.normalizer.normalize(name.as_ref()))
        })
    }

    pub fn starts_with_planning<S: AsRef<str>>(&self, sequence: &[S]) -> bool {
        sequence
            .first()
            .is_some_and(|first| registry::is_planning(&self.normalizer.normalize(first.as_ref())))
    }

    /// Full behavioral profile of one run.
    pub fn profile(&self, calls: &[ToolCallEvent]) -> BehaviorProfile {
        let sequence: Vec<&str> = calls.iter().map(|c| c.tool_name.as_str()).collect();
        BehaviorProfile {
            starts_with_planning: self.starts_with_planning(&sequence),
            early_verification: self.has_early_verification(&sequence),
            end_verification: self.has_end_verification(&sequence),
            purposes: PurposeBreakdown::from_purposes(&self.classify_calls(calls)),
        }
    }
}

/// Higher-order patterns observed in one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehaviorProfile {
    pub starts_with_planning: bool,
    pub early_verification: bool,
    pub end_verification: bool,
    pub purposes: PurposeBreakdown,
}

impl fmt::Display for BehaviorProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "planning-first={} early-verification={} end-verification={} | {}",
            yes_no(self.starts_with_planning),
            yes_no(self.early_verification),
            yes_no(self.end_verification),
            self.purposes
        )
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

/// Number of calls per purpose
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PurposeBreakdown {
    counts: BTreeMap<ToolPurpose, usize>,
}

impl PurposeBreakdown {
    pub fn from_purposes(purposes: &[ToolPurpose]) -> Self {
        let mut counts = BTreeMap::new();
        for purpose in purposes {
            *counts.entry(*purpose).or_insert(0) += 1;
        }
        Self { counts }
    }

    pub fn count(&self, purpose: ToolPurpose) -> usize {
        self.counts.get(&purpose).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

impl fmt::Display for PurposeBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = ToolPurpose::ALL
            .iter()
            .map(|p| format!("{}={}", p, self.count(*p)))
            .collect();
        f.write_str(&parts.join(" "))
    }
}
