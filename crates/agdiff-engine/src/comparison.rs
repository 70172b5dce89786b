use crate::normalize::ToolNameNormalizer;
use agdiff_types::ExecutionSummary;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Venn-style decomposition of the tool names two runs used.
///
/// `a` is the candidate run, `b` the reference run. Sets hold canonical
/// (normalized) names, so `Bash` and `bash` are the same tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolUsageComparison {
    pub a: BTreeSet<String>,
    pub b: BTreeSet<String>,
    pub shared: BTreeSet<String>,
    pub a_only: BTreeSet<String>,
    pub b_only: BTreeSet<String>,
    pub jaccard_similarity: f64,
}

impl ToolUsageComparison {
    /// Compare two tool-name sequences with the default normalizer.
    pub fn new<A: AsRef<str>, B: AsRef<str>>(a: &[A], b: &[B]) -> Self {
        Self::with_normalizer(&ToolNameNormalizer::default(), a, b)
    }

    pub fn with_normalizer<A: AsRef<str>, B: AsRef<str>>(
        normalizer: &ToolNameNormalizer,
        a: &[A],
        b: &[B],
    ) -> Self {
        let a: BTreeSet<String> = a.iter().map(|n| normalizer.normalize(n.as_ref())).collect();
        let b: BTreeSet<String> = b.iter().map(|n| normalizer.normalize(n.as_ref())).collect();

        let shared: BTreeSet<String> = a.intersection(&b).cloned().collect();
        let a_only: BTreeSet<String> = a.difference(&b).cloned().collect();
        let b_only: BTreeSet<String> = b.difference(&a).cloned().collect();

        let union_size = shared.len() + a_only.len() + b_only.len();
        let jaccard_similarity = if union_size == 0 {
            1.0
        } else {
            shared.len() as f64 / union_size as f64
        };

        Self {
            a,
            b,
            shared,
            a_only,
            b_only,
            jaccard_similarity,
        }
    }

    /// Compare a candidate run against a reference run.
    pub fn from_summaries(
        normalizer: &ToolNameNormalizer,
        candidate: &ExecutionSummary,
        reference: &ExecutionSummary,
    ) -> Self {
        Self::with_normalizer(
            normalizer,
            &candidate.tool_sequence(),
            &reference.tool_sequence(),
        )
    }

    /// The reference used tools the candidate never touched.
    ///
    /// Extra candidate-only tools are not a gap.
    pub fn has_tool_gap(&self) -> bool {
        !self.b_only.is_empty()
    }

    pub fn union_size(&self) -> usize {
        self.a.union(&self.b).count()
    }
}
