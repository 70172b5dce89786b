use super::AnalyzerSettings;
use crate::report::{ComparisonReport, join_set, pass_fail};
use std::collections::BTreeSet;
use std::fmt::Write;

const CLASSIFICATION_GUIDE: &str = "\
Classify the root cause using exactly one of these phrasings:
- \"prompt\": the candidate's prompt configuration does not steer it toward the tool
- \"missing\" / \"not registered\": the tool is not registered for the candidate at all
- \"description\": the tool is registered but its description is unclear or misleading
Then recommend one concrete fix.";

/// Prompt for diagnosing one report's tool gap.
pub fn build_single_prompt(report: &ComparisonReport, settings: &AnalyzerSettings) -> String {
    let usage = report.usage();
    let mut prompt = String::new();

    let _ = writeln!(
        prompt,
        "A candidate coding agent and a reference agent ran the same task. \
         The reference used tools the candidate never called. Explain why."
    );
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "Use case: {}", report.use_case());
    let _ = writeln!(
        prompt,
        "Result: candidate {} | reference {}",
        pass_fail(report.candidate().success),
        pass_fail(report.reference().success)
    );
    let _ = writeln!(prompt, "Reference-only tools (gap): {}", join_set(&usage.b_only));
    let _ = writeln!(prompt, "Candidate-only tools: {}", join_set(&usage.a_only));
    let _ = writeln!(prompt, "Shared tools: {}", join_set(&usage.shared));
    let _ = writeln!(prompt, "Jaccard similarity: {:.2}", usage.jaccard_similarity);
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "Candidate sequence: {}", report.candidate_sequence_line());
    let _ = writeln!(prompt, "Reference sequence: {}", report.reference_sequence_line());
    let _ = writeln!(prompt, "Candidate behavior: {}", report.candidate_profile());
    let _ = writeln!(prompt, "Reference behavior: {}", report.reference_profile());
    let _ = writeln!(prompt);
    write_locations(&mut prompt, settings);
    let _ = writeln!(prompt);
    prompt.push_str(CLASSIFICATION_GUIDE);
    prompt.push('\n');
    prompt
}

/// One aggregate prompt covering every gapped report in a batch.
pub fn build_batch_prompt(
    gapped: &[&ComparisonReport],
    passing: usize,
    all_gaps: &BTreeSet<String>,
    settings: &AnalyzerSettings,
) -> String {
    let mut prompt = String::new();

    let _ = writeln!(
        prompt,
        "A candidate coding agent was compared against a reference agent across {} tests. \
         {} tests show reference-only tools; {} tests have no gap.",
        gapped.len() + passing,
        gapped.len(),
        passing
    );
    let _ = writeln!(prompt, "All reference-only tools: {}", join_set(all_gaps));
    let _ = writeln!(prompt);

    for (i, report) in gapped.iter().enumerate() {
        let usage = report.usage();
        let _ = writeln!(prompt, "{}. {}", i + 1, report.use_case());
        let _ = writeln!(prompt, "   gap: {}", join_set(&usage.b_only));
        let _ = writeln!(prompt, "   similarity: {:.2}", usage.jaccard_similarity);
        let _ = writeln!(prompt, "   candidate: {}", report.candidate_sequence_line());
        let _ = writeln!(prompt, "   reference: {}", report.reference_sequence_line());
    }
    let _ = writeln!(prompt);

    write_locations(&mut prompt, settings);
    let _ = writeln!(prompt);
    let _ = writeln!(
        prompt,
        "Summarize the shared root causes and list fixes in priority order, \
         highest impact first."
    );
    prompt.push_str(CLASSIFICATION_GUIDE);
    prompt.push('\n');
    prompt
}

fn write_locations(prompt: &mut String, settings: &AnalyzerSettings) {
    let _ = writeln!(
        prompt,
        "Candidate tool documentation: {}",
        settings.tool_docs_path
    );
    let _ = writeln!(
        prompt,
        "Candidate prompt configuration: {}",
        settings.prompt_config_path
    );
}
