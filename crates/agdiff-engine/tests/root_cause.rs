use agdiff_engine::{
    AnalyzerSettings, ComparisonReport, Error, PARSED_REPLY_CONFIDENCE, RootCauseAnalyzer,
};
use agdiff_testing::{FailingClient, ScriptedClient, run};
use agdiff_types::{ReasoningContext, RootCause};
use std::time::Duration;

fn settings() -> AnalyzerSettings {
    AnalyzerSettings::new(
        "docs/agent/tools.md",
        "config/agent/system_prompt.md",
        ReasoningContext::new("/work/agent", "test-model").with_timeout(Duration::from_secs(30)),
    )
}

fn gapped_report(name: &str) -> ComparisonReport {
    ComparisonReport::new(
        name,
        run("candidate").tools(&["Read", "Edit"]).build(),
        run("reference").tools(&["Read", "Edit", "Glob"]).build(),
    )
}

fn clean_report(name: &str) -> ComparisonReport {
    ComparisonReport::new(
        name,
        run("candidate").tools(&["Read", "Edit", "bash"]).build(),
        run("reference").tools(&["read", "edit"]).build(),
    )
}

#[test]
fn test_no_gap_short_circuits_without_calling_service() {
    let client = ScriptedClient::replying("should not be used");
    let analyzer = RootCauseAnalyzer::new(settings(), &client).unwrap();

    let result = analyzer.analyze(&clean_report("clean"));

    assert_eq!(result.root_cause, RootCause::None);
    assert_eq!(result.confidence, 1.0);
    assert!(result.tool_gaps.is_empty());
    assert_eq!(client.call_count(), 0);
}

#[test]
fn test_gap_consults_service_and_parses_reply() {
    let client = ScriptedClient::replying(
        "  The system prompt never tells the agent to search before reading. \
         Fix: add a Glob step to the prompt.  ",
    );
    let analyzer = RootCauseAnalyzer::new(settings(), &client).unwrap();

    let result = analyzer.analyze(&gapped_report("needs-glob"));

    assert_eq!(result.test_name, "needs-glob");
    assert_eq!(result.root_cause, RootCause::PromptIssue);
    assert!(result.tool_gaps.contains("glob"));
    assert!((result.similarity - 2.0 / 3.0).abs() < 1e-9);
    assert!(result.analysis.starts_with("The system prompt"));
    // Placeholder value, not a calibrated probability
    assert_eq!(result.confidence, PARSED_REPLY_CONFIDENCE);
    assert_eq!(client.call_count(), 1);
}

#[test]
fn test_prompt_embeds_gap_sequences_and_locations() {
    let client = ScriptedClient::replying("Glob is not registered for the candidate.");
    let analyzer = RootCauseAnalyzer::new(settings(), &client).unwrap();

    let result = analyzer.analyze(&gapped_report("needs-glob"));
    assert_eq!(result.root_cause, RootCause::MissingTool);

    let prompts = client.prompts();
    let prompt = &prompts[0];
    assert!(prompt.contains("Reference-only tools (gap): glob"));
    assert!(prompt.contains("Jaccard similarity: 0.67"));
    assert!(prompt.contains("Candidate sequence: Read → Edit"));
    assert!(prompt.contains("Reference sequence: Read → Edit → Glob"));
    assert!(prompt.contains("docs/agent/tools.md"));
    assert!(prompt.contains("config/agent/system_prompt.md"));

    let contexts = client.contexts();
    assert_eq!(contexts[0].model, "test-model");
    assert_eq!(contexts[0].working_directory.to_str(), Some("/work/agent"));
}

#[test]
fn test_unmatched_reply_is_unknown_but_confident() {
    let client = ScriptedClient::replying("The model just likes Read better.");
    let analyzer = RootCauseAnalyzer::new(settings(), &client).unwrap();

    let result = analyzer.analyze(&gapped_report("pref"));
    assert_eq!(result.root_cause, RootCause::Unknown);
    assert_eq!(result.confidence, PARSED_REPLY_CONFIDENCE);
}

#[test]
fn test_service_failure_becomes_unknown_result() {
    let client = FailingClient::timeout(Duration::from_secs(30));
    let analyzer = RootCauseAnalyzer::new(settings(), &client).unwrap();

    let result = analyzer.analyze(&gapped_report("slow"));

    assert_eq!(result.root_cause, RootCause::Unknown);
    assert_eq!(result.confidence, 0.0);
    assert!(result.analysis.contains("timed out"));
    assert!(result.tool_gaps.contains("glob"));
    assert_eq!(client.attempts(), 1);
}

#[test]
fn test_empty_reply_is_a_failure() {
    let client = ScriptedClient::replying("   ");
    let analyzer = RootCauseAnalyzer::new(settings(), &client).unwrap();

    let result = analyzer.analyze(&gapped_report("blank"));
    assert_eq!(result.root_cause, RootCause::Unknown);
    assert_eq!(result.confidence, 0.0);
    assert!(result.analysis.contains("empty reply"));
}

#[test]
fn test_missing_locations_fail_at_construction() {
    let mut bad = settings();
    bad.tool_docs_path = "  ".to_string();
    let err = RootCauseAnalyzer::new(bad, ScriptedClient::replying("x")).err();
    assert!(matches!(err, Some(Error::Config(_))));

    let mut bad = settings();
    bad.prompt_config_path = String::new();
    assert!(RootCauseAnalyzer::new(bad, ScriptedClient::replying("x")).is_err());
}

#[test]
fn test_batch_without_gaps_skips_service() {
    let client = ScriptedClient::replying("unused");
    let analyzer = RootCauseAnalyzer::new(settings(), &client).unwrap();

    let result = analyzer.analyze_batch(&[clean_report("a"), clean_report("b")]);

    assert_eq!(result.total_tests, 2);
    assert_eq!(result.tests_with_gaps, 0);
    assert!(result.all_tool_gaps.is_empty());
    assert_eq!(result.confidence, 1.0);
    assert_eq!(client.call_count(), 0);
}

#[test]
fn test_empty_batch_is_all_passing() {
    let client = ScriptedClient::replying("unused");
    let analyzer = RootCauseAnalyzer::new(settings(), &client).unwrap();

    let result = analyzer.analyze_batch(&[]);
    assert_eq!(result.total_tests, 0);
    assert_eq!(result.confidence, 1.0);
    assert_eq!(client.call_count(), 0);
}

#[test]
fn test_batch_makes_one_call_with_union_of_gaps() {
    let client = ScriptedClient::replying("1. Register Glob. 2. Mention TodoWrite in the prompt.");
    let analyzer = RootCauseAnalyzer::new(settings(), &client).unwrap();

    let planning_gap = ComparisonReport::new(
        "needs-plan",
        run("candidate").tools(&["Read"]).build(),
        run("reference").tools(&["TodoWrite", "Read"]).build(),
    );
    let reports = vec![
        gapped_report("needs-glob"),
        clean_report("clean"),
        planning_gap,
    ];

    let result = analyzer.analyze_batch(&reports);

    assert_eq!(result.total_tests, 3);
    assert_eq!(result.tests_with_gaps, 2);
    let gaps: Vec<&str> = result.all_tool_gaps.iter().map(String::as_str).collect();
    assert_eq!(gaps, vec!["glob", "todowrite"]);
    assert_eq!(result.confidence, PARSED_REPLY_CONFIDENCE);
    assert_eq!(client.call_count(), 1);

    let prompt = &client.prompts()[0];
    assert!(prompt.contains("1. needs-glob"));
    assert!(prompt.contains("2. needs-plan"));
    assert!(!prompt.contains("clean"));
    assert!(prompt.contains("1 tests have no gap"));
}

#[test]
fn test_batch_failure_is_captured() {
    let client = FailingClient::unavailable("claude binary not found");
    let analyzer = RootCauseAnalyzer::new(settings(), &client).unwrap();

    let result = analyzer.analyze_batch(&[gapped_report("a")]);

    assert_eq!(result.tests_with_gaps, 1);
    assert_eq!(result.confidence, 0.0);
    assert!(result.analysis.contains("claude binary not found"));
}
