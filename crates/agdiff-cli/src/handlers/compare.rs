use super::load_summary;
use crate::args::CompareArgs;
use crate::output::{self, AnalysisRecord};
use crate::types::OutputFormat;
use agdiff_engine::{ComparisonReport, Insight};
use agdiff_runtime::{Config, build_analyzer};
use agdiff_types::AnalysisResult;
use anyhow::Result;
use serde::Serialize;
use std::path::Path;
use tracing::info;

#[derive(Serialize)]
struct CompareOutput<'a> {
    insight: Insight,
    differences: Vec<String>,
    report: &'a ComparisonReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    analysis: Option<&'a AnalysisRecord<AnalysisResult>>,
}

pub fn handle(config: &Config, args: CompareArgs, format: OutputFormat) -> Result<()> {
    // Build the analyzer first so setup defects surface before any work
    let analyzer = if args.analyze {
        Some(build_analyzer(config)?)
    } else {
        None
    };

    let candidate = load_summary(&args.candidate)?;
    let reference = load_summary(&args.reference)?;
    let use_case = args
        .use_case
        .unwrap_or_else(|| default_use_case(&args.candidate));

    let report =
        ComparisonReport::build(use_case, candidate, reference, &config.pattern_analyzer());
    info!(
        use_case = report.use_case(),
        similarity = report.usage().jaccard_similarity,
        "runs compared"
    );

    let analysis = analyzer
        .as_ref()
        .map(|analyzer| AnalysisRecord::now(analyzer.analyze(&report)));

    if let Some(path) = &args.markdown {
        let mut markdown = report.to_markdown();
        if let Some(record) = &analysis {
            markdown.push_str(&output::analysis_markdown(record));
        }
        output::write_file(path, &markdown)?;
        info!(path = %path.display(), "markdown report written");
    }

    match format {
        OutputFormat::Json => output::print_json(&CompareOutput {
            insight: report.insight(),
            differences: report.analyze_differences(),
            report: &report,
            analysis: analysis.as_ref(),
        }),
        OutputFormat::Plain => {
            print!("{}", report.to_text());
            if let Some(record) = &analysis {
                println!();
                print!("{}", output::analysis_text(record, output::use_color()));
            }
            Ok(())
        }
    }
}

/// Directory holding the candidate summary, else its file stem.
fn default_use_case(candidate: &Path) -> String {
    candidate
        .parent()
        .and_then(|dir| dir.file_name())
        .or_else(|| candidate.file_stem())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "comparison".to_string())
}
