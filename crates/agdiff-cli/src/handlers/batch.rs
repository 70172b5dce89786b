use super::load_summary;
use crate::args::BatchArgs;
use crate::output::{self, AnalysisRecord};
use crate::types::OutputFormat;
use agdiff_engine::ComparisonReport;
use agdiff_runtime::{Config, build_analyzer};
use agdiff_types::BatchAnalysisResult;
use anyhow::{Result, bail};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

pub const CANDIDATE_FILE: &str = "candidate.json";
pub const REFERENCE_FILE: &str = "reference.json";

/// One `<case>/candidate.json` + `<case>/reference.json` pair.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseFiles {
    pub name: String,
    pub candidate: PathBuf,
    pub reference: PathBuf,
}

#[derive(Serialize)]
struct BatchOutput<'a> {
    total_cases: usize,
    cases_with_gaps: usize,
    cases: &'a [ComparisonReport],
    #[serde(skip_serializing_if = "Option::is_none")]
    analysis: Option<&'a AnalysisRecord<BatchAnalysisResult>>,
}

/// Case directories directly under `root`, sorted by name.
/// Directories without a reference summary are skipped with a warning.
pub fn discover_cases(root: &Path) -> Result<Vec<CaseFiles>> {
    if !root.is_dir() {
        bail!("{} is not a directory", root.display());
    }

    let mut cases = Vec::new();
    for entry in WalkDir::new(root)
        .min_depth(2)
        .max_depth(2)
        .sort_by_file_name()
    {
        let entry = entry?;
        if !entry.file_type().is_file() || entry.file_name() != CANDIDATE_FILE {
            continue;
        }
        let Some(case_dir) = entry.path().parent() else {
            continue;
        };
        let reference = case_dir.join(REFERENCE_FILE);
        if !reference.is_file() {
            warn!(case = %case_dir.display(), "skipping case without {}", REFERENCE_FILE);
            continue;
        }
        let name = case_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        cases.push(CaseFiles {
            name,
            candidate: entry.path().to_path_buf(),
            reference,
        });
    }
    Ok(cases)
}

pub fn handle(config: &Config, args: BatchArgs, format: OutputFormat) -> Result<()> {
    let analyzer = if args.analyze {
        Some(build_analyzer(config)?)
    } else {
        None
    };

    let cases = discover_cases(&args.dir)?;
    info!(dir = %args.dir.display(), cases = cases.len(), "discovered cases");

    let pattern_analyzer = config.pattern_analyzer();
    let mut reports = Vec::with_capacity(cases.len());
    for case in &cases {
        let candidate = load_summary(&case.candidate)?;
        let reference = load_summary(&case.reference)?;
        reports.push(ComparisonReport::build(
            case.name.clone(),
            candidate,
            reference,
            &pattern_analyzer,
        ));
    }

    if let Some(dir) = &args.markdown_dir {
        for report in &reports {
            let path = dir.join(format!("{}.md", report.use_case()));
            output::write_file(&path, &report.to_markdown())?;
        }
        info!(dir = %dir.display(), reports = reports.len(), "markdown reports written");
    }

    let analysis = analyzer
        .as_ref()
        .map(|analyzer| AnalysisRecord::now(analyzer.analyze_batch(&reports)));
    let cases_with_gaps = reports.iter().filter(|r| r.usage().has_tool_gap()).count();

    match format {
        OutputFormat::Json => output::print_json(&BatchOutput {
            total_cases: reports.len(),
            cases_with_gaps,
            cases: &reports,
            analysis: analysis.as_ref(),
        }),
        OutputFormat::Plain => {
            if reports.is_empty() {
                println!("No cases found in {}", args.dir.display());
                return Ok(());
            }
            let color = output::use_color();
            for report in &reports {
                println!("{}", output::case_line(report, color));
            }
            println!();
            println!(
                "{} cases, {} with reference-only tools",
                reports.len(),
                cases_with_gaps
            );
            if let Some(record) = &analysis {
                println!();
                print!("{}", output::batch_analysis_text(record));
            }
            Ok(())
        }
    }
}
