pub mod batch;
pub mod compare;
pub mod config;

use agdiff_types::ExecutionSummary;
use anyhow::{Context, Result};
use std::path::Path;

fn load_summary(path: &Path) -> Result<ExecutionSummary> {
    ExecutionSummary::load_from(path)
        .with_context(|| format!("failed to load execution summary {}", path.display()))
}
