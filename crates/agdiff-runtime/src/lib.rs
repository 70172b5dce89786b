pub mod config;
pub mod error;
pub mod reasoning;

pub use config::{AnalyzerConfig, Backend, Config, ReasoningConfig, resolve_config_path};
pub use error::{Error, Result};
pub use reasoning::{CommandReasoningClient, HttpReasoningClient, build_client};

use agdiff_engine::RootCauseAnalyzer;
use agdiff_types::ReasoningClient;

/// Analyzer wired to the configured reasoning backend.
///
/// Fails fast when the documentation or prompt locations are unset.
pub fn build_analyzer(config: &Config) -> Result<RootCauseAnalyzer<Box<dyn ReasoningClient>>> {
    config.validate()?;
    let client = build_client(&config.reasoning);
    Ok(RootCauseAnalyzer::new(config.analyzer_settings(), client)?)
}
