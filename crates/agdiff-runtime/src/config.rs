use crate::{Error, Result};
use agdiff_engine::{AnalyzerSettings, EarlyPhase, PatternAnalyzer, ToolNameNormalizer};
use agdiff_types::ReasoningContext;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Resolve the config file path based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. AGDIFF_CONFIG environment variable (with tilde expansion)
/// 3. XDG config directory
/// 4. ~/.agdiff/config.toml (fallback for systems without XDG)
pub fn resolve_config_path(explicit_path: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    if let Ok(env_path) = std::env::var("AGDIFF_CONFIG") {
        return Ok(expand_tilde(&env_path));
    }

    if let Some(config_dir) = dirs::config_dir() {
        return Ok(config_dir.join("agdiff").join("config.toml"));
    }

    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(".agdiff").join("config.toml"));
    }

    Err(Error::Config(
        "Could not determine config path: no HOME directory or XDG config directory found"
            .to_string(),
    ))
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}

/// Where the candidate agent's configuration lives.
///
/// Both locations are opaque strings quoted in prompts, never opened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub tool_docs_path: String,
    pub prompt_config_path: String,
    pub early_phase_fraction: f64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            tool_docs_path: String::new(),
            prompt_config_path: String::new(),
            early_phase_fraction: EarlyPhase::DEFAULT_FRACTION,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Spawn a local CLI and pipe the prompt through stdin
    Command,
    /// POST to a Messages-style HTTP endpoint
    Http,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReasoningConfig {
    pub backend: Backend,
    pub model: String,
    pub working_directory: PathBuf,
    pub timeout_secs: u64,
    pub command: Vec<String>,
    pub endpoint: String,
    pub api_key_env: String,
    pub max_tokens: u32,
}

impl Default for ReasoningConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Command,
            model: "claude-sonnet-4-5".to_string(),
            working_directory: PathBuf::from("."),
            timeout_secs: 120,
            command: vec![
                "claude".to_string(),
                "-p".to_string(),
                "--output-format".to_string(),
                "text".to_string(),
            ],
            endpoint: "https://api.anthropic.com/v1/messages".to_string(),
            api_key_env: "ANTHROPIC_API_KEY".to_string(),
            max_tokens: 1024,
        }
    }
}

impl ReasoningConfig {
    pub fn context(&self) -> ReasoningContext {
        ReasoningContext::new(self.working_directory.clone(), self.model.clone())
            .with_timeout(Duration::from_secs(self.timeout_secs))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub analyzer: AnalyzerConfig,
    #[serde(default)]
    pub reasoning: ReasoningConfig,
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
}

impl Config {
    /// Load from the resolved location; a missing file yields defaults.
    pub fn load(explicit_path: Option<&str>) -> Result<Self> {
        let config_path = resolve_config_path(explicit_path)?;
        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check value ranges. Unset documentation locations are reported later,
    /// when an analyzer is built, so plain comparisons work without them.
    pub fn validate(&self) -> Result<()> {
        let fraction = self.analyzer.early_phase_fraction;
        if !(fraction > 0.0 && fraction <= 1.0) {
            return Err(Error::Config(format!(
                "analyzer.early_phase_fraction must be in (0, 1], got {}",
                fraction
            )));
        }

        let reasoning = &self.reasoning;
        if reasoning.timeout_secs == 0 {
            return Err(Error::Config(
                "reasoning.timeout_secs must be greater than 0".to_string(),
            ));
        }
        match reasoning.backend {
            Backend::Command if reasoning.command.is_empty() => Err(Error::Config(
                "reasoning.command must not be empty for the command backend".to_string(),
            )),
            Backend::Http if reasoning.endpoint.trim().is_empty() => Err(Error::Config(
                "reasoning.endpoint must not be empty for the http backend".to_string(),
            )),
            _ => Ok(()),
        }
    }

    /// Built-in aliases with the configured ones merged on top.
    pub fn normalizer(&self) -> ToolNameNormalizer {
        ToolNameNormalizer::new().with_aliases(&self.aliases)
    }

    pub fn pattern_analyzer(&self) -> PatternAnalyzer {
        PatternAnalyzer::new(
            self.normalizer(),
            EarlyPhase::new(self.analyzer.early_phase_fraction),
        )
    }

    pub fn analyzer_settings(&self) -> AnalyzerSettings {
        AnalyzerSettings::new(
            self.analyzer.tool_docs_path.clone(),
            self.analyzer.prompt_config_path.clone(),
            self.reasoning.context(),
        )
    }
}
