#![allow(dead_code)]

use agdiff_runtime::{Backend, Config};
use agdiff_testing::CaseDir;
use assert_cmd::Command;
use std::path::{Path, PathBuf};

/// Isolated workspace: a case directory plus a private config file.
pub struct TestFixture {
    cases: CaseDir,
    config_path: PathBuf,
}

impl TestFixture {
    pub fn new() -> Self {
        let cases = CaseDir::new().expect("Failed to create case dir");
        let config_path = cases.path().join("agdiff-config.toml");
        Self { cases, config_path }
    }

    pub fn cases(&self) -> &CaseDir {
        &self.cases
    }

    pub fn root(&self) -> &Path {
        self.cases.path()
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Configure a shell script as the reasoning backend.
    pub fn with_reasoning_script(&self, script: &str) {
        let mut config = Config::default();
        config.analyzer.tool_docs_path = "docs/tools.md".to_string();
        config.analyzer.prompt_config_path = "config/prompt.md".to_string();
        config.reasoning.backend = Backend::Command;
        config.reasoning.command = vec!["sh".to_string(), "-c".to_string(), script.to_string()];
        config.reasoning.working_directory = self.root().to_path_buf();
        config.reasoning.timeout_secs = 10;
        config
            .save_to(&self.config_path)
            .expect("Failed to write config");
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("agdiff").expect("Failed to find agdiff binary");
        cmd.arg("--config")
            .arg(&self.config_path)
            .env_remove("RUST_LOG")
            .env_remove("AGDIFF_CONFIG")
            .env("NO_COLOR", "1");
        cmd
    }
}
