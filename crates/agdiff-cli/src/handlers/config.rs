use crate::output;
use crate::types::OutputFormat;
use agdiff_runtime::Config;
use anyhow::{Result, bail};
use std::path::Path;

pub fn show(config: &Config, path: &Path, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => output::print_json(config),
        OutputFormat::Plain => {
            let source = if path.exists() {
                path.display().to_string()
            } else {
                format!("{} (not found, using defaults)", path.display())
            };
            println!("# {}", source);
            print!("{}", toml::to_string_pretty(config)?);
            Ok(())
        }
    }
}

pub fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    Config::default().save_to(path)?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}
