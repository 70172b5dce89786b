// agdiff: compare a candidate agent run with a reference run of the same
// use case and explain why their tool usage diverged.
//
// Layering:
// - agdiff-types: summaries, analysis records, reasoning-client seam
// - agdiff-engine: comparison, behavior patterns, reports, root-cause analysis
// - agdiff-runtime: config file and concrete reasoning backends
// - this crate: argument parsing, file discovery, rendering to the terminal

mod args;
mod commands;
mod handlers;
pub mod logging;
pub mod output;
pub mod types;

pub use args::{BatchArgs, Cli, Commands, CompareArgs, ConfigCommand};
pub use commands::run;
