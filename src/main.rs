//! sourceurl - stamp sourceURL debugger markers onto source files
//!
//! sourceurl provides:
//! - Recursive traversal with directory-name exclusions
//! - Idempotent, per-type marker insertion (js/mjs/cjs/css/html)
//! - Flag or interactive configuration
//! - Unified report output (jsonl/json/md/raw)

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::EnvFilter;

mod annotate;
mod cli;
mod config;
mod core;

fn init_tracing(level: Level) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .init();
}

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.log_level());
    cli::run(cli)
}
