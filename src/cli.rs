//! CLI module - Command-line interface definitions and handlers

use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::{info, warn, Level};

use crate::annotate::marker::{AnnotateOptions, MarkerMode};
use crate::annotate::walk::walk;
use crate::config::prompt::InquirePrompt;
use crate::config::{resolve_config, split_list, FlagArgs, JobConfig};
use crate::core::render::{OutputFormat, RenderConfig, Renderer};

/// sourceurl - stamp `sourceURL` debugger markers onto source files.
#[derive(Parser, Debug)]
#[command(name = "sourceurl")]
#[command(
    author,
    version,
    about,
    long_about = r#"sourceurl walks a directory tree and prepends a sourceURL comment to every
selected file, so browser debuggers can map served files back to their path:

    //# sourceURL=/src/app.js
    /*# sourceURL=/style/main.css */
    <!--# sourceURL=/index.html -->

Files that already start with a marker are left alone, so re-running is safe.
Minified files (*.min.<ext>) are never touched.

If any of --rootDir, --fileTypes or --ignoredDirs is missing, the three
settings are asked for interactively.

Examples:
    sourceurl --rootDir=web --fileTypes=js,css --ignoredDirs=node_modules,assets
    sourceurl --rootDir=web --fileTypes=js --ignoredDirs= --dry-run --format raw
"#
)]
pub struct Cli {
    /// Directory to walk; marker paths are relative to it. Empty counts as missing.
    #[arg(long = "rootDir", value_name = "PATH")]
    pub root_dir: Option<String>,

    /// Comma-separated file type tags to process (js, mjs, cjs, css, html).
    #[arg(long = "fileTypes", value_name = "TAGS")]
    pub file_types: Option<String>,

    /// Comma-separated directory names to skip at any depth.
    #[arg(long = "ignoredDirs", value_name = "NAMES")]
    pub ignored_dirs: Option<String>,

    /// Report format (jsonl/json/md/raw).
    #[arg(
        long,
        default_value = "jsonl",
        value_name = "FORMAT",
        long_help = "Select the format of the per-file report printed to stdout.\n\n\
Supported values:\n\
- jsonl (default): one JSON object per file\n\
- json: a single JSON array\n\
- md: Markdown grouped by outcome\n\
- raw: one human-readable line per file"
    )]
    pub format: String,

    /// Pretty-print JSON/JSONL output with indentation.
    #[arg(long)]
    pub pretty: bool,

    /// Disable colored output (when applicable).
    #[arg(long)]
    pub no_color: bool,

    /// Report what would change without writing any file.
    #[arg(long)]
    pub dry_run: bool,

    /// Require the first line to be the exact expected marker.
    #[arg(
        long,
        long_help = "Compare the first line against the exact expected marker instead of only\n\
its prefix. A marker naming another path (e.g. after the file moved) is replaced."
    )]
    pub strict: bool,

    /// Quiet mode (warnings and errors only).
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (more diagnostics).
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Default log level; RUST_LOG overrides it
    pub fn log_level(&self) -> Level {
        if self.quiet {
            Level::WARN
        } else if self.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        }
    }

    fn annotate_options(&self) -> AnnotateOptions {
        AnnotateOptions {
            mode: if self.strict {
                MarkerMode::Exact
            } else {
                MarkerMode::Prefix
            },
            dry_run: self.dry_run,
        }
    }

    fn render_config(&self) -> RenderConfig {
        let format: OutputFormat = self.format.parse().unwrap_or_default();
        RenderConfig::new(format)
            .with_pretty(self.pretty)
            .with_color(!self.no_color && std::io::stdout().is_terminal())
    }
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    let options = cli.annotate_options();
    let render_config = cli.render_config();

    let mut prompt = InquirePrompt::with_defaults(cli.root_dir.clone(), cli.ignored_dirs.clone());
    let flags = FlagArgs {
        root_dir: cli.root_dir.map(PathBuf::from),
        file_types: cli.file_types.as_deref().map(split_list),
        ignored_dirs: cli.ignored_dirs.as_deref().map(split_list),
    };
    let config = resolve_config(flags, &mut prompt)?;

    run_job(&config, options, render_config)
}

/// Annotate the tree described by `config` and print the report
pub fn run_job(
    config: &JobConfig,
    options: AnnotateOptions,
    render_config: RenderConfig,
) -> Result<()> {
    if config.is_empty_selection() {
        warn!("No file types selected. Nothing to do.");
        return Ok(());
    }

    for tag in config.unknown_types() {
        warn!(
            file_type = tag,
            "No sourceURL style for this file type, matching files will be left untouched"
        );
    }

    let root = config.root_dir();
    info!(
        root = %root.display(),
        file_types = ?config.file_types(),
        ignored_dirs = ?config.ignored_dirs(),
        dry_run = options.dry_run,
        "Annotating"
    );

    let report = walk(config, options)
        .with_context(|| format!("Failed to annotate files under {}", root.display()))?;
    if report.is_empty() {
        info!("No matching files found");
    }

    Renderer::with_config(render_config)
        .render_to(&report, std::io::stdout().lock())
        .context("Failed to write report")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_equals_form() {
        let cli = Cli::try_parse_from([
            "sourceurl",
            "--rootDir=/proj",
            "--fileTypes=js,css",
            "--ignoredDirs=node_modules,assets",
        ])
        .unwrap();

        assert_eq!(cli.root_dir.as_deref(), Some("/proj"));
        assert_eq!(cli.file_types.as_deref(), Some("js,css"));
        assert_eq!(cli.ignored_dirs.as_deref(), Some("node_modules,assets"));
    }

    #[test]
    fn test_parse_empty_list_is_present() {
        let cli = Cli::try_parse_from(["sourceurl", "--ignoredDirs="]).unwrap();
        assert_eq!(cli.ignored_dirs.as_deref(), Some(""));
    }

    #[test]
    fn test_parse_empty_root_is_accepted_as_missing() {
        let cli = Cli::try_parse_from([
            "sourceurl",
            "--rootDir=",
            "--fileTypes=js",
            "--ignoredDirs=",
        ])
        .unwrap();
        assert_eq!(cli.root_dir.as_deref(), Some(""));

        let flags = FlagArgs {
            root_dir: cli.root_dir.map(PathBuf::from),
            file_types: cli.file_types.as_deref().map(split_list),
            ignored_dirs: cli.ignored_dirs.as_deref().map(split_list),
        };
        assert!(flags.into_config().is_none());
    }

    #[test]
    fn test_parse_missing_flags_are_none() {
        let cli = Cli::try_parse_from(["sourceurl", "--fileTypes", "js"]).unwrap();
        assert!(cli.root_dir.is_none());
        assert!(cli.ignored_dirs.is_none());
    }

    #[test]
    fn test_strict_selects_exact_mode() {
        let cli = Cli::try_parse_from(["sourceurl", "--strict", "--dry-run"]).unwrap();
        let options = cli.annotate_options();
        assert_eq!(options.mode, MarkerMode::Exact);
        assert!(options.dry_run);
    }

    #[test]
    fn test_log_level() {
        let quiet = Cli::try_parse_from(["sourceurl", "-q"]).unwrap();
        assert_eq!(quiet.log_level(), Level::WARN);
        let verbose = Cli::try_parse_from(["sourceurl", "-v"]).unwrap();
        assert_eq!(verbose.log_level(), Level::DEBUG);
        assert!(Cli::try_parse_from(["sourceurl", "-q", "-v"]).is_err());
    }

    #[test]
    fn test_run_job_empty_selection_is_ok() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(temp.path().join("a.js"), "a").unwrap();

        let config = JobConfig::new(temp.path(), Vec::<String>::new(), Vec::<String>::new());
        run_job(&config, AnnotateOptions::default(), RenderConfig::default()).unwrap();

        assert_eq!(std::fs::read_to_string(temp.path().join("a.js")).unwrap(), "a");
    }
}
