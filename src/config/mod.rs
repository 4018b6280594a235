//! Job configuration
//!
//! A run is described by one immutable [`JobConfig`]. It comes either from
//! the three command-line flags, when all of them are present, or from a
//! [`ConfigPrompt`] implementation.

pub mod prompt;

use anyhow::Result;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::annotate::filetype::is_known;

/// Directories skipped by default in the interactive prompt
pub const DEFAULT_IGNORED_DIRS: &str = "assets,node_modules,play";

/// Resolved settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobConfig {
    root_dir: PathBuf,
    file_types: BTreeSet<String>,
    ignored_dirs: BTreeSet<String>,
}

impl JobConfig {
    /// Build a config. Entries are trimmed and blank entries dropped.
    pub fn new<T, I>(root_dir: impl Into<PathBuf>, file_types: T, ignored_dirs: I) -> Self
    where
        T: IntoIterator,
        T::Item: AsRef<str>,
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Self {
            root_dir: root_dir.into(),
            file_types: clean_entries(file_types),
            ignored_dirs: clean_entries(ignored_dirs),
        }
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    pub fn file_types(&self) -> &BTreeSet<String> {
        &self.file_types
    }

    pub fn ignored_dirs(&self) -> &BTreeSet<String> {
        &self.ignored_dirs
    }

    /// Whether files with this extension are processed
    pub fn accepts_type(&self, ext: &str) -> bool {
        self.file_types.contains(ext)
    }

    /// Whether a directory with this base name is skipped
    pub fn ignores_dir(&self, name: &str) -> bool {
        self.ignored_dirs.contains(name)
    }

    /// No file types selected: the run is a no-op
    pub fn is_empty_selection(&self) -> bool {
        self.file_types.is_empty()
    }

    /// Selected tags with no registered comment style
    pub fn unknown_types(&self) -> Vec<&str> {
        self.file_types
            .iter()
            .map(String::as_str)
            .filter(|tag| !is_known(tag))
            .collect()
    }
}

fn clean_entries<I>(entries: I) -> BTreeSet<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    entries
        .into_iter()
        .map(|entry| entry.as_ref().trim().to_string())
        .filter(|entry| !entry.is_empty())
        .collect()
}

/// Split a comma-separated list
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(String::from)
        .collect()
}

/// The three job flags as given on the command line
#[derive(Debug, Clone, Default)]
pub struct FlagArgs {
    pub root_dir: Option<PathBuf>,
    pub file_types: Option<Vec<String>>,
    pub ignored_dirs: Option<Vec<String>>,
}

impl FlagArgs {
    /// A config if every flag is present. An empty root counts as missing.
    pub fn into_config(self) -> Option<JobConfig> {
        let root_dir = self.root_dir.filter(|root| !root.as_os_str().is_empty())?;
        let file_types = self.file_types?;
        let ignored_dirs = self.ignored_dirs?;
        Some(JobConfig::new(root_dir, file_types, ignored_dirs))
    }
}

/// Source of a config when the flags are incomplete
pub trait ConfigPrompt {
    fn prompt_for_config(&mut self) -> Result<JobConfig>;
}

/// Resolve the run configuration before any traversal starts
pub fn resolve_config(flags: FlagArgs, prompt: &mut dyn ConfigPrompt) -> Result<JobConfig> {
    match flags.into_config() {
        Some(config) => Ok(config),
        None => {
            tracing::debug!("Job flags incomplete, prompting");
            prompt.prompt_for_config()
        }
    }
}
