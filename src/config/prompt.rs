//! Interactive config prompt backed by `inquire`

use anyhow::{Context, Result};
use inquire::{MultiSelect, Text};

use crate::annotate::filetype::supported_tags;
use crate::config::{split_list, ConfigPrompt, JobConfig, DEFAULT_IGNORED_DIRS};

struct FileTypeChoice {
    tag: &'static str,
    label: &'static str,
}

impl std::fmt::Display for FileTypeChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// Asks for the three job settings on the terminal
pub struct InquirePrompt {
    default_root: String,
    default_ignored: String,
}

impl Default for InquirePrompt {
    fn default() -> Self {
        Self {
            default_root: ".".to_string(),
            default_ignored: DEFAULT_IGNORED_DIRS.to_string(),
        }
    }
}

impl InquirePrompt {
    /// Pre-fill answers with whatever flags were given
    pub fn with_defaults(root: Option<String>, ignored: Option<String>) -> Self {
        let base = Self::default();
        Self {
            default_root: root.filter(|r| !r.is_empty()).unwrap_or(base.default_root),
            default_ignored: ignored.unwrap_or(base.default_ignored),
        }
    }
}

impl ConfigPrompt for InquirePrompt {
    fn prompt_for_config(&mut self) -> Result<JobConfig> {
        let root = Text::new("Enter the root directory path:")
            .with_default(&self.default_root)
            .prompt()
            .context("Failed to read root directory")?;

        let choices: Vec<FileTypeChoice> = supported_tags()
            .map(|(tag, label)| FileTypeChoice { tag, label })
            .collect();
        let selected = MultiSelect::new("Select the file types you want to process:", choices)
            .prompt()
            .context("Failed to read file type selection")?;

        let ignored = Text::new("Enter the directories to ignore (comma-separated):")
            .with_default(&self.default_ignored)
            .prompt()
            .context("Failed to read ignored directories")?;

        Ok(JobConfig::new(
            root,
            selected.iter().map(|choice| choice.tag),
            split_list(&ignored),
        ))
    }
}
