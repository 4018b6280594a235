//! Renderer module
//!
//! Renders ResultSet to different output formats: jsonl, json, md, raw

use colored::Colorize;
use std::io::Write;

use crate::core::model::{ResultItem, ResultSet, Status};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Jsonl,
    Json,
    Markdown,
    Raw,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jsonl" => Ok(OutputFormat::Jsonl),
            "json" => Ok(OutputFormat::Json),
            "md" | "markdown" => Ok(OutputFormat::Markdown),
            "raw" => Ok(OutputFormat::Raw),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
    pub color: bool,
}

impl RenderConfig {
    /// Create a new render config with default options
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            pretty: false,
            color: false,
        }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }
}

/// Renderer for result sets
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    /// Create a new renderer with render config
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render a result set to a string
    pub fn render(&self, result_set: &ResultSet) -> String {
        match self.config.format {
            OutputFormat::Jsonl => self.render_jsonl(result_set),
            OutputFormat::Json => self.render_json(result_set),
            OutputFormat::Markdown => self.render_markdown(result_set),
            OutputFormat::Raw => self.render_raw(result_set),
        }
    }

    /// Render to a writer, followed by a newline unless the output is empty
    pub fn render_to<W: Write>(
        &self,
        result_set: &ResultSet,
        mut writer: W,
    ) -> std::io::Result<()> {
        let output = self.render(result_set);
        if output.is_empty() {
            return Ok(());
        }
        writer.write_all(output.as_bytes())?;
        writer.write_all(b"\n")
    }

    /// Render as JSON Lines (one JSON object per line)
    fn render_jsonl(&self, result_set: &ResultSet) -> String {
        result_set
            .items
            .iter()
            .filter_map(|item| {
                if self.config.pretty {
                    serde_json::to_string_pretty(item).ok()
                } else {
                    serde_json::to_string(item).ok()
                }
            })
            .collect::<Vec<_>>()
            .join(if self.config.pretty { "\n\n" } else { "\n" })
    }

    /// Render as a single JSON array
    fn render_json(&self, result_set: &ResultSet) -> String {
        if self.config.pretty {
            serde_json::to_string_pretty(&result_set.items).unwrap_or_else(|_| "[]".to_string())
        } else {
            serde_json::to_string(&result_set.items).unwrap_or_else(|_| "[]".to_string())
        }
    }

    /// Render as Markdown, one section per status
    fn render_markdown(&self, result_set: &ResultSet) -> String {
        let sections = [
            (Status::Annotated, "Annotated"),
            (Status::Updated, "Updated"),
            (Status::AlreadyAnnotated, "Already annotated"),
            (Status::UnknownType, "Unknown file type"),
        ];

        let mut output = String::new();
        for (status, title) in sections {
            let items: Vec<&ResultItem> = result_set
                .items
                .iter()
                .filter(|item| item.status == status)
                .collect();
            if items.is_empty() {
                continue;
            }

            output.push_str(&format!("## {}\n\n", title));
            for item in items {
                output.push_str(&format!("- `{}`", item.path));
                if let Some(marker) = &item.marker {
                    output.push_str(&format!(" → `{}`", marker));
                }
                output.push('\n');
            }
            output.push('\n');
        }

        if result_set.items.iter().any(|item| item.dry_run) {
            output.push_str("> Dry run: no files were written\n\n");
        }

        output.push_str(&format!(
            "**Total:** {} files ({} annotated, {} updated, {} already annotated, {} unknown type)\n",
            result_set.len(),
            result_set.count(Status::Annotated),
            result_set.count(Status::Updated),
            result_set.count(Status::AlreadyAnnotated),
            result_set.count(Status::UnknownType),
        ));
        output
    }

    /// Render as one human-readable line per file
    fn render_raw(&self, result_set: &ResultSet) -> String {
        result_set
            .items
            .iter()
            .map(|item| self.raw_line(item))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn raw_line(&self, item: &ResultItem) -> String {
        let text = match item.status {
            Status::Annotated => format!("Added sourceURL to file: {}", item.path),
            Status::Updated => format!("Replaced stale sourceURL in file: {}", item.path),
            Status::AlreadyAnnotated => format!("File already has a sourceURL: {}", item.path),
            Status::UnknownType => format!(
                "No sourceURL style for type '{}', left untouched: {}",
                item.file_type, item.path
            ),
        };
        let text = if item.dry_run {
            format!("[dry-run] {}", text)
        } else {
            text
        };

        if !self.config.color {
            return text;
        }
        match item.status {
            Status::Annotated => text.green().to_string(),
            Status::Updated => text.cyan().to_string(),
            Status::AlreadyAnnotated => text.dimmed().to_string(),
            Status::UnknownType => text.yellow().to_string(),
        }
    }
}
