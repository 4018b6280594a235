//! Marker insertion - prepend a sourceURL comment to a single file
//!
//! The marker is one line: `prefix + relative path + suffix`, followed by
//! '\n', inserted before the original content:
//!
//! ```text
//! //# sourceURL=/src/app.js
//! /*# sourceURL=/style/main.css */
//! <!--# sourceURL=/index.html -->
//! ```

use std::fs;
use std::path::Path;
use tracing::info;

use crate::annotate::filetype::{comment_style, CommentStyle};
use crate::annotate::WalkError;
use crate::core::model::{ResultItem, Status};
use crate::core::paths::marker_path;

/// How an existing marker is recognised
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkerMode {
    /// Content starting with the style prefix counts as annotated,
    /// whatever path follows. Compatible with earlier runs.
    #[default]
    Prefix,
    /// The marker comment must be exactly the expected one; a marker with the
    /// right prefix but another path is stale and gets replaced.
    Exact,
}

/// Per-run annotation options
#[derive(Debug, Clone, Copy, Default)]
pub struct AnnotateOptions {
    pub mode: MarkerMode,
    pub dry_run: bool,
}

/// Marker found at the start of some content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerState {
    Missing,
    Present,
    Stale,
}

/// Outcome of annotating content in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub status: Status,

    /// Expected marker line, absent for unknown types
    pub marker: Option<String>,

    /// New content to write, present only when the file must change
    pub content: Option<String>,
}

/// Build the marker line (without terminator)
pub fn marker_line(relative_path: &str, style: CommentStyle) -> String {
    format!("{}{}{}", style.prefix, relative_path, style.suffix)
}

/// The marker comment at the start of `content`, if any
///
/// Spans from the style prefix up to the end of the first suffix on the first
/// line; a style without suffix spans the whole first line. `None` when the
/// comment is not closed on the first line.
fn existing_marker(content: &str, style: CommentStyle) -> Option<&str> {
    let line = content.split('\n').next().unwrap_or_default();
    let line = line.strip_suffix('\r').unwrap_or(line);
    if !line.starts_with(style.prefix) {
        return None;
    }
    if style.suffix.is_empty() {
        return Some(line);
    }

    let body = &line[style.prefix.len()..];
    body.find(style.suffix)
        .map(|idx| &line[..style.prefix.len() + idx + style.suffix.len()])
}

/// Inspect the start of `content` for a marker
///
/// In exact mode a marker comment that does not close on the first line is
/// left alone and counts as present.
pub fn check_marker(
    content: &str,
    style: CommentStyle,
    expected: &str,
    mode: MarkerMode,
) -> MarkerState {
    if !content.starts_with(style.prefix) {
        return MarkerState::Missing;
    }

    match mode {
        MarkerMode::Prefix => MarkerState::Present,
        MarkerMode::Exact => match existing_marker(content, style) {
            Some(found) if found != expected => MarkerState::Stale,
            _ => MarkerState::Present,
        },
    }
}

/// Decide what `content` should become for a file at `relative_path`
pub fn annotate_content(
    content: &str,
    relative_path: &str,
    file_type: &str,
    mode: MarkerMode,
) -> Decision {
    let style = comment_style(file_type);
    if style.is_none() {
        return Decision {
            status: Status::UnknownType,
            marker: None,
            content: None,
        };
    }

    let marker = marker_line(relative_path, style);
    let (status, content) = match check_marker(content, style, &marker, mode) {
        MarkerState::Present => (Status::AlreadyAnnotated, None),
        MarkerState::Missing => (Status::Annotated, Some(format!("{}\n{}", marker, content))),
        // Only the comment itself is replaced; the rest of its line stays.
        MarkerState::Stale => match existing_marker(content, style) {
            Some(found) => (
                Status::Updated,
                Some(format!("{}{}", marker, &content[found.len()..])),
            ),
            None => (Status::AlreadyAnnotated, None),
        },
    };

    Decision {
        status,
        marker: Some(marker),
        content,
    }
}

/// Annotate one file on disk
///
/// Reads the whole file, decides from that content alone, then rewrites it in
/// a single write. Nothing is written on a dry run.
pub fn annotate_file(
    path: &Path,
    root: &Path,
    file_type: &str,
    options: AnnotateOptions,
) -> Result<ResultItem, WalkError> {
    let relative = marker_path(path, root);

    let content = fs::read_to_string(path).map_err(|source| WalkError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let decision = annotate_content(&content, &relative, file_type, options.mode);

    if let Some(updated) = &decision.content {
        if !options.dry_run {
            fs::write(path, updated).map_err(|source| WalkError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        }
    }

    match decision.status {
        Status::Annotated => info!(path = %path.display(), "Added sourceURL"),
        Status::Updated => info!(path = %path.display(), "Replaced stale sourceURL"),
        Status::AlreadyAnnotated => {
            info!(path = %path.display(), "File already has a sourceURL")
        }
        Status::UnknownType => info!(
            path = %path.display(),
            file_type,
            "No sourceURL style for file type, left untouched"
        ),
    }

    let mut item =
        ResultItem::new(decision.status, relative, file_type).with_dry_run(options.dry_run);
    if let Some(marker) = decision.marker {
        item = item.with_marker(marker);
    }
    Ok(item)
}
