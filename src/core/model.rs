//! Report model
//!
//! Every file the walker hands to the annotator produces one [`ResultItem`].
//! Renderers only ever see this model.

use serde::{Deserialize, Serialize};

/// What happened to a visited file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// A marker was prepended
    Annotated,
    /// A stale marker was replaced (exact mode only)
    Updated,
    /// The file already starts with a marker and was left untouched
    AlreadyAnnotated,
    /// The type tag has no registered comment style; nothing was written
    UnknownType,
}

/// One visited file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultItem {
    pub status: Status,

    /// Path relative to root, using '/' as separator
    pub path: String,

    /// Type tag the file was matched with
    pub file_type: String,

    /// Marker line written (or that would be written), without line terminator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,

    /// Set when the run did not touch the filesystem
    #[serde(default, skip_serializing_if = "is_false")]
    pub dry_run: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl ResultItem {
    pub fn new(status: Status, path: impl Into<String>, file_type: impl Into<String>) -> Self {
        Self {
            status,
            path: path.into(),
            file_type: file_type.into(),
            marker: None,
            dry_run: false,
        }
    }

    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = Some(marker.into());
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// Result set containing multiple result items
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultSet {
    pub items: Vec<ResultItem>,
}

impl ResultSet {
    /// Number of items with the given status
    pub fn count(&self, status: Status) -> usize {
        self.items.iter().filter(|item| item.status == status).count()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<ResultItem> for ResultSet {
    fn from_iter<T: IntoIterator<Item = ResultItem>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
