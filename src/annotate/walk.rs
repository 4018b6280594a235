//! Directory walker
//!
//! Depth-first traversal of the job root using walkdir. Directories whose
//! base name is listed in the ignored set are pruned at any depth; files are
//! kept when their extension is a selected type and they are not minified.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::annotate::filetype::{extension_of, is_minified};
use crate::annotate::marker::{annotate_file, AnnotateOptions};
use crate::annotate::WalkError;
use crate::config::JobConfig;
use crate::core::model::ResultSet;

/// A file selected for annotation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub path: PathBuf,
    pub file_type: String,
}

fn is_ignored_dir(entry: &DirEntry, config: &JobConfig) -> bool {
    // The root is never pruned, whatever its name.
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let ignored = entry
        .file_name()
        .to_str()
        .is_some_and(|name| config.ignores_dir(name));
    if ignored {
        debug!(path = %entry.path().display(), "Skipping ignored directory");
    }
    ignored
}

fn ensure_directory(root: &Path) -> Result<(), WalkError> {
    let metadata = fs::metadata(root).map_err(|source| WalkError::Read {
        path: root.to_path_buf(),
        source,
    })?;
    if !metadata.is_dir() {
        return Err(WalkError::NotADirectory {
            path: root.to_path_buf(),
        });
    }
    Ok(())
}

/// Collect every file under the root that should be annotated
///
/// Entries are visited in file-name order. The first traversal error aborts.
pub fn collect_targets(config: &JobConfig) -> Result<Vec<Target>, WalkError> {
    let root = config.root_dir();
    ensure_directory(root)?;

    let walker = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_ignored_dir(entry, config));

    let mut targets = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|source| WalkError::traverse(source, root))?;
        if !entry.file_type().is_file() {
            continue;
        }

        // Invalid UTF-8 never lands in the extension of a selected type, so
        // matching on the lossy name still selects such files.
        let name = entry.file_name().to_string_lossy();
        let Some(ext) = extension_of(&name) else {
            continue;
        };
        if !config.accepts_type(ext) {
            continue;
        }
        if is_minified(&name, ext) {
            debug!(path = %entry.path().display(), "Skipping minified file");
            continue;
        }

        let file_type = ext.to_string();
        targets.push(Target {
            path: entry.into_path(),
            file_type,
        });
    }

    Ok(targets)
}

/// Walk the configured tree and annotate every target
pub fn walk(config: &JobConfig, options: AnnotateOptions) -> Result<ResultSet, WalkError> {
    let targets = collect_targets(config)?;
    let root = config.root_dir();
    debug!(count = targets.len(), "Collected files to annotate");

    #[cfg(feature = "parallel")]
    let items = {
        use rayon::prelude::*;
        targets
            .par_iter()
            .map(|target| annotate_file(&target.path, root, &target.file_type, options))
            .collect::<Result<Vec<_>, _>>()?
    };

    #[cfg(not(feature = "parallel"))]
    let items = targets
        .iter()
        .map(|target| annotate_file(&target.path, root, &target.file_type, options))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(items.into_iter().collect())
}
