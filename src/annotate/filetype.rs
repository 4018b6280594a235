//! File type registry
//!
//! Maps a type tag (the file extension without its dot) to the comment
//! delimiters used to build its marker line. Adding a type is one table row.

/// Comment delimiters surrounding the marker path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentStyle {
    /// Text before the relative path, ending with the leading '/'
    pub prefix: &'static str,

    /// Text after the relative path
    pub suffix: &'static str,
}

impl CommentStyle {
    /// Style for tags the registry does not know.
    ///
    /// Every file content starts with the empty prefix, so an unknown tag
    /// never leads to a modification.
    pub const NONE: CommentStyle = CommentStyle {
        prefix: "",
        suffix: "",
    };

    const LINE: CommentStyle = CommentStyle {
        prefix: "//# sourceURL=/",
        suffix: "",
    };

    const BLOCK: CommentStyle = CommentStyle {
        prefix: "/*# sourceURL=/",
        suffix: " */",
    };

    const MARKUP: CommentStyle = CommentStyle {
        prefix: "<!--# sourceURL=/",
        suffix: " -->",
    };

    pub fn is_none(&self) -> bool {
        self.prefix.is_empty() && self.suffix.is_empty()
    }
}

/// Registered file types: (tag, label shown in prompts, style)
const FILE_TYPES: &[(&str, &str, CommentStyle)] = &[
    ("js", "JavaScript (.js)", CommentStyle::LINE),
    ("mjs", "JavaScript module (.mjs)", CommentStyle::LINE),
    ("cjs", "CommonJS (.cjs)", CommentStyle::LINE),
    ("css", "CSS (.css)", CommentStyle::BLOCK),
    ("html", "HTML (.html)", CommentStyle::MARKUP),
];

/// Comment style for a tag, or [`CommentStyle::NONE`] if unregistered
pub fn comment_style(tag: &str) -> CommentStyle {
    FILE_TYPES
        .iter()
        .find(|(t, _, _)| *t == tag)
        .map(|(_, _, style)| *style)
        .unwrap_or(CommentStyle::NONE)
}

pub fn is_known(tag: &str) -> bool {
    FILE_TYPES.iter().any(|(t, _, _)| *t == tag)
}

/// All registered tags with their prompt labels, in registry order
pub fn supported_tags() -> impl Iterator<Item = (&'static str, &'static str)> {
    FILE_TYPES.iter().map(|(tag, label, _)| (*tag, *label))
}

/// Whether `file_name` is a minified `<stem>.min.<ext>` artifact
pub fn is_minified(file_name: &str, ext: &str) -> bool {
    file_name
        .strip_suffix(ext)
        .and_then(|rest| rest.strip_suffix(".min."))
        .is_some_and(|stem| !stem.is_empty())
}

/// Extension of a file name: text after the last '.', without the dot.
///
/// Dotfiles such as `.eslintrc` have no extension.
pub fn extension_of(file_name: &str) -> Option<&str> {
    match file_name.rfind('.') {
        Some(0) | None => None,
        Some(idx) => Some(&file_name[idx + 1..]),
    }
}
