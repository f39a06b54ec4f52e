//! File name matching
//!
//! This module provides the filters that decide whether a regular file is
//! reported. Names are compared as raw bytes, so non-UTF-8 names work too.

use std::ffi::OsStr;

/// Extensions accepted by an extension filter in known-only mode
pub const KNOWN_EXTENSIONS: &[&str] = &[
    ".pdf", ".txt", ".c", ".h", ".jpg", ".png", ".jpeg", ".go", ".java", ".md", ".odt",
];

/// Trait for file filters
pub trait FileFilter {
    /// Check if a regular file with this name matches the filter
    fn matches(&self, name: &OsStr) -> bool;

    /// Get the filter description
    fn description(&self) -> String;
}

/// What a walk is looking for
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MatchTarget {
    /// Every regular file
    #[default]
    All,
    /// File name equal to the target
    Exact(String),
    /// File name containing the target
    Partial(String),
    /// File name ending in the given extension
    Extension { ext: String, known_only: bool },
}

/// Factory for creating the filter of a match target
pub struct FilterFactory;

impl FilterFactory {
    /// Create the filter for `target`; an empty target matches everything
    pub fn create_filter(target: &MatchTarget) -> Box<dyn FileFilter + Send + Sync> {
        match target {
            MatchTarget::Exact(name) if !name.is_empty() => Box::new(ExactNameFilter::new(name)),
            MatchTarget::Partial(part) if !part.is_empty() => {
                Box::new(PartialNameFilter::new(part))
            }
            MatchTarget::Extension { ext, known_only } if !ext.is_empty() => {
                Box::new(ExtensionFilter::new(ext).with_known_only(*known_only))
            }
            _ => Box::new(MatchAllFilter),
        }
    }
}

/// Filter that accepts every file
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchAllFilter;

impl FileFilter for MatchAllFilter {
    fn matches(&self, _name: &OsStr) -> bool {
        true
    }

    fn description(&self) -> String {
        "any regular file".to_string()
    }
}

/// Filter for file names equal to a string
#[derive(Debug, Clone)]
pub struct ExactNameFilter {
    name: String,
}

impl ExactNameFilter {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

impl FileFilter for ExactNameFilter {
    fn matches(&self, name: &OsStr) -> bool {
        name.as_encoded_bytes() == self.name.as_bytes()
    }

    fn description(&self) -> String {
        format!("name is '{}'", self.name)
    }
}

/// Filter for file names containing a string
#[derive(Debug, Clone)]
pub struct PartialNameFilter {
    part: String,
}

impl PartialNameFilter {
    pub fn new(part: &str) -> Self {
        Self {
            part: part.to_string(),
        }
    }
}

impl FileFilter for PartialNameFilter {
    fn matches(&self, name: &OsStr) -> bool {
        contains_bytes(name.as_encoded_bytes(), self.part.as_bytes())
    }

    fn description(&self) -> String {
        format!("name contains '{}'", self.part)
    }
}

/// Filter for file names by their last `.ext` suffix
#[derive(Debug, Clone)]
pub struct ExtensionFilter {
    ext: String,
    known_only: bool,
}

impl ExtensionFilter {
    /// Create a new ExtensionFilter; a missing leading dot is added
    pub fn new(ext: &str) -> Self {
        let ext = if ext.starts_with('.') {
            ext.to_string()
        } else {
            format!(".{}", ext)
        };

        Self {
            ext,
            known_only: false,
        }
    }

    /// Only match extensions from [`KNOWN_EXTENSIONS`]
    pub fn with_known_only(mut self, known_only: bool) -> Self {
        self.known_only = known_only;
        self
    }

    /// The normalized extension, leading dot included
    pub fn extension(&self) -> &str {
        &self.ext
    }
}

impl FileFilter for ExtensionFilter {
    fn matches(&self, name: &OsStr) -> bool {
        if self.known_only && !KNOWN_EXTENSIONS.contains(&self.ext.as_str()) {
            return false;
        }

        extension_of(name.as_encoded_bytes()) == Some(self.ext.as_bytes())
    }

    fn description(&self) -> String {
        if self.known_only {
            format!("known extension '{}'", self.ext)
        } else {
            format!("extension '{}'", self.ext)
        }
    }
}

/// Final `.ext` suffix of a name; a dot at position 0 does not start one
fn extension_of(name: &[u8]) -> Option<&[u8]> {
    let dot = name.iter().rposition(|&b| b == b'.')?;
    if dot == 0 {
        None
    } else {
        Some(&name[dot..])
    }
}

fn contains_bytes(haystack: &[u8], needle: &[u8]) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.windows(needle.len()).any(|window| window == needle)
}
