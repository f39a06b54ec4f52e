//! Options for a walk
//!
//! This module provides the immutable request that configures one traversal.

use std::path::{Path, PathBuf};

use super::filter::MatchTarget;

/// Everything a traversal needs to know before it starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkRequest {
    /// Directory the walk starts from
    pub root: PathBuf,

    /// What file names are tested against
    pub target: MatchTarget,

    /// Deepest level a matched file may sit at below `root` (entries of `root` are level 1)
    pub max_depth: Option<usize>,

    /// Stop after this many matches
    pub max_results: Option<usize>,
}

impl WalkRequest {
    /// Create a request that matches every regular file below `root`
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            target: MatchTarget::All,
            max_depth: None,
            max_results: None,
        }
    }

    /// Set the match target
    pub fn with_target(mut self, target: MatchTarget) -> Self {
        self.target = target;
        self
    }

    /// Set the maximum depth to search
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the maximum number of results
    pub fn with_max_results(mut self, max_results: Option<usize>) -> Self {
        self.max_results = max_results;
        self
    }
}
