//! Route ledger — the deduplicating record of paths already scheduled or
//! visited. Grows monotonically for the lifetime of a run; there is no
//! removal operation.

use std::collections::HashSet;

/// Set of logical paths the scheduler has already enqueued or visited.
///
/// Owned by a single scheduler and injected at construction, so independent
/// runs never share ledger state.
#[derive(Debug, Default)]
pub struct RouteLedger {
    paths: HashSet<String>,
}

impl RouteLedger {
    pub fn new() -> Self {
        Self {
            paths: HashSet::new(),
        }
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    /// Set-insert semantics: returns true only when the path was newly added.
    pub fn add(&mut self, path: &str) -> bool {
        self.paths.insert(path.to_string())
    }

    /// Number of distinct paths discovered so far.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(|s| s.as_str())
    }
}
