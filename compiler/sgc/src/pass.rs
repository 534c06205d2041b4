//! Per-pass generation state.

use rustc_hash::FxHashSet;
use tracing::trace;

/// Types already handled in the current pass, by qualified name.
///
/// Owned by the caller and passed into every generation call; nothing
/// survives from one pass to the next once [`PassContext::start_pass`] runs.
#[derive(Clone, Debug, Default)]
pub struct PassContext {
    processed: FxHashSet<String>,
    pass: usize,
}

impl PassContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a new pass, forgetting every processed type.
    pub fn start_pass(&mut self) {
        self.pass += 1;
        trace!(pass = self.pass, forgotten = self.processed.len(), "starting pass");
        self.processed.clear();
    }

    /// Number of passes started so far.
    pub fn pass_number(&self) -> usize {
        self.pass
    }

    pub fn is_processed(&self, type_name: &str) -> bool {
        self.processed.contains(type_name)
    }

    /// Returns `false` if the type was already marked.
    pub fn mark(&mut self, type_name: &str) -> bool {
        self.processed.insert(type_name.to_owned())
    }

    /// Roll back a mark so a later pass can retry the type.
    pub fn unmark(&mut self, type_name: &str) -> bool {
        self.processed.remove(type_name)
    }
}
