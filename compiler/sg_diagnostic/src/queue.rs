//! Diagnostic sink and the collecting queue.
//!
//! Features:
//! - Error limits to prevent overwhelming output, applied when displaying
//! - Deduplication of identical advisories for the same type
//! - `ErrorGuaranteed` proof that errors were emitted
//!
//! Errors are never deduplicated or dropped: a type that fails in two passes
//! has two errors on record, and every `ErrorGuaranteed` stands for one.

use rustc_hash::FxHashSet;

use crate::{Diagnostic, ErrorGuaranteed};

/// Destination for diagnostics produced during generation.
pub trait DiagnosticSink {
    /// Record an advisory. Sinks may drop repeats.
    fn report(&mut self, diagnostic: Diagnostic);

    /// Record an error and return proof that it was recorded.
    ///
    /// Implementations must keep every error they are given.
    fn emit_error(&mut self, diagnostic: Diagnostic) -> ErrorGuaranteed;
}

/// Configuration for diagnostic processing.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DiagnosticConfig {
    /// Maximum number of errors displayed (0 = unlimited).
    pub error_limit: usize,
    /// Drop an advisory identical to one already queued.
    pub deduplicate: bool,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        DiagnosticConfig {
            error_limit: 50,
            deduplicate: true,
        }
    }
}

impl DiagnosticConfig {
    /// A config with no limits (for testing).
    pub fn unlimited() -> Self {
        DiagnosticConfig {
            error_limit: 0,
            deduplicate: false,
        }
    }
}

/// Queue collecting diagnostics in report order.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticQueue {
    diagnostics: Vec<Diagnostic>,
    seen: FxHashSet<Diagnostic>,
    error_count: usize,
    warning_count: usize,
    config: DiagnosticConfig,
}

impl DiagnosticQueue {
    pub fn new() -> Self {
        Self::with_config(DiagnosticConfig::default())
    }

    pub fn with_config(config: DiagnosticConfig) -> Self {
        DiagnosticQueue {
            diagnostics: Vec::new(),
            seen: FxHashSet::default(),
            error_count: 0,
            warning_count: 0,
            config,
        }
    }

    /// Add a diagnostic; returns `false` when a repeated advisory was
    /// dropped. Errors are always kept.
    pub fn add(&mut self, diagnostic: Diagnostic) -> bool {
        if !diagnostic.is_error()
            && self.config.deduplicate
            && !self.seen.insert(diagnostic.clone())
        {
            return false;
        }
        self.push(diagnostic);
        true
    }

    fn push(&mut self, diagnostic: Diagnostic) {
        if diagnostic.is_error() {
            self.error_count += 1;
        } else if diagnostic.is_warning() {
            self.warning_count += 1;
        }
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn warning_count(&self) -> usize {
        self.warning_count
    }

    /// Proof of reported errors, if there were any.
    pub fn error_guaranteed(&self) -> Option<ErrorGuaranteed> {
        ErrorGuaranteed::from_error_count(self.error_count)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Diagnostics to display, in report order, with errors past the limit
    /// held back; also returns how many errors were held back.
    pub fn for_display(&self) -> (Vec<&Diagnostic>, usize) {
        let limit = match self.config.error_limit {
            0 => usize::MAX,
            limit => limit,
        };
        let mut shown_errors = 0;
        let shown = self
            .diagnostics
            .iter()
            .filter(|d| {
                if !d.is_error() {
                    return true;
                }
                if shown_errors == limit {
                    return false;
                }
                shown_errors += 1;
                true
            })
            .collect();
        (shown, self.error_count - shown_errors)
    }

    /// Diagnostics attributed to `origin`.
    pub fn for_origin<'a>(&'a self, origin: &'a str) -> impl Iterator<Item = &'a Diagnostic> {
        self.diagnostics
            .iter()
            .filter(move |d| d.origin.as_deref() == Some(origin))
    }

    /// Take all queued diagnostics, resetting the queue.
    pub fn flush(&mut self) -> Vec<Diagnostic> {
        self.seen.clear();
        self.error_count = 0;
        self.warning_count = 0;
        std::mem::take(&mut self.diagnostics)
    }
}

impl DiagnosticSink for DiagnosticQueue {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.add(diagnostic);
    }

    fn emit_error(&mut self, diagnostic: Diagnostic) -> ErrorGuaranteed {
        debug_assert!(diagnostic.is_error(), "emit_error called with a non-error");
        self.push(diagnostic);
        ErrorGuaranteed::new()
    }
}
