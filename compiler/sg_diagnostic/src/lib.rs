//! Diagnostic system for the derived-method generator.
//!
//! - Error codes for searchability
//! - Clear messages (what went wrong)
//! - Origin attribution (which type it went wrong for)
//! - Notes (what happened as a consequence)
//!
//! # Error Guarantees
//!
//! The `ErrorGuaranteed` type provides type-level proof that at least one
//! error was reported, so generation can't fail without telling anyone.
//!
//! ```text
//! let guarantee = sink.emit_error(diagnostic);
//! fn generate(..) -> Result<Outcome, ErrorGuaranteed> { ... }
//! ```

mod diagnostic;
pub mod emitter;
mod error_code;
mod guarantee;
pub mod queue;

pub use diagnostic::{
    declared_properties_only, generation_failed, ineffective_exclusion, Diagnostic, Severity,
};
pub use emitter::{ColorMode, TerminalEmitter};
pub use error_code::ErrorCode;
pub use guarantee::ErrorGuaranteed;
pub use queue::{DiagnosticConfig, DiagnosticQueue, DiagnosticSink};
