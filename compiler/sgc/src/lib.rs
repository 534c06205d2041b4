//! Generation driver for derived methods.
//!
//! One [`GenerationDriver::run_pass`] call is one pass over the candidate
//! types: every marked type gets a companion class `<Simple><suffix>` in its
//! own package, holding the requested static methods, rendered by the
//! generator registered for the configured dialect.
//!
//! # Failure isolation
//!
//! A failure while synthesizing, rendering or writing one type is reported
//! as a fatal diagnostic attributed to that type. The type's processed mark
//! is rolled back, and the pass moves on to the next candidate.
//!
//! # Tracing
//!
//! - `RUST_LOG=sgc=debug`: one event per generated or skipped type.
//! - `RUST_LOG=sgc=trace`: pass boundaries and artifact writes.

use std::sync::Once;

pub mod artifact;
mod candidate;
pub mod commands;
mod config;
mod driver;
mod error;
pub mod manifest;
mod pass;

pub use artifact::{artifact_path, ArtifactSink, DirectoryArtifacts, MemoryArtifacts};
pub use candidate::{Markers, TypeCandidate};
pub use config::{GeneratorConfig, DEFAULT_OUTPUT_DIR, DEFAULT_SUFFIX};
pub use driver::{GenerationDriver, Outcome, PassSummary, SkipReason};
pub use error::{ArtifactError, CliError, GenerationError, ManifestError};
pub use pass::PassContext;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Does nothing unless `RUST_LOG` is set.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
