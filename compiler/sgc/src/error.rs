//! Error types for the driver, artifacts, manifests and the CLI.

use std::io;
use std::path::PathBuf;

use sg_derive::DeriveError;
use sg_diagnostic::ErrorCode;
use sg_emit::EmitError;
use thiserror::Error;

/// Why generation failed for one type.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Derive(#[from] DeriveError),
    #[error(transparent)]
    Emit(#[from] EmitError),
    #[error(transparent)]
    Artifact(#[from] ArtifactError),
}

impl GenerationError {
    /// Diagnostic code reported for this failure.
    pub fn code(&self) -> ErrorCode {
        match self {
            GenerationError::Derive(_) => ErrorCode::E2001,
            GenerationError::Emit(_) => ErrorCode::E2002,
            GenerationError::Artifact(_) => ErrorCode::E2003,
        }
    }
}

/// A generated source could not be stored.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("cannot create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The sink refuses the write, e.g. a read-only target.
    #[error("artifact {} was rejected: {reason}", .path.display())]
    Rejected { path: PathBuf, reason: String },
}

/// A manifest could not be read or describes an invalid type.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("cannot read manifest {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed manifest: {0}")]
    Json(#[from] serde_json::Error),
    #[error("type `{type_name}`: property `{property}` has invalid type `{ty}`")]
    InvalidType {
        type_name: String,
        property: String,
        ty: String,
    },
    #[error("type `{type_name}`: property `{property}` names both a getter and a field")]
    ConflictingAccessors { type_name: String, property: String },
    #[error("type name `{0}` is not a qualified class name")]
    InvalidTypeName(String),
    /// Companions of nested types would land in a package named after the
    /// enclosing type.
    #[error("type `{0}` is nested in another type; only top-level types are supported")]
    NestedType(String),
}

/// Errors surfaced by the `sgc` binary.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("unknown dialect `{0}` (expected one of: java, kotlin, groovy)")]
    UnknownDialect(String),
    #[error("missing value for `{0}`")]
    MissingValue(&'static str),
    #[error("unexpected argument `{0}`")]
    UnexpectedArgument(String),
    #[error(transparent)]
    Manifest(#[from] ManifestError),
    #[error("{errors} type(s) failed to generate")]
    GenerationFailed { errors: usize },
}
