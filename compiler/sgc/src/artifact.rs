//! Where generated sources go.
//!
//! The driver hands each sink a path relative to the output root and the
//! complete text of one file. Sinks never see partial output, and
//! [`DirectoryArtifacts`] never leaves a partial file behind: contents go to
//! a temporary file beside the target, which is renamed over it once fully
//! written.

use std::fs;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use sg_emit::{Emitter, FileEmitter};
use sg_model::ClassDef;
use tempfile::NamedTempFile;
use tracing::trace;

use crate::ArtifactError;

/// Destination for generated source files.
pub trait ArtifactSink {
    /// Store `contents` under `relative`, replacing any previous file.
    fn write(&mut self, relative: &Path, contents: &str) -> Result<(), ArtifactError>;
}

/// `<package path>/<SimpleName>.<extension>`, e.g. `com/example/BeanObject.java`.
pub fn artifact_path(class: &ClassDef, extension: &str) -> PathBuf {
    let mut path = PathBuf::new();
    if !class.package.is_empty() {
        for segment in class.package.split('.') {
            path.push(segment);
        }
    }
    path.push(format!("{}.{extension}", class.simple_name));
    path
}

/// Keeps generated files in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryArtifacts {
    files: FxHashMap<PathBuf, String>,
}

impl MemoryArtifacts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, relative: impl AsRef<Path>) -> Option<&str> {
        self.files.get(relative.as_ref()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl ArtifactSink for MemoryArtifacts {
    fn write(&mut self, relative: &Path, contents: &str) -> Result<(), ArtifactError> {
        self.files
            .insert(relative.to_path_buf(), contents.to_owned());
        Ok(())
    }
}

/// Writes generated files below a root directory.
#[derive(Clone, Debug)]
pub struct DirectoryArtifacts {
    root: PathBuf,
}

impl DirectoryArtifacts {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirectoryArtifacts { root: root.into() }
    }
}

impl ArtifactSink for DirectoryArtifacts {
    fn write(&mut self, relative: &Path, contents: &str) -> Result<(), ArtifactError> {
        let path = self.root.join(relative);
        let parent = path.parent().unwrap_or(&self.root).to_path_buf();
        fs::create_dir_all(&parent).map_err(|source| ArtifactError::CreateDir {
            path: parent.clone(),
            source,
        })?;
        trace!(path = %path.display(), bytes = contents.len(), "writing artifact");
        let write_error = |source| ArtifactError::Write {
            path: path.clone(),
            source,
        };
        // Dropping `staged` on any early return removes the temporary file.
        let staged = NamedTempFile::new_in(&parent).map_err(write_error)?;
        let mut out = FileEmitter::new(staged.reopen().map_err(write_error)?);
        out.emit(contents);
        out.finish().map_err(write_error)?;
        staged
            .persist(&path)
            .map(drop)
            .map_err(|error| write_error(error.error))
    }
}
