//! Generator configuration.

use std::path::{Path, PathBuf};

use sg_emit::Dialect;

/// Suffix appended to a type's simple name to name its companion class.
pub const DEFAULT_SUFFIX: &str = "Object";

/// Directory generated sources are written under by default.
pub const DEFAULT_OUTPUT_DIR: &str = "generated";

/// Settings for one generation run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Dialect generated sources are rendered in.
    pub dialect: Dialect,
    pub suffix: String,
    pub output_dir: PathBuf,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            dialect: Dialect::Java,
            suffix: DEFAULT_SUFFIX.to_owned(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl GeneratorConfig {
    #[must_use]
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    #[must_use]
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    #[must_use]
    pub fn with_output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.output_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Simple name of the companion class generated for `simple_name`.
    pub fn generated_name(&self, simple_name: &str) -> String {
        format!("{simple_name}{}", self.suffix)
    }
}
