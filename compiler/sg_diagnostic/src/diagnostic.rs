use std::fmt;

use crate::ErrorCode;

/// Severity level for diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
        }
    }
}

/// A diagnostic attributed to the type it was raised for.
///
/// Generated code has no source spans of its own; the origin is the
/// qualified name of the type whose generation produced the message.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "diagnostics should be reported or returned, not silently dropped"]
pub struct Diagnostic {
    /// Error code for searchability.
    pub code: ErrorCode,
    pub severity: Severity,
    /// Main message.
    pub message: String,
    /// Qualified name of the originating type, if any.
    pub origin: Option<String>,
    /// Additional notes providing context.
    pub notes: Vec<String>,
}

impl Diagnostic {
    fn new_with_severity(code: ErrorCode, severity: Severity) -> Self {
        Diagnostic {
            code,
            severity,
            message: String::new(),
            origin: None,
            notes: Vec::new(),
        }
    }

    /// Create a new error diagnostic.
    #[cold]
    pub fn error(code: ErrorCode) -> Self {
        Self::new_with_severity(code, Severity::Error)
    }

    /// Create a new warning diagnostic.
    #[cold]
    pub fn warning(code: ErrorCode) -> Self {
        Self::new_with_severity(code, Severity::Warning)
    }

    /// Set the main message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Attribute the diagnostic to a type.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Add a note providing additional context.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.code, self.message)?;
        if let Some(origin) = &self.origin {
            write!(f, " ({origin})")?;
        }
        Ok(())
    }
}

/// Fatal error raised while generating code for one type.
pub fn generation_failed(origin: &str, code: ErrorCode, cause: &str) -> Diagnostic {
    Diagnostic::error(code)
        .with_message(format!("failed to generate derived methods: {cause}"))
        .with_origin(origin)
        .with_note("generation for this type was aborted; other types are unaffected")
}

/// Advisory emitted whenever a string form is generated.
pub fn declared_properties_only(origin: &str) -> Diagnostic {
    Diagnostic::warning(ErrorCode::W1001)
        .with_message("generated string form will only include declared properties")
        .with_origin(origin)
}

/// Advisory for an exclusion marker on a property whose methods are not generated.
pub fn ineffective_exclusion(origin: &str, property: &str, method: &str) -> Diagnostic {
    Diagnostic::warning(ErrorCode::W1002)
        .with_message(format!(
            "property `{property}` is excluded from `{method}`, which is not generated"
        ))
        .with_origin(origin)
}
