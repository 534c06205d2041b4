//! Error codes for generator diagnostics.
//!
//! Each code is a unique identifier whose letter gives the severity class and
//! whose first digit gives the phase.

use std::fmt;

/// Error codes for all generator diagnostics.
///
/// Format: letter + four digits:
/// - W1xxx: Advisory warnings about generation scope
/// - E2xxx: Fatal generation errors, attributed to one type
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    /// String form only includes declared properties
    W1001,
    /// Type carries an exclusion marker on a property that is never generated
    W1002,

    /// Derived method synthesis failed
    E2001,
    /// Rendering the generated class failed
    E2002,
    /// Writing the generated source artifact failed
    E2003,
}

impl ErrorCode {
    /// All codes, in declaration order.
    pub const ALL: &'static [ErrorCode] = &[
        ErrorCode::W1001,
        ErrorCode::W1002,
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::W1001 => "W1001",
            ErrorCode::W1002 => "W1002",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
        }
    }

    /// One-line explanation used by `--explain`.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::W1001 => "the generated string form only includes declared properties",
            ErrorCode::W1002 => "an exclusion marker has no effect on the requested methods",
            ErrorCode::E2001 => "derived method synthesis failed for a type",
            ErrorCode::E2002 => "the generated class could not be rendered",
            ErrorCode::E2003 => "the generated source file could not be written",
        }
    }

    /// Advisory codes never abort generation.
    pub fn is_warning(&self) -> bool {
        self.as_str().starts_with('W')
    }

    /// Look a code up by its string form.
    pub fn parse(s: &str) -> Option<ErrorCode> {
        ErrorCode::ALL.iter().copied().find(|code| code.as_str() == s)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
