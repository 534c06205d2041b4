use thiserror::Error;

use crate::Dialect;

/// Why a class definition could not be rendered.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EmitError {
    #[error("`{name}` is not a valid {dialect} identifier")]
    InvalidIdentifier { dialect: Dialect, name: String },
    #[error("method `{method}` declares a return type but not every path returns")]
    MissingReturn { method: String },
    #[error("assignment to `{name}`, which is not a mutable local")]
    ImmutableAssignment { name: String },
    #[error("`{name}` is not in scope")]
    UnboundVariable { name: String },
    #[error("local `{name}` shadows a name already in scope")]
    ShadowedLocal { name: String },
}
