use thiserror::Error;

/// Why a derived method could not be synthesized.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DeriveError {
    #[error("type has an empty simple name")]
    EmptyTypeName,
    #[error("type `{type_name}` declares a property with an empty name")]
    EmptyPropertyName { type_name: String },
    #[error("type `{type_name}` declares property `{name}` more than once")]
    DuplicateProperty { type_name: String, name: String },
}
