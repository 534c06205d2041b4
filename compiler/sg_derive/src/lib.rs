//! Derived method synthesis.
//!
//! Builds `toString`, `equals` and `hashCode` bodies as code model trees from
//! a type's ordered property list. The functions here are pure: the same
//! input always yields an equal tree, and nothing is rendered to text.
//!
//! Every derived method is static and takes the instance explicitly, so the
//! result can be emitted for dialects with different dispatch conventions.
//!
//! # Tracing
//!
//! - `RUST_LOG=sg_derive=debug`: one event per synthesized method.
//! - `RUST_LOG=sg_derive=trace`: properties skipped for lack of an accessor.

mod equals;
mod error;
mod hash_code;
mod readable;
mod to_string;

#[cfg(test)]
mod eval;

use rustc_hash::FxHashSet;
use sg_model::{ClassTypeDef, MethodDef, PropertyDef};
use tracing::debug;

pub use equals::derive_equals;
pub use error::DeriveError;
pub use hash_code::{
    derive_hash_code, hash_contribution, FALSE_HASH_VALUE, HASH_MULTIPLIER, HASH_SEED,
    NULL_HASH_VALUE, NULL_INSTANCE_HASH, TRUE_HASH_VALUE,
};
pub use to_string::derive_to_string;

/// A method that can be derived from a type's properties.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DerivedMethod {
    /// String form: `Name[a=1, b=2]`
    ToString,
    /// Structural equality
    Equals,
    /// Structural hash, consistent with `Equals`
    HashCode,
}

impl DerivedMethod {
    /// Name of the generated method.
    pub fn method_name(self) -> &'static str {
        match self {
            DerivedMethod::ToString => "toString",
            DerivedMethod::Equals => "equals",
            DerivedMethod::HashCode => "hashCode",
        }
    }

    /// Whether the exclude-from-string flag (rather than the equality one)
    /// governs which properties take part.
    pub fn uses_string_exclusions(self) -> bool {
        matches!(self, DerivedMethod::ToString)
    }
}

/// Check the inputs every derived method relies on.
///
/// Property names must be non-empty and unique within the type.
pub fn validate(self_type: &ClassTypeDef, properties: &[PropertyDef]) -> Result<(), DeriveError> {
    if self_type.simple_name().is_empty() {
        return Err(DeriveError::EmptyTypeName);
    }
    let mut seen = FxHashSet::default();
    for property in properties {
        if property.name.is_empty() {
            return Err(DeriveError::EmptyPropertyName {
                type_name: self_type.qualified_name(),
            });
        }
        if !seen.insert(property.name.as_str()) {
            return Err(DeriveError::DuplicateProperty {
                type_name: self_type.qualified_name(),
                name: property.name.clone(),
            });
        }
    }
    Ok(())
}

/// Validate the inputs and synthesize one derived method.
pub fn derive_method(
    method: DerivedMethod,
    self_type: &ClassTypeDef,
    properties: &[PropertyDef],
) -> Result<MethodDef, DeriveError> {
    validate(self_type, properties)?;
    debug!(
        type_name = %self_type,
        method = method.method_name(),
        properties = properties.len(),
        "synthesizing derived method"
    );
    Ok(match method {
        DerivedMethod::ToString => derive_to_string(self_type, properties),
        DerivedMethod::Equals => derive_equals(self_type, properties),
        DerivedMethod::HashCode => derive_hash_code(self_type, properties),
    })
}
