//! Property descriptors supplied by the type introspector.

use crate::TypeDef;

/// How a property's value is read from an instance.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Accessor {
    /// A no-argument read method (`getName()`, `isActive()`).
    Method(String),
    /// Direct field access.
    Field(String),
}

impl Accessor {
    /// Name of the method or field.
    pub fn name(&self) -> &str {
        match self {
            Accessor::Method(name) | Accessor::Field(name) => name,
        }
    }
}

/// A readable property of a type.
///
/// Properties are kept in declaration order by their owner; the order is
/// significant for the string form.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PropertyDef {
    pub name: String,
    pub ty: TypeDef,
    /// `None` when the introspector found no way to read the property.
    pub accessor: Option<Accessor>,
    pub exclude_from_string: bool,
    pub exclude_from_equals_and_hash: bool,
}

impl PropertyDef {
    /// Create a property read through the conventional bean getter.
    pub fn new(name: impl Into<String>, ty: TypeDef) -> Self {
        let name = name.into();
        let accessor = Accessor::Method(getter_name(&name, &ty));
        PropertyDef {
            name,
            ty,
            accessor: Some(accessor),
            exclude_from_string: false,
            exclude_from_equals_and_hash: false,
        }
    }

    #[must_use]
    pub fn with_accessor(mut self, accessor: Option<Accessor>) -> Self {
        self.accessor = accessor;
        self
    }

    #[must_use]
    pub fn exclude_from_string(mut self) -> Self {
        self.exclude_from_string = true;
        self
    }

    #[must_use]
    pub fn exclude_from_equals_and_hash(mut self) -> Self {
        self.exclude_from_equals_and_hash = true;
        self
    }

    pub fn is_readable(&self) -> bool {
        self.accessor.is_some()
    }

    /// Readable and not opted out of the string form.
    pub fn in_string_form(&self) -> bool {
        self.is_readable() && !self.exclude_from_string
    }

    /// Readable and not opted out of equality and hashing.
    pub fn in_equality(&self) -> bool {
        self.is_readable() && !self.exclude_from_equals_and_hash
    }
}

/// Conventional bean read-method name: `isX` for `boolean`, `getX` otherwise.
pub fn getter_name(property: &str, ty: &TypeDef) -> String {
    let prefix = if *ty == TypeDef::BOOLEAN { "is" } else { "get" };
    let mut chars = property.chars();
    match chars.next() {
        Some(first) => format!("{prefix}{}{}", first.to_uppercase(), chars.as_str()),
        None => prefix.to_owned(),
    }
}
