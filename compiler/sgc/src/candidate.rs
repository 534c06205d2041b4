//! Types offered to the driver for generation.

use bitflags::bitflags;
use sg_derive::DerivedMethod;
use sg_model::{ClassTypeDef, PropertyDef};

bitflags! {
    /// Type-level opt-in markers.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct Markers: u8 {
        /// Generate `toString`.
        const TO_STRING = 1 << 0;
        /// Generate `equals` and `hashCode` together.
        const EQUALS_AND_HASH_CODE = 1 << 1;
    }
}

impl Markers {
    /// Derived methods requested by these markers, in generation order.
    pub fn methods(self) -> Vec<DerivedMethod> {
        let mut methods = Vec::with_capacity(3);
        if self.contains(Markers::TO_STRING) {
            methods.push(DerivedMethod::ToString);
        }
        if self.contains(Markers::EQUALS_AND_HASH_CODE) {
            methods.push(DerivedMethod::Equals);
            methods.push(DerivedMethod::HashCode);
        }
        methods
    }
}

/// A type as reported by the property introspector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeCandidate {
    pub ty: ClassTypeDef,
    pub markers: Markers,
    /// Properties in declaration order.
    pub properties: Vec<PropertyDef>,
}

impl TypeCandidate {
    pub fn new(qualified_name: &str, markers: Markers) -> Self {
        TypeCandidate {
            ty: ClassTypeDef::of(qualified_name),
            markers,
            properties: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_property(mut self, property: PropertyDef) -> Self {
        self.properties.push(property);
        self
    }

    /// Identity of the type within a pass.
    pub fn qualified_name(&self) -> String {
        self.ty.qualified_name()
    }

    pub fn is_marked(&self) -> bool {
        !self.markers.is_empty()
    }
}
