//! Type descriptors.
//!
//! `TypeDef` is the closed set of type kinds the generator understands.
//! Arrays are flattened: an array never has an array element, the nesting
//! depth lives in `dimensions` instead.

use std::fmt;
use std::num::NonZeroU32;

/// Primitive value kinds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Boolean,
    Char,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
}

impl PrimitiveKind {
    /// Parse a primitive keyword (`int`, `boolean`, ...).
    pub fn from_name(s: &str) -> Option<PrimitiveKind> {
        match s {
            "boolean" => Some(PrimitiveKind::Boolean),
            "char" => Some(PrimitiveKind::Char),
            "byte" => Some(PrimitiveKind::Byte),
            "short" => Some(PrimitiveKind::Short),
            "int" => Some(PrimitiveKind::Int),
            "long" => Some(PrimitiveKind::Long),
            "float" => Some(PrimitiveKind::Float),
            "double" => Some(PrimitiveKind::Double),
            _ => None,
        }
    }

    /// The keyword spelling of this primitive.
    pub fn name(self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Char => "char",
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Short => "short",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A reference to a named class.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ClassTypeDef {
    /// Package (namespace), empty for the default package.
    package: String,
    /// Simple (unqualified) name.
    simple_name: String,
    /// Whether the reference admits `null` in dialects that spell it out.
    nullable: bool,
}

impl ClassTypeDef {
    /// Create a class reference from a qualified name (`com.example.Bean`).
    pub fn of(qualified_name: &str) -> Self {
        let (package, simple_name) = match qualified_name.rfind('.') {
            Some(dot) => (&qualified_name[..dot], &qualified_name[dot + 1..]),
            None => ("", qualified_name),
        };
        ClassTypeDef::new(package, simple_name)
    }

    /// Create a class reference from its package and simple name.
    pub fn new(package: impl Into<String>, simple_name: impl Into<String>) -> Self {
        ClassTypeDef {
            package: package.into(),
            simple_name: simple_name.into(),
            nullable: false,
        }
    }

    pub fn string() -> Self {
        ClassTypeDef::new("java.lang", "String")
    }

    pub fn object() -> Self {
        ClassTypeDef::new("java.lang", "Object")
    }

    pub fn string_builder() -> Self {
        ClassTypeDef::new("java.lang", "StringBuilder")
    }

    pub fn class() -> Self {
        ClassTypeDef::new("java.lang", "Class")
    }

    pub fn arrays() -> Self {
        ClassTypeDef::new("java.util", "Arrays")
    }

    pub fn float_box() -> Self {
        ClassTypeDef::new("java.lang", "Float")
    }

    pub fn double_box() -> Self {
        ClassTypeDef::new("java.lang", "Double")
    }

    /// Mark this reference as nullable.
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn simple_name(&self) -> &str {
        &self.simple_name
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// `package.SimpleName`, or just the simple name in the default package.
    pub fn qualified_name(&self) -> String {
        if self.package.is_empty() {
            self.simple_name.clone()
        } else {
            format!("{}.{}", self.package, self.simple_name)
        }
    }
}

impl fmt::Display for ClassTypeDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.package.is_empty() {
            write!(f, "{}", self.simple_name)
        } else {
            write!(f, "{}.{}", self.package, self.simple_name)
        }
    }
}

/// An array type with a non-array element and a flattened depth.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ArrayTypeDef {
    element: Box<TypeDef>,
    dimensions: NonZeroU32,
}

impl ArrayTypeDef {
    /// The non-array element type.
    pub fn element(&self) -> &TypeDef {
        &self.element
    }

    /// Nesting depth, always at least 1.
    pub fn dimensions(&self) -> u32 {
        self.dimensions.get()
    }

    /// Whether library calls on this array need their deep variant.
    pub fn is_nested(&self) -> bool {
        self.dimensions.get() > 1
    }
}

/// A type descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeDef {
    Primitive(PrimitiveKind),
    Array(ArrayTypeDef),
    Class(ClassTypeDef),
}

impl TypeDef {
    pub const BOOLEAN: TypeDef = TypeDef::Primitive(PrimitiveKind::Boolean);
    pub const CHAR: TypeDef = TypeDef::Primitive(PrimitiveKind::Char);
    pub const BYTE: TypeDef = TypeDef::Primitive(PrimitiveKind::Byte);
    pub const SHORT: TypeDef = TypeDef::Primitive(PrimitiveKind::Short);
    pub const INT: TypeDef = TypeDef::Primitive(PrimitiveKind::Int);
    pub const LONG: TypeDef = TypeDef::Primitive(PrimitiveKind::Long);
    pub const FLOAT: TypeDef = TypeDef::Primitive(PrimitiveKind::Float);
    pub const DOUBLE: TypeDef = TypeDef::Primitive(PrimitiveKind::Double);

    /// Class reference from a qualified name.
    pub fn class(qualified_name: &str) -> TypeDef {
        TypeDef::Class(ClassTypeDef::of(qualified_name))
    }

    pub fn string() -> TypeDef {
        TypeDef::Class(ClassTypeDef::string())
    }

    pub fn object() -> TypeDef {
        TypeDef::Class(ClassTypeDef::object())
    }

    /// Build an array type, folding nested arrays into one dimension count.
    ///
    /// `dimensions == 0` returns the element unchanged.
    pub fn array(element: TypeDef, dimensions: u32) -> TypeDef {
        let Some(extra) = NonZeroU32::new(dimensions) else {
            return element;
        };
        match element {
            TypeDef::Array(inner) => TypeDef::Array(ArrayTypeDef {
                element: inner.element,
                dimensions: inner.dimensions.saturating_add(extra.get()),
            }),
            other => TypeDef::Array(ArrayTypeDef {
                element: Box::new(other),
                dimensions: extra,
            }),
        }
    }

    /// Parse the source spelling of a type: `int`, `java.lang.String`, `long[][]`.
    ///
    /// Returns `None` for an empty name or unbalanced brackets.
    pub fn parse(source: &str) -> Option<TypeDef> {
        let mut base = source.trim();
        let mut dimensions = 0;
        while let Some(rest) = base.strip_suffix("[]") {
            base = rest.trim_end();
            dimensions += 1;
        }
        if base.is_empty() || base.contains(['[', ']']) {
            return None;
        }
        let element = match PrimitiveKind::from_name(base) {
            Some(kind) => TypeDef::Primitive(kind),
            None if base == "void" => return None,
            None => TypeDef::class(base),
        };
        Some(TypeDef::array(element, dimensions))
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, TypeDef::Primitive(_))
    }

    pub fn as_primitive(&self) -> Option<PrimitiveKind> {
        match self {
            TypeDef::Primitive(kind) => Some(*kind),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayTypeDef> {
        match self {
            TypeDef::Array(array) => Some(array),
            _ => None,
        }
    }
}

impl From<PrimitiveKind> for TypeDef {
    fn from(kind: PrimitiveKind) -> Self {
        TypeDef::Primitive(kind)
    }
}

impl From<ClassTypeDef> for TypeDef {
    fn from(class: ClassTypeDef) -> Self {
        TypeDef::Class(class)
    }
}

impl fmt::Display for TypeDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDef::Primitive(kind) => write!(f, "{kind}"),
            TypeDef::Class(class) => write!(f, "{class}"),
            TypeDef::Array(array) => {
                write!(f, "{}", array.element())?;
                for _ in 0..array.dimensions() {
                    f.write_str("[]")?;
                }
                Ok(())
            }
        }
    }
}
