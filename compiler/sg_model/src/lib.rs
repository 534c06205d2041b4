//! Code model for derived-method generation.
//!
//! This crate contains the language-neutral description of generated code:
//! - Type descriptors (`TypeDef`) with flattened arrays
//! - Property descriptors supplied by an introspector (`PropertyDef`)
//! - Expressions and statements (`Expr`, `Stmt`)
//! - Method and class definitions handed to emitters (`MethodDef`, `ClassDef`)
//!
//! # Design
//!
//! - **Closed variant sets**: every consumer matches exhaustively, so adding
//!   a node kind is a compile error until each emitter handles it.
//! - **Immutable trees**: nodes are built bottom-up by combinators and never
//!   mutated afterwards. Nothing is shared between generated types.
//! - **Scoped locals**: a local binding owns its continuation, so a bound
//!   variable cannot leak outside the statements that may see it.

mod defs;
mod expr;
mod property;
mod stmt;
mod types;

pub use defs::{
    ClassDef, ClassDefBuilder, MethodDef, MethodDefBuilder, ParameterDef, Visibility,
};
pub use expr::{BinaryOp, Constant, Expr, VariableRef};
pub use property::{getter_name, Accessor, PropertyDef};
pub use stmt::{LocalDef, Stmt};
pub use types::{ArrayTypeDef, ClassTypeDef, PrimitiveKind, TypeDef};
