//! Source emitters for the derived-method code model.
//!
//! A [`SourceGenerator`] renders a [`ClassDef`] as source text for one
//! [`Dialect`]. Generators are looked up through an [`EmitterRegistry`];
//! a dialect with no registered generator is not an error here, callers
//! decide what a failed lookup means.
//!
//! Output goes through the [`Emitter`] trait so the same generator can
//! write into memory ([`StringEmitter`]) or straight to a file
//! ([`FileEmitter`]).

mod context;
mod dialect;
pub mod emitter;
mod error;
mod java;
mod kotlin;
mod lexical;
mod registry;

use sg_model::ClassDef;

pub use context::{EmitContext, INDENT_WIDTH};
pub use dialect::Dialect;
pub use emitter::{Emitter, FileEmitter, StringEmitter};
pub use error::EmitError;
pub use java::JavaGenerator;
pub use kotlin::KotlinGenerator;
pub use registry::EmitterRegistry;

/// First line of every generated file, as a line comment.
pub const GENERATED_NOTICE: &str = "Generated by sgc. Do not edit.";

/// Renders class definitions as source text for one dialect.
pub trait SourceGenerator {
    fn dialect(&self) -> Dialect;

    /// File extension of generated sources, without the dot.
    fn file_extension(&self) -> &'static str;

    /// Render `class` into `out`.
    ///
    /// On error `out` may hold partial output.
    fn write(&self, class: &ClassDef, out: &mut dyn Emitter) -> Result<(), EmitError>;
}

/// Render `class` fully into memory.
pub fn render(generator: &dyn SourceGenerator, class: &ClassDef) -> Result<String, EmitError> {
    let mut out = StringEmitter::with_capacity(1024);
    generator.write(class, &mut out)?;
    out.ensure_trailing_newline();
    Ok(out.output())
}
