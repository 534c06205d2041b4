//! Emission context.
//!
//! Tracks indentation and the locals in scope while a generator walks a
//! method body, and forwards whole lines to the underlying [`Emitter`].

use sg_model::{LocalDef, ParameterDef};

use crate::emitter::Emitter;
use crate::EmitError;

/// Spaces per indentation level.
pub const INDENT_WIDTH: usize = 4;

/// A name visible in the current method body.
#[derive(Clone, Debug)]
struct Binding {
    name: String,
    mutable: bool,
}

/// Line-oriented writer over an [`Emitter`].
pub struct EmitContext<'a> {
    out: &'a mut dyn Emitter,
    level: usize,
    scope: Vec<Binding>,
}

impl<'a> EmitContext<'a> {
    pub fn new(out: &'a mut dyn Emitter) -> Self {
        EmitContext {
            out,
            level: 0,
            scope: Vec::new(),
        }
    }

    /// Current indentation level.
    pub fn level(&self) -> usize {
        self.level
    }

    /// Emit one indented line.
    pub fn line(&mut self, text: &str) {
        self.out.emit_indent(self.level);
        self.out.emit(text);
        self.out.emit_newline();
    }

    pub fn blank_line(&mut self) {
        self.out.emit_newline();
    }

    /// Emit `header {` and indent.
    pub fn open_block(&mut self, header: &str) {
        self.out.emit_indent(self.level);
        self.out.emit(header);
        self.out.emit_space();
        self.out.emit("{");
        self.out.emit_newline();
        self.level += 1;
    }

    /// Dedent and emit `}`.
    pub fn close_block(&mut self) {
        self.level = self.level.saturating_sub(1);
        self.line("}");
    }

    /// Start a method body with its parameters in scope.
    pub fn enter_method(&mut self, parameters: &[ParameterDef]) {
        self.scope = parameters
            .iter()
            .map(|p| Binding {
                name: p.name.clone(),
                mutable: false,
            })
            .collect();
    }

    /// Bring a local into scope; returns the scope depth to restore.
    pub fn declare(&mut self, local: &LocalDef) -> Result<usize, EmitError> {
        if self.scope.iter().any(|b| b.name == local.name) {
            return Err(EmitError::ShadowedLocal {
                name: local.name.clone(),
            });
        }
        let depth = self.scope.len();
        self.scope.push(Binding {
            name: local.name.clone(),
            mutable: local.mutable,
        });
        Ok(depth)
    }

    /// Drop locals declared after `depth`.
    pub fn restore(&mut self, depth: usize) {
        self.scope.truncate(depth);
    }

    /// Check that `name` refers to a parameter or a local in scope.
    pub fn check_bound(&self, name: &str) -> Result<(), EmitError> {
        if self.scope.iter().any(|b| b.name == name) {
            Ok(())
        } else {
            Err(EmitError::UnboundVariable {
                name: name.to_owned(),
            })
        }
    }

    /// Check that `name` is an in-scope, reassignable local.
    pub fn check_assignable(&self, name: &str) -> Result<(), EmitError> {
        match self.scope.iter().rev().find(|b| b.name == name) {
            Some(binding) if binding.mutable => Ok(()),
            Some(_) => Err(EmitError::ImmutableAssignment {
                name: name.to_owned(),
            }),
            None => Err(EmitError::UnboundVariable {
                name: name.to_owned(),
            }),
        }
    }
}
