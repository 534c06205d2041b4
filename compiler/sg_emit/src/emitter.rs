//! Output Emitter
//!
//! Abstraction for where rendered source text goes: an in-memory string for
//! the generation driver and tests, or a buffered file.

use std::fs::File;
use std::io::{self, BufWriter, Write};

use crate::context::INDENT_WIDTH;

/// Trait for emitting rendered source text.
///
/// Source generators write to an emitter line by line. Different
/// implementations support in-memory strings or file output.
pub trait Emitter {
    /// Emit a text fragment.
    fn emit(&mut self, text: &str);

    /// Emit a newline (Unix-style `\n`).
    fn emit_newline(&mut self);

    /// Emit indentation (4 spaces per level).
    fn emit_indent(&mut self, level: usize);

    /// Emit a single space.
    fn emit_space(&mut self);
}

/// String-based emitter.
///
/// The driver renders a whole class here before handing the text to an
/// artifact sink, so a rendering failure never leaves a partial file.
#[derive(Default)]
pub struct StringEmitter {
    buffer: String,
}

impl StringEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: String::with_capacity(capacity),
        }
    }

    /// Get the rendered output.
    pub fn output(self) -> String {
        self.buffer
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Ensure the output ends with a single newline.
    pub fn ensure_trailing_newline(&mut self) {
        if !self.buffer.ends_with('\n') {
            self.buffer.push('\n');
        }
    }
}

impl Emitter for StringEmitter {
    fn emit(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn emit_newline(&mut self) {
        self.buffer.push('\n');
    }

    fn emit_indent(&mut self, level: usize) {
        for _ in 0..level * INDENT_WIDTH {
            self.buffer.push(' ');
        }
    }

    fn emit_space(&mut self) {
        self.buffer.push(' ');
    }
}

/// File-based emitter for streaming output to a file.
///
/// Write errors are held until [`FileEmitter::finish`]; after the first
/// failure further output is dropped.
pub struct FileEmitter {
    writer: BufWriter<File>,
    error: Option<io::Error>,
}

impl FileEmitter {
    /// Stream into an already opened file, starting at its current position.
    pub fn new(file: File) -> Self {
        Self {
            writer: BufWriter::new(file),
            error: None,
        }
    }

    /// Flush buffered output and report the first error seen, if any.
    pub fn finish(mut self) -> io::Result<()> {
        if let Some(error) = self.error.take() {
            return Err(error);
        }
        self.writer.flush()?;
        self.writer.get_ref().sync_all()
    }

    fn write(&mut self, bytes: &[u8]) {
        if self.error.is_none() {
            if let Err(error) = self.writer.write_all(bytes) {
                self.error = Some(error);
            }
        }
    }
}

impl Emitter for FileEmitter {
    fn emit(&mut self, text: &str) {
        self.write(text.as_bytes());
    }

    fn emit_newline(&mut self) {
        self.write(b"\n");
    }

    fn emit_indent(&mut self, level: usize) {
        for _ in 0..level * INDENT_WIDTH {
            self.write(b" ");
        }
    }

    fn emit_space(&mut self) {
        self.write(b" ");
    }
}
