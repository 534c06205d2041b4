//! Terminal Emitter
//!
//! Human-readable diagnostic output with optional ANSI color support.

use std::io::{self, Write};

use crate::{Diagnostic, Severity};

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const WARNING: &str = "\x1b[1;33m"; // Bold yellow
    pub const NOTE: &str = "\x1b[1;36m"; // Bold cyan
    pub const BOLD: &str = "\x1b[1m";
    pub const RESET: &str = "\x1b[0m";
}

#[inline]
fn plural_s(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Color output mode for the terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Use colors when the output is a TTY.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Writes diagnostics in a compiler-like text format:
///
/// ```text
/// error[E2003]: failed to generate derived methods: disk full
///   --> com.example.Bean
///    = note: generation for this type was aborted; other types are unaffected
/// ```
pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
}

impl<W: Write> TerminalEmitter<W> {
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
        }
    }

    /// Consume the emitter and return the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn paint(&self, text: &str, color: &str) -> String {
        if self.colors {
            format!("{color}{text}{}", colors::RESET)
        } else {
            text.to_owned()
        }
    }

    pub fn emit(&mut self, diagnostic: &Diagnostic) -> io::Result<()> {
        let color = match diagnostic.severity {
            Severity::Error => colors::ERROR,
            Severity::Warning => colors::WARNING,
            Severity::Note => colors::NOTE,
        };
        let severity = self.paint(&diagnostic.severity.to_string(), color);
        let code = self.paint(&format!("[{}]", diagnostic.code), colors::BOLD);
        writeln!(self.writer, "{severity}{code}: {}", diagnostic.message)?;
        if let Some(origin) = &diagnostic.origin {
            writeln!(self.writer, "  --> {origin}")?;
        }
        for note in &diagnostic.notes {
            writeln!(self.writer, "   = note: {note}")?;
        }
        Ok(())
    }

    pub fn emit_all<'a>(
        &mut self,
        diagnostics: impl IntoIterator<Item = &'a Diagnostic>,
    ) -> io::Result<()> {
        for diagnostic in diagnostics {
            self.emit(diagnostic)?;
        }
        Ok(())
    }

    /// Note for errors held back by the display limit.
    pub fn emit_suppressed(&mut self, count: usize) -> io::Result<()> {
        if count == 0 {
            return Ok(());
        }
        let note = self.paint("note", colors::NOTE);
        writeln!(
            self.writer,
            "{note}: {count} further error{} not shown",
            plural_s(count)
        )
    }

    pub fn emit_summary(&mut self, error_count: usize, warning_count: usize) -> io::Result<()> {
        if error_count == 0 && warning_count == 0 {
            return Ok(());
        }
        let mut parts = Vec::new();
        if error_count > 0 {
            parts.push(format!("{error_count} error{}", plural_s(error_count)));
        }
        if warning_count > 0 {
            parts.push(format!("{warning_count} warning{}", plural_s(warning_count)));
        }
        writeln!(self.writer, "{}", parts.join(", "))?;
        self.writer.flush()
    }
}
