//! Indentation-aware text writer
//!
//! Owns the output buffer and an indentation counter so that plugins can
//! emit statements without tracking nesting themselves. Two spaces per
//! level. The counter is local to one generation call; the writer is not
//! shared across concurrent generations.

use crate::error::{CodegenError, CodegenResult};

/// Accumulates generated source text with consistent indentation.
#[derive(Debug, Default)]
pub struct CodeWriter {
    out: String,
    indent_level: usize,
}

impl CodeWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write one line at the current indentation level.
    pub fn writeln(&mut self, line: &str) {
        for _ in 0..self.indent_level {
            self.out.push_str("  ");
        }
        self.out.push_str(line);
        self.out.push('\n');
    }

    /// Write an empty line (no indentation padding).
    pub fn blank(&mut self) {
        self.out.push('\n');
    }

    /// Enter one nesting level.
    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    /// Leave one nesting level.
    ///
    /// Going below zero signals an orchestration bug — mismatched
    /// enter/exit must surface, not be silently tolerated.
    pub fn dedent(&mut self) -> CodegenResult<()> {
        if self.indent_level == 0 {
            return Err(CodegenError::Indentation);
        }
        self.indent_level -= 1;
        Ok(())
    }

    /// Write `header` and enter a nesting level.
    pub fn begin_block(&mut self, header: &str) {
        self.writeln(header);
        self.indent();
    }

    /// Leave a nesting level and write `footer`.
    pub fn end_block(&mut self, footer: &str) -> CodegenResult<()> {
        self.dedent()?;
        self.writeln(footer);
        Ok(())
    }

    /// Current nesting depth.
    pub fn indent_level(&self) -> usize {
        self.indent_level
    }

    /// Consume the writer and return the accumulated text.
    pub fn into_string(self) -> String {
        self.out
    }
}
