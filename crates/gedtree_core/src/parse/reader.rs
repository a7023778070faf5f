//! Forward-only reader over preprocessed GEDCOM lines.
//!
//! Record parsers take `&mut LineReader` and consume exactly their own
//! subtree; they inspect the next line with [`LineReader::peek`] and never
//! step back.

use crate::parse::line::LineRecord;

pub struct LineReader<'a> {
    lines: &'a [LineRecord],
    pos: usize,
}

impl<'a> LineReader<'a> {
    pub fn new(lines: &'a [LineRecord]) -> Self {
        Self { lines, pos: 0 }
    }

    /// Returns the next line without consuming it.
    pub fn peek(&self) -> Option<&'a LineRecord> {
        self.lines.get(self.pos)
    }

    /// Consumes and returns the next line.
    pub fn advance(&mut self) -> Option<&'a LineRecord> {
        let line = self.lines.get(self.pos)?;
        self.pos += 1;
        Some(line)
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.lines.len()
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Consumes the next line if it is nested below `parent_level`.
    pub fn next_child(&mut self, parent_level: u32) -> Option<&'a LineRecord> {
        match self.peek() {
            Some(line) if line.level > parent_level => self.advance(),
            _ => None,
        }
    }

    /// Consumes every line nested below `level`; returns how many were skipped.
    pub fn skip_subtree(&mut self, level: u32) -> usize {
        let mut skipped = 0;
        while self.next_child(level).is_some() {
            skipped += 1;
        }
        skipped
    }
}
