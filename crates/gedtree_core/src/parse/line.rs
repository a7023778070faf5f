//! GEDCOM line preprocessing.
//!
//! # Responsibility
//! - Turn raw text into an ordered list of `LEVEL TAG VALUE` records.
//!
//! # Invariants
//! - Blank lines and lines that do not match the line grammar are dropped,
//!   never reported as errors.
//! - Cross-reference tags are stored without their `@` markers.

use once_cell::sync::Lazy;
use regex::Regex;

static LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+)\s+(@[^@\s]+@|\w+)\s*(.*)$").expect("valid gedcom line regex")
});

/// One matched GEDCOM line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRecord {
    pub level: u32,
    /// Tag keyword, or a cross-reference id with `@` stripped.
    pub tag: String,
    pub value: String,
    /// 1-based line number in the source text.
    pub line_number: usize,
}

/// Output of [`preprocess_lines`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preprocessed {
    pub lines: Vec<LineRecord>,
    /// Non-blank lines that failed the line grammar.
    pub dropped: usize,
}

/// Splits `content` into line records, preserving order.
pub fn preprocess_lines(content: &str) -> Preprocessed {
    let mut output = Preprocessed::default();

    for (index, raw) in content.split('\n').enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        match parse_line(line, index + 1) {
            Some(record) => output.lines.push(record),
            None => output.dropped += 1,
        }
    }

    output
}

fn parse_line(line: &str, line_number: usize) -> Option<LineRecord> {
    let caps = LINE_RE.captures(line)?;
    let level = caps.get(1)?.as_str().parse::<u32>().ok()?;
    let tag = caps.get(2)?.as_str().replace('@', "");
    let value = caps
        .get(3)
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default();

    Some(LineRecord {
        level,
        tag,
        value,
        line_number,
    })
}

/// Returns whether `value` is a `@...@` pointer.
pub fn is_pointer(value: &str) -> bool {
    let value = value.trim();
    value.len() >= 2 && value.starts_with('@') && value.ends_with('@')
}

/// Strips `@` markers from a pointer value.
pub fn strip_pointer(value: &str) -> String {
    value.trim().replace('@', "")
}
