//! Source position tracking for tokens and AST nodes.
//!
//! Positions are 0-indexed internally and rendered 1-based in diagnostics,
//! per the spec's data model: every token and node carries a
//! `(line, column_start, byte_offset, length)` quadruple.

use text_size::{TextRange, TextSize};

/// A single point in the source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// 0-indexed line number.
    pub line: u32,
    /// 0-indexed column within the line, counted in bytes.
    pub column: u32,
    /// Byte offset from the start of the buffer.
    pub offset: TextSize,
}

impl Position {
    pub fn new(line: u32, column: u32, offset: TextSize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }

    /// 1-based line number, for diagnostics.
    pub fn display_line(self) -> u32 {
        self.line + 1
    }

    /// 1-based column number, for diagnostics.
    pub fn display_column(self) -> u32 {
        self.column + 1
    }
}

/// A span of source text: a start position, plus a byte length.
///
/// Unlike `Position`, a `Span` does not track an explicit end line/column —
/// callers that need the end position recompute it from `start` and `len`
/// when rendering (tokens don't span multiple lines except inside strings,
/// and diagnostics only ever underline within one rendered line).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: Position,
    pub len: TextSize,
}

impl Span {
    pub fn new(start: Position, len: TextSize) -> Self {
        Self { start, len }
    }

    /// A zero-width span at a single position (used for "missing token" errors).
    pub fn empty(start: Position) -> Self {
        Self {
            start,
            len: TextSize::from(0),
        }
    }

    pub fn range(self) -> TextRange {
        TextRange::at(self.start.offset, self.len)
    }

    pub fn len(self) -> usize {
        usize::from(self.len)
    }

    pub fn is_empty(self) -> bool {
        self.len() == 0
    }
}
