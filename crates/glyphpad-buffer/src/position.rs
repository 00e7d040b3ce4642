//! Position type for text navigation.
//!
//! ## Learning: Deriving a Total Order
//!
//! `Position` compares line first, then column. Implementing `Ord`
//! once means every `<`, `<=`, `min` and `max` in the crate agrees on
//! the same ordering, instead of each caller comparing fields by hand.

use serde::{Deserialize, Serialize};

/// A position in the document (line and column).
///
/// Both line and column are 0-indexed. Columns count glyphs, which are
/// single bytes in this model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    /// Line number (0-indexed)
    pub line: usize,
    /// Column number (0-indexed)
    pub column: usize,
}

impl Position {
    /// Creates a new position.
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Position at the start of the document.
    pub const ZERO: Position = Position { line: 0, column: 0 };

    /// Returns true if this position is strictly before another.
    pub fn is_before(&self, other: &Position) -> bool {
        self < other
    }

    /// Returns true if this position is strictly after another.
    pub fn is_after(&self, other: &Position) -> bool {
        self > other
    }

    /// Returns the same position moved to column 0.
    pub fn line_start(self) -> Position {
        Position::new(self.line, 0)
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.line.cmp(&other.line) {
            std::cmp::Ordering::Equal => self.column.cmp(&other.column),
            other => other,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Display as 1-indexed for user-facing output
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

impl From<(usize, usize)> for Position {
    fn from((line, column): (usize, usize)) -> Self {
        Self::new(line, column)
    }
}

/// Returns the pair in non-decreasing order.
pub fn normalize(a: Position, b: Position) -> (Position, Position) {
    if a <= b { (a, b) } else { (b, a) }
}
