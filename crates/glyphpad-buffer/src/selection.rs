//! Text selection handling.
//!
//! ## Learning: Range Types
//!
//! A selection is half-open like Rust's `Range<T>`: `begin` is included,
//! `end` is not. A zero-width selection (`begin == end`) is a plain cursor
//! and needs no special casing.
//!
//! Two kinds of state live here:
//! - [`Selection`], the normalized span the rest of the editor acts on.
//! - [`AnchorPair`], the raw endpoints of a gesture in progress. These keep
//!   their order so extending a selection keeps moving the same end.

use serde::{Deserialize, Serialize};

use crate::buffer::GlyphBuffer;
use crate::position::{Position, normalize};

/// A normalized selection: `begin <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Selection {
    /// Start position (inclusive)
    pub begin: Position,
    /// End position (exclusive)
    pub end: Position,
}

/// How raw endpoints are snapped into a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// Exactly the span between the endpoints
    #[default]
    Normal,
    /// Widened to whole runs of same-colored glyphs
    Word,
    /// Widened to whole lines
    Line,
}

impl Selection {
    /// Creates a new selection.
    ///
    /// Automatically normalizes so begin <= end.
    pub fn new(a: Position, b: Position) -> Self {
        let (begin, end) = normalize(a, b);
        Self { begin, end }
    }

    /// Creates a zero-width selection (cursor position).
    pub fn cursor(position: Position) -> Self {
        Self {
            begin: position,
            end: position,
        }
    }

    /// Returns true if this is a zero-width selection.
    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    /// Returns true if the selection spans multiple lines.
    pub fn is_multiline(&self) -> bool {
        self.begin.line != self.end.line
    }

    /// Returns true if a position is within this selection.
    pub fn contains(&self, pos: Position) -> bool {
        pos >= self.begin && pos < self.end
    }

    /// Normalizes, clamps and snaps a pair of endpoints against a buffer.
    pub fn snapped(a: Position, b: Position, mode: SelectionMode, buffer: &GlyphBuffer) -> Self {
        let (mut begin, mut end) = buffer.clamp_range(a, b);

        match mode {
            SelectionMode::Normal => {}
            SelectionMode::Word => {
                begin.column = word_start(buffer, begin);
                end.column = word_end(buffer, end);
            }
            SelectionMode::Line => {
                begin.column = 0;
                end.column = buffer.line_len(end.line);
            }
        }

        Self { begin, end }
    }
}

/// Walks left over the run sharing the class of the glyph left of `pos`.
fn word_start(buffer: &GlyphBuffer, pos: Position) -> usize {
    let mut column = pos.column;
    let Some(class) = column.checked_sub(1).and_then(|c| buffer.class_at(pos.line, c)) else {
        return column;
    };
    while column > 0 && buffer.class_at(pos.line, column - 1) == Some(class) {
        column -= 1;
    }
    column
}

/// Walks right over the run sharing the class of the glyph left of `pos`.
fn word_end(buffer: &GlyphBuffer, pos: Position) -> usize {
    let mut column = pos.column;
    let Some(class) = column.checked_sub(1).and_then(|c| buffer.class_at(pos.line, c)) else {
        return column;
    };
    while buffer.class_at(pos.line, column) == Some(class) {
        column += 1;
    }
    column
}

/// The two endpoints of an interactive selection gesture.
///
/// `a` is where the gesture started and `b` where it currently is, but
/// navigation may move either one; see [`AnchorPair::extend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnchorPair {
    pub a: Position,
    pub b: Position,
}

impl AnchorPair {
    /// Both anchors at one position.
    pub fn collapsed(position: Position) -> Self {
        Self {
            a: position,
            b: position,
        }
    }

    /// Moves whichever anchor sat at `prev` to `next`.
    ///
    /// If neither anchor matches, the pair restarts as `(prev, next)`.
    pub fn extend(&mut self, prev: Position, next: Position) {
        if self.a == prev {
            self.a = next;
        } else if self.b == prev {
            self.b = next;
        } else {
            self.a = prev;
            self.b = next;
        }
    }

    /// Moves the trailing anchor, as a mouse drag does.
    pub fn drag_to(&mut self, next: Position) {
        self.b = next;
    }

    /// The anchors as an ordered pair.
    pub fn ordered(&self) -> (Position, Position) {
        normalize(self.a, self.b)
    }
}
