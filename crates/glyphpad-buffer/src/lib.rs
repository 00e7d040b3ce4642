//! # Glyphpad Buffer
//!
//! The document model of the editor: lines of colored glyphs, the position
//! algebra everything else is written against, line-keyed error markers and
//! the dirty range that drives incremental colorization.
//!
//! ## Key Concepts for Learning Rust
//!
//! ### Ownership & Borrowing
//! - `GlyphBuffer` owns its lines, markers and dirty range together
//! - Accessors like `line()` hand out borrowed slices (`&[Glyph]`)
//! - Mutations require `&mut self`, so the bookkeeping can never drift
//!   out of sync with the lines behind a caller's back
//!
//! ### Clamping instead of failing
//! - Positions from outside are clamped into the document, not rejected
//! - There is no error type here: every operation is total

mod buffer;
mod dirty;
mod glyph;
mod markers;
mod position;
mod selection;

pub use buffer::GlyphBuffer;
pub use dirty::DirtyRange;
pub use glyph::{ColorClass, Glyph, Line, line_from_bytes};
pub use markers::ErrorMarkers;
pub use position::{Position, normalize};
pub use selection::{AnchorPair, Selection, SelectionMode};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_creation() {
        let buffer = GlyphBuffer::new();
        assert!(buffer.is_empty());
        assert_eq!(buffer.line_count(), 1);
        assert!(buffer.dirty().is_empty());
    }

    #[test]
    fn test_buffer_from_string() {
        let buffer = GlyphBuffer::from("Hello, World!");
        assert_eq!(buffer.line_len(0), 13);
        assert_eq!(buffer.text(), "Hello, World!");
    }

    #[test]
    fn test_line_operations() {
        let buffer = GlyphBuffer::from("Line 1\nLine 2\nLine 3");
        assert_eq!(buffer.line_count(), 3);
        assert_eq!(buffer.line_text(0), "Line 1");
        assert_eq!(buffer.line_text(2), "Line 3");
        assert_eq!(buffer.line_text(3), "");
    }

    #[test]
    fn test_line_from_bytes() {
        let line = line_from_bytes(b"ab");
        assert_eq!(line, vec![Glyph::new(b'a'), Glyph::new(b'b')]);
    }
}
