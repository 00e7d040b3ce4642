//! The line/glyph document buffer.
//!
//! ## Why a vector of lines?
//!
//! Every edit this buffer serves touches one line or splices a few: typing,
//! splitting at a newline, joining on backspace, indenting a block. With
//! lines stored separately those are all local `Vec` operations, and the
//! colorizer can rewrite a glyph's class in place without rebuilding text.
//!
//! ## Invariants
//!
//! - There is always at least one line. An empty document is one empty line.
//! - Every structural mutation renumbers the error markers and widens the
//!   dirty range, so callers cannot forget either.

use std::ops::Range;

use crate::dirty::DirtyRange;
use crate::glyph::{ColorClass, Glyph, Line, glyph_bytes};
use crate::markers::ErrorMarkers;
use crate::position::{Position, normalize};

/// An ordered sequence of glyph lines plus the bookkeeping that must stay
/// consistent with it.
#[derive(Debug, Clone)]
pub struct GlyphBuffer {
    /// The lines; never empty
    lines: Vec<Line>,

    /// Diagnostics keyed by line number
    markers: ErrorMarkers,

    /// Lines whose colorization is stale
    dirty: DirtyRange,
}

impl GlyphBuffer {
    /// Creates a buffer holding a single empty line.
    ///
    /// # Example
    /// ```
    /// use glyphpad_buffer::GlyphBuffer;
    ///
    /// let buffer = GlyphBuffer::new();
    /// assert_eq!(buffer.line_count(), 1);
    /// assert!(buffer.is_empty());
    /// ```
    pub fn new() -> Self {
        Self {
            lines: vec![Line::new()],
            markers: ErrorMarkers::new(),
            dirty: DirtyRange::new(),
        }
    }

    // ==================== Whole-document text ====================

    /// Replaces the entire document.
    ///
    /// Splits on `'\n'` and drops every `'\r'`. Markers are cleared and the
    /// whole document is marked dirty.
    pub fn set_text(&mut self, text: &str) {
        self.set_bytes(text.as_bytes());
    }

    /// Replaces the entire document from raw bytes, one glyph per byte.
    ///
    /// Any byte sequence is accepted; [`GlyphBuffer::text_bytes`] gives
    /// it back minus the `'\r'`s.
    pub fn set_bytes(&mut self, bytes: &[u8]) {
        self.lines.clear();
        self.lines.push(Line::new());
        self.markers.clear();

        for &byte in bytes {
            match byte {
                b'\r' => continue,
                b'\n' => self.lines.push(Line::new()),
                _ => {
                    if let Some(line) = self.lines.last_mut() {
                        line.push(Glyph::new(byte));
                    }
                }
            }
        }

        self.dirty.mark_all(self.lines.len());
        tracing::debug!(lines = self.lines.len(), "buffer text replaced");
    }

    /// Serializes the whole document, lines joined by `'\n'`.
    ///
    /// Bytes that are not valid UTF-8 come back as U+FFFD; use
    /// [`GlyphBuffer::text_bytes`] for an exact copy.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.text_bytes()).into_owned()
    }

    /// The raw bytes of the whole document, lines joined by `'\n'`.
    pub fn text_bytes(&self) -> Vec<u8> {
        self.text_range_bytes(Position::ZERO, self.end_position())
    }

    /// Serializes `[begin, end)`, re-inserting `'\n'` between lines.
    ///
    /// Both ends are clamped into the document; a reversed or empty range
    /// yields an empty string.
    pub fn text_range(&self, begin: Position, end: Position) -> String {
        String::from_utf8_lossy(&self.text_range_bytes(begin, end)).into_owned()
    }

    /// The raw bytes of `[begin, end)`; see [`GlyphBuffer::text_range`].
    pub fn text_range_bytes(&self, begin: Position, end: Position) -> Vec<u8> {
        let begin = self.clamp(begin);
        let end = self.clamp(end);
        if end <= begin {
            return Vec::new();
        }

        let mut bytes = Vec::new();
        if begin.line == end.line {
            bytes.extend(glyph_bytes(&self.lines[begin.line][begin.column..end.column]));
        } else {
            bytes.extend(glyph_bytes(&self.lines[begin.line][begin.column..]));
            for line in &self.lines[begin.line + 1..end.line] {
                bytes.push(b'\n');
                bytes.extend(glyph_bytes(line));
            }
            bytes.push(b'\n');
            bytes.extend(glyph_bytes(&self.lines[end.line][..end.column]));
        }
        bytes
    }

    /// Returns the text of one line, or an empty string past the end.
    pub fn line_text(&self, line: usize) -> String {
        String::from_utf8_lossy(&self.line_bytes(line)).into_owned()
    }

    /// The raw bytes of one line, empty past the end.
    pub fn line_bytes(&self, line: usize) -> Vec<u8> {
        self.lines
            .get(line)
            .map(|l| glyph_bytes(l).collect())
            .unwrap_or_default()
    }

    // ==================== Measurements ====================

    /// Number of lines; always at least 1.
    #[inline]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns true if the document is a single empty line.
    pub fn is_empty(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    /// Returns the glyphs of a line.
    pub fn line(&self, line: usize) -> Option<&[Glyph]> {
        self.lines.get(line).map(Vec::as_slice)
    }

    /// Iterates all lines in order.
    pub fn lines(&self) -> impl Iterator<Item = &[Glyph]> {
        self.lines.iter().map(Vec::as_slice)
    }

    /// Length of a line in glyphs, 0 past the end.
    pub fn line_len(&self, line: usize) -> usize {
        self.lines.get(line).map_or(0, Vec::len)
    }

    /// The position just past the last glyph of the last line.
    pub fn end_position(&self) -> Position {
        let last = self.lines.len() - 1;
        Position::new(last, self.lines[last].len())
    }

    /// Clamps a position into `[ZERO, end_position()]`.
    pub fn clamp(&self, pos: Position) -> Position {
        let line = pos.line.min(self.lines.len() - 1);
        Position::new(line, pos.column.min(self.lines[line].len()))
    }

    /// Returns the glyph at a position, if one exists there.
    pub fn glyph_at(&self, pos: Position) -> Option<Glyph> {
        self.lines.get(pos.line)?.get(pos.column).copied()
    }

    /// Color class of the glyph at `(line, column)`.
    pub fn class_at(&self, line: usize, column: usize) -> Option<ColorClass> {
        self.glyph_at(Position::new(line, column)).map(|g| g.class)
    }

    // ==================== Structural edits ====================

    /// Inserts an empty line at `at` and returns it for filling.
    ///
    /// `at` is clamped to `line_count()`. Pending dirty lines below `at`
    /// move down with their text.
    pub fn insert_line(&mut self, at: usize) -> &mut Line {
        let at = at.min(self.lines.len());
        self.dirty.shift_for_insert(at);
        self.dirty.expand(at, at + 1);
        self.markers.shift_for_insert(at, 1);
        self.lines.insert(at, Line::new());
        tracing::trace!(at, "line inserted");
        &mut self.lines[at]
    }

    /// Removes lines `[first, last]`.
    ///
    /// Callers must keep at least one line; if the range covers the whole
    /// document anyway, a single empty line is left behind.
    pub fn delete_lines(&mut self, first: usize, last: usize) {
        let last = last.min(self.lines.len() - 1);
        if first > last {
            return;
        }

        self.dirty.expand(first, last + 1);
        self.markers.shift_for_delete(first, last);
        self.lines.drain(first..=last);

        if self.lines.is_empty() {
            self.lines.push(Line::new());
        }
        tracing::debug!(first, last, "lines deleted");
    }

    /// Deletes the text in `[begin, end)`.
    ///
    /// A same-line range removes columns `[begin.column, end.column)`. A
    /// cross-line range joins the remainder of the end line onto the begin
    /// line and removes the lines in between. No-op unless `end > begin`.
    pub fn delete_range(&mut self, begin: Position, end: Position) {
        let begin = self.clamp(begin);
        let end = self.clamp(end);
        if end <= begin {
            return;
        }

        self.dirty.expand(begin.line, end.line + 1);

        if begin.line == end.line {
            self.lines[begin.line].drain(begin.column..end.column);
        } else {
            let tail = self.lines[end.line].split_off(end.column);
            let head = &mut self.lines[begin.line];
            head.truncate(begin.column);
            head.extend(tail);
            self.delete_lines(begin.line + 1, end.line);
        }
    }

    // ==================== Line edits ====================

    /// Inserts a glyph at a position (clamped), shifting the rest right.
    pub fn insert_glyph(&mut self, pos: Position, glyph: Glyph) {
        let pos = self.clamp(pos);
        self.lines[pos.line].insert(pos.column, glyph);
        self.dirty.expand_line(pos.line);
    }

    /// Replaces the glyph at a position. Returns false if there is none.
    pub fn overwrite_glyph(&mut self, pos: Position, glyph: Glyph) -> bool {
        match self.lines.get_mut(pos.line).and_then(|l| l.get_mut(pos.column)) {
            Some(slot) => {
                *slot = glyph;
                self.dirty.expand_line(pos.line);
                true
            }
            None => false,
        }
    }

    /// Removes and returns the glyph at a position, if any.
    pub fn remove_glyph(&mut self, pos: Position) -> Option<Glyph> {
        let line = self.lines.get_mut(pos.line)?;
        if pos.column >= line.len() {
            return None;
        }
        let glyph = line.remove(pos.column);
        self.dirty.expand_line(pos.line);
        Some(glyph)
    }

    /// Cuts a line at `pos`, returning everything from the column onward.
    pub fn split_off(&mut self, pos: Position) -> Line {
        let pos = self.clamp(pos);
        self.dirty.expand_line(pos.line);
        self.lines[pos.line].split_off(pos.column)
    }

    /// Moves line `line + 1` onto the end of `line`. Returns false on the
    /// last line.
    pub fn join_with_next(&mut self, line: usize) -> bool {
        if line + 1 >= self.lines.len() {
            return false;
        }
        let next = std::mem::take(&mut self.lines[line + 1]);
        self.lines[line].extend(next);
        self.delete_lines(line + 1, line + 1);
        true
    }

    /// Copies the leading spaces and tabs of a line.
    pub fn leading_blanks(&self, line: usize) -> Vec<Glyph> {
        self.lines
            .get(line)
            .map(|l| {
                l.iter()
                    .take_while(|g| g.is_blank())
                    .map(|g| Glyph::new(g.ch))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Inserts a tab at the start of a line.
    pub fn indent_line(&mut self, line: usize) {
        if line < self.lines.len() {
            self.insert_glyph(Position::new(line, 0), Glyph::new(b'\t'));
        }
    }

    /// Removes one leading tab, or up to `tab_size` leading spaces.
    ///
    /// Returns the number of glyphs removed.
    pub fn outdent_line(&mut self, line: usize, tab_size: usize) -> usize {
        let Some(glyphs) = self.lines.get(line) else {
            return 0;
        };

        let count = match glyphs.first().map(|g| g.ch) {
            Some(b'\t') => 1,
            Some(b' ') => glyphs
                .iter()
                .take(tab_size)
                .take_while(|g| g.ch == b' ')
                .count(),
            _ => 0,
        };

        if count > 0 {
            self.lines[line].drain(..count);
            self.dirty.expand_line(line);
        }
        count
    }

    // ==================== Colorization support ====================

    /// Pending dirty range.
    pub fn dirty(&self) -> &DirtyRange {
        &self.dirty
    }

    /// Marks the whole document dirty.
    pub fn mark_all_dirty(&mut self) {
        self.dirty.mark_all(self.lines.len());
    }

    /// Takes the next batch of at most `max_lines` dirty lines.
    pub fn take_dirty_batch(&mut self, max_lines: usize) -> Option<Range<usize>> {
        self.dirty.take_batch(max_lines, self.lines.len())
    }

    /// Sets the class of one glyph. Returns false if there is none.
    ///
    /// Recoloring is not a text change and does not touch the dirty range.
    pub fn set_class(&mut self, line: usize, column: usize, class: ColorClass) -> bool {
        match self.lines.get_mut(line).and_then(|l| l.get_mut(column)) {
            Some(glyph) => {
                glyph.class = class;
                true
            }
            None => false,
        }
    }

    /// Resets every glyph in the given lines to the default class.
    pub fn reset_classes(&mut self, lines: Range<usize>) {
        let end = lines.end.min(self.lines.len());
        let start = lines.start.min(end);
        for line in &mut self.lines[start..end] {
            for glyph in line.iter_mut() {
                glyph.class = ColorClass::Default;
            }
        }
    }

    // ==================== Error markers ====================

    /// Records a diagnostic for a line.
    pub fn add_error(&mut self, line: usize, message: impl Into<String>) {
        self.markers.insert(line, message);
    }

    /// Returns the diagnostic for a line, if any.
    pub fn error(&self, line: usize) -> Option<&str> {
        self.markers.get(line)
    }

    /// All markers.
    pub fn errors(&self) -> &ErrorMarkers {
        &self.markers
    }

    pub fn clear_errors(&mut self) {
        self.markers.clear();
    }

    /// Returns the normalized, clamped pair of positions.
    pub fn clamp_range(&self, a: Position, b: Position) -> (Position, Position) {
        normalize(self.clamp(a), self.clamp(b))
    }
}

impl Default for GlyphBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for GlyphBuffer {
    fn from(s: &str) -> Self {
        let mut buffer = Self::new();
        buffer.set_text(s);
        buffer
    }
}

impl From<String> for GlyphBuffer {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}
