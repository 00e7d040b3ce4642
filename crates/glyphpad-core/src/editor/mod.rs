//! The editing session.
//!
//! ## Learning: The Facade Pattern
//!
//! `Editor` is the one object a host talks to. It owns the buffer, the
//! cursor, the selection and the colorizer, and keeps them consistent:
//! every method leaves the cursor inside the document and the selection
//! normalized.
//!
//! The implementation is split by concern:
//! - `mod.rs`: state, accessors, selection, clipboard, diagnostics
//! - `navigation.rs`: cursor movement
//! - `editing.rs`: insertion, deletion, indentation

mod editing;
mod navigation;

use std::fmt;
use std::ops::Range;

use glyphpad_buffer::{AnchorPair, ErrorMarkers, GlyphBuffer, Position, Selection, SelectionMode};
use glyphpad_syntax::Colorizer;
use tracing::{debug, warn};

use crate::clipboard::{Clipboard, MemoryClipboard};
use crate::config::EditorConfig;

/// One editing session over one document.
///
/// ## Thread Safety
///
/// `Editor` is owned by a single thread. Nothing inside blocks or
/// suspends, so callers that receive intents from several sources
/// serialize them before calling in.
pub struct Editor {
    /// The document
    buffer: GlyphBuffer,

    /// Assigns color classes to dirty lines
    colorizer: Colorizer,

    /// Copy/paste transport
    clipboard: Box<dyn Clipboard>,

    /// Always within the document
    cursor: Position,

    /// Raw endpoints of the current selection gesture
    anchors: AnchorPair,

    /// Normalized, snapped selection
    selection: Selection,

    /// Column vertical moves aim for
    preferred_column: Option<usize>,

    /// Characters per tab stop, at least 1
    tab_size: usize,

    /// Typed characters replace the glyph under the cursor
    overwrite: bool,
}

impl Editor {
    /// Creates an empty session with the FX colorizer and a memory clipboard.
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    /// Creates an empty session with custom configuration.
    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            buffer: GlyphBuffer::new(),
            colorizer: Colorizer::default(),
            clipboard: Box::new(MemoryClipboard::new()),
            cursor: Position::ZERO,
            anchors: AnchorPair::default(),
            selection: Selection::default(),
            preferred_column: None,
            tab_size: config.tab_size.max(1),
            overwrite: config.overwrite,
        }
    }

    /// Replaces the colorizer; the whole document is recolored.
    pub fn with_colorizer(mut self, colorizer: Colorizer) -> Self {
        self.colorizer = colorizer;
        self.buffer.mark_all_dirty();
        self
    }

    pub fn with_clipboard(mut self, clipboard: impl Clipboard + 'static) -> Self {
        self.clipboard = Box::new(clipboard);
        self
    }

    // ==================== Accessors ====================

    pub fn buffer(&self) -> &GlyphBuffer {
        &self.buffer
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn anchors(&self) -> AnchorPair {
        self.anchors
    }

    pub fn has_selection(&self) -> bool {
        !self.selection.is_empty()
    }

    /// The whole document as text.
    pub fn text(&self) -> String {
        self.buffer.text()
    }

    /// The document's raw bytes; see [`GlyphBuffer::text_bytes`].
    pub fn text_bytes(&self) -> Vec<u8> {
        self.buffer.text_bytes()
    }

    /// The text of a range; see [`GlyphBuffer::text_range`].
    pub fn text_range(&self, begin: Position, end: Position) -> String {
        self.buffer.text_range(begin, end)
    }

    pub fn text_range_bytes(&self, begin: Position, end: Position) -> Vec<u8> {
        self.buffer.text_range_bytes(begin, end)
    }

    pub fn selected_text(&self) -> String {
        self.buffer.text_range(self.selection.begin, self.selection.end)
    }

    pub fn current_line_text(&self) -> String {
        self.buffer.line_text(self.cursor.line)
    }

    pub fn tab_size(&self) -> usize {
        self.tab_size
    }

    /// Sets the tab width; 0 is treated as 1.
    pub fn set_tab_size(&mut self, tab_size: usize) {
        self.tab_size = tab_size.max(1);
    }

    pub fn overwrite(&self) -> bool {
        self.overwrite
    }

    pub fn set_overwrite(&mut self, overwrite: bool) {
        self.overwrite = overwrite;
    }

    pub fn toggle_overwrite(&mut self) {
        self.overwrite = !self.overwrite;
    }

    /// Replaces the document and resets cursor and selection to the start.
    pub fn set_text(&mut self, text: &str) {
        self.set_bytes(text.as_bytes());
    }

    /// Like [`Editor::set_text`], for input that need not be UTF-8.
    pub fn set_bytes(&mut self, bytes: &[u8]) {
        self.buffer.set_bytes(bytes);
        self.collapse_to(Position::ZERO);
    }

    // ==================== Selection ====================

    /// Selects between two positions, snapped according to `mode`.
    ///
    /// The anchors become `(a, b)` and the cursor moves to `b`.
    pub fn select(&mut self, a: Position, b: Position, mode: SelectionMode) {
        let a = self.buffer.clamp(a);
        let b = self.buffer.clamp(b);
        self.anchors = AnchorPair { a, b };
        self.cursor = b;
        self.preferred_column = None;
        self.reselect(mode);
    }

    /// Selects the whole document.
    pub fn select_all(&mut self) {
        self.select(Position::ZERO, self.buffer.end_position(), SelectionMode::Normal);
    }

    /// Starts a pointer gesture at `pos`: click (normal), double click
    /// (word) or triple click (line).
    pub fn begin_gesture(&mut self, pos: Position, mode: SelectionMode) {
        let pos = self.buffer.clamp(pos);
        self.cursor = pos;
        self.anchors = AnchorPair::collapsed(pos);
        self.preferred_column = None;
        self.reselect(mode);
    }

    /// Drags the gesture started by [`Editor::begin_gesture`] to `pos`.
    pub fn extend_gesture(&mut self, pos: Position) {
        let pos = self.buffer.clamp(pos);
        self.cursor = pos;
        self.anchors.drag_to(pos);
        self.preferred_column = None;
        self.reselect(SelectionMode::Normal);
    }

    /// Recomputes the selection from the anchors.
    fn reselect(&mut self, mode: SelectionMode) {
        self.selection = Selection::snapped(self.anchors.a, self.anchors.b, mode, &self.buffer);
    }

    /// Puts the cursor at `pos` (clamped) with no selection.
    fn collapse_to(&mut self, pos: Position) {
        let pos = self.buffer.clamp(pos);
        self.cursor = pos;
        self.anchors = AnchorPair::collapsed(pos);
        self.selection = Selection::cursor(pos);
        self.preferred_column = None;
    }

    // ==================== Clipboard ====================

    /// Copies the selection, or the current line when nothing is selected.
    pub fn copy(&mut self) {
        let text = if self.has_selection() {
            self.selected_text()
        } else {
            self.current_line_text()
        };
        if let Err(err) = self.clipboard.write(&text) {
            warn!("Copy failed: {}", err);
        }
    }

    /// Copies and deletes the selection. No-op without a selection.
    pub fn cut(&mut self) {
        if !self.has_selection() {
            return;
        }
        let text = self.selected_text();
        match self.clipboard.write(&text) {
            Ok(()) => self.delete_selection(),
            Err(err) => warn!("Cut failed: {}", err),
        }
    }

    /// Replaces the selection with the clipboard text, if there is any.
    pub fn paste(&mut self) {
        let text = match self.clipboard.read() {
            Ok(Some(text)) if !text.is_empty() => text,
            Ok(_) => return,
            Err(err) => {
                warn!("Paste failed: {}", err);
                return;
            }
        };
        debug!(bytes = text.len(), "paste");
        self.insert_text(&text);
    }

    // ==================== Diagnostics ====================

    /// Attaches a diagnostic message to a line.
    pub fn add_error(&mut self, line: usize, message: impl Into<String>) {
        self.buffer.add_error(line, message);
    }

    pub fn error(&self, line: usize) -> Option<&str> {
        self.buffer.error(line)
    }

    pub fn errors(&self) -> &ErrorMarkers {
        self.buffer.errors()
    }

    pub fn clear_errors(&mut self) {
        self.buffer.clear_errors();
    }

    // ==================== Colorization ====================

    /// Recolors the next batch of dirty lines; call once per frame.
    pub fn colorize(&mut self) -> Option<Range<usize>> {
        self.colorizer.colorize(&mut self.buffer)
    }

    /// Recolors every dirty line. Returns the number of batches.
    pub fn colorize_all(&mut self) -> usize {
        self.colorizer.colorize_all(&mut self.buffer)
    }

    /// Forces the whole document to be recolored.
    pub fn mark_all_dirty(&mut self) {
        self.buffer.mark_all_dirty();
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Editor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Editor")
            .field("lines", &self.buffer.line_count())
            .field("cursor", &self.cursor)
            .field("selection", &self.selection)
            .field("tab_size", &self.tab_size)
            .field("overwrite", &self.overwrite)
            .finish_non_exhaustive()
    }
}
