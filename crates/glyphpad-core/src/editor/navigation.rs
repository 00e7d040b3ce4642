//! Cursor movement.
//!
//! Every move follows the same steps: compute the new cursor, clamp it, then
//! either extend the anchor that sat at the old cursor or collapse both
//! anchors onto the new one, and reselect.

use glyphpad_buffer::{AnchorPair, Position, SelectionMode};
use tracing::trace;

use super::Editor;

impl Editor {
    /// Moves the cursor to `next`, extending or collapsing the selection.
    fn move_to(&mut self, next: Position, extend: bool, mode: SelectionMode) {
        let prev = self.cursor;
        self.cursor = self.buffer.clamp(next);

        if extend {
            self.anchors.extend(prev, self.cursor);
        } else {
            self.anchors = AnchorPair::collapsed(self.cursor);
        }
        self.reselect(mode);
        trace!(from = %prev, to = %self.cursor, extend, "cursor moved");
    }

    /// Horizontal moves forget the column vertical moves aim for.
    fn move_horizontally(&mut self, next: Position, extend: bool, word: bool) {
        self.preferred_column = None;
        let mode = if extend && word {
            SelectionMode::Word
        } else {
            SelectionMode::Normal
        };
        self.move_to(next, extend, mode);
    }

    fn move_vertically(&mut self, line: usize, extend: bool) {
        let column = self.preferred_column.unwrap_or(self.cursor.column);
        self.move_to(Position::new(line, column), extend, SelectionMode::Normal);
        self.preferred_column = Some(column);
    }

    /// Moves up `amount` lines, stopping at the first.
    pub fn move_up(&mut self, amount: usize, extend: bool) {
        let line = self.cursor.line.saturating_sub(amount);
        self.move_vertically(line, extend);
    }

    /// Moves down `amount` lines, stopping at the last.
    pub fn move_down(&mut self, amount: usize, extend: bool) {
        let line = self.cursor.line.saturating_add(amount);
        self.move_vertically(line, extend);
    }

    /// Moves left `amount` glyphs, wrapping to the end of the previous line.
    ///
    /// `word` snaps an extended selection to whole words.
    pub fn move_left(&mut self, amount: usize, extend: bool, word: bool) {
        let mut pos = self.cursor;
        for _ in 0..amount {
            if pos.column > 0 {
                pos.column -= 1;
            } else if pos.line > 0 {
                pos.line -= 1;
                pos.column = self.buffer.line_len(pos.line);
            } else {
                break;
            }
        }
        self.move_horizontally(pos, extend, word);
    }

    /// Moves right `amount` glyphs, wrapping to the start of the next line.
    ///
    /// `word` snaps an extended selection to whole words.
    pub fn move_right(&mut self, amount: usize, extend: bool, word: bool) {
        let mut pos = self.cursor;
        let last_line = self.buffer.line_count() - 1;
        for _ in 0..amount {
            if pos.column < self.buffer.line_len(pos.line) {
                pos.column += 1;
            } else if pos.line < last_line {
                pos.line += 1;
                pos.column = 0;
            } else {
                break;
            }
        }
        self.move_horizontally(pos, extend, word);
    }

    /// Moves to the start of the current line.
    pub fn move_home(&mut self, extend: bool) {
        self.move_horizontally(self.cursor.line_start(), extend, false);
    }

    /// Moves to the end of the current line.
    pub fn move_end(&mut self, extend: bool) {
        let line = self.cursor.line;
        let end = Position::new(line, self.buffer.line_len(line));
        self.move_horizontally(end, extend, false);
    }

    /// Moves to the start of the document.
    pub fn move_top(&mut self, extend: bool) {
        self.move_horizontally(Position::ZERO, extend, false);
    }

    /// Moves to the end of the document.
    pub fn move_bottom(&mut self, extend: bool) {
        self.move_horizontally(self.buffer.end_position(), extend, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphpad_buffer::Selection;

    fn p(line: usize, column: usize) -> Position {
        Position::new(line, column)
    }

    fn editor(text: &str) -> Editor {
        let mut editor = Editor::new();
        editor.set_text(text);
        editor
    }

    #[test]
    fn test_left_right_wrap() {
        let mut editor = editor("ab\ncd");
        editor.move_right(2, false, false);
        assert_eq!(editor.cursor(), p(0, 2));
        editor.move_right(1, false, false);
        assert_eq!(editor.cursor(), p(1, 0));
        editor.move_left(1, false, false);
        assert_eq!(editor.cursor(), p(0, 2));
    }

    #[test]
    fn test_moves_stop_at_buffer_edges() {
        let mut editor = editor("ab\ncd");
        editor.move_left(5, false, false);
        assert_eq!(editor.cursor(), p(0, 0));
        editor.move_right(100, false, false);
        assert_eq!(editor.cursor(), p(1, 2));
        editor.move_down(3, false);
        assert_eq!(editor.cursor(), p(1, 2));
        editor.move_up(9, false);
        assert_eq!(editor.cursor(), p(0, 2));
    }

    #[test]
    fn test_vertical_keeps_preferred_column() {
        let mut editor = editor("long line\nab\nanother line");
        editor.move_right(7, false, false);
        editor.move_down(1, false);
        assert_eq!(editor.cursor(), p(1, 2));
        editor.move_down(1, false);
        assert_eq!(editor.cursor(), p(2, 7));

        // a horizontal move resets the goal
        editor.move_up(1, false);
        editor.move_left(1, false, false);
        editor.move_down(1, false);
        assert_eq!(editor.cursor(), p(2, 1));
    }

    #[test]
    fn test_home_end_top_bottom() {
        let mut editor = editor("abc\ndef\ngh");
        editor.move_down(1, false);
        editor.move_end(false);
        assert_eq!(editor.cursor(), p(1, 3));
        editor.move_home(false);
        assert_eq!(editor.cursor(), p(1, 0));
        editor.move_bottom(false);
        assert_eq!(editor.cursor(), p(2, 2));
        editor.move_top(false);
        assert_eq!(editor.cursor(), p(0, 0));
    }

    #[test]
    fn test_shift_extends_same_end() {
        let mut editor = editor("abcdef");
        editor.move_right(2, false, false);
        editor.move_right(2, true, false);
        assert_eq!(editor.selection(), Selection::new(p(0, 2), p(0, 4)));

        // moving back past the start keeps extending the moving end
        editor.move_left(3, true, false);
        assert_eq!(editor.selection(), Selection::new(p(0, 1), p(0, 2)));
        assert_eq!(editor.cursor(), p(0, 1));
    }

    #[test]
    fn test_moving_without_extend_collapses() {
        let mut editor = editor("abcdef");
        editor.move_right(3, true, false);
        assert!(editor.has_selection());
        editor.move_right(1, false, false);
        assert!(!editor.has_selection());
        assert_eq!(editor.anchors(), AnchorPair::collapsed(p(0, 4)));
    }

    #[test]
    fn test_extend_after_select_all() {
        let mut editor = editor("ab\ncd");
        editor.select_all();
        editor.move_left(1, true, false);
        assert_eq!(editor.selection(), Selection::new(p(0, 0), p(1, 1)));
    }

    #[test]
    fn test_shift_word_snaps() {
        let mut editor = editor("int value;");
        editor.colorize_all();
        editor.move_right(5, false, false);
        editor.move_right(1, true, true);
        assert_eq!(editor.selected_text(), "value");
    }

    #[test]
    fn test_extend_vertically() {
        let mut editor = editor("abc\ndef");
        editor.move_right(1, false, false);
        editor.move_down(1, true);
        assert_eq!(editor.selected_text(), "bc\nd");
        editor.move_bottom(true);
        assert_eq!(editor.selected_text(), "bc\ndef");
    }
}
