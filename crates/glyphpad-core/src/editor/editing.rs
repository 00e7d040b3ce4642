//! Insertion, deletion and indentation.
//!
//! Edits go through the buffer's primitives, which keep markers and the
//! dirty range in step. This layer only decides where the cursor and the
//! selection end up.

use glyphpad_buffer::{AnchorPair, Glyph, Position, Selection, SelectionMode};
use tracing::{debug, trace};

use super::Editor;

impl Editor {
    /// Types one character at the cursor.
    ///
    /// With a selection, a tab indents every selected line (or outdents
    /// them when `shift` is held) and any other character replaces the
    /// selection. A newline splits the line and carries its leading
    /// blanks over to the new one.
    pub fn insert_character(&mut self, ch: u8, shift: bool) {
        if self.has_selection() {
            if ch == b'\t' {
                self.indent_selection(shift);
                return;
            }
            self.delete_selection();
        }

        self.preferred_column = None;
        let cursor = self.cursor;

        if ch == b'\n' {
            let mut new_line = self.buffer.leading_blanks(cursor.line);
            let indentation = new_line.len();
            new_line.extend(self.buffer.split_off(cursor));
            *self.buffer.insert_line(cursor.line + 1) = new_line;
            self.collapse_to(Position::new(cursor.line + 1, indentation));
        } else {
            let glyph = Glyph::new(ch);
            if !(self.overwrite && self.buffer.overwrite_glyph(cursor, glyph)) {
                self.buffer.insert_glyph(cursor, glyph);
            }
            self.collapse_to(Position::new(cursor.line, cursor.column + 1));
        }
        trace!(ch, cursor = %self.cursor, "character inserted");
    }

    /// Inserts text verbatim at the cursor, replacing any selection.
    ///
    /// Unlike [`Editor::insert_character`] there is no tab indentation,
    /// overwrite or auto-indent. `'\r'` is dropped.
    pub fn insert_text(&mut self, text: &str) {
        if self.has_selection() {
            self.delete_selection();
        }

        let mut pos = self.cursor;
        for byte in text.bytes() {
            match byte {
                b'\r' => {}
                b'\n' => {
                    let tail = self.buffer.split_off(pos);
                    *self.buffer.insert_line(pos.line + 1) = tail;
                    pos = Position::new(pos.line + 1, 0);
                }
                _ => {
                    self.buffer.insert_glyph(pos, Glyph::new(byte));
                    pos.column += 1;
                }
            }
        }

        self.collapse_to(pos);
        debug!(bytes = text.len(), cursor = %pos, "text inserted");
    }

    /// Deletes the glyph after the cursor, joining the next line at the
    /// end of a line. Deletes the selection instead if there is one.
    pub fn delete_next(&mut self) {
        if self.has_selection() {
            self.delete_selection();
            return;
        }

        let cursor = self.cursor;
        if cursor.column < self.buffer.line_len(cursor.line) {
            self.buffer.remove_glyph(cursor);
        } else {
            self.buffer.join_with_next(cursor.line);
        }
        self.collapse_to(cursor);
    }

    /// Deletes the glyph before the cursor, joining onto the previous line
    /// at column 0. Deletes the selection instead if there is one.
    pub fn delete_previous(&mut self) {
        if self.has_selection() {
            self.delete_selection();
            return;
        }

        let cursor = self.cursor;
        if cursor.column > 0 {
            let pos = Position::new(cursor.line, cursor.column - 1);
            self.buffer.remove_glyph(pos);
            self.collapse_to(pos);
        } else if cursor.line > 0 {
            let join = Position::new(cursor.line - 1, self.buffer.line_len(cursor.line - 1));
            self.buffer.join_with_next(join.line);
            self.collapse_to(join);
        }
    }

    /// Deletes the selected text and collapses onto its start.
    pub fn delete_selection(&mut self) {
        let Selection { begin, end } = self.selection;
        if begin == end {
            return;
        }
        self.buffer.delete_range(begin, end);
        self.collapse_to(begin);
    }

    /// Deletes `[begin, end)`. No-op unless `end > begin`.
    ///
    /// The cursor and anchors keep pointing at the same text; positions
    /// inside the range fall back to `begin`.
    pub fn delete_range(&mut self, begin: Position, end: Position) {
        let begin = self.buffer.clamp(begin);
        let end = self.buffer.clamp(end);
        if end <= begin {
            return;
        }

        self.buffer.delete_range(begin, end);
        self.cursor = shift_for_delete(self.cursor, begin, end);
        self.anchors = AnchorPair {
            a: shift_for_delete(self.anchors.a, begin, end),
            b: shift_for_delete(self.anchors.b, begin, end),
        };
        self.preferred_column = None;
        self.reselect(SelectionMode::Normal);
    }

    /// Deletes lines `[first, last]`. Deleting every line leaves one empty
    /// line. The cursor stays on the same text, or moves to the start of
    /// the line that took the deleted block's place.
    pub fn delete_lines(&mut self, first: usize, last: usize) {
        let last = last.min(self.buffer.line_count() - 1);
        if first > last {
            return;
        }

        self.buffer.delete_lines(first, last);
        let cursor = if self.cursor.line > last {
            Position::new(self.cursor.line - (last - first + 1), self.cursor.column)
        } else if self.cursor.line >= first {
            Position::new(first, 0)
        } else {
            self.cursor
        };
        self.collapse_to(cursor);
    }

    /// Indents (or outdents) every line touched by the selection.
    ///
    /// A selection ending at column 0 leaves that last line alone. The
    /// selection is rewritten to start at column 0 of its first line.
    fn indent_selection(&mut self, outdent: bool) {
        let Selection { begin, end } = self.selection;
        let last = if end.column == 0 && end.line > begin.line {
            end.line - 1
        } else {
            end.line
        };

        let mut end_column = end.column;
        for line in begin.line..=last {
            if outdent {
                let removed = self.buffer.outdent_line(line, self.tab_size);
                if line == end.line {
                    end_column = end_column.saturating_sub(removed);
                }
            } else {
                self.buffer.indent_line(line);
                if line == end.line {
                    end_column += 1;
                }
            }
        }

        let begin = Position::new(begin.line, 0);
        let end = Position::new(end.line, end_column);
        debug!(first = begin.line, last, outdent, "selection indented");
        self.select(begin, end, SelectionMode::Normal);
    }
}

/// Where `pos` ends up once `[begin, end)` is deleted.
fn shift_for_delete(pos: Position, begin: Position, end: Position) -> Position {
    if pos <= begin {
        pos
    } else if pos < end {
        begin
    } else if pos.line == end.line {
        Position::new(begin.line, begin.column + pos.column - end.column)
    } else {
        Position::new(pos.line - (end.line - begin.line), pos.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn p(line: usize, column: usize) -> Position {
        Position::new(line, column)
    }

    fn editor(text: &str) -> Editor {
        let mut editor = Editor::new();
        editor.set_text(text);
        editor
    }

    fn lines(editor: &Editor) -> Vec<String> {
        (0..editor.buffer().line_count())
            .map(|i| editor.buffer().line_text(i))
            .collect()
    }

    #[test]
    fn test_insert_characters() {
        let mut editor = editor("");
        for ch in b"abc" {
            editor.insert_character(*ch, false);
        }
        assert_eq!(editor.text(), "abc");
        assert_eq!(editor.cursor(), p(0, 3));
    }

    #[test]
    fn test_overwrite_mode() {
        let mut editor = editor("abc");
        editor.set_overwrite(true);
        editor.insert_character(b'x', false);
        assert_eq!(editor.text(), "xbc");

        // past the end there is nothing to replace
        editor.move_end(false);
        editor.insert_character(b'd', false);
        assert_eq!(editor.text(), "xbcd");
    }

    #[test]
    fn test_newline_auto_indent() {
        let mut editor = editor("  foo");
        editor.move_end(false);
        editor.insert_character(b'\n', false);
        assert_eq!(lines(&editor), vec!["  foo", "  "]);
        assert_eq!(editor.cursor(), p(1, 2));
    }

    #[test]
    fn test_newline_splits_line() {
        let mut editor = editor("\tab cd");
        editor.move_right(3, false, false);
        editor.insert_character(b'\n', false);
        assert_eq!(lines(&editor), vec!["\tab", "\t cd"]);
        assert_eq!(editor.cursor(), p(1, 1));
    }

    #[test]
    fn test_character_replaces_selection() {
        let mut editor = editor("hello");
        editor.select(p(0, 1), p(0, 4), SelectionMode::Normal);
        editor.insert_character(b'E', false);
        assert_eq!(editor.text(), "hEo");
        assert_eq!(editor.cursor(), p(0, 2));
    }

    #[test]
    fn test_indent_and_outdent() {
        let mut editor = editor("abc\ndef");
        editor.select(p(0, 0), p(1, 3), SelectionMode::Normal);
        editor.insert_character(b'\t', false);
        assert_eq!(lines(&editor), vec!["\tabc", "\tdef"]);
        assert_eq!(editor.selection(), Selection::new(p(0, 0), p(1, 4)));

        editor.insert_character(b'\t', true);
        assert_eq!(lines(&editor), vec!["abc", "def"]);
        assert_eq!(editor.selection(), Selection::new(p(0, 0), p(1, 3)));
    }

    #[test]
    fn test_outdent_spaces() {
        let mut editor = editor("      a\n  b\n\nc");
        editor.select_all();
        editor.insert_character(b'\t', true);
        assert_eq!(lines(&editor), vec!["  a", "b", "", "c"]);
    }

    #[test]
    fn test_indent_skips_line_at_column_zero() {
        let mut editor = editor("a\nb\nc");
        editor.select(p(0, 0), p(2, 0), SelectionMode::Normal);
        editor.insert_character(b'\t', false);
        assert_eq!(lines(&editor), vec!["\ta", "\tb", "c"]);
        assert_eq!(editor.selection(), Selection::new(p(0, 0), p(2, 0)));
    }

    #[test]
    fn test_insert_text() {
        let mut editor = editor("ad");
        editor.move_right(1, false, false);
        editor.insert_text("b\r\n  c");
        assert_eq!(lines(&editor), vec!["ab", "  cd"]);
        assert_eq!(editor.cursor(), p(1, 3));
    }

    #[test]
    fn test_insert_text_ignores_tab_and_overwrite() {
        let mut editor = editor("xy");
        editor.set_overwrite(true);
        editor.insert_text("\t");
        assert_eq!(editor.text(), "\txy");
    }

    #[test]
    fn test_delete_next_joins_lines() {
        let mut editor = editor("foo\nbar");
        editor.move_end(false);
        editor.delete_next();
        assert_eq!(lines(&editor), vec!["foobar"]);
        assert_eq!(editor.cursor(), p(0, 3));
    }

    #[test]
    fn test_delete_next_at_end_is_noop() {
        let mut editor = editor("ab");
        editor.move_bottom(false);
        editor.delete_next();
        assert_eq!(editor.text(), "ab");
        editor.move_top(false);
        editor.delete_next();
        assert_eq!(editor.text(), "b");
    }

    #[test]
    fn test_delete_previous() {
        let mut editor = editor("foo\nbar");
        editor.delete_previous();
        assert_eq!(editor.text(), "foo\nbar");

        editor.move_down(1, false);
        editor.move_home(false);
        editor.delete_previous();
        assert_eq!(editor.text(), "foobar");
        assert_eq!(editor.cursor(), p(0, 3));

        editor.delete_previous();
        assert_eq!(editor.text(), "fobar");
        assert_eq!(editor.cursor(), p(0, 2));
    }

    #[test]
    fn test_delete_selection() {
        let mut editor = editor("one\ntwo\nthree");
        editor.select(p(0, 1), p(2, 2), SelectionMode::Normal);
        editor.delete_previous();
        assert_eq!(editor.text(), "oree");
        assert_eq!(editor.cursor(), p(0, 1));
        assert!(!editor.has_selection());

        // zero-width selection is a no-op
        editor.delete_selection();
        assert_eq!(editor.text(), "oree");
    }

    #[test]
    fn test_delete_range_keeps_cursor_on_text() {
        let mut editor = editor("abc\ndef\nghi");
        editor.move_bottom(false);
        editor.delete_range(p(0, 1), p(1, 2));
        assert_eq!(lines(&editor), vec!["af", "ghi"]);
        assert_eq!(editor.cursor(), p(1, 3));

        editor.delete_range(p(1, 0), p(1, 0));
        assert_eq!(lines(&editor), vec!["af", "ghi"]);
    }

    #[test]
    fn test_delete_lines() {
        let mut editor = editor("a\nb\nc\nd");
        editor.move_bottom(false);
        editor.delete_lines(1, 2);
        assert_eq!(lines(&editor), vec!["a", "d"]);
        assert_eq!(editor.cursor(), p(1, 1));

        editor.delete_lines(0, 10);
        assert_eq!(lines(&editor), vec![""]);
        assert_eq!(editor.cursor(), p(0, 0));
    }

    #[test]
    fn test_shift_for_delete() {
        let (begin, end) = (p(1, 2), p(3, 4));
        assert_eq!(shift_for_delete(p(0, 9), begin, end), p(0, 9));
        assert_eq!(shift_for_delete(p(2, 0), begin, end), begin);
        assert_eq!(shift_for_delete(p(3, 6), begin, end), p(1, 4));
        assert_eq!(shift_for_delete(p(5, 1), begin, end), p(3, 1));
    }

    /// Arbitrary edit a session can receive.
    #[derive(Debug, Clone)]
    enum Op {
        Char(u8),
        Text(String),
        Next,
        Previous,
        Lines(usize, usize),
        Left(usize),
        Down(usize),
        SelectAll,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            prop::sample::select(b"ab \t\n".to_vec()).prop_map(Op::Char),
            "[a-c\n]{0,6}".prop_map(Op::Text),
            Just(Op::Next),
            Just(Op::Previous),
            (0usize..4, 0usize..4).prop_map(|(a, b)| Op::Lines(a, b)),
            (0usize..5).prop_map(Op::Left),
            (0usize..3).prop_map(Op::Down),
            Just(Op::SelectAll),
        ]
    }

    proptest! {
        #[test]
        fn prop_insert_then_delete_restores(
            text in "[a-z\n]{0,40}",
            insert in "[a-z \n]{0,20}",
            line in 0usize..8,
            column in 0usize..12,
        ) {
            let mut editor = editor(&text);
            editor.select(p(line, column), p(line, column), SelectionMode::Normal);
            let at = editor.cursor();

            editor.insert_text(&insert);
            let end = editor.cursor();
            editor.delete_range(at, end);

            prop_assert_eq!(editor.text(), text);
        }

        #[test]
        fn prop_document_never_empty(ops in prop::collection::vec(op(), 0..40)) {
            let mut editor = editor("seed\ntext");
            for op in ops {
                match op {
                    Op::Char(ch) => editor.insert_character(ch, false),
                    Op::Text(text) => editor.insert_text(&text),
                    Op::Next => editor.delete_next(),
                    Op::Previous => editor.delete_previous(),
                    Op::Lines(a, b) => editor.delete_lines(a, b),
                    Op::Left(n) => editor.move_left(n, true, false),
                    Op::Down(n) => editor.move_down(n, false),
                    Op::SelectAll => editor.select_all(),
                }
                prop_assert!(editor.buffer().line_count() >= 1);
                prop_assert_eq!(editor.buffer().clamp(editor.cursor()), editor.cursor());
                let selection = editor.selection();
                prop_assert!(selection.begin <= selection.end);
            }
        }
    }
}
