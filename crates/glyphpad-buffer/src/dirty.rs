//! Dirty line tracking for re-colorization.
//!
//! The range is half-open `[begin, end)`. "Nothing pending" is the sentinel
//! `begin = usize::MAX, end = 0`, which makes `expand` a plain min/max.

use std::ops::Range;

/// Half-open line interval whose colorization is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirtyRange {
    begin: usize,
    end: usize,
}

impl DirtyRange {
    /// A range with no pending work.
    pub const CLEAN: DirtyRange = DirtyRange {
        begin: usize::MAX,
        end: 0,
    };

    pub fn new() -> Self {
        Self::CLEAN
    }

    /// Returns true if no lines are pending.
    pub fn is_empty(&self) -> bool {
        self.begin >= self.end
    }

    /// Grows the range to cover `[begin, end)` as well.
    pub fn expand(&mut self, begin: usize, end: usize) {
        if begin >= end {
            return;
        }
        self.begin = self.begin.min(begin);
        self.end = self.end.max(end);
    }

    /// Marks a single line.
    pub fn expand_line(&mut self, line: usize) {
        self.expand(line, line + 1);
    }

    /// Follows the pending lines down after a line was inserted at `at`.
    pub fn shift_for_insert(&mut self, at: usize) {
        if !self.is_empty() && at < self.end {
            self.end = self.end.saturating_add(1);
        }
    }

    /// Marks every line of a document with `line_count` lines.
    pub fn mark_all(&mut self, line_count: usize) {
        self.begin = 0;
        self.end = line_count;
    }

    pub fn reset(&mut self) {
        *self = Self::CLEAN;
    }

    /// Returns the pending range, if any.
    pub fn pending(&self) -> Option<Range<usize>> {
        (!self.is_empty()).then_some(self.begin..self.end)
    }

    /// Takes up to `max_lines` lines off the front of the range.
    ///
    /// The returned batch is clipped to `line_count`; lines marked dirty
    /// before a deletion may no longer exist. Once the range is drained it
    /// returns to the clean sentinel.
    pub fn take_batch(&mut self, max_lines: usize, line_count: usize) -> Option<Range<usize>> {
        if self.is_empty() {
            return None;
        }

        let from = self.begin;
        let to = from.saturating_add(max_lines.max(1)).min(self.end);

        if to >= self.end {
            self.reset();
        } else {
            self.begin = to;
        }

        let batch = from.min(line_count)..to.min(line_count);
        Some(batch)
    }
}

impl Default for DirtyRange {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_range_is_clean() {
        let range = DirtyRange::new();
        assert!(range.is_empty());
        assert_eq!(range.pending(), None);
    }

    #[test]
    fn test_expand_merges() {
        let mut range = DirtyRange::new();
        range.expand(4, 6);
        range.expand_line(1);
        assert_eq!(range.pending(), Some(1..6));

        // empty intervals are ignored
        range.expand(9, 9);
        assert_eq!(range.pending(), Some(1..6));
    }

    #[test]
    fn test_shift_for_insert_moves_end() {
        let mut range = DirtyRange::new();
        range.shift_for_insert(0);
        assert!(range.is_empty());

        range.expand_line(5);
        range.shift_for_insert(6);
        assert_eq!(range.pending(), Some(5..6));
        range.shift_for_insert(0);
        assert_eq!(range.pending(), Some(5..7));
    }

    #[test]
    fn test_take_batch_advances_and_resets() {
        let mut range = DirtyRange::new();
        range.mark_all(2500);

        assert_eq!(range.take_batch(1000, 2500), Some(0..1000));
        assert_eq!(range.pending(), Some(1000..2500));
        assert_eq!(range.take_batch(1000, 2500), Some(1000..2000));
        assert_eq!(range.take_batch(1000, 2500), Some(2000..2500));
        assert_eq!(range, DirtyRange::CLEAN);
        assert_eq!(range.take_batch(1000, 2500), None);
    }

    #[test]
    fn test_take_batch_clips_to_line_count() {
        let mut range = DirtyRange::new();
        range.expand(3, 10);
        assert_eq!(range.take_batch(1000, 5), Some(3..5));
        assert!(range.is_empty());
    }
}
