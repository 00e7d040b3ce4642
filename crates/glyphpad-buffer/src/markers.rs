//! Line-keyed diagnostic markers.
//!
//! Markers are supplied from outside (a compiler, a linter) and only stored
//! here. The buffer renumbers them whenever lines are inserted or removed so
//! a marker keeps pointing at the same text.

use std::collections::BTreeMap;

/// Mapping from line number to diagnostic text, one message per line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorMarkers {
    markers: BTreeMap<usize, String>,
}

impl ErrorMarkers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a marker. An existing marker on the same line is kept.
    pub fn insert(&mut self, line: usize, message: impl Into<String>) {
        self.markers.entry(line).or_insert_with(|| message.into());
    }

    /// Returns the message for a line, if any.
    pub fn get(&self, line: usize) -> Option<&str> {
        self.markers.get(&line).map(String::as_str)
    }

    /// Iterates markers in line order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.markers.iter().map(|(&line, msg)| (line, msg.as_str()))
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn clear(&mut self) {
        self.markers.clear();
    }

    /// Renumbers after `count` lines were inserted at `at`.
    ///
    /// Every key `>= at` moves up by `count`. A key pushed past
    /// `usize::MAX` names no line and is dropped.
    pub fn shift_for_insert(&mut self, at: usize, count: usize) {
        if count == 0 {
            return;
        }
        let moved = self.markers.split_off(&at);
        self.markers.extend(
            moved
                .into_iter()
                .filter_map(|(line, msg)| Some((line.checked_add(count)?, msg))),
        );
    }

    /// Renumbers after lines `[first, last]` were removed.
    ///
    /// Keys inside the range are dropped, keys above `last` move down by
    /// the number of removed lines.
    pub fn shift_for_delete(&mut self, first: usize, last: usize) {
        if last < first {
            return;
        }
        let removed = last - first + 1;
        let mut tail = self.markers.split_off(&first);
        let above = match last.checked_add(1) {
            Some(next) => tail.split_off(&next),
            None => BTreeMap::new(),
        };
        drop(tail);
        self.markers
            .extend(above.into_iter().map(|(line, msg)| (line - removed, msg)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ErrorMarkers {
        let mut markers = ErrorMarkers::new();
        markers.insert(2, "a");
        markers.insert(5, "b");
        markers
    }

    fn collect(markers: &ErrorMarkers) -> Vec<(usize, String)> {
        markers.iter().map(|(l, m)| (l, m.to_string())).collect()
    }

    #[test]
    fn test_insert_shifts_keys_at_or_above() {
        let mut markers = sample();
        markers.shift_for_insert(1, 2);
        assert_eq!(collect(&markers), vec![(4, "a".into()), (7, "b".into())]);

        let mut markers = sample();
        markers.shift_for_insert(2, 1);
        assert_eq!(collect(&markers), vec![(3, "a".into()), (6, "b".into())]);

        let mut markers = sample();
        markers.shift_for_insert(6, 3);
        assert_eq!(collect(&markers), vec![(2, "a".into()), (5, "b".into())]);
    }

    #[test]
    fn test_delete_drops_inside_and_shifts_above() {
        let mut markers = sample();
        markers.shift_for_delete(3, 3);
        assert_eq!(collect(&markers), vec![(2, "a".into()), (4, "b".into())]);

        let mut markers = sample();
        markers.shift_for_delete(2, 4);
        assert_eq!(collect(&markers), vec![(2, "b".into())]);

        let mut markers = sample();
        markers.shift_for_delete(0, 10);
        assert!(markers.is_empty());
    }

    #[test]
    fn test_shift_near_usize_max() {
        let mut markers = ErrorMarkers::new();
        markers.insert(1, "near");
        markers.insert(usize::MAX - 1, "high");
        markers.insert(usize::MAX, "far");

        markers.shift_for_insert(0, 1);
        assert_eq!(
            collect(&markers),
            vec![(2, "near".into()), (usize::MAX, "high".into())]
        );

        markers.shift_for_delete(5, usize::MAX);
        assert_eq!(collect(&markers), vec![(2, "near".into())]);
    }

    #[test]
    fn test_duplicate_line_keeps_first_message() {
        let mut markers = ErrorMarkers::new();
        markers.insert(3, "first");
        markers.insert(3, "second");
        assert_eq!(markers.get(3), Some("first"));
        assert_eq!(markers.len(), 1);
    }
}
