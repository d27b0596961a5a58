//! Row — one line of text plus its derived highlight classes.
//!
//! A `Row` owns two parallel growable arrays: the characters and one
//! [`Highlight`] class per character. Every mutating method updates the
//! characters and recomputes the highlight array before returning, so
//! the invariant `hl.len() == chars.len()` holds whenever a caller can
//! observe the row. One stored character is one display column — no
//! grapheme clustering, no width tables.
//!
//! Rows are owned exclusively by the [`Buffer`](crate::buffer::Buffer);
//! nothing aliases their contents across mutations.

use crate::highlight::{self, Highlight};

/// One line of text with per-character highlight classes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    chars: Vec<char>,
    hl: Vec<Highlight>,
}

impl Row {
    // -- Construction -------------------------------------------------------

    /// Create an empty row.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a row from a line of text (no trailing newline expected).
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let hl = highlight::scan(&chars);
        Self { chars, hl }
    }

    // -- Access -------------------------------------------------------------

    /// Number of characters in the row.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// True when the row holds no characters.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// The characters of the row.
    #[inline]
    #[must_use]
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// The highlight class of each character. Always the same length as
    /// [`chars`](Self::chars).
    #[inline]
    #[must_use]
    pub fn hl(&self) -> &[Highlight] {
        &self.hl
    }

    /// Collect the row's characters into a `String`. Allocates.
    #[must_use]
    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    /// Char-offset of the first occurrence of `query`, if any.
    ///
    /// An empty query never matches.
    #[must_use]
    pub fn find(&self, query: &str) -> Option<usize> {
        let needle: Vec<char> = query.chars().collect();
        if needle.is_empty() || needle.len() > self.chars.len() {
            return None;
        }
        self.chars
            .windows(needle.len())
            .position(|window| window == needle.as_slice())
    }

    // -- Mutation -----------------------------------------------------------
    //
    // Each method re-runs the highlighter before returning, keeping the
    // two arrays in lockstep.

    /// Insert one character at `at`, clamped to `[0, len]`.
    ///
    /// Out-of-range positions append — never an error.
    pub fn insert_char(&mut self, at: usize, ch: char) {
        let at = at.min(self.chars.len());
        self.chars.insert(at, ch);
        self.update_highlight();
    }

    /// Delete the character at `at`. No-op when `at` is out of range.
    pub fn delete_char(&mut self, at: usize) {
        if at >= self.chars.len() {
            return;
        }
        self.chars.remove(at);
        self.update_highlight();
    }

    /// Split the row at `at` (clamped to `[0, len]`).
    ///
    /// `self` keeps `[0, at)`; the returned row holds `[at, len)`. Both
    /// halves are re-highlighted.
    #[must_use = "the right half is a new row the buffer must place"]
    pub fn split(&mut self, at: usize) -> Self {
        let at = at.min(self.chars.len());
        let right_chars = self.chars.split_off(at);
        self.update_highlight();

        let hl = highlight::scan(&right_chars);
        Self {
            chars: right_chars,
            hl,
        }
    }

    /// Append `other`'s content onto this row, discarding `other`.
    pub fn join(&mut self, other: Self) {
        self.chars.extend(other.chars);
        self.update_highlight();
    }

    fn update_highlight(&mut self) {
        self.hl = highlight::scan(&self.chars);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    /// The core row invariant: the two arrays never diverge in length.
    fn assert_in_sync(row: &Row) {
        assert_eq!(row.hl().len(), row.chars().len());
    }

    // -- Construction -------------------------------------------------------

    #[test]
    fn new_row_is_empty() {
        let row = Row::new();
        assert!(row.is_empty());
        assert_eq!(row.len(), 0);
        assert_in_sync(&row);
    }

    #[test]
    fn from_text_round_trips() {
        let row = Row::from_text("hello 42");
        assert_eq!(row.text(), "hello 42");
        assert_eq!(row.len(), 8);
        assert_in_sync(&row);
    }

    #[test]
    fn from_text_highlights_on_construction() {
        let row = Row::from_text("9");
        assert_eq!(row.hl(), &[Highlight::Number]);
    }

    // -- insert_char --------------------------------------------------------

    #[test]
    fn insert_into_empty_row() {
        let mut row = Row::new();
        row.insert_char(0, 'x');
        assert_eq!(row.text(), "x");
        assert_in_sync(&row);
    }

    #[test]
    fn insert_in_middle() {
        let mut row = Row::from_text("ac");
        row.insert_char(1, 'b');
        assert_eq!(row.text(), "abc");
        assert_in_sync(&row);
    }

    #[test]
    fn insert_out_of_range_appends() {
        let mut row = Row::from_text("ab");
        row.insert_char(99, 'c');
        assert_eq!(row.text(), "abc");
        assert_in_sync(&row);
    }

    #[test]
    fn sequential_inserts_preserve_order() {
        // Inserting n chars one at a time at increasing positions yields
        // the chars concatenated in insertion order.
        let mut row = Row::new();
        for (i, ch) in "editor".chars().enumerate() {
            row.insert_char(i, ch);
            assert_in_sync(&row);
        }
        assert_eq!(row.text(), "editor");
    }

    #[test]
    fn insert_triggers_rehighlight() {
        let mut row = Row::from_text("x");
        assert_eq!(row.hl(), &[Highlight::Normal]);
        row.insert_char(0, '"');
        row.insert_char(2, '"');
        // "x" — now a complete string.
        assert_eq!(row.hl(), &[Highlight::String; 3]);
    }

    // -- delete_char --------------------------------------------------------

    #[test]
    fn delete_in_middle() {
        let mut row = Row::from_text("abc");
        row.delete_char(1);
        assert_eq!(row.text(), "ac");
        assert_in_sync(&row);
    }

    #[test]
    fn delete_out_of_range_is_noop() {
        let mut row = Row::from_text("ab");
        row.delete_char(2);
        row.delete_char(99);
        assert_eq!(row.text(), "ab");
        assert_in_sync(&row);
    }

    #[test]
    fn delete_triggers_rehighlight() {
        let mut row = Row::from_text("\"a\"");
        row.delete_char(2);
        // Unterminated string still runs to end of row.
        assert_eq!(row.hl(), &[Highlight::String; 2]);
        row.delete_char(0);
        assert_eq!(row.hl(), &[Highlight::Normal]);
    }

    // -- split / join -------------------------------------------------------

    #[test]
    fn split_in_middle() {
        let mut row = Row::from_text("hello world");
        let right = row.split(5);
        assert_eq!(row.text(), "hello");
        assert_eq!(right.text(), " world");
        assert_in_sync(&row);
        assert_in_sync(&right);
    }

    #[test]
    fn split_at_zero_moves_everything_right() {
        let mut row = Row::from_text("abc");
        let right = row.split(0);
        assert!(row.is_empty());
        assert_eq!(right.text(), "abc");
    }

    #[test]
    fn split_at_end_yields_empty_right() {
        let mut row = Row::from_text("abc");
        let right = row.split(3);
        assert_eq!(row.text(), "abc");
        assert!(right.is_empty());
    }

    #[test]
    fn split_out_of_range_clamps_to_end() {
        let mut row = Row::from_text("abc");
        let right = row.split(99);
        assert_eq!(row.text(), "abc");
        assert!(right.is_empty());
    }

    #[test]
    fn split_rehighlights_both_halves() {
        let mut row = Row::from_text("\"ab\"");
        let right = row.split(2);
        // Left `"a` is an unterminated string; right `b"` rescans from
        // scratch as a plain char followed by an opening quote.
        assert_eq!(row.hl(), &[Highlight::String; 2]);
        assert_eq!(right.hl(), &[Highlight::Normal, Highlight::String]);
    }

    #[test]
    fn split_then_join_round_trips() {
        for at in 0..=11 {
            let original = Row::from_text("hello world");
            let mut left = original.clone();
            let right = left.split(at);
            left.join(right);
            assert_eq!(left.text(), original.text());
            assert_in_sync(&left);
        }
    }

    #[test]
    fn join_rehighlights_merged_row() {
        let mut left = Row::from_text("\"a");
        let right = Row::from_text("b\"");
        left.join(right);
        // The merged row is a complete string.
        assert_eq!(left.hl(), &[Highlight::String; 4]);
    }

    // -- find ---------------------------------------------------------------

    #[test]
    fn find_first_occurrence() {
        let row = Row::from_text("one two two");
        assert_eq!(row.find("two"), Some(4));
    }

    #[test]
    fn find_missing_returns_none() {
        let row = Row::from_text("abc");
        assert_eq!(row.find("xyz"), None);
    }

    #[test]
    fn find_empty_query_returns_none() {
        let row = Row::from_text("abc");
        assert_eq!(row.find(""), None);
    }

    #[test]
    fn find_longer_than_row_returns_none() {
        let row = Row::from_text("ab");
        assert_eq!(row.find("abc"), None);
    }

    #[test]
    fn find_at_start_and_end() {
        let row = Row::from_text("needle haystack needle");
        assert_eq!(row.find("needle"), Some(0));
        assert_eq!(row.find("stack"), Some(10));
    }
}
