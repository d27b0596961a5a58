//! Cursor and viewport — where the user is, and what is on screen.
//!
//! The cursor is a logical `(col, row)` position into the buffer. It is
//! deliberately loose: moving up or down does **not** reflow the column
//! against the new row's length, so the cursor may legally point past
//! the end of a shorter row. Rendering and edits tolerate that. The row
//! index ranges over `[0, row_count]` — the row count itself is the
//! virtual end-of-file position.
//!
//! The viewport is the visible sub-window. Scrolling only ever adjusts
//! `row_offset`, never the cursor, and only by the minimum needed to
//! bring the cursor row back inside the window. The column dimension
//! never scrolls in this design.

use crate::buffer::Buffer;
use crate::row::Row;

// ---------------------------------------------------------------------------
// Cursor
// ---------------------------------------------------------------------------

/// Logical cursor position: 0-indexed column and row into the buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub col: usize,
    pub row: usize,
}

impl Cursor {
    /// The origin — row 0, column 0.
    pub const ORIGIN: Self = Self { col: 0, row: 0 };

    /// Length of the row under the cursor, or 0 at the virtual EOF row.
    fn current_row_len(self, buffer: &Buffer) -> usize {
        buffer.row(self.row).map_or(0, Row::len)
    }

    /// Move one column left. No wrap to the previous line.
    pub const fn move_left(&mut self) {
        if self.col > 0 {
            self.col -= 1;
        }
    }

    /// Move one column right, bounded by the current row's length.
    ///
    /// At the virtual EOF row there is no row to bound against, so the
    /// viewport width caps the column as a degenerate case. No wrap to
    /// the next line.
    pub fn move_right(&mut self, buffer: &Buffer, viewport: &Viewport) {
        if self.row < buffer.row_count() {
            if self.col < self.current_row_len(buffer) {
                self.col += 1;
            }
        } else if self.col + 1 < viewport.cols {
            self.col += 1;
        }
    }

    /// Move one row up. The column is not reflowed.
    pub const fn move_up(&mut self) {
        if self.row > 0 {
            self.row -= 1;
        }
    }

    /// Move one row down, clamped to the virtual EOF row. The column is
    /// not reflowed.
    pub fn move_down(&mut self, buffer: &Buffer) {
        if self.row < buffer.row_count() {
            self.row += 1;
        }
    }

    /// Jump to column 0 of the current row.
    pub const fn move_home(&mut self) {
        self.col = 0;
    }

    /// Jump past the last character of the current row.
    pub fn move_end(&mut self, buffer: &Buffer) {
        self.col = self.current_row_len(buffer);
    }

    /// Move up by one viewport height, clamped at the first row.
    pub const fn page_up(&mut self, viewport: &Viewport) {
        self.row = self.row.saturating_sub(viewport.rows);
    }

    /// Move down by one viewport height, clamped at the virtual EOF row.
    pub fn page_down(&mut self, buffer: &Buffer, viewport: &Viewport) {
        self.row = (self.row + viewport.rows).min(buffer.row_count());
    }
}

// ---------------------------------------------------------------------------
// Viewport
// ---------------------------------------------------------------------------

/// The visible sub-window of the buffer.
///
/// `rows` and `cols` are the text area dimensions — the two bottom
/// terminal rows reserved for the status and message bars are already
/// excluded by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// First buffer row shown at the top of the window.
    pub row_offset: usize,
    /// First column shown. Fixed at 0 — this design never scrolls
    /// horizontally.
    pub col_offset: usize,
    /// Visible text rows.
    pub rows: usize,
    /// Visible text columns.
    pub cols: usize,
}

impl Viewport {
    /// Create a viewport of the given text-area size, scrolled to the top.
    #[must_use]
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self {
            row_offset: 0,
            col_offset: 0,
            rows,
            cols,
        }
    }

    /// Restore the scrolling invariant
    /// `row_offset ≤ cursor.row < row_offset + rows`,
    /// adjusting `row_offset` by the minimum necessary.
    ///
    /// Called once per frame before drawing. Setting `row_offset` to an
    /// out-of-range sentinel (e.g. the row count) forces this to snap
    /// the window to the cursor — the search module uses that to
    /// recenter on a match.
    pub const fn scroll(&mut self, cursor: Cursor) {
        // A zero-height window can contain no row; leave the offset alone.
        if self.rows == 0 {
            return;
        }
        if cursor.row < self.row_offset {
            self.row_offset = cursor.row;
        }
        if cursor.row >= self.row_offset + self.rows {
            self.row_offset = cursor.row + 1 - self.rows;
        }
    }

    /// True when the invariant holds for the given cursor.
    #[must_use]
    pub const fn contains_row(&self, row: usize) -> bool {
        self.row_offset <= row && row < self.row_offset + self.rows
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
