//! Text buffer — the ordered collection of rows for the open document.
//!
//! A `Buffer` owns a growable `Vec` of [`Row`]s plus document metadata:
//! the backing file path (if any) and the `dirty` flag recording unsaved
//! mutations. Row-structure edits (insert/remove) live here; character
//! edits live on [`Row`]. Cursor-coupled session operations (insert at
//! cursor, backspace-join, newline-split) live in
//! [`Session`](crate::session::Session), which is the only mutator.
//!
//! # Design choices
//!
//! - **Rows, not a rope.** The document is a plain vector of rows, each
//!   a vector of chars beside its highlight classes. Edits touch one or
//!   two rows; there is no cross-row state to rebalance, and exclusive
//!   ownership means no reader can observe a half-resized row.
//!
//! - **Line endings are normalized on load.** `str::lines` strips both
//!   `\n` and `\r\n`; saves always emit `\n`, including after the final
//!   row.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::row::Row;

/// The full ordered collection of rows for the open document.
#[derive(Debug, Default)]
pub struct Buffer {
    rows: Vec<Row>,
    path: Option<PathBuf>,
    dirty: bool,
}

impl Buffer {
    // -- Construction -------------------------------------------------------

    /// Create an empty buffer with no file path and no rows.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer from in-memory text, one row per line.
    ///
    /// Line endings (`\n`, `\r\n`) are stripped. Mainly for tests and
    /// scratch content; the buffer has no path and starts clean.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self {
            rows: text.lines().map(Row::from_text).collect(),
            path: None,
            dirty: false,
        }
    }

    /// Load a buffer from a file.
    ///
    /// Each line becomes one row, newline-stripped (trailing `\r` too).
    /// The buffer starts in an unmodified state.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains invalid
    /// UTF-8. Open failure at startup is fatal to the session.
    pub fn open(path: &Path) -> io::Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(Self {
            rows: text.lines().map(Row::from_text).collect(),
            path: Some(path.to_path_buf()),
            dirty: false,
        })
    }

    // -- Access -------------------------------------------------------------

    /// Number of rows. Zero for a fresh empty buffer.
    #[inline]
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get a row by 0-indexed position. `None` past the end — including
    /// the virtual end-of-file position `row_count()` the cursor may
    /// legally occupy.
    #[inline]
    #[must_use]
    pub fn row(&self, at: usize) -> Option<&Row> {
        self.rows.get(at)
    }

    /// Mutable access to a row. The caller is responsible for setting
    /// [`mark_dirty`](Self::mark_dirty) after an actual edit.
    #[inline]
    pub fn row_mut(&mut self, at: usize) -> Option<&mut Row> {
        self.rows.get_mut(at)
    }

    /// Iterate over all rows in order.
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    /// True if the buffer has unsaved mutations.
    #[inline]
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Record an unsaved mutation.
    #[inline]
    pub const fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// The file path this buffer is associated with, if any.
    #[inline]
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The filename to display in the status bar, or `None` for a
    /// buffer that has never been saved.
    #[must_use]
    pub fn display_name(&self) -> Option<String> {
        self.path
            .as_deref()
            .map(|p| p.to_string_lossy().into_owned())
    }

    // -- Row structure ------------------------------------------------------

    /// Insert a row at position `at`. No-op when `at > row_count()`.
    pub fn insert_row(&mut self, at: usize, row: Row) {
        if at > self.rows.len() {
            return;
        }
        self.rows.insert(at, row);
    }

    /// Remove and return the row at `at`, or `None` when out of range.
    pub fn remove_row(&mut self, at: usize) -> Option<Row> {
        if at >= self.rows.len() {
            return None;
        }
        Some(self.rows.remove(at))
    }

    // -- Serialization ------------------------------------------------------

    /// The whole document as a string: rows joined with `\n`, the final
    /// row newline-terminated as well. Empty buffer yields an empty
    /// string.
    #[must_use]
    pub fn contents(&self) -> String {
        let mut out = String::new();
        for row in &self.rows {
            out.extend(row.chars());
            out.push('\n');
        }
        out
    }

    /// Save the buffer to its associated path.
    ///
    /// On success clears `dirty` and returns the number of bytes
    /// written. On failure `dirty` is untouched, making the save
    /// retryable.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the buffer has no path (the session
    /// prompts for one first), or any I/O error from the write.
    pub fn save(&mut self) -> io::Result<usize> {
        let Some(path) = self.path.clone() else {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "buffer has no file path",
            ));
        };
        self.save_to(&path)
    }

    /// Save the buffer to `path` and adopt it as the buffer's path.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the write; on failure the previous
    /// path and the `dirty` flag are left unchanged.
    pub fn save_as(&mut self, path: PathBuf) -> io::Result<usize> {
        let written = self.save_to(&path)?;
        self.path = Some(path);
        Ok(written)
    }

    /// Write the whole document to `path` in one operation.
    fn save_to(&mut self, path: &Path) -> io::Result<usize> {
        let contents = self.contents();
        fs::write(path, &contents)?;
        self.dirty = false;
        Ok(contents.len())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
