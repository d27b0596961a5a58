//! Search — first-match substring scan over the whole buffer.
//!
//! A deliberately simple model: every search restarts from row 0 and
//! returns the first occurrence in row order. There is no find-next
//! state between invocations, no wrap-around bookkeeping, and no regex
//! — queries are literal strings.
//!
//! The session layer moves the cursor to the hit and plants an
//! out-of-range `row_offset` sentinel so the per-frame scroll fix
//! recenters the viewport (see [`Viewport::scroll`]). The renderer
//! overlays [`Highlight::Match`](crate::highlight::Highlight::Match)
//! on the span transiently; the row's stored classes are never touched.
//!
//! [`Viewport::scroll`]: crate::cursor::Viewport::scroll

use crate::buffer::Buffer;

/// A search hit: where it starts and how many characters it spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    /// 0-indexed row of the hit.
    pub row: usize,
    /// Char offset of the hit within the row.
    pub col: usize,
    /// Length of the matched text in characters.
    pub len: usize,
}

/// Find the first occurrence of `query` scanning rows from 0 forward.
///
/// Returns `None` for an empty query or when nothing matches.
#[must_use]
pub fn find(buffer: &Buffer, query: &str) -> Option<Match> {
    if query.is_empty() {
        return None;
    }
    let len = query.chars().count();
    buffer.rows().enumerate().find_map(|(row, r)| {
        r.find(query).map(|col| Match { row, col, len })
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
