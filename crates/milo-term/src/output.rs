// SPDX-License-Identifier: MIT
//
// Output buffering — the whole frame in one write() syscall.
//
// The renderer composes every escape sequence and every character of a
// frame into an `OutputBuffer` first. A single flush at frame end writes
// it all at once. Streaming the frame piecemeal would let the terminal
// repaint half-drawn rows between writes — the classic flicker bug this
// buffer exists to prevent.

use std::io::{self, Write};

/// A byte buffer that accumulates ANSI output for a single `write()` syscall.
///
/// Implements [`Write`] so the `ansi` module's encoders can target it
/// directly. Writes to the backing `Vec` never fail.
///
/// Default capacity: 8 KB — enough for a full frame on a typical terminal
/// without reallocation.
pub struct OutputBuffer {
    buf: Vec<u8>,
}

const DEFAULT_CAPACITY: usize = 8_192;

impl OutputBuffer {
    /// Create an empty buffer with default capacity (8 KB).
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(DEFAULT_CAPACITY),
        }
    }

    /// Number of bytes accumulated.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether the buffer is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The accumulated bytes (for testing and debugging).
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Append a string slice.
    #[inline]
    pub fn push_str(&mut self, s: &str) {
        self.buf.extend_from_slice(s.as_bytes());
    }

    /// Append a single character as UTF-8.
    #[inline]
    pub fn push_char(&mut self, ch: char) {
        let mut enc = [0u8; 4];
        self.buf.extend_from_slice(ch.encode_utf8(&mut enc).as_bytes());
    }

    /// Clear the buffer for reuse (keeps allocated capacity).
    #[inline]
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Emit the entire frame to `w` as one write, then clear for reuse.
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying writer.
    pub fn flush_to(&mut self, w: &mut impl Write) -> io::Result<()> {
        w.write_all(&self.buf)?;
        w.flush()?;
        self.buf.clear();
        Ok(())
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Write for OutputBuffer {
    #[inline]
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    #[inline]
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
