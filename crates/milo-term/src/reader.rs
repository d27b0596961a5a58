// SPDX-License-Identifier: MIT
#![allow(unsafe_code)]
//
// Blocking key reader — one decoded key per call.
//
// The editor's session loop is fully synchronous: render a frame, then
// block until the user presses exactly one key. `KeyReader` wraps raw
// blocking reads on stdin and the byte-stream [`Parser`], delivering one
// [`KeyEvent`] per call to [`read_key`](KeyReader::read_key).
//
// The one subtlety is the lone ESC byte: it could be the Escape key or
// the first byte of a CSI sequence still in flight. When the parser is
// holding a partial sequence we `poll()` stdin for a few milliseconds;
// if nothing more arrives the pending ESC is flushed as a real Escape
// keypress. Terminals send a sequence's bytes back-to-back, so the wait
// is only ever observable on a human Escape press — and imperceptibly.

use std::collections::VecDeque;
use std::io;

use crate::input::{KeyEvent, Parser};

/// Byte chunk read from stdin per syscall. A single keypress is 1–6
/// bytes; 64 leaves room for several queued keys without waste.
const READ_BUF_SIZE: usize = 64;

/// How long to wait for the rest of an escape sequence (milliseconds)
/// before resolving a pending ESC as the Escape key.
const ESC_TIMEOUT_MS: i32 = 25;

/// Blocking stdin key source.
///
/// Decodes special keys (arrows, Home/End, Page Up/Down, Delete) so the
/// editor core only ever consumes the abstract key set.
#[derive(Default)]
pub struct KeyReader {
    parser: Parser,
    queue: VecDeque<KeyEvent>,
}

impl KeyReader {
    /// Create a reader. Assumes the terminal is already in raw mode
    /// (see [`Terminal::enter`](crate::terminal::Terminal::enter)).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Block until one decoded key event is available and return it.
    ///
    /// # Errors
    ///
    /// Returns an error if stdin reaches EOF or a read fails.
    pub fn read_key(&mut self) -> io::Result<KeyEvent> {
        loop {
            if let Some(key) = self.queue.pop_front() {
                return Ok(key);
            }

            // A partial escape sequence is buffered: wait briefly for the
            // rest, and flush a lone ESC if the wait times out.
            if self.parser.has_pending() && !poll_stdin(ESC_TIMEOUT_MS)? {
                self.queue.extend(self.parser.flush());
                continue;
            }

            let mut buf = [0u8; READ_BUF_SIZE];
            let n = read_stdin(&mut buf)?;
            if n == 0 {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "stdin closed",
                ));
            }
            self.queue.extend(self.parser.advance(&buf[..n]));
        }
    }
}

// ─── Raw stdin access ───────────────────────────────────────────────────────

/// Blocking read from stdin's file descriptor.
///
/// Uses `libc::read` directly rather than `io::stdin()` so raw-mode
/// VMIN/VTIME semantics apply without the std BufReader in the way.
#[cfg(unix)]
fn read_stdin(buf: &mut [u8]) -> io::Result<usize> {
    loop {
        let n = unsafe {
            libc::read(
                libc::STDIN_FILENO,
                buf.as_mut_ptr().cast::<libc::c_void>(),
                buf.len(),
            )
        };
        if n >= 0 {
            #[allow(clippy::cast_sign_loss)]
            return Ok(n as usize);
        }
        let err = io::Error::last_os_error();
        if err.kind() != io::ErrorKind::Interrupted {
            return Err(err);
        }
    }
}

#[cfg(not(unix))]
fn read_stdin(buf: &mut [u8]) -> io::Result<usize> {
    use std::io::Read;
    io::stdin().read(buf)
}

/// Wait up to `timeout_ms` for stdin to become readable.
///
/// Returns `Ok(true)` if bytes are waiting, `Ok(false)` on timeout.
#[cfg(unix)]
fn poll_stdin(timeout_ms: i32) -> io::Result<bool> {
    let mut fds = libc::pollfd {
        fd: libc::STDIN_FILENO,
        events: libc::POLLIN,
        revents: 0,
    };
    loop {
        let result = unsafe { libc::poll(&raw mut fds, 1, timeout_ms) };
        if result >= 0 {
            return Ok(result > 0);
        }
        let err = io::Error::last_os_error();
        if err.kind() != io::ErrorKind::Interrupted {
            return Err(err);
        }
    }
}

/// Without `poll`, resolve pending escape bytes immediately.
#[cfg(not(unix))]
fn poll_stdin(_timeout_ms: i32) -> io::Result<bool> {
    Ok(false)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
