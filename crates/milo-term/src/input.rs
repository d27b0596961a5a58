// SPDX-License-Identifier: MIT
//
// Terminal input parser.
//
// Turns raw stdin bytes into abstract key events. The editor core never
// sees bytes or escape sequences — only the decoded key set. Handles:
//
// - Legacy CSI sequences (arrows, Home/End, Page Up/Down, Delete)
// - SS3 sequences (Home/End/arrow alternate encoding from some terminals)
// - xterm CSI modifier parameters (`1;5C` = Ctrl-Right)
// - Control bytes (Ctrl-A .. Ctrl-Z, Enter, Tab, Backspace)
// - Alt+key (ESC followed by a printable character)
// - UTF-8 multi-byte characters
//
// # Design
//
// The parser maintains a small internal byte buffer because escape
// sequences can span multiple `read()` calls. Feed bytes with
// [`Parser::advance`], retrieve events from the returned `Vec`.
// After a timeout with no new bytes, call [`Parser::flush`] to
// emit a pending lone ESC as a real Escape keypress.
//
// Number parsing is done directly on `&[u8]` — no intermediate
// `String` allocation for CSI parameter decoding.

use bitflags::bitflags;

// ─── Event Types ────────────────────────────────────────────────────────────

/// Identity of a key.
///
/// Named keys have dedicated variants; printable characters use
/// [`Char`](KeyCode::Char).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    /// A Unicode character (printable).
    Char(char),
    // ── Named keys ──────────────────────────────────────────────
    Enter,
    Tab,
    Backspace,
    Escape,
    Delete,
    // ── Navigation ──────────────────────────────────────────────
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
}

bitflags! {
    /// Keyboard modifier flags.
    ///
    /// Matches the xterm CSI modifier encoding where `param = 1 + bitmask`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0000_0001;
        const ALT   = 0b0000_0010;
        const CTRL  = 0b0000_0100;
    }
}

/// A keyboard event with key identity and modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// Which key was pressed.
    pub code: KeyCode,
    /// Active modifier keys.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Create a key event.
    #[inline]
    #[must_use]
    pub const fn new(code: KeyCode, modifiers: Modifiers) -> Self {
        Self { code, modifiers }
    }

    /// A key event with no modifiers.
    #[inline]
    #[must_use]
    pub const fn plain(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::empty(),
        }
    }

    /// A Ctrl+letter event, as produced for control bytes 0x01–0x1A.
    #[inline]
    #[must_use]
    pub const fn ctrl(ch: char) -> Self {
        Self {
            code: KeyCode::Char(ch),
            modifiers: Modifiers::CTRL,
        }
    }

    /// True when this event is exactly Ctrl plus the given letter.
    #[inline]
    #[must_use]
    pub fn is_ctrl(&self, ch: char) -> bool {
        self.code == KeyCode::Char(ch) && self.modifiers == Modifiers::CTRL
    }
}

// ─── Parser ─────────────────────────────────────────────────────────────────

/// Result of attempting to parse one event from the front of the buffer.
enum Parsed {
    /// Consumed `n` bytes, possibly producing an event.
    Consumed(usize, Option<KeyEvent>),
    /// The buffer holds the start of a sequence but not all of it yet.
    Incomplete,
}

/// Longest escape sequence we are willing to buffer before giving up.
/// Anything longer is not a key sequence we recognize.
const MAX_SEQUENCE_LEN: usize = 16;

/// Stateful byte-stream parser producing [`KeyEvent`]s.
#[derive(Default)]
pub struct Parser {
    buf: Vec<u8>,
}

impl Parser {
    /// Create an empty parser.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True when bytes are buffered waiting for the rest of a sequence.
    ///
    /// The caller should wait briefly for more input, then call
    /// [`flush`](Self::flush) if none arrives.
    #[inline]
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.buf.is_empty()
    }

    /// Feed raw bytes and collect every complete event.
    pub fn advance(&mut self, bytes: &[u8]) -> Vec<KeyEvent> {
        self.buf.extend_from_slice(bytes);
        let mut events = Vec::new();

        loop {
            if self.buf.is_empty() {
                break;
            }
            match Self::parse_front(&self.buf) {
                Parsed::Consumed(n, event) => {
                    self.buf.drain(..n);
                    if let Some(e) = event {
                        events.push(e);
                    }
                }
                Parsed::Incomplete => {
                    // Runaway sequence — discard the ESC and reparse.
                    if self.buf.len() > MAX_SEQUENCE_LEN {
                        self.buf.drain(..1);
                        continue;
                    }
                    break;
                }
            }
        }
        events
    }

    /// Resolve pending bytes after an input timeout.
    ///
    /// A buffered lone ESC becomes a real Escape keypress; any remaining
    /// partial sequence is decoded as far as possible, dropping bytes that
    /// cannot start an event.
    pub fn flush(&mut self) -> Vec<KeyEvent> {
        let mut events = Vec::new();

        while !self.buf.is_empty() {
            match Self::parse_front(&self.buf) {
                Parsed::Consumed(n, event) => {
                    self.buf.drain(..n);
                    if let Some(e) = event {
                        events.push(e);
                    }
                }
                Parsed::Incomplete => {
                    // No more bytes are coming. A leading ESC is the
                    // Escape key; anything else is noise.
                    if self.buf[0] == 0x1b {
                        events.push(KeyEvent::plain(KeyCode::Escape));
                    }
                    self.buf.drain(..1);
                }
            }
        }
        events
    }

    // ── Byte-level decoding ─────────────────────────────────────────

    fn parse_front(buf: &[u8]) -> Parsed {
        match buf[0] {
            0x1b => Self::parse_escape(buf),
            b'\r' | b'\n' => Parsed::Consumed(1, Some(KeyEvent::plain(KeyCode::Enter))),
            b'\t' => Parsed::Consumed(1, Some(KeyEvent::plain(KeyCode::Tab))),
            0x7f | 0x08 => Parsed::Consumed(1, Some(KeyEvent::plain(KeyCode::Backspace))),
            // Ctrl-A .. Ctrl-Z (minus the bytes claimed above).
            b @ 0x01..=0x1a => {
                let letter = (b + 0x60) as char;
                Parsed::Consumed(1, Some(KeyEvent::ctrl(letter)))
            }
            // NUL and the remaining C0 controls produce nothing.
            0x00 | 0x1c..=0x1f => Parsed::Consumed(1, None),
            b if b < 0x80 => Parsed::Consumed(
                1,
                Some(KeyEvent::plain(KeyCode::Char(b as char))),
            ),
            _ => Self::parse_utf8(buf),
        }
    }

    /// Decode an escape-introduced sequence: CSI, SS3, or Alt+char.
    fn parse_escape(buf: &[u8]) -> Parsed {
        let Some(&second) = buf.get(1) else {
            return Parsed::Incomplete;
        };

        match second {
            b'[' => Self::parse_csi(buf),
            b'O' => Self::parse_ss3(buf),
            // Alt + printable ASCII.
            b if (0x20..0x7f).contains(&b) => Parsed::Consumed(
                2,
                Some(KeyEvent::new(KeyCode::Char(b as char), Modifiers::ALT)),
            ),
            // ESC followed by a control byte: treat the ESC as Escape and
            // let the next byte be parsed on its own.
            _ => Parsed::Consumed(1, Some(KeyEvent::plain(KeyCode::Escape))),
        }
    }

    /// Decode `ESC [ params final` (CSI).
    fn parse_csi(buf: &[u8]) -> Parsed {
        // Find the final byte (0x40..=0x7E) after the parameters.
        let Some(fin_idx) = buf[2..]
            .iter()
            .position(|&b| (0x40..=0x7e).contains(&b))
            .map(|i| i + 2)
        else {
            return Parsed::Incomplete;
        };

        let params = parse_params(&buf[2..fin_idx]);
        let consumed = fin_idx + 1;
        let modifiers = csi_modifiers(params.get(1).copied());

        let code = match buf[fin_idx] {
            b'A' => Some(KeyCode::Up),
            b'B' => Some(KeyCode::Down),
            b'C' => Some(KeyCode::Right),
            b'D' => Some(KeyCode::Left),
            b'H' => Some(KeyCode::Home),
            b'F' => Some(KeyCode::End),
            b'~' => match params.first().copied().unwrap_or(1) {
                1 | 7 => Some(KeyCode::Home),
                3 => Some(KeyCode::Delete),
                4 | 8 => Some(KeyCode::End),
                5 => Some(KeyCode::PageUp),
                6 => Some(KeyCode::PageDown),
                _ => None,
            },
            _ => None,
        };

        Parsed::Consumed(consumed, code.map(|c| KeyEvent::new(c, modifiers)))
    }

    /// Decode `ESC O final` (SS3) — the application-keypad encoding some
    /// terminals use for arrows and Home/End.
    fn parse_ss3(buf: &[u8]) -> Parsed {
        let Some(&fin) = buf.get(2) else {
            return Parsed::Incomplete;
        };

        let code = match fin {
            b'A' => Some(KeyCode::Up),
            b'B' => Some(KeyCode::Down),
            b'C' => Some(KeyCode::Right),
            b'D' => Some(KeyCode::Left),
            b'H' => Some(KeyCode::Home),
            b'F' => Some(KeyCode::End),
            _ => None,
        };

        Parsed::Consumed(3, code.map(KeyEvent::plain))
    }

    /// Decode one UTF-8 multi-byte character from the front of the buffer.
    fn parse_utf8(buf: &[u8]) -> Parsed {
        let len = match buf[0] {
            0xc0..=0xdf => 2,
            0xe0..=0xef => 3,
            0xf0..=0xf7 => 4,
            // Stray continuation or invalid leading byte.
            _ => return Parsed::Consumed(1, None),
        };

        if buf.len() < len {
            return Parsed::Incomplete;
        }

        match std::str::from_utf8(&buf[..len]) {
            Ok(s) => {
                let ch = s.chars().next().unwrap_or('\u{fffd}');
                Parsed::Consumed(len, Some(KeyEvent::plain(KeyCode::Char(ch))))
            }
            Err(_) => Parsed::Consumed(1, None),
        }
    }
}

/// Split semicolon-separated decimal CSI parameters.
fn parse_params(bytes: &[u8]) -> Vec<u16> {
    bytes
        .split(|&b| b == b';')
        .map(|field| {
            field
                .iter()
                .take_while(|b| b.is_ascii_digit())
                .fold(0u16, |acc, &b| {
                    acc.saturating_mul(10).saturating_add(u16::from(b - b'0'))
                })
        })
        .collect()
}

/// Decode the xterm modifier parameter (`param = 1 + bitmask`).
fn csi_modifiers(param: Option<u16>) -> Modifiers {
    match param {
        Some(p) if p > 1 => Modifiers::from_bits_truncate((p - 1) as u8),
        _ => Modifiers::empty(),
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
