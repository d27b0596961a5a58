//! Syntax highlighting — a single hard-coded scanner.
//!
//! One deterministic left-to-right pass over a row's characters produces
//! one [`Highlight`] class per character. There is no grammar and no
//! configuration: the scanner recognizes quoted strings and numeric
//! literals, and everything else is [`Normal`](Highlight::Normal).
//!
//! The pass uses exactly one unit of lookback (the previous character's
//! class) and one unit of lookahead (for backslash escapes inside
//! strings). That makes it cheap enough to recompute for the whole row
//! on every mutation — rows never patch their highlight arrays
//! incrementally, so the two arrays cannot drift out of sync.
//!
//! [`Match`](Highlight::Match) is special: the scanner never emits it.
//! It exists for the renderer, which overlays it transiently on the
//! current search hit without touching the row's stored classes.

use milo_term::ansi::Color;

// ---------------------------------------------------------------------------
// Highlight
// ---------------------------------------------------------------------------

/// The highlight class of one character cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Highlight {
    /// Plain text.
    Normal,
    /// Part of a numeric literal (digits and an interior `.`).
    Number,
    /// Inside a quoted string, quotes included.
    String,
    /// The current search hit. Renderer-only — never stored in a row.
    Match,
}

impl Highlight {
    /// The foreground color this class renders with.
    #[inline]
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Self::Normal => Color::Default,
            Self::Number => Color::Red,
            Self::String => Color::Magenta,
            Self::Match => Color::Blue,
        }
    }
}

// ---------------------------------------------------------------------------
// Scanner
// ---------------------------------------------------------------------------

/// True for characters that end a number and allow a new one to start:
/// whitespace and punctuation. Start-of-row counts as a separator too
/// (handled by the scanner's initial state).
fn is_separator(ch: char) -> bool {
    ch.is_whitespace() || ch.is_ascii_punctuation()
}

/// Compute the highlight class for every character of a row.
///
/// Rules in priority order:
///
/// 1. **Strings** — a `"` or `'` outside a string latches string mode
///    with that exact quote as the terminator. Everything up to and
///    including the closing quote is [`Highlight::String`]; a backslash
///    consumes the next character as part of the string (escape).
/// 2. **Numbers** — a digit is [`Highlight::Number`] when the previous
///    character was a separator or itself a number; a `.` continues a
///    number (simple decimals, no exponents).
/// 3. Everything else is [`Highlight::Normal`].
#[must_use]
pub fn scan(chars: &[char]) -> Vec<Highlight> {
    let mut hl = vec![Highlight::Normal; chars.len()];

    let mut i = 0;
    let mut prev_sep = true;
    let mut in_string: Option<char> = None;

    while i < chars.len() {
        let ch = chars[i];
        let prev_hl = if i > 0 { hl[i - 1] } else { Highlight::Normal };

        if let Some(quote) = in_string {
            hl[i] = Highlight::String;
            if ch == '\\' && i + 1 < chars.len() {
                hl[i + 1] = Highlight::String;
                i += 2;
                continue;
            }
            if ch == quote {
                in_string = None;
            }
            prev_sep = true;
            i += 1;
            continue;
        }

        if ch == '"' || ch == '\'' {
            in_string = Some(ch);
            hl[i] = Highlight::String;
            i += 1;
            continue;
        }

        if (ch.is_ascii_digit() && (prev_sep || prev_hl == Highlight::Number))
            || (ch == '.' && prev_hl == Highlight::Number)
        {
            hl[i] = Highlight::Number;
            prev_sep = false;
            i += 1;
            continue;
        }

        prev_sep = is_separator(ch);
        i += 1;
    }

    hl
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
