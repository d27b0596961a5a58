//! Key dispatch — mapping abstract key events to editor commands.
//!
//! A pure translation layer: one [`KeyEvent`] in, one [`Command`] out,
//! no state. The session state machine (quit countdown, prompts) lives
//! in [`session`](crate::session); this module only decides what a key
//! *means* in normal editing.
//!
//! | Key                  | Command                      |
//! |----------------------|------------------------------|
//! | Ctrl-Q               | `Quit`                       |
//! | Ctrl-S               | `Save`                       |
//! | Ctrl-F               | `Find`                       |
//! | Enter                | `InsertNewline`              |
//! | Backspace / Ctrl-H   | `DeleteBackward`             |
//! | Delete               | `DeleteForward`              |
//! | Arrows, Home, End, PageUp, PageDown | `Move(..)`    |
//! | Escape, Ctrl-L       | `Nop` (explicit no-ops)      |
//! | printable char       | `InsertChar(..)`             |
//! | anything else        | `Nop`                        |

use milo_term::input::{KeyCode, KeyEvent, Modifiers};

// ---------------------------------------------------------------------------
// Motion
// ---------------------------------------------------------------------------

/// A cursor motion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
}

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// What a key asks the editor to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move the cursor.
    Move(Motion),
    /// Insert one printable character at the cursor.
    InsertChar(char),
    /// Split the line at the cursor (Enter).
    InsertNewline,
    /// Delete the character left of the cursor, joining lines at col 0.
    DeleteBackward,
    /// Delete the character under the cursor, joining the next line up
    /// when at end of line.
    DeleteForward,
    /// Save the buffer (prompting for a filename if none is set).
    Save,
    /// Start a search prompt.
    Find,
    /// Request to quit (subject to the dirty-buffer countdown).
    Quit,
    /// A recognized key with nothing to do.
    Nop,
}

/// Translate one abstract key event into a command.
#[must_use]
pub fn translate(key: KeyEvent) -> Command {
    if key.is_ctrl('q') {
        return Command::Quit;
    }
    if key.is_ctrl('s') {
        return Command::Save;
    }
    if key.is_ctrl('f') {
        return Command::Find;
    }
    if key.is_ctrl('h') {
        return Command::DeleteBackward;
    }

    match key.code {
        KeyCode::Enter => Command::InsertNewline,
        KeyCode::Backspace => Command::DeleteBackward,
        KeyCode::Delete => Command::DeleteForward,
        KeyCode::Up => Command::Move(Motion::Up),
        KeyCode::Down => Command::Move(Motion::Down),
        KeyCode::Left => Command::Move(Motion::Left),
        KeyCode::Right => Command::Move(Motion::Right),
        KeyCode::Home => Command::Move(Motion::Home),
        KeyCode::End => Command::Move(Motion::End),
        KeyCode::PageUp => Command::Move(Motion::PageUp),
        KeyCode::PageDown => Command::Move(Motion::PageDown),
        KeyCode::Char(ch)
            if !key.modifiers.intersects(Modifiers::CTRL | Modifiers::ALT)
                && !ch.is_control() =>
        {
            Command::InsertChar(ch)
        }
        // Escape, Tab, Ctrl-L, Alt chords, remaining control chords.
        _ => Command::Nop,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
