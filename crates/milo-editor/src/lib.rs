//! milo-editor — the editing engine behind the `milo` binary.
//!
//! Everything above the terminal layer lives here: the row/buffer text
//! model with its derived highlight classes, cursor and viewport
//! geometry, key-to-command translation, the session state machine, and
//! the frame renderer. The crate is fully testable without a terminal —
//! rendering targets an in-memory [`OutputBuffer`] and input arrives as
//! already-decoded [`KeyEvent`]s from `milo-term`.
//!
//! [`OutputBuffer`]: milo_term::output::OutputBuffer
//! [`KeyEvent`]: milo_term::input::KeyEvent

pub mod buffer;
pub mod command;
pub mod cursor;
pub mod highlight;
pub mod render;
pub mod row;
pub mod search;
pub mod session;
