// SPDX-License-Identifier: MIT
//
// milo-term — terminal layer for milo.
//
// The OS-facing half of the editor: raw-mode control with RAII and
// panic-safe restore, a geometry query, ANSI escape encoding, a frame
// output buffer flushed in a single write, and a blocking key reader
// that decodes raw stdin bytes into an abstract key set.
//
// This crate intentionally avoids external TUI frameworks (ratatui,
// crossterm) in favor of direct terminal control via ANSI escape
// sequences and raw termios. The editor core on top of it never sees
// a byte of terminal I/O — only `KeyEvent`s in and `OutputBuffer`s out.

pub mod ansi;
pub mod input;
pub mod output;
pub mod reader;
pub mod terminal;
