// SPDX-License-Identifier: MIT
//
// milo — a minimal terminal text editor.
//
// This binary wires the two crates together:
//
//   milo-term   → raw mode, key decoding, ANSI output, RAII restore
//   milo-editor → buffer, cursor, session state machine, renderer
//
// The interaction model is a strict cycle: render one full frame into
// the output buffer, flush it in a single write, block for one decoded
// key, hand it to the session. No timers, no async, no partial frames.
//
// Layout:
//
//   ┌──────────────────────────────┐
//   │ text area (~ past EOF)       │  ← rows - 2
//   ├──────────────────────────────┤
//   │ status bar (INVERSE)         │  ← 1 row
//   ├──────────────────────────────┤
//   │ message / prompt bar         │  ← 1 row
//   └──────────────────────────────┘

use std::env;
use std::io;
use std::path::Path;
use std::process;

use milo_editor::buffer::Buffer;
use milo_editor::render;
use milo_editor::session::{Outcome, Session};

use milo_term::output::OutputBuffer;
use milo_term::reader::KeyReader;
use milo_term::terminal::Terminal;

fn main() {
    if let Err(err) = run() {
        eprintln!("milo: {err}");
        process::exit(1);
    }
}

fn run() -> io::Result<()> {
    // Load the file before touching the terminal so an open error
    // prints on a normal screen. A missing argument means a fresh
    // unnamed buffer.
    let buffer = match env::args().nth(1) {
        Some(arg) => Buffer::open(Path::new(&arg))
            .map_err(|e| io::Error::new(e.kind(), format!("{arg}: {e}")))?,
        None => Buffer::new(),
    };

    let mut term = Terminal::new()?;
    term.enter()?;

    let size = term.size();
    let mut session = Session::new(buffer, usize::from(size.rows), usize::from(size.cols));
    session.set_status("HELP: Ctrl-S = save | Ctrl-Q = quit | Ctrl-F = find");

    let result = event_loop(&mut session);

    term.leave()?;
    result
}

fn event_loop(session: &mut Session) -> io::Result<()> {
    let mut out = OutputBuffer::new();
    let mut reader = KeyReader::new();
    let stdout = io::stdout();

    loop {
        session.scroll();
        render::draw(session, &mut out)?;
        out.flush_to(&mut stdout.lock())?;

        let key = reader.read_key()?;
        if session.handle_key(key) == Outcome::Quit {
            return Ok(());
        }
    }
}
