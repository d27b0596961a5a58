//! Editor session — the one context object the interaction loop owns.
//!
//! `Session` bundles the buffer, cursor, viewport, transient status
//! message, prompt state, and the quit-confirmation countdown. There is
//! no global editor state: the binary's loop owns a `Session`, feeds it
//! one key per iteration, and renders from it. Every mutation of buffer
//! or cursor state flows through [`handle_key`](Session::handle_key),
//! so there is exactly one logical actor.
//!
//! # State machine
//!
//! - **Normal** — keys translate to [`Command`]s and execute directly.
//! - **Prompt** — Save-as and Find route keys into a line-input prompt:
//!   printable chars append, Backspace edits, Escape cancels, Enter
//!   accepts (only with non-empty input).
//! - **Quit countdown** — while the buffer is dirty, quitting takes
//!   [`QUIT_CONFIRM_TIMES`] consecutive Ctrl-Q presses; any other key
//!   resets the countdown.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use milo_term::input::{KeyCode, KeyEvent, Modifiers};

use crate::buffer::Buffer;
use crate::command::{self, Command, Motion};
use crate::cursor::{Cursor, Viewport};
use crate::row::Row;
use crate::search::{self, Match};

/// Consecutive quit signals required to abandon unsaved changes.
pub const QUIT_CONFIRM_TIMES: u32 = 3;

/// How long a status message stays on screen.
const MESSAGE_TIMEOUT: Duration = Duration::from_secs(5);

/// Terminal rows reserved below the text area (status bar + message bar).
pub const RESERVED_ROWS: usize = 2;

// ---------------------------------------------------------------------------
// StatusMessage
// ---------------------------------------------------------------------------

/// A transient message for the bottom bar. Pure presentation — it never
/// touches buffer state, and it simply stops rendering once expired.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    text: String,
    set_at: Instant,
}

impl StatusMessage {
    fn new(text: String) -> Self {
        Self {
            text,
            set_at: Instant::now(),
        }
    }

    /// The message text.
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// True once the display window has elapsed.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.set_at.elapsed() >= MESSAGE_TIMEOUT
    }
}

// ---------------------------------------------------------------------------
// Prompt
// ---------------------------------------------------------------------------

/// What an active prompt is collecting input for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptPurpose {
    /// Save-as: the input becomes the buffer's filename.
    SaveAs,
    /// Find: the input is a search query.
    Find,
}

/// An active line-input prompt shown in the message bar.
#[derive(Debug, Clone)]
pub struct Prompt {
    purpose: PromptPurpose,
    prefix: &'static str,
    suffix: &'static str,
    input: String,
}

impl Prompt {
    fn new(purpose: PromptPurpose) -> Self {
        let (prefix, suffix) = match purpose {
            PromptPurpose::SaveAs => ("Save as: ", ""),
            PromptPurpose::Find => ("Search: ", " (ESC to cancel)"),
        };
        Self {
            purpose,
            prefix,
            suffix,
            input: String::new(),
        }
    }

    /// The full line to show in the message bar.
    #[must_use]
    pub fn display(&self) -> String {
        format!("{}{}{}", self.prefix, self.input, self.suffix)
    }

    /// The input collected so far.
    #[inline]
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// What the loop should do after a key has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Keep going: render and read the next key.
    Continue,
    /// Terminate the session.
    Quit,
}

/// The complete editing session: document, view, and interaction state.
pub struct Session {
    buffer: Buffer,
    cursor: Cursor,
    viewport: Viewport,
    status: Option<StatusMessage>,
    prompt: Option<Prompt>,
    quit_times: u32,
    /// The latest search hit, overlaid by the renderer until the next
    /// key is processed. Never written back into a row.
    search_match: Option<Match>,
}

impl Session {
    /// Create a session over `buffer` for a terminal of the given size.
    ///
    /// The bottom [`RESERVED_ROWS`] rows are kept for the status and
    /// message bars; the viewport gets the rest.
    #[must_use]
    pub fn new(buffer: Buffer, screen_rows: usize, screen_cols: usize) -> Self {
        Self {
            buffer,
            cursor: Cursor::ORIGIN,
            viewport: Viewport::new(screen_rows.saturating_sub(RESERVED_ROWS), screen_cols),
            status: None,
            prompt: None,
            quit_times: QUIT_CONFIRM_TIMES,
            search_match: None,
        }
    }

    // -- State the renderer reads -------------------------------------------

    /// The open document.
    #[inline]
    #[must_use]
    pub const fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    /// The logical cursor position.
    #[inline]
    #[must_use]
    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// The visible window.
    #[inline]
    #[must_use]
    pub const fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// The current status message, if one has been set.
    #[inline]
    #[must_use]
    pub const fn status_message(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    /// The active prompt, if the session is collecting line input.
    #[inline]
    #[must_use]
    pub const fn prompt(&self) -> Option<&Prompt> {
        self.prompt.as_ref()
    }

    /// The search hit to overlay this frame, if any.
    #[inline]
    #[must_use]
    pub const fn search_match(&self) -> Option<Match> {
        self.search_match
    }

    /// Set the status message, restarting its display window.
    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage::new(text.into()));
    }

    /// Restore the scroll invariant before drawing a frame.
    pub const fn scroll(&mut self) {
        self.viewport.scroll(self.cursor);
    }

    // -- Key handling -------------------------------------------------------

    /// Process one key event. Exactly one call per interaction cycle.
    pub fn handle_key(&mut self, key: KeyEvent) -> Outcome {
        if self.prompt.is_some() {
            self.handle_prompt_key(key);
            self.quit_times = QUIT_CONFIRM_TIMES;
            return Outcome::Continue;
        }

        // Any key outside a prompt drops the transient match overlay —
        // quit signals included, so the warning frames render without it.
        self.search_match = None;

        match command::translate(key) {
            Command::Quit => self.handle_quit(),
            cmd => {
                self.quit_times = QUIT_CONFIRM_TIMES;
                self.execute(cmd);
                Outcome::Continue
            }
        }
    }

    /// The dirty-buffer quit countdown.
    fn handle_quit(&mut self) -> Outcome {
        if self.buffer.is_dirty() {
            self.quit_times -= 1;
            if self.quit_times == 0 {
                return Outcome::Quit;
            }
            self.set_status(format!(
                "WARNING!!! File has unsaved changes. \
                 Press Ctrl-Q {} more times to quit.",
                self.quit_times
            ));
            return Outcome::Continue;
        }
        Outcome::Quit
    }

    fn execute(&mut self, cmd: Command) {
        match cmd {
            Command::Move(motion) => self.apply_motion(motion),
            Command::InsertChar(ch) => self.insert_char_at_cursor(ch),
            Command::InsertNewline => self.insert_newline_at_cursor(),
            Command::DeleteBackward => self.delete_before_cursor(),
            Command::DeleteForward => self.delete_at_cursor(),
            Command::Save => self.request_save(),
            Command::Find => self.prompt = Some(Prompt::new(PromptPurpose::Find)),
            Command::Quit | Command::Nop => {}
        }
    }

    fn apply_motion(&mut self, motion: Motion) {
        match motion {
            Motion::Left => self.cursor.move_left(),
            Motion::Right => self.cursor.move_right(&self.buffer, &self.viewport),
            Motion::Up => self.cursor.move_up(),
            Motion::Down => self.cursor.move_down(&self.buffer),
            Motion::Home => self.cursor.move_home(),
            Motion::End => self.cursor.move_end(&self.buffer),
            Motion::PageUp => self.cursor.page_up(&self.viewport),
            Motion::PageDown => self.cursor.page_down(&self.buffer, &self.viewport),
        }
    }

    // -- Edits --------------------------------------------------------------

    /// Insert one character at the cursor, growing the buffer by an
    /// empty row first when the cursor sits at the virtual EOF row.
    fn insert_char_at_cursor(&mut self, ch: char) {
        if self.cursor.row == self.buffer.row_count() {
            self.buffer.insert_row(self.cursor.row, Row::new());
        }
        if let Some(row) = self.buffer.row_mut(self.cursor.row) {
            row.insert_char(self.cursor.col, ch);
            self.cursor.col += 1;
            self.buffer.mark_dirty();
        }
    }

    /// Backspace: delete left of the cursor, or join onto the previous
    /// row when at column 0.
    fn delete_before_cursor(&mut self) {
        if self.cursor.row >= self.buffer.row_count() {
            return;
        }
        if self.cursor.col == 0 && self.cursor.row == 0 {
            return;
        }

        if self.cursor.col > 0 {
            let len = self.buffer.row(self.cursor.row).map_or(0, Row::len);
            if self.cursor.col > len {
                // Unreflowed column past a shorter row's end: there is
                // nothing under the cursor to delete. Snap to the row
                // end; the buffer is untouched and stays clean.
                self.cursor.col = len;
                return;
            }
            if let Some(row) = self.buffer.row_mut(self.cursor.row) {
                row.delete_char(self.cursor.col - 1);
            }
            self.cursor.col -= 1;
            self.buffer.mark_dirty();
        } else if let Some(current) = self.buffer.remove_row(self.cursor.row) {
            let prev = self.cursor.row - 1;
            let prev_len = self.buffer.row(prev).map_or(0, Row::len);
            if let Some(row) = self.buffer.row_mut(prev) {
                row.join(current);
            }
            self.cursor.row = prev;
            self.cursor.col = prev_len;
            self.buffer.mark_dirty();
        }
    }

    /// Enter: split the current row at the cursor (or insert an empty
    /// row at column 0) and land on column 0 of the next row.
    fn insert_newline_at_cursor(&mut self) {
        let row_count = self.buffer.row_count();
        if self.cursor.row >= row_count {
            self.buffer.insert_row(row_count, Row::new());
        } else if self.cursor.col == 0 {
            self.buffer.insert_row(self.cursor.row, Row::new());
        } else {
            let right = self
                .buffer
                .row_mut(self.cursor.row)
                .map_or_else(Row::new, |row| row.split(self.cursor.col));
            self.buffer.insert_row(self.cursor.row + 1, right);
        }
        self.cursor.row = (self.cursor.row + 1).min(self.buffer.row_count());
        self.cursor.col = 0;
        self.buffer.mark_dirty();
    }

    /// Delete: remove the character under the cursor, or join the next
    /// row up when at end of line. No-op at the virtual EOF row.
    fn delete_at_cursor(&mut self) {
        let Some(len) = self.buffer.row(self.cursor.row).map(Row::len) else {
            return;
        };

        if self.cursor.col < len {
            if let Some(row) = self.buffer.row_mut(self.cursor.row) {
                row.delete_char(self.cursor.col);
            }
            self.buffer.mark_dirty();
        } else if let Some(next) = self.buffer.remove_row(self.cursor.row + 1) {
            if let Some(row) = self.buffer.row_mut(self.cursor.row) {
                row.join(next);
            }
            self.buffer.mark_dirty();
        }
    }

    // -- Save ---------------------------------------------------------------

    fn request_save(&mut self) {
        if self.buffer.path().is_some() {
            self.save_now(None);
        } else {
            self.prompt = Some(Prompt::new(PromptPurpose::SaveAs));
        }
    }

    fn save_now(&mut self, path: Option<PathBuf>) {
        let result = match path {
            Some(p) => self.buffer.save_as(p),
            None => self.buffer.save(),
        };
        match result {
            Ok(bytes) => self.set_status(format!("{bytes} bytes written to disk")),
            Err(err) => self.set_status(format!("Can't save! I/O error: {err}")),
        }
    }

    // -- Search -------------------------------------------------------------

    fn run_search(&mut self, query: &str) {
        if let Some(hit) = search::find(&self.buffer, query) {
            self.cursor = Cursor {
                col: hit.col,
                row: hit.row,
            };
            // Out-of-range sentinel: the next scroll() snaps the window
            // to the match row.
            self.viewport.row_offset = self.buffer.row_count();
            self.search_match = Some(hit);
        }
    }

    // -- Prompt -------------------------------------------------------------

    fn handle_prompt_key(&mut self, key: KeyEvent) {
        let Some(mut prompt) = self.prompt.take() else {
            return;
        };

        match key.code {
            KeyCode::Escape => match prompt.purpose {
                PromptPurpose::SaveAs => self.set_status("Save aborted."),
                PromptPurpose::Find => self.status = None,
            },
            KeyCode::Enter if !prompt.input.is_empty() => match prompt.purpose {
                PromptPurpose::SaveAs => self.save_now(Some(PathBuf::from(prompt.input))),
                PromptPurpose::Find => self.run_search(&prompt.input),
            },
            KeyCode::Backspace => {
                prompt.input.pop();
                self.prompt = Some(prompt);
            }
            KeyCode::Char(ch)
                if !key.modifiers.intersects(Modifiers::CTRL | Modifiers::ALT)
                    && !ch.is_control() =>
            {
                prompt.input.push(ch);
                self.prompt = Some(prompt);
            }
            // Enter with empty input, motion keys, control chords: the
            // prompt stays open and unchanged.
            _ => self.prompt = Some(prompt),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const ROWS: usize = 12; // 10 text rows + 2 bars
    const COLS: usize = 40;

    fn session(text: &str) -> Session {
        Session::new(Buffer::from_text(text), ROWS, COLS)
    }

    fn press(session: &mut Session, key: KeyEvent) -> Outcome {
        session.handle_key(key)
    }

    fn type_str(session: &mut Session, text: &str) {
        for ch in text.chars() {
            press(session, KeyEvent::plain(KeyCode::Char(ch)));
        }
    }

    fn row_text(session: &Session, at: usize) -> String {
        session.buffer().row(at).unwrap().text()
    }

    // -- Insert -------------------------------------------------------------

    #[test]
    fn typing_into_empty_buffer_appends_a_row() {
        let mut s = session("");
        type_str(&mut s, "hi");
        assert_eq!(s.buffer().row_count(), 1);
        assert_eq!(row_text(&s, 0), "hi");
        assert_eq!(s.cursor(), Cursor { col: 2, row: 0 });
        assert!(s.buffer().is_dirty());
    }

    #[test]
    fn insert_mid_row() {
        let mut s = session("ac\n");
        press(&mut s, KeyEvent::plain(KeyCode::Right));
        press(&mut s, KeyEvent::plain(KeyCode::Char('b')));
        assert_eq!(row_text(&s, 0), "abc");
    }

    // -- Backspace ----------------------------------------------------------

    #[test]
    fn backspace_at_origin_changes_nothing() {
        let mut s = session("abc\ndef\n");
        press(&mut s, KeyEvent::plain(KeyCode::Backspace));
        assert_eq!(s.buffer().row_count(), 2);
        assert_eq!(row_text(&s, 0), "abc");
        assert_eq!(row_text(&s, 1), "def");
        assert!(!s.buffer().is_dirty());
    }

    #[test]
    fn backspace_deletes_left_of_cursor() {
        let mut s = session("abc\n");
        press(&mut s, KeyEvent::plain(KeyCode::End));
        press(&mut s, KeyEvent::plain(KeyCode::Backspace));
        assert_eq!(row_text(&s, 0), "ab");
        assert_eq!(s.cursor().col, 2);
        assert!(s.buffer().is_dirty());
    }

    #[test]
    fn backspace_at_column_zero_joins_rows() {
        let mut s = session("abc\ndef\n");
        press(&mut s, KeyEvent::plain(KeyCode::Down));
        press(&mut s, KeyEvent::plain(KeyCode::Backspace));
        assert_eq!(s.buffer().row_count(), 1);
        assert_eq!(row_text(&s, 0), "abcdef");
        // Cursor lands at the join seam: the former length of "abc".
        assert_eq!(s.cursor(), Cursor { col: 3, row: 0 });
    }

    #[test]
    fn backspace_past_short_row_end_snaps_without_dirtying() {
        let mut s = session("longline\nab\n");
        press(&mut s, KeyEvent::plain(KeyCode::End)); // col 8
        press(&mut s, KeyEvent::plain(KeyCode::Down)); // "ab", col still 8

        press(&mut s, KeyEvent::plain(KeyCode::Backspace));
        assert_eq!(row_text(&s, 1), "ab", "nothing under the cursor to delete");
        assert!(!s.buffer().is_dirty());
        assert_eq!(s.cursor(), Cursor { col: 2, row: 1 });

        // Snapped to the row end, a second backspace deletes for real.
        press(&mut s, KeyEvent::plain(KeyCode::Backspace));
        assert_eq!(row_text(&s, 1), "a");
        assert!(s.buffer().is_dirty());
    }

    #[test]
    fn backspace_at_virtual_eof_row_is_noop() {
        let mut s = session("abc\n");
        press(&mut s, KeyEvent::plain(KeyCode::Down)); // row 1 == row_count
        press(&mut s, KeyEvent::plain(KeyCode::Backspace));
        assert_eq!(s.buffer().row_count(), 1);
        assert_eq!(row_text(&s, 0), "abc");
    }

    // -- Enter --------------------------------------------------------------

    #[test]
    fn newline_at_column_zero_inserts_empty_row_above() {
        let mut s = session("abc\n");
        press(&mut s, KeyEvent::plain(KeyCode::Enter));
        assert_eq!(s.buffer().row_count(), 2);
        assert_eq!(row_text(&s, 0), "");
        assert_eq!(row_text(&s, 1), "abc");
        assert_eq!(s.cursor(), Cursor { col: 0, row: 1 });
    }

    #[test]
    fn newline_mid_row_splits_it() {
        let mut s = session("hello world\n");
        for _ in 0..5 {
            press(&mut s, KeyEvent::plain(KeyCode::Right));
        }
        press(&mut s, KeyEvent::plain(KeyCode::Enter));
        assert_eq!(row_text(&s, 0), "hello");
        assert_eq!(row_text(&s, 1), " world");
        assert_eq!(s.cursor(), Cursor { col: 0, row: 1 });
    }

    #[test]
    fn newline_at_virtual_eof_appends_empty_row() {
        let mut s = session("");
        press(&mut s, KeyEvent::plain(KeyCode::Enter));
        assert_eq!(s.buffer().row_count(), 1);
        assert_eq!(row_text(&s, 0), "");
    }

    // -- Delete (forward) ---------------------------------------------------

    #[test]
    fn delete_removes_char_under_cursor() {
        let mut s = session("abc\n");
        press(&mut s, KeyEvent::plain(KeyCode::Delete));
        assert_eq!(row_text(&s, 0), "bc");
        assert_eq!(s.cursor().col, 0);
    }

    #[test]
    fn delete_at_end_of_row_joins_next_row_up() {
        let mut s = session("ab\ncd\n");
        press(&mut s, KeyEvent::plain(KeyCode::End));
        press(&mut s, KeyEvent::plain(KeyCode::Delete));
        assert_eq!(s.buffer().row_count(), 1);
        assert_eq!(row_text(&s, 0), "abcd");
    }

    #[test]
    fn delete_at_virtual_eof_is_noop() {
        let mut s = session("ab\n");
        press(&mut s, KeyEvent::plain(KeyCode::Down));
        press(&mut s, KeyEvent::plain(KeyCode::Delete));
        assert_eq!(s.buffer().row_count(), 1);
        assert_eq!(row_text(&s, 0), "ab");
    }

    // -- Quit countdown -----------------------------------------------------

    #[test]
    fn clean_buffer_quits_immediately() {
        let mut s = session("abc\n");
        assert_eq!(press(&mut s, KeyEvent::ctrl('q')), Outcome::Quit);
    }

    #[test]
    fn dirty_buffer_takes_three_quit_signals() {
        let mut s = session("abc\n");
        type_str(&mut s, "x");

        assert_eq!(press(&mut s, KeyEvent::ctrl('q')), Outcome::Continue);
        assert!(s.status_message().unwrap().text().contains("unsaved"));
        assert_eq!(press(&mut s, KeyEvent::ctrl('q')), Outcome::Continue);
        assert_eq!(press(&mut s, KeyEvent::ctrl('q')), Outcome::Quit);
    }

    #[test]
    fn any_other_key_rearms_the_countdown() {
        let mut s = session("abc\n");
        type_str(&mut s, "x");

        press(&mut s, KeyEvent::ctrl('q'));
        press(&mut s, KeyEvent::ctrl('q'));
        press(&mut s, KeyEvent::plain(KeyCode::Left));

        // Countdown starts over: three more signals needed.
        assert_eq!(press(&mut s, KeyEvent::ctrl('q')), Outcome::Continue);
        assert_eq!(press(&mut s, KeyEvent::ctrl('q')), Outcome::Continue);
        assert_eq!(press(&mut s, KeyEvent::ctrl('q')), Outcome::Quit);
    }

    // -- Save ---------------------------------------------------------------

    #[test]
    fn save_without_filename_opens_prompt() {
        let mut s = session("abc\n");
        press(&mut s, KeyEvent::ctrl('s'));
        let prompt = s.prompt().unwrap();
        assert!(prompt.display().starts_with("Save as: "));
    }

    #[test]
    fn cancelling_save_prompt_leaves_dirty_and_reports() {
        let mut s = session("abc\n");
        type_str(&mut s, "x");
        press(&mut s, KeyEvent::ctrl('s'));
        press(&mut s, KeyEvent::plain(KeyCode::Escape));

        assert!(s.prompt().is_none());
        assert!(s.buffer().is_dirty());
        assert_eq!(s.status_message().unwrap().text(), "Save aborted.");
    }

    #[test]
    fn save_as_via_prompt_writes_and_cleans() {
        let dir = std::env::temp_dir().join("milo_session_test_save");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("prompted.txt");
        let path_str = path.to_string_lossy().into_owned();

        let mut s = session("");
        type_str(&mut s, "data");
        press(&mut s, KeyEvent::ctrl('s'));
        type_str(&mut s, &path_str);
        press(&mut s, KeyEvent::plain(KeyCode::Enter));

        assert!(s.prompt().is_none());
        assert!(!s.buffer().is_dirty());
        assert!(s.status_message().unwrap().text().contains("bytes written"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "data\n");

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn failed_save_reports_error_and_stays_dirty() {
        let mut s = session("");
        type_str(&mut s, "data");
        press(&mut s, KeyEvent::ctrl('s'));
        type_str(&mut s, "/nonexistent/dir/file.txt");
        press(&mut s, KeyEvent::plain(KeyCode::Enter));

        assert!(s.buffer().is_dirty());
        assert!(s.status_message().unwrap().text().contains("I/O error"));
    }

    // -- Find ---------------------------------------------------------------

    fn ten_row_session() -> Session {
        let text: String = (0..10).map(|i| format!("row {i} text\n")).collect();
        let mut s = Session::new(Buffer::from_text(&text), 7, COLS); // 5 text rows
        // Replace row 3 so the query appears there only.
        s.buffer.row_mut(3).unwrap().insert_char(0, '!');
        s
    }

    #[test]
    fn search_moves_cursor_and_recenters() {
        let mut s = ten_row_session();
        press(&mut s, KeyEvent::ctrl('f'));
        type_str(&mut s, "!row");
        press(&mut s, KeyEvent::plain(KeyCode::Enter));

        assert_eq!(s.cursor(), Cursor { col: 0, row: 3 });
        assert_eq!(s.search_match().unwrap().row, 3);

        s.scroll();
        let vp = s.viewport();
        assert!(vp.row_offset <= 3 && 3 < vp.row_offset + vp.rows);
    }

    #[test]
    fn search_leaves_rows_unchanged() {
        let mut s = ten_row_session();
        let before: Vec<String> = s.buffer().rows().map(Row::text).collect();
        press(&mut s, KeyEvent::ctrl('f'));
        type_str(&mut s, "!row");
        press(&mut s, KeyEvent::plain(KeyCode::Enter));
        let after: Vec<String> = s.buffer().rows().map(Row::text).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn cancelled_find_changes_nothing() {
        let mut s = session("alpha\nbeta\n");
        press(&mut s, KeyEvent::ctrl('f'));
        type_str(&mut s, "beta");
        press(&mut s, KeyEvent::plain(KeyCode::Escape));

        assert_eq!(s.cursor(), Cursor::ORIGIN);
        assert!(s.search_match().is_none());
        assert!(s.prompt().is_none());
    }

    #[test]
    fn find_with_no_match_keeps_cursor() {
        let mut s = session("alpha\n");
        press(&mut s, KeyEvent::ctrl('f'));
        type_str(&mut s, "zzz");
        press(&mut s, KeyEvent::plain(KeyCode::Enter));
        assert_eq!(s.cursor(), Cursor::ORIGIN);
        assert!(s.search_match().is_none());
    }

    #[test]
    fn match_overlay_clears_on_next_key() {
        let mut s = session("alpha beta\n");
        press(&mut s, KeyEvent::ctrl('f'));
        type_str(&mut s, "beta");
        press(&mut s, KeyEvent::plain(KeyCode::Enter));
        assert!(s.search_match().is_some());

        press(&mut s, KeyEvent::plain(KeyCode::Left));
        assert!(s.search_match().is_none());
    }

    #[test]
    fn quit_warning_also_drops_the_match_overlay() {
        let mut s = session("alpha beta\n");
        type_str(&mut s, "x"); // dirty, so Ctrl-Q only warns
        press(&mut s, KeyEvent::ctrl('f'));
        type_str(&mut s, "beta");
        press(&mut s, KeyEvent::plain(KeyCode::Enter));
        assert!(s.search_match().is_some());

        assert_eq!(press(&mut s, KeyEvent::ctrl('q')), Outcome::Continue);
        assert!(s.search_match().is_none());
    }

    // -- Prompt editing -----------------------------------------------------

    #[test]
    fn prompt_backspace_edits_input() {
        let mut s = session("abc\n");
        press(&mut s, KeyEvent::ctrl('f'));
        type_str(&mut s, "abx");
        press(&mut s, KeyEvent::plain(KeyCode::Backspace));
        assert_eq!(s.prompt().unwrap().input(), "ab");
    }

    #[test]
    fn prompt_enter_with_empty_input_stays_open() {
        let mut s = session("abc\n");
        press(&mut s, KeyEvent::ctrl('f'));
        press(&mut s, KeyEvent::plain(KeyCode::Enter));
        assert!(s.prompt().is_some());
    }

    #[test]
    fn prompt_ignores_control_chords() {
        let mut s = session("abc\n");
        press(&mut s, KeyEvent::ctrl('f'));
        press(&mut s, KeyEvent::ctrl('x'));
        assert_eq!(s.prompt().unwrap().input(), "");
    }

    #[test]
    fn prompt_display_includes_template() {
        let mut s = session("abc\n");
        press(&mut s, KeyEvent::ctrl('f'));
        type_str(&mut s, "q");
        assert_eq!(s.prompt().unwrap().display(), "Search: q (ESC to cancel)");
    }

    // -- Status message -----------------------------------------------------

    #[test]
    fn status_message_starts_unexpired() {
        let mut s = session("");
        s.set_status("hello");
        assert!(!s.status_message().unwrap().is_expired());
        assert_eq!(s.status_message().unwrap().text(), "hello");
    }

    // -- Motion integration -------------------------------------------------

    #[test]
    fn column_survives_moving_through_short_row() {
        let mut s = session("longline\nab\nlongline\n");
        for _ in 0..6 {
            press(&mut s, KeyEvent::plain(KeyCode::Right));
        }
        press(&mut s, KeyEvent::plain(KeyCode::Down));
        assert_eq!(s.cursor().col, 6, "column is not reflowed");
        press(&mut s, KeyEvent::plain(KeyCode::Down));
        assert_eq!(s.cursor(), Cursor { col: 6, row: 2 });
    }

    #[test]
    fn page_down_scrolls_viewport_after_scroll_fix() {
        let text: String = (0..30).map(|i| format!("line {i}\n")).collect();
        let mut s = Session::new(Buffer::from_text(&text), 12, COLS);
        press(&mut s, KeyEvent::plain(KeyCode::PageDown));
        s.scroll();
        assert_eq!(s.cursor().row, 10);
        assert!(s.viewport().contains_row(10));
    }
}
