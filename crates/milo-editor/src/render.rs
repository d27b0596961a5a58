//! Frame rendering — the full screen repaint, composed off-screen.
//!
//! [`draw`] rebuilds the entire frame from session state into an
//! [`OutputBuffer`]; the caller flushes it to the terminal in a single
//! write. There is no damage tracking — per-line `EL` clears plus the
//! one-write flush are what keep the repaint tear-free.
//!
//! Frame layout, top to bottom: the text area (one terminal row per
//! visible buffer row, `~` filler past end of file), the inverse-video
//! status bar, and the message bar. The cursor is hidden for the
//! duration of the repaint and repositioned at the end.

use std::io;

use milo_term::ansi::{self, Color};
use milo_term::output::OutputBuffer;

use crate::buffer::Buffer;
use crate::highlight::Highlight;
use crate::row::Row;
use crate::session::Session;

/// Version string shown in the welcome message.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// How many characters of the filename the status bar shows.
const STATUS_NAME_MAX: usize = 20;

/// Render one complete frame of the session into `out`.
///
/// The session's scroll invariant must already hold — call
/// [`Session::scroll`] first.
///
/// # Errors
///
/// Propagates writer errors; writing to an [`OutputBuffer`] never fails.
pub fn draw(session: &Session, out: &mut OutputBuffer) -> io::Result<()> {
    ansi::cursor_hide(out)?;
    ansi::cursor_home(out)?;

    draw_rows(session, out)?;
    draw_status_bar(session, out)?;
    draw_message_bar(session, out)?;

    let vp = session.viewport();
    let cursor = session.cursor();
    ansi::cursor_to(
        out,
        clamp_u16(cursor.col.saturating_sub(vp.col_offset)),
        clamp_u16(cursor.row.saturating_sub(vp.row_offset)),
    )?;
    ansi::cursor_show(out)?;
    Ok(())
}

fn clamp_u16(v: usize) -> u16 {
    u16::try_from(v).unwrap_or(u16::MAX)
}

// ---------------------------------------------------------------------------
// Text area
// ---------------------------------------------------------------------------

fn draw_rows(session: &Session, out: &mut OutputBuffer) -> io::Result<()> {
    let vp = session.viewport();
    let buffer = session.buffer();

    for y in 0..vp.rows {
        let file_row = y + vp.row_offset;
        if let Some(row) = buffer.row(file_row) {
            draw_text_row(session, file_row, row, out)?;
        } else if buffer.row_count() == 0 && y == vp.rows / 3 {
            draw_welcome(vp.cols, out);
        } else {
            out.push_char('~');
        }
        ansi::clear_line(out)?;
        out.push_str("\r\n");
    }
    Ok(())
}

/// The centered welcome line, shown only for a pathless empty buffer.
fn draw_welcome(cols: usize, out: &mut OutputBuffer) {
    let welcome: String = format!("milo editor -- version {VERSION}")
        .chars()
        .take(cols)
        .collect();

    let mut padding = (cols.saturating_sub(welcome.chars().count())) / 2;
    if padding > 0 {
        out.push_char('~');
        padding -= 1;
    }
    for _ in 0..padding {
        out.push_char(' ');
    }
    out.push_str(&welcome);
}

/// One buffer row: highlight runs, the transient search-match overlay,
/// and inverse placeholders for control characters.
fn draw_text_row(
    session: &Session,
    file_row: usize,
    row: &Row,
    out: &mut OutputBuffer,
) -> io::Result<()> {
    let vp = session.viewport();
    let overlay = session.search_match().filter(|m| m.row == file_row);

    let visible = row.len().min(vp.cols);
    let mut current = Color::Default;

    for i in 0..visible {
        let ch = row.chars()[i];
        let mut class = row.hl()[i];
        if let Some(m) = overlay {
            if (m.col..m.col + m.len).contains(&i) {
                class = Highlight::Match;
            }
        }

        if ch.is_control() {
            // Caret notation: Ctrl-A..Ctrl-Z as @-relative letters,
            // anything else as '?'. SGR 0 drops the run color, so
            // restore it afterwards.
            let sym = if (ch as u32) <= 26 {
                char::from(b'@' + ch as u8)
            } else {
                '?'
            };
            ansi::invert(out)?;
            out.push_char(sym);
            ansi::reset(out)?;
            if current != Color::Default {
                ansi::fg(out, current)?;
            }
        } else {
            let color = class.color();
            if color != current {
                ansi::fg(out, color)?;
                current = color;
            }
            out.push_char(ch);
        }
    }

    if current != Color::Default {
        ansi::fg(out, Color::Default)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Status bar
// ---------------------------------------------------------------------------

/// Inverse-video bar: filename (or `[No Name]`), line count, dirty
/// marker on the left; `current/total` row indicator right-justified.
fn draw_status_bar(session: &Session, out: &mut OutputBuffer) -> io::Result<()> {
    let vp = session.viewport();
    let buffer: &Buffer = session.buffer();

    ansi::invert(out)?;

    let name: String = buffer
        .display_name()
        .unwrap_or_else(|| "[No Name]".to_owned())
        .chars()
        .take(STATUS_NAME_MAX)
        .collect();
    let modified = if buffer.is_dirty() { " (modified)" } else { "" };
    let left = format!("{name} - {} lines{modified}", buffer.row_count());
    let right = format!("{}/{}", session.cursor().row + 1, buffer.row_count());

    let left: String = left.chars().take(vp.cols).collect();
    let mut len = left.chars().count();
    out.push_str(&left);

    let right_len = right.chars().count();
    while len < vp.cols {
        if vp.cols - len == right_len {
            out.push_str(&right);
            break;
        }
        out.push_char(' ');
        len += 1;
    }

    ansi::reset(out)?;
    out.push_str("\r\n");
    Ok(())
}

// ---------------------------------------------------------------------------
// Message bar
// ---------------------------------------------------------------------------

/// Bottom line: an active prompt wins; otherwise the status message
/// until it expires; otherwise blank.
fn draw_message_bar(session: &Session, out: &mut OutputBuffer) -> io::Result<()> {
    ansi::clear_line(out)?;

    let text = session.prompt().map_or_else(
        || {
            session
                .status_message()
                .filter(|m| !m.is_expired())
                .map(|m| m.text().to_owned())
        },
        |p| Some(p.display()),
    );

    if let Some(text) = text {
        let clipped: String = text.chars().take(session.viewport().cols).collect();
        out.push_str(&clipped);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use milo_term::input::{KeyCode, KeyEvent};

    const ROWS: usize = 8; // 6 text rows + status + message
    const COLS: usize = 40;

    fn session(text: &str) -> Session {
        Session::new(Buffer::from_text(text), ROWS, COLS)
    }

    fn frame(s: &mut Session) -> String {
        s.scroll();
        let mut out = OutputBuffer::new();
        draw(s, &mut out).unwrap();
        String::from_utf8(out.as_bytes().to_vec()).unwrap()
    }

    fn type_str(s: &mut Session, text: &str) {
        for ch in text.chars() {
            s.handle_key(KeyEvent::plain(KeyCode::Char(ch)));
        }
    }

    // -- Frame envelope -----------------------------------------------------

    #[test]
    fn frame_hides_cursor_first_and_shows_it_last() {
        let f = frame(&mut session("abc\n"));
        assert!(f.starts_with("\x1b[?25l\x1b[H"));
        assert!(f.ends_with("\x1b[?25h"));
    }

    #[test]
    fn frame_positions_cursor_at_origin_initially() {
        let f = frame(&mut session("abc\n"));
        assert!(f.ends_with("\x1b[1;1H\x1b[?25h"));
    }

    #[test]
    fn cursor_position_is_viewport_relative() {
        let text: String = (0..20).map(|i| format!("line {i}\n")).collect();
        let mut s = Session::new(Buffer::from_text(&text), ROWS, COLS);
        for _ in 0..10 {
            s.handle_key(KeyEvent::plain(KeyCode::Down));
        }
        // 6 text rows: cursor row 10, offset 5, screen row 5 -> CUP row 6.
        let f = frame(&mut s);
        assert!(f.ends_with("\x1b[6;1H\x1b[?25h"));
    }

    #[test]
    fn every_text_row_is_cleared_to_eol() {
        let f = frame(&mut session("abc\n"));
        let clears = f.matches("\x1b[K").count();
        // 6 text rows + the message bar.
        assert_eq!(clears, 7);
    }

    // -- Filler and welcome -------------------------------------------------

    #[test]
    fn rows_past_end_of_file_show_tildes() {
        let f = frame(&mut session("only\n"));
        // 5 of the 6 text rows are past EOF.
        assert_eq!(f.matches('~').count(), 5);
    }

    #[test]
    fn empty_buffer_shows_centered_welcome() {
        let f = frame(&mut session(""));
        assert!(f.contains(&format!("milo editor -- version {VERSION}")));
        // The welcome row still begins with the filler tilde.
        let welcome_line = f
            .split("\r\n")
            .find(|line| line.contains("milo"))
            .unwrap();
        assert!(welcome_line.contains("~ "));
    }

    #[test]
    fn non_empty_buffer_has_no_welcome() {
        let f = frame(&mut session("x\n"));
        assert!(!f.contains("version"));
    }

    // -- Highlight runs -----------------------------------------------------

    #[test]
    fn numbers_render_red_then_reset_to_default() {
        let f = frame(&mut session("x 42\n"));
        assert!(f.contains("\x1b[31m42\x1b[39m"));
    }

    #[test]
    fn strings_render_magenta() {
        let f = frame(&mut session("say \"hi\"\n"));
        assert!(f.contains("\x1b[35m\"hi\"\x1b[39m"));
    }

    #[test]
    fn color_is_emitted_once_per_run() {
        let f = frame(&mut session("123\n"));
        assert_eq!(f.matches("\x1b[31m").count(), 1);
    }

    #[test]
    fn plain_text_emits_no_color_changes() {
        let f = frame(&mut session("hello\n"));
        assert!(!f.contains("\x1b[31m"));
        assert!(!f.contains("\x1b[35m"));
    }

    // -- Control characters -------------------------------------------------

    #[test]
    fn control_char_renders_as_inverse_placeholder() {
        let f = frame(&mut session("a\u{1}b\n"));
        assert!(f.contains("\x1b[7mA\x1b[m"));
    }

    #[test]
    fn control_char_restores_the_current_color() {
        // The placeholder sits inside a string run; the magenta must
        // resume for the rest of the run without a fresh SGR.
        let f = frame(&mut session("\"a\u{1}b\"\n"));
        assert!(f.contains("\x1b[35m\"a\x1b[7mA\x1b[m\x1b[35mb\""));
    }

    #[test]
    fn high_control_char_renders_question_mark() {
        let f = frame(&mut session("a\u{7f}b\n"));
        assert!(f.contains("\x1b[7m?\x1b[m"));
    }

    // -- Search match overlay -----------------------------------------------

    #[test]
    fn search_hit_renders_blue_without_touching_stored_classes() {
        let mut s = session("alpha beta\n");
        s.handle_key(KeyEvent::ctrl('f'));
        type_str(&mut s, "beta");
        s.handle_key(KeyEvent::plain(KeyCode::Enter));

        let f = frame(&mut s);
        assert!(f.contains("\x1b[34mbeta"));
        assert!(
            s.buffer().row(0).unwrap().hl().iter().all(|&h| h != Highlight::Match),
            "overlay must not be written into the row"
        );
    }

    #[test]
    fn overlay_gone_after_next_key() {
        let mut s = session("alpha beta\n");
        s.handle_key(KeyEvent::ctrl('f'));
        type_str(&mut s, "beta");
        s.handle_key(KeyEvent::plain(KeyCode::Enter));
        s.handle_key(KeyEvent::plain(KeyCode::Right));

        let f = frame(&mut s);
        assert!(!f.contains("\x1b[34m"));
    }

    // -- Status bar ---------------------------------------------------------

    #[test]
    fn status_bar_is_inverse_and_shows_no_name() {
        let f = frame(&mut session(""));
        assert!(f.contains("\x1b[7m[No Name] - 0 lines"));
    }

    #[test]
    fn status_bar_shows_line_count_and_position() {
        let mut s = session("a\nb\nc\n");
        s.handle_key(KeyEvent::plain(KeyCode::Down));
        let f = frame(&mut s);
        assert!(f.contains(" - 3 lines"));
        assert!(f.contains("2/3"));
    }

    #[test]
    fn status_bar_marks_dirty_buffers() {
        let mut s = session("a\n");
        assert!(!frame(&mut s).contains("(modified)"));
        type_str(&mut s, "x");
        assert!(frame(&mut s).contains("(modified)"));
    }

    #[test]
    fn status_bar_fills_the_whole_width() {
        let f = frame(&mut session("a\n"));
        let bar = f
            .split("\x1b[7m")
            .nth(1)
            .unwrap()
            .split("\x1b[m")
            .next()
            .unwrap();
        assert_eq!(bar.chars().count(), COLS);
    }

    // -- Message bar --------------------------------------------------------

    #[test]
    fn status_message_appears_on_the_message_bar() {
        let mut s = session("a\n");
        s.set_status("HELP: Ctrl-S = save | Ctrl-Q = quit | Ctrl-F = find");
        let f = frame(&mut s);
        assert!(f.contains("HELP: Ctrl-S = save"));
    }

    #[test]
    fn message_is_clipped_to_the_screen_width() {
        let mut s = session("a\n");
        s.set_status("z".repeat(COLS + 10));
        let f = frame(&mut s);
        let bar = f.rsplit("\x1b[K").next().unwrap();
        let text: &str = bar.split('\x1b').next().unwrap();
        assert_eq!(text.chars().count(), COLS);
    }

    #[test]
    fn active_prompt_wins_over_status_message() {
        let mut s = session("a\n");
        s.set_status("old message");
        s.handle_key(KeyEvent::ctrl('f'));
        type_str(&mut s, "qu");
        let f = frame(&mut s);
        assert!(f.contains("Search: qu (ESC to cancel)"));
        assert!(!f.contains("old message"));
    }
}
