//! Terminal front-end for native builds
//!
//! Presenter and event source over crossterm. No game logic here: the
//! draw list is rasterized onto character cells, and key events are
//! translated into [`InputEvent`]s.

use std::io::{Write, stdout};
use std::sync::mpsc;
use std::thread;

use anyhow::{Context, Result};
use crossterm::{
    ExecutableCommand, QueueableCommand, cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    style::{self, Color as TermColor, Print},
    terminal,
};

use crate::sim::{Color, DrawCommand, InputEvent, Key, Outcome, Rect, colors};

// ── Setup / teardown ──────────────────────────────────────────────────────────

/// Raw mode + alternate screen for as long as the guard lives
pub struct TerminalGuard {
    _private: (),
}

impl TerminalGuard {
    pub fn enter() -> Result<Self> {
        terminal::enable_raw_mode().context("Terminal could not be switched to raw mode")?;
        let guard = Self { _private: () };

        let mut out = stdout();
        out.execute(terminal::EnterAlternateScreen)
            .context("Terminal could not enter the alternate screen")?;
        out.execute(cursor::Hide)?;
        out.execute(terminal::SetTitle(crate::consts::WINDOW_TITLE))?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut out = stdout();
        let _ = out.execute(style::ResetColor);
        let _ = out.execute(cursor::Show);
        let _ = out.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

// ── Event source ──────────────────────────────────────────────────────────────

/// Translate a terminal event into a game event
///
/// Only presses and auto-repeats count; releases and unbound keys are
/// ignored.
pub fn map_event(event: &Event) -> Option<InputEvent> {
    let Event::Key(KeyEvent {
        code,
        modifiers,
        kind,
        ..
    }) = event
    else {
        return None;
    };
    if *kind == KeyEventKind::Release {
        return None;
    }

    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(InputEvent::KeyDown(Key::Left))
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(InputEvent::KeyDown(Key::Right))
        }
        KeyCode::Char(' ') => Some(InputEvent::KeyDown(Key::Fire)),
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(InputEvent::Quit),
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(InputEvent::Quit),
        _ => None,
    }
}

/// Pollable queue of terminal events
///
/// A dedicated thread blocks on `event::read` and forwards everything
/// through a channel so the game loop never blocks on input.
pub struct EventSource {
    rx: mpsc::Receiver<Event>,
}

impl EventSource {
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::channel::<Event>();
        thread::spawn(move || {
            while let Ok(ev) = event::read() {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
        });
        Self::from_receiver(rx)
    }

    fn from_receiver(rx: mpsc::Receiver<Event>) -> Self {
        Self { rx }
    }

    /// All game events that arrived since the last poll, in order
    pub fn poll(&self) -> Vec<InputEvent> {
        self.rx.try_iter().filter_map(|ev| map_event(&ev)).collect()
    }

    /// Block until a fresh key press (or the reader thread is gone)
    ///
    /// Anything already queued, and auto-repeat from a key held down
    /// during play, does not count.
    pub fn wait_key(&self) {
        self.rx.try_iter().for_each(drop);
        while let Ok(ev) = self.rx.recv() {
            if let Event::Key(KeyEvent {
                kind: KeyEventKind::Press,
                ..
            }) = ev
            {
                return;
            }
        }
    }
}

// ── Presenter ─────────────────────────────────────────────────────────────────

/// Rasterize a draw list onto a `cols` x `rows` grid of cells
///
/// A cell takes the color of the last command whose rectangle overlaps it,
/// so later commands paint over earlier ones. `None` is background.
pub fn rasterize(
    commands: &[DrawCommand],
    playfield: (i32, i32),
    cols: u16,
    rows: u16,
) -> Vec<Option<Color>> {
    let (pw, ph) = (i64::from(playfield.0), i64::from(playfield.1));
    let (cols_i, rows_i) = (i64::from(cols.max(1)), i64::from(rows.max(1)));
    let mut cells = vec![None; usize::from(cols) * usize::from(rows)];
    // Cell edges lie within the playfield, so they fit back into i32
    let edge = |i: i64, extent: i64, n: i64| (i * extent / n) as i32;

    for row in 0..rows_i {
        let y0 = edge(row, ph, rows_i);
        let y1 = edge(row + 1, ph, rows_i);
        for col in 0..cols_i {
            let x0 = edge(col, pw, cols_i);
            let x1 = edge(col + 1, pw, cols_i);
            let cell = Rect::new(x0, y0, (x1 - x0).max(1), (y1 - y0).max(1));

            let color = commands
                .iter()
                .rev()
                .find(|c| c.rect.intersects(&cell))
                .map(|c| c.color);
            if let Some(slot) = cells.get_mut((row * cols_i + col) as usize) {
                *slot = color;
            }
        }
    }
    cells
}

fn term_color(c: Color) -> TermColor {
    TermColor::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

/// Render one complete frame sized to the current terminal
pub fn render<W: Write>(
    out: &mut W,
    commands: &[DrawCommand],
    playfield: (i32, i32),
) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let cells = rasterize(commands, playfield, cols, rows);

    for (row, line) in cells.chunks(usize::from(cols.max(1))).enumerate() {
        out.queue(cursor::MoveTo(0, row as u16))?;
        let mut current = None;
        for cell in line {
            let color = cell.unwrap_or(colors::BACKGROUND);
            if current != Some(color) {
                out.queue(style::SetBackgroundColor(term_color(color)))?;
                current = Some(color);
            }
            out.queue(Print(' '))?;
        }
    }

    out.queue(style::ResetColor)?;
    out.flush()
}

/// Draw the end-of-session box over the last frame
pub fn show_outcome<W: Write>(out: &mut W, outcome: Outcome) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let hint = "Press any key to exit";
    let lines = [outcome.title(), "", outcome.message(), "", hint];
    let inner = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) + 4;

    let left = (cols as usize).saturating_sub(inner + 2) / 2;
    let top = (rows as usize).saturating_sub(lines.len() + 2) / 2;

    out.queue(style::SetBackgroundColor(TermColor::Black))?;
    out.queue(style::SetForegroundColor(TermColor::White))?;

    out.queue(cursor::MoveTo(left as u16, top as u16))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(inner))))?;
    for (i, line) in lines.iter().enumerate() {
        let pad = inner - line.chars().count();
        let text = format!(
            "│{}{}{}│",
            " ".repeat(pad / 2),
            line,
            " ".repeat(pad - pad / 2)
        );
        out.queue(cursor::MoveTo(left as u16, (top + 1 + i) as u16))?;
        out.queue(Print(text))?;
    }
    out.queue(cursor::MoveTo(left as u16, (top + 1 + lines.len()) as u16))?;
    out.queue(Print(format!("└{}┘", "─".repeat(inner))))?;

    out.queue(style::ResetColor)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_map_movement_and_fire() {
        assert_eq!(map_event(&key(KeyCode::Left)), Some(InputEvent::KeyDown(Key::Left)));
        assert_eq!(map_event(&key(KeyCode::Char('d'))), Some(InputEvent::KeyDown(Key::Right)));
        assert_eq!(map_event(&key(KeyCode::Char(' '))), Some(InputEvent::KeyDown(Key::Fire)));
    }

    #[test]
    fn test_map_quit_keys() {
        assert_eq!(map_event(&key(KeyCode::Esc)), Some(InputEvent::Quit));
        assert_eq!(map_event(&key(KeyCode::Char('q'))), Some(InputEvent::Quit));
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(map_event(&ctrl_c), Some(InputEvent::Quit));
    }

    #[test]
    fn test_map_ignores_release_and_unbound() {
        let release = Event::Key(KeyEvent::new_with_kind(
            KeyCode::Left,
            KeyModifiers::NONE,
            KeyEventKind::Release,
        ));
        assert_eq!(map_event(&release), None);
        assert_eq!(map_event(&key(KeyCode::Char('c'))), None);
        assert_eq!(map_event(&Event::FocusLost), None);
    }

    #[test]
    fn test_wait_key_skips_stale_and_repeated_keys() {
        let (tx, rx) = mpsc::channel();
        let source = EventSource::from_receiver(rx);

        // Pressed during play, before the result is shown
        tx.send(key(KeyCode::Char(' '))).unwrap();

        let delay = Duration::from_millis(50);
        let sender = thread::spawn(move || {
            thread::sleep(delay);
            let held = KeyEvent::new_with_kind(
                KeyCode::Left,
                KeyModifiers::NONE,
                KeyEventKind::Repeat,
            );
            tx.send(Event::Key(held)).unwrap();
            tx.send(Event::FocusLost).unwrap();
            thread::sleep(delay);
            tx.send(key(KeyCode::Enter)).unwrap();
        });

        let start = Instant::now();
        source.wait_key();
        assert!(start.elapsed() >= delay * 3 / 2);
        sender.join().unwrap();
    }

    #[test]
    fn test_wait_key_returns_when_reader_is_gone() {
        let (tx, rx) = mpsc::channel::<Event>();
        drop(tx);
        EventSource::from_receiver(rx).wait_key();
    }

    #[test]
    fn test_rasterize_paints_in_order() {
        let commands = [
            DrawCommand {
                rect: Rect::new(0, 0, 40, 40),
                color: colors::ENEMY,
            },
            DrawCommand {
                rect: Rect::new(0, 0, 10, 10),
                color: colors::PROJECTILE,
            },
        ];
        // 8 x 8 cells of 10 x 10 pixels
        let cells = rasterize(&commands, (80, 80), 8, 8);
        assert_eq!(cells.len(), 64);
        assert_eq!(cells[0], Some(colors::PROJECTILE));
        assert_eq!(cells[1], Some(colors::ENEMY));
        assert_eq!(cells[3], Some(colors::ENEMY));
        assert_eq!(cells[4], None);
        assert_eq!(cells[4 * 8], None);
    }

    #[test]
    fn test_rasterize_small_rect_still_visible() {
        // Cells are 64 x 48 pixels, projectile is 10 x 10
        let commands = [DrawCommand {
            rect: Rect::new(300, 200, 10, 10),
            color: colors::PROJECTILE,
        }];
        let cells = rasterize(&commands, (640, 480), 10, 10);
        assert_eq!(cells.iter().filter(|c| c.is_some()).count(), 1);
        assert_eq!(cells[4 * 10 + 4], Some(colors::PROJECTILE));
    }

    #[test]
    fn test_rasterize_huge_playfield() {
        let commands = [DrawCommand {
            rect: Rect::new(0, i32::MAX - 10, 50, 50),
            color: colors::ENEMY,
        }];
        let cells = rasterize(&commands, (i32::MAX, i32::MAX), 400, 200);
        assert_eq!(cells.len(), 400 * 200);
        assert_eq!(cells[199 * 400], Some(colors::ENEMY));
    }

    #[test]
    fn test_rasterize_offscreen_is_ignored() {
        let commands = [DrawCommand {
            rect: Rect::new(0, -200, 50, 50),
            color: colors::ENEMY,
        }];
        let cells = rasterize(&commands, (640, 480), 20, 10);
        assert!(cells.iter().all(Option::is_none));
    }
}
