use std::io;
use std::io::Stdout;
use std::io::Write;

use crossterm::cursor;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::execute;
use crossterm::queue;
use crossterm::style;
use crossterm::style::Color;
use crossterm::terminal;
use thiserror::Error;

/// Smallest terminal that still leaves room for the border, the status
/// bar, and at least one grid cell.
pub const MIN_COLS: u16 = 3;
pub const MIN_ROWS: u16 = 4;

#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),

    #[error("terminal too small: {cols}x{rows}, need at least {MIN_COLS}x{MIN_ROWS}")]
    TooSmall { cols: u16, rows: u16 },
}

/// How a staged character is painted
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Style {
    /// Default colors (border, dead cells)
    Plain,

    /// White background, the look of a living cell
    Alive,

    /// Status bar: black on white
    Bar,
}

/// A character surface over the terminal.
///
/// Construction switches the terminal into raw mode on the alternate
/// screen with the cursor hidden and mouse reporting on. Writes are
/// staged in stdout's buffer and only reach the terminal on
/// [`Surface::show`]. Dropping the surface restores the terminal, on
/// every exit path, panics included.
pub struct Surface {
    out: Stdout,
    cols: u16,
    rows: u16,
}

impl Surface {
    pub fn new() -> Result<Self, SurfaceError> {
        let (cols, rows) = terminal::size()?;

        if cols < MIN_COLS || rows < MIN_ROWS {
            return Err(SurfaceError::TooSmall { cols, rows });
        }

        let mut out = io::stdout();

        terminal::enable_raw_mode()?;
        execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            EnableMouseCapture
        )?;

        Ok(Self { out, cols, rows })
    }

    /// Character dimensions of the terminal at launch
    pub fn size(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    /// Stage one character at a terminal coordinate
    pub fn set(&mut self, x: u16, y: u16, ch: char, style: Style) -> io::Result<()> {
        queue!(self.out, cursor::MoveTo(x, y))?;

        match style {
            Style::Plain => queue!(self.out, style::Print(ch)),
            Style::Alive => queue!(
                self.out,
                style::SetBackgroundColor(Color::White),
                style::Print(ch),
                style::ResetColor
            ),
            Style::Bar => queue!(
                self.out,
                style::SetBackgroundColor(Color::White),
                style::SetForegroundColor(Color::Black),
                style::Print(ch),
                style::ResetColor
            ),
        }
    }

    /// Stage a line of text starting at `(x, y)`, padded with spaces out
    /// to `width` characters
    pub fn set_text(
        &mut self,
        x: u16,
        y: u16,
        text: &str,
        width: usize,
        style: Style,
    ) -> io::Result<()> {
        let pad = std::iter::repeat(' ');

        for (i, ch) in text.chars().chain(pad).take(width).enumerate() {
            self.set(x + i as u16, y, ch, style)?;
        }

        Ok(())
    }

    /// Flush staged changes to the physical terminal
    pub fn show(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

impl Drop for Surface {
    fn drop(&mut self) {
        let _ = execute!(
            self.out,
            DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}
