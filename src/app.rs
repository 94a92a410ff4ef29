use std::sync::mpsc;
use std::sync::mpsc::Receiver;
use std::sync::mpsc::TryRecvError;
use std::thread;
use std::time::Duration;
use std::time::Instant;

use anyhow::Context;
use tracing::debug;
use tracing::info;

use crate::events;
use crate::events::Event;
use crate::grid::Grid;
use crate::grid::R_PENTOMINO;
use crate::surface::Style;
use crate::surface::Surface;

/// Target frame rate of the render loop
pub const FPS: u32 = 60;

/// Bound on the input queue between the polling thread and the loop.
/// Anything past this in a single frame is dropped with a warning.
const EVENT_QUEUE_LEN: usize = 16;

/// Fixed slack taken off the pacing sleep so the flush lands on time
const SLEEP_SLACK: Duration = Duration::from_micros(500);

enum Flow {
    Resume,
    Quit,
}

struct App {
    surface: Surface,
    grid: Grid,

    /// Wall-clock budget of a single frame, `1 / FPS`
    frame_dur: Duration,

    /// Set once, when the loop starts
    start: Instant,

    /// Total time spent paused, accumulated on every resume
    paused_time: Duration,

    /// Frames rendered since the loop started
    frames: u64,
}

/// Run the simulation until the user hits Escape
pub fn run() -> anyhow::Result<()> {
    let surface = Surface::new().context("failed to initialize terminal surface")?;
    let (cols, rows) = surface.size();

    // One character of border on each side, one row of status bar
    let grid = Grid::new((cols - 2) as usize, (rows - 3) as usize);

    let mut app = App {
        surface,
        grid,
        frame_dur: Duration::from_secs(1) / FPS,
        start: Instant::now(),
        paused_time: Duration::ZERO,
        frames: 0,
    };

    app.run()
}

impl App {
    fn run(&mut self) -> anyhow::Result<()> {
        let (tx, rx) = mpsc::sync_channel(EVENT_QUEUE_LEN);
        thread::spawn(move || events::forward_events(tx));

        self.draw_border()?;

        let (row, col) = (self.grid.height() / 2, self.grid.width() / 2);
        self.grid.place(R_PENTOMINO, row, col);

        info!(
            width = self.grid.width(),
            height = self.grid.height(),
            "starting simulation"
        );

        self.start = Instant::now();

        loop {
            // At most one queued event per frame, never waiting for one
            match rx.try_recv() {
                Ok(Event::Quit) => break,
                Ok(Event::TogglePause) => {
                    debug!("paused");

                    match self.pause(&rx) {
                        Flow::Quit => break,
                        Flow::Resume => debug!("resumed"),
                    }
                }

                // Clicks only place cells while paused
                Ok(Event::Click { .. }) => {}

                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => break,
            }

            let frame_start = Instant::now();

            self.grid.step();
            self.paint_cells()?;

            self.frames += 1;

            self.paint_status()?;

            thread::sleep(pacing_sleep(frame_start.elapsed(), self.frame_dur));

            self.surface.show()?;
        }

        Ok(())
    }

    /// Paused mode. The simulation stands still while the player draws
    /// cells with the mouse; Space resumes, Escape still quits.
    ///
    /// Time spent here is added to `paused_time` on resume so the status
    /// bar's clock and FPS only count running time.
    fn pause(&mut self, rx: &Receiver<Event>) -> Flow {
        let pause_start = Instant::now();

        loop {
            match rx.recv() {
                Ok(Event::TogglePause) => {
                    self.paused_time += pause_start.elapsed();
                    return Flow::Resume;
                }
                Ok(Event::Click { x, y }) => {
                    // A failed repaint is not worth dying for mid-pause
                    if let Err(e) = self.toggle_cell(x, y) {
                        debug!("cell repaint failed: {e}");
                    }
                }
                Ok(Event::Quit) | Err(_) => return Flow::Quit,
            }
        }
    }

    /// Toggle the cell under a mouse click and repaint that single
    /// character immediately. Clicks on the border or the status bar do
    /// nothing.
    fn toggle_cell(&mut self, x: u16, y: u16) -> anyhow::Result<()> {
        if x == 0 || y == 0 {
            return Ok(());
        }

        let (row, col) = ((y - 1) as usize, (x - 1) as usize);

        if row >= self.grid.height() || col >= self.grid.width() {
            return Ok(());
        }

        let alive = self.grid.toggle(row, col);
        let style = if alive { Style::Alive } else { Style::Plain };

        self.surface.set(x, y, ' ', style)?;
        self.surface.show()?;

        Ok(())
    }

    /// Repaint every cell of the displayed generation
    fn paint_cells(&mut self) -> anyhow::Result<()> {
        for row in 0..self.grid.height() {
            for col in 0..self.grid.width() {
                let style = if self.grid.is_alive(row, col) {
                    Style::Alive
                } else {
                    Style::Plain
                };

                self.surface.set(col as u16 + 1, row as u16 + 1, ' ', style)?;
            }
        }

        Ok(())
    }

    fn paint_status(&mut self) -> anyhow::Result<()> {
        let elapsed = self.start.elapsed().saturating_sub(self.paused_time);
        let line = status_line(
            self.grid.width(),
            self.grid.height(),
            frames_per_second(self.frames, elapsed),
            elapsed.as_secs_f64(),
            self.grid.alive(),
        );

        let (cols, rows) = self.surface.size();
        self.surface
            .set_text(0, rows - 1, &line, cols as usize, Style::Bar)?;

        Ok(())
    }

    /// The decorative frame around the grid, drawn once at startup
    fn draw_border(&mut self) -> anyhow::Result<()> {
        let (cols, rows) = self.surface.size();
        let bottom = rows - 2;

        for x in 1..cols - 1 {
            self.surface.set(x, 0, '─', Style::Plain)?;
            self.surface.set(x, bottom, '─', Style::Plain)?;
        }

        for y in 1..bottom {
            self.surface.set(0, y, '│', Style::Plain)?;
            self.surface.set(cols - 1, y, '│', Style::Plain)?;
        }

        self.surface.set(0, 0, '┌', Style::Plain)?;
        self.surface.set(cols - 1, 0, '┐', Style::Plain)?;
        self.surface.set(0, bottom, '└', Style::Plain)?;
        self.surface.set(cols - 1, bottom, '┘', Style::Plain)?;

        self.surface.show()?;

        Ok(())
    }
}

fn frames_per_second(frames: u64, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();

    if secs > 0.0 { frames as f64 / secs } else { 0.0 }
}

fn status_line(width: usize, height: usize, fps: f64, secs: f64, alive: usize) -> String {
    format!("size: {width}x{height}  fps: {fps:.2}  time: {secs:.2}s  alive: {alive}")
}

/// How long to sleep after a frame's work.
///
/// Fast frames sleep out the rest of their budget minus a fixed slack.
/// A frame that blew its budget gets no artificial delay and no
/// catch-up, the loop simply runs slower and the FPS readout shows it.
fn pacing_sleep(work: Duration, frame_dur: Duration) -> Duration {
    if work >= frame_dur {
        return Duration::ZERO;
    }

    (frame_dur - work).saturating_sub(SLEEP_SLACK)
}
