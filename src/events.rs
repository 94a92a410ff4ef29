use std::sync::mpsc::SyncSender;
use std::sync::mpsc::TrySendError;

use crossterm::event;
use crossterm::event::Event as CrossTermEvent;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::MouseButton;
use crossterm::event::MouseEvent;
use crossterm::event::MouseEventKind;
use tracing::warn;

/// The closed set of inputs the loop reacts to. Everything else the
/// terminal produces is dropped at conversion time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Space: pause the simulation, or resume it
    TogglePause,

    /// Left button down at terminal coordinates `(x, y)`
    Click { x: u16, y: u16 },

    /// Escape: exit the application
    Quit,
}

/// Converts a crossterm event into a termlife event
pub fn convert_event(event: CrossTermEvent) -> Option<Event> {
    match event {
        CrossTermEvent::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) => match code {
            KeyCode::Esc => Some(Event::Quit),
            KeyCode::Char(' ') => Some(Event::TogglePause),
            _ => None,
        },
        CrossTermEvent::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            ..
        }) => Some(Event::Click { x: column, y: row }),
        _ => None,
    }
}

/// Body of the input-polling thread.
///
/// Blocks on the terminal's event stream and forwards everything
/// [`convert_event`] keeps into the bounded queue consumed by the main
/// loop. When the queue is full the event is dropped with a warning
/// rather than overwriting a pending one. Returns when the consumer has
/// gone away or the event stream fails.
pub fn forward_events(tx: SyncSender<Event>) {
    loop {
        let raw = match event::read() {
            Ok(raw) => raw,
            Err(e) => {
                warn!("event poll failed: {e}");
                return;
            }
        };

        let Some(ev) = convert_event(raw) else {
            continue;
        };

        match tx.try_send(ev) {
            Ok(()) => {}
            Err(TrySendError::Full(ev)) => warn!(?ev, "input queue full, dropping event"),
            Err(TrySendError::Disconnected(_)) => return,
        }
    }
}
