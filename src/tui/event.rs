use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc::UnboundedSender;

use crate::app::Result;
use crate::domain::Entry;

/// Everything the application state reacts to.
#[derive(Debug)]
pub enum AppEvent {
    Start,
    ListFetched(Result<Vec<Entry>>),
    /// Result of a content fetch, tagged with the generation it was issued under.
    ContentFetched {
        generation: u64,
        result: Result<Vec<u8>>,
    },
    Key(KeyEvent),
    Resize(u16, u16),
    Tick,
}

/// Keys with a fixed meaning to the application; the rest go to widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ForceQuit,
    Select,
    Back,
    OpenInBrowser,
    None,
}

impl From<KeyEvent> for Action {
    fn from(key: KeyEvent) -> Self {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Action::ForceQuit
            }
            _ if key.modifiers.contains(KeyModifiers::CONTROL) => Action::None,
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Enter => Action::Select,
            KeyCode::Esc => Action::Back,
            KeyCode::Char('o') => Action::OpenInBrowser,
            _ => Action::None,
        }
    }
}

/// Reads terminal input on its own thread and forwards it to the event channel.
pub struct EventHandler {
    poll_rate: Duration,
}

impl EventHandler {
    pub fn new(poll_rate: Duration) -> Self {
        Self { poll_rate }
    }

    /// Spawn the reader. It stops once the receiving side is dropped.
    pub fn spawn(self, tx: UnboundedSender<AppEvent>) -> thread::JoinHandle<()> {
        thread::spawn(move || {
            while !tx.is_closed() {
                match self.next() {
                    Ok(Some(event)) => {
                        if tx.send(event).is_err() {
                            break;
                        }
                    }
                    Ok(None) => {}
                    Err(e) => {
                        tracing::error!("Terminal input failed: {}", e);
                        break;
                    }
                }
            }
        })
    }

    fn next(&self) -> Result<Option<AppEvent>> {
        if !event::poll(self.poll_rate)? {
            return Ok(None);
        }
        let event = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
            Event::Resize(width, height) => Some(AppEvent::Resize(width, height)),
            _ => None,
        };
        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(code: KeyCode, modifiers: KeyModifiers) -> Action {
        Action::from(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn test_fixed_bindings() {
        assert_eq!(action(KeyCode::Char('q'), KeyModifiers::NONE), Action::Quit);
        assert_eq!(
            action(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Action::ForceQuit
        );
        assert_eq!(action(KeyCode::Enter, KeyModifiers::NONE), Action::Select);
        assert_eq!(action(KeyCode::Esc, KeyModifiers::NONE), Action::Back);
        assert_eq!(
            action(KeyCode::Char('o'), KeyModifiers::NONE),
            Action::OpenInBrowser
        );
    }

    #[test]
    fn test_navigation_keys_pass_through() {
        assert_eq!(action(KeyCode::Char('j'), KeyModifiers::NONE), Action::None);
        assert_eq!(action(KeyCode::Down, KeyModifiers::NONE), Action::None);
        assert_eq!(action(KeyCode::Char('/'), KeyModifiers::NONE), Action::None);
        assert_eq!(action(KeyCode::Char('q'), KeyModifiers::CONTROL), Action::None);
    }
}
