//! Keyboard handling for the terminal front-end.
//!
//! Key presses either end the game or are forwarded to the puppet face.
//! Polling also paces the loop: `should_quit` waits out the rest of the
//! current tick while collecting input.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use mouthflap::puppet::PuppetCommand;
use mouthflap::QuitSignal;
use std::sync::mpsc::Sender;
use std::time::{Duration, Instant};

/// What a key press means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    Puppet(PuppetCommand),
    Ignore,
}

/// Map a key to its action.
pub fn map_key(key: KeyEvent) -> KeyAction {
    if key.kind != KeyEventKind::Press {
        return KeyAction::Ignore;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter => {
            KeyAction::Puppet(PuppetCommand::OpenMouth)
        }
        KeyCode::Char(c @ '0'..='3') => {
            KeyAction::Puppet(PuppetCommand::SetFaces(c as usize - '0' as usize))
        }
        _ => KeyAction::Ignore,
    }
}

/// Quit signal backed by the terminal's key events.
pub struct KeyboardInput {
    puppet: Option<Sender<PuppetCommand>>,
    interval: Duration,
    next_tick: Instant,
}

impl KeyboardInput {
    pub fn new(interval: Duration, puppet: Option<Sender<PuppetCommand>>) -> Self {
        Self {
            puppet,
            interval,
            next_tick: Instant::now() + interval,
        }
    }

    fn dispatch(&self, key: KeyEvent) -> bool {
        match map_key(key) {
            KeyAction::Quit => true,
            KeyAction::Puppet(command) => {
                if let Some(tx) = &self.puppet {
                    // The puppet only disappears when the loop is gone
                    let _ = tx.send(command);
                }
                false
            }
            KeyAction::Ignore => false,
        }
    }
}

impl QuitSignal for KeyboardInput {
    fn should_quit(&mut self) -> mouthflap::Result<bool> {
        loop {
            let timeout = self.next_tick.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                break;
            }
            if let Event::Key(key) = event::read()? {
                if self.dispatch(key) {
                    return Ok(true);
                }
            }
        }

        self.next_tick += self.interval;
        let now = Instant::now();
        if self.next_tick < now {
            // Fell behind (slow terminal); don't try to catch up
            self.next_tick = now + self.interval;
        }
        Ok(false)
    }
}

/// Quit signal for unattended runs.
#[derive(Debug, Default)]
pub struct NeverQuit;

impl QuitSignal for NeverQuit {
    fn should_quit(&mut self) -> mouthflap::Result<bool> {
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(map_key(press(KeyCode::Char('q'))), KeyAction::Quit);
        assert_eq!(map_key(press(KeyCode::Esc)), KeyAction::Quit);
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            KeyAction::Quit
        );
    }

    #[test]
    fn test_open_mouth_keys() {
        for code in [KeyCode::Char(' '), KeyCode::Up, KeyCode::Enter] {
            assert_eq!(
                map_key(press(code)),
                KeyAction::Puppet(PuppetCommand::OpenMouth)
            );
        }
    }

    #[test]
    fn test_face_count_keys() {
        assert_eq!(
            map_key(press(KeyCode::Char('0'))),
            KeyAction::Puppet(PuppetCommand::SetFaces(0))
        );
        assert_eq!(
            map_key(press(KeyCode::Char('2'))),
            KeyAction::Puppet(PuppetCommand::SetFaces(2))
        );
        assert_eq!(map_key(press(KeyCode::Char('x'))), KeyAction::Ignore);
    }

    #[test]
    fn test_release_is_ignored() {
        let mut key = press(KeyCode::Char('q'));
        key.kind = KeyEventKind::Release;
        assert_eq!(map_key(key), KeyAction::Ignore);
    }

    #[test]
    fn test_dispatch_forwards_to_puppet() {
        let (tx, rx) = std::sync::mpsc::channel();
        let input = KeyboardInput::new(Duration::from_millis(16), Some(tx));
        assert!(!input.dispatch(press(KeyCode::Char(' '))));
        assert_eq!(rx.try_recv().unwrap(), PuppetCommand::OpenMouth);
        assert!(input.dispatch(press(KeyCode::Esc)));
    }
}
