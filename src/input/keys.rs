//! Event-driven input (single-thread hosts)
//!
//! The host calls [`KeyState::key_pressed`] / [`KeyState::key_released`] from
//! the same thread that steps the session, so plain fields are enough.
//! Axes are independent: holding up and right steers diagonally.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::InputSource;
use crate::sim::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Quit,
}

impl Key {
    /// Arrows and WASD steer; `q` and Esc quit
    pub fn from_key_code(code: KeyCode) -> Option<Key> {
        match code {
            KeyCode::Up => Some(Key::Up),
            KeyCode::Down => Some(Key::Down),
            KeyCode::Left => Some(Key::Left),
            KeyCode::Right => Some(Key::Right),
            KeyCode::Esc => Some(Key::Quit),
            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                'w' => Some(Key::Up),
                's' => Some(Key::Down),
                'a' => Some(Key::Left),
                'd' => Some(Key::Right),
                'q' => Some(Key::Quit),
                _ => None,
            },
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct KeyState {
    dx: i8,
    dy: i8,
    quit: bool,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_pressed(&mut self, key: Key) {
        match key {
            Key::Left => self.dx = -1,
            Key::Right => self.dx = 1,
            Key::Up => self.dy = -1,
            Key::Down => self.dy = 1,
            Key::Quit => self.quit = true,
        }
    }

    /// Stop an axis only if it still points the released way
    pub fn key_released(&mut self, key: Key) {
        match key {
            Key::Left if self.dx < 0 => self.dx = 0,
            Key::Right if self.dx > 0 => self.dx = 0,
            Key::Up if self.dy < 0 => self.dy = 0,
            Key::Down if self.dy > 0 => self.dy = 0,
            _ => {}
        }
    }

    /// Route a crossterm event. Returns true if it was a recognised key.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            ..
        }) = event
        else {
            return false;
        };
        if *code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            self.key_pressed(Key::Quit);
            return true;
        }
        let Some(key) = Key::from_key_code(*code) else {
            return false;
        };
        match kind {
            KeyEventKind::Press | KeyEventKind::Repeat => self.key_pressed(key),
            KeyEventKind::Release => self.key_released(key),
        }
        true
    }
}

impl InputSource for KeyState {
    fn current_direction(&self) -> Direction {
        Direction::new(self.dx, self.dy)
    }

    fn quit_requested(&self) -> bool {
        self.quit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagonal_and_release() {
        let mut keys = KeyState::new();
        keys.key_pressed(Key::Up);
        keys.key_pressed(Key::Right);
        assert_eq!(keys.current_direction(), Direction { dx: 1, dy: -1 });

        keys.key_released(Key::Up);
        assert_eq!(keys.current_direction(), Direction::RIGHT);
    }

    #[test]
    fn test_stale_release_ignored() {
        let mut keys = KeyState::new();
        keys.key_pressed(Key::Left);
        keys.key_pressed(Key::Right);
        // Left was overridden; letting go of it must not stop the player
        keys.key_released(Key::Left);
        assert_eq!(keys.current_direction(), Direction::RIGHT);
        keys.key_released(Key::Right);
        assert_eq!(keys.current_direction(), Direction::NONE);
    }

    #[test]
    fn test_crossterm_events() {
        let mut keys = KeyState::new();
        let press = Event::Key(KeyEvent::new(KeyCode::Char('S'), KeyModifiers::SHIFT));
        assert!(keys.handle_event(&press));
        assert_eq!(keys.current_direction(), Direction::DOWN);

        let release = Event::Key(KeyEvent::new_with_kind(
            KeyCode::Char('s'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
        ));
        assert!(keys.handle_event(&release));
        assert_eq!(keys.current_direction(), Direction::NONE);

        assert!(!keys.handle_event(&Event::FocusLost));
        assert!(!keys.quit_requested());
        assert!(keys.handle_event(&Event::Key(KeyEvent::from(KeyCode::Esc))));
        assert!(keys.quit_requested());
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut keys = KeyState::new();
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(keys.handle_event(&ctrl_c));
        assert!(keys.quit_requested());
    }
}
