//! Raw terminal byte decoder
//!
//! Recognised input:
//! - `w` `a` `s` `d` (either case): steer up/left/down/right
//! - `q` (either case) or Ctrl-C: quit
//! - `ESC [ A|B|C|D` arrow keys, including parameterised forms such as
//!   `ESC [ 1 ; 5 A`
//!
//! Everything else is dropped without error.

use crate::sim::Direction;

const ESC: u8 = 0x1b;
/// Ctrl-C arrives as ETX in raw mode
const ETX: u8 = 0x03;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Move(Direction),
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum State {
    #[default]
    Ground,
    /// Saw ESC
    Escape,
    /// Saw `ESC [`, waiting for the final byte
    Csi,
}

/// Byte-at-a-time state machine; keeps partial escape sequences across reads
#[derive(Debug, Clone, Default)]
pub struct KeyDecoder {
    state: State,
}

impl KeyDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one byte; returns an action when a key is complete
    pub fn feed(&mut self, byte: u8) -> Option<KeyAction> {
        match self.state {
            State::Ground => self.ground(byte),
            State::Escape => match byte {
                b'[' => {
                    self.state = State::Csi;
                    None
                }
                ESC => None,
                _ => {
                    // Lone ESC: drop it and read this byte as a normal key
                    self.state = State::Ground;
                    self.ground(byte)
                }
            },
            State::Csi => match byte {
                ESC => {
                    self.state = State::Escape;
                    None
                }
                // Parameter and intermediate bytes
                0x20..=0x3f => None,
                // Final byte ends the sequence
                0x40..=0x7e => {
                    self.state = State::Ground;
                    let dir = match byte {
                        b'A' => Direction::UP,
                        b'B' => Direction::DOWN,
                        b'C' => Direction::RIGHT,
                        b'D' => Direction::LEFT,
                        _ => {
                            log::trace!("discarded CSI sequence ending {byte:#04x}");
                            return None;
                        }
                    };
                    Some(KeyAction::Move(dir))
                }
                _ => {
                    log::trace!("malformed CSI sequence at {byte:#04x}");
                    self.state = State::Ground;
                    None
                }
            },
        }
    }

    /// Decode a whole buffer
    pub fn feed_all(&mut self, bytes: &[u8]) -> Vec<KeyAction> {
        bytes.iter().filter_map(|&b| self.feed(b)).collect()
    }

    fn ground(&mut self, byte: u8) -> Option<KeyAction> {
        match byte.to_ascii_lowercase() {
            ESC => {
                self.state = State::Escape;
                None
            }
            b'w' => Some(KeyAction::Move(Direction::UP)),
            b's' => Some(KeyAction::Move(Direction::DOWN)),
            b'a' => Some(KeyAction::Move(Direction::LEFT)),
            b'd' => Some(KeyAction::Move(Direction::RIGHT)),
            b'q' | ETX => Some(KeyAction::Quit),
            _ => None,
        }
    }
}
