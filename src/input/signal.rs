//! Lock-free direction/quit cell shared between the reader thread and the
//! tick loop
//!
//! Direction is a continuously sampled control value, so last write wins and
//! a read may be one tick stale. Both components live in a single byte so a
//! reader never sees `dx` from one key and `dy` from another.

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use super::InputSource;
use crate::sim::Direction;

#[derive(Debug)]
pub struct SharedSignal {
    direction: AtomicU8,
    quit: AtomicBool,
}

impl SharedSignal {
    pub fn new() -> Self {
        Self {
            direction: AtomicU8::new(encode(Direction::NONE)),
            quit: AtomicBool::new(false),
        }
    }

    pub fn set_direction(&self, dir: Direction) {
        self.direction.store(encode(dir), Ordering::Relaxed);
    }

    /// Raise the quit flag; also tells the reader thread to stop
    pub fn request_quit(&self) {
        self.quit.store(true, Ordering::Release);
    }
}

impl Default for SharedSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for SharedSignal {
    fn current_direction(&self) -> Direction {
        decode(self.direction.load(Ordering::Relaxed))
    }

    fn quit_requested(&self) -> bool {
        self.quit.load(Ordering::Acquire)
    }

    fn cancel(&self) {
        self.request_quit();
    }
}

/// `(dx, dy)` in `{-1,0,1}²` packed as `(dx+1)*3 + (dy+1)`
fn encode(dir: Direction) -> u8 {
    let dir = Direction::new(dir.dx, dir.dy);
    ((dir.dx + 1) * 3 + (dir.dy + 1)) as u8
}

fn decode(bits: u8) -> Direction {
    let bits = bits.min(8) as i8;
    Direction::new(bits / 3 - 1, bits % 3 - 1)
}
