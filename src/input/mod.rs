//! Player input sources
//!
//! The session only ever asks two questions: which way is the player
//! steering, and has anyone asked to quit. Two hosts answer them:
//! - Polling: a background thread decodes raw bytes into a [`SharedSignal`]
//! - Event-driven: key callbacks update a [`KeyState`] on the host's thread

pub mod decoder;
pub mod keys;
pub mod reader;
pub mod signal;

pub use decoder::{KeyAction, KeyDecoder};
pub use keys::{Key, KeyState};
pub use reader::spawn_reader;
pub use signal::SharedSignal;

use crate::sim::Direction;

/// Read side of a live direction/quit signal. Both reads are non-blocking.
pub trait InputSource {
    fn current_direction(&self) -> Direction;

    fn quit_requested(&self) -> bool;

    /// Called once by the session when it ends; sources that own a
    /// background task use it to ask that task to stop
    fn cancel(&self) {}
}

impl<T: InputSource + ?Sized> InputSource for std::sync::Arc<T> {
    fn current_direction(&self) -> Direction {
        (**self).current_direction()
    }

    fn quit_requested(&self) -> bool {
        (**self).quit_requested()
    }

    fn cancel(&self) {
        (**self).cancel()
    }
}

/// Never steers, never quits (headless runs)
#[derive(Debug, Clone, Copy, Default)]
pub struct NullInput;

impl InputSource for NullInput {
    fn current_direction(&self) -> Direction {
        Direction::NONE
    }

    fn quit_requested(&self) -> bool {
        false
    }
}
