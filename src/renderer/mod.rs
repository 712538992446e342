//! Renderer boundary
//!
//! A sink receives one [`FrameSnapshot`] per tick and may only read it.

pub mod json;
pub mod terminal;

pub use json::JsonLinesSink;
pub use terminal::{TerminalRenderer, rasterize};

use std::io;

use crate::sim::FrameSnapshot;

pub trait FrameSink {
    fn present(&mut self, frame: &FrameSnapshot) -> io::Result<()>;
}

/// Keeps every frame (handy for tests and offline inspection)
impl FrameSink for Vec<FrameSnapshot> {
    fn present(&mut self, frame: &FrameSnapshot) -> io::Result<()> {
        self.push(frame.clone());
        Ok(())
    }
}

/// Discards every frame
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl FrameSink for NullSink {
    fn present(&mut self, _frame: &FrameSnapshot) -> io::Result<()> {
        Ok(())
    }
}
