//! Red Packet Rain - a real-time red packet gathering simulation
//!
//! Core modules:
//! - `sim`: Fixed-tick simulation (entities, motion, collisions, statistics)
//! - `input`: Direction/quit signal sources (background reader or key callbacks)
//! - `session`: Real-time session driver bounded by a deadline
//! - `renderer`: Frame sinks (terminal, JSON lines)
//! - `config`: Validated simulation configuration
//! - `report`: End-of-session summary

pub mod config;
pub mod error;
pub mod input;
pub mod renderer;
pub mod report;
pub mod session;
pub mod sim;

pub use config::SimulationConfig;
pub use error::{ConfigError, SessionError};
pub use session::{Session, SessionResult};
pub use sim::MotionMode;

/// Simulation defaults
pub mod consts {
    /// Default board size (cells)
    pub const DEFAULT_WIDTH: u32 = 100;
    pub const DEFAULT_HEIGHT: u32 = 40;
    /// Default collectible population
    pub const DEFAULT_COUNT: usize = 30;
    /// Default session length (5 s)
    pub const DEFAULT_DURATION_MS: u64 = 5000;
    /// Default tick interval (20 ticks per second)
    pub const DEFAULT_TICK_MS: u64 = 50;

    /// Player defaults
    pub const DEFAULT_PLAYER_RADIUS: f64 = 1.5;
    /// Cells moved per tick while a direction is held, per motion mode
    pub const REFLECTIVE_PLAYER_SPEED: f64 = 1.5;
    pub const GRAVITY_PLAYER_SPEED: f64 = 0.8;

    /// Amount drawn for each red packet, `[min, max)`
    pub const DEFAULT_AMOUNT_MIN: f64 = 0.1;
    pub const DEFAULT_AMOUNT_MAX: f64 = 10.0;

    /// Scatter spawn: each velocity component is drawn from `[-max, max)`
    pub const SCATTER_MAX_SPEED: f64 = 0.8;
    /// Rain spawn: downward drift per tick, `[min, max)`
    pub const RAIN_MIN_FALL: f64 = 0.1;
    pub const RAIN_MAX_FALL: f64 = 0.6;
}

/// Clamp a value into `[min, max]`
///
/// Unlike `f64::clamp` this never panics when the board degenerates to a
/// single cell and `max < min` by rounding; `min` wins.
#[inline]
pub fn clamp_cell(v: f64, min: f64, max: f64) -> f64 {
    if v > max { max.max(min) } else if v < min { min } else { v }
}
