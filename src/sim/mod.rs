//! Simulation core
//!
//! Everything that advances the board lives here. The module is renderer- and
//! platform-agnostic:
//! - Randomness comes only from an explicitly passed `SimRng`
//! - Entities are processed in id order
//! - No I/O, no clocks; pacing belongs to `crate::session`

pub mod collision;
pub mod geom;
pub mod motion;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod stats;
pub mod tick;

pub use collision::{overlaps, resolve};
pub use geom::{Bounds, DVec2};
pub use motion::MotionMode;
pub use snapshot::{CollectibleView, FrameSnapshot, PlayerView};
pub use spawn::{AmountRange, SpawnPolicy, StandardSpawn};
pub use state::{Collectible, Player, Shape, SimRng, SimState, SizeTier, seeded_rng};
pub use stats::{StatisticsAggregate, Tally};
pub use tick::{Direction, TickInput, tick};
