//! Fixed-step simulation tick
//!
//! One call advances the board by exactly one step: player, packets,
//! collisions, statistics. Wall-clock pacing is the session's job.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::collision::resolve;
use super::state::{SimRng, SimState};
use crate::error::SessionError;

/// Unit step on each axis, each component in `{-1, 0, 1}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Direction {
    pub dx: i8,
    pub dy: i8,
}

impl Direction {
    pub const NONE: Direction = Direction { dx: 0, dy: 0 };
    pub const UP: Direction = Direction { dx: 0, dy: -1 };
    pub const DOWN: Direction = Direction { dx: 0, dy: 1 };
    pub const LEFT: Direction = Direction { dx: -1, dy: 0 };
    pub const RIGHT: Direction = Direction { dx: 1, dy: 0 };

    /// Components are reduced to their sign
    pub fn new(dx: i8, dy: i8) -> Self {
        Self {
            dx: dx.signum(),
            dy: dy.signum(),
        }
    }

    pub fn as_vec(&self) -> DVec2 {
        DVec2::new(self.dx as f64, self.dy as f64)
    }
}

/// Input sampled for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub direction: Direction,
}

/// Advance the state by one tick.
///
/// Returns the indices of packets collected during this tick. Fails only if
/// motion produced a non-finite value, which means the policy is broken.
pub fn tick(
    state: &mut SimState,
    input: &TickInput,
    rng: &mut SimRng,
) -> Result<Vec<usize>, SessionError> {
    let tick_no = state.time_ticks + 1;

    // Player
    let step = input.direction.as_vec() * state.player_speed;
    state.player.pos = state.bounds.clamp_player(state.player.pos + step);

    // Packets, in id order
    let (bounds, motion) = (state.bounds, state.motion);
    for c in state.collectibles.iter_mut().filter(|c| !c.is_collected()) {
        let (pos, vel) = motion.advance(c.pos, c.vel, bounds, rng);
        if !(pos.is_finite() && vel.is_finite()) {
            return Err(SessionError::NonFinite {
                id: c.id,
                tick: tick_no,
            });
        }
        c.pos = pos;
        c.vel = vel;
    }

    // Collisions and statistics
    let newly = resolve(&state.player, &mut state.collectibles);
    for &i in &newly {
        let c = &state.collectibles[i];
        if state.stats.record(c) {
            state.collected_count += 1;
            state.collected_amount += c.amount;
            log::debug!(
                "tick {}: caught {} #{} worth {:.2}",
                tick_no,
                c.description(),
                c.id,
                c.amount
            );
        }
    }

    state.time_ticks = tick_no;
    Ok(newly)
}
