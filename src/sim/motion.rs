//! Per-tick motion policies
//!
//! A policy maps `(position, velocity, bounds)` to the next position and
//! velocity of one active collectible. Entities never interact with each
//! other, so the policy sees only bounds (and the RNG, for respawns).

use std::str::FromStr;

use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geom::Bounds;
use crate::consts::{GRAVITY_PLAYER_SPEED, REFLECTIVE_PLAYER_SPEED};
use crate::error::ConfigError;

/// How collectibles move each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionMode {
    /// Bounce off the board edges forever
    #[default]
    Reflective,
    /// Fall downward and re-enter from the top
    GravityRespawn,
}

impl MotionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            MotionMode::Reflective => "reflective",
            MotionMode::GravityRespawn => "gravity",
        }
    }

    /// Player speed when the config leaves it unset: quick in the open
    /// board, slower when catching rain
    pub fn default_player_speed(&self) -> f64 {
        match self {
            MotionMode::Reflective => REFLECTIVE_PLAYER_SPEED,
            MotionMode::GravityRespawn => GRAVITY_PLAYER_SPEED,
        }
    }

    /// Advance one collectible by one tick
    pub fn advance(
        &self,
        pos: DVec2,
        vel: DVec2,
        bounds: Bounds,
        rng: &mut impl Rng,
    ) -> (DVec2, DVec2) {
        match self {
            MotionMode::Reflective => reflect(pos, vel, bounds),
            MotionMode::GravityRespawn => fall(pos, vel, bounds, rng),
        }
    }
}

impl FromStr for MotionMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reflective" | "bounce" => Ok(MotionMode::Reflective),
            "gravity" | "gravity_respawn" | "rain" => Ok(MotionMode::GravityRespawn),
            _ => Err(ConfigError::UnknownMode(s.to_string())),
        }
    }
}

/// Integrate, then mirror each axis that left `[0, bound]` and clamp it back
fn reflect(pos: DVec2, vel: DVec2, bounds: Bounds) -> (DVec2, DVec2) {
    let mut pos = pos + vel;
    let mut vel = vel;

    if pos.x < 0.0 || pos.x > bounds.width {
        vel.x = -vel.x;
    }
    if pos.y < 0.0 || pos.y > bounds.height {
        vel.y = -vel.y;
    }
    pos.x = pos.x.clamp(0.0, bounds.width);
    pos.y = pos.y.clamp(0.0, bounds.height);

    (pos, vel)
}

/// Integrate; past the bottom edge the packet re-enters at the top at a fresh
/// column. `x` is never clamped.
fn fall(pos: DVec2, vel: DVec2, bounds: Bounds, rng: &mut impl Rng) -> (DVec2, DVec2) {
    let mut pos = pos + vel;
    if pos.y > bounds.height {
        pos.y = 0.0;
        pos.x = rng.random_range(0.0..bounds.width);
        log::trace!("recycled packet to x={:.2}", pos.x);
    }
    (pos, vel)
}
