//! Spawn policies
//!
//! A spawn policy builds the whole population once, at session start. It must
//! return exactly `count` collectibles with ids `0..count` in order.

use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geom::Bounds;
use super::motion::MotionMode;
use super::state::{Collectible, SimRng};
use crate::consts::*;

/// Range of monetary amounts, `[min, max)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmountRange {
    pub min: f64,
    pub max: f64,
}

impl AmountRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Draw an amount. A collapsed range yields `min`.
    pub fn sample(&self, rng: &mut impl Rng) -> f64 {
        if self.max > self.min {
            rng.random_range(self.min..self.max)
        } else {
            self.min
        }
    }
}

/// Builds the initial population
pub trait SpawnPolicy {
    fn spawn(
        &mut self,
        count: usize,
        bounds: Bounds,
        amounts: AmountRange,
        rng: &mut SimRng,
    ) -> Vec<Collectible>;
}

impl<F> SpawnPolicy for F
where
    F: FnMut(usize, Bounds, AmountRange, &mut SimRng) -> Vec<Collectible>,
{
    fn spawn(
        &mut self,
        count: usize,
        bounds: Bounds,
        amounts: AmountRange,
        rng: &mut SimRng,
    ) -> Vec<Collectible> {
        self(count, bounds, amounts, rng)
    }
}

/// The two built-in layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StandardSpawn {
    /// Anywhere on the board, drifting in a random direction
    Scatter,
    /// Along the top edge, drifting straight down
    Rain,
}

impl StandardSpawn {
    /// Layout that suits a motion mode
    pub fn for_mode(mode: MotionMode) -> Self {
        match mode {
            MotionMode::Reflective => StandardSpawn::Scatter,
            MotionMode::GravityRespawn => StandardSpawn::Rain,
        }
    }
}

impl SpawnPolicy for StandardSpawn {
    fn spawn(
        &mut self,
        count: usize,
        bounds: Bounds,
        amounts: AmountRange,
        rng: &mut SimRng,
    ) -> Vec<Collectible> {
        (0..count)
            .map(|i| {
                let mut c = Collectible::random(i as u32, amounts, rng);
                match self {
                    StandardSpawn::Scatter => {
                        c.pos = DVec2::new(
                            rng.random_range(0.0..bounds.width),
                            rng.random_range(0.0..bounds.height),
                        );
                        c.vel = DVec2::new(
                            rng.random_range(-SCATTER_MAX_SPEED..SCATTER_MAX_SPEED),
                            rng.random_range(-SCATTER_MAX_SPEED..SCATTER_MAX_SPEED),
                        );
                    }
                    StandardSpawn::Rain => {
                        c.vel = DVec2::new(0.0, rng.random_range(RAIN_MIN_FALL..RAIN_MAX_FALL));
                        c.pos = DVec2::new(rng.random_range(0.0..bounds.width), 0.0);
                    }
                }
                c
            })
            .collect()
    }
}
