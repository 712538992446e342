//! Entity and board state
//!
//! Everything a session owns lives in [`SimState`]. It is created at session
//! start and dropped at session end; nothing carries over.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geom::Bounds;
use super::motion::MotionMode;
use super::spawn::{AmountRange, SpawnPolicy};
use super::stats::StatisticsAggregate;
use crate::config::SimulationConfig;
use crate::error::SessionError;

/// Random source threaded through spawn and motion
pub type SimRng = Pcg32;

pub fn seeded_rng(seed: u64) -> SimRng {
    Pcg32::seed_from_u64(seed)
}

/// Red packet outline
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    Circle,
    Square,
    Triangle,
    Diamond,
    Heart,
    Star,
}

impl Shape {
    pub const ALL: [Shape; 6] = [
        Shape::Circle,
        Shape::Square,
        Shape::Triangle,
        Shape::Diamond,
        Shape::Heart,
        Shape::Star,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Shape::Circle => "circle",
            Shape::Square => "square",
            Shape::Triangle => "triangle",
            Shape::Diamond => "diamond",
            Shape::Heart => "heart",
            Shape::Star => "star",
        }
    }

    /// Glyph used by character renderers
    pub fn symbol(&self) -> char {
        match self {
            Shape::Circle => '●',
            Shape::Square => '■',
            Shape::Triangle => '▲',
            Shape::Diamond => '♦',
            Shape::Heart => '♥',
            Shape::Star => '★',
        }
    }

    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// Red packet size class; each tier owns a radius sub-range
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeTier {
    Small,
    Medium,
    Large,
    Huge,
}

impl SizeTier {
    pub const ALL: [SizeTier; 4] = [
        SizeTier::Small,
        SizeTier::Medium,
        SizeTier::Large,
        SizeTier::Huge,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SizeTier::Small => "small",
            SizeTier::Medium => "medium",
            SizeTier::Large => "large",
            SizeTier::Huge => "huge",
        }
    }

    /// Radius range `[min, max)` for this tier
    pub fn radius_range(&self) -> (f64, f64) {
        match self {
            SizeTier::Small => (0.5, 0.8),
            SizeTier::Medium => (0.8, 1.2),
            SizeTier::Large => (1.2, 2.0),
            SizeTier::Huge => (2.0, 3.0),
        }
    }

    pub fn random_radius(&self, rng: &mut impl Rng) -> f64 {
        let (min, max) = self.radius_range();
        rng.random_range(min..max)
    }

    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// The player avatar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    pub pos: DVec2,
    /// Collection radius, fixed for the session
    pub radius: f64,
}

impl Player {
    pub fn new(pos: DVec2, radius: f64) -> Self {
        Self { pos, radius }
    }

    /// Starting spot for a motion mode: board centre when packets bounce,
    /// near the bottom edge when they rain down
    pub fn start_position(mode: MotionMode, bounds: Bounds) -> DVec2 {
        let pos = match mode {
            MotionMode::Reflective => bounds.center(),
            MotionMode::GravityRespawn => DVec2::new(bounds.width / 2.0, bounds.height - 2.0),
        };
        bounds.clamp_player(pos)
    }
}

/// A red packet
#[derive(Debug, Clone, PartialEq)]
pub struct Collectible {
    pub id: u32,
    pub amount: f64,
    pub shape: Shape,
    pub size: SizeTier,
    pub radius: f64,
    pub pos: DVec2,
    pub vel: DVec2,
    collected: bool,
}

impl Collectible {
    pub fn new(
        id: u32,
        amount: f64,
        shape: Shape,
        size: SizeTier,
        radius: f64,
        pos: DVec2,
        vel: DVec2,
    ) -> Self {
        Self {
            id,
            amount,
            shape,
            size,
            radius,
            pos,
            vel,
            collected: false,
        }
    }

    /// Draw amount, shape, size tier and radius. Position and velocity are
    /// left at zero for the spawn policy to place.
    pub fn random(id: u32, amounts: AmountRange, rng: &mut impl Rng) -> Self {
        let amount = amounts.sample(rng);
        let shape = Shape::random(rng);
        let size = SizeTier::random(rng);
        let radius = size.random_radius(rng);
        Self::new(id, amount, shape, size, radius, DVec2::ZERO, DVec2::ZERO)
    }

    #[inline]
    pub fn is_collected(&self) -> bool {
        self.collected
    }

    /// Flip `collected` to true. Returns false if it already was; the flag
    /// never goes back.
    pub fn mark_collected(&mut self) -> bool {
        !std::mem::replace(&mut self.collected, true)
    }

    pub fn symbol(&self) -> char {
        self.shape.symbol()
    }

    /// e.g. "large heart"
    pub fn description(&self) -> String {
        format!("{} {}", self.size.name(), self.shape.name())
    }
}

/// Complete state of one session
#[derive(Debug, Clone)]
pub struct SimState {
    pub bounds: Bounds,
    pub motion: MotionMode,
    pub player_speed: f64,
    pub player: Player,
    /// Whole population in id order; collected entries stay in place
    pub collectibles: Vec<Collectible>,
    pub stats: StatisticsAggregate,
    pub collected_count: u32,
    pub collected_amount: f64,
    /// Ticks completed so far
    pub time_ticks: u64,
}

impl SimState {
    /// Validate the config and spawn the initial population.
    ///
    /// Nothing is spawned if the config is rejected.
    pub fn new<P: SpawnPolicy + ?Sized>(
        config: &SimulationConfig,
        spawn: &mut P,
        rng: &mut SimRng,
    ) -> Result<Self, SessionError> {
        config.validate()?;

        let bounds = config.bounds();
        let collectibles = spawn.spawn(config.count, bounds, config.amount_range(), rng);
        let ids_match = collectibles
            .iter()
            .enumerate()
            .all(|(i, c)| c.id as usize == i && !c.is_collected());
        if collectibles.len() != config.count || !ids_match {
            return Err(SessionError::SpawnContract {
                expected: config.count,
                got: collectibles.len(),
            });
        }

        let player = Player::new(
            Player::start_position(config.motion, bounds),
            config.player_radius,
        );

        Ok(Self {
            bounds,
            motion: config.motion,
            player_speed: config.player_speed(),
            player,
            collectibles,
            stats: StatisticsAggregate::new(),
            collected_count: 0,
            collected_amount: 0.0,
            time_ticks: 0,
        })
    }

    /// Collectibles still on the board
    pub fn active(&self) -> impl Iterator<Item = &Collectible> {
        self.collectibles.iter().filter(|c| !c.is_collected())
    }
}
