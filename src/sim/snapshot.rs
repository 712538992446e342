//! Immutable per-tick views handed to renderers

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::state::{Shape, SimState, SizeTier};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub pos: DVec2,
    pub radius: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectibleView {
    pub id: u32,
    pub shape: Shape,
    pub size: SizeTier,
    pub radius: f64,
    pub pos: DVec2,
    pub symbol: char,
}

/// Point-in-time copy of everything a renderer may draw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    /// Ticks completed when this frame was taken
    pub tick: u64,
    /// Time left before the session deadline
    pub remaining_ms: u64,
    pub player: PlayerView,
    /// Uncollected packets only, in id order
    pub collectibles: Vec<CollectibleView>,
    pub collected_count: u32,
    pub collected_amount: f64,
}

impl FrameSnapshot {
    pub fn capture(state: &SimState, remaining_ms: u64) -> Self {
        Self {
            tick: state.time_ticks,
            remaining_ms,
            player: PlayerView {
                pos: state.player.pos,
                radius: state.player.radius,
            },
            collectibles: state
                .active()
                .map(|c| CollectibleView {
                    id: c.id,
                    shape: c.shape,
                    size: c.size,
                    radius: c.radius,
                    pos: c.pos,
                    symbol: c.symbol(),
                })
                .collect(),
            collected_count: state.collected_count,
            collected_amount: state.collected_amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;
    use crate::sim::{StandardSpawn, TickInput, seeded_rng, tick};

    #[test]
    fn test_capture_omits_collected() {
        let cfg = SimulationConfig {
            width: 10,
            height: 10,
            count: 6,
            ..Default::default()
        };
        let mut rng = seeded_rng(8);
        let mut state = SimState::new(&cfg, &mut StandardSpawn::Scatter, &mut rng).unwrap();
        state.collectibles[2].pos = state.player.pos;
        state.collectibles[2].vel = DVec2::ZERO;
        tick(&mut state, &TickInput::default(), &mut rng).unwrap();

        let frame = FrameSnapshot::capture(&state, 1234);
        assert_eq!(frame.tick, 1);
        assert_eq!(frame.remaining_ms, 1234);
        assert!(frame.collectibles.iter().all(|c| c.id != 2));
        assert_eq!(frame.collectibles.len() as u32 + frame.collected_count, 6);
        for view in &frame.collectibles {
            assert_eq!(view.symbol, view.shape.symbol());
        }
    }

    #[test]
    fn test_snapshot_serializes() {
        let cfg = SimulationConfig {
            count: 2,
            ..Default::default()
        };
        let mut rng = seeded_rng(8);
        let state = SimState::new(&cfg, &mut StandardSpawn::Rain, &mut rng).unwrap();
        let json = serde_json::to_string(&FrameSnapshot::capture(&state, 0)).unwrap();
        let back: FrameSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.collectibles.len(), 2);
        assert_eq!(back.player, FrameSnapshot::capture(&state, 0).player);
    }
}
