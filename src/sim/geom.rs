//! Board geometry
//!
//! Positions and velocities are `glam::DVec2` in cell units, origin at the
//! top-left corner, `y` growing downward.

pub use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::clamp_cell;

/// Board extent in cells
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True when `p` lies in the closed box `[0, width] × [0, height]`
    #[inline]
    pub fn contains(&self, p: DVec2) -> bool {
        (0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y)
    }

    /// Clamp a player position onto the drawable cells `[0, w-1] × [0, h-1]`
    #[inline]
    pub fn clamp_player(&self, p: DVec2) -> DVec2 {
        DVec2::new(
            clamp_cell(p.x, 0.0, self.width - 1.0),
            clamp_cell(p.y, 0.0, self.height - 1.0),
        )
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(self.width / 2.0, self.height / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        let a = DVec2::new(0.0, 0.0);
        let b = DVec2::new(3.0, 4.0);
        assert!((a.distance(b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_contains_is_closed() {
        let bounds = Bounds::new(10.0, 5.0);
        assert!(bounds.contains(DVec2::new(0.0, 0.0)));
        assert!(bounds.contains(DVec2::new(10.0, 5.0)));
        assert!(!bounds.contains(DVec2::new(10.01, 2.0)));
        assert!(!bounds.contains(DVec2::new(3.0, -0.01)));
    }

    #[test]
    fn test_clamp_player() {
        let bounds = Bounds::new(10.0, 5.0);
        let p = bounds.clamp_player(DVec2::new(12.0, -3.0));
        assert_eq!(p, DVec2::new(9.0, 0.0));
    }
}
