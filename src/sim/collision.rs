//! Player/packet overlap and collection
//!
//! The threshold is the player's radius alone: a packet is caught when its
//! centre comes within `player.radius` of the player's centre. The packet's
//! own radius only affects how big it is drawn.

use super::state::{Collectible, Player};

/// True if the player currently reaches `c`'s centre
#[inline]
pub fn overlaps(player: &Player, c: &Collectible) -> bool {
    player.pos.distance(c.pos) <= player.radius
}

/// Mark every reachable, uncollected packet as collected.
///
/// Returns the indices (== ids) of packets collected by this call, in id
/// order. A packet already collected is skipped and can never be returned
/// twice.
pub fn resolve(player: &Player, collectibles: &mut [Collectible]) -> Vec<usize> {
    let mut newly = Vec::new();
    for (i, c) in collectibles.iter_mut().enumerate() {
        if c.is_collected() || !overlaps(player, c) {
            continue;
        }
        if c.mark_collected() {
            newly.push(i);
        }
    }
    newly
}
