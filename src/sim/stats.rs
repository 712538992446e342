//! Collected-packet statistics
//!
//! Running totals grouped three ways: by shape, by size tier, and by the
//! `(shape, size)` pair. Append-only for the life of a session.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::state::{Collectible, Shape, SizeTier};

/// Count and amount for one group
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Tally {
    pub count: u32,
    pub amount: f64,
}

impl Tally {
    fn add(&mut self, amount: f64) {
        self.count += 1;
        self.amount += amount;
    }
}

#[derive(Debug, Clone, Default)]
pub struct StatisticsAggregate {
    by_shape: BTreeMap<Shape, Tally>,
    by_size: BTreeMap<SizeTier, Tally>,
    by_combo: BTreeMap<(Shape, SizeTier), Tally>,
    total: Tally,
    recorded: BTreeSet<u32>,
}

impl StatisticsAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one newly collected packet into every grouping.
    ///
    /// Returns false (and changes nothing) if this id was already recorded.
    pub fn record(&mut self, c: &Collectible) -> bool {
        if !self.recorded.insert(c.id) {
            log::warn!("packet {} recorded twice; ignoring", c.id);
            return false;
        }
        self.by_shape.entry(c.shape).or_default().add(c.amount);
        self.by_size.entry(c.size).or_default().add(c.amount);
        self.by_combo.entry((c.shape, c.size)).or_default().add(c.amount);
        self.total.add(c.amount);
        true
    }

    pub fn shape_totals(&self) -> BTreeMap<Shape, Tally> {
        self.by_shape.clone()
    }

    pub fn size_totals(&self) -> BTreeMap<SizeTier, Tally> {
        self.by_size.clone()
    }

    pub fn combo_totals(&self) -> BTreeMap<(Shape, SizeTier), Tally> {
        self.by_combo.clone()
    }

    pub fn grand_total(&self) -> Tally {
        self.total
    }

    #[cfg(test)]
    fn is_recorded(&self, id: u32) -> bool {
        self.recorded.contains(&id)
    }
}
