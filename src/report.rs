//! End-of-session summary
//!
//! Flattens the grouped statistics into labelled rows, ordered by shape then
//! size, for printing as text or JSON.

use std::fmt;

use serde::Serialize;

use crate::config::SimulationConfig;
use crate::session::SessionResult;
use crate::sim::Tally;

/// One labelled group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupRow {
    pub label: String,
    pub count: u32,
    pub amount: f64,
}

impl GroupRow {
    fn new(label: impl Into<String>, tally: Tally) -> Self {
        Self {
            label: label.into(),
            count: tally.count,
            amount: tally.amount,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub seed: u64,
    pub duration_ms: u64,
    pub ticks: u64,
    pub population: usize,
    pub collected_count: u32,
    pub collected_amount: f64,
    pub by_shape: Vec<GroupRow>,
    pub by_size: Vec<GroupRow>,
    pub by_combo: Vec<GroupRow>,
}

impl Report {
    pub fn new(config: &SimulationConfig, result: &SessionResult) -> Self {
        let stats = &result.stats;
        Self {
            seed: result.seed,
            duration_ms: config.duration_ms,
            ticks: result.ticks,
            population: result.population,
            collected_count: result.collected_count,
            collected_amount: result.collected_amount,
            by_shape: stats
                .shape_totals()
                .into_iter()
                .map(|(shape, t)| GroupRow::new(shape.name(), t))
                .collect(),
            by_size: stats
                .size_totals()
                .into_iter()
                .map(|(size, t)| GroupRow::new(size.name(), t))
                .collect(),
            by_combo: stats
                .combo_totals()
                .into_iter()
                .map(|((shape, size), t)| {
                    GroupRow::new(format!("{} {}", size.name(), shape.name()), t)
                })
                .collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Time: {}ms, packets: {}, caught: {}, amount: {:.2}",
            self.duration_ms, self.population, self.collected_count, self.collected_amount
        )?;

        for (title, rows) in [
            ("By shape", &self.by_shape),
            ("By size", &self.by_size),
            ("By size and shape", &self.by_combo),
        ] {
            writeln!(f)?;
            writeln!(f, "{title}:")?;
            if rows.is_empty() {
                writeln!(f, "  (none)")?;
            }
            for row in rows {
                writeln!(
                    f,
                    "  {}: {} caught, amount: {:.2}",
                    row.label, row.count, row.amount
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Collectible, DVec2, Shape, SizeTier, StatisticsAggregate};

    fn result() -> SessionResult {
        let mut stats = StatisticsAggregate::new();
        for (id, amount, shape, size) in [
            (0, 1.25, Shape::Star, SizeTier::Huge),
            (1, 2.0, Shape::Circle, SizeTier::Huge),
            (2, 0.5, Shape::Star, SizeTier::Small),
        ] {
            stats.record(&Collectible::new(
                id,
                amount,
                shape,
                size,
                1.0,
                DVec2::ZERO,
                DVec2::ZERO,
            ));
        }
        SessionResult {
            seed: 9,
            ticks: 100,
            population: 30,
            collected_count: 3,
            collected_amount: 3.75,
            stats,
        }
    }

    #[test]
    fn test_rows_ordered_and_labelled() {
        let report = Report::new(&SimulationConfig::default(), &result());
        let shapes: Vec<&str> = report.by_shape.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(shapes, vec!["circle", "star"]);
        assert_eq!(report.by_size[0].label, "small");
        assert_eq!(report.by_combo.len(), 3);
        assert_eq!(report.by_combo[0].label, "huge circle");
        assert_eq!(report.by_shape[1].count, 2);
    }

    #[test]
    fn test_text_summary() {
        let text = Report::new(&SimulationConfig::default(), &result()).to_string();
        assert!(text.starts_with("Time: 5000ms, packets: 30, caught: 3, amount: 3.75"));
        assert!(text.contains("By shape:\n  circle: 1 caught, amount: 2.00"));
        assert!(text.contains("  small star: 1 caught, amount: 0.50"));
    }

    #[test]
    fn test_empty_summary() {
        let empty = SessionResult {
            seed: 1,
            ticks: 5,
            population: 0,
            collected_count: 0,
            collected_amount: 0.0,
            stats: StatisticsAggregate::new(),
        };
        let report = Report::new(&SimulationConfig::default(), &empty);
        assert!(report.to_string().contains("By size:\n  (none)"));
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["collected_count"], 0);
        assert!(json["by_combo"].as_array().is_some_and(|rows| rows.is_empty()));
    }
}
