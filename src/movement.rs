//! Week-over-week rank movement and the "big move" rule.

use crate::snapshot::{ChartSnapshot, Entry};

/// Two-tier threshold deciding whether a rank change is a big move.
///
/// A change qualifies when the entry sits at or above `top_rank` and moved at
/// least `top_delta` places, or when it moved at least `any_delta` places
/// anywhere on the chart. The rule is the same for rises and falls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MoveThresholds {
    pub top_rank: u32,
    pub top_delta: u32,
    pub any_delta: u32,
}

impl Default for MoveThresholds {
    fn default() -> Self {
        MoveThresholds {
            top_rank: 50,
            top_delta: 10,
            any_delta: 20,
        }
    }
}

impl MoveThresholds {
    /// Applies the rule to an entry's current rank and its delta.
    pub fn is_big_move(&self, rank: u32, delta: i64) -> bool {
        let distance = delta.unsigned_abs();
        (rank <= self.top_rank && distance >= u64::from(self.top_delta))
            || distance >= u64::from(self.any_delta)
    }
}

/// An entry paired with its rank change (`last_pos - rank`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move<'a> {
    pub entry: &'a Entry,
    pub delta: i64,
}

fn moves<'a>(
    chart: &'a ChartSnapshot,
    thresholds: &MoveThresholds,
    keep: fn(i64) -> bool,
) -> Vec<Move<'a>> {
    chart
        .iter()
        .filter_map(|entry| entry.delta().map(|delta| Move { entry, delta }))
        .filter(|m| keep(m.delta) && thresholds.is_big_move(m.entry.rank, m.delta))
        .collect()
}

/// Entries that climbed far enough towards #1 to count as a big move.
///
/// Entries without a position last week are never considered.
///
/// # Returns
/// * `Vec<Move>` in chart order, every delta positive.
pub fn upwards_moves<'a>(chart: &'a ChartSnapshot, thresholds: &MoveThresholds) -> Vec<Move<'a>> {
    moves(chart, thresholds, |delta| delta > 0)
}

/// Entries that fell far enough away from #1 to count as a big move.
///
/// # Returns
/// * `Vec<Move>` in chart order, every delta negative.
pub fn downwards_moves<'a>(chart: &'a ChartSnapshot, thresholds: &MoveThresholds) -> Vec<Move<'a>> {
    moves(chart, thresholds, |delta| delta < 0)
}

/// All big moves, rises and falls interleaved by current rank (#1 first).
pub fn big_moves<'a>(chart: &'a ChartSnapshot, thresholds: &MoveThresholds) -> Vec<Move<'a>> {
    let mut all = upwards_moves(chart, thresholds);
    all.extend(downwards_moves(chart, thresholds));
    all.sort_by_key(|m| m.entry.rank);
    all
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::tests::{date, entry};

    fn chart(entries: Vec<Entry>) -> ChartSnapshot {
        ChartSnapshot::new("hot-100", date("2024-03-02"), entries).unwrap()
    }

    /// Fills ranks `1..rank` with quiet entries so a single row can sit at any position.
    fn chart_with(row: Entry) -> ChartSnapshot {
        let mut entries: Vec<Entry> = (1..row.rank)
            .map(|rank| entry(&format!("Filler {}", rank), rank, rank, 1, 10, false))
            .collect();
        entries.push(row);
        chart(entries)
    }

    #[test]
    fn top_tier_boundary() {
        let thresholds = MoveThresholds::default();
        assert!(thresholds.is_big_move(50, 10));
        assert!(!thresholds.is_big_move(51, 9));
        assert!(!thresholds.is_big_move(51, 10));
        assert!(thresholds.is_big_move(50, -10));
    }

    #[test]
    fn anywhere_tier_boundary() {
        let thresholds = MoveThresholds::default();
        assert!(thresholds.is_big_move(80, 20));
        assert!(!thresholds.is_big_move(80, 19));
        assert!(thresholds.is_big_move(99, -20));
    }

    #[test]
    fn rise_into_rank_fifty_is_big() {
        let chart = chart_with(entry("Climber", 50, 60, 50, 4, false));
        let ups = upwards_moves(&chart, &MoveThresholds::default());
        assert_eq!(ups.len(), 1);
        assert_eq!(ups[0].delta, 10);
    }

    #[test]
    fn rise_into_rank_fifty_one_is_not_big() {
        let chart = chart_with(entry("Climber", 51, 60, 51, 4, false));
        assert!(upwards_moves(&chart, &MoveThresholds::default()).is_empty());
    }

    #[test]
    fn entries_without_last_position_never_move() {
        let chart = chart_with(entry("Debut", 30, 0, 30, 1, true));
        let thresholds = MoveThresholds::default();
        assert!(upwards_moves(&chart, &thresholds).iter().all(|m| m.entry.title != "Debut"));
        assert!(downwards_moves(&chart, &thresholds).iter().all(|m| m.entry.title != "Debut"));
    }

    #[test]
    fn small_move_at_number_one_is_ignored() {
        let chart = chart(vec![entry("X", 1, 3, 1, 5, false)]);
        assert!(big_moves(&chart, &MoveThresholds::default()).is_empty());
    }

    #[test]
    fn big_moves_interleave_by_rank() {
        let entries = (1..=30)
            .map(|rank| match rank {
                3 => entry("Up", 3, 20, 3, 5, false),
                15 => entry("Down", 15, 2, 1, 12, false),
                28 => entry("Up Again", 28, 60, 28, 2, false),
                29 => entry("Debut", 29, 0, 29, 1, true),
                _ => entry(&format!("Filler {}", rank), rank, rank, 1, 10, false),
            })
            .collect();
        let chart = chart(entries);
        let thresholds = MoveThresholds::default();
        let all = big_moves(&chart, &thresholds);

        let found: Vec<(u32, i64)> = all.iter().map(|m| (m.entry.rank, m.delta)).collect();
        assert_eq!(found, vec![(3, 17), (15, -13), (28, 32)]);

        let mut union: Vec<(u32, i64)> = upwards_moves(&chart, &thresholds)
            .iter()
            .chain(downwards_moves(&chart, &thresholds).iter())
            .map(|m| (m.entry.rank, m.delta))
            .collect();
        union.sort();
        assert_eq!(found, union);
    }

    #[test]
    fn falls_are_reported_with_negative_delta() {
        let chart = chart_with(entry("Faller", 45, 12, 3, 20, false));
        let downs = downwards_moves(&chart, &MoveThresholds::default());
        assert_eq!(downs.len(), 1);
        assert_eq!(downs[0].delta, -33);
        assert!(downs.iter().all(|m| m.delta < 0));
    }

    #[test]
    fn fall_of_twenty_outside_top_tier_is_big() {
        let chart = chart_with(entry("Faller", 100, 80, 40, 12, false));
        let downs = downwards_moves(&chart, &MoveThresholds::default());
        assert_eq!(downs.len(), 1);
        assert_eq!(downs[0].entry.title, "Faller");
        assert_eq!(downs[0].delta, -20);
    }

    #[test]
    fn fall_of_nineteen_outside_top_tier_is_not_big() {
        let chart = chart_with(entry("Faller", 99, 80, 40, 12, false));
        assert!(downwards_moves(&chart, &MoveThresholds::default()).is_empty());
        assert!(big_moves(&chart, &MoveThresholds::default()).is_empty());
    }
}
