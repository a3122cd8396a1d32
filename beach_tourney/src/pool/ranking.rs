//! Pool standings computed from completed matches.
//!
//! The ranking is always rebuilt from scratch so a corrected score can never
//! leave stale totals behind.

use log::warn;
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, collections::HashMap};

use crate::matches::{Entrant, EntrantId, Match, SetScore, Side};

/// One entrant's line in a pool standing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingRow {
    pub entrant: Entrant,
    pub wins: u32,
    pub losses: u32,
    pub sets_won: u32,
    pub sets_lost: u32,
    pub points_won: u32,
    pub points_lost: u32,
}

impl StandingRow {
    /// Empty row for an entrant
    pub fn new(entrant: Entrant) -> Self {
        Self {
            entrant,
            wins: 0,
            losses: 0,
            sets_won: 0,
            sets_lost: 0,
            points_won: 0,
            points_lost: 0,
        }
    }

    pub fn set_difference(&self) -> i64 {
        i64::from(self.sets_won) - i64::from(self.sets_lost)
    }

    pub fn point_difference(&self) -> i64 {
        i64::from(self.points_won) - i64::from(self.points_lost)
    }

    pub fn matches_played(&self) -> u32 {
        self.wins + self.losses
    }
}

/// Ordering of two rows, better first
///
/// Wins, then set difference, then point difference, then points won.
/// Rows equal on all four keys compare equal; callers sort stably so input
/// order decides.
pub fn compare_rows(a: &StandingRow, b: &StandingRow) -> Ordering {
    b.wins
        .cmp(&a.wins)
        .then_with(|| b.set_difference().cmp(&a.set_difference()))
        .then_with(|| b.point_difference().cmp(&a.point_difference()))
        .then_with(|| b.points_won.cmp(&a.points_won))
}

/// Ordered standing of a pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ranking {
    pub rows: Vec<StandingRow>,
}

impl Ranking {
    /// 0-based position of an entrant
    pub fn position(&self, entrant: EntrantId) -> Option<usize> {
        self.rows.iter().position(|row| row.entrant.id == entrant)
    }

    /// Best `n` rows
    pub fn top(&self, n: usize) -> &[StandingRow] {
        &self.rows[..n.min(self.rows.len())]
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Compute a pool's ranking from its entrants and matches
///
/// Only matches whose sets resolve to a completed outcome count. Matches
/// naming an entrant outside `entrants` are skipped.
pub fn compute_ranking(entrants: &[Entrant], matches: &[Match]) -> Ranking {
    let mut rows: Vec<StandingRow> = entrants.iter().cloned().map(StandingRow::new).collect();
    let index: HashMap<EntrantId, usize> = entrants
        .iter()
        .enumerate()
        .map(|(i, entrant)| (entrant.id, i))
        .collect();

    for m in matches {
        let outcome = m.outcome();
        if !outcome.is_completed() {
            continue;
        }

        let (Some(a), Some(b)) = (m.entrant(Side::A), m.entrant(Side::B)) else {
            continue;
        };
        let (Some(&row_a), Some(&row_b)) = (index.get(&a), index.get(&b)) else {
            warn!("Skipping match {}: entrants {a} vs {b} not both in pool", m.id);
            continue;
        };

        for (side, row) in [(Side::A, row_a), (Side::B, row_b)] {
            let row = &mut rows[row];
            if outcome.winner == Some(side) {
                row.wins += 1;
            } else {
                row.losses += 1;
            }
            row.sets_won += outcome.sets_won(side);
            row.sets_lost += outcome.sets_won(side.opposite());
            row.points_won = row.points_won.saturating_add(total_points(&m.sets, side));
            row.points_lost = row
                .points_lost
                .saturating_add(total_points(&m.sets, side.opposite()));
        }
    }

    rows.sort_by(compare_rows);
    Ranking { rows }
}

/// Points scored by one side, clamped at `u32::MAX`
fn total_points(sets: &[SetScore], side: Side) -> u32 {
    sets.iter()
        .map(|set| set.points(side))
        .fold(0, u32::saturating_add)
}
