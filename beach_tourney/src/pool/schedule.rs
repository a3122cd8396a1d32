//! Pool match schedules and the round/match count formulas behind them.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::matches::{Entrant, Match, MatchFormat, Slot};

/// Rounds played by every round-robin pool
pub const ROUND_ROBIN_ROUNDS: u32 = 3;

/// KOB rounds by pool size, for sizes 2 through 8
const KOB_ROUNDS: [u32; 7] = [1, 3, 5, 7, 9, 11, 13];

/// How teams in a pool are paired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolFormat {
    /// Every team meets every other team each round
    RoundRobin,
    /// King of the Beach: teams re-paired each round
    KingOfTheBeach,
}

impl fmt::Display for PoolFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolFormat::RoundRobin => write!(f, "round-robin"),
            PoolFormat::KingOfTheBeach => write!(f, "kob"),
        }
    }
}

/// Number of rounds a pool of `teams` plays
///
/// Round-robin is always [`ROUND_ROBIN_ROUNDS`]. KOB uses a lookup for
/// 2 to 8 teams and `2n - 3` beyond.
pub fn rounds_for(format: PoolFormat, teams: usize) -> u32 {
    match format {
        PoolFormat::RoundRobin => ROUND_ROBIN_ROUNDS,
        PoolFormat::KingOfTheBeach => match teams {
            0 | 1 => 0,
            2..=8 => KOB_ROUNDS[teams - 2],
            n => (2 * n - 3) as u32,
        },
    }
}

/// Matches one round generates in a pool of `teams`
pub fn matches_per_round(format: PoolFormat, teams: usize) -> usize {
    match format {
        PoolFormat::RoundRobin => teams * teams.saturating_sub(1) / 2,
        PoolFormat::KingOfTheBeach => teams / 2,
    }
}

/// Circle-method pairings: `n - 1` rounds (or `n` when odd) of team indices
///
/// The first index stays fixed while the others rotate; with an odd count
/// a phantom team is added and its pairing dropped.
pub fn circle_rounds(teams: usize) -> Vec<Vec<(usize, usize)>> {
    if teams < 2 {
        return Vec::new();
    }

    let size = teams + teams % 2;
    let mut order: Vec<usize> = (0..size).collect();
    let mut rounds = Vec::with_capacity(size - 1);

    for _ in 0..size - 1 {
        let pairs = (0..size / 2)
            .map(|i| (order[i], order[size - 1 - i]))
            .filter(|&(a, b)| a < teams && b < teams)
            .collect();
        rounds.push(pairs);
        order[1..].rotate_right(1);
    }

    rounds
}

/// Build the matches of a pool
///
/// Match IDs run from 0 in play order; `Match::round` is the 0-based round.
pub fn schedule_pool(
    entrants: &[Entrant],
    format: PoolFormat,
    rounds: u32,
    match_format: MatchFormat,
) -> Vec<Match> {
    let cycle = circle_rounds(entrants.len());
    if cycle.is_empty() {
        return Vec::new();
    }

    let mut matches = Vec::new();
    for round in 0..rounds {
        let pairs: Vec<(usize, usize)> = match format {
            PoolFormat::RoundRobin => cycle.iter().flatten().copied().collect(),
            PoolFormat::KingOfTheBeach => cycle[round as usize % cycle.len()].clone(),
        };

        for (a, b) in pairs {
            matches.push(Match::new(
                matches.len(),
                round,
                Slot::Resolved(entrants[a].id),
                Slot::Resolved(entrants[b].id),
                match_format,
            ));
        }
    }

    matches
}
