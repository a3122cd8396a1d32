//! Pool partitioning, match counts and qualifier allocation.

use log::debug;

use super::models::{MAX_TEAMS_PER_POOL, MIN_TEAMS_PER_POOL};
use crate::errors::{TournamentError, TournamentResult};
use crate::pool::{PoolFormat, matches_per_round, rounds_for};

/// Split teams into pools whose sizes differ by at most one
///
/// The first `total_teams % pools` pools take the extra team.
///
/// # Errors
///
/// * `TournamentError::InvalidPoolCount` - `pools` outside `[1, total_teams]`,
///   or a pool smaller than [`MIN_TEAMS_PER_POOL`] or larger than
///   [`MAX_TEAMS_PER_POOL`]
pub fn distribute(total_teams: usize, pools: usize) -> TournamentResult<Vec<usize>> {
    let invalid = TournamentError::InvalidPoolCount {
        teams: total_teams,
        pools,
    };
    if pools == 0 || pools > total_teams {
        return Err(invalid);
    }

    let base = total_teams / pools;
    let remainder = total_teams % pools;
    let sizes: Vec<usize> = (0..pools)
        .map(|i| if i < remainder { base + 1 } else { base })
        .collect();

    if sizes
        .iter()
        .any(|&size| !(MIN_TEAMS_PER_POOL..=MAX_TEAMS_PER_POOL).contains(&size))
    {
        return Err(invalid);
    }

    debug!("Partitioned {total_teams} teams into {sizes:?}");
    Ok(sizes)
}

/// Matches played in one pool of `teams` teams over the whole phase
pub fn pool_matches(format: PoolFormat, teams: usize) -> usize {
    rounds_for(format, teams) as usize * matches_per_round(format, teams)
}

/// Matches played across all pools, using each pool's own size
pub fn total_matches(format: PoolFormat, pool_sizes: &[usize]) -> usize {
    pool_sizes
        .iter()
        .map(|&teams| pool_matches(format, teams))
        .sum()
}

/// Allocate a phase's qualifiers to its pools
///
/// Each pool in turn receives its proportional share of the qualifiers
/// still unassigned, measured against the players not yet visited. A pool
/// never qualifies more than `players - players_per_team`, so at least one
/// team goes out. Anything left over goes to the first pools with room.
///
/// # Arguments
///
/// * `total_qualified` - Players the phase advances
/// * `pool_players` - Players in each pool
/// * `players_per_team` - Team size in this phase
///
/// # Returns
///
/// * `Vec<usize>` - Qualified players per pool. Sums to less than
///   `total_qualified` only when the pools lack capacity.
pub fn distribute_qualifiers(
    total_qualified: usize,
    pool_players: &[usize],
    players_per_team: usize,
) -> Vec<usize> {
    let caps: Vec<usize> = pool_players
        .iter()
        .map(|&players| players.saturating_sub(players_per_team))
        .collect();

    let mut remaining_qualified = total_qualified;
    let mut remaining_players: usize = pool_players.iter().sum();
    let mut allocation = Vec::with_capacity(pool_players.len());

    for (&players, &cap) in pool_players.iter().zip(&caps) {
        let share = if remaining_players == 0 {
            0
        } else {
            remaining_qualified * players / remaining_players
        };
        let granted = share.min(cap);
        allocation.push(granted);
        remaining_qualified -= granted;
        remaining_players -= players;
    }

    for (granted, &cap) in allocation.iter_mut().zip(&caps) {
        if remaining_qualified == 0 {
            break;
        }
        let extra = (cap - *granted).min(remaining_qualified);
        *granted += extra;
        remaining_qualified -= extra;
    }

    if remaining_qualified > 0 {
        debug!(
            "Pools {pool_players:?} cannot hold {total_qualified} qualifiers, {remaining_qualified} short"
        );
    }
    allocation
}
