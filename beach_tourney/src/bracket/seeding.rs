//! Seed lists for bracket construction.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::matches::Entrant;
use crate::pool::{Ranking, compare_rows};

/// Seed list from pool rankings
///
/// Takes the best `per_pool` entrants of every pool. All pool winners are
/// seeded ahead of all runners-up, and so on; within a tier, entrants are
/// ordered by their pool record, ties keeping pool order.
///
/// # Arguments
///
/// * `rankings` - Pool rankings in pool order
/// * `per_pool` - Qualifiers taken from each pool
///
/// # Returns
///
/// * `Vec<Entrant>` - Qualifiers with seeds renumbered from 1
pub fn seed_from_pools(rankings: &[Ranking], per_pool: usize) -> Vec<Entrant> {
    let mut seeded = Vec::new();

    for tier in 0..per_pool {
        let mut rows: Vec<_> = rankings
            .iter()
            .filter_map(|ranking| ranking.rows.get(tier))
            .collect();
        rows.sort_by(|a, b| compare_rows(*a, *b));
        seeded.extend(rows.into_iter().map(|row| row.entrant.clone()));
    }

    renumber(seeded)
}

/// Entrants in random order, seeds renumbered from 1
pub fn random_draw<R: Rng + ?Sized>(entrants: &[Entrant], rng: &mut R) -> Vec<Entrant> {
    let mut drawn = entrants.to_vec();
    drawn.shuffle(rng);
    renumber(drawn)
}

fn renumber(mut entrants: Vec<Entrant>) -> Vec<Entrant> {
    for (i, entrant) in entrants.iter_mut().enumerate() {
        entrant.seed = i as u32 + 1;
    }
    entrants
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::StandingRow;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn row(id: i64, wins: u32, points_won: u32, points_lost: u32) -> StandingRow {
        StandingRow {
            wins,
            points_won,
            points_lost,
            ..StandingRow::new(Entrant::new(id, format!("Team {id}"), 0))
        }
    }

    #[test]
    fn test_pool_winners_seeded_first() {
        let pool_a = Ranking {
            rows: vec![row(1, 3, 63, 40), row(2, 2, 60, 50), row(3, 0, 30, 63)],
        };
        let pool_b = Ranking {
            rows: vec![row(4, 3, 63, 30), row(5, 1, 50, 55), row(6, 0, 20, 63)],
        };

        let seeds = seed_from_pools(&[pool_a, pool_b], 2);
        let ids: Vec<i64> = seeds.iter().map(|e| e.id).collect();
        // 4 beats 1 on point difference; 2 beats 5 on wins.
        assert_eq!(ids, vec![4, 1, 2, 5]);
        let numbers: Vec<u32> = seeds.iter().map(|e| e.seed).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_short_pool_skipped_in_deep_tiers() {
        let pool_a = Ranking {
            rows: vec![row(1, 1, 21, 10), row(2, 0, 10, 21)],
        };
        let pool_b = Ranking {
            rows: vec![row(3, 2, 42, 20), row(4, 1, 30, 30), row(5, 0, 20, 42)],
        };
        let ids: Vec<i64> = seed_from_pools(&[pool_a, pool_b], 3)
            .iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec![3, 1, 4, 2, 5]);
    }

    #[test]
    fn test_random_draw_is_a_permutation() {
        let entrants: Vec<Entrant> = (1..=16)
            .map(|id| Entrant::new(id, format!("Team {id}"), id as u32))
            .collect();
        let mut rng = StdRng::seed_from_u64(7);
        let drawn = random_draw(&entrants, &mut rng);

        let mut ids: Vec<i64> = drawn.iter().map(|e| e.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, (1..=16).collect::<Vec<i64>>());
        assert!(drawn.iter().enumerate().all(|(i, e)| e.seed == i as u32 + 1));

        let mut again = StdRng::seed_from_u64(7);
        assert_eq!(random_draw(&entrants, &mut again), drawn);
    }
}
