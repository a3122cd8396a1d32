//! Pools: scheduling and standings.
//!
//! This module provides:
//! - Round-robin and King of the Beach rotation schedules
//! - Round and match count formulas used by the progression planner
//! - Standings recomputed from completed matches
//!
//! ## Example
//!
//! ```
//! use beach_tourney::matches::{Entrant, MatchFormat, SetScore};
//! use beach_tourney::pool::{Pool, PoolFormat};
//!
//! let teams = vec![
//!     Entrant::new(1, "Sand Sharks", 1),
//!     Entrant::new(2, "Dig Deep", 2),
//!     Entrant::new(3, "Net Gains", 3),
//! ];
//! let mut pool = Pool::new("A", PoolFormat::RoundRobin, teams, 1, MatchFormat::single_set(21))
//!     .unwrap();
//!
//! pool.record_score(0, vec![SetScore::new(21, 18)]).unwrap();
//! let ranking = pool.ranking();
//! assert_eq!(ranking.rows[0].wins, 1);
//! ```

pub mod models;
pub mod ranking;
pub mod schedule;

pub use models::Pool;
pub use ranking::{Ranking, StandingRow, compare_rows, compute_ranking};
pub use schedule::{
    PoolFormat, ROUND_ROBIN_ROUNDS, circle_rounds, matches_per_round, rounds_for, schedule_pool,
};
